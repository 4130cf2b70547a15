//! User accounts.

pub mod entity;
pub mod error;

pub use error::*;

use crate::actor_framework::ResourceActor;
use crate::clients::UserClient;
use crate::domain::User;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Creates a new User actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, UserClient) {
    let user_id_counter = Arc::new(AtomicU64::new(1));
    let next_user_id = move || {
        let id = user_id_counter.fetch_add(1, Ordering::SeqCst);
        format!("user_{}", id)
    };

    let (actor, generic_client) = ResourceActor::new(buffer_size, next_user_id);
    (actor, UserClient::new(generic_client))
}
