//! Orders and their fulfilment lifecycle.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::actor_framework::ResourceActor;
use crate::domain::Order;
use crate::actor_framework::ResourceClient;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Creates a new Order actor and the raw client the order orchestrator wraps.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    let order_id_counter = Arc::new(AtomicU64::new(1));
    let next_order_id = move || {
        let id = order_id_counter.fetch_add(1, Ordering::SeqCst);
        format!("order_{}", id)
    };

    ResourceActor::new(buffer_size, next_order_id)
}
