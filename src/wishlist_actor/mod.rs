//! Per-user wishlists.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::actor_framework::{ResourceActor, ResourceClient};
use crate::domain::Wishlist;

/// Creates a new Wishlist actor. Wishlists are keyed by their owner's id.
pub fn new(buffer_size: usize) -> (ResourceActor<Wishlist>, ResourceClient<Wishlist>) {
    ResourceActor::new(buffer_size, || "wishlist_anonymous".to_string())
}
