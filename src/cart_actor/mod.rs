//! Per-user shopping carts.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::actor_framework::{ResourceActor, ResourceClient};
use crate::domain::Cart;

/// Creates a new Cart actor. Carts are keyed by their owner's id, so the id
/// generator is never consulted.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, ResourceClient<Cart>) {
    ResourceActor::new(buffer_size, || "cart_anonymous".to_string())
}
