//! Product reviews.

pub mod entity;
pub mod error;

pub use entity::MarkHelpful;
pub use error::*;

use crate::actor_framework::{ResourceActor, ResourceClient};
use crate::domain::Review;

/// Creates a new Review actor. Review ids are derived from product and author.
pub fn new(buffer_size: usize) -> (ResourceActor<Review>, ResourceClient<Review>) {
    ResourceActor::new(buffer_size, || "review_anonymous".to_string())
}
