use thiserror::Error;

use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum WishlistError {
    #[error("Wishlist not found")]
    NotFound,
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Product already in wishlist")]
    AlreadyPresent(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<WishlistError>> for WishlistError {
    fn from(err: FrameworkError<WishlistError>) -> Self {
        match err {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(_) => WishlistError::NotFound,
            other => WishlistError::ActorCommunicationError(other.to_string()),
        }
    }
}
