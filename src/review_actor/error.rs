use thiserror::Error;

use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReviewError {
    #[error("Review not found: {0}")]
    NotFound(String),
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("You can only review products you have purchased")]
    NotPurchased,
    #[error("You have already reviewed this product")]
    AlreadyReviewed,
    #[error("You can only change your own reviews")]
    NotAuthor,
    #[error("Review validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<ReviewError>> for ReviewError {
    fn from(err: FrameworkError<ReviewError>) -> Self {
        match err {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(id) => ReviewError::NotFound(id),
            FrameworkError::AlreadyExists(_) => ReviewError::AlreadyReviewed,
            other => ReviewError::ActorCommunicationError(other.to_string()),
        }
    }
}
