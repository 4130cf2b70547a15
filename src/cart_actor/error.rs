use thiserror::Error;

use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart not found")]
    NotFound,
    #[error("Item not found in cart: {0}")]
    ItemNotFound(String),
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<CartError>> for CartError {
    fn from(err: FrameworkError<CartError>) -> Self {
        match err {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(_) => CartError::NotFound,
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}
