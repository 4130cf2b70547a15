use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::domain::OrderStatus;
use crate::product_actor::{InsufficientItem, ProductError};

fn describe_shortage(items: &[InsufficientItem]) -> String {
    items
        .iter()
        .map(|item| format!("{} (available {}, requested {})", item.name, item.available, item.requested))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
    #[error("Invalid user: {0}")]
    InvalidUser(String),
    #[error("Insufficient stock: {}", describe_shortage(.0))]
    InsufficientStock(Vec<InsufficientItem>),
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Cannot move order from {} to {}", .from.as_str(), .to.as_str())]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("Cannot cancel order that has been shipped or delivered")]
    NotCancellable(OrderStatus),
    #[error("Order is already cancelled")]
    AlreadyCancelled,
    #[error("Stock update failed: {0}")]
    StockUpdateFailed(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<OrderError>> for OrderError {
    fn from(err: FrameworkError<OrderError>) -> Self {
        match err {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<ProductError> for OrderError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => OrderError::InvalidProduct(id),
            ProductError::InsufficientStock {
                product_id,
                requested,
                available,
            } => OrderError::InsufficientStock(vec![InsufficientItem {
                name: product_id.clone(),
                product_id,
                requested,
                available,
            }]),
            ProductError::InvalidQuantity(q) => OrderError::ValidationError(format!("Invalid quantity: {q}")),
            other => OrderError::StockUpdateFailed(other.to_string()),
        }
    }
}
