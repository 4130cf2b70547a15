use thiserror::Error;

use crate::order_actor::OrderError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PaymentError {
    #[error("Payment verification failed")]
    InvalidSignature,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),
    #[error(transparent)]
    Order(#[from] OrderError),
}
