use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::cart_actor::CartError;
use crate::order_actor::OrderError;
use crate::payment::PaymentError;
use crate::product_actor::{InsufficientItem, ProductError};
use crate::review_actor::ReviewError;
use crate::user_actor::UserError;
use crate::wishlist_actor::WishlistError;

/// Error returned by every handler, rendered as `{success: false, message, ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    insufficient_products: Option<Vec<InsufficientItem>>,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            insufficient_products: None,
        }
    }

    #[cfg(test)]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::error!("Internal error: {}", msg);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::warn!("Not found: {}", msg);
        Self::new(StatusCode::NOT_FOUND, msg)
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::warn!("Bad request: {}", msg);
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::warn!("Unauthorized: {}", msg);
        Self::new(StatusCode::UNAUTHORIZED, msg)
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::warn!("Forbidden: {}", msg);
        Self::new(StatusCode::FORBIDDEN, msg)
    }

    /// A request axum could not decode, keeping the status it chose.
    pub fn rejected(status: StatusCode, msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::warn!(%status, "Rejected request: {}", msg);
        Self::new(status, msg)
    }

    pub fn insufficient_stock(items: Vec<InsufficientItem>) -> Self {
        let message = match items.as_slice() {
            [item] => format!(
                "Insufficient stock for {}. Available: {}, Requested: {}",
                item.name, item.available, item.requested
            ),
            _ => "Insufficient stock for some items".to_string(),
        };
        tracing::warn!("Insufficient stock: {}", message);
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
            insufficient_products: Some(items),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ErrorBody {
            success: bool,
            message: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            insufficient_products: Option<Vec<InsufficientItem>>,
        }

        let body = ErrorBody {
            success: false,
            message: self.message,
            insufficient_products: self.insufficient_products,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => ApiError::not_found("Product not found"),
            ProductError::InsufficientStock {
                product_id,
                requested,
                available,
            } => ApiError::insufficient_stock(vec![InsufficientItem {
                name: product_id.clone(),
                product_id,
                requested,
                available,
            }]),
            ProductError::InvalidQuantity(_) | ProductError::ValidationError(_) | ProductError::StockOverflow(_) => {
                ApiError::bad_request(err.to_string())
            }
            ProductError::ActorCommunicationError(_) => ApiError::internal(err.to_string()),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(_) => ApiError::not_found("Order not found"),
            OrderError::InsufficientStock(items) => ApiError::insufficient_stock(items),
            OrderError::InvalidProduct(_)
            | OrderError::InvalidUser(_)
            | OrderError::ValidationError(_)
            | OrderError::InvalidTransition { .. }
            | OrderError::NotCancellable(_)
            | OrderError::AlreadyCancelled => ApiError::bad_request(err.to_string()),
            OrderError::StockUpdateFailed(_) | OrderError::ActorCommunicationError(_) => {
                ApiError::internal(err.to_string())
            }
        }
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::NotFound => ApiError::not_found("Cart not found"),
            CartError::ItemNotFound(_) => ApiError::not_found("Item not found in cart"),
            CartError::ProductNotFound(_) => ApiError::not_found("Product not found"),
            CartError::InsufficientStock { .. } | CartError::InvalidQuantity(_) => ApiError::bad_request(err.to_string()),
            CartError::ActorCommunicationError(_) => ApiError::internal(err.to_string()),
        }
    }
}

impl From<WishlistError> for ApiError {
    fn from(err: WishlistError) -> Self {
        match err {
            WishlistError::NotFound => ApiError::not_found("Wishlist not found"),
            WishlistError::ProductNotFound(_) => ApiError::not_found("Product not found"),
            WishlistError::AlreadyPresent(_) => ApiError::bad_request(err.to_string()),
            WishlistError::ActorCommunicationError(_) => ApiError::internal(err.to_string()),
        }
    }
}

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::NotFound(_) => ApiError::not_found("Review not found"),
            ReviewError::ProductNotFound(_) => ApiError::not_found("Product not found"),
            ReviewError::NotPurchased | ReviewError::NotAuthor => ApiError::forbidden(err.to_string()),
            ReviewError::AlreadyReviewed | ReviewError::ValidationError(_) => ApiError::bad_request(err.to_string()),
            ReviewError::ActorCommunicationError(_) => ApiError::internal(err.to_string()),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::not_found("User not found"),
            UserError::AlreadyExists(_) | UserError::ValidationError(_) => ApiError::bad_request(err.to_string()),
            UserError::ActorCommunicationError(_) => ApiError::internal(err.to_string()),
        }
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Order(e) => e.into(),
            PaymentError::InvalidSignature | PaymentError::MissingField(_) | PaymentError::InvalidAmount(_) => {
                ApiError::bad_request(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from(OrderError::AlreadyCancelled).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(CartError::NotFound).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(ReviewError::NotPurchased).status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::from(PaymentError::Order(OrderError::NotFound("order_1".into()))).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(ProductError::ActorCommunicationError("closed".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
