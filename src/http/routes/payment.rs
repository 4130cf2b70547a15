use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Extension, Router,
};

use crate::domain::Order;
use crate::http::auth::{require_auth, AuthUser};
use crate::http::extract::AppJson;
use crate::http::response::{ApiResponse, ApiResult};
use crate::http::state::AppState;
use crate::payment::{
    CheckoutData, PaymentMethodInfo, PaymentRequest, RazorpayOrder, RazorpayVerification, UpiOrder, UpiVerification,
};

pub fn routes(state: &AppState) -> Router<AppState> {
    let authed = Router::new()
        .route("/create-order", post(create_order))
        .route("/create-upi-order", post(create_upi_order))
        .route("/verify", post(verify_payment))
        .route("/verify-upi", post(verify_upi))
        .route("/verify-cod", post(verify_cod))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new().route("/methods", get(payment_methods)).merge(authed)
}

#[tracing::instrument(name = "GET /api/payment/methods", skip(state))]
pub async fn payment_methods(State(state): State<AppState>) -> ApiResult<Vec<PaymentMethodInfo>> {
    Ok(ApiResponse::ok(state.payments.payment_methods()))
}

#[tracing::instrument(name = "POST /api/payment/create-order", skip(state, user), fields(user_id = %user.id))]
pub async fn create_order(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppJson(body): AppJson<PaymentRequest>,
) -> ApiResult<RazorpayOrder> {
    Ok(ApiResponse::ok(state.payments.create_razorpay_order(&user.id, body)?))
}

#[tracing::instrument(name = "POST /api/payment/create-upi-order", skip(state, user), fields(user_id = %user.id))]
pub async fn create_upi_order(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppJson(body): AppJson<PaymentRequest>,
) -> ApiResult<UpiOrder> {
    Ok(ApiResponse::ok(state.payments.create_upi_order(&user.id, body)?))
}

#[tracing::instrument(name = "POST /api/payment/verify", skip(state, user, body), fields(user_id = %user.id))]
pub async fn verify_payment(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppJson(body): AppJson<RazorpayVerification>,
) -> ApiResult<Order> {
    let order = state.payments.verify_razorpay(&user.id, body).await?;
    Ok(ApiResponse::with_message("Payment verified and order created", order))
}

#[tracing::instrument(name = "POST /api/payment/verify-upi", skip(state, user, body), fields(user_id = %user.id))]
pub async fn verify_upi(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppJson(body): AppJson<UpiVerification>,
) -> ApiResult<Order> {
    let order = state.payments.verify_upi(&user.id, body).await?;
    Ok(ApiResponse::with_message("UPI payment confirmed and order created", order))
}

#[tracing::instrument(name = "POST /api/payment/verify-cod", skip(state, user, body), fields(user_id = %user.id))]
pub async fn verify_cod(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppJson(body): AppJson<CheckoutData>,
) -> ApiResult<Order> {
    let order = state.payments.place_cod(&user.id, body).await?;
    Ok(ApiResponse::with_message("Order placed with cash on delivery", order))
}
