use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::Deserialize;

use crate::clients::OrderPage;
use crate::domain::Order;
use crate::http::auth::{require_auth, AuthUser};
use crate::http::error::ApiError;
use crate::http::extract::{AppJson, AppPath, AppQuery};
use crate::http::response::{ApiResponse, ApiResult};
use crate::http::state::AppState;
use crate::payment::CheckoutData;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/{id}", get(get_order))
        .route("/{id}/cancel", put(cancel_order))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page")]
    pub page: usize,
    #[serde(default = "page_size")]
    pub limit: usize,
}

fn first_page() -> usize {
    1
}

fn page_size() -> usize {
    10
}

/// Direct checkout, paid on delivery.
#[tracing::instrument(name = "POST /api/orders", skip(state, user, body), fields(user_id = %user.id))]
pub async fn create_order(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppJson(body): AppJson<CheckoutData>,
) -> Result<(StatusCode, Json<ApiResponse<Order>>), ApiError> {
    let order = state.payments.place_cod(&user.id, body).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("Order placed successfully", order),
    ))
}

#[tracing::instrument(name = "GET /api/orders", skip(state, user), fields(user_id = %user.id))]
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppQuery(query): AppQuery<PageQuery>,
) -> ApiResult<OrderPage> {
    let page = state.orders.list_user_orders(&user.id, query.page, query.limit).await?;
    Ok(ApiResponse::ok(page))
}

#[tracing::instrument(name = "GET /api/orders/{id}", skip(state, user), fields(user_id = %user.id))]
pub async fn get_order(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppPath(id): AppPath<String>,
) -> ApiResult<Order> {
    let order = state.orders.get_order_for(&user, id).await?;
    Ok(ApiResponse::ok(order))
}

#[tracing::instrument(name = "PUT /api/orders/{id}/cancel", skip(state, user), fields(user_id = %user.id))]
pub async fn cancel_order(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppPath(id): AppPath<String>,
) -> ApiResult<Order> {
    let order = state.orders.cancel_order(&user, id).await?;
    Ok(ApiResponse::with_message("Order cancelled successfully", order))
}
