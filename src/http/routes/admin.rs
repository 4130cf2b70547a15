use axum::{
    extract::State,
    middleware,
    routing::{get, put},
    Router,
};
use serde::Deserialize;

use crate::clients::SalesSummary;
use crate::domain::{Order, OrderStatus};
use crate::http::auth::{require_admin, require_auth};
use crate::http::extract::{AppJson, AppPath, AppQuery};
use crate::http::response::{ApiResponse, ApiResult};
use crate::http::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/{id}/status", put(update_status))
        .route("/sales-summary", get(sales_summary))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

#[derive(Debug, Deserialize)]
pub struct StatusFilter {
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

#[tracing::instrument(name = "GET /api/admin/orders", skip(state))]
pub async fn list_orders(State(state): State<AppState>, AppQuery(filter): AppQuery<StatusFilter>) -> ApiResult<Vec<Order>> {
    let orders = state.orders.list_orders_with_status(filter.status).await?;
    Ok(ApiResponse::ok(orders))
}

#[tracing::instrument(name = "PUT /api/admin/orders/{id}/status", skip(state))]
pub async fn update_status(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AppJson(body): AppJson<StatusUpdate>,
) -> ApiResult<Order> {
    let order = state.orders.update_status(id, body.status).await?;
    Ok(ApiResponse::with_message("Order status updated", order))
}

#[tracing::instrument(name = "GET /api/admin/sales-summary", skip(state))]
pub async fn sales_summary(State(state): State<AppState>) -> ApiResult<SalesSummary> {
    Ok(ApiResponse::ok(state.orders.sales_summary().await?))
}
