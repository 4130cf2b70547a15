use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog;
use crate::domain::{Product, ProductCreate, ProductUpdate};
use crate::http::auth::{require_admin, require_auth};
use crate::http::error::ApiError;
use crate::http::extract::{AppJson, AppPath, AppQuery};
use crate::http::response::{ApiResponse, ApiResult};
use crate::http::state::AppState;
use crate::product_actor::{ProductError, StockLine, StockReport, StockSnapshot};

pub fn routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
        .route("/{id}/stock", get(stock_level))
        .route("/check-stock", post(check_stock));

    let admin = Router::new()
        .route("/", post(create_product))
        .route("/{id}", axum::routing::put(update_product).delete(delete_product))
        .route("/{id}/restock", post(restock))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    public.merge(admin)
}

/// Product as served to the storefront, with the derived discount.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub discount_percent: u32,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            discount_percent: product.discount_percent(),
            product,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RestockRequest {
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct StockCheckRequest {
    pub items: Vec<StockLine>,
}

#[tracing::instrument(name = "GET /api/products", skip(state))]
pub async fn list_products(State(state): State<AppState>, AppQuery(filter): AppQuery<ProductFilter>) -> ApiResult<Vec<ProductView>> {
    let category = filter.category.as_deref().filter(|c| !c.is_empty() && *c != "all");
    let search = filter.search.as_deref().filter(|s| !s.trim().is_empty());

    match state.products.search_products(category, search).await {
        Ok(products) => Ok(ApiResponse::ok(products.into_iter().map(ProductView::from).collect())),
        Err(ProductError::ActorCommunicationError(e)) => {
            warn!(error = %e, "Product store unavailable, serving sample catalog");
            let products = catalog::sample_products()
                .into_iter()
                .filter(|p| p.matches(category, search))
                .map(ProductView::from)
                .collect();
            Ok(ApiResponse::with_message("Showing sample catalog", products))
        }
        Err(e) => Err(e.into()),
    }
}

#[tracing::instrument(name = "GET /api/products/{id}", skip(state))]
pub async fn get_product(State(state): State<AppState>, AppPath(id): AppPath<String>) -> ApiResult<ProductView> {
    let product = state
        .products
        .get_product(id.clone())
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Product not found: {id}")))?;
    Ok(ApiResponse::ok(product.into()))
}

#[tracing::instrument(name = "GET /api/products/{id}/stock", skip(state))]
pub async fn stock_level(State(state): State<AppState>, AppPath(id): AppPath<String>) -> ApiResult<StockSnapshot> {
    Ok(ApiResponse::ok(state.products.check_stock(id).await?))
}

#[tracing::instrument(name = "POST /api/products/check-stock", skip(state, body))]
pub async fn check_stock(State(state): State<AppState>, AppJson(body): AppJson<StockCheckRequest>) -> ApiResult<StockReport> {
    if body.items.is_empty() {
        return Err(ApiError::bad_request("No items to check"));
    }
    let report = state.products.check_stock_availability(&body.items).await?;
    let message = report.message();
    Ok(ApiResponse::with_message(message, report))
}

#[tracing::instrument(name = "POST /api/products", skip(state, body))]
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(body): AppJson<ProductCreate>,
) -> Result<(StatusCode, Json<ApiResponse<ProductView>>), ApiError> {
    let product = state.products.create_product(body).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("Product created", product.into()),
    ))
}

#[tracing::instrument(name = "PUT /api/products/{id}", skip(state, body))]
pub async fn update_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AppJson(body): AppJson<ProductUpdate>,
) -> ApiResult<ProductView> {
    let product = state.products.update_product(id, body).await?;
    Ok(ApiResponse::with_message("Product updated", product.into()))
}

#[tracing::instrument(name = "DELETE /api/products/{id}", skip(state))]
pub async fn delete_product(State(state): State<AppState>, AppPath(id): AppPath<String>) -> ApiResult<()> {
    state.products.delete_product(id).await?;
    Ok(ApiResponse::with_message("Product deleted", ()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub product_id: String,
    pub stock: u32,
}

#[tracing::instrument(name = "POST /api/products/{id}/restock", skip(state))]
pub async fn restock(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AppJson(body): AppJson<RestockRequest>,
) -> ApiResult<StockLevel> {
    let stock = state.products.restock(id.clone(), body.quantity).await?;
    Ok(ApiResponse::with_message("Stock updated", StockLevel { product_id: id, stock }))
}
