use axum::{
    extract::State,
    middleware,
    routing::{delete, get},
    Extension, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain::{Product, Wishlist};
use crate::http::auth::{require_auth, AuthUser};
use crate::http::extract::{AppJson, AppPath};
use crate::http::response::{ApiResponse, ApiResult};
use crate::http::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_wishlist).post(add_to_wishlist).delete(clear_wishlist))
        .route("/{product_id}", delete(remove_from_wishlist))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToWishlist {
    pub product_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistView {
    pub user_id: String,
    pub products: Vec<Product>,
}

#[tracing::instrument(name = "GET /api/wishlist", skip(state, user), fields(user_id = %user.id))]
pub async fn get_wishlist(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> ApiResult<WishlistView> {
    let products = state.wishlists.wishlist_products(user.id.clone()).await?;
    Ok(ApiResponse::ok(WishlistView {
        user_id: user.id,
        products,
    }))
}

#[tracing::instrument(name = "POST /api/wishlist", skip(state, user), fields(user_id = %user.id))]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppJson(body): AppJson<AddToWishlist>,
) -> ApiResult<Wishlist> {
    let wishlist = state.wishlists.add_product(user.id, body.product_id).await?;
    Ok(ApiResponse::with_message("Product added to wishlist", wishlist))
}

#[tracing::instrument(name = "DELETE /api/wishlist/{product_id}", skip(state, user), fields(user_id = %user.id))]
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppPath(product_id): AppPath<String>,
) -> ApiResult<Wishlist> {
    let wishlist = state.wishlists.remove_product(user.id, product_id).await?;
    Ok(ApiResponse::with_message("Product removed from wishlist", wishlist))
}

#[tracing::instrument(name = "DELETE /api/wishlist", skip(state, user), fields(user_id = %user.id))]
pub async fn clear_wishlist(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> ApiResult<Wishlist> {
    let wishlist = state.wishlists.clear_wishlist(user.id).await?;
    Ok(ApiResponse::with_message("Wishlist cleared", wishlist))
}
