use axum::{
    extract::State,
    middleware,
    routing::{get, post, put},
    Extension, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain::Cart;
use crate::http::auth::{require_auth, AuthUser};
use crate::http::extract::{AppJson, AppPath};
use crate::http::response::{ApiResponse, ApiResult};
use crate::http::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart).delete(clear_cart))
        .route("/add", post(add_to_cart))
        .route("/items/{product_id}", put(update_item).delete(remove_item))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

#[derive(Debug, Serialize)]
pub struct CartView {
    #[serde(flatten)]
    pub cart: Cart,
    pub total: f64,
}

impl From<Cart> for CartView {
    fn from(cart: Cart) -> Self {
        Self {
            total: cart.total(),
            cart,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    pub product_id: String,
    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantity {
    pub quantity: i64,
}

#[tracing::instrument(name = "GET /api/cart", skip(state, user), fields(user_id = %user.id))]
pub async fn get_cart(State(state): State<AppState>, Extension(AuthUser(user)): Extension<AuthUser>) -> ApiResult<CartView> {
    let cart = state.carts.get_cart(user.id).await?;
    Ok(ApiResponse::ok(cart.into()))
}

#[tracing::instrument(name = "POST /api/cart/add", skip(state, user, body), fields(user_id = %user.id))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppJson(body): AppJson<AddToCart>,
) -> ApiResult<CartView> {
    let cart = state.carts.add_item(user.id, body.product_id, body.quantity).await?;
    Ok(ApiResponse::with_message("Item added to cart", cart.into()))
}

#[tracing::instrument(name = "PUT /api/cart/items/{product_id}", skip(state, user, body), fields(user_id = %user.id))]
pub async fn update_item(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppPath(product_id): AppPath<String>,
    AppJson(body): AppJson<UpdateQuantity>,
) -> ApiResult<CartView> {
    let cart = state.carts.update_quantity(user.id, product_id, body.quantity).await?;
    Ok(ApiResponse::with_message("Cart updated", cart.into()))
}

#[tracing::instrument(name = "DELETE /api/cart/items/{product_id}", skip(state, user), fields(user_id = %user.id))]
pub async fn remove_item(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppPath(product_id): AppPath<String>,
) -> ApiResult<CartView> {
    let cart = state.carts.remove_item(user.id, product_id).await?;
    Ok(ApiResponse::with_message("Item removed from cart", cart.into()))
}

#[tracing::instrument(name = "DELETE /api/cart", skip(state, user), fields(user_id = %user.id))]
pub async fn clear_cart(State(state): State<AppState>, Extension(AuthUser(user)): Extension<AuthUser>) -> ApiResult<CartView> {
    let cart = state.carts.clear_cart(user.id).await?;
    Ok(ApiResponse::with_message("Cart cleared", cart.into()))
}
