use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::clients::NewReview;
use crate::domain::{Review, ReviewUpdate};
use crate::http::auth::{require_auth, AuthUser};
use crate::http::error::ApiError;
use crate::http::extract::{AppJson, AppPath};
use crate::http::response::{ApiResponse, ApiResult};
use crate::http::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let authed = Router::new()
        .route("/product/{product_id}", post(add_review))
        .route("/{id}", put(update_review).delete(delete_review))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/product/{product_id}", get(product_reviews))
        .route("/{id}/helpful", post(mark_helpful))
        .merge(authed)
}

#[derive(Debug, Deserialize)]
pub struct ReviewBody {
    pub rating: u8,
    pub title: Option<String>,
    pub comment: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReviews {
    pub reviews: Vec<Review>,
    pub average_rating: f64,
    pub total_reviews: usize,
}

#[derive(Debug, Serialize)]
pub struct HelpfulCount {
    pub helpful: u32,
}

#[tracing::instrument(name = "GET /api/reviews/product/{product_id}", skip(state))]
pub async fn product_reviews(State(state): State<AppState>, AppPath(product_id): AppPath<String>) -> ApiResult<ProductReviews> {
    let reviews = state.reviews.list_for_product(&product_id).await?;
    let total_reviews = reviews.len();
    let average_rating = if total_reviews == 0 {
        0.0
    } else {
        let sum: f64 = reviews.iter().map(|r| f64::from(r.rating)).sum();
        (sum / total_reviews as f64 * 10.0).round() / 10.0
    };
    Ok(ApiResponse::ok(ProductReviews {
        reviews,
        average_rating,
        total_reviews,
    }))
}

#[tracing::instrument(name = "POST /api/reviews/product/{product_id}", skip(state, user, body), fields(user_id = %user.id))]
pub async fn add_review(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppPath(product_id): AppPath<String>,
    AppJson(body): AppJson<ReviewBody>,
) -> Result<(StatusCode, Json<ApiResponse<Review>>), ApiError> {
    let review = state
        .reviews
        .add_review(
            &user,
            NewReview {
                product_id,
                rating: body.rating,
                title: body.title,
                comment: body.comment,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, ApiResponse::with_message("Review added", review)))
}

#[tracing::instrument(name = "PUT /api/reviews/{id}", skip(state, user, body), fields(user_id = %user.id))]
pub async fn update_review(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppPath(id): AppPath<String>,
    AppJson(body): AppJson<ReviewUpdate>,
) -> ApiResult<Review> {
    let review = state.reviews.update_review(&user, id, body).await?;
    Ok(ApiResponse::with_message("Review updated", review))
}

#[tracing::instrument(name = "DELETE /api/reviews/{id}", skip(state, user), fields(user_id = %user.id))]
pub async fn delete_review(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppPath(id): AppPath<String>,
) -> ApiResult<()> {
    state.reviews.delete_review(&user, id).await?;
    Ok(ApiResponse::with_message("Review deleted", ()))
}

#[tracing::instrument(name = "POST /api/reviews/{id}/helpful", skip(state))]
pub async fn mark_helpful(State(state): State<AppState>, AppPath(id): AppPath<String>) -> ApiResult<HelpfulCount> {
    let helpful = state.reviews.mark_helpful(id).await?;
    Ok(ApiResponse::ok(HelpfulCount { helpful }))
}
