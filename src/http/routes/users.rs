use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;

use crate::domain::{User, UserCreate, UserUpdate};
use crate::http::auth::{require_admin, require_auth, AuthUser};
use crate::http::error::ApiError;
use crate::http::extract::AppJson;
use crate::http::response::{ApiResponse, ApiResult};
use crate::http::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(create_user).get(list_users))
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/me", get(me).put(update_me))
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

#[derive(Debug, Serialize)]
pub struct IssuedUser {
    pub user: User,
    pub token: String,
}

#[tracing::instrument(name = "GET /api/users/me", skip(user), fields(user_id = %user.id))]
pub async fn me(Extension(AuthUser(user)): Extension<AuthUser>) -> ApiResult<User> {
    Ok(ApiResponse::ok(user))
}

#[tracing::instrument(name = "PUT /api/users/me", skip(state, user, body), fields(user_id = %user.id))]
pub async fn update_me(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppJson(body): AppJson<UserUpdate>,
) -> ApiResult<User> {
    let user = state.users.update_user(user.id, body).await?;
    Ok(ApiResponse::with_message("Profile updated", user))
}

/// Provisions an account and hands back a bearer token for it.
#[tracing::instrument(name = "POST /api/users", skip(state, body))]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(body): AppJson<UserCreate>,
) -> Result<(StatusCode, Json<ApiResponse<IssuedUser>>), ApiError> {
    let user = state.users.create_user(body).await?;
    let token = state
        .jwt
        .issue(&user)
        .map_err(|e| ApiError::internal(format!("Token signing failed: {e}")))?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("User created", IssuedUser { user, token }),
    ))
}

#[tracing::instrument(name = "GET /api/users", skip(state))]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let mut users = state.users.list_users().await?;
    users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(ApiResponse::ok(users))
}
