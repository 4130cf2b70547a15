//! Bearer-token authentication. Tokens are HS256 JWTs whose `sub` names a user id.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ApiError;
use super::state::AppState;
use crate::domain::{Role, User};

const NO_TOKEN: &str = "No token, authorization denied";
const INVALID_TOKEN: &str = "Token is not valid";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// The authenticated account, attached to the request by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Checks signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        Ok(decode::<Claims>(token, &self.decoding, &validation)?.claims)
    }
}

fn bearer_token(request: &Request) -> Option<&str> {
    let value = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    (!token.is_empty()).then_some(token)
}

/// Resolves the bearer token to a user and stores it as an [`AuthUser`] extension.
///
/// The role is read from the stored user, not from the token, so a demoted
/// account loses admin rights on its next request.
pub async fn require_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Result<Response, ApiError> {
    let token = bearer_token(&request).ok_or_else(|| ApiError::unauthorized(NO_TOKEN))?;
    let claims = state.jwt.verify(token).map_err(|e| {
        debug!(error = %e, "Token rejected");
        ApiError::unauthorized(INVALID_TOKEN)
    })?;

    let user = state
        .users
        .get_user(claims.sub)
        .await?
        .ok_or_else(|| ApiError::unauthorized(INVALID_TOKEN))?;

    request.extensions_mut().insert(AuthUser(user));
    Ok(next.run(request).await)
}

/// Must be layered inside [`require_auth`].
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized(NO_TOKEN))?;
    if !user.0.is_admin() {
        return Err(ApiError::forbidden("Admin access required"));
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "user_1".into(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            role: Role::User,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let keys = JwtKeys::new("secret", 1);
        let token = keys.issue(&user()).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, "user_1");
        assert_eq!(claims.role, Role::User);
    }

    #[test]
    fn test_wrong_secret_and_expired_rejected() {
        let token = JwtKeys::new("secret", 1).issue(&user()).unwrap();
        assert!(JwtKeys::new("other", 1).verify(&token).is_err());

        let expired = JwtKeys::new("secret", -2).issue(&user()).unwrap();
        assert!(JwtKeys::new("secret", 1).verify(&expired).is_err());
    }
}
