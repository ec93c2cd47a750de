//! Bearer-token authentication
//!
//! Tokens are issued by the external identity provider; this extractor only
//! verifies them and mirrors the acting user into the local users table so
//! bookings, ratings and notifications have a row to reference.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::utils::errors::EventlyError;
use crate::AppState;

/// The authenticated user acting on a request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    username: Option<String>,
    #[allow(dead_code)]
    exp: usize,
}

/// Verify a bearer token and extract the user id and username it carries.
fn verify_token(secret: &str, token: &str) -> Result<(i64, Option<String>), EventlyError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| EventlyError::Authentication(format!("Invalid token: {e}")))?;

    let id = data
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| EventlyError::Authentication("Invalid subject claim".to_string()))?;

    Ok((id, data.claims.username))
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = EventlyError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                EventlyError::Authentication("Missing Authorization header".to_string())
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            EventlyError::Authentication("Expected a bearer token".to_string())
        })?;

        let (id, username) = verify_token(&state.settings.auth.jwt_secret, token)?;
        let username = username.unwrap_or_else(|| format!("user-{id}"));

        let user = state.db.users.ensure(id, &username).await?;

        Ok(AuthUser {
            id: user.id,
            username: user.username,
        })
    }
}
