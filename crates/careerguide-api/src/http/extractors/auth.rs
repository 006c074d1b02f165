//! Identity token authentication extractor.
//!
//! Extracts the bearer token from the `Authorization: Bearer <token>`
//! header and verifies its HMAC signature against the shared auth secret.
//! Tokens are issued by the external identity provider; this service only
//! verifies them, it never mints tokens for real users.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use careerguide_types::identity::IdentityClaims;

use crate::http::error::AppError;
use crate::state::AppState;

/// Verified caller identity. Extracting this validates the bearer token.
///
/// Handlers receive the verified claims; `claims.sub` scopes every
/// session query to the caller.
pub struct Identity(pub IdentityClaims);

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(parts)?;

        let claims = state
            .verifier
            .verify(&token)
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        Ok(Identity(claims))
    }
}

/// Extract the bearer token from request headers.
fn extract_bearer_token(parts: &Parts) -> Result<String, AppError> {
    if let Some(auth) = parts.headers.get("authorization") {
        let auth_str = auth.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid Authorization header encoding".to_string())
        })?;
        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    Err(AppError::Unauthorized(
        "Missing identity token. Provide via 'Authorization: Bearer <token>' header.".to_string(),
    ))
}
