//! Bearer identity extractors.
//!
//! Identity travels as `Authorization: Bearer <token>`. An absent header, a
//! header that is not valid ASCII or not a bearer scheme, and a token that
//! does not resolve are all treated the same: unauthenticated.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use chatdesk_types::identity::OwnerId;

use crate::http::error::AppError;
use crate::state::AppState;

/// Authenticated caller. Extracting this rejects with 401 when the bearer
/// token is missing or unresolvable.
pub struct Caller(pub OwnerId);

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts);
        let owner = state.orchestrator.authenticate(token.as_deref())?;
        Ok(Caller(owner))
    }
}

/// Raw bearer token, if any. Never rejects; used where the identity check
/// must run inside a larger protocol.
pub struct BearerToken(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(BearerToken(bearer_token(parts)))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(parts: &Parts) -> Option<String> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}
