//! Login handler.
//!
//! Endpoint:
//! - POST /auth/login - Exchange a username for a bearer token

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde::Deserialize;

use chatdesk_types::error::SessionError;
use chatdesk_types::identity::LoginGrant;

use crate::http::error::AppError;
use crate::http::handlers::parse_body;
use crate::state::AppState;

/// Request body for login. The password is accepted and ignored.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// POST /auth/login - Issue an unsigned token for `username`.
///
/// Any body that does not carry a usable username (absent, unparsable, or
/// mistyped) is a validation error.
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LoginGrant>, AppError> {
    let req: LoginRequest = parse_body(&body)
        .map_err(|e| SessionError::InvalidInput(format!("invalid request body: {e}")))?;

    let grant = state
        .orchestrator
        .login(&req.username, req.password.as_deref())?;
    Ok(Json(grant))
}
