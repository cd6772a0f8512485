//! Admin gate: HTTP Basic credential check against the configured password.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::ApiError;
use crate::state::AppState;

/// The only user name accepted by the admin gate.
pub const ADMIN_USER: &str = "admin";

const DENIED: &str = "You do not have the right permission";

/// Credentials decoded from an `Authorization: Basic` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Decode the value of an `Authorization` header using the Basic scheme.
///
/// Returns `None` for other schemes, invalid base64, non-UTF-8 payloads, or
/// payloads without a `:` separator.
pub fn parse_basic(header_value: &str) -> Option<BasicCredentials> {
    let (scheme, encoded) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Compare two secrets without short-circuiting on the first mismatch.
fn secrets_match(given: &str, expected: &str) -> bool {
    let (given, expected) = (given.as_bytes(), expected.as_bytes());
    given.len() == expected.len()
        && given
            .iter()
            .zip(expected)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

/// Proof that the request carried valid admin credentials.
#[derive(Debug, Clone, Copy)]
pub struct Admin;

impl FromRequestParts<AppState> for Admin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credentials = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_basic);

        let Some(credentials) = credentials else {
            tracing::warn!("Admin access without Basic credentials");
            return Err(ApiError::Unauthorized(DENIED.to_string()));
        };

        let password_ok = secrets_match(&credentials.password, &state.config().admin_password);
        if credentials.username != ADMIN_USER || !password_ok {
            tracing::warn!(username = %credentials.username, "Admin access denied");
            return Err(ApiError::Unauthorized(DENIED.to_string()));
        }

        Ok(Admin)
    }
}
