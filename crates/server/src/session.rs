// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bearer session extraction for the server.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use nearby_traveler_api::{AuthenticatedUser, AuthenticationService};
use tracing::{debug, warn};

use crate::{AppState, HttpError};

/// Extractor for logged-in members.
///
/// Reads `Authorization: Bearer <token>`, validates the session (which
/// also records activity), and yields the member together with the raw
/// token so logout can revoke it.
///
/// # Errors
///
/// Rejects with HTTP 401 if the header is missing or malformed, or the
/// session is unknown or expired.
pub struct SessionUser(pub AuthenticatedUser, pub String);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header: &str = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let token: &str = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                warn!("Authorization header is not a bearer token");
                SessionError::InvalidAuthorizationHeader
            })?;

        let directory = state.directory.lock().await;
        let mut sessions = state.sessions.lock().await;
        let user: AuthenticatedUser =
            AuthenticationService::validate_session(&directory, &mut sessions, token).map_err(
                |e| {
                    warn!(error = %e, "Session validation failed");
                    SessionError::InvalidSession(e.to_string())
                },
            )?;

        debug!(username = %user.username, "Session validated");
        Ok(Self(user, token.to_string()))
    }
}

/// Reasons a request carries no usable session.
#[derive(Debug)]
pub enum SessionError {
    /// No `Authorization` header.
    MissingAuthorizationHeader,
    /// The header is not `Bearer <token>`.
    InvalidAuthorizationHeader,
    /// The token is unknown or expired.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingAuthorizationHeader => String::from("Missing Authorization header"),
            Self::InvalidAuthorizationHeader => String::from(
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => reason,
        };

        HttpError {
            status: StatusCode::UNAUTHORIZED,
            message,
            needed: None,
        }
        .into_response()
    }
}
