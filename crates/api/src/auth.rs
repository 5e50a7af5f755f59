// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bearer sessions and credential checks.

use std::collections::HashMap;
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::directory::{UserDirectory, UserProfile};
use crate::error::AuthError;

/// A member whose bearer token was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The member's identifier.
    pub user_id: u64,
    /// The member's username.
    pub username: String,
}

/// A live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    /// The member the session belongs to.
    pub user_id: u64,
    /// When the session was created.
    pub created_at: OffsetDateTime,
    /// When the session stops being accepted.
    pub expires_at: OffsetDateTime,
    /// Last time the token was presented.
    pub last_activity_at: OffsetDateTime,
}

/// Issued bearer tokens.
#[derive(Debug)]
pub struct SessionService {
    sessions: HashMap<String, SessionData>,
    ttl: Duration,
}

impl Default for SessionService {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SESSION_TTL)
    }
}

impl SessionService {
    /// Default session lifetime.
    pub const DEFAULT_SESSION_TTL: Duration = Duration::days(7);

    /// Creates an empty service issuing sessions with the given lifetime.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            ttl,
        }
    }

    /// Number of stored sessions, expired ones included until touched.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns whether no sessions are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Opens a session for a member and returns the token with its data.
    pub fn create(&mut self, user_id: u64) -> (String, SessionData) {
        self.create_at(user_id, OffsetDateTime::now_utc())
    }

    /// Opens a session as of `now`.
    pub fn create_at(&mut self, user_id: u64, now: OffsetDateTime) -> (String, SessionData) {
        let token: String = Self::generate_session_token(now);
        let session: SessionData = SessionData {
            user_id,
            created_at: now,
            expires_at: now + self.ttl,
            last_activity_at: now,
        };
        self.sessions.insert(token.clone(), session.clone());
        debug!(user_id, "Created session");
        (token, session)
    }

    /// Looks up a token and records activity.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is unknown or expired. Expired
    /// sessions are removed.
    pub fn validate(&mut self, token: &str) -> Result<SessionData, AuthError> {
        self.validate_at(token, OffsetDateTime::now_utc())
    }

    /// Looks up a token as of `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is unknown or expired.
    pub fn validate_at(
        &mut self,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<SessionData, AuthError> {
        let session: &mut SessionData =
            self.sessions
                .get_mut(token)
                .ok_or_else(|| AuthError::AuthenticationFailed {
                    reason: String::from("Invalid session token"),
                })?;

        if now > session.expires_at {
            self.sessions.remove(token);
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        session.last_activity_at = now;
        Ok(session.clone())
    }

    /// Deletes a session. Unknown tokens are ignored.
    pub fn revoke(&mut self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Drops every expired session and returns how many were removed.
    pub fn purge_expired(&mut self, now: OffsetDateTime) -> usize {
        let before: usize = self.sessions.len();
        self.sessions.retain(|_, session| session.expires_at >= now);
        before - self.sessions.len()
    }

    fn generate_session_token(now: OffsetDateTime) -> String {
        format!(
            "session_{}_{:016x}",
            now.unix_timestamp_nanos(),
            rand::random::<u64>()
        )
    }
}

/// Ties sessions to directory members.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Checks credentials and opens a session.
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `session`, `profile`)
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are wrong.
    pub fn login<'a>(
        directory: &'a UserDirectory,
        sessions: &mut SessionService,
        username: &str,
        password: &str,
    ) -> Result<(String, SessionData, &'a UserProfile), AuthError> {
        let profile: &UserProfile = directory.verify_credentials(username, password)?;
        let (token, session) = sessions.create(profile.user_id);
        Ok((token, session, profile))
    }

    /// Resolves a bearer token to its member.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or expired, or the member
    /// no longer exists.
    pub fn validate_session(
        directory: &UserDirectory,
        sessions: &mut SessionService,
        token: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        let session: SessionData = sessions.validate(token)?;
        let profile: &UserProfile =
            directory
                .find_by_id(session.user_id)
                .ok_or_else(|| AuthError::AuthenticationFailed {
                    reason: String::from("User not found"),
                })?;

        Ok(AuthenticatedUser {
            user_id: profile.user_id,
            username: profile.username.clone(),
        })
    }
}
