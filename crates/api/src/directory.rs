// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory member directory.
//!
//! Holds registered members and their bcrypt password hashes. Usernames are
//! unique case-sensitively, emails case-insensitively.

use nearby_traveler_domain::{
    LocationLabel, MatchProfile, PreferenceSelection, TravelPlan, UserType,
};
use time::OffsetDateTime;
use tracing::debug;

use crate::error::{ApiError, AuthError};

/// A registered member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Numeric identifier, assigned in registration order starting at 1.
    pub user_id: u64,
    /// Unique username.
    pub username: String,
    /// Account email as entered.
    pub email: String,
    /// Display name.
    pub name: String,
    /// How the member signed up.
    pub user_type: UserType,
    /// Where the member lives.
    pub hometown: LocationLabel,
    /// Upcoming trip.
    pub travel_plan: Option<TravelPlan>,
    /// Business name for business accounts.
    pub business_name: Option<String>,
    /// Free-form bio.
    pub bio: Option<String>,
    /// Chosen preferences.
    pub selection: PreferenceSelection,
    /// Registration time.
    pub created_at: OffsetDateTime,
}

impl UserProfile {
    /// The view of this member used for matching.
    #[must_use]
    pub fn match_profile(&self) -> MatchProfile<'_> {
        MatchProfile {
            username: &self.username,
            selection: &self.selection,
            hometown: &self.hometown,
            destination: self.travel_plan.as_ref().map(TravelPlan::destination),
        }
    }
}

/// A validated member ready to be stored, minus its identifier.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique username.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// How the member signed up.
    pub user_type: UserType,
    /// Where the member lives.
    pub hometown: LocationLabel,
    /// Upcoming trip.
    pub travel_plan: Option<TravelPlan>,
    /// Business name.
    pub business_name: Option<String>,
    /// Free-form bio.
    pub bio: Option<String>,
    /// Chosen preferences.
    pub selection: PreferenceSelection,
}

#[derive(Debug, Clone)]
struct StoredUser {
    profile: UserProfile,
    password_hash: String,
}

/// Registered members.
#[derive(Debug)]
pub struct UserDirectory {
    users: Vec<StoredUser>,
    next_user_id: u64,
    bcrypt_cost: u32,
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl UserDirectory {
    /// Creates an empty directory hashing passwords at the given bcrypt cost.
    #[must_use]
    pub const fn new(bcrypt_cost: u32) -> Self {
        Self {
            users: Vec::new(),
            next_user_id: 1,
            bcrypt_cost,
        }
    }

    /// Number of registered members.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns whether nobody has registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Iterates over members in registration order.
    pub fn profiles(&self) -> impl Iterator<Item = &UserProfile> {
        self.users.iter().map(|user| &user.profile)
    }

    /// Finds a member by username.
    #[must_use]
    pub fn find_by_username(&self, username: &str) -> Option<&UserProfile> {
        self.profiles().find(|profile| profile.username == username)
    }

    /// Finds a member by identifier.
    #[must_use]
    pub fn find_by_id(&self, user_id: u64) -> Option<&UserProfile> {
        self.profiles().find(|profile| profile.user_id == user_id)
    }

    /// Returns whether an email is registered, ignoring case.
    #[must_use]
    pub fn email_taken(&self, email: &str) -> bool {
        self.profiles()
            .any(|profile| profile.email.eq_ignore_ascii_case(email))
    }

    /// Stores a new member.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Conflict` if the username or email is taken, or
    /// `ApiError::Internal` if hashing fails.
    pub fn insert(&mut self, new_user: NewUser, password: &str) -> Result<UserProfile, ApiError> {
        if self.find_by_username(&new_user.username).is_some() {
            return Err(ApiError::Conflict {
                field: String::from("username"),
                message: format!("Username '{}' is already taken", new_user.username),
            });
        }
        if self.email_taken(&new_user.email) {
            return Err(ApiError::Conflict {
                field: String::from("email"),
                message: String::from("An account with this email already exists"),
            });
        }

        let password_hash: String =
            bcrypt::hash(password, self.bcrypt_cost).map_err(|e| ApiError::Internal {
                message: format!("Failed to hash password: {e}"),
            })?;

        let profile: UserProfile = UserProfile {
            user_id: self.next_user_id,
            username: new_user.username,
            email: new_user.email,
            name: new_user.name,
            user_type: new_user.user_type,
            hometown: new_user.hometown,
            travel_plan: new_user.travel_plan,
            business_name: new_user.business_name,
            bio: new_user.bio,
            selection: new_user.selection,
            created_at: OffsetDateTime::now_utc(),
        };
        self.next_user_id += 1;

        debug!(user_id = profile.user_id, username = %profile.username, "Stored user");
        self.users.push(StoredUser {
            profile: profile.clone(),
            password_hash,
        });

        Ok(profile)
    }

    /// Checks a username/password pair.
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the credentials are wrong.
    pub fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<&UserProfile, AuthError> {
        let invalid = || AuthError::AuthenticationFailed {
            reason: String::from("Invalid username or password"),
        };

        let stored: &StoredUser = self
            .users
            .iter()
            .find(|user| user.profile.username == username)
            .ok_or_else(invalid)?;

        match bcrypt::verify(password, &stored.password_hash) {
            Ok(true) => Ok(&stored.profile),
            Ok(false) => Err(invalid()),
            Err(e) => Err(AuthError::AuthenticationFailed {
                reason: format!("Failed to verify password: {e}"),
            }),
        }
    }
}
