// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod directory;
mod drafts;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedUser, AuthenticationService, SessionData, SessionService};
pub use directory::{NewUser, UserDirectory, UserProfile};
pub use drafts::{SignupDraft, SignupDrafts};
pub use error::{ApiError, AuthError, translate_domain_error};
pub use handlers::{
    clear_draft, create_draft, current_user, evaluate_selection, find_matches, get_catalog,
    get_draft, login, logout, register_user, update_draft, user_to_response,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    CatalogResponse, DraftFields, DraftRequest, DraftResponse, EvaluateSelectionRequest,
    EvaluateSelectionResponse, LoginRequest, LoginResponse, MatchesResponse,
    NamedSubsetResponse, RegisterRequest, RegisterResponse, SelectionPayload,
    TravelPlanResponse, UserResponse,
};
