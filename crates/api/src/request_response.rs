// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use nearby_traveler_domain::{
    Catalog, Category, LocationLabel, MatchResult, PreferenceSelection, SelectionSet,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The four preference collections as plain strings.
///
/// Forms submit catalog and custom entries alike; the API tags them by
/// catalog lookup when converting to a `PreferenceSelection`. Missing
/// collections are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionPayload {
    /// Selected interests.
    pub interests: Vec<String>,
    /// Selected activities.
    pub activities: Vec<String>,
    /// Selected events.
    pub events: Vec<String>,
    /// Selected languages.
    pub languages: Vec<String>,
}

impl SelectionPayload {
    /// Builds the domain selection, collapsing duplicates and blanks.
    #[must_use]
    pub fn to_selection(&self) -> PreferenceSelection {
        PreferenceSelection {
            interests: Catalog::collect(Category::Interests, &self.interests),
            activities: Catalog::collect(Category::Activities, &self.activities),
            events: Catalog::collect(Category::Events, &self.events),
            languages: Catalog::collect(Category::Languages, &self.languages),
        }
    }
}

impl From<&PreferenceSelection> for SelectionPayload {
    fn from(selection: &PreferenceSelection) -> Self {
        let strings = |set: &SelectionSet| -> Vec<String> { set.texts().map(str::to_string).collect() };
        Self {
            interests: strings(&selection.interests),
            activities: strings(&selection.activities),
            events: strings(&selection.events),
            languages: strings(&selection.languages),
        }
    }
}

/// API request to register a new member.
///
/// This DTO is distinct from domain types and represents the API contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Requested username.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Repeated password. When omitted the password is taken as confirmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm_password: Option<String>,
    /// Display name.
    pub name: String,
    /// `local`, `traveler`, or `business`.
    pub user_type: String,
    /// Where the member lives.
    #[serde(default)]
    pub hometown: LocationLabel,
    /// Trip destination (travelers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<LocationLabel>,
    /// First day of the trip, `YYYY-MM-DD` (travelers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_start_date: Option<String>,
    /// Last day of the trip, `YYYY-MM-DD` (travelers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_end_date: Option<String>,
    /// Business name (businesses).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    /// Free-form bio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Onboarding flow whose threshold applies. Defaults by user type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
    /// Signup draft to discard once registration succeeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_id: Option<String>,
    /// The four preference collections.
    #[serde(flatten)]
    pub selection: SelectionPayload,
}

/// A trip as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelPlanResponse {
    /// Where the trip goes.
    pub destination: LocationLabel,
    /// `"City, State, Country"` label of the destination.
    pub destination_label: String,
    /// First day, `YYYY-MM-DD`.
    pub start_date: String,
    /// Last day, `YYYY-MM-DD`.
    pub end_date: String,
    /// Nights away.
    pub nights: i64,
}

/// A member as returned to clients. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    /// Numeric identifier.
    pub user_id: u64,
    /// Unique username.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// `local`, `traveler`, or `business`.
    pub user_type: String,
    /// Where the member lives.
    pub hometown: LocationLabel,
    /// `"City, State, Country"` label of the hometown.
    pub hometown_label: String,
    /// Upcoming trip, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_plan: Option<TravelPlanResponse>,
    /// Business name, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    /// Free-form bio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// The member's preferences.
    #[serde(flatten)]
    pub selection: SelectionPayload,
    /// Creation time, RFC 3339.
    pub created_at: String,
}

/// API response for a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// The created member.
    pub user: UserResponse,
    /// Bearer token, when the server logs new members in directly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// A success message.
    pub message: String,
}

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token.
    pub token: String,
    /// Token expiry, RFC 3339.
    pub expires_at: String,
    /// The logged-in member.
    pub user: UserResponse,
}

/// API request to evaluate a selection.
///
/// Either a flow or an explicit minimum is required; an explicit minimum
/// wins when both are given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluateSelectionRequest {
    /// Onboarding flow whose threshold applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
    /// Explicit minimum total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<usize>,
    /// The four preference collections.
    #[serde(flatten)]
    pub selection: SelectionPayload,
}

/// API response for a selection evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluateSelectionResponse {
    /// The flow evaluated against, if one was named.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
    /// The minimum that applied.
    pub minimum: usize,
    /// Combined size of the four collections.
    pub total: usize,
    /// Whether the minimum is met.
    pub is_valid: bool,
    /// Items still needed.
    pub needed: usize,
    /// Shortfall message for the form, absent when valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Entries that are not in the catalog, per category.
    pub custom_entries: SelectionPayload,
}

/// A bulk-selectable catalog subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSubsetResponse {
    /// Display name.
    pub name: String,
    /// Category the subset belongs to.
    pub category: String,
    /// Members.
    pub items: Vec<String>,
}

/// API response describing the controlled vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogResponse {
    /// Catalog items per category.
    #[serde(flatten)]
    pub lists: SelectionPayload,
    /// Bulk-selectable subsets.
    pub subsets: Vec<NamedSubsetResponse>,
    /// Minimum total per flow.
    pub thresholds: BTreeMap<String, usize>,
}

/// Fields collected across the steps of a signup.
///
/// Every field is optional; an update overwrites only the fields it sets.
/// Passwords are never kept in a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftFields {
    /// `local`, `traveler`, or `business`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    /// Requested username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Account email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Where the member lives.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hometown: Option<LocationLabel>,
    /// Trip destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<LocationLabel>,
    /// First day of the trip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_start_date: Option<String>,
    /// Last day of the trip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_end_date: Option<String>,
    /// Business name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    /// Free-form bio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Preference collections chosen so far.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionPayload>,
}

/// API request to create or update a signup draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRequest {
    /// The step the form is on. Omitted on create means step 1; omitted on
    /// update keeps the current step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<u8>,
    /// Fields to store.
    #[serde(default)]
    pub fields: DraftFields,
}

/// A signup draft as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftResponse {
    /// Opaque draft identifier.
    pub draft_id: String,
    /// Current step.
    pub step: u8,
    /// Stored fields.
    pub fields: DraftFields,
    /// Last update, RFC 3339.
    pub updated_at: String,
    /// Expiry, RFC 3339.
    pub expires_at: String,
}

/// API response listing ranked matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchesResponse {
    /// The member the matches are for.
    pub username: String,
    /// Candidates, best first.
    pub matches: Vec<MatchResult>,
}
