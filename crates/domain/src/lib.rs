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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod catalog;
mod entry;
mod error;
mod location;
mod matching;
mod requirement;
mod selection;
mod types;
mod validation;
mod validator;

#[cfg(test)]
mod tests;

pub use catalog::{Catalog, NamedSubset, TOP_CHOICES};
pub use entry::SelectionEntry;
pub use error::DomainError;
pub use location::LocationLabel;
pub use matching::{MatchProfile, MatchResult, SharedPreferences, rank_matches, shared_preferences};
pub use requirement::{FlowThresholds, OnboardingFlow, SelectionRequirement};
pub use selection::{Category, PreferenceSelection, SelectionSet};
pub use types::{TravelPlan, UserType, format_travel_date, parse_travel_date};
pub use validation::{
    validate_business_name, validate_email, validate_hometown, validate_name,
    validate_selection, validate_username,
};
pub use validator::{ValidationResult, evaluate, evaluate_for_flow};
