// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::requirement::OnboardingFlow;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Username is empty, too long, or contains forbidden characters.
    InvalidUsername(String),
    /// Email address is malformed.
    InvalidEmail(String),
    /// Display name is empty or invalid.
    InvalidName(String),
    /// A location is missing a required part.
    InvalidLocation(String),
    /// Business name is missing for a business signup.
    InvalidBusinessName(String),
    /// User type is not one of local, traveler, business.
    InvalidUserType(String),
    /// Unknown preference category.
    InvalidCategory(String),
    /// Unknown onboarding flow.
    InvalidFlow(String),
    /// Failed to parse a travel date.
    InvalidTravelDate {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A trip ends before it starts.
    InvalidTravelDates {
        /// The first day of the trip.
        start_date: time::Date,
        /// The last day of the trip.
        end_date: time::Date,
    },
    /// Travelers must describe their trip.
    MissingTravelPlan,
    /// The selection does not meet the flow's minimum.
    SelectionRequirementNotMet {
        /// The flow whose requirement was checked.
        flow: OnboardingFlow,
        /// The required minimum total.
        minimum: usize,
        /// The selected total.
        total: usize,
        /// Items still needed.
        needed: usize,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUsername(msg) => write!(f, "Invalid username: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidLocation(msg) => write!(f, "Invalid location: {msg}"),
            Self::InvalidBusinessName(msg) => write!(f, "Invalid business name: {msg}"),
            Self::InvalidUserType(value) => {
                write!(
                    f,
                    "Invalid user type: '{value}'. Must be 'local', 'traveler', or 'business'"
                )
            }
            Self::InvalidCategory(value) => write!(f, "Unknown category: '{value}'"),
            Self::InvalidFlow(value) => write!(f, "Unknown onboarding flow: '{value}'"),
            Self::InvalidTravelDate { date_string, error } => {
                write!(f, "Failed to parse travel date '{date_string}': {error}")
            }
            Self::InvalidTravelDates {
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "Trip end date {end_date} is before start date {start_date}"
                )
            }
            Self::MissingTravelPlan => {
                write!(f, "Travelers must provide a destination and travel dates")
            }
            Self::SelectionRequirementNotMet {
                flow,
                minimum,
                total,
                needed,
            } => {
                write!(
                    f,
                    "The {flow} flow requires at least {minimum} selections ({total} selected). Please select {needed} more"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
