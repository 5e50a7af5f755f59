// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-flow minimum selection counts.
//!
//! Each onboarding flow asks for the same four collections but gates
//! submission on its own minimum total. The defaults below are the values
//! the product ships with; deployments may override any of them.

use crate::error::DomainError;
use crate::types::UserType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// The minimum combined number of selected items a form requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionRequirement {
    minimum: usize,
}

impl SelectionRequirement {
    /// Creates a requirement with the given minimum total.
    #[must_use]
    pub const fn new(minimum: usize) -> Self {
        Self { minimum }
    }

    /// Returns the minimum total.
    #[must_use]
    pub const fn minimum(&self) -> usize {
        self.minimum
    }
}

/// A form flow that collects a preference selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingFlow {
    /// Signup as a local resident.
    LocalSignup,
    /// Signup as a traveler with an upcoming trip.
    TravelerSignup,
    /// Signup as a business.
    BusinessSignup,
    /// Planning an additional trip after signup.
    TripPlanning,
    /// Minimal profile completion prompt.
    QuickProfile,
}

impl OnboardingFlow {
    /// All flows.
    pub const ALL: [Self; 5] = [
        Self::LocalSignup,
        Self::TravelerSignup,
        Self::BusinessSignup,
        Self::TripPlanning,
        Self::QuickProfile,
    ];

    /// Converts this flow to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LocalSignup => "local_signup",
            Self::TravelerSignup => "traveler_signup",
            Self::BusinessSignup => "business_signup",
            Self::TripPlanning => "trip_planning",
            Self::QuickProfile => "quick_profile",
        }
    }

    /// The requirement this flow uses when nothing overrides it.
    #[must_use]
    pub const fn default_requirement(&self) -> SelectionRequirement {
        let minimum: usize = match self {
            Self::LocalSignup => 10,
            Self::TravelerSignup => 7,
            Self::BusinessSignup => 3,
            Self::TripPlanning => 2,
            Self::QuickProfile => 1,
        };
        SelectionRequirement::new(minimum)
    }

    /// The signup flow for a user type.
    #[must_use]
    pub const fn signup_for(user_type: UserType) -> Self {
        match user_type {
            UserType::Local => Self::LocalSignup,
            UserType::Traveler => Self::TravelerSignup,
            UserType::Business => Self::BusinessSignup,
        }
    }
}

impl FromStr for OnboardingFlow {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|flow| flow.as_str() == s)
            .ok_or_else(|| DomainError::InvalidFlow(s.to_string()))
    }
}

impl std::fmt::Display for OnboardingFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The effective requirement for every flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowThresholds {
    requirements: BTreeMap<OnboardingFlow, SelectionRequirement>,
}

impl Default for FlowThresholds {
    fn default() -> Self {
        Self {
            requirements: OnboardingFlow::ALL
                .into_iter()
                .map(|flow| (flow, flow.default_requirement()))
                .collect(),
        }
    }
}

impl FlowThresholds {
    /// Replaces the requirement for one flow.
    pub fn set(&mut self, flow: OnboardingFlow, requirement: SelectionRequirement) {
        self.requirements.insert(flow, requirement);
    }

    /// Returns the requirement for a flow.
    #[must_use]
    pub fn requirement_for(&self, flow: OnboardingFlow) -> SelectionRequirement {
        self.requirements
            .get(&flow)
            .copied()
            .unwrap_or_else(|| flow.default_requirement())
    }

    /// Iterates over `(flow, requirement)` pairs in flow order.
    pub fn iter(&self) -> impl Iterator<Item = (OnboardingFlow, SelectionRequirement)> + '_ {
        self.requirements
            .iter()
            .map(|(flow, requirement)| (*flow, *requirement))
    }
}
