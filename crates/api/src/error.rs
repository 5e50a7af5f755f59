// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::password_policy::PasswordPolicyError;
use nearby_traveler_domain::DomainError;

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The submitted selection is below the flow's minimum.
    SelectionRequirementNotMet {
        /// The flow whose requirement applied.
        flow: String,
        /// The required minimum total.
        minimum: usize,
        /// The selected total.
        total: usize,
        /// Items still needed.
        needed: usize,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A unique field is already taken.
    Conflict {
        /// The field that collided.
        field: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::SelectionRequirementNotMet { needed, .. } => {
                if *needed == 1 {
                    write!(f, "Please select 1 more item")
                } else {
                    write!(f, "Please select {needed} more items")
                }
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Conflict { field, message } => {
                write!(f, "Conflict on field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let invalid = |field: &str, err: &DomainError| ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    };

    match err {
        DomainError::InvalidUsername(_) => invalid("username", &err),
        DomainError::InvalidEmail(_) => invalid("email", &err),
        DomainError::InvalidName(_) => invalid("name", &err),
        DomainError::InvalidLocation(_) => invalid("location", &err),
        DomainError::InvalidBusinessName(_) => invalid("business_name", &err),
        DomainError::InvalidUserType(_) => invalid("user_type", &err),
        DomainError::InvalidCategory(_) => invalid("category", &err),
        DomainError::InvalidFlow(_) => invalid("flow", &err),
        DomainError::InvalidTravelDate { .. } => invalid("travel_dates", &err),
        DomainError::InvalidTravelDates { .. } => ApiError::DomainRuleViolation {
            rule: String::from("trip_dates_ordered"),
            message: err.to_string(),
        },
        DomainError::MissingTravelPlan => ApiError::DomainRuleViolation {
            rule: String::from("traveler_requires_trip"),
            message: err.to_string(),
        },
        DomainError::SelectionRequirementNotMet {
            flow,
            minimum,
            total,
            needed,
        } => ApiError::SelectionRequirementNotMet {
            flow: flow.to_string(),
            minimum,
            total,
            needed,
        },
    }
}
