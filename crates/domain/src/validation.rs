// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::location::LocationLabel;
use crate::requirement::{FlowThresholds, OnboardingFlow, SelectionRequirement};
use crate::selection::PreferenceSelection;
use crate::validator::{ValidationResult, evaluate};

const USERNAME_MIN_LEN: usize = 3;
const USERNAME_MAX_LEN: usize = 30;

/// Validates a username.
///
/// Usernames are 3 to 30 characters of ASCII letters, digits, `_`, `.`
/// or `-`.
///
/// # Errors
///
/// Returns `DomainError::InvalidUsername` describing the first violated rule.
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    let len: usize = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(DomainError::InvalidUsername(format!(
            "Username must be between {USERNAME_MIN_LEN} and {USERNAME_MAX_LEN} characters"
        )));
    }

    if let Some(bad) = username
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')))
    {
        return Err(DomainError::InvalidUsername(format!(
            "Username contains invalid character '{bad}'"
        )));
    }

    Ok(())
}

/// Validates the shape of an email address.
///
/// This is a structural check only: one `@`, a non-empty local part, and a
/// domain containing a dot that neither starts nor ends it.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address is malformed.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let invalid = || DomainError::InvalidEmail(format!("'{email}' is not a valid email address"));

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let dotted: bool = domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.');
    if !dotted {
        return Err(invalid());
    }

    Ok(())
}

/// Validates a display name.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is blank.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates a hometown. Only the city is required.
///
/// # Errors
///
/// Returns `DomainError::InvalidLocation` if the city is blank.
pub fn validate_hometown(hometown: &LocationLabel) -> Result<(), DomainError> {
    if hometown.city.trim().is_empty() {
        return Err(DomainError::InvalidLocation(String::from(
            "Hometown city cannot be empty",
        )));
    }
    Ok(())
}

/// Validates a business name.
///
/// # Errors
///
/// Returns `DomainError::InvalidBusinessName` if the name is missing or blank.
pub fn validate_business_name(business_name: Option<&str>) -> Result<(), DomainError> {
    match business_name.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(()),
        _ => Err(DomainError::InvalidBusinessName(String::from(
            "Business accounts require a business name",
        ))),
    }
}

/// Gates a form submission on the flow's selection requirement.
///
/// # Returns
///
/// The evaluation when the selection meets the requirement.
///
/// # Errors
///
/// Returns `DomainError::SelectionRequirementNotMet` with the shortfall
/// otherwise.
pub fn validate_selection(
    selection: &PreferenceSelection,
    thresholds: &FlowThresholds,
    flow: OnboardingFlow,
) -> Result<ValidationResult, DomainError> {
    let requirement: SelectionRequirement = thresholds.requirement_for(flow);
    let result: ValidationResult = evaluate(selection, requirement.minimum());

    if !result.is_valid {
        return Err(DomainError::SelectionRequirementNotMet {
            flow,
            minimum: requirement.minimum(),
            total: result.total,
            needed: result.needed,
        });
    }

    Ok(result)
}
