// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use nearby_traveler_domain::{DomainError, OnboardingFlow};
use time::macros::date;

use crate::{ApiError, AuthError, PasswordPolicyError, translate_domain_error};

#[test]
fn test_field_errors_translate_to_invalid_input() {
    let cases: Vec<(DomainError, &str)> = vec![
        (DomainError::InvalidUsername(String::from("too short")), "username"),
        (DomainError::InvalidEmail(String::from("missing @")), "email"),
        (DomainError::InvalidName(String::from("empty")), "name"),
        (DomainError::InvalidLocation(String::from("city")), "location"),
        (DomainError::InvalidBusinessName(String::from("empty")), "business_name"),
        (DomainError::InvalidUserType(String::from("tourist")), "user_type"),
        (DomainError::InvalidCategory(String::from("food")), "category"),
        (DomainError::InvalidFlow(String::from("checkout")), "flow"),
        (
            DomainError::InvalidTravelDate {
                date_string: String::from("June 1"),
                error: String::from("bad format"),
            },
            "travel_dates",
        ),
    ];

    for (err, expected_field) in cases {
        let message: String = err.to_string();
        let api_err: ApiError = translate_domain_error(err);
        assert_eq!(
            api_err,
            ApiError::InvalidInput {
                field: expected_field.to_string(),
                message,
            }
        );
    }
}

#[test]
fn test_rule_errors_translate_to_domain_rule_violation() {
    let reversed: ApiError = translate_domain_error(DomainError::InvalidTravelDates {
        start_date: date!(2026 - 06 - 10),
        end_date: date!(2026 - 06 - 01),
    });
    assert!(matches!(
        reversed,
        ApiError::DomainRuleViolation { rule, .. } if rule == "trip_dates_ordered"
    ));

    let missing: ApiError = translate_domain_error(DomainError::MissingTravelPlan);
    assert!(matches!(
        missing,
        ApiError::DomainRuleViolation { rule, .. } if rule == "traveler_requires_trip"
    ));
}

#[test]
fn test_selection_shortfall_keeps_counts() {
    let err: ApiError = translate_domain_error(DomainError::SelectionRequirementNotMet {
        flow: OnboardingFlow::TravelerSignup,
        minimum: 7,
        total: 6,
        needed: 1,
    });

    assert_eq!(
        err,
        ApiError::SelectionRequirementNotMet {
            flow: String::from("traveler_signup"),
            minimum: 7,
            total: 6,
            needed: 1,
        }
    );
    assert_eq!(err.to_string(), "Please select 1 more item");
}

#[test]
fn test_shortfall_message_is_plural_above_one() {
    let err: ApiError = ApiError::SelectionRequirementNotMet {
        flow: String::from("local_signup"),
        minimum: 10,
        total: 3,
        needed: 7,
    };

    assert_eq!(err.to_string(), "Please select 7 more items");
}

#[test]
fn test_auth_and_password_errors_convert() {
    let auth: ApiError = ApiError::from(AuthError::AuthenticationFailed {
        reason: String::from("Session expired"),
    });
    assert_eq!(auth.to_string(), "Authentication failed: Session expired");

    let policy: ApiError = ApiError::from(PasswordPolicyError::ConfirmationMismatch);
    assert!(matches!(policy, ApiError::PasswordPolicyViolation { .. }));
}

#[test]
fn test_error_display_formats() {
    let not_found: ApiError = ApiError::ResourceNotFound {
        resource_type: String::from("Signup draft"),
        message: String::from("Draft 'draft_1' does not exist or has expired"),
    };
    assert_eq!(
        not_found.to_string(),
        "Signup draft not found: Draft 'draft_1' does not exist or has expired"
    );

    let conflict: ApiError = ApiError::Conflict {
        field: String::from("username"),
        message: String::from("Username 'maria_g' is already taken"),
    };
    assert_eq!(
        conflict.to_string(),
        "Conflict on field 'username': Username 'maria_g' is already taken"
    );
}
