// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, FlowThresholds, LocationLabel, OnboardingFlow, PreferenceSelection,
    SelectionEntry, validate_business_name, validate_email, validate_hometown, validate_name,
    validate_selection, validate_username,
};

#[test]
fn test_validate_username_accepts_valid_names() {
    assert!(validate_username("maria_g").is_ok());
    assert!(validate_username("j.doe-88").is_ok());
    assert!(validate_username("abc").is_ok());
}

#[test]
fn test_validate_username_rejects_bad_lengths() {
    assert!(matches!(
        validate_username("ab"),
        Err(DomainError::InvalidUsername(_))
    ));
    assert!(matches!(
        validate_username(&"a".repeat(31)),
        Err(DomainError::InvalidUsername(_))
    ));
}

#[test]
fn test_validate_username_rejects_bad_characters() {
    let err: DomainError = validate_username("maria g").unwrap_err();
    assert_eq!(
        format!("{err}"),
        "Invalid username: Username contains invalid character ' '"
    );
    assert!(validate_username("señora").is_err());
}

#[test]
fn test_validate_email() {
    assert!(validate_email("traveler@example.com").is_ok());
    assert!(validate_email("a.b+c@mail.example.org").is_ok());

    for bad in [
        "",
        "plain",
        "@example.com",
        "user@",
        "user@localhost",
        "user@.com",
        "user@example.",
        "a@b@c.com",
        "user name@example.com",
    ] {
        assert!(
            matches!(validate_email(bad), Err(DomainError::InvalidEmail(_))),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn test_validate_name() {
    assert!(validate_name("Maria").is_ok());
    assert!(matches!(
        validate_name("   "),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_validate_hometown_requires_only_city() {
    assert!(validate_hometown(&LocationLabel::new("Austin", "", "United States")).is_ok());
    assert!(validate_hometown(&LocationLabel::new("Austin", "Texas", "")).is_ok());
    assert!(validate_hometown(&LocationLabel::new("Singapore", "", "")).is_ok());
    assert!(validate_hometown(&LocationLabel::new("", "Texas", "United States")).is_err());
    assert!(validate_hometown(&LocationLabel::new("  ", "", "")).is_err());
}

#[test]
fn test_validate_business_name() {
    assert!(validate_business_name(Some("Cafe Lua")).is_ok());
    assert!(validate_business_name(Some("  ")).is_err());
    assert!(validate_business_name(None).is_err());
}

#[test]
fn test_validate_selection_reports_shortfall() {
    let mut selection: PreferenceSelection = PreferenceSelection::new();
    selection.interests.insert(SelectionEntry::catalog("Museums"));

    let err: DomainError = validate_selection(
        &selection,
        &FlowThresholds::default(),
        OnboardingFlow::BusinessSignup,
    )
    .unwrap_err();

    assert_eq!(
        err,
        DomainError::SelectionRequirementNotMet {
            flow: OnboardingFlow::BusinessSignup,
            minimum: 3,
            total: 1,
            needed: 2,
        }
    );
}

#[test]
fn test_validate_selection_passes_at_threshold() {
    let mut selection: PreferenceSelection = PreferenceSelection::new();
    selection.interests.insert(SelectionEntry::catalog("Museums"));

    let result = validate_selection(
        &selection,
        &FlowThresholds::default(),
        OnboardingFlow::QuickProfile,
    )
    .unwrap();

    assert!(result.is_valid);
    assert_eq!(result.total, 1);
}
