// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use nearby_traveler_domain::{FlowThresholds, OnboardingFlow, SelectionRequirement};

use crate::tests::helpers::create_full_selection;
use crate::{
    ApiError, CatalogResponse, EvaluateSelectionRequest, EvaluateSelectionResponse,
    SelectionPayload, evaluate_selection, get_catalog,
};

fn short_selection() -> SelectionPayload {
    SelectionPayload {
        interests: vec![String::from("Coffee Culture"), String::from("Museums")],
        languages: vec![String::from("English")],
        ..SelectionPayload::default()
    }
}

#[test]
fn test_evaluate_for_flow_reports_shortfall() {
    let request: EvaluateSelectionRequest = EvaluateSelectionRequest {
        flow: Some(String::from("local_signup")),
        minimum: None,
        selection: short_selection(),
    };

    let response: EvaluateSelectionResponse =
        evaluate_selection(&FlowThresholds::default(), &request).unwrap();

    assert_eq!(response.flow.as_deref(), Some("local_signup"));
    assert_eq!(response.minimum, 10);
    assert_eq!(response.total, 3);
    assert!(!response.is_valid);
    assert_eq!(response.needed, 7);
    assert_eq!(
        response.message.as_deref(),
        Some("Please select 7 more items")
    );
}

#[test]
fn test_evaluate_full_selection_is_valid() {
    let request: EvaluateSelectionRequest = EvaluateSelectionRequest {
        flow: Some(String::from("local_signup")),
        minimum: None,
        selection: create_full_selection(),
    };

    let response: EvaluateSelectionResponse =
        evaluate_selection(&FlowThresholds::default(), &request).unwrap();

    assert_eq!(response.total, 10);
    assert!(response.is_valid);
    assert_eq!(response.needed, 0);
    assert_eq!(response.message, None);
}

#[test]
fn test_explicit_minimum_wins_over_flow() {
    let request: EvaluateSelectionRequest = EvaluateSelectionRequest {
        flow: Some(String::from("local_signup")),
        minimum: Some(2),
        selection: short_selection(),
    };

    let response: EvaluateSelectionResponse =
        evaluate_selection(&FlowThresholds::default(), &request).unwrap();

    assert_eq!(response.minimum, 2);
    assert!(response.is_valid);
}

#[test]
fn test_zero_minimum_with_empty_selection_is_valid() {
    let request: EvaluateSelectionRequest = EvaluateSelectionRequest {
        flow: None,
        minimum: Some(0),
        selection: SelectionPayload::default(),
    };

    let response: EvaluateSelectionResponse =
        evaluate_selection(&FlowThresholds::default(), &request).unwrap();

    assert_eq!(response.total, 0);
    assert!(response.is_valid);
    assert_eq!(response.needed, 0);
}

#[test]
fn test_evaluate_requires_flow_or_minimum() {
    let request: EvaluateSelectionRequest = EvaluateSelectionRequest::default();

    let err: ApiError = evaluate_selection(&FlowThresholds::default(), &request).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { field, .. } if field == "minimum"));
}

#[test]
fn test_evaluate_rejects_unknown_flow() {
    let request: EvaluateSelectionRequest = EvaluateSelectionRequest {
        flow: Some(String::from("checkout")),
        ..EvaluateSelectionRequest::default()
    };

    let err: ApiError = evaluate_selection(&FlowThresholds::default(), &request).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { field, .. } if field == "flow"));
}

#[test]
fn test_evaluate_uses_configured_thresholds() {
    let mut thresholds: FlowThresholds = FlowThresholds::default();
    thresholds.set(OnboardingFlow::LocalSignup, SelectionRequirement::new(3));
    let request: EvaluateSelectionRequest = EvaluateSelectionRequest {
        flow: Some(String::from("local_signup")),
        minimum: None,
        selection: short_selection(),
    };

    let response: EvaluateSelectionResponse = evaluate_selection(&thresholds, &request).unwrap();

    assert_eq!(response.minimum, 3);
    assert!(response.is_valid);
}

#[test]
fn test_evaluate_lists_custom_entries_and_collapses_duplicates() {
    let request: EvaluateSelectionRequest = EvaluateSelectionRequest {
        flow: None,
        minimum: Some(1),
        selection: SelectionPayload {
            interests: vec![
                String::from("Coffee Culture"),
                String::from("Rock Climbing"),
                String::from("  Rock Climbing "),
                String::from("Coffee Culture"),
                String::from("   "),
            ],
            ..SelectionPayload::default()
        },
    };

    let response: EvaluateSelectionResponse =
        evaluate_selection(&FlowThresholds::default(), &request).unwrap();

    assert_eq!(response.total, 2);
    assert_eq!(
        response.custom_entries.interests,
        vec![String::from("Rock Climbing")]
    );
    assert!(response.custom_entries.activities.is_empty());
}

#[test]
fn test_evaluate_request_missing_collections_default_to_empty() {
    let request: EvaluateSelectionRequest =
        serde_json::from_str(r#"{"minimum": 1, "languages": ["English"]}"#).unwrap();

    let response: EvaluateSelectionResponse =
        evaluate_selection(&FlowThresholds::default(), &request).unwrap();

    assert_eq!(response.total, 1);
    assert!(response.is_valid);
}

#[test]
fn test_catalog_lists_subsets_and_thresholds() {
    let catalog: CatalogResponse = get_catalog(&FlowThresholds::default());

    assert!(catalog.lists.interests.contains(&String::from("Coffee Culture")));
    assert!(catalog.lists.languages.contains(&String::from("English")));
    assert!(!catalog.lists.interests.contains(&String::from("Rock Climbing")));

    let names: Vec<&str> = catalog
        .subsets
        .iter()
        .map(|subset| subset.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Top Choices", "All Activities", "All Events", "All Languages"]
    );
    assert_eq!(catalog.subsets[0].category, "interests");
    assert_eq!(catalog.subsets[0].items.len(), 10);

    assert_eq!(catalog.thresholds.get("local_signup"), Some(&10));
    assert_eq!(catalog.thresholds.get("traveler_signup"), Some(&7));
    assert_eq!(catalog.thresholds.get("business_signup"), Some(&3));
    assert_eq!(catalog.thresholds.get("trip_planning"), Some(&2));
    assert_eq!(catalog.thresholds.get("quick_profile"), Some(&1));
}
