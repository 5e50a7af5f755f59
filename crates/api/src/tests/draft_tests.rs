// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use nearby_traveler_domain::LocationLabel;
use time::{Duration, OffsetDateTime};

use crate::{
    ApiError, DraftFields, DraftRequest, DraftResponse, SelectionPayload, SignupDrafts,
    clear_draft, create_draft, get_draft, update_draft,
};

fn first_step() -> DraftRequest {
    DraftRequest {
        step: None,
        fields: DraftFields {
            user_type: Some(String::from("traveler")),
            username: Some(String::from("nomad_jo")),
            email: Some(String::from("jo@example.com")),
            ..DraftFields::default()
        },
    }
}

#[test]
fn test_draft_create_read_update_clear() {
    let mut drafts: SignupDrafts = SignupDrafts::default();
    let now: OffsetDateTime = OffsetDateTime::now_utc();

    let created: DraftResponse = create_draft(&mut drafts, first_step(), now).unwrap();
    assert_eq!(created.step, 1);
    assert_eq!(created.fields.username.as_deref(), Some("nomad_jo"));

    let read: DraftResponse = get_draft(&mut drafts, &created.draft_id, now).unwrap();
    assert_eq!(read, created);

    let second_step: DraftRequest = DraftRequest {
        step: Some(2),
        fields: DraftFields {
            hometown: Some(LocationLabel::new("Austin", "Texas", "United States")),
            selection: Some(SelectionPayload {
                interests: vec![String::from("Museums")],
                ..SelectionPayload::default()
            }),
            ..DraftFields::default()
        },
    };
    let later: OffsetDateTime = now + Duration::minutes(5);
    let updated: DraftResponse =
        update_draft(&mut drafts, &created.draft_id, second_step, later).unwrap();

    assert_eq!(updated.step, 2);
    // Earlier fields survive the merge.
    assert_eq!(updated.fields.username.as_deref(), Some("nomad_jo"));
    assert_eq!(updated.fields.user_type.as_deref(), Some("traveler"));
    assert!(updated.fields.hometown.is_some());
    assert_ne!(updated.expires_at, created.expires_at);

    clear_draft(&mut drafts, &created.draft_id).unwrap();
    assert!(matches!(
        get_draft(&mut drafts, &created.draft_id, later),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        clear_draft(&mut drafts, &created.draft_id),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_update_overwrites_only_provided_fields() {
    let mut drafts: SignupDrafts = SignupDrafts::default();
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let created: DraftResponse = create_draft(&mut drafts, first_step(), now).unwrap();

    let rename: DraftRequest = DraftRequest {
        step: None,
        fields: DraftFields {
            username: Some(String::from("nomad_jo2")),
            ..DraftFields::default()
        },
    };
    let updated: DraftResponse = update_draft(&mut drafts, &created.draft_id, rename, now).unwrap();

    assert_eq!(updated.step, 1);
    assert_eq!(updated.fields.username.as_deref(), Some("nomad_jo2"));
    assert_eq!(updated.fields.email.as_deref(), Some("jo@example.com"));
}

#[test]
fn test_expired_draft_is_not_found() {
    let mut drafts: SignupDrafts = SignupDrafts::new(Duration::hours(1));
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let created: DraftResponse = create_draft(&mut drafts, first_step(), now).unwrap();

    let err: ApiError =
        get_draft(&mut drafts, &created.draft_id, now + Duration::hours(2)).unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
    assert!(drafts.is_empty());
}

#[test]
fn test_draft_rejects_malformed_fields() {
    let mut drafts: SignupDrafts = SignupDrafts::default();
    let now: OffsetDateTime = OffsetDateTime::now_utc();

    let bad_type: DraftRequest = DraftRequest {
        step: None,
        fields: DraftFields {
            user_type: Some(String::from("tourist")),
            ..DraftFields::default()
        },
    };
    assert!(matches!(
        create_draft(&mut drafts, bad_type, now),
        Err(ApiError::InvalidInput { .. })
    ));

    let bad_email: DraftRequest = DraftRequest {
        step: None,
        fields: DraftFields {
            email: Some(String::from("nope")),
            ..DraftFields::default()
        },
    };
    assert!(matches!(
        create_draft(&mut drafts, bad_email, now),
        Err(ApiError::InvalidInput { .. })
    ));
    assert!(drafts.is_empty());
}

#[test]
fn test_step_zero_is_clamped_to_one() {
    let mut drafts: SignupDrafts = SignupDrafts::default();
    let request: DraftRequest = DraftRequest {
        step: Some(0),
        fields: DraftFields::default(),
    };

    let created: DraftResponse =
        create_draft(&mut drafts, request, OffsetDateTime::now_utc()).unwrap();

    assert_eq!(created.step, 1);
}

#[test]
fn test_purge_expired_drafts() {
    let mut drafts: SignupDrafts = SignupDrafts::new(Duration::minutes(30));
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    create_draft(&mut drafts, first_step(), now).unwrap();
    create_draft(&mut drafts, first_step(), now + Duration::hours(1)).unwrap();

    let purged: usize = drafts.purge_expired(now + Duration::minutes(45));

    assert_eq!(purged, 1);
    assert_eq!(drafts.len(), 1);
}
