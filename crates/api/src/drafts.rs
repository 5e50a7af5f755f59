// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Server-held carryover for multi-step signups.
//!
//! A draft is created when the first step is submitted, merged on every
//! following step, and cleared once registration succeeds or the member
//! abandons the flow. Drafts past their expiry behave as if they never
//! existed.

use std::collections::HashMap;
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::request_response::DraftFields;

/// An in-progress signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDraft {
    /// Opaque identifier handed to the client.
    pub draft_id: String,
    /// The step the member is on, starting at 1.
    pub step: u8,
    /// Fields collected so far.
    pub fields: DraftFields,
    /// When the draft was opened.
    pub created_at: OffsetDateTime,
    /// When the draft last changed.
    pub updated_at: OffsetDateTime,
    /// When the draft is discarded.
    pub expires_at: OffsetDateTime,
}

impl DraftFields {
    /// Overwrites every field `update` sets, keeping the rest.
    pub fn merge(&mut self, update: DraftFields) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        take(&mut self.user_type, update.user_type);
        take(&mut self.username, update.username);
        take(&mut self.email, update.email);
        take(&mut self.name, update.name);
        take(&mut self.hometown, update.hometown);
        take(&mut self.destination, update.destination);
        take(&mut self.travel_start_date, update.travel_start_date);
        take(&mut self.travel_end_date, update.travel_end_date);
        take(&mut self.business_name, update.business_name);
        take(&mut self.bio, update.bio);
        take(&mut self.selection, update.selection);
    }
}

/// Open signup drafts.
#[derive(Debug)]
pub struct SignupDrafts {
    drafts: HashMap<String, SignupDraft>,
    ttl: Duration,
}

impl Default for SignupDrafts {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DRAFT_TTL)
    }
}

impl SignupDrafts {
    /// Default draft lifetime.
    pub const DEFAULT_DRAFT_TTL: Duration = Duration::hours(24);

    /// Creates an empty store whose drafts live for `ttl` after each update.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            drafts: HashMap::new(),
            ttl,
        }
    }

    /// Number of stored drafts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    /// Returns whether no drafts are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Opens a draft.
    pub fn create(&mut self, step: u8, fields: DraftFields, now: OffsetDateTime) -> SignupDraft {
        let draft: SignupDraft = SignupDraft {
            draft_id: format!("draft_{:016x}", rand::random::<u64>()),
            step: step.max(1),
            fields,
            created_at: now,
            updated_at: now,
            expires_at: now + self.ttl,
        };
        debug!(draft_id = %draft.draft_id, "Created signup draft");
        self.drafts.insert(draft.draft_id.clone(), draft.clone());
        draft
    }

    /// Reads a live draft. Expired drafts are removed and reported missing.
    pub fn read(&mut self, draft_id: &str, now: OffsetDateTime) -> Option<SignupDraft> {
        self.live_mut(draft_id, now).cloned()
    }

    /// Merges fields into a live draft and extends its expiry.
    ///
    /// `step` replaces the current step when given.
    pub fn update(
        &mut self,
        draft_id: &str,
        step: Option<u8>,
        fields: DraftFields,
        now: OffsetDateTime,
    ) -> Option<SignupDraft> {
        let ttl: Duration = self.ttl;
        let draft: &mut SignupDraft = self.live_mut(draft_id, now)?;
        draft.fields.merge(fields);
        if let Some(step) = step {
            draft.step = step.max(1);
        }
        draft.updated_at = now;
        draft.expires_at = now + ttl;
        Some(draft.clone())
    }

    /// Deletes a draft. Returns whether a draft was stored under the id.
    pub fn clear(&mut self, draft_id: &str) -> bool {
        self.drafts.remove(draft_id).is_some()
    }

    /// Drops every expired draft and returns how many were removed.
    pub fn purge_expired(&mut self, now: OffsetDateTime) -> usize {
        let before: usize = self.drafts.len();
        self.drafts.retain(|_, draft| draft.expires_at >= now);
        before - self.drafts.len()
    }

    fn live_mut(&mut self, draft_id: &str, now: OffsetDateTime) -> Option<&mut SignupDraft> {
        let expired: bool = self.drafts.get(draft_id)?.expires_at < now;
        if expired {
            debug!(draft_id, "Discarding expired signup draft");
            self.drafts.remove(draft_id);
            return None;
        }
        self.drafts.get_mut(draft_id)
    }
}
