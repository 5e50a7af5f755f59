// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Discovery of members with overlapping preferences or places.

use crate::location::LocationLabel;
use crate::selection::{Category, PreferenceSelection, SelectionSet};
use serde::{Deserialize, Serialize};

/// Items two selections have in common, per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedPreferences {
    /// Shared interests.
    pub interests: Vec<String>,
    /// Shared activities.
    pub activities: Vec<String>,
    /// Shared events.
    pub events: Vec<String>,
    /// Shared languages.
    pub languages: Vec<String>,
}

impl SharedPreferences {
    /// Total number of shared items.
    #[must_use]
    pub fn count(&self) -> usize {
        self.interests.len() + self.activities.len() + self.events.len() + self.languages.len()
    }
}

fn intersect(mine: &SelectionSet, theirs: &SelectionSet) -> Vec<String> {
    mine.texts()
        .filter(|text| theirs.contains(text))
        .map(str::to_string)
        .collect()
}

/// Computes the per-category intersection of two selections.
///
/// Items are listed in the order they appear in `mine`.
#[must_use]
pub fn shared_preferences(
    mine: &PreferenceSelection,
    theirs: &PreferenceSelection,
) -> SharedPreferences {
    let [interests, activities, events, languages] =
        Category::ALL.map(|category| intersect(mine.get(category), theirs.get(category)));
    SharedPreferences {
        interests,
        activities,
        events,
        languages,
    }
}

/// The parts of a member that matching looks at.
#[derive(Debug, Clone, Copy)]
pub struct MatchProfile<'a> {
    /// Unique username.
    pub username: &'a str,
    /// The member's selection.
    pub selection: &'a PreferenceSelection,
    /// Where the member lives.
    pub hometown: &'a LocationLabel,
    /// Where the member is travelling, if anywhere.
    pub destination: Option<&'a LocationLabel>,
}

impl MatchProfile<'_> {
    /// True when one member will be where the other lives or travels.
    fn shares_location_with(&self, other: &MatchProfile<'_>) -> bool {
        let same = |a: Option<&LocationLabel>, b: Option<&LocationLabel>| {
            matches!((a, b), (Some(a), Some(b)) if a.same_place(b))
        };
        same(self.destination, other.destination)
            || same(self.destination, Some(other.hometown))
            || same(Some(self.hometown), other.destination)
    }
}

/// A ranked candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// The candidate's username.
    pub username: String,
    /// What the two members have in common.
    pub shared: SharedPreferences,
    /// Whether either member will be where the other is.
    pub shares_location: bool,
}

/// Ranks other members by what they share with `me`.
///
/// Candidates sharing neither an item nor a location are dropped, as is
/// `me` itself (matched by username). Ordering is by shared item count
/// (descending), then location overlap, then username.
#[must_use]
pub fn rank_matches(me: &MatchProfile<'_>, others: &[MatchProfile<'_>]) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = others
        .iter()
        .filter(|other| other.username != me.username)
        .map(|other| MatchResult {
            username: other.username.to_string(),
            shared: shared_preferences(me.selection, other.selection),
            shares_location: me.shares_location_with(other),
        })
        .filter(|result| result.shares_location || result.shared.count() > 0)
        .collect();

    results.sort_by(|a, b| {
        b.shared
            .count()
            .cmp(&a.shared.count())
            .then_with(|| b.shares_location.cmp(&a.shares_location))
            .then_with(|| a.username.cmp(&b.username))
    });
    results
}

