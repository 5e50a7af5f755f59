// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::entry::SelectionEntry;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the four preference collections a form can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Interests (the largest catalog, with the Top Choices subset).
    Interests,
    /// Activities.
    Activities,
    /// Events.
    Events,
    /// Spoken languages.
    Languages,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 4] = [
        Self::Interests,
        Self::Activities,
        Self::Events,
        Self::Languages,
    ];

    /// Converts this category to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Interests => "interests",
            Self::Activities => "activities",
            Self::Events => "events",
            Self::Languages => "languages",
        }
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interests" => Ok(Self::Interests),
            "activities" => Ok(Self::Activities),
            "events" => Ok(Self::Events),
            "languages" => Ok(Self::Languages),
            _ => Err(DomainError::InvalidCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A duplicate-free collection of selected entries.
///
/// Insertion order is kept so forms can render chips in the order the user
/// picked them, but equality ignores order. Deserialization goes through
/// `insert`, so duplicates collapse there too.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<SelectionEntry>", into = "Vec<SelectionEntry>")]
pub struct SelectionSet {
    entries: Vec<SelectionEntry>,
}

impl SelectionSet {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the number of selected entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing is selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns whether an entry with exactly this text is selected.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.entries.iter().any(|entry| entry.text() == text)
    }

    /// Iterates over the selected entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.iter()
    }

    /// Iterates over the selected texts in insertion order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(SelectionEntry::text)
    }

    /// Adds an entry unless one with the same text is already present.
    ///
    /// Returns `true` if the entry was added.
    pub fn insert(&mut self, entry: SelectionEntry) -> bool {
        if self.contains(entry.text()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Removes the entry with this text.
    ///
    /// Returns `true` if something was removed.
    pub fn remove(&mut self, text: &str) -> bool {
        let before: usize = self.entries.len();
        self.entries.retain(|entry| entry.text() != text);
        self.entries.len() != before
    }

    /// Toggles an entry: removes it if selected, adds it otherwise.
    ///
    /// Returns `true` if the entry is selected after the call.
    pub fn toggle(&mut self, entry: SelectionEntry) -> bool {
        if self.remove(entry.text()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Adds a free-text entry typed by the user.
    ///
    /// The text is trimmed. Blank text, or text already present in this
    /// collection (exact, case-sensitive match), leaves the collection
    /// unchanged.
    ///
    /// Returns `true` if the entry was added.
    pub fn add_custom(&mut self, text: &str) -> bool {
        let trimmed: &str = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.insert(SelectionEntry::custom(trimmed))
    }

    /// Adds every entry of `subset` that is not already selected.
    ///
    /// Returns the number of entries added.
    pub fn select_all<'a, I>(&mut self, subset: I) -> usize
    where
        I: IntoIterator<Item = &'a SelectionEntry>,
    {
        subset
            .into_iter()
            .filter(|entry| self.insert((*entry).clone()))
            .count()
    }

    /// Removes exactly the members of `subset`, leaving everything else.
    ///
    /// Returns the number of entries removed.
    pub fn clear_all<'a, I>(&mut self, subset: I) -> usize
    where
        I: IntoIterator<Item = &'a SelectionEntry>,
    {
        subset
            .into_iter()
            .filter(|entry| self.remove(entry.text()))
            .count()
    }
}

impl PartialEq for SelectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.texts().all(|text| other.contains(text))
    }
}

impl Eq for SelectionSet {}

impl FromIterator<SelectionEntry> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = SelectionEntry>>(iter: T) -> Self {
        let mut set: Self = Self::new();
        for entry in iter {
            set.insert(entry);
        }
        set
    }
}

impl From<Vec<SelectionEntry>> for SelectionSet {
    fn from(entries: Vec<SelectionEntry>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<SelectionSet> for Vec<SelectionEntry> {
    fn from(set: SelectionSet) -> Self {
        set.entries
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a SelectionEntry;
    type IntoIter = std::slice::Iter<'a, SelectionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Everything a user picked on a preferences form.
///
/// Missing collections deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceSelection {
    /// Selected interests.
    pub interests: SelectionSet,
    /// Selected activities.
    pub activities: SelectionSet,
    /// Selected events.
    pub events: SelectionSet,
    /// Selected languages.
    pub languages: SelectionSet,
}

impl PreferenceSelection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interests: SelectionSet::new(),
            activities: SelectionSet::new(),
            events: SelectionSet::new(),
            languages: SelectionSet::new(),
        }
    }

    /// Returns the collection for a category.
    #[must_use]
    pub const fn get(&self, category: Category) -> &SelectionSet {
        match category {
            Category::Interests => &self.interests,
            Category::Activities => &self.activities,
            Category::Events => &self.events,
            Category::Languages => &self.languages,
        }
    }

    /// Returns the mutable collection for a category.
    pub const fn get_mut(&mut self, category: Category) -> &mut SelectionSet {
        match category {
            Category::Interests => &mut self.interests,
            Category::Activities => &mut self.activities,
            Category::Events => &mut self.events,
            Category::Languages => &mut self.languages,
        }
    }

    /// Sum of the four collection sizes.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.interests.len() + self.activities.len() + self.events.len() + self.languages.len()
    }
}
