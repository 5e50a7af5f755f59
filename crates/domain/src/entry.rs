// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// A single selected item in one of the preference collections.
///
/// Entries either come from the controlled vocabulary or were typed in by
/// the user. The tag is informational: equality and hashing look only at
/// the text, so a custom "Museums" and the catalog "Museums" are the same
/// item for de-duplication and counting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum SelectionEntry {
    /// An item from the controlled vocabulary.
    Catalog(String),
    /// A free-text item entered by the user.
    Custom(String),
}

impl SelectionEntry {
    /// Creates a catalog entry.
    #[must_use]
    pub fn catalog(text: impl Into<String>) -> Self {
        Self::Catalog(text.into())
    }

    /// Creates a custom entry.
    #[must_use]
    pub fn custom(text: impl Into<String>) -> Self {
        Self::Custom(text.into())
    }

    /// Returns the entry text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Catalog(text) | Self::Custom(text) => text,
        }
    }

    /// Returns whether the entry was typed in by the user.
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Consumes the entry and returns its text.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Catalog(text) | Self::Custom(text) => text,
        }
    }
}

impl PartialEq for SelectionEntry {
    fn eq(&self, other: &Self) -> bool {
        self.text() == other.text()
    }
}

impl Eq for SelectionEntry {}

impl std::hash::Hash for SelectionEntry {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.text().hash(state);
    }
}

impl std::fmt::Display for SelectionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}
