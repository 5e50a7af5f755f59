// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// A city/state/country triple as entered on the forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationLabel {
    /// City name.
    pub city: String,
    /// State, province, or region. Often blank outside the US.
    pub state: String,
    /// Country name.
    pub country: String,
}

impl LocationLabel {
    /// Creates a location, trimming every part.
    #[must_use]
    pub fn new(city: &str, state: &str, country: &str) -> Self {
        Self {
            city: city.trim().to_string(),
            state: state.trim().to_string(),
            country: country.trim().to_string(),
        }
    }

    /// Renders `"City, State, Country"`, skipping blank parts.
    #[must_use]
    pub fn label(&self) -> String {
        [&self.city, &self.state, &self.country]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<&str>>()
            .join(", ")
    }

    /// Two locations match when their labels agree ignoring ASCII case.
    /// Blank locations never match.
    #[must_use]
    pub fn same_place(&self, other: &Self) -> bool {
        let mine: String = self.label();
        !mine.is_empty() && mine.eq_ignore_ascii_case(&other.label())
    }
}

impl std::fmt::Display for LocationLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
