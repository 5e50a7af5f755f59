// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Selection adequacy.
//!
//! Evaluation is **computed**, never stored. Forms call it after every
//! toggle or keystroke, so it is a plain function of the current selection.

use crate::requirement::{FlowThresholds, OnboardingFlow, SelectionRequirement};
use crate::selection::PreferenceSelection;
use serde::{Deserialize, Serialize};

/// Outcome of checking a selection against a minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Combined size of the four collections.
    pub total: usize,
    /// Whether `total` meets the minimum.
    pub is_valid: bool,
    /// How many more items are required; zero when valid.
    pub needed: usize,
}

impl ValidationResult {
    /// The message forms show under a disabled submit button.
    ///
    /// Returns `None` when the selection is valid.
    #[must_use]
    pub fn shortfall_message(&self) -> Option<String> {
        match self.needed {
            0 => None,
            1 => Some(String::from("Please select 1 more item")),
            needed => Some(format!("Please select {needed} more items")),
        }
    }
}

/// Evaluates a selection against a minimum total.
///
/// `total` is the sum of the four collection sizes and `needed` is
/// `max(0, minimum - total)`.
#[must_use]
pub const fn evaluate(selection: &PreferenceSelection, minimum: usize) -> ValidationResult {
    let total: usize = selection.total();
    ValidationResult {
        total,
        is_valid: total >= minimum,
        needed: minimum.saturating_sub(total),
    }
}

/// Evaluates a selection against the configured requirement of a flow.
#[must_use]
pub fn evaluate_for_flow(
    selection: &PreferenceSelection,
    thresholds: &FlowThresholds,
    flow: OnboardingFlow,
) -> ValidationResult {
    let requirement: SelectionRequirement = thresholds.requirement_for(flow);
    evaluate(selection, requirement.minimum())
}
