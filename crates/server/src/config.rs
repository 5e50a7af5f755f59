// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Server configuration loaded from an optional TOML file.
//!
//! Every key is optional:
//!
//! ```toml
//! session_ttl_minutes = 10080
//! draft_ttl_minutes = 1440
//! issue_token_on_register = true
//! bcrypt_cost = 12
//!
//! [thresholds]
//! local_signup = 10
//! trip_planning = 3
//! ```

use nearby_traveler_domain::{FlowThresholds, OnboardingFlow, SelectionRequirement};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use time::Duration;

const DEFAULT_SESSION_TTL_MINUTES: i64 = 7 * 24 * 60;
const DEFAULT_DRAFT_TTL_MINUTES: i64 = 24 * 60;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A `[thresholds]` key names no onboarding flow.
    #[error("Unknown onboarding flow in [thresholds]: '{0}'")]
    UnknownFlow(String),
    /// A value is out of range.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// The offending key.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

/// Settings read from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Per-flow minimum overrides, keyed by flow name.
    pub thresholds: BTreeMap<String, usize>,
    /// Lifetime of a login session.
    pub session_ttl_minutes: i64,
    /// Lifetime of an untouched signup draft.
    pub draft_ttl_minutes: i64,
    /// Whether registration also logs the new member in.
    pub issue_token_on_register: bool,
    /// bcrypt work factor. The library default applies when unset.
    pub bcrypt_cost: Option<u32>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            thresholds: BTreeMap::new(),
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
            draft_ttl_minutes: DEFAULT_DRAFT_TTL_MINUTES,
            issue_token_on_register: true,
            bcrypt_cost: None,
        }
    }
}

impl ServerConfig {
    /// Reads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents: String =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates config text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema or a
    /// value is out of range.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks ranges and flow names.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive_minutes("session_ttl_minutes", self.session_ttl_minutes)?;
        positive_minutes("draft_ttl_minutes", self.draft_ttl_minutes)?;
        if let Some(cost) = self.bcrypt_cost.filter(|cost| !(4..=31).contains(cost)) {
            return Err(ConfigError::InvalidValue {
                field: "bcrypt_cost",
                message: format!("{cost} is outside 4..=31"),
            });
        }
        self.flow_thresholds().map(|_| ())
    }

    /// The default thresholds with the configured overrides applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownFlow` for a key that names no flow.
    pub fn flow_thresholds(&self) -> Result<FlowThresholds, ConfigError> {
        let mut thresholds: FlowThresholds = FlowThresholds::default();
        for (name, minimum) in &self.thresholds {
            let flow: OnboardingFlow = OnboardingFlow::from_str(name)
                .map_err(|_| ConfigError::UnknownFlow(name.clone()))?;
            thresholds.set(flow, SelectionRequirement::new(*minimum));
        }
        Ok(thresholds)
    }

    /// Session lifetime.
    #[must_use]
    pub const fn session_ttl(&self) -> Duration {
        Duration::minutes(self.session_ttl_minutes)
    }

    /// Draft lifetime.
    #[must_use]
    pub const fn draft_ttl(&self) -> Duration {
        Duration::minutes(self.draft_ttl_minutes)
    }
}

fn positive_minutes(field: &'static str, minutes: i64) -> Result<(), ConfigError> {
    if minutes > 0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            message: format!("{minutes} minutes must be positive"),
        })
    }
}
