// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password rules for member signup.

use thiserror::Error;

/// Password policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// Password is too short.
    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },

    /// Password does not mix enough character classes.
    #[error(
        "Password must contain at least {required} of the following: uppercase letter, lowercase letter, digit, symbol (found {found})"
    )]
    InsufficientComplexity { required: usize, found: usize },

    /// Password is the same as an account identifier.
    #[error("Password must not be the same as your {field}")]
    MatchesAccountField { field: &'static str },

    /// Password and confirmation do not match.
    #[error("Password and confirmation do not match")]
    ConfirmationMismatch,
}

/// Password policy configuration.
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    /// Minimum password length, in characters.
    pub min_length: usize,
    /// Minimum number of character classes required (out of 4).
    pub min_complexity: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            min_complexity: 3,
        }
    }
}

impl PasswordPolicy {
    /// Validates a signup password.
    ///
    /// # Arguments
    ///
    /// * `password` - The chosen password
    /// * `confirmation` - The repeated password from the form
    /// * `username` - The requested username (the password may not equal it)
    /// * `email` - The account email (the password may not equal it)
    ///
    /// # Errors
    ///
    /// Returns the first rule the password breaks.
    pub fn validate(
        &self,
        password: &str,
        confirmation: &str,
        username: &str,
        email: &str,
    ) -> Result<(), PasswordPolicyError> {
        if password != confirmation {
            return Err(PasswordPolicyError::ConfirmationMismatch);
        }

        if password.chars().count() < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        let found: usize = Self::character_classes(password);
        if found < self.min_complexity {
            return Err(PasswordPolicyError::InsufficientComplexity {
                required: self.min_complexity,
                found,
            });
        }

        if password.eq_ignore_ascii_case(username) {
            return Err(PasswordPolicyError::MatchesAccountField { field: "username" });
        }
        if password.eq_ignore_ascii_case(email) {
            return Err(PasswordPolicyError::MatchesAccountField { field: "email" });
        }

        Ok(())
    }

    /// Counts the character classes present: uppercase, lowercase, digit,
    /// and anything else (symbols, spaces, non-ASCII letters).
    fn character_classes(password: &str) -> usize {
        let checks: [fn(&char) -> bool; 4] = [
            char::is_ascii_uppercase,
            char::is_ascii_lowercase,
            char::is_ascii_digit,
            |c| !c.is_ascii_alphanumeric(),
        ];
        checks
            .iter()
            .filter(|check| password.chars().any(|c| check(&c)))
            .count()
    }
}
