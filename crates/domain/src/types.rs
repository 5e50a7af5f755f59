// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::location::LocationLabel;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const TRAVEL_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// How a member signs up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Lives in their hometown and meets visitors.
    Local,
    /// Currently planning or on a trip.
    Traveler,
    /// A venue or service provider.
    Business,
}

impl UserType {
    /// Converts this user type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Traveler => "traveler",
            Self::Business => "business",
        }
    }
}

impl FromStr for UserType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "traveler" | "traveller" => Ok(Self::Traveler),
            "business" => Ok(Self::Business),
            _ => Err(DomainError::InvalidUserType(s.to_string())),
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parses a `YYYY-MM-DD` travel date.
///
/// # Errors
///
/// Returns `DomainError::InvalidTravelDate` if the string is not a valid date.
pub fn parse_travel_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), TRAVEL_DATE_FORMAT).map_err(|e| DomainError::InvalidTravelDate {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a travel date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns `DomainError::InvalidTravelDate` if formatting fails.
pub fn format_travel_date(date: Date) -> Result<String, DomainError> {
    date.format(TRAVEL_DATE_FORMAT)
        .map_err(|e| DomainError::InvalidTravelDate {
            date_string: date.to_string(),
            error: e.to_string(),
        })
}

/// An upcoming trip: where and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelPlan {
    destination: LocationLabel,
    start_date: Date,
    end_date: Date,
}

impl TravelPlan {
    /// Creates a travel plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination has no city or the trip ends
    /// before it starts.
    pub fn new(
        destination: LocationLabel,
        start_date: Date,
        end_date: Date,
    ) -> Result<Self, DomainError> {
        if destination.city.is_empty() {
            return Err(DomainError::InvalidLocation(String::from(
                "Destination city cannot be empty",
            )));
        }
        if end_date < start_date {
            return Err(DomainError::InvalidTravelDates {
                start_date,
                end_date,
            });
        }
        Ok(Self {
            destination,
            start_date,
            end_date,
        })
    }

    /// Where the trip goes.
    #[must_use]
    pub const fn destination(&self) -> &LocationLabel {
        &self.destination
    }

    /// First day of the trip.
    #[must_use]
    pub const fn start_date(&self) -> Date {
        self.start_date
    }

    /// Last day of the trip.
    #[must_use]
    pub const fn end_date(&self) -> Date {
        self.end_date
    }

    /// Number of nights away. Same-day trips have zero.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).whole_days()
    }
}
