// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Half-hour granular shift times.
//!
//! Shift times travel as hour strings with an optional `.5` suffix
//! (`"9"`, `"9.5"`, `"17.5"`). The backend may also echo clock times
//! (`"09:30"` or `"09:30:00"`); those are accepted on input and always
//! written back in the hour form.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Number of half hours in a day.
const HALF_HOURS_PER_DAY: u8 = 48;

/// A start or end time expressed in half hours since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShiftTime {
    half_hours: u8,
}

impl ShiftTime {
    /// Creates a time from a count of half hours since midnight.
    ///
    /// # Errors
    ///
    /// Returns an error if the count is greater than 48 (24:00).
    pub fn from_half_hours(half_hours: u8) -> Result<Self, DomainError> {
        if half_hours > HALF_HOURS_PER_DAY {
            return Err(DomainError::InvalidShiftTime(format!(
                "{half_hours} half hours"
            )));
        }
        Ok(Self { half_hours })
    }

    /// Parses a shift time.
    ///
    /// Accepts `"H"`, `"H.5"`, `"HH:00"`, `"HH:30"` and the same with a
    /// trailing `:00` seconds component.
    ///
    /// # Errors
    ///
    /// Returns an error for any other fractional value or an out-of-range hour.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidShiftTime(value.to_string());
        let trimmed: &str = value.trim();

        let (hour_part, half): (&str, bool) = if let Some((hour, rest)) = trimmed.split_once(':')
        {
            let (minutes, seconds): (&str, Option<&str>) = match rest.split_once(':') {
                Some((m, s)) => (m, Some(s)),
                None => (rest, None),
            };
            if seconds.is_some_and(|s| s != "00") {
                return Err(invalid());
            }
            match minutes {
                "00" => (hour, false),
                "30" => (hour, true),
                _ => return Err(invalid()),
            }
        } else if let Some((hour, fraction)) = trimmed.split_once('.') {
            if fraction != "5" {
                return Err(invalid());
            }
            (hour, true)
        } else {
            (trimmed, false)
        };

        if hour_part.is_empty() || !hour_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let hour: u8 = hour_part.parse().map_err(|_| invalid())?;
        let half_hours: u8 = hour
            .checked_mul(2)
            .and_then(|h| h.checked_add(u8::from(half)))
            .ok_or_else(invalid)?;

        Self::from_half_hours(half_hours).map_err(|_| invalid())
    }

    /// Returns the number of half hours since midnight.
    #[must_use]
    pub const fn half_hours(&self) -> u8 {
        self.half_hours
    }

    /// Returns the whole-hour component.
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.half_hours / 2
    }

    /// Returns whether the time falls on the half hour.
    #[must_use]
    pub const fn is_half_past(&self) -> bool {
        self.half_hours % 2 == 1
    }
}

impl std::fmt::Display for ShiftTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_half_past() {
            write!(f, "{}.5", self.hour())
        } else {
            write!(f, "{}", self.hour())
        }
    }
}

impl std::str::FromStr for ShiftTime {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ShiftTime {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ShiftTime> for String {
    fn from(time: ShiftTime) -> Self {
        time.to_string()
    }
}
