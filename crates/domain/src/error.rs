// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier does not have the canonical identity-token shape.
    InvalidIdentityToken(String),
    /// A store identifier is empty.
    InvalidStoreId(String),
    /// An employee identifier is empty.
    InvalidEmployeeId(String),
    /// A shift time is not a whole or half hour between 0 and 24.
    InvalidShiftTime(String),
    /// A date range ends before it starts.
    InvalidDateRange {
        /// The first day of the range.
        start_date: time::Date,
        /// The last day of the range.
        end_date: time::Date,
    },
    /// A calendar date could not be constructed.
    InvalidCalendarDate {
        /// Description of the date that failed.
        reason: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Timezone name is not a valid IANA timezone.
    InvalidTimezone(String),
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIdentityToken(value) => {
                write!(f, "Invalid identity token: '{value}'")
            }
            Self::InvalidStoreId(msg) => write!(f, "Invalid store id: {msg}"),
            Self::InvalidEmployeeId(msg) => write!(f, "Invalid employee id: {msg}"),
            Self::InvalidShiftTime(value) => write!(
                f,
                "Invalid shift time '{value}': expected a whole or half hour between 0 and 24"
            ),
            Self::InvalidDateRange {
                start_date,
                end_date,
            } => {
                write!(f, "Invalid date range: {end_date} is before {start_date}")
            }
            Self::InvalidCalendarDate { reason } => {
                write!(f, "Invalid calendar date: {reason}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::InvalidTimezone(tz) => write!(f, "Invalid timezone: {tz}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
