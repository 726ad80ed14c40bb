// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Store-local calendar dates.
//!
//! Period generation and status derivation work on calendar dates. The
//! date that counts is the wall-clock date in the store's declared
//! timezone, not the UTC date.

use crate::error::DomainError;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use time::{Date, Month, OffsetDateTime};

/// Parses an IANA timezone name.
///
/// # Errors
///
/// Returns an error if the name is not a known timezone.
pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
    name.parse()
        .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
}

/// Returns the calendar date of `now` in `timezone`.
///
/// # Errors
///
/// Returns an error if the instant cannot be represented as a calendar date.
pub fn local_today(now: OffsetDateTime, timezone: Tz) -> Result<Date, DomainError> {
    let utc: DateTime<Utc> = DateTime::from_timestamp(now.unix_timestamp(), 0).ok_or_else(|| {
        DomainError::DateArithmeticOverflow {
            operation: format!("converting {now} to a chrono timestamp"),
        }
    })?;
    let local: NaiveDate = utc.with_timezone(&timezone).date_naive();

    // Convert chrono::NaiveDate to time::Date
    let month: Month = u8::try_from(local.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(|| DomainError::InvalidCalendarDate {
            reason: format!("month of {local}"),
        })?;
    let day: u8 = u8::try_from(local.day()).map_err(|_| DomainError::InvalidCalendarDate {
        reason: format!("day of {local}"),
    })?;

    Date::from_calendar_date(local.year(), month, day).map_err(|e| {
        DomainError::InvalidCalendarDate {
            reason: format!("{local}: {e}"),
        }
    })
}

/// Parses a `YYYY-MM-DD` date string.
///
/// # Errors
///
/// Returns an error if the string is not a valid ISO calendar date.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    Date::parse(value, &format).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}
