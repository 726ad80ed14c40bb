// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Half-month period derivation.
//!
//! This module defines the deterministic set of periods an employee must
//! fill in, derived from today's date only.
//!
//! ## Invariants
//!
//! - A first-half period covers days 1-15, a second-half period covers
//!   day 16 to the last day of the month
//! - First-half deadlines fall on the 20th of the previous month
//!   (January rolls back to December of the previous year)
//! - Second-half deadlines fall on the 5th of the same month
//! - Every period holds one blank entry per calendar day in its range

use crate::error::DomainError;
use crate::identity::{EmployeeId, IdentityToken, StoreId};
use crate::types::{ShiftEntry, ShiftPeriod};
use time::{Date, Month};

/// Last day of a first-half period.
const FIRST_HALF_LAST_DAY: u8 = 15;
/// First-half periods are due on this day of the previous month.
const FIRST_HALF_DEADLINE_DAY: u8 = 20;
/// Second-half periods are due on this day of the same month.
const SECOND_HALF_DEADLINE_DAY: u8 = 5;

/// One half of one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HalfMonth {
    year: i32,
    month: Month,
    is_first_half: bool,
}

impl HalfMonth {
    /// Creates a half month.
    #[must_use]
    pub const fn new(year: i32, month: Month, is_first_half: bool) -> Self {
        Self {
            year,
            month,
            is_first_half,
        }
    }

    /// Returns the half month containing `date`.
    #[must_use]
    pub const fn containing(date: Date) -> Self {
        Self::new(date.year(), date.month(), is_first_half_start(date))
    }

    /// Returns the year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month.
    #[must_use]
    pub const fn month(&self) -> Month {
        self.month
    }

    /// Returns whether this is days 1-15.
    #[must_use]
    pub const fn is_first_half(&self) -> bool {
        self.is_first_half
    }

    /// Returns the first half of the following month.
    #[must_use]
    pub const fn first_half_of_next_month(&self) -> Self {
        let (year, month): (i32, Month) = next_month(self.year, self.month);
        Self::new(year, month, true)
    }

    /// First day of the half month.
    ///
    /// # Errors
    ///
    /// Returns an error if the calendar date cannot be represented.
    pub fn start_date(&self) -> Result<Date, DomainError> {
        let day: u8 = if self.is_first_half {
            1
        } else {
            FIRST_HALF_LAST_DAY + 1
        };
        calendar_date(self.year, self.month, day)
    }

    /// Last day of the half month.
    ///
    /// # Errors
    ///
    /// Returns an error if the calendar date cannot be represented.
    pub fn end_date(&self) -> Result<Date, DomainError> {
        if self.is_first_half {
            return calendar_date(self.year, self.month, FIRST_HALF_LAST_DAY);
        }
        let (year, month): (i32, Month) = next_month(self.year, self.month);
        calendar_date(year, month, 1)?
            .previous_day()
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("finding the last day of {} {}", self.month, self.year),
            })
    }

    /// Submission deadline of the half month.
    ///
    /// # Errors
    ///
    /// Returns an error if the calendar date cannot be represented.
    pub fn submission_deadline(&self) -> Result<Date, DomainError> {
        if self.is_first_half {
            let (year, month): (i32, Month) = previous_month(self.year, self.month);
            calendar_date(year, month, FIRST_HALF_DEADLINE_DAY)
        } else {
            calendar_date(self.year, self.month, SECOND_HALF_DEADLINE_DAY)
        }
    }

    /// Builds the blank period for this half month.
    ///
    /// # Errors
    ///
    /// Returns an error if any date in the period cannot be represented.
    pub fn to_period(
        &self,
        store_id: &StoreId,
        employee_id: &EmployeeId,
    ) -> Result<ShiftPeriod, DomainError> {
        let start_date: Date = self.start_date()?;
        let end_date: Date = self.end_date()?;

        Ok(ShiftPeriod {
            id: IdentityToken::for_period(store_id, employee_id, start_date),
            store_id: store_id.clone(),
            employee_id: employee_id.clone(),
            start_date,
            end_date,
            is_first_half: self.is_first_half,
            submission_deadline: self.submission_deadline()?,
            is_submitted: false,
            submitted_at: None,
            entries: blank_entries(start_date, end_date)?,
        })
    }
}

/// Generates the periods an employee currently owes.
///
/// The result is always, in order: the current month's first half, the
/// current month's second half and the next month's first half.
///
/// # Example
///
/// ```text
/// today = 2025-06-10
///
/// Jun 1-15   deadline May 20
/// Jun 16-30  deadline Jun 5
/// Jul 1-15   deadline Jun 20
/// ```
///
/// # Errors
///
/// Returns an error if a date cannot be represented.
pub fn generate_periods(
    today: Date,
    store_id: &StoreId,
    employee_id: &EmployeeId,
) -> Result<[ShiftPeriod; 3], DomainError> {
    let first: HalfMonth = HalfMonth::new(today.year(), today.month(), true);
    let second: HalfMonth = HalfMonth::new(today.year(), today.month(), false);
    let next: HalfMonth = first.first_half_of_next_month();

    Ok([
        first.to_period(store_id, employee_id)?,
        second.to_period(store_id, employee_id)?,
        next.to_period(store_id, employee_id)?,
    ])
}

/// Creates one blank entry for every day from `start_date` to `end_date` inclusive.
///
/// # Errors
///
/// Returns an error if the range ends before it starts.
pub fn blank_entries(start_date: Date, end_date: Date) -> Result<Vec<ShiftEntry>, DomainError> {
    if end_date < start_date {
        return Err(DomainError::InvalidDateRange {
            start_date,
            end_date,
        });
    }

    let mut entries: Vec<ShiftEntry> = Vec::new();
    let mut day: Date = start_date;
    loop {
        entries.push(ShiftEntry::blank(day));
        if day == end_date {
            break;
        }
        day = day
            .next_day()
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("advancing past {day}"),
            })?;
    }

    Ok(entries)
}

/// Returns whether a period starting on `date` is a first-half period.
#[must_use]
pub const fn is_first_half_start(date: Date) -> bool {
    date.day() <= FIRST_HALF_LAST_DAY
}

const fn next_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::December => (year + 1, Month::January),
        _ => (year, month.next()),
    }
}

const fn previous_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::January => (year - 1, Month::December),
        _ => (year, month.previous()),
    }
}

fn calendar_date(year: i32, month: Month, day: u8) -> Result<Date, DomainError> {
    Date::from_calendar_date(year, month, day).map_err(|e| DomainError::InvalidCalendarDate {
        reason: format!("{year}-{month}-{day}: {e}"),
    })
}
