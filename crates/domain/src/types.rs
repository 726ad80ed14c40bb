// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::identity::{EmployeeId, IdentityToken, StoreId};
use crate::shift_time::ShiftTime;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// One calendar day's planned shift within a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftEntry {
    /// The day this entry plans.
    #[serde(rename = "work_date", alias = "workDate", with = "iso_date")]
    pub work_date: Date,
    /// Planned start, `None` when not filled in.
    #[serde(default)]
    pub start_time: Option<ShiftTime>,
    /// Planned end, `None` when not filled in.
    #[serde(default)]
    pub end_time: Option<ShiftTime>,
    /// Whether the employee requests the day off.
    #[serde(default)]
    pub is_holiday: bool,
}

impl ShiftEntry {
    /// Creates an entry with no times and no holiday flag.
    #[must_use]
    pub const fn blank(work_date: Date) -> Self {
        Self {
            work_date,
            start_time: None,
            end_time: None,
            is_holiday: false,
        }
    }

    /// Returns a copy of this entry carrying the given plan.
    #[must_use]
    pub const fn with_plan(
        &self,
        start_time: Option<ShiftTime>,
        end_time: Option<ShiftTime>,
        is_holiday: bool,
    ) -> Self {
        Self {
            work_date: self.work_date,
            start_time,
            end_time,
            is_holiday,
        }
    }

    /// Returns whether no plan has been entered for this day.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.start_time.is_none() && self.end_time.is_none() && !self.is_holiday
    }
}

/// A half-month scheduling window an employee fills in.
///
/// A period covers either days 1-15 or day 16 to the end of one month and
/// holds exactly one entry per calendar day in that range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftPeriod {
    /// The period's identity token.
    pub id: IdentityToken,
    /// The store the period belongs to.
    pub store_id: StoreId,
    /// The employee filling in the period.
    pub employee_id: EmployeeId,
    /// First day of the period (inclusive).
    #[serde(with = "iso_date")]
    pub start_date: Date,
    /// Last day of the period (inclusive).
    #[serde(with = "iso_date")]
    pub end_date: Date,
    /// `true` for days 1-15, `false` for 16 to end of month.
    pub is_first_half: bool,
    /// Last day on which the period can be submitted on time.
    #[serde(with = "iso_date")]
    pub submission_deadline: Date,
    /// Whether the period has been turned in.
    #[serde(default)]
    pub is_submitted: bool,
    /// When the period was turned in.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub submitted_at: Option<OffsetDateTime>,
    /// One entry per calendar day, in date order.
    #[serde(alias = "shifts")]
    pub entries: Vec<ShiftEntry>,
}

impl ShiftPeriod {
    /// Number of calendar days in the period (inclusive).
    #[must_use]
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).whole_days() + 1
    }

    /// Returns whether `date` lies inside the period.
    #[must_use]
    pub fn contains_date(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Returns the entry for `date`, if any.
    #[must_use]
    pub fn entry_for(&self, date: Date) -> Option<&ShiftEntry> {
        self.entries.iter().find(|e| e.work_date == date)
    }

    /// Returns a copy with the submission flags cleared.
    ///
    /// Any edit invalidates a prior submission.
    #[must_use]
    pub fn reopened(&self) -> Self {
        Self {
            is_submitted: false,
            submitted_at: None,
            ..self.clone()
        }
    }
}
