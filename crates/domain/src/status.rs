// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Period and submission status derivation.
//!
//! Statuses are never stored. They are computed on demand from a period
//! and the current store-local date, so a draft becomes overdue the first
//! time it is read after its deadline.

use crate::types::ShiftPeriod;
use serde::{Deserialize, Serialize};
use time::Date;

/// Where a period sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// The period starts after today.
    Upcoming,
    /// Today falls inside the period.
    Current,
    /// The period ended before today.
    Past,
}

impl PeriodStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Current => "current",
            Self::Past => "past",
        }
    }
}

impl std::fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a period has been turned in on time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Not submitted, deadline not yet passed.
    Draft,
    /// Submitted.
    Submitted,
    /// Not submitted and the deadline has passed.
    Overdue,
}

impl SubmissionStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Overdue => "overdue",
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derives where `period` sits relative to `today`.
#[must_use]
pub fn period_status(period: &ShiftPeriod, today: Date) -> PeriodStatus {
    if today > period.end_date {
        PeriodStatus::Past
    } else if today < period.start_date {
        PeriodStatus::Upcoming
    } else {
        PeriodStatus::Current
    }
}

/// Derives the submission status of `period` on `today`.
///
/// The deadline day itself is still on time.
#[must_use]
pub fn submission_status(period: &ShiftPeriod, today: Date) -> SubmissionStatus {
    if period.is_submitted {
        SubmissionStatus::Submitted
    } else if today > period.submission_deadline {
        SubmissionStatus::Overdue
    } else {
        SubmissionStatus::Draft
    }
}
