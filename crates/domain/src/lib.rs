// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod half_month;
mod identity;
mod local_date;
mod shift_time;
mod status;
mod types;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use half_month::{HalfMonth, blank_entries, generate_periods, is_first_half_start};
pub use identity::{EmployeeId, IDENTITY_TOKEN_LEN, IdentityToken, StoreId, is_identity_token};
pub use local_date::{local_today, parse_iso_date, parse_timezone};
pub use shift_time::ShiftTime;
pub use status::{PeriodStatus, SubmissionStatus, period_status, submission_status};
pub use types::{ShiftEntry, ShiftPeriod};

pub use chrono_tz::Tz;
