// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shift_desk_domain::IdentityToken;
use time::Date;

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An edit was requested while no period is selected.
    NoPeriodSelected,
    /// No canonical period or draft has the given id.
    PeriodNotFound(IdentityToken),
    /// No draft has the given id.
    DraftNotFound(IdentityToken),
    /// An edited date lies outside the selected period.
    DateOutsidePeriod {
        /// The selected period.
        period_id: IdentityToken,
        /// The offending date.
        date: Date,
    },
    /// A bulk edit was requested with no dates.
    EmptyDateSelection,
    /// No known period starts before the selected one.
    NoPreviousPeriod(IdentityToken),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPeriodSelected => write!(f, "No period is selected"),
            Self::PeriodNotFound(id) => write!(f, "Period {id} not found"),
            Self::DraftNotFound(id) => write!(f, "No draft exists for period {id}"),
            Self::DateOutsidePeriod { period_id, date } => {
                write!(f, "Date {date} is outside period {period_id}")
            }
            Self::EmptyDateSelection => write!(f, "No dates were given to update"),
            Self::NoPreviousPeriod(id) => {
                write!(f, "No period precedes period {id}")
            }
        }
    }
}

impl std::error::Error for CoreError {}
