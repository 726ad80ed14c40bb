// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shift_desk_domain::{IdentityToken, ShiftPeriod, ShiftTime};
use time::{Date, OffsetDateTime};

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Point the selection at a canonical period or draft.
    SelectPeriod {
        /// The period to select.
        period_id: IdentityToken,
    },
    /// Point the selection at an existing draft to continue editing it.
    ResumeDraft {
        /// The period whose draft is selected.
        period_id: IdentityToken,
    },
    /// Set the plan for one day of the selected period.
    UpdateShift {
        /// The day to edit.
        work_date: Date,
        /// The planned start.
        start_time: Option<ShiftTime>,
        /// The planned end.
        end_time: Option<ShiftTime>,
        /// Whether the day is requested off.
        is_holiday: bool,
    },
    /// Set the same plan for several days of the selected period.
    BulkUpdateShifts {
        /// The days to edit.
        work_dates: Vec<Date>,
        /// The planned start.
        start_time: Option<ShiftTime>,
        /// The planned end.
        end_time: Option<ShiftTime>,
        /// Whether the days are requested off.
        is_holiday: bool,
    },
    /// Copy the plan of the preceding period into the selected one.
    CopyPreviousPeriod,
    /// Throw away the draft of a period.
    DiscardDraft {
        /// The period whose draft is removed.
        period_id: IdentityToken,
    },
    /// Install freshly reconciled canonical periods.
    ReplaceCanonical {
        /// The reconciled periods.
        periods: Vec<ShiftPeriod>,
    },
    /// Merge a successfully submitted draft into canonical state.
    MarkSubmitted {
        /// The submitted period.
        period_id: IdentityToken,
        /// When the backend recorded the submission.
        submitted_at: OffsetDateTime,
    },
}

impl Command {
    /// Returns the command name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SelectPeriod { .. } => "SelectPeriod",
            Self::ResumeDraft { .. } => "ResumeDraft",
            Self::UpdateShift { .. } => "UpdateShift",
            Self::BulkUpdateShifts { .. } => "BulkUpdateShifts",
            Self::CopyPreviousPeriod => "CopyPreviousPeriod",
            Self::DiscardDraft { .. } => "DiscardDraft",
            Self::ReplaceCanonical { .. } => "ReplaceCanonical",
            Self::MarkSubmitted { .. } => "MarkSubmitted",
        }
    }
}
