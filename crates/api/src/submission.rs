// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The multi-step remote write that turns a draft into a submission.
//!
//! ## Steps
//!
//! 1. Check that every working day has a start before its end.
//! 2. Look up the employee's existing submission for the period.
//! 3. Update it to `submitted`, or create one.
//! 4. Create one entry per draft day, holidays included.
//!
//! A failure in steps 1 to 3 aborts with nothing written. Failures in
//! step 4 are logged and collected; there is no retry and no rollback.

use serde::{Deserialize, Serialize};
use shift_desk_domain::{EmployeeId, ShiftEntry, ShiftPeriod};
use time::{Date, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::backend::ShiftBackend;
use crate::request_response::{
    CreateEntryRequest, CreateSubmissionRequest, RemoteSubmission, SubmissionState,
    UpdateSubmissionRequest,
};

/// Why a submission was abandoned before anything was committed locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AbortReason {
    /// The period has no draft to submit.
    NoDraft,
    /// Some working days lack a start or end time.
    IncompleteDraft {
        /// The days missing a time.
        dates: Vec<Date>,
    },
    /// Some working days end at or before their start.
    InvalidTimeRange {
        /// The days with an inverted range.
        dates: Vec<Date>,
    },
    /// The current employee could not be determined.
    MissingIdentity {
        /// Why identity resolution failed.
        message: String,
    },
    /// The existing submission could not be looked up.
    SubmissionLookupFailed {
        /// The transport failure.
        message: String,
    },
    /// The submission could not be created or updated.
    SubmissionWriteFailed {
        /// The backend failure.
        message: String,
    },
}

impl std::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDraft => write!(f, "No draft to submit"),
            Self::IncompleteDraft { dates } => {
                write!(f, "Days without a start or end time: {}", join_dates(dates))
            }
            Self::InvalidTimeRange { dates } => {
                write!(f, "Days ending before they start: {}", join_dates(dates))
            }
            Self::MissingIdentity { message } => write!(f, "Missing identity: {message}"),
            Self::SubmissionLookupFailed { message } => {
                write!(f, "Submission lookup failed: {message}")
            }
            Self::SubmissionWriteFailed { message } => {
                write!(f, "Submission write failed: {message}")
            }
        }
    }
}

fn join_dates(dates: &[Date]) -> String {
    dates
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join(", ")
}

/// Checks that a draft is fit to submit.
///
/// Holidays need no times. Every other day needs both a start and an end,
/// and the end must come after the start.
///
/// # Errors
///
/// Returns `IncompleteDraft` if any working day lacks a time, otherwise
/// `InvalidTimeRange` if any working day ends at or before its start.
pub fn check_draft(draft: &ShiftPeriod) -> Result<(), AbortReason> {
    let working: Vec<&ShiftEntry> = draft.entries.iter().filter(|e| !e.is_holiday).collect();

    let incomplete: Vec<Date> = working
        .iter()
        .filter(|e| e.start_time.is_none() || e.end_time.is_none())
        .map(|e| e.work_date)
        .collect();
    if !incomplete.is_empty() {
        return Err(AbortReason::IncompleteDraft { dates: incomplete });
    }

    let inverted: Vec<Date> = working
        .iter()
        .filter(|e| matches!((e.start_time, e.end_time), (Some(start), Some(end)) if end <= start))
        .map(|e| e.work_date)
        .collect();
    if !inverted.is_empty() {
        return Err(AbortReason::InvalidTimeRange { dates: inverted });
    }

    Ok(())
}

/// The result of `submit_shift`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// The submission and every entry were written.
    FullSuccess {
        /// The backend's submission id.
        submission_id: String,
    },
    /// The submission was written but some entries were not.
    PartialFailure {
        /// The backend's submission id.
        submission_id: String,
        /// The days whose entry write failed.
        failed_dates: Vec<Date>,
    },
    /// Nothing was committed.
    Aborted {
        /// Why the submission was abandoned.
        reason: AbortReason,
    },
}

impl SubmissionOutcome {
    /// Returns whether the period is now submitted.
    ///
    /// Partial failures count as submitted.
    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        !matches!(self, Self::Aborted { .. })
    }
}

/// What the backend recorded for a pushed draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushedSubmission {
    /// The backend's submission id.
    pub submission_id: String,
    /// The backend's submission timestamp, when it reports one.
    pub submitted_at: Option<OffsetDateTime>,
    /// The days whose entry write failed.
    pub failed_dates: Vec<Date>,
}

impl PushedSubmission {
    /// Converts into the caller-facing outcome.
    #[must_use]
    pub fn into_outcome(self) -> SubmissionOutcome {
        if self.failed_dates.is_empty() {
            SubmissionOutcome::FullSuccess {
                submission_id: self.submission_id,
            }
        } else {
            SubmissionOutcome::PartialFailure {
                submission_id: self.submission_id,
                failed_dates: self.failed_dates,
            }
        }
    }
}

/// Writes a draft to the backend.
pub struct SubmissionCoordinator<'a, B: ShiftBackend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: ShiftBackend + ?Sized> SubmissionCoordinator<'a, B> {
    /// Creates a coordinator over `backend`.
    pub const fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Pushes `draft` as `employee_id`'s submission.
    ///
    /// # Errors
    ///
    /// Returns an abort reason if the submission itself could not be
    /// looked up or written. Entry failures are reported in the result.
    pub async fn push(
        &self,
        draft: &ShiftPeriod,
        employee_id: &EmployeeId,
    ) -> Result<PushedSubmission, AbortReason> {
        let existing: Option<RemoteSubmission> = self.find_existing(draft, employee_id).await?;

        let submission: RemoteSubmission = match existing {
            Some(existing) => {
                debug!(
                    "Updating submission {} for period {}",
                    existing.id, draft.id
                );
                let request: UpdateSubmissionRequest = UpdateSubmissionRequest {
                    status: SubmissionState::Submitted,
                    shift_entries: draft.entries.clone(),
                };
                self.backend
                    .update_shift_submission(&existing.id, &request)
                    .await
                    .map_err(|e| AbortReason::SubmissionWriteFailed {
                        message: e.to_string(),
                    })?
            }
            None => {
                debug!("Creating submission for period {}", draft.id);
                let request: CreateSubmissionRequest = CreateSubmissionRequest {
                    period_id: draft.id.to_string(),
                    employee_id: employee_id.value().to_string(),
                    status: SubmissionState::Submitted,
                    shift_entries: draft.entries.clone(),
                };
                self.backend
                    .create_shift_submission(&request)
                    .await
                    .map_err(|e| AbortReason::SubmissionWriteFailed {
                        message: e.to_string(),
                    })?
            }
        };

        let mut failed_dates: Vec<Date> = Vec::new();
        for entry in &draft.entries {
            let request: CreateEntryRequest = CreateEntryRequest::for_entry(&submission.id, entry);
            if let Err(e) = self.backend.create_shift_entry(&request).await {
                warn!(
                    "Failed to write entry {} of submission {}: {}",
                    entry.work_date, submission.id, e
                );
                failed_dates.push(entry.work_date);
            }
        }

        info!(
            "Submitted period {} as submission {} ({} of {} entries written)",
            draft.id,
            submission.id,
            draft.entries.len() - failed_dates.len(),
            draft.entries.len()
        );

        Ok(PushedSubmission {
            submitted_at: submission.effective_submitted_at(),
            submission_id: submission.id,
            failed_dates,
        })
    }

    async fn find_existing(
        &self,
        draft: &ShiftPeriod,
        employee_id: &EmployeeId,
    ) -> Result<Option<RemoteSubmission>, AbortReason> {
        match self.backend.get_shift_submissions(&draft.id).await {
            Ok(submissions) => Ok(submissions
                .into_iter()
                .find(|s| s.employee_id == employee_id.value())),
            Err(e) if e.is_rejected() => {
                debug!("Backend rejected submission lookup, treating as none: {}", e);
                Ok(None)
            }
            Err(e) => Err(AbortReason::SubmissionLookupFailed {
                message: e.to_string(),
            }),
        }
    }
}
