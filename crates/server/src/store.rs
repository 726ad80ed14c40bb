// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory backend records.
//!
//! Rows are kept in insertion order. Listing applies the orderings the
//! production backend uses: periods newest first, submissions newest
//! first, entries by work date.

use shift_desk_api::{
    CreateEntryRequest, CreateSubmissionRequest, RemoteEntry, RemotePeriod, RemoteSubmission,
    SubmissionState,
};
use shift_desk_domain::{ShiftTime, is_first_half_start};
use time::Date;
use uuid::Uuid;

/// Failures applying a write to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No submission has the given id.
    SubmissionNotFound(String),
    /// No entry has the given id.
    EntryNotFound(String),
    /// The employee already has a submission for the period.
    SubmissionExists {
        /// The existing submission.
        submission_id: String,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubmissionNotFound(id) => write!(f, "Submission not found: {id}"),
            Self::EntryNotFound(id) => write!(f, "Shift entry not found: {id}"),
            Self::SubmissionExists { submission_id } => {
                write!(f, "Submission already exists: {submission_id}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// A new period as accepted by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPeriod {
    pub store_id: String,
    pub start_date: Date,
    pub end_date: Date,
    pub submission_deadline: Date,
}

/// Replacement plan for an existing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPatch {
    pub start_time: Option<ShiftTime>,
    pub end_time: Option<ShiftTime>,
    pub is_holiday: bool,
}

/// Every period, submission and entry the reference backend holds.
#[derive(Debug, Default)]
pub struct BackendStore {
    periods: Vec<RemotePeriod>,
    submissions: Vec<RemoteSubmission>,
    entries: Vec<RemoteEntry>,
}

fn new_id() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

impl BackendStore {
    /// Periods of `store_id`, or of every store, latest start first.
    pub fn list_periods(&self, store_id: Option<&str>) -> Vec<RemotePeriod> {
        let mut periods: Vec<RemotePeriod> = self
            .periods
            .iter()
            .filter(|p| store_id.is_none_or(|id| p.store_id.as_deref() == Some(id)))
            .cloned()
            .collect();
        periods.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        periods
    }

    pub fn add_period(&mut self, period: NewPeriod) -> RemotePeriod {
        let stored: RemotePeriod = RemotePeriod {
            id: new_id(),
            store_id: Some(period.store_id),
            start_date: period.start_date,
            end_date: period.end_date,
            is_first_half: Some(is_first_half_start(period.start_date)),
            submission_deadline: Some(period.submission_deadline),
        };
        self.periods.push(stored.clone());
        stored
    }

    /// Submissions of `period_id`, or of every period, newest first.
    pub fn list_submissions(&self, period_id: Option<&str>) -> Vec<RemoteSubmission> {
        self.submissions
            .iter()
            .rev()
            .filter(|s| period_id.is_none_or(|id| s.period_id.as_deref() == Some(id)))
            .cloned()
            .collect()
    }

    /// Records a new submission.
    ///
    /// An employee has at most one submission per period.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee already has a submission for the
    /// period.
    pub fn create_submission(
        &mut self,
        request: &CreateSubmissionRequest,
        now: &str,
    ) -> Result<RemoteSubmission, StoreError> {
        if let Some(existing) = self.submissions.iter().find(|s| {
            s.period_id.as_deref() == Some(request.period_id.as_str())
                && s.employee_id == request.employee_id
        }) {
            return Err(StoreError::SubmissionExists {
                submission_id: existing.id.clone(),
            });
        }

        let submitted: bool = request.status == SubmissionState::Submitted;
        let stored: RemoteSubmission = RemoteSubmission {
            id: new_id(),
            period_id: Some(request.period_id.clone()),
            employee_id: request.employee_id.clone(),
            status: Some(request.status),
            is_submitted: Some(submitted),
            submitted_at: submitted.then(|| now.to_string()),
            created_at: Some(now.to_string()),
        };
        self.submissions.push(stored.clone());
        Ok(stored)
    }

    /// Sets the status of a submission.
    ///
    /// Moving into `submitted` stamps the submission time.
    ///
    /// # Errors
    ///
    /// Returns an error if no submission has `submission_id`.
    pub fn update_submission(
        &mut self,
        submission_id: &str,
        status: SubmissionState,
        now: &str,
    ) -> Result<RemoteSubmission, StoreError> {
        let submission: &mut RemoteSubmission = self.submission_mut(submission_id)?;
        let submitted: bool = status == SubmissionState::Submitted;
        if submitted && submission.submitted_at.is_none() {
            submission.submitted_at = Some(now.to_string());
        }
        submission.status = Some(status);
        submission.is_submitted = Some(submitted);
        Ok(submission.clone())
    }

    /// Marks a submission as submitted now.
    ///
    /// # Errors
    ///
    /// Returns an error if no submission has `submission_id`.
    pub fn submit(
        &mut self,
        submission_id: &str,
        now: &str,
    ) -> Result<RemoteSubmission, StoreError> {
        let submission: &mut RemoteSubmission = self.submission_mut(submission_id)?;
        submission.status = Some(SubmissionState::Submitted);
        submission.is_submitted = Some(true);
        submission.submitted_at = Some(now.to_string());
        Ok(submission.clone())
    }

    /// Entries of `submission_id`, or of every submission, by work date.
    pub fn list_entries(&self, submission_id: Option<&str>) -> Vec<RemoteEntry> {
        let mut entries: Vec<RemoteEntry> = self
            .entries
            .iter()
            .filter(|e| submission_id.is_none_or(|id| e.submission_id.as_deref() == Some(id)))
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.work_date);
        entries
    }

    /// Adds one entry to an existing submission.
    ///
    /// # Errors
    ///
    /// Returns an error if the submission does not exist.
    pub fn create_entry(&mut self, request: &CreateEntryRequest) -> Result<RemoteEntry, StoreError> {
        if !self.submissions.iter().any(|s| s.id == request.submission_id) {
            return Err(StoreError::SubmissionNotFound(request.submission_id.clone()));
        }

        let stored: RemoteEntry = RemoteEntry {
            id: Some(new_id()),
            submission_id: Some(request.submission_id.clone()),
            work_date: request.work_date,
            start_time: request.start_time.map(|t| t.to_string()),
            end_time: request.end_time.map(|t| t.to_string()),
            is_holiday: request.is_holiday,
        };
        self.entries.push(stored.clone());
        Ok(stored)
    }

    /// Replaces the plan of one entry.
    ///
    /// # Errors
    ///
    /// Returns an error if no entry has `entry_id`.
    pub fn update_entry(
        &mut self,
        entry_id: &str,
        patch: EntryPatch,
    ) -> Result<RemoteEntry, StoreError> {
        let entry: &mut RemoteEntry = self
            .entries
            .iter_mut()
            .find(|e| e.id.as_deref() == Some(entry_id))
            .ok_or_else(|| StoreError::EntryNotFound(entry_id.to_string()))?;
        entry.start_time = patch.start_time.map(|t| t.to_string());
        entry.end_time = patch.end_time.map(|t| t.to_string());
        entry.is_holiday = patch.is_holiday;
        Ok(entry.clone())
    }

    /// Removes one entry.
    ///
    /// # Errors
    ///
    /// Returns an error if no entry has `entry_id`.
    pub fn delete_entry(&mut self, entry_id: &str) -> Result<RemoteEntry, StoreError> {
        let index: usize = self
            .entries
            .iter()
            .position(|e| e.id.as_deref() == Some(entry_id))
            .ok_or_else(|| StoreError::EntryNotFound(entry_id.to_string()))?;
        Ok(self.entries.remove(index))
    }

    fn submission_mut(&mut self, submission_id: &str) -> Result<&mut RemoteSubmission, StoreError> {
        self.submissions
            .iter_mut()
            .find(|s| s.id == submission_id)
            .ok_or_else(|| StoreError::SubmissionNotFound(submission_id.to_string()))
    }
}
