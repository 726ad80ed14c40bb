// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::{Arc, Mutex, MutexGuard};

use shift_desk_domain::{EmployeeId, IdentityToken, ShiftPeriod, StoreId, generate_periods};
use shift_desk_persistence::{DraftStore, PersistenceError};
use time::macros::datetime;
use time::{Date, Month, OffsetDateTime};

use crate::{
    CreateEntryRequest, CreateSubmissionRequest, EngineConfig, FixedClock, RemoteEntry,
    RemoteError, RemotePeriod, RemoteSubmission, ShiftBackend, ShiftService, StaticIdentity,
    SubmissionState, UpdateSubmissionRequest,
};

pub const SUBMITTED_AT: &str = "2025-06-12T09:00:00Z";

pub fn create_test_store() -> StoreId {
    StoreId::new("store-001").unwrap()
}

pub fn create_test_employee() -> EmployeeId {
    EmployeeId::new("emp-042").unwrap()
}

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}

pub fn june_tenth() -> OffsetDateTime {
    datetime!(2025-06-10 03:00 UTC)
}

pub fn generated_periods() -> Vec<ShiftPeriod> {
    generate_periods(
        date(2025, Month::June, 10),
        &create_test_store(),
        &create_test_employee(),
    )
    .unwrap()
    .to_vec()
}

pub fn remote_period(id: &str, start: Date, end: Date) -> RemotePeriod {
    RemotePeriod {
        id: id.to_string(),
        store_id: Some(String::from("store-001")),
        start_date: start,
        end_date: end,
        is_first_half: None,
        submission_deadline: None,
    }
}

pub fn remote_submission(
    id: &str,
    period_id: &IdentityToken,
    employee_id: &str,
    status: SubmissionState,
) -> RemoteSubmission {
    RemoteSubmission {
        id: id.to_string(),
        period_id: Some(period_id.to_string()),
        employee_id: employee_id.to_string(),
        status: Some(status),
        is_submitted: None,
        submitted_at: Some(String::from(SUBMITTED_AT)),
        created_at: Some(String::from("2025-06-11T08:00:00Z")),
    }
}

pub fn remote_entry(submission_id: &str, work_date: Date, start: &str, end: &str) -> RemoteEntry {
    RemoteEntry {
        id: None,
        submission_id: Some(submission_id.to_string()),
        work_date,
        start_time: Some(start.to_string()),
        end_time: Some(end.to_string()),
        is_holiday: false,
    }
}

/// Backend contents and failure switches.
#[derive(Debug, Default)]
pub struct FakeState {
    pub periods: Vec<RemotePeriod>,
    pub submissions: Vec<RemoteSubmission>,
    pub entries: Vec<RemoteEntry>,
    pub next_id: u64,
    /// Every call fails with a transport error.
    pub transport_down: bool,
    /// Period lookups are rejected.
    pub reject_periods: bool,
    /// Submission lookups fail with a transport error.
    pub submission_lookup_down: bool,
    /// Submission lookups are rejected.
    pub reject_submission_lookup: bool,
    /// Submission creates and updates are rejected.
    pub reject_submission_writes: bool,
    /// Entry writes for these dates are rejected.
    pub failing_entry_dates: Vec<Date>,
    pub calls: Vec<String>,
}

/// An in-memory backend with failure injection.
#[derive(Debug, Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with(configure: impl FnOnce(&mut FakeState)) -> Arc<Self> {
        let backend: Self = Self::default();
        configure(&mut backend.state.lock().unwrap());
        Arc::new(backend)
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    fn begin(&self, call: &str) -> Result<MutexGuard<'_, FakeState>, RemoteError> {
        let mut state: MutexGuard<'_, FakeState> = self.state();
        state.calls.push(call.to_string());
        if state.transport_down {
            return Err(transport(call));
        }
        Ok(state)
    }
}

fn transport(endpoint: &str) -> RemoteError {
    RemoteError::Transport {
        endpoint: endpoint.to_string(),
        reason: String::from("connection refused"),
    }
}

fn rejected(endpoint: &str) -> RemoteError {
    RemoteError::Rejected {
        endpoint: endpoint.to_string(),
        message: String::from("rejected by test"),
    }
}

#[async_trait::async_trait]
impl ShiftBackend for FakeBackend {
    async fn get_shift_periods(
        &self,
        _store_id: &StoreId,
    ) -> Result<Vec<RemotePeriod>, RemoteError> {
        let state = self.begin("get_shift_periods")?;
        if state.reject_periods {
            return Err(rejected("get_shift_periods"));
        }
        Ok(state.periods.clone())
    }

    async fn get_shift_submissions(
        &self,
        period_id: &IdentityToken,
    ) -> Result<Vec<RemoteSubmission>, RemoteError> {
        let state = self.begin("get_shift_submissions")?;
        if state.submission_lookup_down {
            return Err(transport("get_shift_submissions"));
        }
        if state.reject_submission_lookup {
            return Err(rejected("get_shift_submissions"));
        }
        Ok(state
            .submissions
            .iter()
            .filter(|s| s.period_id.as_deref() == Some(period_id.as_str()))
            .cloned()
            .collect())
    }

    async fn create_shift_submission(
        &self,
        request: &CreateSubmissionRequest,
    ) -> Result<RemoteSubmission, RemoteError> {
        let mut state = self.begin("create_shift_submission")?;
        if state.reject_submission_writes {
            return Err(rejected("create_shift_submission"));
        }
        state.next_id += 1;
        let submission: RemoteSubmission = RemoteSubmission {
            id: format!("sub-{}", state.next_id),
            period_id: Some(request.period_id.clone()),
            employee_id: request.employee_id.clone(),
            status: Some(request.status),
            is_submitted: None,
            submitted_at: Some(String::from(SUBMITTED_AT)),
            created_at: Some(String::from(SUBMITTED_AT)),
        };
        state.submissions.push(submission.clone());
        Ok(submission)
    }

    async fn update_shift_submission(
        &self,
        submission_id: &str,
        request: &UpdateSubmissionRequest,
    ) -> Result<RemoteSubmission, RemoteError> {
        let mut state = self.begin("update_shift_submission")?;
        if state.reject_submission_writes {
            return Err(rejected("update_shift_submission"));
        }
        let submission: &mut RemoteSubmission = state
            .submissions
            .iter_mut()
            .find(|s| s.id == submission_id)
            .ok_or_else(|| rejected("update_shift_submission"))?;
        submission.status = Some(request.status);
        Ok(submission.clone())
    }

    async fn get_shift_entries(
        &self,
        submission_id: &str,
    ) -> Result<Vec<RemoteEntry>, RemoteError> {
        let state = self.begin("get_shift_entries")?;
        Ok(state
            .entries
            .iter()
            .filter(|e| e.submission_id.as_deref() == Some(submission_id))
            .cloned()
            .collect())
    }

    async fn create_shift_entry(
        &self,
        request: &CreateEntryRequest,
    ) -> Result<RemoteEntry, RemoteError> {
        let mut state = self.begin("create_shift_entry")?;
        if state.failing_entry_dates.contains(&request.work_date) {
            return Err(rejected("create_shift_entry"));
        }
        let entry: RemoteEntry = RemoteEntry {
            id: Some(format!("entry-{}", state.entries.len() + 1)),
            submission_id: Some(request.submission_id.clone()),
            work_date: request.work_date,
            start_time: request.start_time.map(|t| t.to_string()),
            end_time: request.end_time.map(|t| t.to_string()),
            is_holiday: request.is_holiday,
        };
        state.entries.push(entry.clone());
        Ok(entry)
    }
}

/// A draft store that keeps everything in memory and counts saves.
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    pub saved: Arc<Mutex<Vec<ShiftPeriod>>>,
    pub saves: Arc<Mutex<usize>>,
}

impl MemoryDraftStore {
    pub fn with_drafts(drafts: Vec<ShiftPeriod>) -> Self {
        let store: Self = Self::default();
        *store.saved.lock().unwrap() = drafts;
        store
    }

    pub fn saved(&self) -> Vec<ShiftPeriod> {
        self.saved.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&mut self) -> Result<Vec<ShiftPeriod>, PersistenceError> {
        Ok(self.saved())
    }

    fn save(&mut self, drafts: &[ShiftPeriod]) -> Result<(), PersistenceError> {
        *self.saved.lock().unwrap() = drafts.to_vec();
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

pub type TestService = ShiftService<Arc<FakeBackend>, MemoryDraftStore>;

pub fn create_test_service(backend: &Arc<FakeBackend>, store: &MemoryDraftStore) -> TestService {
    create_service_at(backend, store, june_tenth(), EngineConfig::default())
}

pub fn create_service_at(
    backend: &Arc<FakeBackend>,
    store: &MemoryDraftStore,
    now: OffsetDateTime,
    config: EngineConfig,
) -> TestService {
    ShiftService::open(
        Arc::clone(backend),
        store.clone(),
        Arc::new(StaticIdentity::new(create_test_employee())),
        Arc::new(FixedClock(now)),
        config,
    )
    .unwrap()
}
