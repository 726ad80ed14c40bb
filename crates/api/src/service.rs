// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use shift_desk::{
    Command, CopyAlignment, CoreError, PositionalAlignment, ShiftState, apply_with,
};
use shift_desk_domain::{
    EmployeeId, IdentityToken, PeriodStatus, ShiftPeriod, ShiftTime, StoreId, SubmissionStatus,
    generate_periods, local_today, period_status, submission_status,
};
use shift_desk_persistence::DraftStore;
use time::{Date, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::auth::IdentityProvider;
use crate::backend::ShiftBackend;
use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::submission::{
    AbortReason, PushedSubmission, SubmissionCoordinator, SubmissionOutcome, check_draft,
};
use crate::sync::RemoteSync;

/// One employee session over the shift engine.
///
/// The service owns its state. Every mutation goes through an explicit
/// `Command`, and drafts are saved through the injected `DraftStore`
/// whenever a command changes them. Methods take `&mut self`, so callers
/// sharing a service must serialise access themselves.
pub struct ShiftService<B: ShiftBackend, S: DraftStore> {
    backend: B,
    store: S,
    identity: Arc<dyn IdentityProvider>,
    clock: Arc<dyn Clock>,
    alignment: Box<dyn CopyAlignment>,
    config: EngineConfig,
    state: ShiftState,
}

impl<B: ShiftBackend, S: DraftStore> ShiftService<B, S> {
    /// Opens a session, restoring persisted drafts.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft store cannot be read.
    pub fn open(
        backend: B,
        mut store: S,
        identity: Arc<dyn IdentityProvider>,
        clock: Arc<dyn Clock>,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        let drafts: Vec<ShiftPeriod> = store.load()?;
        info!("Opened shift session with {} drafts", drafts.len());

        Ok(Self {
            backend,
            store,
            identity,
            clock,
            alignment: Box::new(PositionalAlignment),
            config,
            state: ShiftState::with_drafts(drafts),
        })
    }

    /// Replaces the strategy used by `copy_previous_period`.
    #[must_use]
    pub fn with_alignment(mut self, alignment: Box<dyn CopyAlignment>) -> Self {
        self.alignment = alignment;
        self
    }

    /// Generates the owed periods and reconciles them with the backend.
    ///
    /// Reconciliation failures are not errors; the generated periods are
    /// installed instead.
    ///
    /// # Errors
    ///
    /// Returns an error only if today's date cannot be computed.
    pub async fn initialize(
        &mut self,
        store_id: &StoreId,
        employee_id: &EmployeeId,
    ) -> Result<(), EngineError> {
        let today: Date = self.today()?;
        info!(
            "Initializing periods for store {} employee {} on {}",
            store_id.value(),
            employee_id.value(),
            today
        );

        let generated: Vec<ShiftPeriod> = generate_periods(today, store_id, employee_id)?.to_vec();
        let periods: Vec<ShiftPeriod> = RemoteSync::new(&self.backend)
            .reconcile(
                store_id,
                employee_id,
                generated,
                self.identity.current_employee(),
            )
            .await;

        self.dispatch(Command::ReplaceCanonical { periods })
    }

    /// Points the selection at a period.
    ///
    /// # Errors
    ///
    /// Returns an error if no period or draft has that id.
    pub fn select_period(&mut self, period_id: &IdentityToken) -> Result<(), EngineError> {
        self.dispatch(Command::SelectPeriod {
            period_id: period_id.clone(),
        })
    }

    /// Selects a period for editing, continuing its draft when one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if no period or draft has that id.
    pub fn select_for_editing(&mut self, period_id: &IdentityToken) -> Result<(), EngineError> {
        if self.state.has_draft(period_id) {
            self.dispatch(Command::ResumeDraft {
                period_id: period_id.clone(),
            })
        } else {
            self.select_period(period_id)
        }
    }

    /// Sets the plan for one day of the selected period.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is selected, the date is outside the
    /// selected period, or drafts cannot be saved.
    pub fn update_shift(
        &mut self,
        work_date: Date,
        start_time: Option<ShiftTime>,
        end_time: Option<ShiftTime>,
        is_holiday: bool,
    ) -> Result<(), EngineError> {
        self.dispatch(Command::UpdateShift {
            work_date,
            start_time,
            end_time,
            is_holiday,
        })
    }

    /// Sets the same plan for several days of the selected period.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is selected, `work_dates` is empty, any
    /// date is outside the selected period, or drafts cannot be saved.
    pub fn bulk_update_shifts(
        &mut self,
        work_dates: Vec<Date>,
        start_time: Option<ShiftTime>,
        end_time: Option<ShiftTime>,
        is_holiday: bool,
    ) -> Result<(), EngineError> {
        self.dispatch(Command::BulkUpdateShifts {
            work_dates,
            start_time,
            end_time,
            is_holiday,
        })
    }

    /// Copies the preceding period's plan into the selected period.
    ///
    /// Returns `false`, changing nothing, when no earlier period exists.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is selected or drafts cannot be saved.
    pub fn copy_previous_period(&mut self) -> Result<bool, EngineError> {
        debug!("Copying previous period using {} alignment", self.alignment.name());
        match self.dispatch(Command::CopyPreviousPeriod) {
            Ok(()) => Ok(true),
            Err(EngineError::Core(CoreError::NoPreviousPeriod(period_id))) => {
                debug!("No period precedes {}", period_id);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Throws away the draft of a period.
    ///
    /// # Errors
    ///
    /// Returns an error if the period has no draft or drafts cannot be saved.
    pub fn discard_draft(&mut self, period_id: &IdentityToken) -> Result<(), EngineError> {
        self.dispatch(Command::DiscardDraft {
            period_id: period_id.clone(),
        })
    }

    /// Submits the draft of a period.
    ///
    /// Local state changes only once the backend has accepted the
    /// submission itself; entry failures after that point are reported in
    /// the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error only if drafts cannot be saved after a successful
    /// remote write. The in-memory state already reflects the submission.
    pub async fn submit_shift(
        &mut self,
        period_id: &IdentityToken,
    ) -> Result<SubmissionOutcome, EngineError> {
        let Some(draft) = self.state.find_draft(period_id).cloned() else {
            warn!("Submission of {} aborted: no draft", period_id);
            return Ok(SubmissionOutcome::Aborted {
                reason: AbortReason::NoDraft,
            });
        };

        if let Err(reason) = check_draft(&draft) {
            warn!("Submission of {} aborted: {}", period_id, reason);
            return Ok(SubmissionOutcome::Aborted { reason });
        }

        let employee_id: EmployeeId = match self.identity.current_employee() {
            Ok(employee_id) => employee_id,
            Err(e) => {
                warn!("Submission of {} aborted: {}", period_id, e);
                return Ok(SubmissionOutcome::Aborted {
                    reason: AbortReason::MissingIdentity {
                        message: e.to_string(),
                    },
                });
            }
        };

        let pushed: PushedSubmission = match SubmissionCoordinator::new(&self.backend)
            .push(&draft, &employee_id)
            .await
        {
            Ok(pushed) => pushed,
            Err(reason) => {
                warn!("Submission of {} aborted: {}", period_id, reason);
                return Ok(SubmissionOutcome::Aborted { reason });
            }
        };

        let submitted_at: OffsetDateTime = pushed.submitted_at.unwrap_or_else(|| self.clock.now());
        self.dispatch(Command::MarkSubmitted {
            period_id: period_id.clone(),
            submitted_at,
        })?;

        Ok(pushed.into_outcome())
    }

    /// The canonical periods, in reconciliation order.
    #[must_use]
    pub fn periods(&self) -> &[ShiftPeriod] {
        &self.state.periods
    }

    /// The current drafts.
    #[must_use]
    pub fn drafts(&self) -> &[ShiftPeriod] {
        &self.state.drafts
    }

    /// The selected period, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<&ShiftPeriod> {
        self.state.selected.as_ref()
    }

    /// The full in-memory state.
    #[must_use]
    pub const fn state(&self) -> &ShiftState {
        &self.state
    }

    /// Today's date in the configured timezone.
    ///
    /// # Errors
    ///
    /// Returns an error if the clock reading cannot be converted.
    pub fn today(&self) -> Result<Date, EngineError> {
        Ok(local_today(self.clock.now(), self.config.timezone)?)
    }

    /// Where `period` lies relative to today.
    ///
    /// # Errors
    ///
    /// Returns an error if today's date cannot be computed.
    pub fn period_status(&self, period: &ShiftPeriod) -> Result<PeriodStatus, EngineError> {
        Ok(period_status(period, self.today()?))
    }

    /// Whether `period` is submitted, pending or overdue as of today.
    ///
    /// # Errors
    ///
    /// Returns an error if today's date cannot be computed.
    pub fn submission_status(
        &self,
        period: &ShiftPeriod,
    ) -> Result<SubmissionStatus, EngineError> {
        Ok(submission_status(period, self.today()?))
    }

    fn dispatch(&mut self, command: Command) -> Result<(), EngineError> {
        let name: &'static str = command.name();
        let result = apply_with(&self.state, command, self.alignment.as_ref())?;
        self.state = result.new_state;

        if result.drafts_changed {
            self.store.save(&self.state.drafts)?;
        }

        debug!("Applied {}", name);
        Ok(())
    }
}
