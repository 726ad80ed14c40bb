// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reconciliation of generated periods with backend state.
//!
//! Reconciliation never fails from the caller's point of view. Any
//! transport failure, or a missing current employee, yields the generated
//! periods unchanged and logs a warning.

use futures::future::try_join_all;
use shift_desk_domain::{
    DomainError, EmployeeId, HalfMonth, IdentityToken, ShiftPeriod, StoreId, blank_entries,
    is_first_half_start,
};
use tracing::{debug, info, warn};

use crate::backend::ShiftBackend;
use crate::error::{AuthError, RemoteError};
use crate::request_response::{RemoteEntry, RemotePeriod, RemoteSubmission};

/// Merges generated periods with what the backend knows.
pub struct RemoteSync<'a, B: ShiftBackend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: ShiftBackend + ?Sized> RemoteSync<'a, B> {
    /// Creates a reconciler over `backend`.
    pub const fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Produces the canonical periods for `store_id`.
    ///
    /// `generated` is the generator's output for the employee; `current_employee`
    /// selects whose submissions are overlaid.
    pub async fn reconcile(
        &self,
        store_id: &StoreId,
        employee_id: &EmployeeId,
        generated: Vec<ShiftPeriod>,
        current_employee: Result<EmployeeId, AuthError>,
    ) -> Vec<ShiftPeriod> {
        let current: EmployeeId = match current_employee {
            Ok(current) => current,
            Err(e) => {
                warn!("No current employee, using generated periods: {}", e);
                return generated;
            }
        };

        match self
            .try_reconcile(store_id, employee_id, &current, generated.clone())
            .await
        {
            Ok(periods) => {
                info!("Reconciled {} periods for store {}", periods.len(), store_id.value());
                periods
            }
            Err(e) => {
                warn!("Reconciliation failed, using generated periods: {}", e);
                generated
            }
        }
    }

    async fn try_reconcile(
        &self,
        store_id: &StoreId,
        employee_id: &EmployeeId,
        current: &EmployeeId,
        generated: Vec<ShiftPeriod>,
    ) -> Result<Vec<ShiftPeriod>, RemoteError> {
        let remote_periods: Vec<RemotePeriod> = match self.backend.get_shift_periods(store_id).await
        {
            Ok(periods) => periods,
            Err(e) if e.is_rejected() => {
                debug!("Backend rejected period lookup, treating as empty: {}", e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let mut working: Vec<ShiftPeriod> =
            merge_periods(generated, &remote_periods, store_id, employee_id);

        let lookups = working.iter().map(|period| self.submissions_for(&period.id));
        let submissions: Vec<Vec<RemoteSubmission>> = try_join_all(lookups).await?;

        for (period, candidates) in working.iter_mut().zip(submissions) {
            let Some(submission) = candidates
                .into_iter()
                .find(|s| s.employee_id == current.value())
            else {
                continue;
            };
            if !submission.counts_as_submitted() {
                continue;
            }

            let entries: Vec<RemoteEntry> =
                match self.backend.get_shift_entries(&submission.id).await {
                    Ok(entries) => entries,
                    Err(e) if e.is_rejected() => {
                        debug!("Backend rejected entry lookup for {}: {}", submission.id, e);
                        Vec::new()
                    }
                    Err(e) => return Err(e),
                };

            overlay_entries(period, &entries);
            period.is_submitted = true;
            period.submitted_at = submission.effective_submitted_at();
        }

        Ok(working)
    }

    async fn submissions_for(
        &self,
        period_id: &IdentityToken,
    ) -> Result<Vec<RemoteSubmission>, RemoteError> {
        match self.backend.get_shift_submissions(period_id).await {
            Ok(submissions) => Ok(submissions),
            Err(e) if e.is_rejected() => {
                debug!("Backend rejected submission lookup for {}: {}", period_id, e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

/// Folds backend periods into the generated set.
///
/// A generated period with the same date range adopts the backend id;
/// unmatched backend periods are materialised and appended. The first
/// backend period for a date range wins and later ones are skipped.
/// Backend periods whose id is not an identity token are dropped.
pub fn merge_periods(
    generated: Vec<ShiftPeriod>,
    remote: &[RemotePeriod],
    store_id: &StoreId,
    employee_id: &EmployeeId,
) -> Vec<ShiftPeriod> {
    // Parallel to `working`: whether the period already carries a backend id.
    let mut claimed: Vec<bool> = vec![false; generated.len()];
    let mut working: Vec<ShiftPeriod> = generated;

    for remote_period in remote {
        let Ok(id) = IdentityToken::parse(&remote_period.id) else {
            warn!(
                "Dropping backend period with invalid id: {}",
                remote_period.id
            );
            continue;
        };

        if let Some(index) = working.iter().position(|p| p.id == id) {
            claimed[index] = true;
            continue;
        }

        if let Some(index) = working.iter().position(|p| {
            p.start_date == remote_period.start_date && p.end_date == remote_period.end_date
        }) {
            if claimed[index] {
                debug!(
                    "Skipping backend period {} for an already matched range {}..{}",
                    remote_period.id, remote_period.start_date, remote_period.end_date
                );
            } else {
                working[index].id = id;
                claimed[index] = true;
            }
            continue;
        }

        match materialise(remote_period, id, store_id, employee_id) {
            Ok(period) => {
                working.push(period);
                claimed.push(true);
            }
            Err(e) => warn!(
                "Dropping backend period {} that cannot be materialised: {}",
                remote_period.id, e
            ),
        }
    }

    working
}

fn materialise(
    remote: &RemotePeriod,
    id: IdentityToken,
    store_id: &StoreId,
    employee_id: &EmployeeId,
) -> Result<ShiftPeriod, DomainError> {
    let submission_deadline = match remote.submission_deadline {
        Some(deadline) => deadline,
        None => HalfMonth::containing(remote.start_date).submission_deadline()?,
    };

    Ok(ShiftPeriod {
        id,
        store_id: store_id.clone(),
        employee_id: employee_id.clone(),
        start_date: remote.start_date,
        end_date: remote.end_date,
        is_first_half: is_first_half_start(remote.start_date),
        submission_deadline,
        is_submitted: false,
        submitted_at: None,
        entries: blank_entries(remote.start_date, remote.end_date)?,
    })
}

/// Replaces the plan of every day the backend has an entry for.
fn overlay_entries(period: &mut ShiftPeriod, remote: &[RemoteEntry]) {
    for remote_entry in remote {
        let entry = match remote_entry.to_entry() {
            Ok(entry) => entry,
            Err(e) => {
                warn!(
                    "Ignoring backend entry for {}: {}",
                    remote_entry.work_date, e
                );
                continue;
            }
        };
        if let Some(local) = period
            .entries
            .iter_mut()
            .find(|e| e.work_date == entry.work_date)
        {
            *local = entry;
        }
    }
}
