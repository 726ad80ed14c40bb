// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::alignment::{CopyAlignment, PositionalAlignment};
use crate::command::Command;
use crate::error::CoreError;
use crate::state::{ShiftState, TransitionResult};
use shift_desk_domain::{ShiftEntry, ShiftPeriod, ShiftTime};
use time::Date;

/// Applies a command to the current state using positional copy alignment.
///
/// # Errors
///
/// See [`apply_with`].
pub fn apply(state: &ShiftState, command: Command) -> Result<TransitionResult, CoreError> {
    apply_with(state, command, &PositionalAlignment)
}

/// Applies a command to the current state, producing a new state.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `alignment` - The strategy used by `CopyPreviousPeriod`
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state
/// * `Err(CoreError)` if the command is invalid; the caller's state is untouched
///
/// # Errors
///
/// Returns an error if:
/// - An edit is requested with no period selected
/// - The referenced period or draft does not exist
/// - A draft is resumed for a period that has none
/// - An edited date lies outside the selected period
/// - No period precedes the selected one when copying
pub fn apply_with(
    state: &ShiftState,
    command: Command,
    alignment: &dyn CopyAlignment,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::SelectPeriod { period_id } => {
            // Canonical periods take precedence over drafts
            let period: ShiftPeriod = state
                .find_period(&period_id)
                .or_else(|| state.find_draft(&period_id))
                .cloned()
                .ok_or(CoreError::PeriodNotFound(period_id))?;

            let mut new_state: ShiftState = state.clone();
            new_state.selected = Some(period);

            Ok(TransitionResult {
                new_state,
                drafts_changed: false,
            })
        }
        Command::ResumeDraft { period_id } => {
            let draft: ShiftPeriod = state
                .find_draft(&period_id)
                .cloned()
                .ok_or(CoreError::DraftNotFound(period_id))?;

            let mut new_state: ShiftState = state.clone();
            new_state.selected = Some(draft);

            Ok(TransitionResult {
                new_state,
                drafts_changed: false,
            })
        }
        Command::UpdateShift {
            work_date,
            start_time,
            end_time,
            is_holiday,
        } => edit_selected(state, &[work_date], start_time, end_time, is_holiday),
        Command::BulkUpdateShifts {
            work_dates,
            start_time,
            end_time,
            is_holiday,
        } => {
            if work_dates.is_empty() {
                return Err(CoreError::EmptyDateSelection);
            }
            edit_selected(state, &work_dates, start_time, end_time, is_holiday)
        }
        Command::CopyPreviousPeriod => {
            let selected: &ShiftPeriod =
                state.selected.as_ref().ok_or(CoreError::NoPeriodSelected)?;

            let previous: &ShiftPeriod = state
                .known_periods()
                .into_iter()
                .filter(|p| p.id != selected.id && p.start_date < selected.start_date)
                .max_by_key(|p| p.start_date)
                .ok_or_else(|| CoreError::NoPreviousPeriod(selected.id.clone()))?;

            let mut updated: ShiftPeriod = selected.reopened();
            updated.entries = alignment.align(previous, selected);

            let mut new_state: ShiftState = state.clone();
            new_state.upsert_draft(updated.clone());
            new_state.selected = Some(updated);

            Ok(TransitionResult {
                new_state,
                drafts_changed: true,
            })
        }
        Command::DiscardDraft { period_id } => {
            if !state.has_draft(&period_id) {
                return Err(CoreError::DraftNotFound(period_id));
            }

            let mut new_state: ShiftState = state.clone();
            new_state.drafts.retain(|d| d.id != period_id);
            if new_state
                .selected
                .as_ref()
                .is_some_and(|s| s.id == period_id)
            {
                new_state.selected = None;
            }

            Ok(TransitionResult {
                new_state,
                drafts_changed: true,
            })
        }
        Command::ReplaceCanonical { periods } => {
            let new_state: ShiftState = ShiftState {
                periods,
                drafts: state.drafts.clone(),
                selected: None,
            };

            Ok(TransitionResult {
                new_state,
                drafts_changed: false,
            })
        }
        Command::MarkSubmitted {
            period_id,
            submitted_at,
        } => {
            let draft: &ShiftPeriod = state
                .find_draft(&period_id)
                .ok_or_else(|| CoreError::DraftNotFound(period_id.clone()))?;

            let committed: ShiftPeriod = ShiftPeriod {
                is_submitted: true,
                submitted_at: Some(submitted_at),
                ..draft.clone()
            };

            let mut new_state: ShiftState = state.clone();
            if let Some(existing) = new_state.periods.iter_mut().find(|p| p.id == period_id) {
                *existing = committed;
            } else {
                new_state.periods.push(committed);
            }
            new_state.drafts.retain(|d| d.id != period_id);
            new_state.selected = None;

            Ok(TransitionResult {
                new_state,
                drafts_changed: true,
            })
        }
    }
}

/// Applies one plan to the given dates of the selected period and stores
/// the result as its draft.
fn edit_selected(
    state: &ShiftState,
    work_dates: &[Date],
    start_time: Option<ShiftTime>,
    end_time: Option<ShiftTime>,
    is_holiday: bool,
) -> Result<TransitionResult, CoreError> {
    let selected: &ShiftPeriod = state.selected.as_ref().ok_or(CoreError::NoPeriodSelected)?;

    if let Some(outside) = work_dates
        .iter()
        .find(|d| selected.entry_for(**d).is_none())
    {
        return Err(CoreError::DateOutsidePeriod {
            period_id: selected.id.clone(),
            date: *outside,
        });
    }

    let mut updated: ShiftPeriod = selected.reopened();
    updated.entries = selected
        .entries
        .iter()
        .map(|entry: &ShiftEntry| {
            if work_dates.contains(&entry.work_date) {
                entry.with_plan(start_time, end_time, is_holiday)
            } else {
                entry.clone()
            }
        })
        .collect();

    let mut new_state: ShiftState = state.clone();
    new_state.upsert_draft(updated.clone());
    new_state.selected = Some(updated);

    Ok(TransitionResult {
        new_state,
        drafts_changed: true,
    })
}
