// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use shift_desk_domain::{
    IdentityToken, PeriodStatus, ShiftPeriod, ShiftTime, SubmissionStatus,
};
use shift_desk::CopyAlignment;
use shift_desk_domain::ShiftEntry;
use time::macros::datetime;
use time::{Date, Month};

use crate::tests::helpers::{
    FakeBackend, MemoryDraftStore, TestService, create_service_at, create_test_employee,
    create_test_service, create_test_store, date, generated_periods, remote_entry,
    remote_submission,
};
use crate::{AbortReason, EngineConfig, EngineError, SubmissionOutcome, SubmissionState};

async fn initialized(backend: &Arc<FakeBackend>, store: &MemoryDraftStore) -> TestService {
    let mut service: TestService = create_test_service(backend, store);
    service
        .initialize(&create_test_store(), &create_test_employee())
        .await
        .unwrap();
    service
}

fn nine() -> Option<ShiftTime> {
    Some(ShiftTime::parse("9").unwrap())
}

fn five_thirty() -> Option<ShiftTime> {
    Some(ShiftTime::parse("17.5").unwrap())
}

#[tokio::test]
async fn test_open_restores_persisted_drafts() {
    let backend: Arc<FakeBackend> = FakeBackend::new();
    let draft: ShiftPeriod = generated_periods().remove(1);
    let store: MemoryDraftStore = MemoryDraftStore::with_drafts(vec![draft.clone()]);

    let service: TestService = create_test_service(&backend, &store);

    assert_eq!(service.drafts(), &[draft]);
    assert!(service.periods().is_empty());
    assert!(service.selected().is_none());
}

#[tokio::test]
async fn test_initialize_mid_june_derives_statuses() {
    let backend: Arc<FakeBackend> = FakeBackend::new();
    let store: MemoryDraftStore = MemoryDraftStore::default();

    let service: TestService = initialized(&backend, &store).await;

    let periods: &[ShiftPeriod] = service.periods();
    assert_eq!(periods.len(), 3);

    let statuses: Vec<(PeriodStatus, SubmissionStatus)> = periods
        .iter()
        .map(|p| {
            (
                service.period_status(p).unwrap(),
                service.submission_status(p).unwrap(),
            )
        })
        .collect();
    assert_eq!(
        statuses,
        vec![
            (PeriodStatus::Current, SubmissionStatus::Overdue),
            (PeriodStatus::Upcoming, SubmissionStatus::Overdue),
            (PeriodStatus::Upcoming, SubmissionStatus::Draft),
        ]
    );
    assert_eq!(periods[2].start_date, date(2025, Month::July, 1));
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn test_today_follows_store_timezone() {
    let backend: Arc<FakeBackend> = FakeBackend::new();
    let store: MemoryDraftStore = MemoryDraftStore::default();
    let now = datetime!(2025-06-30 16:00 UTC);

    let utc: TestService = create_service_at(&backend, &store, now, EngineConfig::default());
    let mut tokyo: TestService = create_service_at(
        &backend,
        &store,
        now,
        EngineConfig::with_timezone("Asia/Tokyo").unwrap(),
    );

    assert_eq!(utc.today().unwrap(), date(2025, Month::June, 30));
    assert_eq!(tokyo.today().unwrap(), date(2025, Month::July, 1));

    tokyo
        .initialize(&create_test_store(), &create_test_employee())
        .await
        .unwrap();
    assert_eq!(tokyo.periods()[0].start_date, date(2025, Month::July, 1));
    assert_eq!(tokyo.periods()[2].start_date, date(2025, Month::August, 1));
}

#[tokio::test]
async fn test_edits_are_saved_as_drafts() {
    let backend: Arc<FakeBackend> = FakeBackend::new();
    let store: MemoryDraftStore = MemoryDraftStore::default();
    let mut service: TestService = initialized(&backend, &store).await;
    let period_id: IdentityToken = service.periods()[0].id.clone();

    service.select_period(&period_id).unwrap();
    assert_eq!(store.save_count(), 0);

    service
        .update_shift(date(2025, Month::June, 2), nine(), five_thirty(), false)
        .unwrap();
    service
        .bulk_update_shifts(
            vec![date(2025, Month::June, 3), date(2025, Month::June, 4)],
            nine(),
            five_thirty(),
            false,
        )
        .unwrap();

    assert_eq!(store.save_count(), 2);
    let saved: Vec<ShiftPeriod> = store.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, period_id);
    assert_eq!(saved[0].entries[1].start_time, nine());
    assert_eq!(saved[0].entries[3].end_time, five_thirty());
    assert!(saved[0].entries[0].is_blank());
    assert!(service.periods()[0].entries[1].is_blank());
}

#[tokio::test]
async fn test_edit_outside_selection_is_rejected_without_saving() {
    let backend: Arc<FakeBackend> = FakeBackend::new();
    let store: MemoryDraftStore = MemoryDraftStore::default();
    let mut service: TestService = initialized(&backend, &store).await;
    let period_id: IdentityToken = service.periods()[0].id.clone();
    service.select_period(&period_id).unwrap();

    let result = service.update_shift(date(2025, Month::June, 20), nine(), None, false);

    assert!(matches!(result, Err(EngineError::Core(_))));
    assert_eq!(store.save_count(), 0);
    assert!(service.drafts().is_empty());
}

#[tokio::test]
async fn test_discard_draft_saves_remaining_drafts() {
    let backend: Arc<FakeBackend> = FakeBackend::new();
    let store: MemoryDraftStore = MemoryDraftStore::default();
    let mut service: TestService = initialized(&backend, &store).await;
    let period_id: IdentityToken = service.periods()[1].id.clone();
    service.select_period(&period_id).unwrap();
    service
        .update_shift(date(2025, Month::June, 16), nine(), five_thirty(), false)
        .unwrap();

    service.discard_draft(&period_id).unwrap();

    assert!(service.drafts().is_empty());
    assert!(service.selected().is_none());
    assert!(store.saved().is_empty());
    assert_eq!(store.save_count(), 2);
}

#[tokio::test]
async fn test_copy_previous_period_fills_selected_draft() {
    let backend: Arc<FakeBackend> = FakeBackend::new();
    let store: MemoryDraftStore = MemoryDraftStore::default();
    let mut service: TestService = initialized(&backend, &store).await;
    let first: IdentityToken = service.periods()[0].id.clone();
    let second: IdentityToken = service.periods()[1].id.clone();

    service.select_period(&first).unwrap();
    service
        .update_shift(date(2025, Month::June, 1), nine(), five_thirty(), false)
        .unwrap();
    service.select_period(&second).unwrap();

    let copied: bool = service.copy_previous_period().unwrap();

    assert!(copied);
    let draft: &ShiftPeriod = service.state().find_draft(&second).unwrap();
    assert_eq!(draft.entries[0].work_date, date(2025, Month::June, 16));
    assert_eq!(draft.entries[0].start_time, nine());
    assert_eq!(store.saved().len(), 2);
}

#[tokio::test]
async fn test_copy_without_earlier_period_after_editing_submitted_period() {
    let first_half: IdentityToken = generated_periods()[0].id.clone();
    let backend: Arc<FakeBackend> = FakeBackend::with(|s| {
        s.submissions.push(remote_submission(
            "sub-1",
            &first_half,
            "emp-042",
            SubmissionState::Submitted,
        ));
        s.entries.push(remote_entry(
            "sub-1",
            date(2025, Month::June, 1),
            "9",
            "17",
        ));
    });
    let store: MemoryDraftStore = MemoryDraftStore::default();
    let mut service: TestService = initialized(&backend, &store).await;
    assert!(service.periods()[0].is_submitted);

    service.select_period(&first_half).unwrap();
    service
        .update_shift(date(2025, Month::June, 2), nine(), five_thirty(), false)
        .unwrap();
    let draft: ShiftPeriod = service.state().find_draft(&first_half).unwrap().clone();
    assert!(!draft.is_submitted);
    assert!(draft.submitted_at.is_none());
    assert_eq!(draft.entries[0].start_time, nine());
    let saves_before: usize = store.save_count();

    let copied: bool = service.copy_previous_period().unwrap();

    assert!(!copied);
    assert_eq!(service.state().find_draft(&first_half), Some(&draft));
    assert_eq!(store.save_count(), saves_before);
    assert!(service.periods()[0].is_submitted);
}

#[tokio::test]
async fn test_initialize_twice_is_stable() {
    let second_half: IdentityToken = generated_periods()[1].id.clone();
    let backend: Arc<FakeBackend> = FakeBackend::with(|s| {
        s.submissions.push(remote_submission(
            "sub-2",
            &second_half,
            "emp-042",
            SubmissionState::Submitted,
        ));
    });
    let store: MemoryDraftStore = MemoryDraftStore::default();
    let mut service: TestService = initialized(&backend, &store).await;
    let first: Vec<ShiftPeriod> = service.periods().to_vec();

    service
        .initialize(&create_test_store(), &create_test_employee())
        .await
        .unwrap();

    assert_eq!(service.periods(), first.as_slice());
}

#[tokio::test]
async fn test_drafts_survive_initialize() {
    let backend: Arc<FakeBackend> = FakeBackend::new();
    let store: MemoryDraftStore = MemoryDraftStore::default();
    let mut service: TestService = initialized(&backend, &store).await;
    let period_id: IdentityToken = service.periods()[2].id.clone();
    service.select_period(&period_id).unwrap();
    service
        .update_shift(date(2025, Month::July, 4), None, None, true)
        .unwrap();

    service
        .initialize(&create_test_store(), &create_test_employee())
        .await
        .unwrap();

    assert_eq!(service.drafts().len(), 1);
    assert!(service.drafts()[0].entries[3].is_holiday);
    assert!(service.selected().is_none());
}

#[tokio::test]
async fn test_initialize_survives_backend_outage() {
    let backend: Arc<FakeBackend> = FakeBackend::with(|s| s.transport_down = true);
    let store: MemoryDraftStore = MemoryDraftStore::default();

    let service: TestService = initialized(&backend, &store).await;

    assert_eq!(service.periods(), generated_periods().as_slice());
}

#[tokio::test]
async fn test_submitted_period_reads_as_submitted() {
    let backend: Arc<FakeBackend> = FakeBackend::new();
    let store: MemoryDraftStore = MemoryDraftStore::default();
    let mut service: TestService = initialized(&backend, &store).await;
    let period_id: IdentityToken = service.periods()[2].id.clone();
    let days: Vec<Date> = service.periods()[2]
        .entries
        .iter()
        .map(|e| e.work_date)
        .collect();
    service.select_period(&period_id).unwrap();
    service
        .bulk_update_shifts(days, nine(), five_thirty(), false)
        .unwrap();

    let outcome: SubmissionOutcome = service.submit_shift(&period_id).await.unwrap();

    assert!(outcome.is_submitted());
    let committed: &ShiftPeriod = service.state().find_period(&period_id).unwrap();
    assert_eq!(
        service.submission_status(committed).unwrap(),
        SubmissionStatus::Submitted
    );
    assert!(store.saved().is_empty());
}

/// Copies each day from the first earlier day on the same weekday.
struct WeekdayAlignment;

impl CopyAlignment for WeekdayAlignment {
    fn name(&self) -> &'static str {
        "weekday"
    }

    fn align(&self, previous: &ShiftPeriod, current: &ShiftPeriod) -> Vec<ShiftEntry> {
        current
            .entries
            .iter()
            .map(|entry| {
                previous
                    .entries
                    .iter()
                    .find(|p| p.work_date.weekday() == entry.work_date.weekday())
                    .map_or_else(
                        || entry.clone(),
                        |p| entry.with_plan(p.start_time, p.end_time, p.is_holiday),
                    )
            })
            .collect()
    }
}

#[tokio::test]
async fn test_copy_previous_period_uses_installed_alignment() {
    let backend: Arc<FakeBackend> = FakeBackend::new();
    let store: MemoryDraftStore = MemoryDraftStore::default();
    let mut service: TestService =
        create_test_service(&backend, &store).with_alignment(Box::new(WeekdayAlignment));
    service
        .initialize(&create_test_store(), &create_test_employee())
        .await
        .unwrap();
    let first: IdentityToken = service.periods()[0].id.clone();
    let second: IdentityToken = service.periods()[1].id.clone();
    service.select_period(&first).unwrap();
    service
        .update_shift(date(2025, Month::June, 2), nine(), five_thirty(), false)
        .unwrap();
    service.select_period(&second).unwrap();

    let copied: bool = service.copy_previous_period().unwrap();

    assert!(copied);
    let draft: &ShiftPeriod = service.state().find_draft(&second).unwrap();
    // June 2 and June 16 are both Mondays
    assert_eq!(draft.entries[0].work_date, date(2025, Month::June, 16));
    assert_eq!(draft.entries[0].start_time, nine());
    assert_eq!(draft.entries[0].end_time, five_thirty());
    assert!(draft.entries[1].is_blank());
    assert_eq!(draft.entries[7].start_time, nine());
}

#[tokio::test]
async fn test_edits_accumulate_across_sessions() {
    let backend: Arc<FakeBackend> = FakeBackend::new();
    let store: MemoryDraftStore = MemoryDraftStore::default();
    let mut first: TestService = initialized(&backend, &store).await;
    let period_id: IdentityToken = first.periods()[0].id.clone();
    first.select_for_editing(&period_id).unwrap();
    first
        .update_shift(date(2025, Month::June, 2), nine(), five_thirty(), false)
        .unwrap();

    let mut second: TestService = initialized(&backend, &store).await;
    second.select_for_editing(&period_id).unwrap();
    second
        .update_shift(date(2025, Month::June, 3), nine(), five_thirty(), false)
        .unwrap();

    let saved: Vec<ShiftPeriod> = store.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].entries[1].start_time, nine());
    assert_eq!(saved[0].entries[2].start_time, nine());
}

#[tokio::test]
async fn test_select_for_editing_without_draft_uses_canonical() {
    let backend: Arc<FakeBackend> = FakeBackend::new();
    let store: MemoryDraftStore = MemoryDraftStore::default();
    let mut service: TestService = initialized(&backend, &store).await;
    let period_id: IdentityToken = service.periods()[1].id.clone();

    service.select_for_editing(&period_id).unwrap();

    assert_eq!(service.selected(), Some(&service.periods()[1]));
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn test_submit_refuses_days_without_times() {
    let backend: Arc<FakeBackend> = FakeBackend::new();
    let store: MemoryDraftStore = MemoryDraftStore::default();
    let mut service: TestService = initialized(&backend, &store).await;
    let period_id: IdentityToken = service.periods()[0].id.clone();
    service.select_period(&period_id).unwrap();
    service
        .update_shift(date(2025, Month::June, 2), nine(), five_thirty(), false)
        .unwrap();
    service
        .update_shift(date(2025, Month::June, 3), nine(), None, false)
        .unwrap();
    let calls_before: usize = backend.state().calls.len();

    let outcome: SubmissionOutcome = service.submit_shift(&period_id).await.unwrap();

    let dates: Vec<Date> = match outcome {
        SubmissionOutcome::Aborted {
            reason: AbortReason::IncompleteDraft { dates },
        } => dates,
        other => panic!("expected an incomplete draft, got {other:?}"),
    };
    assert_eq!(dates.len(), 14);
    assert!(!dates.contains(&date(2025, Month::June, 2)));
    assert!(dates.contains(&date(2025, Month::June, 3)));
    assert_eq!(backend.state().calls.len(), calls_before);
    assert!(service.state().has_draft(&period_id));
}

#[tokio::test]
async fn test_submit_refuses_days_ending_before_they_start() {
    let backend: Arc<FakeBackend> = FakeBackend::new();
    let store: MemoryDraftStore = MemoryDraftStore::default();
    let mut service: TestService = initialized(&backend, &store).await;
    let period_id: IdentityToken = service.periods()[0].id.clone();
    let days: Vec<Date> = service.periods()[0]
        .entries
        .iter()
        .map(|e| e.work_date)
        .collect();
    service.select_period(&period_id).unwrap();
    service
        .bulk_update_shifts(days, nine(), five_thirty(), false)
        .unwrap();
    service
        .update_shift(date(2025, Month::June, 4), five_thirty(), nine(), false)
        .unwrap();
    service
        .update_shift(date(2025, Month::June, 5), nine(), nine(), false)
        .unwrap();
    service
        .update_shift(date(2025, Month::June, 6), None, None, true)
        .unwrap();
    let calls_before: usize = backend.state().calls.len();

    let outcome: SubmissionOutcome = service.submit_shift(&period_id).await.unwrap();

    assert_eq!(
        outcome,
        SubmissionOutcome::Aborted {
            reason: AbortReason::InvalidTimeRange {
                dates: vec![date(2025, Month::June, 4), date(2025, Month::June, 5)],
            },
        }
    );
    assert_eq!(backend.state().calls.len(), calls_before);
    assert!(!service.state().find_period(&period_id).unwrap().is_submitted);
}
