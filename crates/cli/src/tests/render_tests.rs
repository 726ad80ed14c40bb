// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shift_desk_api::{AbortReason, SubmissionOutcome};
use shift_desk_domain::{PeriodStatus, ShiftEntry, ShiftPeriod, ShiftTime, SubmissionStatus};
use time::macros::date;

use super::june_periods;
use crate::render::{render_entry, render_outcome, render_period};

#[test]
fn test_period_line_shows_range_deadline_and_statuses() {
    let period: ShiftPeriod = june_periods().remove(0);

    let line: String = render_period(
        &period,
        true,
        PeriodStatus::Current,
        SubmissionStatus::Overdue,
    );

    assert!(line.starts_with(period.id.as_str()));
    assert!(line.contains("2025-06-01..2025-06-15"));
    assert!(line.contains("due 2025-05-20"));
    assert!(line.contains("current"));
    assert!(line.contains("overdue"));
    assert!(line.ends_with("[draft]"));
}

#[test]
fn test_entry_lines() {
    let blank: ShiftEntry = ShiftEntry::blank(date!(2025 - 06 - 02));
    let planned: ShiftEntry = blank.with_plan(
        Some(ShiftTime::parse("9").unwrap()),
        Some(ShiftTime::parse("17.5").unwrap()),
        false,
    );
    let holiday: ShiftEntry = blank.with_plan(None, None, true);

    assert_eq!(render_entry(&blank), "2025-06-02 Mon  -");
    assert_eq!(render_entry(&planned), "2025-06-02 Mon  9-17.5");
    assert_eq!(render_entry(&holiday), "2025-06-02 Mon  holiday");
}

#[test]
fn test_outcome_lines() {
    let period_id = june_periods().remove(0).id;

    let partial: String = render_outcome(
        &period_id,
        &SubmissionOutcome::PartialFailure {
            submission_id: String::from("sub-1"),
            failed_dates: vec![date!(2025 - 06 - 07)],
        },
    );
    let aborted: String = render_outcome(
        &period_id,
        &SubmissionOutcome::Aborted {
            reason: AbortReason::SubmissionLookupFailed {
                message: String::from("connection refused"),
            },
        },
    );

    assert!(partial.contains("1 entries failed: 2025-06-07"));
    assert!(aborted.contains("aborted"));
    assert!(aborted.contains("connection refused"));
}

#[test]
fn test_incomplete_draft_lists_missing_days() {
    let period_id = june_periods().remove(0).id;

    let line: String = render_outcome(
        &period_id,
        &SubmissionOutcome::Aborted {
            reason: AbortReason::IncompleteDraft {
                dates: vec![date!(2025 - 06 - 03), date!(2025 - 06 - 04)],
            },
        },
    );

    assert!(line.ends_with("Days without a start or end time: 2025-06-03, 2025-06-04"));
}
