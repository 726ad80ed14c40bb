// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text rendering of periods, entries and outcomes.

use shift_desk_api::{AbortReason, SubmissionOutcome};
use shift_desk_domain::{
    IdentityToken, PeriodStatus, ShiftEntry, ShiftPeriod, ShiftTime, SubmissionStatus,
};

/// One line per period: id, range, deadline, statuses and a draft marker.
pub fn render_period(
    period: &ShiftPeriod,
    has_draft: bool,
    period_status: PeriodStatus,
    submission_status: SubmissionStatus,
) -> String {
    let draft_marker: &str = if has_draft { "  [draft]" } else { "" };
    format!(
        "{}  {}..{}  due {}  {:<8}  {:<9}{draft_marker}",
        period.id,
        period.start_date,
        period.end_date,
        period.submission_deadline,
        period_status.as_str(),
        submission_status.as_str(),
    )
}

fn render_time(time: Option<ShiftTime>) -> String {
    time.map_or_else(|| String::from("-"), |t| t.to_string())
}

/// One line per day.
pub fn render_entry(entry: &ShiftEntry) -> String {
    let weekday: String = entry.work_date.weekday().to_string();
    let plan: String = if entry.is_holiday {
        String::from("holiday")
    } else if entry.is_blank() {
        String::from("-")
    } else {
        format!(
            "{}-{}",
            render_time(entry.start_time),
            render_time(entry.end_time)
        )
    };
    let short: &str = weekday.get(..3).unwrap_or(&weekday);
    format!("{} {short}  {plan}", entry.work_date)
}

pub fn render_outcome(period_id: &IdentityToken, outcome: &SubmissionOutcome) -> String {
    match outcome {
        SubmissionOutcome::FullSuccess { submission_id } => {
            format!("Submitted {period_id} as {submission_id}")
        }
        SubmissionOutcome::PartialFailure {
            submission_id,
            failed_dates,
        } => {
            let dates: Vec<String> = failed_dates.iter().map(ToString::to_string).collect();
            format!(
                "Submitted {period_id} as {submission_id}, but {} entries failed: {}",
                failed_dates.len(),
                dates.join(", ")
            )
        }
        SubmissionOutcome::Aborted {
            reason: AbortReason::NoDraft,
        } => format!("Nothing to submit: {period_id} has no draft"),
        SubmissionOutcome::Aborted { reason } => {
            format!("Submission of {period_id} aborted: {reason}")
        }
    }
}
