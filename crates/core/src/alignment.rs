// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Strategies for copying a previous period's plan into the current one.
//!
//! Callers only ever see `CopyAlignment`; the default is
//! `PositionalAlignment`. A 15-day period copied onto a 16-day period
//! leaves the 16th entry untouched, and weekdays are not realigned.

use shift_desk_domain::{ShiftEntry, ShiftPeriod};

/// Decides which entry of the previous period feeds each entry of the current one.
pub trait CopyAlignment: Send + Sync {
    /// Returns the strategy name used in logs.
    fn name(&self) -> &'static str;

    /// Produces the current period's new entries.
    ///
    /// The result must contain exactly one entry per entry of `current`, with
    /// each `work_date` unchanged.
    fn align(&self, previous: &ShiftPeriod, current: &ShiftPeriod) -> Vec<ShiftEntry>;
}

/// Copies start, end and holiday flag by array index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionalAlignment;

impl CopyAlignment for PositionalAlignment {
    fn name(&self) -> &'static str {
        "positional"
    }

    fn align(&self, previous: &ShiftPeriod, current: &ShiftPeriod) -> Vec<ShiftEntry> {
        current
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| match previous.entries.get(index) {
                Some(source) => {
                    entry.with_plan(source.start_time, source.end_time, source.is_holiday)
                }
                None => entry.clone(),
            })
            .collect()
    }
}
