// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ShiftState;
use shift_desk_domain::{EmployeeId, ShiftPeriod, ShiftTime, StoreId, generate_periods};
use time::{Date, Month};

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}

pub fn shift_time(value: &str) -> ShiftTime {
    ShiftTime::parse(value).unwrap()
}

/// The three periods owed on 2025-06-10.
pub fn june_periods() -> Vec<ShiftPeriod> {
    let store: StoreId = StoreId::new("store-001").unwrap();
    let employee: EmployeeId = EmployeeId::new("emp-042").unwrap();
    generate_periods(date(2025, Month::June, 10), &store, &employee)
        .unwrap()
        .to_vec()
}

pub fn june_state() -> ShiftState {
    ShiftState {
        periods: june_periods(),
        drafts: Vec::new(),
        selected: None,
    }
}

/// A state with the given canonical period index selected.
pub fn selected_state(index: usize) -> ShiftState {
    let mut state: ShiftState = june_state();
    state.selected = Some(state.periods[index].clone());
    state
}
