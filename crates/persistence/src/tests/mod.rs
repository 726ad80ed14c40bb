// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use shift_desk_domain::{EmployeeId, ShiftPeriod, ShiftTime, StoreId, generate_periods};
use time::{Date, Month};

pub fn create_test_periods() -> Vec<ShiftPeriod> {
    let store: StoreId = StoreId::new("store-001").unwrap();
    let employee: EmployeeId = EmployeeId::new("emp-042").unwrap();
    let today: Date = Date::from_calendar_date(2025, Month::June, 10).unwrap();
    generate_periods(today, &store, &employee).unwrap().to_vec()
}

/// A draft of the June first half with the first day planned.
pub fn create_test_draft() -> ShiftPeriod {
    let mut draft: ShiftPeriod = create_test_periods().remove(0);
    draft.entries[0] = draft.entries[0].with_plan(
        Some(ShiftTime::parse("9").unwrap()),
        Some(ShiftTime::parse("17.5").unwrap()),
        false,
    );
    draft
}

/// A legacy draft keyed by its date rather than an identity token.
pub fn legacy_draft_json() -> serde_json::Value {
    let mut value: serde_json::Value = serde_json::to_value(create_test_periods().remove(1)).unwrap();
    value["id"] = serde_json::Value::String(String::from("2025-6-second"));
    value
}
