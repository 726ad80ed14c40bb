// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{EmployeeId, StoreId};
use time::{Date, Month};

pub fn create_test_store() -> StoreId {
    StoreId::new("store-001").unwrap()
}

pub fn create_test_employee() -> EmployeeId {
    EmployeeId::new("emp-042").unwrap()
}

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}
