// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod render_tests;

use shift_desk_domain::{EmployeeId, ShiftPeriod, StoreId, generate_periods};
use time::macros::date;

pub fn june_periods() -> Vec<ShiftPeriod> {
    generate_periods(
        date!(2025 - 06 - 10),
        &StoreId::new("store-001").unwrap(),
        &EmployeeId::new("emp-042").unwrap(),
    )
    .unwrap()
    .to_vec()
}
