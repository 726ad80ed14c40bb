// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::date;
use crate::{DomainError, local_today, parse_iso_date, parse_timezone};
use time::Month;
use time::macros::datetime;

#[test]
fn test_local_today_follows_store_timezone() {
    // 2025-06-09 16:30 UTC is already June 10 in Tokyo (UTC+9)
    let now = datetime!(2025-06-09 16:30 UTC);

    let tokyo = parse_timezone("Asia/Tokyo").unwrap();
    let utc = parse_timezone("UTC").unwrap();

    assert_eq!(local_today(now, tokyo).unwrap(), date(2025, Month::June, 10));
    assert_eq!(local_today(now, utc).unwrap(), date(2025, Month::June, 9));
}

#[test]
fn test_unknown_timezone_is_rejected() {
    assert_eq!(
        parse_timezone("Mars/Olympus"),
        Err(DomainError::InvalidTimezone(String::from("Mars/Olympus")))
    );
}

#[test]
fn test_parse_iso_date() {
    assert_eq!(parse_iso_date("2025-06-10").unwrap(), date(2025, Month::June, 10));
    assert!(matches!(
        parse_iso_date("2025-13-01"),
        Err(DomainError::DateParseError { .. })
    ));
}
