// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal_macros::dec;
use shift_pay_domain::{Employer, GeoPoint, PayrollSettings, PeriodLengthType, Shift, ShiftStatus};
use shift_pay_persistence::{SqliteConnection, initialize_database, insert_employer, insert_shift};
use time::OffsetDateTime;
use time::macros::datetime;

/// Anchor used across payroll tests: 2026-01-07 is a Wednesday.
pub const ANCHOR: OffsetDateTime = datetime!(2026-01-07 9:00 UTC);

pub fn setup_database() -> SqliteConnection {
    initialize_database(":memory:").unwrap()
}

/// An employer with weekly payroll anchored on Wednesday 09:00 UTC.
pub fn setup_employer(conn: &mut SqliteConnection) -> i64 {
    let employer: Employer = Employer::new(
        datetime!(2026-03-13 14:30 UTC),
        PayrollSettings::new(Some(ANCHOR), 7, PeriodLengthType::Days),
    );
    insert_employer(conn, &employer).unwrap()
}

/// A filled shift 09:00-17:00 with workers 100 and 101 rostered.
pub fn setup_shift(
    conn: &mut SqliteConnection,
    employer_id: i64,
    starting_at: OffsetDateTime,
    delta_minutes: Option<i64>,
    delay_minutes: Option<i64>,
    venue: GeoPoint,
) -> i64 {
    let mut shift: Shift = Shift::new(
        employer_id,
        starting_at,
        starting_at + time::Duration::hours(8),
        delta_minutes,
        delay_minutes,
        dec!(20),
        venue,
        vec![100, 101],
    )
    .unwrap();
    shift.status = ShiftStatus::Filled;
    insert_shift(conn, &shift).unwrap()
}
