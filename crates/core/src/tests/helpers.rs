// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::EngineState;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shift_pay_audit::{Actor, Cause};
use shift_pay_domain::{
    AttendanceRecord, Employer, GeoPoint, PayrollSettings, PeriodLengthType, Shift, ShiftStatus,
};
use time::OffsetDateTime;
use time::macros::datetime;

/// Anchor used across generator tests: 2026-01-07 is a Wednesday.
pub const ANCHOR: OffsetDateTime = datetime!(2026-01-07 9:00 UTC);

pub fn create_test_actor() -> Actor {
    Actor::scheduler()
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("tick-1"), String::from("Scheduled run"))
}

/// An employer with weekly payroll anchored on Wednesday 09:00 UTC.
pub fn create_test_employer(created_at: OffsetDateTime) -> Employer {
    let mut employer: Employer = Employer::new(
        created_at,
        PayrollSettings::new(Some(ANCHOR), 7, PeriodLengthType::Days),
    );
    employer.employer_id = Some(1);
    employer
}

pub fn create_test_state(created_at: OffsetDateTime) -> EngineState {
    EngineState::new(create_test_employer(created_at))
}

/// A shift on the roster of workers 100 and 101, 09:00-17:00.
pub fn add_shift(
    state: &mut EngineState,
    shift_id: i64,
    starting_at: OffsetDateTime,
    delay_minutes: Option<i64>,
    rate: Decimal,
) {
    let mut shift: Shift = Shift::new(
        1,
        starting_at,
        starting_at + time::Duration::hours(8),
        Some(15),
        delay_minutes,
        rate,
        GeoPoint::new(0.0, 0.0),
        vec![100, 101],
    )
    .unwrap();
    shift.shift_id = Some(shift_id);
    shift.status = ShiftStatus::Filled;
    state.shifts.push(shift);
}

/// A closed attendance record spanning `[started_at, ended_at]`.
pub fn add_closed_record(
    state: &mut EngineState,
    record_id: i64,
    shift_id: i64,
    worker_id: i64,
    started_at: OffsetDateTime,
    ended_at: OffsetDateTime,
) {
    let mut record: AttendanceRecord =
        AttendanceRecord::open(shift_id, worker_id, 1, started_at, GeoPoint::new(0.0, 0.0));
    record.record_id = Some(record_id);
    record.close(ended_at, false);
    state.records.push(record);
}

/// An open attendance record started at `started_at`.
pub fn add_open_record(
    state: &mut EngineState,
    record_id: i64,
    shift_id: i64,
    worker_id: i64,
    started_at: OffsetDateTime,
) {
    let mut record: AttendanceRecord =
        AttendanceRecord::open(shift_id, worker_id, 1, started_at, GeoPoint::new(0.0, 0.0));
    record.record_id = Some(record_id);
    state.records.push(record);
}

pub fn default_rate() -> Decimal {
    dec!(20)
}
