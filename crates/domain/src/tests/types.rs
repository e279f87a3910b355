// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::geo::GeoPoint;
use crate::types::{
    AttendanceRecord, InviteStatus, PaymentApproval, PeriodLengthType, PeriodStatus, Shift,
    ShiftStatus,
};
use crate::DomainError;
use rust_decimal_macros::dec;
use std::str::FromStr;
use time::macros::datetime;

#[test]
fn test_shift_status_round_trips_through_strings() {
    for status in [
        ShiftStatus::Draft,
        ShiftStatus::Open,
        ShiftStatus::Filled,
        ShiftStatus::Paused,
        ShiftStatus::Expired,
        ShiftStatus::Completed,
        ShiftStatus::Cancelled,
    ] {
        assert_eq!(ShiftStatus::from_str(status.as_str()).unwrap(), status);
    }
}

#[test]
fn test_shift_status_rejects_unknown_string() {
    let result = ShiftStatus::from_str("abandoned");

    assert_eq!(
        result.unwrap_err(),
        DomainError::InvalidShiftStatus(String::from("abandoned"))
    );
}

#[test]
fn test_terminal_shift_statuses_are_immutable() {
    for terminal in [
        ShiftStatus::Expired,
        ShiftStatus::Completed,
        ShiftStatus::Cancelled,
    ] {
        assert!(terminal.is_terminal());
        assert!(!terminal.can_transition_to(ShiftStatus::Open));
        assert!(!terminal.can_transition_to(ShiftStatus::Cancelled));
    }
}

#[test]
fn test_non_terminal_shifts_can_always_be_cancelled() {
    for status in [
        ShiftStatus::Draft,
        ShiftStatus::Open,
        ShiftStatus::Filled,
        ShiftStatus::Paused,
    ] {
        assert!(status.can_transition_to(ShiftStatus::Cancelled));
    }
}

#[test]
fn test_only_open_and_filled_shifts_are_expirable() {
    assert!(ShiftStatus::Open.is_expirable());
    assert!(ShiftStatus::Filled.is_expirable());
    assert!(!ShiftStatus::Draft.is_expirable());
    assert!(!ShiftStatus::Paused.is_expirable());
    assert!(!ShiftStatus::Completed.is_expirable());
}

#[test]
fn test_period_status_transitions() {
    assert!(PeriodStatus::Open.can_transition_to(PeriodStatus::Finalized));
    assert!(PeriodStatus::Finalized.can_transition_to(PeriodStatus::Open));
    assert!(PeriodStatus::Finalized.can_transition_to(PeriodStatus::Paid));
    assert!(!PeriodStatus::Open.can_transition_to(PeriodStatus::Paid));
    assert!(!PeriodStatus::Paid.can_transition_to(PeriodStatus::Open));
    assert!(!PeriodStatus::Paid.can_transition_to(PeriodStatus::Finalized));
}

#[test]
fn test_invite_and_approval_statuses_parse() {
    assert_eq!(
        InviteStatus::from_str("pending").unwrap(),
        InviteStatus::Pending
    );
    assert_eq!(
        PaymentApproval::from_str("approved").unwrap(),
        PaymentApproval::Approved
    );
    assert!(PaymentApproval::from_str("declined").is_err());
}

#[test]
fn test_period_length_type_only_supports_days() {
    assert_eq!(
        PeriodLengthType::from_str("days").unwrap(),
        PeriodLengthType::Days
    );
    assert_eq!(
        PeriodLengthType::from_str("hours").unwrap_err(),
        DomainError::UnsupportedLengthType {
            length_type: String::from("hours"),
        }
    );
}

#[test]
fn test_shift_construction_rejects_inverted_window() {
    let result = Shift::new(
        1,
        datetime!(2026-03-03 17:00 UTC),
        datetime!(2026-03-03 9:00 UTC),
        None,
        None,
        dec!(18.50),
        GeoPoint::new(0.0, 0.0),
        vec![],
    );

    assert!(matches!(
        result,
        Err(DomainError::ShiftWindowInvalid { .. })
    ));
}

#[test]
fn test_shift_construction_rejects_negative_rate() {
    let result = Shift::new(
        1,
        datetime!(2026-03-03 9:00 UTC),
        datetime!(2026-03-03 17:00 UTC),
        None,
        None,
        dec!(-1),
        GeoPoint::new(0.0, 0.0),
        vec![],
    );

    assert!(matches!(result, Err(DomainError::InvalidHourlyRate(_))));
}

#[test]
fn test_shift_scheduled_hours() {
    let shift: Shift = Shift::new(
        1,
        datetime!(2026-03-03 9:00 UTC),
        datetime!(2026-03-03 17:30 UTC),
        None,
        None,
        dec!(18.50),
        GeoPoint::new(0.0, 0.0),
        vec![100],
    )
    .unwrap();

    assert_eq!(shift.scheduled_hours(), dec!(8.5));
    assert!(shift.is_rostered(100));
    assert!(!shift.is_rostered(101));
}

#[test]
fn test_attendance_record_open_and_close() {
    let mut record: AttendanceRecord = AttendanceRecord::open(
        10,
        100,
        1,
        datetime!(2026-03-03 9:00 UTC),
        GeoPoint::new(0.0, 0.0),
    );

    assert!(record.is_open());

    record.close(datetime!(2026-03-03 17:00 UTC), true);

    assert!(!record.is_open());
    assert!(record.automatically_closed);
    assert_eq!(record.ended_at, Some(datetime!(2026-03-03 17:00 UTC)));
}
