// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendance window validation for clock-in and clock-out requests.
//!
//! Pure decision functions over their inputs; no side effects. The caller
//! must execute the check and the attendance-record write inside one
//! transaction so the "at most one open record per worker" invariant is
//! checked-and-set atomically.
//!
//! ## Tolerance semantics
//!
//! - `maximum_clockin_delta_minutes = None`: a worker may clock in any time
//!   up to the shift's end, no matter how early.
//! - `maximum_clockin_delta_minutes = N`: the legal window is
//!   `[starting_at − N, ending_at]` — a one-sided early bound, not a
//!   symmetric window around the start.
//! - `maximum_clockout_delay_minutes = None`: a clock-out is accepted at
//!   any time.
//! - `maximum_clockout_delay_minutes = N`: the clock-out must not be after
//!   `ending_at + N`.
//!
//! Exactly one failure is surfaced per call; check order decides which.

use crate::error::DomainError;
use crate::geo::{self, GeoPoint};
use crate::types::{AttendanceRecord, Shift};
use time::{Duration, OffsetDateTime};

/// Validates a clock-in request against a shift's window.
///
/// # Arguments
///
/// * `shift` - The shift being clocked into
/// * `worker_id` - The requesting worker
/// * `requested_at` - The requested clock-in time
/// * `open_record` - The worker's currently open attendance record on any
///   shift, if one exists
/// * `position` - The worker's reported position, if any
/// * `allowed_radius_meters` - Venue proximity tolerance
///
/// # Errors
///
/// Returns the first failed precondition:
/// - `NotRostered` if the worker is not on the accepted roster
/// - `AlreadyClockedInElsewhere` if any open record exists for the worker
/// - `AfterWindow` if the request falls after the shift's end
/// - `BeforeWindow` if the request precedes `starting_at − delta`
/// - `FarFromVenue` if the venue declares a position and the reported one
///   is missing or outside the allowed radius
pub fn can_clock_in(
    shift: &Shift,
    worker_id: i64,
    requested_at: OffsetDateTime,
    open_record: Option<&AttendanceRecord>,
    position: Option<GeoPoint>,
    allowed_radius_meters: f64,
) -> Result<(), DomainError> {
    let shift_id: i64 = shift.shift_id.unwrap_or_default();

    if !shift.is_rostered(worker_id) {
        return Err(DomainError::NotRostered {
            shift_id,
            worker_id,
        });
    }

    if let Some(record) = open_record {
        return Err(DomainError::AlreadyClockedInElsewhere {
            worker_id,
            open_shift_id: record.shift_id,
        });
    }

    // A clock-in is never legal after the shift has ended, with or without
    // a configured delta.
    if requested_at > shift.ending_at {
        return Err(DomainError::AfterWindow {
            requested_at,
            latest: shift.ending_at,
        });
    }

    if let Some(delta_minutes) = shift.maximum_clockin_delta_minutes {
        let earliest: OffsetDateTime = shift.starting_at - Duration::minutes(delta_minutes);
        if requested_at < earliest {
            return Err(DomainError::BeforeWindow {
                requested_at,
                earliest,
            });
        }
    }

    check_venue_proximity(shift, position, allowed_radius_meters)
}

/// Validates a clock-out request against a shift's window.
///
/// # Arguments
///
/// * `shift` - The shift being clocked out of
/// * `worker_id` - The requesting worker
/// * `requested_at` - The requested clock-out time
/// * `open_record` - The worker's open attendance record, if one exists
/// * `position` - The worker's reported position, if any
/// * `allowed_radius_meters` - Venue proximity tolerance
///
/// # Errors
///
/// Returns the first failed precondition:
/// - `NoOpenRecord` if no open record exists for this shift and worker
/// - `AfterWindow` if the request falls after `ending_at + delay`
/// - `FarFromVenue` if the venue declares a position and the reported one
///   is missing or outside the allowed radius
pub fn can_clock_out(
    shift: &Shift,
    worker_id: i64,
    requested_at: OffsetDateTime,
    open_record: Option<&AttendanceRecord>,
    position: Option<GeoPoint>,
    allowed_radius_meters: f64,
) -> Result<(), DomainError> {
    let shift_id: i64 = shift.shift_id.unwrap_or_default();

    let record_matches: bool = open_record.is_some_and(|record| {
        record.is_open() && record.worker_id == worker_id && record.shift_id == shift_id
    });
    if !record_matches {
        return Err(DomainError::NoOpenRecord {
            shift_id,
            worker_id,
        });
    }

    if let Some(delay_minutes) = shift.maximum_clockout_delay_minutes {
        let latest: OffsetDateTime = shift.ending_at + Duration::minutes(delay_minutes);
        if requested_at > latest {
            return Err(DomainError::AfterWindow {
                requested_at,
                latest,
            });
        }
    }

    check_venue_proximity(shift, position, allowed_radius_meters)
}

/// Checks the reported position against the shift's venue, when the venue
/// declares one.
fn check_venue_proximity(
    shift: &Shift,
    position: Option<GeoPoint>,
    allowed_radius_meters: f64,
) -> Result<(), DomainError> {
    if shift.venue.is_unset() {
        return Ok(());
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let allowed_meters: u64 = allowed_radius_meters.max(0.0).round() as u64;

    let Some(position) = position else {
        return Err(DomainError::FarFromVenue {
            distance_meters: None,
            allowed_meters,
        });
    };

    let distance: f64 = geo::distance_meters(shift.venue, position);
    if distance > allowed_radius_meters {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        return Err(DomainError::FarFromVenue {
            distance_meters: Some(distance.round() as u64),
            allowed_meters,
        });
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use time::macros::datetime;

    const RADIUS: f64 = 150.0;

    fn make_shift(
        delta_minutes: Option<i64>,
        delay_minutes: Option<i64>,
        venue: GeoPoint,
    ) -> Shift {
        let mut shift: Shift = Shift::new(
            1,
            datetime!(2026-03-03 9:00 UTC),
            datetime!(2026-03-03 17:00 UTC),
            delta_minutes,
            delay_minutes,
            dec!(18.50),
            venue,
            vec![100, 101],
        )
        .unwrap();
        shift.shift_id = Some(10);
        shift
    }

    fn make_open_record(shift_id: i64, worker_id: i64) -> AttendanceRecord {
        let mut record: AttendanceRecord = AttendanceRecord::open(
            shift_id,
            worker_id,
            1,
            datetime!(2026-03-03 9:00 UTC),
            GeoPoint::new(0.0, 0.0),
        );
        record.record_id = Some(1);
        record
    }

    #[test]
    fn test_clock_in_at_exact_delta_boundary_succeeds() {
        let shift: Shift = make_shift(Some(15), None, GeoPoint::new(0.0, 0.0));

        let result = can_clock_in(
            &shift,
            100,
            datetime!(2026-03-03 8:45 UTC),
            None,
            None,
            RADIUS,
        );

        assert!(result.is_ok());
    }

    #[test]
    fn test_clock_in_one_minute_before_delta_fails() {
        let shift: Shift = make_shift(Some(15), None, GeoPoint::new(0.0, 0.0));

        let result = can_clock_in(
            &shift,
            100,
            datetime!(2026-03-03 8:44 UTC),
            None,
            None,
            RADIUS,
        );

        assert_eq!(
            result.unwrap_err(),
            DomainError::BeforeWindow {
                requested_at: datetime!(2026-03-03 8:44 UTC),
                earliest: datetime!(2026-03-03 8:45 UTC),
            }
        );
    }

    #[test]
    fn test_clock_in_zero_delta_requires_exact_start() {
        let shift: Shift = make_shift(Some(0), None, GeoPoint::new(0.0, 0.0));

        assert!(
            can_clock_in(
                &shift,
                100,
                datetime!(2026-03-03 9:00 UTC),
                None,
                None,
                RADIUS
            )
            .is_ok()
        );
        assert!(matches!(
            can_clock_in(
                &shift,
                100,
                datetime!(2026-03-03 8:59:59 UTC),
                None,
                None,
                RADIUS
            ),
            Err(DomainError::BeforeWindow { .. })
        ));
    }

    #[test]
    fn test_clock_in_null_delta_allows_any_early_time() {
        let shift: Shift = make_shift(None, None, GeoPoint::new(0.0, 0.0));

        let result = can_clock_in(
            &shift,
            100,
            datetime!(2026-03-01 0:00 UTC),
            None,
            None,
            RADIUS,
        );

        assert!(result.is_ok());
    }

    #[test]
    fn test_clock_in_up_until_shift_end_succeeds() {
        let shift: Shift = make_shift(Some(15), None, GeoPoint::new(0.0, 0.0));

        // Late clock-in is always allowed up to the shift's end.
        let result = can_clock_in(
            &shift,
            100,
            datetime!(2026-03-03 17:00 UTC),
            None,
            None,
            RADIUS,
        );

        assert!(result.is_ok());
    }

    #[test]
    fn test_clock_in_after_shift_end_fails() {
        let shift: Shift = make_shift(None, None, GeoPoint::new(0.0, 0.0));

        let result = can_clock_in(
            &shift,
            100,
            datetime!(2026-03-03 17:00:01 UTC),
            None,
            None,
            RADIUS,
        );

        assert!(matches!(result, Err(DomainError::AfterWindow { .. })));
    }

    #[test]
    fn test_clock_in_not_rostered_fails() {
        let shift: Shift = make_shift(None, None, GeoPoint::new(0.0, 0.0));

        let result = can_clock_in(
            &shift,
            999,
            datetime!(2026-03-03 9:00 UTC),
            None,
            None,
            RADIUS,
        );

        assert_eq!(
            result.unwrap_err(),
            DomainError::NotRostered {
                shift_id: 10,
                worker_id: 999,
            }
        );
    }

    #[test]
    fn test_clock_in_with_open_record_elsewhere_fails() {
        let shift: Shift = make_shift(None, None, GeoPoint::new(0.0, 0.0));
        let open: AttendanceRecord = make_open_record(77, 100);

        let result = can_clock_in(
            &shift,
            100,
            datetime!(2026-03-03 9:00 UTC),
            Some(&open),
            None,
            RADIUS,
        );

        assert_eq!(
            result.unwrap_err(),
            DomainError::AlreadyClockedInElsewhere {
                worker_id: 100,
                open_shift_id: 77,
            }
        );
    }

    #[test]
    fn test_clock_in_far_from_venue_fails() {
        let venue: GeoPoint = GeoPoint::new(40.7580, -73.9855);
        let shift: Shift = make_shift(None, None, venue);
        // Bryant Park, roughly 500m away.
        let position: GeoPoint = GeoPoint::new(40.7536, -73.9832);

        let result = can_clock_in(
            &shift,
            100,
            datetime!(2026-03-03 9:00 UTC),
            None,
            Some(position),
            RADIUS,
        );

        assert!(matches!(
            result,
            Err(DomainError::FarFromVenue {
                distance_meters: Some(_),
                ..
            })
        ));
    }

    #[test]
    fn test_clock_in_missing_position_with_venue_fails() {
        let venue: GeoPoint = GeoPoint::new(40.7580, -73.9855);
        let shift: Shift = make_shift(None, None, venue);

        let result = can_clock_in(
            &shift,
            100,
            datetime!(2026-03-03 9:00 UTC),
            None,
            None,
            RADIUS,
        );

        assert_eq!(
            result.unwrap_err(),
            DomainError::FarFromVenue {
                distance_meters: None,
                allowed_meters: 150,
            }
        );
    }

    #[test]
    fn test_clock_in_unset_venue_skips_proximity() {
        let shift: Shift = make_shift(None, None, GeoPoint::new(0.0, 0.0));

        let result = can_clock_in(
            &shift,
            100,
            datetime!(2026-03-03 9:00 UTC),
            None,
            None,
            RADIUS,
        );

        assert!(result.is_ok());
    }

    #[test]
    fn test_clock_out_without_open_record_fails() {
        let shift: Shift = make_shift(None, Some(30), GeoPoint::new(0.0, 0.0));

        let result = can_clock_out(
            &shift,
            100,
            datetime!(2026-03-03 17:10 UTC),
            None,
            None,
            RADIUS,
        );

        assert_eq!(
            result.unwrap_err(),
            DomainError::NoOpenRecord {
                shift_id: 10,
                worker_id: 100,
            }
        );
    }

    #[test]
    fn test_clock_out_open_record_on_other_shift_fails() {
        let shift: Shift = make_shift(None, Some(30), GeoPoint::new(0.0, 0.0));
        let open: AttendanceRecord = make_open_record(77, 100);

        let result = can_clock_out(
            &shift,
            100,
            datetime!(2026-03-03 17:10 UTC),
            Some(&open),
            None,
            RADIUS,
        );

        assert!(matches!(result, Err(DomainError::NoOpenRecord { .. })));
    }

    #[test]
    fn test_clock_out_at_delay_boundary_succeeds() {
        let shift: Shift = make_shift(None, Some(30), GeoPoint::new(0.0, 0.0));
        let open: AttendanceRecord = make_open_record(10, 100);

        let result = can_clock_out(
            &shift,
            100,
            datetime!(2026-03-03 17:30 UTC),
            Some(&open),
            None,
            RADIUS,
        );

        assert!(result.is_ok());
    }

    #[test]
    fn test_clock_out_after_delay_fails() {
        let shift: Shift = make_shift(None, Some(30), GeoPoint::new(0.0, 0.0));
        let open: AttendanceRecord = make_open_record(10, 100);

        let result = can_clock_out(
            &shift,
            100,
            datetime!(2026-03-03 17:30:01 UTC),
            Some(&open),
            None,
            RADIUS,
        );

        assert_eq!(
            result.unwrap_err(),
            DomainError::AfterWindow {
                requested_at: datetime!(2026-03-03 17:30:01 UTC),
                latest: datetime!(2026-03-03 17:30 UTC),
            }
        );
    }

    #[test]
    fn test_clock_out_null_delay_accepts_any_time() {
        let shift: Shift = make_shift(None, None, GeoPoint::new(0.0, 0.0));
        let open: AttendanceRecord = make_open_record(10, 100);

        let result = can_clock_out(
            &shift,
            100,
            datetime!(2026-03-10 12:00 UTC),
            Some(&open),
            None,
            RADIUS,
        );

        assert!(result.is_ok());
    }
}
