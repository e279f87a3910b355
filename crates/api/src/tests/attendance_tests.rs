// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{setup_database, setup_employer, setup_shift};
use crate::{ClockInRequest, ClockOutRequest, clock_in, clock_out, run_sweep};
use shift_pay::EngineState;
use shift_pay_domain::GeoPoint;
use shift_pay_persistence::{SqliteConnection, load_engine_state};
use time::macros::datetime;

fn clock_in_request(employer_id: i64, shift_id: i64, worker_id: i64) -> ClockInRequest {
    ClockInRequest {
        employer_id,
        shift_id,
        worker_id,
        position: None,
    }
}

#[test]
fn test_clock_in_persists_record() {
    let mut conn: SqliteConnection = setup_database();
    let employer_id: i64 = setup_employer(&mut conn);
    let shift_id: i64 = setup_shift(
        &mut conn,
        employer_id,
        datetime!(2026-03-16 9:00 UTC),
        Some(15),
        Some(30),
        GeoPoint::new(0.0, 0.0),
    );

    let response = clock_in(
        &mut conn,
        &clock_in_request(employer_id, shift_id, 100),
        datetime!(2026-03-16 8:50 UTC),
    )
    .unwrap();

    assert_eq!(response.started_at, datetime!(2026-03-16 8:50 UTC));

    let state: EngineState = load_engine_state(&mut conn, employer_id).unwrap();
    assert_eq!(state.records.len(), 1);
    assert_eq!(state.records[0].record_id, Some(response.record_id));
    assert!(state.records[0].is_open());
}

#[test]
fn test_clock_in_rejects_unrostered_worker() {
    let mut conn: SqliteConnection = setup_database();
    let employer_id: i64 = setup_employer(&mut conn);
    let shift_id: i64 = setup_shift(
        &mut conn,
        employer_id,
        datetime!(2026-03-16 9:00 UTC),
        Some(15),
        Some(30),
        GeoPoint::new(0.0, 0.0),
    );

    let result = clock_in(
        &mut conn,
        &clock_in_request(employer_id, shift_id, 999),
        datetime!(2026-03-16 9:00 UTC),
    );

    assert_eq!(result.unwrap_err().code(), Some("NOT_ROSTERED"));
}

#[test]
fn test_clock_in_rejects_early_request() {
    let mut conn: SqliteConnection = setup_database();
    let employer_id: i64 = setup_employer(&mut conn);
    let shift_id: i64 = setup_shift(
        &mut conn,
        employer_id,
        datetime!(2026-03-16 9:00 UTC),
        Some(15),
        Some(30),
        GeoPoint::new(0.0, 0.0),
    );

    let result = clock_in(
        &mut conn,
        &clock_in_request(employer_id, shift_id, 100),
        datetime!(2026-03-16 8:44 UTC),
    );

    assert_eq!(result.unwrap_err().code(), Some("BEFORE_WINDOW"));

    // Nothing was written.
    let state: EngineState = load_engine_state(&mut conn, employer_id).unwrap();
    assert!(state.records.is_empty());
}

#[test]
fn test_second_clock_in_rejected_while_open() {
    let mut conn: SqliteConnection = setup_database();
    let employer_id: i64 = setup_employer(&mut conn);
    let first_shift: i64 = setup_shift(
        &mut conn,
        employer_id,
        datetime!(2026-03-16 9:00 UTC),
        None,
        Some(30),
        GeoPoint::new(0.0, 0.0),
    );
    let second_shift: i64 = setup_shift(
        &mut conn,
        employer_id,
        datetime!(2026-03-16 10:00 UTC),
        None,
        Some(30),
        GeoPoint::new(0.0, 0.0),
    );

    clock_in(
        &mut conn,
        &clock_in_request(employer_id, first_shift, 100),
        datetime!(2026-03-16 9:00 UTC),
    )
    .unwrap();

    let result = clock_in(
        &mut conn,
        &clock_in_request(employer_id, second_shift, 100),
        datetime!(2026-03-16 10:00 UTC),
    );

    assert_eq!(
        result.unwrap_err().code(),
        Some("ALREADY_CLOCKED_IN_ELSEWHERE")
    );
}

#[test]
fn test_clock_in_rejects_far_position() {
    let mut conn: SqliteConnection = setup_database();
    let employer_id: i64 = setup_employer(&mut conn);
    let venue: GeoPoint = GeoPoint::new(40.7580, -73.9855);
    let shift_id: i64 = setup_shift(
        &mut conn,
        employer_id,
        datetime!(2026-03-16 9:00 UTC),
        None,
        Some(30),
        venue,
    );

    let mut request: ClockInRequest = clock_in_request(employer_id, shift_id, 100);
    // Roughly 500m away from the venue.
    request.position = Some(GeoPoint::new(40.7536, -73.9832));

    let result = clock_in(&mut conn, &request, datetime!(2026-03-16 9:00 UTC));

    assert_eq!(result.unwrap_err().code(), Some("FAR_FROM_VENUE"));
}

#[test]
fn test_clock_out_closes_record() {
    let mut conn: SqliteConnection = setup_database();
    let employer_id: i64 = setup_employer(&mut conn);
    let shift_id: i64 = setup_shift(
        &mut conn,
        employer_id,
        datetime!(2026-03-16 9:00 UTC),
        Some(15),
        Some(30),
        GeoPoint::new(0.0, 0.0),
    );

    clock_in(
        &mut conn,
        &clock_in_request(employer_id, shift_id, 100),
        datetime!(2026-03-16 9:00 UTC),
    )
    .unwrap();

    let response = clock_out(
        &mut conn,
        &ClockOutRequest {
            employer_id,
            shift_id,
            worker_id: 100,
            position: None,
        },
        datetime!(2026-03-16 17:10 UTC),
    )
    .unwrap();

    assert_eq!(response.ended_at, datetime!(2026-03-16 17:10 UTC));

    let state: EngineState = load_engine_state(&mut conn, employer_id).unwrap();
    assert!(!state.records[0].is_open());
    assert!(!state.records[0].automatically_closed);
}

#[test]
fn test_clock_out_without_open_record_rejected() {
    let mut conn: SqliteConnection = setup_database();
    let employer_id: i64 = setup_employer(&mut conn);
    let shift_id: i64 = setup_shift(
        &mut conn,
        employer_id,
        datetime!(2026-03-16 9:00 UTC),
        Some(15),
        Some(30),
        GeoPoint::new(0.0, 0.0),
    );

    let result = clock_out(
        &mut conn,
        &ClockOutRequest {
            employer_id,
            shift_id,
            worker_id: 100,
            position: None,
        },
        datetime!(2026-03-16 17:10 UTC),
    );

    assert_eq!(result.unwrap_err().code(), Some("NO_OPEN_RECORD"));
}

#[test]
fn test_clock_out_after_grace_rejected() {
    let mut conn: SqliteConnection = setup_database();
    let employer_id: i64 = setup_employer(&mut conn);
    let shift_id: i64 = setup_shift(
        &mut conn,
        employer_id,
        datetime!(2026-03-16 9:00 UTC),
        Some(15),
        Some(30),
        GeoPoint::new(0.0, 0.0),
    );

    clock_in(
        &mut conn,
        &clock_in_request(employer_id, shift_id, 100),
        datetime!(2026-03-16 9:00 UTC),
    )
    .unwrap();

    let result = clock_out(
        &mut conn,
        &ClockOutRequest {
            employer_id,
            shift_id,
            worker_id: 100,
            position: None,
        },
        datetime!(2026-03-16 17:31 UTC),
    );

    assert_eq!(result.unwrap_err().code(), Some("AFTER_WINDOW"));
}

#[test]
fn test_sweep_reports_closed_records_and_is_idempotent() {
    let mut conn: SqliteConnection = setup_database();
    let employer_id: i64 = setup_employer(&mut conn);
    let shift_id: i64 = setup_shift(
        &mut conn,
        employer_id,
        datetime!(2026-03-16 9:00 UTC),
        Some(15),
        Some(30),
        GeoPoint::new(0.0, 0.0),
    );

    clock_in(
        &mut conn,
        &clock_in_request(employer_id, shift_id, 100),
        datetime!(2026-03-16 9:00 UTC),
    )
    .unwrap();

    let report = run_sweep(&mut conn, employer_id, datetime!(2026-03-16 20:00 UTC)).unwrap();

    assert_eq!(report.closed_records.len(), 1);
    assert_eq!(
        report.closed_records[0].ended_at,
        datetime!(2026-03-16 17:30 UTC)
    );
    assert_eq!(report.expired_shift_ids, vec![shift_id]);

    let second = run_sweep(&mut conn, employer_id, datetime!(2026-03-16 20:00 UTC)).unwrap();
    assert!(second.closed_records.is_empty());
    assert!(second.expired_shift_ids.is_empty());
}
