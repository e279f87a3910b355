// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    add_open_record, add_shift, create_test_actor, create_test_cause, create_test_state,
    default_rate,
};
use crate::{EngineState, SweepOutcome, sweep};
use shift_pay_domain::{
    InviteStatus, ShiftApplication, ShiftInvite, ShiftStatus,
};
use time::OffsetDateTime;
use time::macros::datetime;

fn add_invite(state: &mut EngineState, invite_id: i64, shift_id: i64, status: InviteStatus) {
    state.invites.push(ShiftInvite {
        invite_id: Some(invite_id),
        shift_id,
        worker_id: 100,
        status,
    });
}

fn add_application(state: &mut EngineState, application_id: i64, shift_id: i64) {
    state.applications.push(ShiftApplication {
        application_id: Some(application_id),
        shift_id,
        worker_id: 101,
    });
}

#[test]
fn test_open_record_closed_at_grace_cap_not_sweep_time() {
    let mut state: EngineState = create_test_state(datetime!(2026-01-01 0:00 UTC));
    // Shift 09:00-17:00 with a 30 minute clock-out grace.
    add_shift(
        &mut state,
        10,
        datetime!(2026-03-03 9:00 UTC),
        Some(30),
        default_rate(),
    );
    add_open_record(&mut state, 1, 10, 100, datetime!(2026-03-03 9:00 UTC));

    let now: OffsetDateTime = datetime!(2026-03-03 20:00 UTC);
    let outcome: SweepOutcome =
        sweep(&state, now, create_test_actor(), create_test_cause()).unwrap();

    assert_eq!(outcome.closed_records.len(), 1);
    let closed = &outcome.closed_records[0];
    assert_eq!(closed.ended_at, Some(datetime!(2026-03-03 17:30 UTC)));
    assert!(closed.automatically_closed);
}

#[test]
fn test_record_within_grace_window_left_open() {
    let mut state: EngineState = create_test_state(datetime!(2026-01-01 0:00 UTC));
    add_shift(
        &mut state,
        10,
        datetime!(2026-03-03 9:00 UTC),
        Some(30),
        default_rate(),
    );
    add_open_record(&mut state, 1, 10, 100, datetime!(2026-03-03 9:00 UTC));

    // One minute before the grace window lapses.
    let now: OffsetDateTime = datetime!(2026-03-03 17:29 UTC);
    let outcome: SweepOutcome =
        sweep(&state, now, create_test_actor(), create_test_cause()).unwrap();

    assert!(outcome.closed_records.is_empty());
    assert!(outcome.new_state.records[0].is_open());
}

#[test]
fn test_bounded_shift_expires_after_grace() {
    let mut state: EngineState = create_test_state(datetime!(2026-01-01 0:00 UTC));
    add_shift(
        &mut state,
        10,
        datetime!(2026-03-03 9:00 UTC),
        Some(30),
        default_rate(),
    );

    let outcome: SweepOutcome = sweep(
        &state,
        datetime!(2026-03-03 17:30 UTC),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(outcome.expired_shift_ids, vec![10]);
    assert_eq!(outcome.new_state.shifts[0].status, ShiftStatus::Expired);
}

#[test]
fn test_open_ended_shift_with_open_record_blocks_expiry() {
    let mut state: EngineState = create_test_state(datetime!(2026-01-01 0:00 UTC));
    add_shift(
        &mut state,
        10,
        datetime!(2026-03-03 9:00 UTC),
        None,
        default_rate(),
    );
    add_open_record(&mut state, 1, 10, 100, datetime!(2026-03-03 9:00 UTC));

    let outcome: SweepOutcome = sweep(
        &state,
        datetime!(2026-03-05 0:00 UTC),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    // The open record blocks both the close (no grace configured) and the
    // expiry of its shift.
    assert!(outcome.is_noop());
    assert_eq!(outcome.new_state.shifts[0].status, ShiftStatus::Filled);
}

#[test]
fn test_open_ended_shift_without_open_records_expires() {
    let mut state: EngineState = create_test_state(datetime!(2026-01-01 0:00 UTC));
    add_shift(
        &mut state,
        10,
        datetime!(2026-03-03 9:00 UTC),
        None,
        default_rate(),
    );

    let outcome: SweepOutcome = sweep(
        &state,
        datetime!(2026-03-03 17:00 UTC),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(outcome.expired_shift_ids, vec![10]);
}

#[test]
fn test_pending_invites_expire_with_their_shift() {
    let mut state: EngineState = create_test_state(datetime!(2026-01-01 0:00 UTC));
    add_shift(
        &mut state,
        10,
        datetime!(2026-03-03 9:00 UTC),
        Some(30),
        default_rate(),
    );
    add_invite(&mut state, 1, 10, InviteStatus::Pending);
    add_invite(&mut state, 2, 10, InviteStatus::Accepted);

    let outcome: SweepOutcome = sweep(
        &state,
        datetime!(2026-03-03 18:00 UTC),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(outcome.expired_invite_ids, vec![1]);
    assert_eq!(outcome.new_state.invites[0].status, InviteStatus::Expired);
    // Accepted invites are untouched.
    assert_eq!(outcome.new_state.invites[1].status, InviteStatus::Accepted);
}

#[test]
fn test_applications_to_terminal_shifts_are_deleted() {
    let mut state: EngineState = create_test_state(datetime!(2026-01-01 0:00 UTC));
    add_shift(
        &mut state,
        10,
        datetime!(2026-03-03 9:00 UTC),
        Some(30),
        default_rate(),
    );
    // A second shift still in the future keeps its application.
    add_shift(
        &mut state,
        11,
        datetime!(2026-04-01 9:00 UTC),
        Some(30),
        default_rate(),
    );
    add_application(&mut state, 1, 10);
    add_application(&mut state, 2, 11);

    let outcome: SweepOutcome = sweep(
        &state,
        datetime!(2026-03-03 18:00 UTC),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(outcome.deleted_application_ids, vec![1]);
    assert_eq!(outcome.new_state.applications.len(), 1);
    assert_eq!(outcome.new_state.applications[0].shift_id, 11);
}

#[test]
fn test_sweep_is_idempotent() {
    let mut state: EngineState = create_test_state(datetime!(2026-01-01 0:00 UTC));
    add_shift(
        &mut state,
        10,
        datetime!(2026-03-03 9:00 UTC),
        Some(30),
        default_rate(),
    );
    add_open_record(&mut state, 1, 10, 100, datetime!(2026-03-03 9:00 UTC));
    add_invite(&mut state, 1, 10, InviteStatus::Pending);
    add_application(&mut state, 1, 10);

    let now: OffsetDateTime = datetime!(2026-03-03 20:00 UTC);
    let first: SweepOutcome =
        sweep(&state, now, create_test_actor(), create_test_cause()).unwrap();
    assert!(!first.is_noop());

    let second: SweepOutcome = sweep(
        &first.new_state,
        now,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert!(second.is_noop());
    assert_eq!(second.new_state, first.new_state);
}

#[test]
fn test_sweep_emits_audit_event() {
    let mut state: EngineState = create_test_state(datetime!(2026-01-01 0:00 UTC));
    add_shift(
        &mut state,
        10,
        datetime!(2026-03-03 9:00 UTC),
        Some(30),
        default_rate(),
    );

    let outcome: SweepOutcome = sweep(
        &state,
        datetime!(2026-03-03 18:00 UTC),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(outcome.audit_event.action.name, "SweepAttendance");
    assert_eq!(outcome.audit_event.employer_id, Some(1));
}
