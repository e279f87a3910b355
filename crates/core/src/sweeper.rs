// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The attendance sweeper: auto-closes stale records and expires lapsed
//! shifts, invites, and applications.
//!
//! The five steps form an ordered pipeline over the in-memory snapshot;
//! later steps depend on shift statuses set by earlier ones. The caller
//! commits the resulting state atomically.
//!
//! ## Invariants
//!
//! - Idempotent: a second run at the same or a later `now` changes nothing.
//! - Auto-closed records end at `ending_at + delay`, never at the sweep
//!   time itself.
//! - A shift with a null clock-out delay and a still-open record is left
//!   untouched; open-ended shifts block their own expiry until every
//!   worker clocks out.

use crate::error::CoreError;
use crate::state::{EngineState, SweepOutcome};
use shift_pay_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use shift_pay_domain::{AttendanceRecord, DomainError, InviteStatus, ShiftStatus};
use time::{Duration, OffsetDateTime};

/// Runs the sweep pipeline over a snapshot.
///
/// # Arguments
///
/// * `state` - The current engine state (immutable)
/// * `now` - The sweep time; passed explicitly so runs are deterministic
/// * `actor` - The actor performing this run (usually the scheduler)
/// * `cause` - The cause or reason for this run
///
/// # Returns
///
/// A `SweepOutcome` with the new state, the records closed in step 1, and
/// one audit event.
///
/// # Errors
///
/// Returns an error if an attendance record references a shift missing
/// from the snapshot; the run fails as a whole and nothing is committed.
pub fn sweep(
    state: &EngineState,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<SweepOutcome, CoreError> {
    let before: StateSnapshot = state.to_snapshot();
    let mut new_state: EngineState = state.clone();

    // Step 1: auto-close open records whose shift's grace window lapsed.
    let mut closed_records: Vec<AttendanceRecord> = Vec::new();
    for index in 0..new_state.records.len() {
        if !new_state.records[index].is_open() {
            continue;
        }
        let shift_id: i64 = new_state.records[index].shift_id;
        let shift = new_state
            .shifts
            .iter()
            .find(|shift| shift.shift_id == Some(shift_id))
            .ok_or(DomainError::ShiftNotFound { shift_id })?;

        let Some(delay_minutes) = shift.maximum_clockout_delay_minutes else {
            continue;
        };
        let cutoff: OffsetDateTime = shift.ending_at + Duration::minutes(delay_minutes);
        if cutoff <= now {
            new_state.records[index].close(cutoff, true);
            closed_records.push(new_state.records[index].clone());
        }
    }

    // Step 2: expire bounded shifts whose grace window lapsed.
    let mut expired_shift_ids: Vec<i64> = Vec::new();
    for shift in &mut new_state.shifts {
        let Some(delay_minutes) = shift.maximum_clockout_delay_minutes else {
            continue;
        };
        if shift.status.is_expirable()
            && shift.ending_at + Duration::minutes(delay_minutes) <= now
        {
            shift.status = ShiftStatus::Expired;
            expired_shift_ids.push(shift.shift_id.unwrap_or_default());
        }
    }

    // Step 3: expire open-ended shifts that have ended and hold no open
    // records.
    let open_shift_ids: Vec<i64> = new_state
        .records
        .iter()
        .filter(|record| record.is_open())
        .map(|record| record.shift_id)
        .collect();
    for shift in &mut new_state.shifts {
        if shift.maximum_clockout_delay_minutes.is_some() {
            continue;
        }
        let shift_id: i64 = shift.shift_id.unwrap_or_default();
        if shift.status.is_expirable()
            && shift.ending_at <= now
            && !open_shift_ids.contains(&shift_id)
        {
            shift.status = ShiftStatus::Expired;
            expired_shift_ids.push(shift_id);
        }
    }

    // Step 4: expire pending invites to expired shifts.
    let expired_shift_lookup: Vec<i64> = new_state
        .shifts
        .iter()
        .filter(|shift| shift.status == ShiftStatus::Expired)
        .map(|shift| shift.shift_id.unwrap_or_default())
        .collect();
    let mut expired_invite_ids: Vec<i64> = Vec::new();
    for invite in &mut new_state.invites {
        if invite.status == InviteStatus::Pending && expired_shift_lookup.contains(&invite.shift_id)
        {
            invite.status = InviteStatus::Expired;
            expired_invite_ids.push(invite.invite_id.unwrap_or_default());
        }
    }

    // Step 5: delete applications to shifts in a terminal status.
    let terminal_shift_ids: Vec<i64> = new_state
        .shifts
        .iter()
        .filter(|shift| shift.status.is_terminal())
        .map(|shift| shift.shift_id.unwrap_or_default())
        .collect();
    let mut deleted_application_ids: Vec<i64> = Vec::new();
    new_state.applications.retain(|application| {
        if terminal_shift_ids.contains(&application.shift_id) {
            if let Some(id) = application.application_id {
                deleted_application_ids.push(id);
            }
            false
        } else {
            true
        }
    });

    let action: Action = Action::new(
        String::from("SweepAttendance"),
        Some(format!(
            "closed {} record(s), expired {} shift(s), {} invite(s), deleted {} application(s)",
            closed_records.len(),
            expired_shift_ids.len(),
            expired_invite_ids.len(),
            deleted_application_ids.len()
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        before,
        new_state.to_snapshot(),
        new_state.employer.employer_id,
    );

    Ok(SweepOutcome {
        new_state,
        closed_records,
        expired_shift_ids,
        expired_invite_ids,
        deleted_application_ids,
        audit_event,
    })
}
