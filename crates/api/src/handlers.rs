// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing operations.
//!
//! Each handler composes load → validate/transition → commit. Clock-in
//! relies on the storage layer's partial unique index as the atomic
//! check-and-set for the one-open-record-per-worker invariant: a request
//! that races past the in-memory check fails at insert and surfaces the
//! same reason code. Batch handlers commit each outcome in a single
//! transaction.

use shift_pay::{EngineState, GenerationOutcome, SweepOutcome, TransitionOutcome};
use shift_pay_audit::{Actor, Cause};
use shift_pay_domain::{AttendanceRecord, GeoPoint, can_clock_in, can_clock_out};
use shift_pay_persistence::{
    SqliteConnection, close_attendance_record, commit_generation, commit_period_transition,
    commit_sweep, insert_attendance_record, load_engine_state,
};
use time::OffsetDateTime;
use tracing::info;

use crate::error::ApiError;
use crate::request_response::{
    AutoClosedRecord, ClockInRequest, ClockInResponse, ClockOutRequest, ClockOutResponse,
    GeneratedPeriodInfo, GenerationReport, SetPeriodStatusRequest, SetPeriodStatusResponse,
    SweepReport,
};

fn scheduler_cause(operation: &str, now: OffsetDateTime) -> Cause {
    Cause::new(format!("{operation}-{now}"), format!("Scheduled {operation}"))
}

/// Validates and executes a clock-in request.
///
/// # Errors
///
/// Returns a validation error with a stable reason code if any
/// precondition fails; nothing is written in that case.
pub fn clock_in(
    conn: &mut SqliteConnection,
    request: &ClockInRequest,
    now: OffsetDateTime,
) -> Result<ClockInResponse, ApiError> {
    let state: EngineState = load_engine_state(conn, request.employer_id)?;
    let shift = state
        .shift_by_id(request.shift_id)
        .ok_or(ApiError::ResourceNotFound {
            resource_type: "shift",
            message: format!("shift {} for employer {}", request.shift_id, request.employer_id),
        })?;

    can_clock_in(
        shift,
        request.worker_id,
        now,
        state.open_record_for_worker(request.worker_id),
        request.position,
        state.employer.venue_radius_meters,
    )?;

    let record: AttendanceRecord = AttendanceRecord::open(
        request.shift_id,
        request.worker_id,
        request.employer_id,
        now,
        request.position.unwrap_or(GeoPoint::new(0.0, 0.0)),
    );
    let record_id: i64 = insert_attendance_record(conn, &record)?;

    info!(
        record_id,
        shift_id = request.shift_id,
        worker_id = request.worker_id,
        "Worker clocked in"
    );
    Ok(ClockInResponse {
        record_id,
        started_at: now,
    })
}

/// Validates and executes a clock-out request.
///
/// # Errors
///
/// Returns a validation error with a stable reason code if any
/// precondition fails; nothing is written in that case.
pub fn clock_out(
    conn: &mut SqliteConnection,
    request: &ClockOutRequest,
    now: OffsetDateTime,
) -> Result<ClockOutResponse, ApiError> {
    let state: EngineState = load_engine_state(conn, request.employer_id)?;
    let shift = state
        .shift_by_id(request.shift_id)
        .ok_or(ApiError::ResourceNotFound {
            resource_type: "shift",
            message: format!("shift {} for employer {}", request.shift_id, request.employer_id),
        })?;
    let open_record = state.open_record_for_worker(request.worker_id);

    can_clock_out(
        shift,
        request.worker_id,
        now,
        open_record,
        request.position,
        state.employer.venue_radius_meters,
    )?;

    // can_clock_out guarantees the open record exists and matches.
    let record_id: i64 = open_record
        .and_then(|record| record.record_id)
        .ok_or(ApiError::Internal {
            message: String::from("validated open record has no persisted id"),
        })?;
    close_attendance_record(conn, record_id, now, request.position, false)?;

    info!(
        record_id,
        shift_id = request.shift_id,
        worker_id = request.worker_id,
        "Worker clocked out"
    );
    Ok(ClockOutResponse {
        record_id,
        ended_at: now,
    })
}

/// Runs the attendance sweeper for one employer and commits the outcome.
///
/// Safe to re-run on a schedule: a pass that changes nothing commits
/// nothing.
///
/// # Errors
///
/// Returns an error if the snapshot fails to load or the commit fails;
/// the run rolls back as a whole and retries on the next tick.
pub fn run_sweep(
    conn: &mut SqliteConnection,
    employer_id: i64,
    now: OffsetDateTime,
) -> Result<SweepReport, ApiError> {
    let state: EngineState = load_engine_state(conn, employer_id)?;
    let outcome: SweepOutcome = shift_pay::sweep(
        &state,
        now,
        Actor::scheduler(),
        scheduler_cause("sweep", now),
    )?;

    if !outcome.is_noop() {
        commit_sweep(conn, &outcome, now)?;
    }

    Ok(SweepReport {
        employer_id,
        closed_records: outcome
            .closed_records
            .iter()
            .filter_map(|record| {
                let record_id: i64 = record.record_id?;
                let ended_at: OffsetDateTime = record.ended_at?;
                Some(AutoClosedRecord {
                    record_id,
                    shift_id: record.shift_id,
                    worker_id: record.worker_id,
                    ended_at,
                })
            })
            .collect(),
        expired_shift_ids: outcome.expired_shift_ids,
        expired_invite_ids: outcome.expired_invite_ids,
        deleted_application_count: outcome.deleted_application_ids.len(),
    })
}

/// Generates every elapsed payroll period for one employer, committing
/// period-by-period.
///
/// Each period and its allocations land in their own transaction; a
/// failure leaves earlier periods committed and the run resumes from them
/// on the next tick.
///
/// # Errors
///
/// Returns `CONFIG_MISSING` if payroll is not configured, or the first
/// allocation/commit error.
pub fn run_period_generation(
    conn: &mut SqliteConnection,
    employer_id: i64,
    now: OffsetDateTime,
) -> Result<GenerationReport, ApiError> {
    let mut periods: Vec<GeneratedPeriodInfo> = Vec::new();

    loop {
        let state: EngineState = load_engine_state(conn, employer_id)?;
        let next: Option<GenerationOutcome> = shift_pay::generate_next(
            &state,
            now,
            Actor::scheduler(),
            scheduler_cause("generate", now),
        )?;
        let Some(outcome) = next else {
            break;
        };

        let period_ids: Vec<i64> = commit_generation(conn, &outcome, now)?;
        let generated = &outcome.generated[0];
        let period_id: i64 = period_ids.first().copied().unwrap_or_default();
        periods.push(GeneratedPeriodInfo {
            period_id,
            starting_at: generated.period.starting_at,
            ending_at: generated.period.ending_at,
            allocation_count: generated.payments.len(),
        });
    }

    info!(
        employer_id,
        generated = periods.len(),
        "Completed period generation"
    );
    Ok(GenerationReport {
        employer_id,
        periods,
    })
}

/// Requests a payroll period status transition and commits the outcome.
///
/// # Errors
///
/// Returns a state-conflict error (`PENDING_PAYMENTS_EXIST`,
/// `PAYMENT_ALREADY_MADE`, `INVALID_STATUS_TRANSITION`) if the transition
/// is rejected; nothing is written in that case.
pub fn set_period_status(
    conn: &mut SqliteConnection,
    request: &SetPeriodStatusRequest,
    now: OffsetDateTime,
) -> Result<SetPeriodStatusResponse, ApiError> {
    let state: EngineState = load_engine_state(conn, request.employer_id)?;
    let outcome: TransitionOutcome = shift_pay::set_period_status(
        &state,
        request.period_id,
        request.target,
        Actor::new(request.employer_id.to_string(), String::from("employer")),
        Cause::new(
            format!("period-{}-{}", request.period_id, request.target),
            format!("Requested transition to {}", request.target),
        ),
    )?;

    commit_period_transition(conn, &outcome, now)?;

    Ok(SetPeriodStatusResponse {
        period_id: request.period_id,
        status: outcome.period.status,
        paid_worker_ids: outcome
            .created_payments
            .iter()
            .map(|payment| payment.worker_id)
            .collect(),
    })
}

/// Approves every pending allocation in a period, the step before
/// finalization.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn approve_pending_payments(
    conn: &mut SqliteConnection,
    period_id: i64,
) -> Result<usize, ApiError> {
    Ok(shift_pay_persistence::approve_period_payments(conn, period_id)?)
}
