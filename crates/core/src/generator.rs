// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The payroll period generator.
//!
//! Computes the sequence of periods an employer owes since its last
//! generated period (or since onboarding), and allocates attendance
//! records into each new period with the regular/overtime split.
//!
//! ## Invariants
//!
//! - Periods are contiguous and non-overlapping per employer.
//! - A period is never created for a window that has not fully elapsed.
//! - Generation is idempotent: re-running creates no duplicates because
//!   the baseline advances with the persisted periods.
//! - Each period and its allocations form one atomic unit; `generate_next`
//!   exists so the caller can commit period-by-period.

use crate::error::CoreError;
use crate::state::{EngineState, GeneratedPeriod, GenerationOutcome};
use rust_decimal::Decimal;
use shift_pay_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use shift_pay_domain::{
    AttendanceRecord, ClippedInterval, DomainError, HoursSplit, PayrollPeriod, PaymentApproval,
    PeriodPayment, PeriodStatus, Shift, clip_to_period, hours_between, initial_baseline,
    period_bounds, realigned_baseline, split_hours, validate_payroll_settings,
};
use time::OffsetDateTime;

/// Computes the baseline "end" the generation loop advances from.
///
/// With prior periods, the latest end is realigned to the anchor grid;
/// otherwise the synthetic baseline before the employer's creation date is
/// used.
fn compute_baseline(state: &EngineState) -> Result<OffsetDateTime, CoreError> {
    let employer_id: i64 = state.employer.employer_id.unwrap_or_default();
    let Some(anchor) = state.employer.payroll.period_starting_time else {
        return Err(CoreError::DomainViolation(DomainError::ConfigMissing {
            employer_id,
        }));
    };
    validate_payroll_settings(&state.employer.payroll)?;

    let last_end: Option<OffsetDateTime> = state
        .periods
        .iter()
        .map(|period| period.ending_at)
        .max();

    let baseline: OffsetDateTime = match last_end {
        Some(previous_end) => realigned_baseline(anchor, previous_end)?,
        None => initial_baseline(anchor, state.employer.created_at)?,
    };
    Ok(baseline)
}

/// Builds the next elapsed period for the snapshot, if one exists.
fn build_next_period(
    state: &EngineState,
    now: OffsetDateTime,
) -> Result<Option<GeneratedPeriod>, CoreError> {
    let baseline: OffsetDateTime = compute_baseline(state)?;
    let length: u32 = state.employer.payroll.period_length;
    let (starting_at, ending_at) = period_bounds(baseline, length)?;

    // Stop as soon as the candidate window has not fully elapsed.
    if ending_at >= now {
        return Ok(None);
    }

    let period: PayrollPeriod = PayrollPeriod {
        period_id: None,
        employer_id: state.employer.employer_id.unwrap_or_default(),
        starting_at,
        ending_at,
        length,
        length_type: state.employer.payroll.period_length_type,
        status: PeriodStatus::Open,
    };

    let payments: Vec<PeriodPayment> = allocate_records(state, &period)?;

    Ok(Some(GeneratedPeriod { period, payments }))
}

/// Allocates the employer's attendance records into a period.
///
/// Selects every record whose `started_at` falls within the period, clips
/// its interval to the period bounds, and computes the hour split and the
/// raw clocked amount.
fn allocate_records(
    state: &EngineState,
    period: &PayrollPeriod,
) -> Result<Vec<PeriodPayment>, CoreError> {
    let mut payments: Vec<PeriodPayment> = Vec::new();

    for record in &state.records {
        if record.started_at < period.starting_at || record.started_at > period.ending_at {
            continue;
        }
        let payment: PeriodPayment = allocate_one(state, period, record)?;
        payments.push(payment);
    }

    Ok(payments)
}

/// Allocates a single record, clipping it to the period.
fn allocate_one(
    state: &EngineState,
    period: &PayrollPeriod,
    record: &AttendanceRecord,
) -> Result<PeriodPayment, CoreError> {
    let shift: &Shift = state
        .shift_by_id(record.shift_id)
        .ok_or(DomainError::ShiftNotFound {
            shift_id: record.shift_id,
        })?;

    let clipped: ClippedInterval = clip_to_period(
        record.started_at,
        record.ended_at,
        period.starting_at,
        period.ending_at,
    );

    // An open record allocates with zero hours; its hours land in a later
    // period once closed, or stay unpaid if it never is.
    let clocked_hours: Decimal = clipped
        .effective_end
        .map_or(Decimal::ZERO, |end| hours_between(clipped.effective_start, end));

    let split: HoursSplit = split_hours(
        clocked_hours,
        shift.scheduled_hours(),
        state.employer.under_scheduled_policy,
    );

    // Raw clocked amount, deliberately distinct from the regular/overtime
    // split used by finalization.
    let total_amount: Decimal = (shift.minimum_hourly_rate * clocked_hours).round_dp(2);

    Ok(PeriodPayment {
        payment_id: None,
        period_id: period.period_id,
        record_id: record.record_id.unwrap_or_default(),
        worker_id: record.worker_id,
        regular_hours: split.regular_hours,
        over_time: split.over_time,
        hourly_rate: shift.minimum_hourly_rate,
        total_amount,
        split_payment: record.is_open() || clipped.clipped,
        approval: PaymentApproval::Pending,
    })
}

/// Applies one generated period to a snapshot.
fn apply_period(state: &mut EngineState, generated: &GeneratedPeriod) {
    state.periods.push(generated.period.clone());
    state.period_payments.extend(generated.payments.iter().cloned());
}

/// Generates the single next elapsed period, if any.
///
/// Intended for callers that commit period-by-period: apply the outcome,
/// persist it, and call again with the new state until `None`.
///
/// # Errors
///
/// Returns `ConfigMissing` if the employer has no period starting time,
/// or an allocation/date error; nothing is applied on error.
pub fn generate_next(
    state: &EngineState,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<Option<GenerationOutcome>, CoreError> {
    let before: StateSnapshot = state.to_snapshot();
    let Some(generated) = build_next_period(state, now)? else {
        return Ok(None);
    };

    let mut new_state: EngineState = state.clone();
    apply_period(&mut new_state, &generated);

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("GeneratePeriods"),
            Some(format!(
                "generated period [{} .. {}] with {} allocation(s)",
                generated.period.starting_at,
                generated.period.ending_at,
                generated.payments.len()
            )),
        ),
        before,
        new_state.to_snapshot(),
        new_state.employer.employer_id,
    );

    Ok(Some(GenerationOutcome {
        new_state,
        generated: vec![generated],
        audit_event,
    }))
}

/// Generates every elapsed period for the employer in one outcome.
///
/// All-or-nothing over the snapshot: an allocation failure in any period
/// discards the whole run. Callers needing period-by-period durability
/// should drive `generate_next` instead.
///
/// # Errors
///
/// Returns `ConfigMissing` if the employer has no period starting time,
/// or an allocation/date error.
pub fn generate(
    state: &EngineState,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<GenerationOutcome, CoreError> {
    let before: StateSnapshot = state.to_snapshot();
    let mut new_state: EngineState = state.clone();
    let mut generated: Vec<GeneratedPeriod> = Vec::new();

    while let Some(next) = build_next_period(&new_state, now)? {
        apply_period(&mut new_state, &next);
        generated.push(next);
    }

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("GeneratePeriods"),
            Some(format!("generated {} period(s)", generated.len())),
        ),
        before,
        new_state.to_snapshot(),
        new_state.employer.employer_id,
    );

    Ok(GenerationOutcome {
        new_state,
        generated,
        audit_event,
    })
}
