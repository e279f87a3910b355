// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The payroll period finalizer.
//!
//! Drives the Open ⇄ Finalized → Paid state machine. Finalization groups
//! the period's allocations per worker and produces one aggregate
//! `EmployeePayment` each, net of deductions and withholding; reopening
//! reverses the aggregation. Paid is terminal and only reachable from
//! Finalized, on behalf of the external payment-execution trigger.
//!
//! Requesting the period's current status is a no-op success; no duplicate
//! aggregation can occur.

use crate::error::CoreError;
use crate::state::{EngineState, TransitionOutcome};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shift_pay_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use shift_pay_domain::{
    AppliedDeduction, DeductionKind, DomainError, EmployeePayment, PayrollPeriod, PaymentApproval,
    PeriodPayment, PeriodStatus, WorkerTaxProfile,
};
use std::collections::BTreeMap;

/// Requests a status transition on a payroll period.
///
/// # Arguments
///
/// * `state` - The current engine state (immutable)
/// * `period_id` - The period to transition
/// * `target` - The requested status
/// * `actor` - The actor performing this transition
/// * `cause` - The cause or reason for this transition
///
/// # Errors
///
/// Returns an error if:
/// - The period does not exist in the snapshot
/// - The transition is not permitted from the current status
/// - Finalization is requested while allocations are still pending
/// - Reopening is requested after a payment was made
pub fn set_period_status(
    state: &EngineState,
    period_id: i64,
    target: PeriodStatus,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionOutcome, CoreError> {
    let period: &PayrollPeriod =
        state
            .period_by_id(period_id)
            .ok_or(DomainError::PeriodNotFound { period_id })?;
    let current: PeriodStatus = period.status;
    let before: StateSnapshot = state.to_snapshot();

    // Idempotent re-request: succeed without touching anything.
    if current == target {
        let audit_event: AuditEvent = AuditEvent::new(
            actor,
            cause,
            Action::new(
                String::from("SetPeriodStatus"),
                Some(format!("period {period_id} already {target}; no-op")),
            ),
            before.clone(),
            before,
            state.employer.employer_id,
        );
        return Ok(TransitionOutcome {
            new_state: state.clone(),
            period: period.clone(),
            created_payments: Vec::new(),
            deleted_payment_ids: Vec::new(),
            audit_event,
        });
    }

    if !current.can_transition_to(target) {
        let reason: String = match (current, target) {
            (PeriodStatus::Paid, _) => String::from("paid periods are immutable"),
            (PeriodStatus::Open, PeriodStatus::Paid) => {
                String::from("a period must be finalized before payment")
            }
            _ => String::from("transition not permitted"),
        };
        return Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition {
                from: current.as_str().to_string(),
                to: target.as_str().to_string(),
                reason,
            },
        ));
    }

    let mut new_state: EngineState = state.clone();
    let mut created_payments: Vec<EmployeePayment> = Vec::new();
    let mut deleted_payment_ids: Vec<i64> = Vec::new();

    match target {
        PeriodStatus::Finalized => {
            created_payments = finalize(&mut new_state, period_id)?;
        }
        PeriodStatus::Open => {
            deleted_payment_ids = reopen(&mut new_state, period_id)?;
        }
        PeriodStatus::Paid => {
            mark_paid(&mut new_state, period_id);
        }
    }

    set_status(&mut new_state, period_id, target);
    let period: PayrollPeriod = new_state
        .period_by_id(period_id)
        .cloned()
        .ok_or(DomainError::PeriodNotFound { period_id })?;

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("SetPeriodStatus"),
            Some(format!(
                "period {period_id}: {current} -> {target}; created {} payment(s), deleted {}",
                created_payments.len(),
                deleted_payment_ids.len()
            )),
        ),
        before,
        new_state.to_snapshot(),
        new_state.employer.employer_id,
    );

    Ok(TransitionOutcome {
        new_state,
        period,
        created_payments,
        deleted_payment_ids,
        audit_event,
    })
}

/// Aggregates the period's allocations into one employee payment per
/// worker.
fn finalize(state: &mut EngineState, period_id: i64) -> Result<Vec<EmployeePayment>, CoreError> {
    let allocations: Vec<&PeriodPayment> = state
        .period_payments
        .iter()
        .filter(|payment| payment.period_id == Some(period_id))
        .collect();

    let pending_count: usize = allocations
        .iter()
        .filter(|payment| payment.approval == PaymentApproval::Pending)
        .count();
    if pending_count > 0 {
        return Err(CoreError::DomainViolation(
            DomainError::PendingPaymentsExist {
                period_id,
                pending_count,
            },
        ));
    }

    // Group per worker; BTreeMap keeps the output order deterministic.
    let mut per_worker: BTreeMap<i64, Vec<&PeriodPayment>> = BTreeMap::new();
    for payment in allocations {
        per_worker.entry(payment.worker_id).or_default().push(payment);
    }

    let periods_per_year: Decimal = annualization_factor(state, period_id)?;
    let mut created: Vec<EmployeePayment> = Vec::new();

    for (worker_id, rows) in per_worker {
        // Gross earnings from the regular/overtime split, not from the raw
        // clocked total_amount; the two diverge for short shifts.
        let earnings: Decimal = rows
            .iter()
            .map(|row| row.hourly_rate * (row.regular_hours + row.over_time))
            .sum::<Decimal>()
            .round_dp(2);

        let mut deduction_list: Vec<AppliedDeduction> = Vec::new();
        for deduction in &state.employer.deductions {
            let amount: Decimal = match deduction.kind {
                DeductionKind::Percentage => {
                    (earnings * deduction.value / dec!(100)).round_dp(2)
                }
                DeductionKind::Amount => deduction.value,
            };
            deduction_list.push(AppliedDeduction {
                name: deduction.name.clone(),
                amount,
            });
        }
        let deductions: Decimal = deduction_list.iter().map(|entry| entry.amount).sum();

        let default_profile: WorkerTaxProfile =
            WorkerTaxProfile::new(worker_id, shift_pay_domain::FilingStatus::Single, false);
        let profile: &WorkerTaxProfile =
            state.tax_profile_for(worker_id).unwrap_or(&default_profile);
        let taxes: Decimal =
            state
                .tax_tables
                .period_withholding(earnings, periods_per_year, profile);

        created.push(EmployeePayment {
            employee_payment_id: None,
            period_id,
            worker_id,
            earnings,
            deduction_list,
            deductions,
            taxes,
            amount: earnings - deductions - taxes,
            paid: false,
        });
    }

    state.employee_payments.extend(created.iter().cloned());
    Ok(created)
}

/// Deletes the period's employee payments, failing if any was paid.
fn reopen(state: &mut EngineState, period_id: i64) -> Result<Vec<i64>, CoreError> {
    if let Some(paid) = state
        .employee_payments
        .iter()
        .find(|payment| payment.period_id == period_id && payment.paid)
    {
        return Err(CoreError::DomainViolation(DomainError::PaymentAlreadyMade {
            period_id,
            worker_id: paid.worker_id,
        }));
    }

    let mut deleted: Vec<i64> = Vec::new();
    state.employee_payments.retain(|payment| {
        if payment.period_id == period_id {
            if let Some(id) = payment.employee_payment_id {
                deleted.push(id);
            }
            false
        } else {
            true
        }
    });
    Ok(deleted)
}

/// Marks the period's payments as executed.
fn mark_paid(state: &mut EngineState, period_id: i64) {
    for payment in &mut state.employee_payments {
        if payment.period_id == period_id {
            payment.paid = true;
        }
    }
    for allocation in &mut state.period_payments {
        if allocation.period_id == Some(period_id) {
            allocation.approval = PaymentApproval::Paid;
        }
    }
}

fn set_status(state: &mut EngineState, period_id: i64, target: PeriodStatus) {
    for period in &mut state.periods {
        if period.period_id == Some(period_id) {
            period.status = target;
        }
    }
}

/// Periods-per-year factor for withholding annualization: 52 for weekly
/// periods, 26 for bi-weekly, fractional otherwise.
fn annualization_factor(state: &EngineState, period_id: i64) -> Result<Decimal, CoreError> {
    let period: &PayrollPeriod =
        state
            .period_by_id(period_id)
            .ok_or(DomainError::PeriodNotFound { period_id })?;
    if period.length == 0 {
        return Err(CoreError::DomainViolation(DomainError::InvalidPeriodLength {
            length: period.length,
        }));
    }
    Ok(dec!(364) / Decimal::from(period.length))
}
