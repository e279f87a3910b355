// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shift_pay_audit::{AuditEvent, StateSnapshot};
use shift_pay_domain::{
    AttendanceRecord, EmployeePayment, Employer, PayrollPeriod, PeriodPayment, Shift,
    ShiftApplication, ShiftInvite, WithholdingTables, WorkerTaxProfile,
};

/// The complete engine state scoped to a single employer.
///
/// Batch operations (sweep, generation, finalization) take a snapshot and
/// produce a new one plus an audit event; the caller commits the outcome
/// atomically. Employers never share state, so snapshots can be processed
/// independently.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    /// The employer this state is scoped to.
    pub employer: Employer,
    /// The employer's shifts.
    pub shifts: Vec<Shift>,
    /// Attendance records for the employer's shifts.
    pub records: Vec<AttendanceRecord>,
    /// Invites to the employer's shifts.
    pub invites: Vec<ShiftInvite>,
    /// Applications to the employer's shifts.
    pub applications: Vec<ShiftApplication>,
    /// Generated payroll periods.
    pub periods: Vec<PayrollPeriod>,
    /// Per-record period allocations.
    pub period_payments: Vec<PeriodPayment>,
    /// Per-worker aggregates for finalized periods.
    pub employee_payments: Vec<EmployeePayment>,
    /// Tax profiles for workers appearing in this employer's payroll.
    pub tax_profiles: Vec<WorkerTaxProfile>,
    /// Withholding schedules in effect.
    pub tax_tables: WithholdingTables,
}

impl EngineState {
    /// Creates an empty state for an employer.
    #[must_use]
    pub fn new(employer: Employer) -> Self {
        Self {
            employer,
            shifts: Vec::new(),
            records: Vec::new(),
            invites: Vec::new(),
            applications: Vec::new(),
            periods: Vec::new(),
            period_payments: Vec::new(),
            employee_payments: Vec::new(),
            tax_profiles: Vec::new(),
            tax_tables: WithholdingTables::default(),
        }
    }

    /// Finds a shift by its persisted id.
    #[must_use]
    pub fn shift_by_id(&self, shift_id: i64) -> Option<&Shift> {
        self.shifts
            .iter()
            .find(|shift| shift.shift_id == Some(shift_id))
    }

    /// Finds a payroll period by its persisted id.
    #[must_use]
    pub fn period_by_id(&self, period_id: i64) -> Option<&PayrollPeriod> {
        self.periods
            .iter()
            .find(|period| period.period_id == Some(period_id))
    }

    /// Returns the worker's currently open attendance record, if any.
    ///
    /// At most one can exist; the storage layer enforces that.
    #[must_use]
    pub fn open_record_for_worker(&self, worker_id: i64) -> Option<&AttendanceRecord> {
        self.records
            .iter()
            .find(|record| record.worker_id == worker_id && record.is_open())
    }

    /// Returns the worker's tax profile, if one is on file.
    #[must_use]
    pub fn tax_profile_for(&self, worker_id: i64) -> Option<&WorkerTaxProfile> {
        self.tax_profiles
            .iter()
            .find(|profile| profile.worker_id == worker_id)
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "employer={},shifts={},records={},periods={},allocations={},employee_payments={}",
            self.employer.employer_id.unwrap_or_default(),
            self.shifts.len(),
            self.records.len(),
            self.periods.len(),
            self.period_payments.len(),
            self.employee_payments.len(),
        ))
    }
}

/// A payroll period together with the allocations created for it.
///
/// Payment rows are nested rather than flattened so the persistence layer
/// can insert a period and its rows in one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPeriod {
    /// The period, not yet persisted.
    pub period: PayrollPeriod,
    /// Allocations for attendance records falling inside the period.
    pub payments: Vec<PeriodPayment>,
}

/// The result of a sweep run.
///
/// Transitions are atomic: either the whole outcome is committed or none
/// of it is.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepOutcome {
    /// The new state after the sweep.
    pub new_state: EngineState,
    /// Records auto-closed in this pass, for the notification dispatcher.
    pub closed_records: Vec<AttendanceRecord>,
    /// Shifts expired in this pass.
    pub expired_shift_ids: Vec<i64>,
    /// Invites expired in this pass.
    pub expired_invite_ids: Vec<i64>,
    /// Applications deleted in this pass.
    pub deleted_application_ids: Vec<i64>,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

impl SweepOutcome {
    /// Returns whether the sweep changed anything.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.closed_records.is_empty()
            && self.expired_shift_ids.is_empty()
            && self.expired_invite_ids.is_empty()
            && self.deleted_application_ids.is_empty()
    }
}

/// The result of a generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    /// The new state after generation.
    pub new_state: EngineState,
    /// Periods created in this run, oldest first.
    pub generated: Vec<GeneratedPeriod>,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of a period status transition.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOutcome {
    /// The new state after the transition.
    pub new_state: EngineState,
    /// The period in its new status.
    pub period: PayrollPeriod,
    /// Employee payments created by finalization, if any.
    pub created_payments: Vec<EmployeePayment>,
    /// Persisted ids of employee payments deleted by reopening, if any.
    pub deleted_payment_ids: Vec<i64>,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
