// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod attendance;
mod error;
mod geo;
mod hours;
mod period_schedule;
mod tax;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use attendance::{can_clock_in, can_clock_out};
pub use error::DomainError;
pub use geo::{GeoPoint, distance_meters, within_radius};
pub use hours::{
    ClippedInterval, HoursSplit, UnderScheduledHoursPolicy, clip_to_period, hours_between,
    split_hours,
};
pub use period_schedule::{initial_baseline, period_bounds, realigned_baseline};
pub use tax::{WithholdingBracket, WithholdingTables, adjusted_annual_wage};
pub use types::{
    AppliedDeduction, AttendanceRecord, Deduction, DeductionKind, EmployeePayment, Employer,
    FilingStatus, InviteStatus, PayrollPeriod, PayrollSettings, PaymentApproval, PeriodLengthType,
    PeriodPayment, PeriodStatus, Shift, ShiftApplication, ShiftInvite, ShiftStatus,
    WorkerTaxProfile,
};
pub use validation::{validate_deductions, validate_payroll_settings, validate_shift_window};
