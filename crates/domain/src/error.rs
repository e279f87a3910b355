// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A shift's scheduled window is inverted or empty.
    ShiftWindowInvalid {
        /// The scheduled start.
        starting_at: OffsetDateTime,
        /// The scheduled end.
        ending_at: OffsetDateTime,
    },
    /// The worker is not on the shift's accepted roster.
    NotRostered {
        /// The shift.
        shift_id: i64,
        /// The worker.
        worker_id: i64,
    },
    /// The worker already has an open attendance record on another shift.
    AlreadyClockedInElsewhere {
        /// The worker.
        worker_id: i64,
        /// The shift holding the open record.
        open_shift_id: i64,
    },
    /// The requested clock-in precedes the earliest allowed time.
    BeforeWindow {
        /// The requested time.
        requested_at: OffsetDateTime,
        /// The earliest legal clock-in time.
        earliest: OffsetDateTime,
    },
    /// The requested time falls after the latest allowed time.
    AfterWindow {
        /// The requested time.
        requested_at: OffsetDateTime,
        /// The latest legal time.
        latest: OffsetDateTime,
    },
    /// No open attendance record exists for this shift and worker.
    NoOpenRecord {
        /// The shift.
        shift_id: i64,
        /// The worker.
        worker_id: i64,
    },
    /// The reported position is outside the venue's allowed radius, or no
    /// position was reported for a venue that declares one.
    FarFromVenue {
        /// Distance from the venue, in whole meters. `None` when no
        /// position was reported.
        distance_meters: Option<u64>,
        /// The allowed radius, in whole meters.
        allowed_meters: u64,
    },
    /// The employer has no payroll period starting time configured.
    ConfigMissing {
        /// The employer.
        employer_id: i64,
    },
    /// The employer's payroll period length type is not supported.
    UnsupportedLengthType {
        /// The configured length type.
        length_type: String,
    },
    /// A payroll period cannot be finalized while allocations are pending.
    PendingPaymentsExist {
        /// The period.
        period_id: i64,
        /// How many allocations are still pending.
        pending_count: usize,
    },
    /// A payroll period cannot be reopened once a payment has been made.
    PaymentAlreadyMade {
        /// The period.
        period_id: i64,
        /// The worker whose payment was already made.
        worker_id: i64,
    },
    /// A status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is rejected.
        reason: String,
    },
    /// Failed to parse a shift status from a string.
    InvalidShiftStatus(String),
    /// Failed to parse an invite status from a string.
    InvalidInviteStatus(String),
    /// Failed to parse a payroll period status from a string.
    InvalidPeriodStatus(String),
    /// Failed to parse a payment approval status from a string.
    InvalidPaymentApproval(String),
    /// Failed to parse a filing status from a string.
    InvalidFilingStatus(String),
    /// Failed to parse a deduction kind from a string.
    InvalidDeductionKind(String),
    /// A deduction entry is malformed.
    InvalidDeduction {
        /// The deduction name.
        name: String,
        /// Why the entry is invalid.
        reason: String,
    },
    /// An hourly rate is negative.
    InvalidHourlyRate(String),
    /// A payroll period length must be at least one day.
    InvalidPeriodLength {
        /// The invalid length value.
        length: u32,
    },
    /// The requested shift does not exist in the snapshot.
    ShiftNotFound {
        /// The shift.
        shift_id: i64,
    },
    /// The requested payroll period does not exist in the snapshot.
    PeriodNotFound {
        /// The period.
        period_id: i64,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Failed to convert a date between calendar representations.
    DateConversionError {
        /// Description of the conversion that failed.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShiftWindowInvalid {
                starting_at,
                ending_at,
            } => {
                write!(
                    f,
                    "Shift window is invalid: starting_at {starting_at} must precede ending_at {ending_at}"
                )
            }
            Self::NotRostered { shift_id, worker_id } => {
                write!(
                    f,
                    "Worker {worker_id} is not on the accepted roster of shift {shift_id}"
                )
            }
            Self::AlreadyClockedInElsewhere {
                worker_id,
                open_shift_id,
            } => {
                write!(
                    f,
                    "Worker {worker_id} already has an open attendance record on shift {open_shift_id}"
                )
            }
            Self::BeforeWindow {
                requested_at,
                earliest,
            } => {
                write!(
                    f,
                    "Requested time {requested_at} is before the earliest allowed time {earliest}"
                )
            }
            Self::AfterWindow {
                requested_at,
                latest,
            } => {
                write!(
                    f,
                    "Requested time {requested_at} is after the latest allowed time {latest}"
                )
            }
            Self::NoOpenRecord { shift_id, worker_id } => {
                write!(
                    f,
                    "No open attendance record for worker {worker_id} on shift {shift_id}"
                )
            }
            Self::FarFromVenue {
                distance_meters,
                allowed_meters,
            } => match distance_meters {
                Some(distance) => write!(
                    f,
                    "Position is {distance}m from the venue; allowed radius is {allowed_meters}m"
                ),
                None => write!(
                    f,
                    "No position reported; the venue requires presence within {allowed_meters}m"
                ),
            },
            Self::ConfigMissing { employer_id } => {
                write!(
                    f,
                    "Employer {employer_id} has no payroll period starting time configured"
                )
            }
            Self::UnsupportedLengthType { length_type } => {
                write!(
                    f,
                    "Payroll period length type '{length_type}' is not supported; only day-based lengths are"
                )
            }
            Self::PendingPaymentsExist {
                period_id,
                pending_count,
            } => {
                write!(
                    f,
                    "Period {period_id} has {pending_count} pending payment(s); all must be approved before finalization"
                )
            }
            Self::PaymentAlreadyMade { period_id, worker_id } => {
                write!(
                    f,
                    "Period {period_id} cannot be reopened: payment to worker {worker_id} was already made"
                )
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition from '{from}' to '{to}': {reason}")
            }
            Self::InvalidShiftStatus(s) => write!(f, "Invalid shift status: {s}"),
            Self::InvalidInviteStatus(s) => write!(f, "Invalid invite status: {s}"),
            Self::InvalidPeriodStatus(s) => write!(f, "Invalid payroll period status: {s}"),
            Self::InvalidPaymentApproval(s) => write!(f, "Invalid payment approval status: {s}"),
            Self::InvalidFilingStatus(s) => write!(f, "Invalid filing status: {s}"),
            Self::InvalidDeductionKind(s) => write!(f, "Invalid deduction kind: {s}"),
            Self::InvalidDeduction { name, reason } => {
                write!(f, "Invalid deduction '{name}': {reason}")
            }
            Self::InvalidHourlyRate(msg) => write!(f, "Invalid hourly rate: {msg}"),
            Self::InvalidPeriodLength { length } => {
                write!(
                    f,
                    "Payroll period length must be at least one day, got {length}"
                )
            }
            Self::ShiftNotFound { shift_id } => write!(f, "Shift {shift_id} not found"),
            Self::PeriodNotFound { period_id } => {
                write!(f, "Payroll period {period_id} not found")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::DateConversionError { reason } => {
                write!(f, "Date conversion failed: {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
