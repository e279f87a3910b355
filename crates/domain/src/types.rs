// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::geo::GeoPoint;
use crate::hours::UnderScheduledHoursPolicy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Represents the lifecycle state of a shift.
///
/// Each entity carries its own status enumeration; status values are never
/// shared between entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// Being drafted by the employer. Not visible to workers.
    #[default]
    Draft,
    /// Published and accepting applications.
    Open,
    /// Roster complete.
    Filled,
    /// Temporarily withheld by the employer.
    Paused,
    /// Window lapsed without completion; set by the sweeper.
    Expired,
    /// Worked and closed out.
    Completed,
    /// Explicitly cancelled by the employer.
    Cancelled,
}

impl ShiftStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Open => "open",
            Self::Filled => "filled",
            Self::Paused => "paused",
            Self::Expired => "expired",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if this status is terminal.
    ///
    /// Terminal shifts are immutable; only non-terminal shifts may still be
    /// cancelled explicitly.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Expired | Self::Completed | Self::Cancelled)
    }

    /// Returns true if the sweeper may expire a shift in this status.
    #[must_use]
    pub const fn is_expirable(&self) -> bool {
        matches!(self, Self::Open | Self::Filled)
    }

    /// Checks if a transition from this status to another is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self, target) {
            (_, Self::Cancelled)
            | (Self::Draft, Self::Open)
            | (Self::Open, Self::Filled | Self::Paused | Self::Expired | Self::Completed)
            | (Self::Filled, Self::Open | Self::Paused | Self::Expired | Self::Completed)
            | (Self::Paused, Self::Open | Self::Filled) => true,
            _ => false,
        }
    }
}

impl FromStr for ShiftStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "open" => Ok(Self::Open),
            "filled" => Ok(Self::Filled),
            "paused" => Ok(Self::Paused),
            "expired" => Ok(Self::Expired),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidShiftStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents the lifecycle state of a shift invite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InviteStatus {
    /// Sent, awaiting the worker's answer.
    #[default]
    Pending,
    /// Accepted by the worker.
    Accepted,
    /// Declined by the worker.
    Rejected,
    /// The underlying shift expired before an answer; set by the sweeper.
    Expired,
}

impl InviteStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
        }
    }
}

impl FromStr for InviteStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "expired" => Ok(Self::Expired),
            _ => Err(DomainError::InvalidInviteStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents the lifecycle state of a payroll period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PeriodStatus {
    /// Accepting allocations; payments editable.
    #[default]
    Open,
    /// Locked; per-worker aggregate payments computed.
    Finalized,
    /// Payment executed. Terminal.
    Paid,
}

impl PeriodStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Finalized => "finalized",
            Self::Paid => "paid",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Open → Finalized
    /// - Finalized → Open
    /// - Finalized → Paid
    ///
    /// Paid is terminal.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::Finalized)
                | (Self::Finalized, Self::Open)
                | (Self::Finalized, Self::Paid)
        )
    }
}

impl FromStr for PeriodStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "finalized" => Ok(Self::Finalized),
            "paid" => Ok(Self::Paid),
            _ => Err(DomainError::InvalidPeriodStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Approval state of a single period payment allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentApproval {
    /// Awaiting employer review.
    #[default]
    Pending,
    /// Approved for payment.
    Approved,
    /// Paid out.
    Paid,
}

impl PaymentApproval {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Paid => "paid",
        }
    }
}

impl FromStr for PaymentApproval {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "paid" => Ok(Self::Paid),
            _ => Err(DomainError::InvalidPaymentApproval(s.to_string())),
        }
    }
}

/// Unit of a configured payroll period length.
///
/// Only day-based lengths are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PeriodLengthType {
    /// Length measured in whole days.
    #[default]
    Days,
}

impl PeriodLengthType {
    /// Converts this length type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Days => "days",
        }
    }
}

impl FromStr for PeriodLengthType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "days" => Ok(Self::Days),
            _ => Err(DomainError::UnsupportedLengthType {
                length_type: s.to_string(),
            }),
        }
    }
}

/// Federal filing status for withholding table selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    /// Single filer.
    #[default]
    Single,
    /// Married filing jointly (or qualifying widower).
    MarriedJointly,
    /// Married filing separately. Uses the single table.
    MarriedSeparately,
    /// Head of household.
    HeadOfHousehold,
}

impl FilingStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::MarriedJointly => "married_jointly",
            Self::MarriedSeparately => "married_separately",
            Self::HeadOfHousehold => "head_of_household",
        }
    }
}

impl FromStr for FilingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "married_jointly" => Ok(Self::MarriedJointly),
            "married_separately" => Ok(Self::MarriedSeparately),
            "head_of_household" => Ok(Self::HeadOfHousehold),
            _ => Err(DomainError::InvalidFilingStatus(s.to_string())),
        }
    }
}

/// How a configured employer deduction is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    /// Percentage of gross earnings, 0–100.
    Percentage,
    /// Flat amount per period.
    Amount,
}

impl DeductionKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Amount => "amount",
        }
    }
}

impl FromStr for DeductionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(Self::Percentage),
            "amount" => Ok(Self::Amount),
            _ => Err(DomainError::InvalidDeductionKind(s.to_string())),
        }
    }
}

/// A configured employer deduction applied at finalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    /// Display name (e.g., "401k", "Union dues").
    pub name: String,
    /// Whether `value` is a percentage or a flat amount.
    pub kind: DeductionKind,
    /// Percentage (0–100) or flat amount, per `kind`.
    pub value: Decimal,
}

impl Deduction {
    /// Creates a percentage deduction.
    #[must_use]
    pub const fn percentage(name: String, value: Decimal) -> Self {
        Self {
            name,
            kind: DeductionKind::Percentage,
            value,
        }
    }

    /// Creates a flat-amount deduction.
    #[must_use]
    pub const fn amount(name: String, value: Decimal) -> Self {
        Self {
            name,
            kind: DeductionKind::Amount,
            value,
        }
    }
}

/// Employer payroll configuration.
///
/// Read-only input to the period generator. The starting time's weekday and
/// time-of-day anchor all period boundaries for the employer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSettings {
    /// Anchor timestamp for period boundaries. `None` means payroll has not
    /// been configured; generation fails until it is set.
    pub period_starting_time: Option<OffsetDateTime>,
    /// Period length, in units of `period_length_type`.
    pub period_length: u32,
    /// Unit of `period_length`.
    pub period_length_type: PeriodLengthType,
}

impl PayrollSettings {
    /// Creates new `PayrollSettings`.
    #[must_use]
    pub const fn new(
        period_starting_time: Option<OffsetDateTime>,
        period_length: u32,
        period_length_type: PeriodLengthType,
    ) -> Self {
        Self {
            period_starting_time,
            period_length,
            period_length_type,
        }
    }
}

/// An employer snapshot as consumed by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employer {
    /// Canonical identifier. `None` until persisted.
    pub employer_id: Option<i64>,
    /// When the employer onboarded; baseline for the first payroll run.
    pub created_at: OffsetDateTime,
    /// Payroll period configuration.
    pub payroll: PayrollSettings,
    /// Deductions applied to every finalized period.
    pub deductions: Vec<Deduction>,
    /// Allowed distance between a worker and the venue at clock time.
    pub venue_radius_meters: f64,
    /// How hours below the scheduled duration are paid.
    pub under_scheduled_policy: UnderScheduledHoursPolicy,
}

impl Employer {
    /// Default venue proximity tolerance.
    pub const DEFAULT_VENUE_RADIUS_METERS: f64 = 150.0;

    /// Creates a new `Employer` without a persisted ID.
    #[must_use]
    pub const fn new(created_at: OffsetDateTime, payroll: PayrollSettings) -> Self {
        Self {
            employer_id: None,
            created_at,
            payroll,
            deductions: Vec::new(),
            venue_radius_meters: Self::DEFAULT_VENUE_RADIUS_METERS,
            under_scheduled_policy: UnderScheduledHoursPolicy::ZeroBelowSchedule,
        }
    }

    /// Creates an `Employer` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        employer_id: i64,
        created_at: OffsetDateTime,
        payroll: PayrollSettings,
        deductions: Vec<Deduction>,
        venue_radius_meters: f64,
        under_scheduled_policy: UnderScheduledHoursPolicy,
    ) -> Self {
        Self {
            employer_id: Some(employer_id),
            created_at,
            payroll,
            deductions,
            venue_radius_meters,
            under_scheduled_policy,
        }
    }
}

/// A scheduled work slot offered by an employer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Canonical identifier. `None` until persisted.
    pub shift_id: Option<i64>,
    /// The employer offering this shift.
    pub employer_id: i64,
    /// Scheduled start (inclusive).
    pub starting_at: OffsetDateTime,
    /// Scheduled end (exclusive).
    pub ending_at: OffsetDateTime,
    /// Minutes a clock-in may precede `starting_at`.
    /// `None` = unrestricted, `0` = exactly at start or later.
    pub maximum_clockin_delta_minutes: Option<i64>,
    /// Grace minutes a clock-out may follow `ending_at`.
    /// `None` = open-ended.
    pub maximum_clockout_delay_minutes: Option<i64>,
    /// Hourly rate paid for this shift.
    pub minimum_hourly_rate: Decimal,
    /// Lifecycle status.
    pub status: ShiftStatus,
    /// Venue position; unset coordinates skip proximity checks.
    pub venue: GeoPoint,
    /// Worker ids on the accepted roster.
    pub roster: Vec<i64>,
}

impl Shift {
    /// Creates a new `Shift`, validating the scheduled window.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ShiftWindowInvalid` if `starting_at` does not
    /// precede `ending_at`, or `DomainError::InvalidHourlyRate` if the rate
    /// is negative.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        employer_id: i64,
        starting_at: OffsetDateTime,
        ending_at: OffsetDateTime,
        maximum_clockin_delta_minutes: Option<i64>,
        maximum_clockout_delay_minutes: Option<i64>,
        minimum_hourly_rate: Decimal,
        venue: GeoPoint,
        roster: Vec<i64>,
    ) -> Result<Self, DomainError> {
        if starting_at >= ending_at {
            return Err(DomainError::ShiftWindowInvalid {
                starting_at,
                ending_at,
            });
        }
        if minimum_hourly_rate.is_sign_negative() {
            return Err(DomainError::InvalidHourlyRate(format!(
                "rate must be non-negative, got {minimum_hourly_rate}"
            )));
        }
        Ok(Self {
            shift_id: None,
            employer_id,
            starting_at,
            ending_at,
            maximum_clockin_delta_minutes,
            maximum_clockout_delay_minutes,
            minimum_hourly_rate,
            status: ShiftStatus::Open,
            venue,
            roster,
        })
    }

    /// Returns the scheduled duration in hours.
    ///
    /// This is the projected duration used for the overtime split, not the
    /// clocked one.
    #[must_use]
    pub fn scheduled_hours(&self) -> Decimal {
        let seconds: i64 = (self.ending_at - self.starting_at).whole_seconds();
        (Decimal::from(seconds) / dec!(3600)).round_dp(4)
    }

    /// Returns whether the worker is on the accepted roster.
    #[must_use]
    pub fn is_rostered(&self, worker_id: i64) -> bool {
        self.roster.contains(&worker_id)
    }
}

/// A worker's clock-in/clock-out pair for a shift.
///
/// `ended_at = None` means the record is currently open. At most one record
/// per worker may be open at any time, across all shifts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Canonical identifier. `None` until persisted.
    pub record_id: Option<i64>,
    /// The shift this record belongs to.
    pub shift_id: i64,
    /// The worker this record belongs to.
    pub worker_id: i64,
    /// Denormalized employer, for period allocation queries.
    pub employer_id: i64,
    /// When the worker clocked in.
    pub started_at: OffsetDateTime,
    /// When the worker clocked out. `None` while open.
    pub ended_at: Option<OffsetDateTime>,
    /// Reported position at clock-in.
    pub position_in: GeoPoint,
    /// Reported position at clock-out, once closed manually.
    pub position_out: Option<GeoPoint>,
    /// True when the sweeper closed this record rather than the worker.
    pub automatically_closed: bool,
}

impl AttendanceRecord {
    /// Creates a new open record at clock-in time.
    #[must_use]
    pub const fn open(
        shift_id: i64,
        worker_id: i64,
        employer_id: i64,
        started_at: OffsetDateTime,
        position_in: GeoPoint,
    ) -> Self {
        Self {
            record_id: None,
            shift_id,
            worker_id,
            employer_id,
            started_at,
            ended_at: None,
            position_in,
            position_out: None,
            automatically_closed: false,
        }
    }

    /// Returns whether this record is still open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Closes the record at the given time.
    pub const fn close(&mut self, at: OffsetDateTime, automatically: bool) {
        self.ended_at = Some(at);
        self.automatically_closed = automatically;
    }
}

/// An employer's invitation for a worker to join a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftInvite {
    /// Canonical identifier. `None` until persisted.
    pub invite_id: Option<i64>,
    /// The shift invited to.
    pub shift_id: i64,
    /// The invited worker.
    pub worker_id: i64,
    /// Lifecycle status.
    pub status: InviteStatus,
}

/// A worker's application to an open shift.
///
/// Applications carry no status; they are deleted when the shift reaches a
/// terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftApplication {
    /// Canonical identifier. `None` until persisted.
    pub application_id: Option<i64>,
    /// The shift applied to.
    pub shift_id: i64,
    /// The applying worker.
    pub worker_id: i64,
}

/// A fixed-length recurring accounting window for an employer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// Canonical identifier. `None` until persisted.
    pub period_id: Option<i64>,
    /// The employer this period belongs to.
    pub employer_id: i64,
    /// Period start (inclusive).
    pub starting_at: OffsetDateTime,
    /// Period end (inclusive).
    pub ending_at: OffsetDateTime,
    /// Configured length at generation time.
    pub length: u32,
    /// Unit of `length`.
    pub length_type: PeriodLengthType,
    /// Lifecycle status.
    pub status: PeriodStatus,
}

/// One attendance record's allocation into one payroll period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodPayment {
    /// Canonical identifier. `None` until persisted.
    pub payment_id: Option<i64>,
    /// The owning period. `None` until the period is persisted.
    pub period_id: Option<i64>,
    /// The allocated attendance record.
    pub record_id: i64,
    /// The worker paid by this allocation.
    pub worker_id: i64,
    /// Hours paid at the regular rate.
    pub regular_hours: Decimal,
    /// Hours beyond the scheduled duration.
    pub over_time: Decimal,
    /// Rate captured from the shift at allocation time.
    pub hourly_rate: Decimal,
    /// Raw clocked hours times the rate. Kept distinct from the
    /// regular/overtime split; the two can diverge for short shifts.
    pub total_amount: Decimal,
    /// True when the record's interval was clipped at a period boundary.
    pub split_payment: bool,
    /// Employer approval state.
    pub approval: PaymentApproval,
}

/// An itemized deduction applied to one worker's period aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDeduction {
    /// Name copied from the employer's configured deduction.
    pub name: String,
    /// The amount withheld.
    pub amount: Decimal,
}

/// Per-worker aggregate payment for a finalized period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePayment {
    /// Canonical identifier. `None` until persisted.
    pub employee_payment_id: Option<i64>,
    /// The finalized period.
    pub period_id: i64,
    /// The worker paid.
    pub worker_id: i64,
    /// Gross earnings: sum of rate × (regular + overtime) over allocations.
    pub earnings: Decimal,
    /// Itemized deductions.
    pub deduction_list: Vec<AppliedDeduction>,
    /// Total of `deduction_list`.
    pub deductions: Decimal,
    /// Withholding for this period.
    pub taxes: Decimal,
    /// Net amount: earnings − deductions − taxes.
    pub amount: Decimal,
    /// Whether the payment has been executed.
    pub paid: bool,
}

/// Per-worker W-4 style inputs for withholding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerTaxProfile {
    /// The worker this profile belongs to.
    pub worker_id: i64,
    /// Filing status selecting the bracket table.
    pub filing_status: FilingStatus,
    /// Whether the household has two concurrent incomes.
    pub dual_income: bool,
    /// Other annual income subtracted from the annualized wage.
    pub other_annual_income: Decimal,
    /// Configured adjustment added to the annualized wage.
    pub wage_adjustment: Decimal,
}

impl WorkerTaxProfile {
    /// Creates a profile with no adjustments.
    #[must_use]
    pub const fn new(worker_id: i64, filing_status: FilingStatus, dual_income: bool) -> Self {
        Self {
            worker_id,
            filing_status,
            dual_income,
            other_annual_income: Decimal::ZERO,
            wage_adjustment: Decimal::ZERO,
        }
    }
}
