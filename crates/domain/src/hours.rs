// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hour accounting for period allocation.
//!
//! Pure helpers that clip an attendance record's interval to a payroll
//! period and split the clocked hours into regular and overtime portions
//! against the shift's scheduled duration.
//!
//! ## Invariants
//!
//! - Clipping never widens an interval.
//! - An open record (no clock-out) yields zero hours.
//! - `regular + overtime <= clocked` always holds; the two sides are equal
//!   exactly when clocked hours reach the scheduled duration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// How hours below the scheduled duration are paid.
///
/// The upstream rule paid zero regular hours whenever clocked time fell
/// short of the schedule, leaving short shifts unpaid in the aggregate.
/// That rule is preserved as the default; the clocked-hours alternative is
/// available per employer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnderScheduledHoursPolicy {
    /// Clocked hours below the schedule pay zero regular hours.
    #[default]
    ZeroBelowSchedule,
    /// Clocked hours below the schedule pay as regular hours.
    PayClockedHours,
}

/// The result of splitting clocked hours against a scheduled duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursSplit {
    /// Hours paid at the regular rate.
    pub regular_hours: Decimal,
    /// Hours beyond the scheduled duration.
    pub over_time: Decimal,
}

/// An attendance interval clipped to a period's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClippedInterval {
    /// Effective start: the later of the record start and the period start.
    pub effective_start: OffsetDateTime,
    /// Effective end: the earlier of the record end and the period end.
    /// `None` when the record is still open.
    pub effective_end: Option<OffsetDateTime>,
    /// True when either boundary was moved.
    pub clipped: bool,
}

/// Clips a record's raw interval to a period's bounds.
///
/// # Arguments
///
/// * `record_start` - The record's raw `started_at`
/// * `record_end` - The record's raw `ended_at`, if closed
/// * `period_start` - The period's start (inclusive)
/// * `period_end` - The period's end (inclusive)
#[must_use]
pub fn clip_to_period(
    record_start: OffsetDateTime,
    record_end: Option<OffsetDateTime>,
    period_start: OffsetDateTime,
    period_end: OffsetDateTime,
) -> ClippedInterval {
    let effective_start: OffsetDateTime = record_start.max(period_start);
    let effective_end: Option<OffsetDateTime> = record_end.map(|end| end.min(period_end));

    let clipped: bool = effective_start != record_start
        || match (record_end, effective_end) {
            (Some(raw), Some(eff)) => raw != eff,
            _ => false,
        };

    ClippedInterval {
        effective_start,
        effective_end,
        clipped,
    }
}

/// Hours between two instants, rounded to four decimal places.
///
/// Returns zero for inverted intervals.
#[must_use]
pub fn hours_between(start: OffsetDateTime, end: OffsetDateTime) -> Decimal {
    if end <= start {
        return Decimal::ZERO;
    }
    let seconds: i64 = (end - start).whole_seconds();
    (Decimal::from(seconds) / dec!(3600)).round_dp(4)
}

/// Splits clocked hours against the scheduled duration.
///
/// Clocked hours beyond the schedule become overtime; the scheduled portion
/// is paid as regular hours. Clocked hours at or below the schedule follow
/// the employer's `UnderScheduledHoursPolicy`.
#[must_use]
pub fn split_hours(
    clocked_hours: Decimal,
    projected_hours: Decimal,
    policy: UnderScheduledHoursPolicy,
) -> HoursSplit {
    if clocked_hours > projected_hours {
        HoursSplit {
            regular_hours: projected_hours,
            over_time: clocked_hours - projected_hours,
        }
    } else {
        match policy {
            UnderScheduledHoursPolicy::ZeroBelowSchedule => HoursSplit {
                regular_hours: Decimal::ZERO,
                over_time: Decimal::ZERO,
            },
            UnderScheduledHoursPolicy::PayClockedHours => HoursSplit {
                regular_hours: clocked_hours,
                over_time: Decimal::ZERO,
            },
        }
    }
}
