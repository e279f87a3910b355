// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payroll period boundary calculation.
//!
//! The employer's configured `period_starting_time` anchors every period
//! boundary: its weekday and time-of-day define where periods begin and
//! end. This module computes the baseline "end" a generator loop advances
//! from.
//!
//! ## Invariants
//!
//! - A baseline is always one second before an anchor time-of-day on an
//!   anchor weekday; period ends land on the same grid.
//! - The first baseline for an employer precedes or coincides with the
//!   employer's creation date.
//! - Realignment is idempotent: realigning an already-aligned period end
//!   reproduces it exactly.

use crate::error::DomainError;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use time::{OffsetDateTime, PrimitiveDateTime};

/// Converts a `time::Date` to a `chrono::NaiveDate` for weekday arithmetic.
fn to_naive_date(date: time::Date) -> Result<NaiveDate, DomainError> {
    NaiveDate::from_ymd_opt(date.year(), date.month() as u32, u32::from(date.day())).ok_or_else(
        || DomainError::DateConversionError {
            reason: format!("invalid calendar date: {date}"),
        },
    )
}

/// Converts a `chrono::NaiveDate` back to a `time::Date`.
fn from_naive_date(naive: NaiveDate) -> Result<time::Date, DomainError> {
    let month: time::Month = u8::try_from(naive.month())
        .ok()
        .and_then(|m| time::Month::try_from(m).ok())
        .ok_or_else(|| DomainError::DateConversionError {
            reason: format!("invalid month in date: {naive}"),
        })?;
    time::Date::from_calendar_date(
        naive.year(),
        month,
        u8::try_from(naive.day()).unwrap_or(1),
    )
    .map_err(|e| DomainError::DateConversionError {
        reason: format!("invalid calendar date {naive}: {e}"),
    })
}

/// Walks backward from `date` to the nearest `weekday` occurrence at or
/// before it.
fn weekday_at_or_before(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let mut current: NaiveDate = date;
    while current.weekday() != weekday {
        current -= Duration::days(1);
    }
    current
}

/// Walks forward from `date` to the nearest `weekday` occurrence at or
/// after it.
fn weekday_at_or_after(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let mut current: NaiveDate = date;
    while current.weekday() != weekday {
        current += Duration::days(1);
    }
    current
}

/// Combines a date with the anchor's time-of-day and steps back one second,
/// producing a baseline on the period-end grid.
fn baseline_on(date: NaiveDate, anchor: OffsetDateTime) -> Result<OffsetDateTime, DomainError> {
    let date: time::Date = from_naive_date(date)?;
    PrimitiveDateTime::new(date, anchor.time())
        .assume_utc()
        .checked_sub(time::Duration::seconds(1))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: String::from("computing period baseline"),
        })
}

/// Computes the synthetic baseline for an employer's first payroll run.
///
/// The baseline is the "end" of a period that never existed: the nearest
/// anchor-weekday occurrence at or before the employer's creation date, at
/// the anchor time-of-day, minus one second.
///
/// # Arguments
///
/// * `anchor` - The employer's configured period starting time
/// * `created_at` - The employer's creation date
///
/// # Errors
///
/// Returns an error if calendar conversion or date arithmetic fails.
pub fn initial_baseline(
    anchor: OffsetDateTime,
    created_at: OffsetDateTime,
) -> Result<OffsetDateTime, DomainError> {
    let anchor_weekday: Weekday = to_naive_date(anchor.date())?.weekday();
    let created: NaiveDate = to_naive_date(created_at.date())?;
    let aligned: NaiveDate = weekday_at_or_before(created, anchor_weekday);
    baseline_on(aligned, anchor)
}

/// Computes the baseline from the previous period's end, realigning
/// drifting boundaries.
///
/// The nearest anchor-weekday occurrence at or after `previous_end − 1 day`
/// is taken, the anchor time-of-day applied, and one second subtracted.
/// For an already-aligned previous end this reproduces it exactly.
///
/// # Arguments
///
/// * `anchor` - The employer's configured period starting time
/// * `previous_end` - The end of the last generated period
///
/// # Errors
///
/// Returns an error if calendar conversion or date arithmetic fails.
pub fn realigned_baseline(
    anchor: OffsetDateTime,
    previous_end: OffsetDateTime,
) -> Result<OffsetDateTime, DomainError> {
    let anchor_weekday: Weekday = to_naive_date(anchor.date())?.weekday();
    let reference: OffsetDateTime = previous_end
        .checked_sub(time::Duration::days(1))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: String::from("stepping back from the previous period end"),
        })?;
    let aligned: NaiveDate = weekday_at_or_after(to_naive_date(reference.date())?, anchor_weekday);
    baseline_on(aligned, anchor)
}

/// Computes the bounds of the period ending at `baseline + length`.
///
/// The start is one second after the previous boundary so consecutive
/// periods are contiguous and non-overlapping.
///
/// # Errors
///
/// Returns an error if the period length is zero or date arithmetic
/// overflows.
pub fn period_bounds(
    baseline: OffsetDateTime,
    length_days: u32,
) -> Result<(OffsetDateTime, OffsetDateTime), DomainError> {
    if length_days == 0 {
        return Err(DomainError::InvalidPeriodLength { length: length_days });
    }
    let ending_at: OffsetDateTime = baseline
        .checked_add(time::Duration::days(i64::from(length_days)))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: String::from("advancing the period end"),
        })?;
    let starting_at: OffsetDateTime = baseline
        .checked_add(time::Duration::seconds(1))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: String::from("computing the period start"),
        })?;
    Ok((starting_at, ending_at))
}
