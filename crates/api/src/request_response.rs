// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! These DTOs are distinct from domain types and represent the contract
//! with the surrounding CRUD layer.

use serde::{Deserialize, Serialize};
use shift_pay_domain::{GeoPoint, PeriodStatus};
use time::OffsetDateTime;

/// Request to clock a worker into a shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockInRequest {
    /// The employer owning the shift.
    pub employer_id: i64,
    /// The shift being clocked into.
    pub shift_id: i64,
    /// The requesting worker.
    pub worker_id: i64,
    /// The worker's reported position, if any.
    pub position: Option<GeoPoint>,
}

/// Response for a successful clock-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockInResponse {
    /// The created attendance record.
    pub record_id: i64,
    /// When the record opened.
    pub started_at: OffsetDateTime,
}

/// Request to clock a worker out of a shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockOutRequest {
    /// The employer owning the shift.
    pub employer_id: i64,
    /// The shift being clocked out of.
    pub shift_id: i64,
    /// The requesting worker.
    pub worker_id: i64,
    /// The worker's reported position, if any.
    pub position: Option<GeoPoint>,
}

/// Response for a successful clock-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockOutResponse {
    /// The closed attendance record.
    pub record_id: i64,
    /// When the record closed.
    pub ended_at: OffsetDateTime,
}

/// A record auto-closed by the sweeper, for the notification dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoClosedRecord {
    /// The closed attendance record.
    pub record_id: i64,
    /// The shift it belongs to.
    pub shift_id: i64,
    /// The worker it belongs to.
    pub worker_id: i64,
    /// The capped close time (`ending_at + delay`).
    pub ended_at: OffsetDateTime,
}

/// Report of one sweep run over one employer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// The swept employer.
    pub employer_id: i64,
    /// Records auto-closed in this pass.
    pub closed_records: Vec<AutoClosedRecord>,
    /// Shifts expired in this pass.
    pub expired_shift_ids: Vec<i64>,
    /// Invites expired in this pass.
    pub expired_invite_ids: Vec<i64>,
    /// Applications deleted in this pass.
    pub deleted_application_count: usize,
}

/// Summary of one generated payroll period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPeriodInfo {
    /// The persisted period id.
    pub period_id: i64,
    /// Period start (inclusive).
    pub starting_at: OffsetDateTime,
    /// Period end (inclusive).
    pub ending_at: OffsetDateTime,
    /// Number of attendance records allocated into the period.
    pub allocation_count: usize,
}

/// Report of one generation run over one employer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// The employer generated for.
    pub employer_id: i64,
    /// Periods created in this run, oldest first.
    pub periods: Vec<GeneratedPeriodInfo>,
}

/// Request to transition a payroll period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetPeriodStatusRequest {
    /// The employer owning the period.
    pub employer_id: i64,
    /// The period to transition.
    pub period_id: i64,
    /// The requested status.
    pub target: PeriodStatus,
}

/// Response for a period status transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetPeriodStatusResponse {
    /// The period transitioned.
    pub period_id: i64,
    /// The status after the transition.
    pub status: PeriodStatus,
    /// Workers paid by finalization, if any were aggregated.
    pub paid_worker_ids: Vec<i64>,
}
