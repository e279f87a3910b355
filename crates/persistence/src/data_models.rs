// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and serializable audit payloads.
//!
//! Domain values travel as text: timestamps are RFC 3339, money and hours
//! are decimal strings. Conversion to and from domain types lives in the
//! store module.

use crate::diesel_schema::{
    attendance_records, audit_events, employee_payments, employer_deductions, employers,
    payroll_period_payments, payroll_periods, shift_applications, shift_invites, shift_roster,
    shifts, worker_tax_profiles,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Serializable representation of an audit Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of an audit Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an audit Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Queryable)]
pub struct EmployerRow {
    pub employer_id: i64,
    pub created_at: String,
    pub period_starting_time: Option<String>,
    pub period_length: i32,
    pub period_length_type: String,
    pub venue_radius_meters: f64,
    pub under_scheduled_policy: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = employers)]
pub struct NewEmployer {
    pub created_at: String,
    pub period_starting_time: Option<String>,
    pub period_length: i32,
    pub period_length_type: String,
    pub venue_radius_meters: f64,
    pub under_scheduled_policy: String,
}

#[derive(Debug, Clone, Queryable)]
pub struct DeductionRow {
    pub deduction_id: i64,
    pub employer_id: i64,
    pub name: String,
    pub kind: String,
    pub value: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = employer_deductions)]
pub struct NewDeduction {
    pub employer_id: i64,
    pub name: String,
    pub kind: String,
    pub value: String,
}

#[derive(Debug, Clone, Queryable)]
pub struct ShiftRow {
    pub shift_id: i64,
    pub employer_id: i64,
    pub starting_at: String,
    pub ending_at: String,
    pub maximum_clockin_delta_minutes: Option<i64>,
    pub maximum_clockout_delay_minutes: Option<i64>,
    pub minimum_hourly_rate: String,
    pub status: String,
    pub venue_latitude: f64,
    pub venue_longitude: f64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = shifts)]
pub struct NewShift {
    pub employer_id: i64,
    pub starting_at: String,
    pub ending_at: String,
    pub maximum_clockin_delta_minutes: Option<i64>,
    pub maximum_clockout_delay_minutes: Option<i64>,
    pub minimum_hourly_rate: String,
    pub status: String,
    pub venue_latitude: f64,
    pub venue_longitude: f64,
}

#[derive(Debug, Clone, Queryable)]
pub struct RosterRow {
    pub roster_id: i64,
    pub shift_id: i64,
    pub worker_id: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = shift_roster)]
pub struct NewRosterEntry {
    pub shift_id: i64,
    pub worker_id: i64,
}

#[derive(Debug, Clone, Queryable)]
pub struct AttendanceRow {
    pub record_id: i64,
    pub shift_id: i64,
    pub worker_id: i64,
    pub employer_id: i64,
    pub started_at: String,
    pub ended_at: Option<String>,
    pub latitude_in: f64,
    pub longitude_in: f64,
    pub latitude_out: Option<f64>,
    pub longitude_out: Option<f64>,
    pub automatically_closed: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = attendance_records)]
pub struct NewAttendanceRecord {
    pub shift_id: i64,
    pub worker_id: i64,
    pub employer_id: i64,
    pub started_at: String,
    pub ended_at: Option<String>,
    pub latitude_in: f64,
    pub longitude_in: f64,
    pub latitude_out: Option<f64>,
    pub longitude_out: Option<f64>,
    pub automatically_closed: i32,
}

#[derive(Debug, Clone, Queryable)]
pub struct InviteRow {
    pub invite_id: i64,
    pub shift_id: i64,
    pub worker_id: i64,
    pub status: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = shift_invites)]
pub struct NewInvite {
    pub shift_id: i64,
    pub worker_id: i64,
    pub status: String,
}

#[derive(Debug, Clone, Queryable)]
pub struct ApplicationRow {
    pub application_id: i64,
    pub shift_id: i64,
    pub worker_id: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = shift_applications)]
pub struct NewApplication {
    pub shift_id: i64,
    pub worker_id: i64,
}

#[derive(Debug, Clone, Queryable)]
pub struct PeriodRow {
    pub period_id: i64,
    pub employer_id: i64,
    pub starting_at: String,
    pub ending_at: String,
    pub length: i32,
    pub length_type: String,
    pub status: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payroll_periods)]
pub struct NewPeriod {
    pub employer_id: i64,
    pub starting_at: String,
    pub ending_at: String,
    pub length: i32,
    pub length_type: String,
    pub status: String,
}

#[derive(Debug, Clone, Queryable)]
pub struct PeriodPaymentRow {
    pub payment_id: i64,
    pub period_id: i64,
    pub record_id: i64,
    pub worker_id: i64,
    pub regular_hours: String,
    pub over_time: String,
    pub hourly_rate: String,
    pub total_amount: String,
    pub split_payment: i32,
    pub approval: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payroll_period_payments)]
pub struct NewPeriodPayment {
    pub period_id: i64,
    pub record_id: i64,
    pub worker_id: i64,
    pub regular_hours: String,
    pub over_time: String,
    pub hourly_rate: String,
    pub total_amount: String,
    pub split_payment: i32,
    pub approval: String,
}

#[derive(Debug, Clone, Queryable)]
pub struct EmployeePaymentRow {
    pub employee_payment_id: i64,
    pub period_id: i64,
    pub worker_id: i64,
    pub earnings: String,
    pub deduction_list_json: String,
    pub deductions: String,
    pub taxes: String,
    pub amount: String,
    pub paid: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = employee_payments)]
pub struct NewEmployeePayment {
    pub period_id: i64,
    pub worker_id: i64,
    pub earnings: String,
    pub deduction_list_json: String,
    pub deductions: String,
    pub taxes: String,
    pub amount: String,
    pub paid: i32,
}

#[derive(Debug, Clone, Queryable)]
pub struct TaxProfileRow {
    pub profile_id: i64,
    pub worker_id: i64,
    pub filing_status: String,
    pub dual_income: i32,
    pub other_annual_income: String,
    pub wage_adjustment: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = worker_tax_profiles)]
pub struct NewTaxProfile {
    pub worker_id: i64,
    pub filing_status: String,
    pub dual_income: i32,
    pub other_annual_income: String,
    pub wage_adjustment: String,
}

#[derive(Debug, Clone, Queryable)]
pub struct AuditEventRow {
    pub event_id: i64,
    pub employer_id: Option<i64>,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit_events)]
pub struct NewAuditEvent {
    pub employer_id: Option<i64>,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub created_at: Option<String>,
}
