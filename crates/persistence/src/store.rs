// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Snapshot loading and atomic persistence of engine outcomes.
//!
//! The engine computes over an in-memory `EngineState`; this module loads
//! that snapshot for one employer and commits each outcome (sweep,
//! generation, period transition) inside a single immediate transaction.
//! Every committed outcome persists exactly one audit event.

use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use shift_pay::{EngineState, GeneratedPeriod, GenerationOutcome, SweepOutcome, TransitionOutcome};
use shift_pay_audit::AuditEvent;
use shift_pay_domain::{
    AppliedDeduction, AttendanceRecord, Deduction, DeductionKind, EmployeePayment, Employer,
    FilingStatus, GeoPoint, InviteStatus, PayrollPeriod, PayrollSettings, PaymentApproval,
    PeriodLengthType, PeriodPayment, PeriodStatus, Shift, ShiftApplication, ShiftInvite,
    ShiftStatus, UnderScheduledHoursPolicy, WorkerTaxProfile,
};
use std::collections::HashMap;
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};

use crate::data_models::{
    ActionData, ActorData, ApplicationRow, AttendanceRow, AuditEventRow, CauseData, DeductionRow,
    EmployeePaymentRow, EmployerRow, InviteRow, NewApplication, NewAttendanceRecord,
    NewAuditEvent, NewDeduction, NewEmployeePayment, NewEmployer, NewInvite, NewPeriod,
    NewPeriodPayment, NewRosterEntry, NewShift, NewTaxProfile, PeriodPaymentRow, PeriodRow,
    RosterRow, ShiftRow, TaxProfileRow,
};
use crate::diesel_schema::{
    attendance_records, audit_events, employee_payments, employer_deductions, employers,
    payroll_period_payments, payroll_periods, shift_applications, shift_invites, shift_roster,
    shifts, worker_tax_profiles,
};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

fn fmt_dt(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

fn parse_dt(value: &str, table: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| PersistenceError::CorruptRow {
        table: table.to_string(),
        reason: format!("bad timestamp '{value}': {e}"),
    })
}

fn parse_decimal(value: &str, table: &str) -> Result<Decimal, PersistenceError> {
    Decimal::from_str(value).map_err(|e| PersistenceError::CorruptRow {
        table: table.to_string(),
        reason: format!("bad decimal '{value}': {e}"),
    })
}

fn corrupt<E: std::fmt::Display>(table: &str) -> impl Fn(E) -> PersistenceError + '_ {
    move |e| PersistenceError::CorruptRow {
        table: table.to_string(),
        reason: e.to_string(),
    }
}

/// Loads the complete engine snapshot for one employer.
///
/// # Errors
///
/// Returns `EmployerNotFound` if the employer does not exist, or
/// `CorruptRow` if a stored value fails to parse.
#[allow(clippy::too_many_lines)]
pub fn load_engine_state(
    conn: &mut SqliteConnection,
    employer_id: i64,
) -> Result<EngineState, PersistenceError> {
    let employer_row: EmployerRow = employers::table
        .filter(employers::employer_id.eq(employer_id))
        .first::<EmployerRow>(conn)
        .optional()?
        .ok_or(PersistenceError::EmployerNotFound(employer_id))?;

    let deduction_rows: Vec<DeductionRow> = employer_deductions::table
        .filter(employer_deductions::employer_id.eq(employer_id))
        .order(employer_deductions::deduction_id.asc())
        .load::<DeductionRow>(conn)?;
    let mut deductions: Vec<Deduction> = Vec::new();
    for row in deduction_rows {
        deductions.push(Deduction {
            name: row.name,
            kind: DeductionKind::from_str(&row.kind).map_err(corrupt("employer_deductions"))?,
            value: parse_decimal(&row.value, "employer_deductions")?,
        });
    }

    let employer: Employer = Employer::with_id(
        employer_row.employer_id,
        parse_dt(&employer_row.created_at, "employers")?,
        PayrollSettings::new(
            employer_row
                .period_starting_time
                .as_deref()
                .map(|value| parse_dt(value, "employers"))
                .transpose()?,
            u32::try_from(employer_row.period_length.max(0)).unwrap_or(0),
            PeriodLengthType::from_str(&employer_row.period_length_type).map_err(|_| {
                PersistenceError::UnsupportedLengthType(employer_row.period_length_type.clone())
            })?,
        ),
        deductions,
        employer_row.venue_radius_meters,
        match employer_row.under_scheduled_policy.as_str() {
            "pay_clocked_hours" => UnderScheduledHoursPolicy::PayClockedHours,
            _ => UnderScheduledHoursPolicy::ZeroBelowSchedule,
        },
    );

    let shift_rows: Vec<ShiftRow> = shifts::table
        .filter(shifts::employer_id.eq(employer_id))
        .order(shifts::shift_id.asc())
        .load::<ShiftRow>(conn)?;
    let shift_ids: Vec<i64> = shift_rows.iter().map(|row| row.shift_id).collect();

    let roster_rows: Vec<RosterRow> = shift_roster::table
        .filter(shift_roster::shift_id.eq_any(shift_ids.iter().copied()))
        .load::<RosterRow>(conn)?;
    let mut rosters: HashMap<i64, Vec<i64>> = HashMap::new();
    for row in roster_rows {
        rosters.entry(row.shift_id).or_default().push(row.worker_id);
    }

    let mut state: EngineState = EngineState::new(employer);

    for row in shift_rows {
        state.shifts.push(Shift {
            shift_id: Some(row.shift_id),
            employer_id: row.employer_id,
            starting_at: parse_dt(&row.starting_at, "shifts")?,
            ending_at: parse_dt(&row.ending_at, "shifts")?,
            maximum_clockin_delta_minutes: row.maximum_clockin_delta_minutes,
            maximum_clockout_delay_minutes: row.maximum_clockout_delay_minutes,
            minimum_hourly_rate: parse_decimal(&row.minimum_hourly_rate, "shifts")?,
            status: ShiftStatus::from_str(&row.status).map_err(corrupt("shifts"))?,
            venue: GeoPoint::new(row.venue_latitude, row.venue_longitude),
            roster: rosters.remove(&row.shift_id).unwrap_or_default(),
        });
    }

    let record_rows: Vec<AttendanceRow> = attendance_records::table
        .filter(attendance_records::employer_id.eq(employer_id))
        .order(attendance_records::record_id.asc())
        .load::<AttendanceRow>(conn)?;
    for row in record_rows {
        state.records.push(AttendanceRecord {
            record_id: Some(row.record_id),
            shift_id: row.shift_id,
            worker_id: row.worker_id,
            employer_id: row.employer_id,
            started_at: parse_dt(&row.started_at, "attendance_records")?,
            ended_at: row
                .ended_at
                .as_deref()
                .map(|value| parse_dt(value, "attendance_records"))
                .transpose()?,
            position_in: GeoPoint::new(row.latitude_in, row.longitude_in),
            position_out: match (row.latitude_out, row.longitude_out) {
                (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)),
                _ => None,
            },
            automatically_closed: row.automatically_closed != 0,
        });
    }

    let invite_rows: Vec<InviteRow> = shift_invites::table
        .filter(shift_invites::shift_id.eq_any(shift_ids.iter().copied()))
        .order(shift_invites::invite_id.asc())
        .load::<InviteRow>(conn)?;
    for row in invite_rows {
        state.invites.push(ShiftInvite {
            invite_id: Some(row.invite_id),
            shift_id: row.shift_id,
            worker_id: row.worker_id,
            status: InviteStatus::from_str(&row.status).map_err(corrupt("shift_invites"))?,
        });
    }

    let application_rows: Vec<ApplicationRow> = shift_applications::table
        .filter(shift_applications::shift_id.eq_any(shift_ids.iter().copied()))
        .order(shift_applications::application_id.asc())
        .load::<ApplicationRow>(conn)?;
    for row in application_rows {
        state.applications.push(ShiftApplication {
            application_id: Some(row.application_id),
            shift_id: row.shift_id,
            worker_id: row.worker_id,
        });
    }

    let period_rows: Vec<PeriodRow> = payroll_periods::table
        .filter(payroll_periods::employer_id.eq(employer_id))
        .order(payroll_periods::period_id.asc())
        .load::<PeriodRow>(conn)?;
    let period_ids: Vec<i64> = period_rows.iter().map(|row| row.period_id).collect();
    for row in period_rows {
        state.periods.push(PayrollPeriod {
            period_id: Some(row.period_id),
            employer_id: row.employer_id,
            starting_at: parse_dt(&row.starting_at, "payroll_periods")?,
            ending_at: parse_dt(&row.ending_at, "payroll_periods")?,
            length: u32::try_from(row.length.max(0)).unwrap_or(0),
            length_type: PeriodLengthType::from_str(&row.length_type)
                .map_err(corrupt("payroll_periods"))?,
            status: PeriodStatus::from_str(&row.status).map_err(corrupt("payroll_periods"))?,
        });
    }

    let payment_rows: Vec<PeriodPaymentRow> = payroll_period_payments::table
        .filter(payroll_period_payments::period_id.eq_any(period_ids.iter().copied()))
        .order(payroll_period_payments::payment_id.asc())
        .load::<PeriodPaymentRow>(conn)?;
    for row in payment_rows {
        state.period_payments.push(PeriodPayment {
            payment_id: Some(row.payment_id),
            period_id: Some(row.period_id),
            record_id: row.record_id,
            worker_id: row.worker_id,
            regular_hours: parse_decimal(&row.regular_hours, "payroll_period_payments")?,
            over_time: parse_decimal(&row.over_time, "payroll_period_payments")?,
            hourly_rate: parse_decimal(&row.hourly_rate, "payroll_period_payments")?,
            total_amount: parse_decimal(&row.total_amount, "payroll_period_payments")?,
            split_payment: row.split_payment != 0,
            approval: PaymentApproval::from_str(&row.approval)
                .map_err(corrupt("payroll_period_payments"))?,
        });
    }

    let employee_payment_rows: Vec<EmployeePaymentRow> = employee_payments::table
        .filter(employee_payments::period_id.eq_any(period_ids.iter().copied()))
        .order(employee_payments::employee_payment_id.asc())
        .load::<EmployeePaymentRow>(conn)?;
    for row in employee_payment_rows {
        let deduction_list: Vec<AppliedDeduction> =
            serde_json::from_str(&row.deduction_list_json)?;
        state.employee_payments.push(EmployeePayment {
            employee_payment_id: Some(row.employee_payment_id),
            period_id: row.period_id,
            worker_id: row.worker_id,
            earnings: parse_decimal(&row.earnings, "employee_payments")?,
            deduction_list,
            deductions: parse_decimal(&row.deductions, "employee_payments")?,
            taxes: parse_decimal(&row.taxes, "employee_payments")?,
            amount: parse_decimal(&row.amount, "employee_payments")?,
            paid: row.paid != 0,
        });
    }

    let profile_rows: Vec<TaxProfileRow> = worker_tax_profiles::table
        .order(worker_tax_profiles::worker_id.asc())
        .load::<TaxProfileRow>(conn)?;
    for row in profile_rows {
        state.tax_profiles.push(WorkerTaxProfile {
            worker_id: row.worker_id,
            filing_status: FilingStatus::from_str(&row.filing_status)
                .map_err(corrupt("worker_tax_profiles"))?,
            dual_income: row.dual_income != 0,
            other_annual_income: parse_decimal(&row.other_annual_income, "worker_tax_profiles")?,
            wage_adjustment: parse_decimal(&row.wage_adjustment, "worker_tax_profiles")?,
        });
    }

    debug!(
        employer_id,
        shifts = state.shifts.len(),
        records = state.records.len(),
        periods = state.periods.len(),
        "Loaded engine snapshot"
    );

    Ok(state)
}

/// Inserts an employer and its deduction list.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_employer(
    conn: &mut SqliteConnection,
    employer: &Employer,
) -> Result<i64, PersistenceError> {
    let row: NewEmployer = NewEmployer {
        created_at: fmt_dt(employer.created_at)?,
        period_starting_time: employer
            .payroll
            .period_starting_time
            .map(fmt_dt)
            .transpose()?,
        period_length: i32::try_from(employer.payroll.period_length).unwrap_or(i32::MAX),
        period_length_type: employer.payroll.period_length_type.as_str().to_string(),
        venue_radius_meters: employer.venue_radius_meters,
        under_scheduled_policy: match employer.under_scheduled_policy {
            UnderScheduledHoursPolicy::ZeroBelowSchedule => String::from("zero_below_schedule"),
            UnderScheduledHoursPolicy::PayClockedHours => String::from("pay_clocked_hours"),
        },
    };
    diesel::insert_into(employers::table)
        .values(&row)
        .execute(conn)?;
    let employer_id: i64 = get_last_insert_rowid(conn)?;

    for deduction in &employer.deductions {
        diesel::insert_into(employer_deductions::table)
            .values(&NewDeduction {
                employer_id,
                name: deduction.name.clone(),
                kind: deduction.kind.as_str().to_string(),
                value: deduction.value.to_string(),
            })
            .execute(conn)?;
    }

    Ok(employer_id)
}

/// Inserts a shift and its roster.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_shift(conn: &mut SqliteConnection, shift: &Shift) -> Result<i64, PersistenceError> {
    let row: NewShift = NewShift {
        employer_id: shift.employer_id,
        starting_at: fmt_dt(shift.starting_at)?,
        ending_at: fmt_dt(shift.ending_at)?,
        maximum_clockin_delta_minutes: shift.maximum_clockin_delta_minutes,
        maximum_clockout_delay_minutes: shift.maximum_clockout_delay_minutes,
        minimum_hourly_rate: shift.minimum_hourly_rate.to_string(),
        status: shift.status.as_str().to_string(),
        venue_latitude: shift.venue.latitude,
        venue_longitude: shift.venue.longitude,
    };
    diesel::insert_into(shifts::table).values(&row).execute(conn)?;
    let shift_id: i64 = get_last_insert_rowid(conn)?;

    for worker_id in &shift.roster {
        diesel::insert_into(shift_roster::table)
            .values(&NewRosterEntry {
                shift_id,
                worker_id: *worker_id,
            })
            .execute(conn)?;
    }

    Ok(shift_id)
}

/// Inserts a shift invite.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_invite(
    conn: &mut SqliteConnection,
    invite: &ShiftInvite,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(shift_invites::table)
        .values(&NewInvite {
            shift_id: invite.shift_id,
            worker_id: invite.worker_id,
            status: invite.status.as_str().to_string(),
        })
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Inserts a shift application.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_application(
    conn: &mut SqliteConnection,
    application: &ShiftApplication,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(shift_applications::table)
        .values(&NewApplication {
            shift_id: application.shift_id,
            worker_id: application.worker_id,
        })
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Inserts or replaces a worker's tax profile.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn upsert_tax_profile(
    conn: &mut SqliteConnection,
    profile: &WorkerTaxProfile,
) -> Result<(), PersistenceError> {
    diesel::delete(
        worker_tax_profiles::table.filter(worker_tax_profiles::worker_id.eq(profile.worker_id)),
    )
    .execute(conn)?;
    diesel::insert_into(worker_tax_profiles::table)
        .values(&NewTaxProfile {
            worker_id: profile.worker_id,
            filing_status: profile.filing_status.as_str().to_string(),
            dual_income: i32::from(profile.dual_income),
            other_annual_income: profile.other_annual_income.to_string(),
            wage_adjustment: profile.wage_adjustment.to_string(),
        })
        .execute(conn)?;
    Ok(())
}

/// Inserts an open attendance record.
///
/// The partial unique index on open records is the storage backstop for
/// the one-open-record-per-worker invariant; a violation surfaces as
/// `OpenRecordExists` so a racing clock-in fails cleanly.
///
/// # Errors
///
/// Returns `OpenRecordExists` if the worker already holds an open record,
/// or a database error otherwise.
pub fn insert_attendance_record(
    conn: &mut SqliteConnection,
    record: &AttendanceRecord,
) -> Result<i64, PersistenceError> {
    let row: NewAttendanceRecord = NewAttendanceRecord {
        shift_id: record.shift_id,
        worker_id: record.worker_id,
        employer_id: record.employer_id,
        started_at: fmt_dt(record.started_at)?,
        ended_at: record.ended_at.map(fmt_dt).transpose()?,
        latitude_in: record.position_in.latitude,
        longitude_in: record.position_in.longitude,
        latitude_out: record.position_out.map(|position| position.latitude),
        longitude_out: record.position_out.map(|position| position.longitude),
        automatically_closed: i32::from(record.automatically_closed),
    };

    diesel::insert_into(attendance_records::table)
        .values(&row)
        .execute(conn)
        .map_err(|e| match e {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                PersistenceError::OpenRecordExists {
                    worker_id: record.worker_id,
                }
            }
            other => PersistenceError::from(other),
        })?;
    get_last_insert_rowid(conn)
}

/// Closes an attendance record at the given time.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn close_attendance_record(
    conn: &mut SqliteConnection,
    record_id: i64,
    ended_at: OffsetDateTime,
    position_out: Option<GeoPoint>,
    automatically: bool,
) -> Result<(), PersistenceError> {
    diesel::update(
        attendance_records::table.filter(attendance_records::record_id.eq(record_id)),
    )
    .set((
        attendance_records::ended_at.eq(Some(fmt_dt(ended_at)?)),
        attendance_records::latitude_out.eq(position_out.map(|position| position.latitude)),
        attendance_records::longitude_out.eq(position_out.map(|position| position.longitude)),
        attendance_records::automatically_closed.eq(i32::from(automatically)),
    ))
    .execute(conn)?;
    Ok(())
}

/// Persists an audit event.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
    recorded_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    let row: NewAuditEvent = NewAuditEvent {
        employer_id: event.employer_id,
        actor_json: serde_json::to_string(&ActorData {
            id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
        })?,
        cause_json: serde_json::to_string(&CauseData {
            id: event.cause.id.clone(),
            description: event.cause.description.clone(),
        })?,
        action_json: serde_json::to_string(&ActionData {
            name: event.action.name.clone(),
            details: event.action.details.clone(),
        })?,
        before_snapshot_json: serde_json::to_string(&event.before.data)?,
        after_snapshot_json: serde_json::to_string(&event.after.data)?,
        created_at: Some(fmt_dt(recorded_at)?),
    };
    diesel::insert_into(audit_events::table)
        .values(&row)
        .execute(conn)?;
    let event_id: i64 = get_last_insert_rowid(conn)?;
    debug!(event_id, action = %event.action.name, "Persisted audit event");
    Ok(event_id)
}

/// Commits a sweep outcome atomically.
///
/// # Returns
///
/// The persisted audit event id.
///
/// # Errors
///
/// Returns an error if any write fails; the transaction rolls back as a
/// whole.
pub fn commit_sweep(
    conn: &mut SqliteConnection,
    outcome: &SweepOutcome,
    recorded_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    conn.immediate_transaction(|conn| {
        for record in &outcome.closed_records {
            let Some(record_id) = record.record_id else {
                continue;
            };
            let Some(ended_at) = record.ended_at else {
                continue;
            };
            close_attendance_record(conn, record_id, ended_at, record.position_out, true)?;
        }

        diesel::update(
            shifts::table.filter(shifts::shift_id.eq_any(outcome.expired_shift_ids.iter().copied())),
        )
        .set(shifts::status.eq(ShiftStatus::Expired.as_str()))
        .execute(conn)?;

        diesel::update(
            shift_invites::table
                .filter(shift_invites::invite_id.eq_any(outcome.expired_invite_ids.iter().copied())),
        )
        .set(shift_invites::status.eq(InviteStatus::Expired.as_str()))
        .execute(conn)?;

        diesel::delete(shift_applications::table.filter(
            shift_applications::application_id.eq_any(outcome.deleted_application_ids.iter().copied()),
        ))
        .execute(conn)?;

        let event_id: i64 = persist_audit_event(conn, &outcome.audit_event, recorded_at)?;
        info!(
            event_id,
            closed = outcome.closed_records.len(),
            expired_shifts = outcome.expired_shift_ids.len(),
            "Committed sweep"
        );
        Ok(event_id)
    })
}

fn insert_generated_period(
    conn: &mut SqliteConnection,
    generated: &GeneratedPeriod,
) -> Result<i64, PersistenceError> {
    let period: &PayrollPeriod = &generated.period;
    diesel::insert_into(payroll_periods::table)
        .values(&NewPeriod {
            employer_id: period.employer_id,
            starting_at: fmt_dt(period.starting_at)?,
            ending_at: fmt_dt(period.ending_at)?,
            length: i32::try_from(period.length).unwrap_or(i32::MAX),
            length_type: period.length_type.as_str().to_string(),
            status: period.status.as_str().to_string(),
        })
        .execute(conn)?;
    let period_id: i64 = get_last_insert_rowid(conn)?;

    for payment in &generated.payments {
        diesel::insert_into(payroll_period_payments::table)
            .values(&NewPeriodPayment {
                period_id,
                record_id: payment.record_id,
                worker_id: payment.worker_id,
                regular_hours: payment.regular_hours.to_string(),
                over_time: payment.over_time.to_string(),
                hourly_rate: payment.hourly_rate.to_string(),
                total_amount: payment.total_amount.to_string(),
                split_payment: i32::from(payment.split_payment),
                approval: payment.approval.as_str().to_string(),
            })
            .execute(conn)?;
    }

    Ok(period_id)
}

/// Commits a generation outcome atomically.
///
/// Each period and its payment rows land together; a failure anywhere
/// rolls back the whole outcome, so a partial period is never visible.
///
/// # Returns
///
/// The persisted period ids, oldest first.
///
/// # Errors
///
/// Returns an error if any write fails.
pub fn commit_generation(
    conn: &mut SqliteConnection,
    outcome: &GenerationOutcome,
    recorded_at: OffsetDateTime,
) -> Result<Vec<i64>, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let mut period_ids: Vec<i64> = Vec::new();
        for generated in &outcome.generated {
            period_ids.push(insert_generated_period(conn, generated)?);
        }
        let event_id: i64 = persist_audit_event(conn, &outcome.audit_event, recorded_at)?;
        info!(
            event_id,
            periods = period_ids.len(),
            "Committed period generation"
        );
        Ok(period_ids)
    })
}

/// Commits a period status transition atomically.
///
/// # Returns
///
/// The persisted audit event id.
///
/// # Errors
///
/// Returns an error if any write fails.
pub fn commit_period_transition(
    conn: &mut SqliteConnection,
    outcome: &TransitionOutcome,
    recorded_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let Some(period_id) = outcome.period.period_id else {
            return Err(PersistenceError::PeriodNotFound(0));
        };

        diesel::update(payroll_periods::table.filter(payroll_periods::period_id.eq(period_id)))
            .set(payroll_periods::status.eq(outcome.period.status.as_str()))
            .execute(conn)?;

        for payment in &outcome.created_payments {
            diesel::insert_into(employee_payments::table)
                .values(&NewEmployeePayment {
                    period_id,
                    worker_id: payment.worker_id,
                    earnings: payment.earnings.to_string(),
                    deduction_list_json: serde_json::to_string(&payment.deduction_list)?,
                    deductions: payment.deductions.to_string(),
                    taxes: payment.taxes.to_string(),
                    amount: payment.amount.to_string(),
                    paid: i32::from(payment.paid),
                })
                .execute(conn)?;
        }

        diesel::delete(employee_payments::table.filter(
            employee_payments::employee_payment_id
                .eq_any(outcome.deleted_payment_ids.iter().copied()),
        ))
        .execute(conn)?;

        if outcome.period.status == PeriodStatus::Paid {
            diesel::update(
                employee_payments::table.filter(employee_payments::period_id.eq(period_id)),
            )
            .set(employee_payments::paid.eq(1))
            .execute(conn)?;
            diesel::update(
                payroll_period_payments::table
                    .filter(payroll_period_payments::period_id.eq(period_id)),
            )
            .set(payroll_period_payments::approval.eq(PaymentApproval::Paid.as_str()))
            .execute(conn)?;
        }

        let event_id: i64 = persist_audit_event(conn, &outcome.audit_event, recorded_at)?;
        info!(
            event_id,
            period_id,
            status = %outcome.period.status,
            "Committed period transition"
        );
        Ok(event_id)
    })
}

/// Approves every pending allocation in a period.
///
/// # Returns
///
/// The number of allocations approved.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn approve_period_payments(
    conn: &mut SqliteConnection,
    period_id: i64,
) -> Result<usize, PersistenceError> {
    let updated: usize = diesel::update(
        payroll_period_payments::table
            .filter(payroll_period_payments::period_id.eq(period_id))
            .filter(payroll_period_payments::approval.eq(PaymentApproval::Pending.as_str())),
    )
    .set(payroll_period_payments::approval.eq(PaymentApproval::Approved.as_str()))
    .execute(conn)?;
    Ok(updated)
}

/// Lists an employer's payroll periods, oldest first, for the
/// period-listing endpoint.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to parse.
pub fn list_periods(
    conn: &mut SqliteConnection,
    employer_id: i64,
) -> Result<Vec<PayrollPeriod>, PersistenceError> {
    let rows: Vec<PeriodRow> = payroll_periods::table
        .filter(payroll_periods::employer_id.eq(employer_id))
        .order(payroll_periods::starting_at.asc())
        .load::<PeriodRow>(conn)?;

    let mut periods: Vec<PayrollPeriod> = Vec::new();
    for row in rows {
        periods.push(PayrollPeriod {
            period_id: Some(row.period_id),
            employer_id: row.employer_id,
            starting_at: parse_dt(&row.starting_at, "payroll_periods")?,
            ending_at: parse_dt(&row.ending_at, "payroll_periods")?,
            length: u32::try_from(row.length.max(0)).unwrap_or(0),
            length_type: PeriodLengthType::from_str(&row.length_type)
                .map_err(corrupt("payroll_periods"))?,
            status: PeriodStatus::from_str(&row.status).map_err(corrupt("payroll_periods"))?,
        });
    }
    Ok(periods)
}

/// Lists the per-worker aggregate payments of one period.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to parse.
pub fn list_employee_payments(
    conn: &mut SqliteConnection,
    period_id: i64,
) -> Result<Vec<EmployeePayment>, PersistenceError> {
    let rows: Vec<EmployeePaymentRow> = employee_payments::table
        .filter(employee_payments::period_id.eq(period_id))
        .order(employee_payments::worker_id.asc())
        .load::<EmployeePaymentRow>(conn)?;

    let mut payments: Vec<EmployeePayment> = Vec::new();
    for row in rows {
        let deduction_list: Vec<AppliedDeduction> =
            serde_json::from_str(&row.deduction_list_json)?;
        payments.push(EmployeePayment {
            employee_payment_id: Some(row.employee_payment_id),
            period_id: row.period_id,
            worker_id: row.worker_id,
            earnings: parse_decimal(&row.earnings, "employee_payments")?,
            deduction_list,
            deductions: parse_decimal(&row.deductions, "employee_payments")?,
            taxes: parse_decimal(&row.taxes, "employee_payments")?,
            amount: parse_decimal(&row.amount, "employee_payments")?,
            paid: row.paid != 0,
        });
    }
    Ok(payments)
}

/// Lists every employer id with payroll configured, for batch scheduling.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_employer_ids(conn: &mut SqliteConnection) -> Result<Vec<i64>, PersistenceError> {
    Ok(employers::table
        .select(employers::employer_id)
        .order(employers::employer_id.asc())
        .load::<i64>(conn)?)
}

/// Counts persisted audit events, newest first being the last inserted.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_audit_events(
    conn: &mut SqliteConnection,
    employer_id: i64,
) -> Result<Vec<AuditEventRow>, PersistenceError> {
    Ok(audit_events::table
        .filter(audit_events::employer_id.eq(employer_id))
        .order(audit_events::event_id.asc())
        .load::<AuditEventRow>(conn)?)
}
