// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the ShiftPay attendance and payroll engine.
//!
//! This crate provides `SQLite` persistence (via Diesel) for the domain
//! entities and audit events. The engine computes over in-memory
//! snapshots; this layer loads one employer's snapshot and commits each
//! outcome inside a single immediate transaction, so batch runs either
//! land whole or not at all.
//!
//! ## Storage-level invariants
//!
//! - A partial unique index keeps at most one open attendance record per
//!   worker across all shifts; a racing clock-in that slips past the
//!   in-memory check fails at insert with `OpenRecordExists`.
//! - `payroll_periods` is unique per `(employer_id, starting_at)`, so a
//!   re-run of an already-committed generation cannot duplicate periods.
//! - Foreign keys are enforced (`PRAGMA foreign_keys = ON`).
//!
//! `SQLite` requires no external infrastructure; `:memory:` databases are
//! used throughout the test suites.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf
)]

mod data_models;
mod diesel_schema;
mod error;
mod sqlite;
mod store;

#[cfg(test)]
mod tests;

// Re-exported so API-layer callers can hold a connection without a direct
// Diesel dependency.
pub use diesel::SqliteConnection;

pub use data_models::{ActionData, ActorData, AuditEventRow, CauseData};
pub use error::PersistenceError;
pub use sqlite::{
    enable_wal_mode, get_last_insert_rowid, initialize_database, run_migrations,
    verify_foreign_key_enforcement,
};
pub use store::{
    approve_period_payments, close_attendance_record, commit_generation,
    commit_period_transition, commit_sweep, insert_application, insert_attendance_record,
    insert_employer, insert_invite, insert_shift, list_employee_payments, list_employer_ids,
    list_periods, load_audit_events, load_engine_state, persist_audit_event, upsert_tax_profile,
};
