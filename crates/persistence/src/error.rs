// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// The requested employer was not found.
    EmployerNotFound(i64),
    /// The requested shift was not found.
    ShiftNotFound(i64),
    /// The requested payroll period was not found.
    PeriodNotFound(i64),
    /// The worker already has an open attendance record.
    ///
    /// Raised by the partial unique index when a concurrent clock-in races
    /// past the in-memory check.
    OpenRecordExists {
        /// The worker holding the open record.
        worker_id: i64,
    },
    /// The employer's configured period length type is not supported.
    UnsupportedLengthType(String),
    /// A stored value failed to parse back into a domain type.
    CorruptRow {
        /// The table holding the value.
        table: String,
        /// Description of the failure.
        reason: String,
    },
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::EmployerNotFound(id) => write!(f, "Employer not found: {id}"),
            Self::ShiftNotFound(id) => write!(f, "Shift not found: {id}"),
            Self::PeriodNotFound(id) => write!(f, "Payroll period not found: {id}"),
            Self::OpenRecordExists { worker_id } => {
                write!(
                    f,
                    "Worker {worker_id} already has an open attendance record"
                )
            }
            Self::UnsupportedLengthType(length_type) => {
                write!(
                    f,
                    "Payroll period length type '{length_type}' is not supported"
                )
            }
            Self::CorruptRow { table, reason } => {
                write!(f, "Corrupt row in {table}: {reason}")
            }
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
