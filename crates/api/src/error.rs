// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! Engine errors are translated into a flat API error carrying a stable
//! machine-readable reason code; the CRUD layer surfaces the code to its
//! clients and retries nothing on its own.

use shift_pay::CoreError;
use shift_pay_domain::DomainError;
use shift_pay_persistence::PersistenceError;
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract: one stable `code` per failed precondition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// A validation precondition failed (out-of-window requests,
    /// roster/venue mismatches). Recoverable by the caller.
    #[error("{message}")]
    Validation {
        /// Stable machine-readable reason code.
        code: &'static str,
        /// A human-readable description.
        message: String,
    },
    /// The employer's payroll configuration blocks the operation.
    #[error("{message}")]
    Configuration {
        /// Stable machine-readable reason code.
        code: &'static str,
        /// A human-readable description.
        message: String,
    },
    /// The requested transition conflicts with the current state.
    /// Requires caller or operator action.
    #[error("{message}")]
    StateConflict {
        /// Stable machine-readable reason code.
        code: &'static str,
        /// A human-readable description.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: &'static str,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred; the batch run rolls back and retries on
    /// the next schedule tick.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the stable reason code for this error, if one applies.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Validation { code, .. }
            | Self::Configuration { code, .. }
            | Self::StateConflict { code, .. } => Some(code),
            Self::ResourceNotFound { .. } | Self::Internal { .. } => None,
        }
    }
}

/// Translates a domain error into the API contract.
#[must_use]
pub fn translate_domain_error(err: &DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::NotRostered { .. } => ApiError::Validation {
            code: "NOT_ROSTERED",
            message,
        },
        DomainError::AlreadyClockedInElsewhere { .. } => ApiError::StateConflict {
            code: "ALREADY_CLOCKED_IN_ELSEWHERE",
            message,
        },
        DomainError::BeforeWindow { .. } => ApiError::Validation {
            code: "BEFORE_WINDOW",
            message,
        },
        DomainError::AfterWindow { .. } => ApiError::Validation {
            code: "AFTER_WINDOW",
            message,
        },
        DomainError::NoOpenRecord { .. } => ApiError::Validation {
            code: "NO_OPEN_RECORD",
            message,
        },
        DomainError::FarFromVenue { .. } => ApiError::Validation {
            code: "FAR_FROM_VENUE",
            message,
        },
        DomainError::ConfigMissing { .. } => ApiError::Configuration {
            code: "CONFIG_MISSING",
            message,
        },
        DomainError::UnsupportedLengthType { .. } => ApiError::Configuration {
            code: "UNSUPPORTED_LENGTH_TYPE",
            message,
        },
        DomainError::PendingPaymentsExist { .. } => ApiError::StateConflict {
            code: "PENDING_PAYMENTS_EXIST",
            message,
        },
        DomainError::PaymentAlreadyMade { .. } => ApiError::StateConflict {
            code: "PAYMENT_ALREADY_MADE",
            message,
        },
        DomainError::InvalidStatusTransition { .. } => ApiError::StateConflict {
            code: "INVALID_STATUS_TRANSITION",
            message,
        },
        DomainError::ShiftNotFound { .. } => ApiError::ResourceNotFound {
            resource_type: "shift",
            message,
        },
        DomainError::PeriodNotFound { .. } => ApiError::ResourceNotFound {
            resource_type: "payroll period",
            message,
        },
        _ => ApiError::Internal { message },
    }
}

/// Translates a core error into the API contract.
#[must_use]
pub fn translate_core_error(err: &CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into the API contract.
#[must_use]
pub fn translate_persistence_error(err: &PersistenceError) -> ApiError {
    match err {
        PersistenceError::OpenRecordExists { .. } => ApiError::StateConflict {
            code: "ALREADY_CLOCKED_IN_ELSEWHERE",
            message: err.to_string(),
        },
        PersistenceError::UnsupportedLengthType(_) => ApiError::Configuration {
            code: "UNSUPPORTED_LENGTH_TYPE",
            message: err.to_string(),
        },
        PersistenceError::EmployerNotFound(_) => ApiError::ResourceNotFound {
            resource_type: "employer",
            message: err.to_string(),
        },
        PersistenceError::ShiftNotFound(_) => ApiError::ResourceNotFound {
            resource_type: "shift",
            message: err.to_string(),
        },
        PersistenceError::PeriodNotFound(_) => ApiError::ResourceNotFound {
            resource_type: "payroll period",
            message: err.to_string(),
        },
        _ => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(&err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(&err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(&err)
    }
}
