// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Deduction, DeductionKind, PayrollSettings};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use time::OffsetDateTime;

/// Validates that a shift's scheduled window is well-formed.
///
/// # Errors
///
/// Returns `DomainError::ShiftWindowInvalid` if `starting_at` does not
/// strictly precede `ending_at`.
pub fn validate_shift_window(
    starting_at: OffsetDateTime,
    ending_at: OffsetDateTime,
) -> Result<(), DomainError> {
    if starting_at >= ending_at {
        return Err(DomainError::ShiftWindowInvalid {
            starting_at,
            ending_at,
        });
    }
    Ok(())
}

/// Validates an employer's configured deduction list.
///
/// # Errors
///
/// Returns an error if:
/// - Any deduction has an empty name
/// - A percentage deduction is outside 0–100
/// - A flat-amount deduction is negative
pub fn validate_deductions(deductions: &[Deduction]) -> Result<(), DomainError> {
    for deduction in deductions {
        if deduction.name.is_empty() {
            return Err(DomainError::InvalidDeduction {
                name: String::from("<unnamed>"),
                reason: String::from("name cannot be empty"),
            });
        }
        match deduction.kind {
            DeductionKind::Percentage => {
                if deduction.value < Decimal::ZERO || deduction.value > dec!(100) {
                    return Err(DomainError::InvalidDeduction {
                        name: deduction.name.clone(),
                        reason: format!(
                            "percentage must be between 0 and 100, got {}",
                            deduction.value
                        ),
                    });
                }
            }
            DeductionKind::Amount => {
                if deduction.value < Decimal::ZERO {
                    return Err(DomainError::InvalidDeduction {
                        name: deduction.name.clone(),
                        reason: format!("amount must be non-negative, got {}", deduction.value),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Validates an employer's payroll settings, where present.
///
/// The presence of `period_starting_time` is checked by the generator (it
/// is legal for an employer to exist before payroll is configured); this
/// only rejects configurations that could never be valid.
///
/// # Errors
///
/// Returns `DomainError::InvalidPeriodLength` if the configured length is
/// zero.
pub fn validate_payroll_settings(settings: &PayrollSettings) -> Result<(), DomainError> {
    if settings.period_length == 0 {
        return Err(DomainError::InvalidPeriodLength {
            length: settings.period_length,
        });
    }
    Ok(())
}
