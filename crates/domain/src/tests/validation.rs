// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{Deduction, PayrollSettings, PeriodLengthType};
use crate::validation::{validate_deductions, validate_payroll_settings, validate_shift_window};
use crate::DomainError;
use rust_decimal_macros::dec;
use time::macros::datetime;

#[test]
fn test_shift_window_must_be_forward() {
    assert!(validate_shift_window(
        datetime!(2026-03-03 9:00 UTC),
        datetime!(2026-03-03 17:00 UTC)
    )
    .is_ok());

    assert!(validate_shift_window(
        datetime!(2026-03-03 9:00 UTC),
        datetime!(2026-03-03 9:00 UTC)
    )
    .is_err());
}

#[test]
fn test_deduction_percentage_bounds() {
    let valid: Vec<Deduction> = vec![
        Deduction::percentage(String::from("401k"), dec!(5)),
        Deduction::amount(String::from("Union dues"), dec!(12.50)),
    ];
    assert!(validate_deductions(&valid).is_ok());

    let over: Vec<Deduction> = vec![Deduction::percentage(String::from("401k"), dec!(101))];
    assert!(matches!(
        validate_deductions(&over),
        Err(DomainError::InvalidDeduction { .. })
    ));
}

#[test]
fn test_deduction_amount_must_be_non_negative() {
    let negative: Vec<Deduction> = vec![Deduction::amount(String::from("Advance"), dec!(-5))];

    assert!(matches!(
        validate_deductions(&negative),
        Err(DomainError::InvalidDeduction { .. })
    ));
}

#[test]
fn test_deduction_name_required() {
    let unnamed: Vec<Deduction> = vec![Deduction::amount(String::new(), dec!(5))];

    assert!(matches!(
        validate_deductions(&unnamed),
        Err(DomainError::InvalidDeduction { .. })
    ));
}

#[test]
fn test_payroll_settings_length_must_be_positive() {
    let settings: PayrollSettings = PayrollSettings::new(None, 0, PeriodLengthType::Days);

    assert_eq!(
        validate_payroll_settings(&settings).unwrap_err(),
        DomainError::InvalidPeriodLength { length: 0 }
    );

    let weekly: PayrollSettings = PayrollSettings::new(None, 7, PeriodLengthType::Days);
    assert!(validate_payroll_settings(&weekly).is_ok());
}
