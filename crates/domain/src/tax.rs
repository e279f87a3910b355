// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Progressive federal withholding calculation.
//!
//! A stateless lookup over bracket tables. The tables are data, not logic:
//! `WithholdingTables::default()` carries the current schedules and a
//! deployment may substitute its own. Three schedules are distinguished by
//! filing status (married-filing-separately shares the single schedule),
//! each with a standard and a dual-income-adjusted variant in which every
//! threshold and base amount is halved.

use crate::types::{FilingStatus, WorkerTaxProfile};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One row of a progressive withholding schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingBracket {
    /// Lower bound of the bracket (annual wage).
    pub level_amount: Decimal,
    /// Withholding accumulated below this bracket.
    pub base_withholding: Decimal,
    /// Marginal rate applied above `level_amount`.
    pub rate: Decimal,
}

const fn bracket(level_amount: Decimal, base_withholding: Decimal, rate: Decimal) -> WithholdingBracket {
    WithholdingBracket {
        level_amount,
        base_withholding,
        rate,
    }
}

/// The full set of withholding schedules, selectable by filing status and
/// dual-income flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingTables {
    /// Single and married-filing-separately, standard.
    pub single: Vec<WithholdingBracket>,
    /// Single and married-filing-separately, dual-income.
    pub single_dual: Vec<WithholdingBracket>,
    /// Married filing jointly (and qualifying widower), standard.
    pub married_jointly: Vec<WithholdingBracket>,
    /// Married filing jointly, dual-income.
    pub married_jointly_dual: Vec<WithholdingBracket>,
    /// Head of household, standard.
    pub head_of_household: Vec<WithholdingBracket>,
    /// Head of household, dual-income.
    pub head_of_household_dual: Vec<WithholdingBracket>,
}

impl Default for WithholdingTables {
    fn default() -> Self {
        Self {
            single: vec![
                bracket(dec!(0), dec!(0), dec!(0.10)),
                bracket(dec!(11600), dec!(1160), dec!(0.12)),
                bracket(dec!(47150), dec!(5426), dec!(0.22)),
                bracket(dec!(100525), dec!(17168.50), dec!(0.24)),
                bracket(dec!(191950), dec!(39110.50), dec!(0.32)),
                bracket(dec!(243725), dec!(55678.50), dec!(0.35)),
                bracket(dec!(609350), dec!(183647.25), dec!(0.37)),
            ],
            single_dual: vec![
                bracket(dec!(0), dec!(0), dec!(0.10)),
                bracket(dec!(5800), dec!(580), dec!(0.12)),
                bracket(dec!(23575), dec!(2713), dec!(0.22)),
                bracket(dec!(50262.50), dec!(8584.25), dec!(0.24)),
                bracket(dec!(95975), dec!(19555.25), dec!(0.32)),
                bracket(dec!(121862.50), dec!(27839.25), dec!(0.35)),
                bracket(dec!(304675), dec!(91823.625), dec!(0.37)),
            ],
            married_jointly: vec![
                bracket(dec!(0), dec!(0), dec!(0.10)),
                bracket(dec!(23200), dec!(2320), dec!(0.12)),
                bracket(dec!(94300), dec!(10852), dec!(0.22)),
                bracket(dec!(201050), dec!(34337), dec!(0.24)),
                bracket(dec!(383900), dec!(78221), dec!(0.32)),
                bracket(dec!(487450), dec!(111357), dec!(0.35)),
                bracket(dec!(731200), dec!(196669.50), dec!(0.37)),
            ],
            married_jointly_dual: vec![
                bracket(dec!(0), dec!(0), dec!(0.10)),
                bracket(dec!(11600), dec!(1160), dec!(0.12)),
                bracket(dec!(47150), dec!(5426), dec!(0.22)),
                bracket(dec!(100525), dec!(17168.50), dec!(0.24)),
                bracket(dec!(191950), dec!(39110.50), dec!(0.32)),
                bracket(dec!(243725), dec!(55678.50), dec!(0.35)),
                bracket(dec!(365600), dec!(98334.75), dec!(0.37)),
            ],
            head_of_household: vec![
                bracket(dec!(0), dec!(0), dec!(0.10)),
                bracket(dec!(16550), dec!(1655), dec!(0.12)),
                bracket(dec!(63100), dec!(7241), dec!(0.22)),
                bracket(dec!(100500), dec!(15469), dec!(0.24)),
                bracket(dec!(191950), dec!(37417), dec!(0.32)),
                bracket(dec!(243700), dec!(53977), dec!(0.35)),
                bracket(dec!(609350), dec!(181954.50), dec!(0.37)),
            ],
            head_of_household_dual: vec![
                bracket(dec!(0), dec!(0), dec!(0.10)),
                bracket(dec!(8275), dec!(827.50), dec!(0.12)),
                bracket(dec!(31550), dec!(3620.50), dec!(0.22)),
                bracket(dec!(50250), dec!(7734.50), dec!(0.24)),
                bracket(dec!(95975), dec!(18708.50), dec!(0.32)),
                bracket(dec!(121850), dec!(26988.50), dec!(0.35)),
                bracket(dec!(304675), dec!(90977.25), dec!(0.37)),
            ],
        }
    }
}

impl WithholdingTables {
    /// Selects the schedule for a filing status and dual-income flag.
    #[must_use]
    pub fn table_for(&self, filing_status: FilingStatus, dual_income: bool) -> &[WithholdingBracket] {
        match (filing_status, dual_income) {
            (FilingStatus::Single | FilingStatus::MarriedSeparately, false) => &self.single,
            (FilingStatus::Single | FilingStatus::MarriedSeparately, true) => &self.single_dual,
            (FilingStatus::MarriedJointly, false) => &self.married_jointly,
            (FilingStatus::MarriedJointly, true) => &self.married_jointly_dual,
            (FilingStatus::HeadOfHousehold, false) => &self.head_of_household,
            (FilingStatus::HeadOfHousehold, true) => &self.head_of_household_dual,
        }
    }

    /// Computes annual withholding for an adjusted annual wage.
    ///
    /// Finds the highest bracket whose `level_amount` does not exceed the
    /// wage and returns `base + (wage − level) × rate`, rounded to cents.
    /// Negative wages are floored at zero.
    #[must_use]
    pub fn annual_withholding(
        &self,
        adjusted_annual_wage: Decimal,
        filing_status: FilingStatus,
        dual_income: bool,
    ) -> Decimal {
        let wage: Decimal = adjusted_annual_wage.max(Decimal::ZERO);
        let table: &[WithholdingBracket] = self.table_for(filing_status, dual_income);

        let Some(row) = table
            .iter()
            .rev()
            .find(|row| row.level_amount <= wage)
        else {
            return Decimal::ZERO;
        };

        (row.base_withholding + (wage - row.level_amount) * row.rate).round_dp(2)
    }

    /// Computes withholding for a single payroll period.
    ///
    /// The period gross is annualized, the worker's configured income and
    /// adjustments applied, the annual amount computed, and the result
    /// de-annualized by the same factor.
    ///
    /// # Arguments
    ///
    /// * `period_gross` - Gross earnings for the period
    /// * `periods_per_year` - Annualization factor (52 weekly, 26 bi-weekly)
    /// * `profile` - The worker's tax profile
    #[must_use]
    pub fn period_withholding(
        &self,
        period_gross: Decimal,
        periods_per_year: Decimal,
        profile: &WorkerTaxProfile,
    ) -> Decimal {
        if periods_per_year <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let annual_wage: Decimal = adjusted_annual_wage(
            period_gross * periods_per_year,
            profile.other_annual_income,
            profile.wage_adjustment,
        );
        let annual: Decimal =
            self.annual_withholding(annual_wage, profile.filing_status, profile.dual_income);
        (annual / periods_per_year).round_dp(2)
    }
}

/// Computes the adjusted annual wage: gross minus other income plus the
/// configured adjustment, floored at zero.
#[must_use]
pub fn adjusted_annual_wage(
    gross_annual: Decimal,
    other_income: Decimal,
    adjustment: Decimal,
) -> Decimal {
    (gross_annual - other_income + adjustment).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_mid_bracket() {
        let tables: WithholdingTables = WithholdingTables::default();

        // 5426 + 0.22 * (50000 - 47150) = 6053.00
        assert_eq!(
            tables.annual_withholding(dec!(50000), FilingStatus::Single, false),
            dec!(6053.00)
        );
    }

    #[test]
    fn test_married_separately_uses_single_table() {
        let tables: WithholdingTables = WithholdingTables::default();

        assert_eq!(
            tables.annual_withholding(dec!(50000), FilingStatus::MarriedSeparately, false),
            tables.annual_withholding(dec!(50000), FilingStatus::Single, false)
        );
    }

    #[test]
    fn test_married_jointly_mid_bracket() {
        let tables: WithholdingTables = WithholdingTables::default();

        // 2320 + 0.12 * (50000 - 23200) = 5536.00
        assert_eq!(
            tables.annual_withholding(dec!(50000), FilingStatus::MarriedJointly, false),
            dec!(5536.00)
        );
    }

    #[test]
    fn test_head_of_household_mid_bracket() {
        let tables: WithholdingTables = WithholdingTables::default();

        // 1655 + 0.12 * (50000 - 16550) = 5669.00
        assert_eq!(
            tables.annual_withholding(dec!(50000), FilingStatus::HeadOfHousehold, false),
            dec!(5669.00)
        );
    }

    #[test]
    fn test_dual_income_variant_withholds_more() {
        let tables: WithholdingTables = WithholdingTables::default();

        // 2713 + 0.22 * (50000 - 23575) = 8526.50
        let dual: Decimal = tables.annual_withholding(dec!(50000), FilingStatus::Single, true);
        let standard: Decimal =
            tables.annual_withholding(dec!(50000), FilingStatus::Single, false);

        assert_eq!(dual, dec!(8526.50));
        assert!(dual > standard);
    }

    #[test]
    fn test_top_bracket() {
        let tables: WithholdingTables = WithholdingTables::default();

        // 183647.25 + 0.37 * (700000 - 609350) = 217187.75
        assert_eq!(
            tables.annual_withholding(dec!(700000), FilingStatus::Single, false),
            dec!(217187.75)
        );
    }

    #[test]
    fn test_zero_and_negative_wage_withhold_nothing() {
        let tables: WithholdingTables = WithholdingTables::default();

        assert_eq!(
            tables.annual_withholding(Decimal::ZERO, FilingStatus::Single, false),
            Decimal::ZERO
        );
        assert_eq!(
            tables.annual_withholding(dec!(-1000), FilingStatus::Single, false),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_bracket_boundary_is_continuous() {
        let tables: WithholdingTables = WithholdingTables::default();

        // One cent below and exactly at a threshold must agree to the cent.
        let below: Decimal =
            tables.annual_withholding(dec!(47149.99), FilingStatus::Single, false);
        let at: Decimal = tables.annual_withholding(dec!(47150), FilingStatus::Single, false);

        assert!((at - below).abs() <= dec!(0.01));
    }

    #[test]
    fn test_adjusted_annual_wage_floors_at_zero() {
        assert_eq!(
            adjusted_annual_wage(dec!(10000), dec!(15000), Decimal::ZERO),
            Decimal::ZERO
        );
        assert_eq!(
            adjusted_annual_wage(dec!(10000), dec!(2000), dec!(500)),
            dec!(8500)
        );
    }

    #[test]
    fn test_period_withholding_weekly() {
        let tables: WithholdingTables = WithholdingTables::default();
        let profile: WorkerTaxProfile = WorkerTaxProfile::new(100, FilingStatus::Single, false);

        // 1000/week annualizes to 52000; annual withholding is
        // 5426 + 0.22 * 4850 = 6493; weekly share 124.87 (rounded).
        let weekly: Decimal = tables.period_withholding(dec!(1000), dec!(52), &profile);

        assert_eq!(weekly, dec!(124.87));
    }

    #[test]
    fn test_period_withholding_respects_other_income() {
        let tables: WithholdingTables = WithholdingTables::default();
        let mut profile: WorkerTaxProfile =
            WorkerTaxProfile::new(100, FilingStatus::Single, false);
        profile.other_annual_income = dec!(52000);

        assert_eq!(
            tables.period_withholding(dec!(1000), dec!(52), &profile),
            Decimal::ZERO
        );
    }
}
