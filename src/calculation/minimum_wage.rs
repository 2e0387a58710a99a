//! Minimum wage history lookup.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::MinimumWageTable;

/// Returns the minimum wage in force on `date`.
///
/// The table is scanned newest first and the first record whose effective
/// date is on or before `date` wins. Dates before the oldest record fall back
/// to the oldest tabulated wage.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::minimum_wage_on;
/// use settlement_engine::config::RuleSet;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let rules = RuleSet::default();
/// let wage = minimum_wage_on(rules.minimum_wage(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
/// assert_eq!(wage, Decimal::new(141200, 2));
/// ```
pub fn minimum_wage_on(table: &MinimumWageTable, date: NaiveDate) -> Decimal {
    table
        .records()
        .iter()
        .find(|record| record.effective_date <= date)
        .map(|record| record.wage)
        .unwrap_or_else(|| table.oldest_wage())
}
