//! Manual settlement edits.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Replacement values for individual settlement lines.
///
/// Every field is optional; `None` keeps the current value. Derived totals
/// (fund total, net settlement, combined payout) cannot be edited directly
/// because they are always recomputed.
///
/// # Example
///
/// ```
/// use settlement_engine::models::SettlementEdit;
///
/// let edit: SettlementEdit = serde_json::from_str(r#"{ "notice_pay": "900.00" }"#).unwrap();
/// assert!(edit.notice_pay.is_some());
/// assert!(edit.salary_balance.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementEdit {
    /// Salary for the days worked in the termination month.
    pub salary_balance: Option<Decimal>,
    /// Indemnified notice pay.
    pub notice_pay: Option<Decimal>,
    /// Proportional 13th salary.
    pub thirteenth_proportional: Option<Decimal>,
    /// Notice-driven 13th salary.
    pub thirteenth_indemnified: Option<Decimal>,
    /// Overdue vacation.
    pub overdue_vacation: Option<Decimal>,
    /// One-third bonus on overdue vacation.
    pub overdue_vacation_bonus: Option<Decimal>,
    /// Proportional vacation.
    pub proportional_vacation: Option<Decimal>,
    /// One-third bonus on proportional vacation.
    pub proportional_vacation_bonus: Option<Decimal>,
    /// Notice-driven vacation.
    pub indemnified_vacation: Option<Decimal>,
    /// One-third bonus on notice-driven vacation.
    pub indemnified_vacation_bonus: Option<Decimal>,
    /// Social-security withholding.
    pub social_security_withholding: Option<Decimal>,
    /// Fund balance. Re-derives the penalty unless `fund_penalty` is set.
    pub fund_balance: Option<Decimal>,
    /// Fund dismissal penalty.
    pub fund_penalty: Option<Decimal>,
}

impl SettlementEdit {
    /// Returns each supplied field with its name.
    pub fn supplied_fields(&self) -> Vec<(&'static str, Decimal)> {
        [
            ("salary_balance", self.salary_balance),
            ("notice_pay", self.notice_pay),
            ("thirteenth_proportional", self.thirteenth_proportional),
            ("thirteenth_indemnified", self.thirteenth_indemnified),
            ("overdue_vacation", self.overdue_vacation),
            ("overdue_vacation_bonus", self.overdue_vacation_bonus),
            ("proportional_vacation", self.proportional_vacation),
            ("proportional_vacation_bonus", self.proportional_vacation_bonus),
            ("indemnified_vacation", self.indemnified_vacation),
            ("indemnified_vacation_bonus", self.indemnified_vacation_bonus),
            ("social_security_withholding", self.social_security_withholding),
            ("fund_balance", self.fund_balance),
            ("fund_penalty", self.fund_penalty),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }

    /// True when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.supplied_fields().is_empty()
    }
}
