//! Salary balance (saldo de salário) for the termination month.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::AuditStep;

/// Days in the commercial month used for daily salary proration.
pub const COMMERCIAL_MONTH_DAYS: u32 = 30;

/// Legal reference for the salary balance.
pub const SALARY_BALANCE_LEGAL_REF: &str = "CLT art. 462; CLT art. 477";

/// The result of the salary balance calculation.
#[derive(Debug, Clone)]
pub struct SalaryBalanceResult {
    /// Days worked in the termination month, capped at 30.
    pub days_worked: u32,
    /// Salary owed for those days.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Prorates the monthly salary over the days worked in the termination month.
///
/// The daily rate is a thirtieth of the monthly salary regardless of the
/// month's real length, so the 31st day is never paid.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_salary_balance;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let result = calculate_salary_balance(
///     Decimal::new(3000, 0),
///     NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
///     1,
/// );
/// assert_eq!(result.days_worked, 15);
/// assert_eq!(result.amount, Decimal::new(1500, 0));
/// ```
pub fn calculate_salary_balance(
    salary_total: Decimal,
    termination_date: NaiveDate,
    step_number: u32,
) -> SalaryBalanceResult {
    let days_worked = termination_date.day().min(COMMERCIAL_MONTH_DAYS);
    let daily_rate = salary_total / Decimal::from(COMMERCIAL_MONTH_DAYS);
    let amount = daily_rate * Decimal::from(days_worked);

    let audit_step = AuditStep {
        step_number,
        rule_id: "salary_balance".to_string(),
        rule_name: "Salary Balance".to_string(),
        legal_ref: SALARY_BALANCE_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "salary_total": salary_total.normalize().to_string(),
            "termination_date": termination_date.to_string()
        }),
        output: serde_json::json!({
            "days_worked": days_worked,
            "salary_balance": amount.normalize().to_string()
        }),
        reasoning: format!(
            "R${} / 30 x {} days = R${}",
            salary_total.normalize(),
            days_worked,
            amount.normalize()
        ),
    };

    SalaryBalanceResult {
        days_worked,
        amount,
        audit_step,
    }
}
