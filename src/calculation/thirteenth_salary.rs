//! 13th salary (gratificação natalina) proration.
//!
//! The 13th salary accrues one twelfth per calendar month of the termination
//! year in which at least fifteen days were worked. Indemnified notice
//! extends the counting period to the projected termination date and pays
//! the extra twelfths as a separate line.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::calendar::{days_in_month, normalized_date};
use super::twelfths::{MonthFragment, clamp_twelfths};
use crate::models::AuditStep;

/// Legal reference for the 13th salary.
pub const THIRTEENTH_LEGAL_REF: &str = "Lei 4.090/1962 art. 1; Lei 4.749/1965";

/// The result of the 13th salary calculation.
#[derive(Debug, Clone)]
pub struct ThirteenthSalaryResult {
    /// First day of the counting period.
    pub period_start: NaiveDate,
    /// Twelfths earned up to the termination date.
    pub twelfths: u32,
    /// Extra twelfths earned up to the projected date.
    pub projected_twelfths: u32,
    /// Proportional 13th salary.
    pub proportional: Decimal,
    /// 13th salary on the projected twelfths.
    pub indemnified: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Start of the 13th salary counting period: the hire date, or 1 January of
/// the termination year when the contract started earlier.
pub fn thirteenth_period_start(hire_date: NaiveDate, termination_date: NaiveDate) -> NaiveDate {
    let year_start = NaiveDate::from_ymd_opt(termination_date.year(), 1, 1).unwrap_or(hire_date);
    hire_date.max(year_start)
}

/// Counts 13th salary twelfths between two dates.
///
/// Months are walked from `period_start` through `period_end`; only months
/// in the start year or the end year are considered. Each month's span is
/// clipped to the period and earns a twelfth when it covers fifteen days or
/// more. The count never exceeds twelve.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::thirteenth_twelfths;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
/// assert_eq!(thirteenth_twelfths(start, end), 3);
/// ```
pub fn thirteenth_twelfths(period_start: NaiveDate, period_end: NaiveDate) -> u32 {
    let mut count = 0;
    let mut cursor = period_start;

    while cursor <= period_end {
        if cursor.year() == period_start.year() || cursor.year() == period_end.year() {
            let same_month_as_end =
                cursor.year() == period_end.year() && cursor.month() == period_end.month();
            let last_day = if same_month_as_end {
                period_end
            } else {
                cursor.with_day(days_in_month(cursor)).unwrap_or(cursor)
            };

            let fragment = MonthFragment {
                first_day: cursor,
                last_day,
            };
            if fragment.counts() {
                count += 1;
            }
        }

        match normalized_date(
            i64::from(cursor.year()),
            i64::from(cursor.month()) + 1,
            1,
        ) {
            Some(next) => cursor = next,
            None => break,
        }
    }

    clamp_twelfths(count)
}

/// Calculates the proportional 13th salary and, when a projected date is
/// given, the notice-driven 13th salary.
///
/// # Arguments
///
/// * `salary_total` - Monthly salary plus allowance
/// * `hire_date` - First day of employment
/// * `termination_date` - Last day of employment
/// * `projected_date` - Termination date projected by indemnified notice, if any
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_thirteenth_salary(
    salary_total: Decimal,
    hire_date: NaiveDate,
    termination_date: NaiveDate,
    projected_date: Option<NaiveDate>,
    step_number: u32,
) -> ThirteenthSalaryResult {
    let period_start = thirteenth_period_start(hire_date, termination_date);
    let twelfths = thirteenth_twelfths(period_start, termination_date);
    let projected_twelfths = projected_date
        .map(|projected| thirteenth_twelfths(period_start, projected).saturating_sub(twelfths))
        .unwrap_or(0);

    let monthly = salary_total / Decimal::from(12);
    let proportional = monthly * Decimal::from(twelfths);
    let indemnified = monthly * Decimal::from(projected_twelfths);

    let mut reasoning = format!(
        "{} twelfths from {} to {}: R${} / 12 x {} = R${}",
        twelfths,
        period_start,
        termination_date,
        salary_total.normalize(),
        twelfths,
        proportional.normalize()
    );
    if let Some(projected) = projected_date {
        reasoning.push_str(&format!(
            "; projection to {} adds {} twelfths = R${}",
            projected,
            projected_twelfths,
            indemnified.normalize()
        ));
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "thirteenth_salary".to_string(),
        rule_name: "Proportional 13th Salary".to_string(),
        legal_ref: THIRTEENTH_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "salary_total": salary_total.normalize().to_string(),
            "period_start": period_start.to_string(),
            "termination_date": termination_date.to_string(),
            "projected_date": projected_date.map(|d| d.to_string())
        }),
        output: serde_json::json!({
            "twelfths": twelfths,
            "projected_twelfths": projected_twelfths,
            "proportional": proportional.normalize().to_string(),
            "indemnified": indemnified.normalize().to_string()
        }),
        reasoning,
    };

    ThirteenthSalaryResult {
        period_start,
        twelfths,
        projected_twelfths,
        proportional,
        indemnified,
        audit_step,
    }
}
