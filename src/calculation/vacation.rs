//! Vacation (férias) entitlements.
//!
//! Vacation accrues over acquisition periods anchored on the hire
//! anniversary. Overdue periods are paid in full; the open period is paid by
//! twelfths. Every vacation amount carries a one-third constitutional bonus.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::calendar::{add_months, day_difference, normalized_date};
use super::twelfths::{clamp_twelfths, fragment_counts};
use crate::models::AuditStep;

/// Legal reference for vacation and its one-third bonus.
pub const VACATION_LEGAL_REF: &str = "CLT arts. 146 and 147; CF art. 7, XVII";

/// The result of the vacation calculation.
#[derive(Debug, Clone)]
pub struct VacationResult {
    /// Start of the open acquisition period.
    pub acquisition_start: NaiveDate,
    /// Twelfths earned in the open period up to the termination date.
    pub twelfths: u32,
    /// Extra twelfths earned up to the projected date.
    pub projected_twelfths: u32,
    /// Overdue vacation periods paid in full.
    pub overdue: Decimal,
    /// One-third bonus on overdue vacation.
    pub overdue_bonus: Decimal,
    /// Proportional vacation.
    pub proportional: Decimal,
    /// One-third bonus on proportional vacation.
    pub proportional_bonus: Decimal,
    /// Vacation on the projected twelfths.
    pub indemnified: Decimal,
    /// One-third bonus on the projected twelfths.
    pub indemnified_bonus: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// The most recent hire anniversary on or before the termination date.
///
/// Anniversaries of 29 February roll into 1 March in common years and keep
/// that day afterwards.
pub fn acquisition_period_start(hire_date: NaiveDate, termination_date: NaiveDate) -> NaiveDate {
    let mut start = hire_date;
    while let Some(next) = normalized_date(
        i64::from(start.year()) + 1,
        i64::from(start.month()),
        i64::from(start.day()),
    ) {
        if next > termination_date {
            break;
        }
        start = next;
    }
    start
}

/// Counts vacation twelfths from the start of an acquisition period.
///
/// Anniversary months are stepped one at a time. A month that ends on or
/// before `period_end` earns a twelfth; the final partial month earns one
/// when it covers fifteen days or more. The count never exceeds twelve.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::vacation_twelfths;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 12, 10).unwrap();
/// assert_eq!(vacation_twelfths(start, end), 6);
/// ```
pub fn vacation_twelfths(acquisition_start: NaiveDate, period_end: NaiveDate) -> u32 {
    let mut count = 0;
    let mut cursor = acquisition_start;

    while cursor < period_end {
        let Some(month_end) = add_months(cursor, 1) else {
            break;
        };

        if month_end > period_end {
            if fragment_counts(day_difference(period_end, cursor) + 1) {
                count += 1;
            }
        } else {
            count += 1;
        }
        cursor = month_end;
    }

    clamp_twelfths(count)
}

/// Calculates overdue, proportional and notice-driven vacation, each with
/// its one-third bonus.
///
/// # Arguments
///
/// * `salary_total` - Monthly salary plus allowance
/// * `hire_date` - First day of employment
/// * `termination_date` - Last day of employment
/// * `projected_date` - Termination date projected by indemnified notice, if any
/// * `overdue_periods` - Complete acquisition periods never taken
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_vacation(
    salary_total: Decimal,
    hire_date: NaiveDate,
    termination_date: NaiveDate,
    projected_date: Option<NaiveDate>,
    overdue_periods: u32,
    step_number: u32,
) -> VacationResult {
    let third = Decimal::from(3);

    let overdue = Decimal::from(overdue_periods) * salary_total;
    let overdue_bonus = overdue / third;

    let acquisition_start = acquisition_period_start(hire_date, termination_date);
    let twelfths = vacation_twelfths(acquisition_start, termination_date);
    let projected_twelfths = projected_date
        .map(|projected| vacation_twelfths(acquisition_start, projected).saturating_sub(twelfths))
        .unwrap_or(0);

    let monthly = salary_total / Decimal::from(12);
    let proportional = monthly * Decimal::from(twelfths);
    let proportional_bonus = proportional / third;
    let indemnified = monthly * Decimal::from(projected_twelfths);
    let indemnified_bonus = indemnified / third;

    let mut reasoning = format!(
        "{} overdue periods = R${} + 1/3; {} twelfths since {} = R${} + 1/3",
        overdue_periods,
        overdue.normalize(),
        twelfths,
        acquisition_start,
        proportional.normalize()
    );
    if let Some(projected) = projected_date {
        reasoning.push_str(&format!(
            "; projection to {} adds {} twelfths = R${} + 1/3",
            projected,
            projected_twelfths,
            indemnified.normalize()
        ));
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "vacation".to_string(),
        rule_name: "Vacation Entitlements".to_string(),
        legal_ref: VACATION_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "salary_total": salary_total.normalize().to_string(),
            "hire_date": hire_date.to_string(),
            "termination_date": termination_date.to_string(),
            "projected_date": projected_date.map(|d| d.to_string()),
            "overdue_periods": overdue_periods
        }),
        output: serde_json::json!({
            "acquisition_start": acquisition_start.to_string(),
            "twelfths": twelfths,
            "projected_twelfths": projected_twelfths,
            "overdue": overdue.normalize().to_string(),
            "proportional": proportional.normalize().to_string(),
            "indemnified": indemnified.normalize().to_string()
        }),
        reasoning,
    };

    VacationResult {
        acquisition_start,
        twelfths,
        projected_twelfths,
        overdue,
        overdue_bonus,
        proportional,
        proportional_bonus,
        indemnified,
        indemnified_bonus,
        audit_step,
    }
}
