//! Settlement composer.
//!
//! Orchestrates every rule into a single [`SettlementResult`] and records an
//! audit step for each of them.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::fund::estimate_fund;
use super::notice::calculate_notice;
use super::salary_balance::calculate_salary_balance;
use super::thirteenth_salary::calculate_thirteenth_salary;
use super::vacation::calculate_vacation;
use super::withholding::calculate_withholding;
use crate::config::RuleSet;
use crate::error::EngineResult;
use crate::models::{
    AuditTrace, AuditWarning, ContractInputs, EXPECTED_MAX_OVERDUE_PERIODS, FundSummary,
    NoticeModality, SettlementCalculation, SettlementResult,
};

/// Calculates the full termination settlement for a contract.
///
/// Inputs are validated once on entry; a rejected contract produces no
/// settlement. The severance fund is estimated from the current salary and
/// can be replaced afterwards with
/// [`apply_fund_override`](super::apply_fund_override).
///
/// # Errors
///
/// Returns [`EngineError::InvalidDateRange`](crate::error::EngineError::InvalidDateRange)
/// when the termination date precedes the hire date, and
/// [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput) for
/// negative amounts or out-of-range dates.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_settlement;
/// use settlement_engine::config::RuleSet;
/// use settlement_engine::models::{ContractInputs, NoticeModality};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let inputs = ContractInputs {
///     base_salary: Decimal::new(3000, 0),
///     allowance: Decimal::ZERO,
///     hire_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
///     termination_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
///     notice: NoticeModality::Worked,
///     overdue_vacation_periods: 0,
/// };
///
/// let result = calculate_settlement(&inputs, &RuleSet::default()).unwrap();
/// assert_eq!(result.settlement.salary_balance, Decimal::new(1500, 0));
/// assert_eq!(result.settlement.notice_days, 36);
/// assert_eq!(result.settlement.thirteenth_twelfths, 3);
/// ```
pub fn calculate_settlement(
    inputs: &ContractInputs,
    rules: &RuleSet,
) -> EngineResult<SettlementCalculation> {
    if let Err(err) = inputs.validate() {
        warn!(error = %err, "Rejected contract inputs");
        return Err(err);
    }

    let salary_total = inputs.salary_total();
    let mut trace = AuditTrace::default();
    trace.warnings = input_warnings(inputs);

    let balance = calculate_salary_balance(
        salary_total,
        inputs.termination_date,
        trace.next_step_number(),
    );
    debug!(amount = %balance.amount, days = balance.days_worked, "Salary balance");
    trace.steps.push(balance.audit_step.clone());

    let notice = calculate_notice(
        salary_total,
        inputs.hire_date,
        inputs.termination_date,
        inputs.notice,
        rules.notice(),
        trace.next_step_number(),
    );
    debug!(
        notice_days = notice.notice_days,
        notice_pay = %notice.notice_pay,
        projected_date = %notice.projected_date,
        "Notice period"
    );
    trace.steps.push(notice.audit_step.clone());

    // Only indemnified notice adds twelfths beyond the termination date.
    let projection = match inputs.notice {
        NoticeModality::Indemnified => Some(notice.projected_date),
        NoticeModality::Worked => None,
    };

    let thirteenth = calculate_thirteenth_salary(
        salary_total,
        inputs.hire_date,
        inputs.termination_date,
        projection,
        trace.next_step_number(),
    );
    debug!(
        twelfths = thirteenth.twelfths,
        projected_twelfths = thirteenth.projected_twelfths,
        "13th salary"
    );
    trace.steps.push(thirteenth.audit_step.clone());

    let vacation = calculate_vacation(
        salary_total,
        inputs.hire_date,
        inputs.termination_date,
        projection,
        inputs.overdue_vacation_periods,
        trace.next_step_number(),
    );
    debug!(
        twelfths = vacation.twelfths,
        projected_twelfths = vacation.projected_twelfths,
        acquisition_start = %vacation.acquisition_start,
        "Vacation"
    );
    trace.steps.push(vacation.audit_step.clone());

    let social_security_base = balance.amount + thirteenth.proportional;
    let withholding = calculate_withholding(
        social_security_base,
        rules.withholding(),
        trace.next_step_number(),
    );
    debug!(base = %social_security_base, amount = %withholding.amount, "Withholding");
    trace.steps.push(withholding.audit_step.clone());

    let settlement = SettlementResult {
        days_worked_in_month: balance.days_worked,
        notice_days: notice.notice_days,
        projected_date: notice.projected_date,
        salary_balance: balance.amount,
        notice_pay: notice.notice_pay,
        thirteenth_twelfths: thirteenth.twelfths,
        thirteenth_proportional: thirteenth.proportional,
        thirteenth_indemnified: thirteenth.indemnified,
        vacation_twelfths: vacation.twelfths,
        overdue_vacation: vacation.overdue,
        overdue_vacation_bonus: vacation.overdue_bonus,
        proportional_vacation: vacation.proportional,
        proportional_vacation_bonus: vacation.proportional_bonus,
        indemnified_vacation: vacation.indemnified,
        indemnified_vacation_bonus: vacation.indemnified_bonus,
        social_security_base,
        social_security_withholding: withholding.amount,
        fund: FundSummary::new(Decimal::ZERO, Decimal::ZERO),
        net_settlement: Decimal::ZERO,
        combined_payout: Decimal::ZERO,
    };

    let fund = estimate_fund(
        salary_total,
        inputs.hire_date,
        inputs.termination_date,
        settlement.termination_fund_deposit(rules.fund()),
        rules.fund(),
        trace.next_step_number(),
    );
    debug!(
        months = fund.months_of_service,
        balance = %fund.fund.balance,
        "Fund estimate"
    );
    trace.steps.push(fund.audit_step.clone());

    let settlement = settlement.with_fund(fund.fund);
    info!(
        rule_set = %rules.metadata().code,
        notice = inputs.notice.as_str(),
        gross = %settlement.gross_earnings(),
        net_settlement = %settlement.net_settlement,
        combined_payout = %settlement.combined_payout,
        "Settlement calculated"
    );

    Ok(SettlementCalculation {
        settlement,
        audit_trace: trace,
    })
}

fn input_warnings(inputs: &ContractInputs) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();

    if inputs.overdue_vacation_periods > EXPECTED_MAX_OVERDUE_PERIODS {
        warnings.push(AuditWarning {
            code: "OVERDUE_VACATION_HIGH".to_string(),
            message: format!(
                "{} overdue vacation periods exceeds the expected maximum of {}",
                inputs.overdue_vacation_periods, EXPECTED_MAX_OVERDUE_PERIODS
            ),
            severity: "medium".to_string(),
        });
    }
    if inputs.salary_total().is_zero() {
        warnings.push(AuditWarning {
            code: "ZERO_SALARY".to_string(),
            message: "Salary and allowance are both zero; every line will be zero".to_string(),
            severity: "low".to_string(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_worked_inputs() -> ContractInputs {
        ContractInputs {
            base_salary: dec("3000"),
            allowance: Decimal::ZERO,
            hire_date: date(2023, 1, 1),
            termination_date: date(2025, 3, 15),
            notice: NoticeModality::Worked,
            overdue_vacation_periods: 0,
        }
    }

    fn create_indemnified_inputs() -> ContractInputs {
        ContractInputs {
            base_salary: dec("2400"),
            allowance: dec("600"),
            hire_date: date(2020, 6, 10),
            termination_date: date(2024, 12, 10),
            notice: NoticeModality::Indemnified,
            overdue_vacation_periods: 1,
        }
    }

    #[test]
    fn test_worked_notice_settlement() {
        let result = calculate_settlement(&create_worked_inputs(), &RuleSet::default()).unwrap();
        let s = result.settlement;

        assert_eq!(s.days_worked_in_month, 15);
        assert_eq!(s.salary_balance, dec("1500"));
        assert_eq!(s.notice_days, 36);
        assert_eq!(s.notice_pay, dec("600"));
        assert_eq!(s.projected_date, date(2025, 3, 21));
        assert_eq!(s.thirteenth_twelfths, 3);
        assert_eq!(s.thirteenth_proportional, dec("750"));
        assert_eq!(s.thirteenth_indemnified, Decimal::ZERO);
        assert_eq!(s.vacation_twelfths, 3);
        assert_eq!(s.proportional_vacation, dec("750"));
        assert_eq!(s.proportional_vacation_bonus, dec("250"));
        assert_eq!(s.indemnified_vacation, Decimal::ZERO);
        assert_eq!(s.social_security_base, dec("2250"));
        assert_eq!(s.social_security_withholding, dec("179.73"));
        assert_eq!(s.fund.balance, dec("6468"));
        assert_eq!(s.fund.penalty, dec("2587.2"));
        assert_eq!(s.gross_earnings(), dec("3850"));
        assert_eq!(s.net_settlement, dec("3670.27"));
        assert_eq!(s.combined_payout, dec("12725.47"));
    }

    #[test]
    fn test_indemnified_notice_settlement() {
        let result =
            calculate_settlement(&create_indemnified_inputs(), &RuleSet::default()).unwrap();
        let s = result.settlement;

        assert_eq!(s.salary_balance, dec("1000"));
        assert_eq!(s.notice_days, 42);
        assert_eq!(s.notice_pay, dec("4200"));
        assert_eq!(s.projected_date, date(2025, 1, 21));
        assert_eq!(s.thirteenth_twelfths, 11);
        assert_eq!(s.thirteenth_proportional, dec("2750"));
        assert_eq!(s.thirteenth_indemnified, dec("250"));
        assert_eq!(s.vacation_twelfths, 6);
        assert_eq!(s.overdue_vacation, dec("3000"));
        assert_eq!(s.overdue_vacation_bonus, dec("1000"));
        assert_eq!(s.proportional_vacation, dec("1500"));
        assert_eq!(s.indemnified_vacation, dec("250"));
        assert_eq!(s.social_security_base, dec("3750"));
        assert_eq!(s.social_security_withholding, dec("343.41"));
        assert_eq!(s.fund.balance, dec("13616"));
        assert_eq!(s.fund.penalty, dec("5446.4"));
        assert_eq!(s.fund.total, dec("19062.4"));
    }

    #[test]
    fn test_audit_trace_has_one_step_per_rule() {
        let result = calculate_settlement(&create_worked_inputs(), &RuleSet::default()).unwrap();
        let rule_ids: Vec<&str> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();

        assert_eq!(
            rule_ids,
            vec![
                "salary_balance",
                "notice_period",
                "thirteenth_salary",
                "vacation",
                "social_security_withholding",
                "fund_estimate"
            ]
        );
        for (i, step) in result.audit_trace.steps.iter().enumerate() {
            assert_eq!(step.step_number, i as u32 + 1);
        }
        assert!(result.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_reversed_dates_are_rejected() {
        let mut inputs = create_worked_inputs();
        inputs.termination_date = date(2022, 12, 31);

        let result = calculate_settlement(&inputs, &RuleSet::default());
        assert!(matches!(result, Err(EngineError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_same_day_contract() {
        let mut inputs = create_worked_inputs();
        inputs.hire_date = date(2025, 3, 15);

        let s = calculate_settlement(&inputs, &RuleSet::default())
            .unwrap()
            .settlement;
        assert_eq!(s.salary_balance, dec("1500"));
        assert_eq!(s.notice_days, 30);
        assert_eq!(s.notice_pay, Decimal::ZERO);
        assert_eq!(s.thirteenth_twelfths, 0);
        assert_eq!(s.vacation_twelfths, 0);
    }

    #[test]
    fn test_high_overdue_count_warns_but_calculates() {
        let mut inputs = create_worked_inputs();
        inputs.overdue_vacation_periods = 7;

        let result = calculate_settlement(&inputs, &RuleSet::default()).unwrap();
        assert_eq!(result.settlement.overdue_vacation, dec("21000"));
        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(result.audit_trace.warnings[0].code, "OVERDUE_VACATION_HIGH");
    }

    #[test]
    fn test_zero_salary_warns() {
        let mut inputs = create_worked_inputs();
        inputs.base_salary = Decimal::ZERO;

        let result = calculate_settlement(&inputs, &RuleSet::default()).unwrap();
        assert_eq!(result.settlement.net_settlement, Decimal::ZERO);
        assert_eq!(result.settlement.fund.total, Decimal::ZERO);
        assert_eq!(result.audit_trace.warnings[0].code, "ZERO_SALARY");
    }

    #[test]
    fn test_recalculation_is_identical() {
        let inputs = create_indemnified_inputs();
        let rules = RuleSet::default();

        let first = calculate_settlement(&inputs, &rules).unwrap();
        let second = calculate_settlement(&inputs, &rules).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
