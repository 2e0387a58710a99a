//! Severance fund (FGTS) estimation and overrides.
//!
//! The composer estimates the fund balance from the current salary and the
//! months of service. Callers who know better can later replace the estimate
//! with a declared balance or a month-by-month salary history; only the fund
//! sub-record and the combined payout change.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use super::calendar::whole_months_between;
use crate::config::FundRates;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, FundOverride, FundSummary, SettlementResult, check_amount};

/// Legal reference for the fund deposit and dismissal penalty.
pub const FUND_LEGAL_REF: &str = "Lei 8.036/1990 arts. 15 and 18";

/// The result of the automatic fund estimate.
#[derive(Debug, Clone)]
pub struct FundEstimateResult {
    /// Calendar months between hire and termination.
    pub months_of_service: i64,
    /// Estimated deposits accumulated before termination.
    pub accumulated: Decimal,
    /// Deposit owed on the termination lines.
    pub termination_deposit: Decimal,
    /// Balance, penalty and total.
    pub fund: FundSummary,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Estimates the fund balance as if the current salary had been deposited
/// every month of service.
///
/// # Arguments
///
/// * `salary_total` - Monthly salary plus allowance
/// * `hire_date` - First day of employment
/// * `termination_date` - Last day of employment
/// * `termination_deposit` - Deposit owed on this termination's own lines
/// * `rates` - Contribution and penalty rates
/// * `step_number` - The step number for audit trail sequencing
pub fn estimate_fund(
    salary_total: Decimal,
    hire_date: NaiveDate,
    termination_date: NaiveDate,
    termination_deposit: Decimal,
    rates: &FundRates,
    step_number: u32,
) -> FundEstimateResult {
    let months_of_service = whole_months_between(hire_date, termination_date).max(0);
    let accumulated = salary_total * rates.contribution_rate * Decimal::from(months_of_service);
    let fund = FundSummary::from_balance(accumulated + termination_deposit, rates.penalty_rate);

    let audit_step = AuditStep {
        step_number,
        rule_id: "fund_estimate".to_string(),
        rule_name: "Severance Fund Estimate".to_string(),
        legal_ref: FUND_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "salary_total": salary_total.normalize().to_string(),
            "months_of_service": months_of_service,
            "termination_deposit": termination_deposit.normalize().to_string(),
            "contribution_rate": rates.contribution_rate.normalize().to_string(),
            "penalty_rate": rates.penalty_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "accumulated": accumulated.normalize().to_string(),
            "balance": fund.balance.normalize().to_string(),
            "penalty": fund.penalty.normalize().to_string(),
            "total": fund.total.normalize().to_string()
        }),
        reasoning: format!(
            "R${} x {} x {} months = R${} accumulated, plus R${} on termination lines; penalty {} of R${} = R${}",
            salary_total.normalize(),
            rates.contribution_rate.normalize(),
            months_of_service,
            accumulated.normalize(),
            termination_deposit.normalize(),
            rates.penalty_rate.normalize(),
            fund.balance.normalize(),
            fund.penalty.normalize()
        ),
    };

    FundEstimateResult {
        months_of_service,
        accumulated,
        termination_deposit,
        fund,
        audit_step,
    }
}

/// Replaces the fund sub-record of a settlement.
///
/// The termination deposit on the settlement's own lines is always added to
/// the overridden balance, and the penalty is re-derived from it. Every other
/// line of the settlement is left as it was.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when a manual balance is zero,
/// negative or above [`MAX_AMOUNT`](crate::models::MAX_AMOUNT).
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::{apply_fund_override, calculate_settlement};
/// use settlement_engine::config::RuleSet;
/// use settlement_engine::models::{ContractInputs, FundOverride, NoticeModality};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let rules = RuleSet::default();
/// let inputs = ContractInputs {
///     base_salary: Decimal::new(3000, 0),
///     allowance: Decimal::ZERO,
///     hire_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
///     termination_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
///     notice: NoticeModality::Worked,
///     overdue_vacation_periods: 0,
/// };
/// let settlement = calculate_settlement(&inputs, &rules).unwrap().settlement;
///
/// let patched = apply_fund_override(
///     &settlement,
///     &FundOverride::ManualBalance(Decimal::new(5000, 0)),
///     rules.fund(),
/// )
/// .unwrap();
/// assert_eq!(patched.fund.balance, Decimal::new(5228, 0));
/// assert_eq!(patched.net_settlement, settlement.net_settlement);
/// ```
pub fn apply_fund_override(
    settlement: &SettlementResult,
    fund_override: &FundOverride,
    rates: &FundRates,
) -> EngineResult<SettlementResult> {
    let termination_deposit = settlement.termination_fund_deposit(rates);

    let (prior_balance, source) = match fund_override {
        FundOverride::ManualBalance(balance) => {
            if *balance <= Decimal::ZERO {
                return Err(EngineError::invalid_input(
                    "manual_balance",
                    format!("must be greater than zero, got {}", balance),
                ));
            }
            check_amount("manual_balance", *balance)?;
            (*balance, "manual balance")
        }
        FundOverride::MonthByMonth(history) => (
            history.total_deposits(rates.contribution_rate),
            "month-by-month history",
        ),
    };

    let fund = FundSummary::from_balance(prior_balance + termination_deposit, rates.penalty_rate);
    info!(
        source,
        balance = %fund.balance,
        penalty = %fund.penalty,
        "Fund override applied"
    );

    Ok(settlement.with_fund(fund))
}
