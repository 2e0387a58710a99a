//! Settlement result models.
//!
//! This module contains [`SettlementResult`], the immutable record of every
//! payable and deductible line of a termination settlement, together with its
//! severance fund sub-record [`FundSummary`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AuditTrace;
use crate::config::FundRates;

/// Severance fund (FGTS) balance and dismissal penalty.
///
/// The total is always `balance + penalty`; construct through
/// [`FundSummary::new`] or [`FundSummary::from_balance`] to keep it so.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundSummary {
    /// Estimated or declared fund balance, including this termination's deposit.
    pub balance: Decimal,
    /// Dismissal penalty over the balance.
    pub penalty: Decimal,
    /// Balance plus penalty.
    pub total: Decimal,
}

impl FundSummary {
    /// Builds a summary from an explicit balance and penalty.
    pub fn new(balance: Decimal, penalty: Decimal) -> Self {
        Self {
            balance,
            penalty,
            total: balance + penalty,
        }
    }

    /// Builds a summary whose penalty is `balance × penalty_rate`.
    ///
    /// # Example
    ///
    /// ```
    /// use settlement_engine::models::FundSummary;
    /// use rust_decimal::Decimal;
    ///
    /// let fund = FundSummary::from_balance(Decimal::new(5240, 0), Decimal::new(40, 2));
    /// assert_eq!(fund.penalty, Decimal::new(2096, 0));
    /// assert_eq!(fund.total, Decimal::new(7336, 0));
    /// ```
    pub fn from_balance(balance: Decimal, penalty_rate: Decimal) -> Self {
        Self::new(balance, balance * penalty_rate)
    }
}

/// The complete set of settlement lines.
///
/// Produced by [`crate::calculation::calculate_settlement`]. Afterwards it is
/// only ever replaced: wholesale by an edit, or in its fund sub-record by a
/// fund override. Net settlement and combined payout are derived fields and
/// are recomputed by every constructor path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    /// Days worked in the termination month.
    pub days_worked_in_month: u32,
    /// Notice period length owed by tenure.
    pub notice_days: u32,
    /// Termination date after projecting the indemnified notice days.
    pub projected_date: NaiveDate,
    /// Salary for the days worked in the termination month.
    pub salary_balance: Decimal,
    /// Indemnified notice pay.
    pub notice_pay: Decimal,
    /// 13th salary twelfths earned in the termination year.
    pub thirteenth_twelfths: u32,
    /// Proportional 13th salary.
    pub thirteenth_proportional: Decimal,
    /// 13th salary twelfths added by the indemnified notice projection.
    pub thirteenth_indemnified: Decimal,
    /// Vacation twelfths earned in the open acquisition period.
    pub vacation_twelfths: u32,
    /// Overdue vacation periods.
    pub overdue_vacation: Decimal,
    /// One-third bonus on overdue vacation.
    pub overdue_vacation_bonus: Decimal,
    /// Proportional vacation.
    pub proportional_vacation: Decimal,
    /// One-third bonus on proportional vacation.
    pub proportional_vacation_bonus: Decimal,
    /// Vacation twelfths added by the indemnified notice projection.
    pub indemnified_vacation: Decimal,
    /// One-third bonus on the notice-driven vacation.
    pub indemnified_vacation_bonus: Decimal,
    /// Base for social-security withholding.
    pub social_security_base: Decimal,
    /// Social-security withholding (INSS).
    pub social_security_withholding: Decimal,
    /// Severance fund sub-record.
    pub fund: FundSummary,
    /// Sum of payable lines minus withholding.
    pub net_settlement: Decimal,
    /// Net settlement plus the fund total.
    pub combined_payout: Decimal,
}

impl SettlementResult {
    /// Sum of every payable line.
    pub fn gross_earnings(&self) -> Decimal {
        self.salary_balance
            + self.notice_pay
            + self.thirteenth_proportional
            + self.thirteenth_indemnified
            + self.overdue_vacation
            + self.overdue_vacation_bonus
            + self.proportional_vacation
            + self.proportional_vacation_bonus
            + self.indemnified_vacation
            + self.indemnified_vacation_bonus
    }

    /// Sum of every deduction.
    pub fn total_deductions(&self) -> Decimal {
        self.social_security_withholding
    }

    /// Fund deposit owed on this termination's own remuneration lines.
    ///
    /// Salary balance, proportional 13th, notice pay and the notice-driven
    /// 13th are subject to the deposit; vacation lines are not.
    pub fn termination_fund_deposit(&self, rates: &FundRates) -> Decimal {
        (self.salary_balance
            + self.thirteenth_proportional
            + self.notice_pay
            + self.thirteenth_indemnified)
            * rates.contribution_rate
    }

    /// Returns a copy with its fund sub-record replaced.
    pub fn with_fund(&self, fund: FundSummary) -> Self {
        Self {
            fund,
            ..self.clone()
        }
        .with_recomputed_totals()
    }

    /// Recomputes the fund total, net settlement and combined payout.
    pub fn with_recomputed_totals(mut self) -> Self {
        self.fund = FundSummary::new(self.fund.balance, self.fund.penalty);
        self.net_settlement = self.gross_earnings() - self.total_deductions();
        self.combined_payout = self.net_settlement + self.fund.total;
        self
    }
}

/// A settlement together with the audit trace that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementCalculation {
    /// The settlement lines.
    pub settlement: SettlementResult,
    /// How each line was derived.
    pub audit_trace: AuditTrace,
}
