//! Calculation logic for the Settlement Engine.
//!
//! This module contains the calendar utilities, the minimum wage lookup, the
//! progressive withholding table, the twelfths proration for the 13th salary
//! and vacation, the notice period projection, the settlement composer, and
//! the severance fund estimate with its overrides.

mod calendar;
mod edit;
mod fund;
mod minimum_wage;
mod notice;
mod salary_balance;
mod settlement;
mod thirteenth_salary;
mod twelfths;
mod vacation;
mod withholding;

pub use calendar::{
    add_months, day_difference, days_in_month, normalized_date, parse_iso_date,
    whole_months_between,
};
pub use edit::apply_settlement_edit;
pub use fund::{FUND_LEGAL_REF, FundEstimateResult, apply_fund_override, estimate_fund};
pub use minimum_wage::minimum_wage_on;
pub use notice::{NOTICE_LEGAL_REF, NoticeResult, calculate_notice, notice_days, years_of_service};
pub use salary_balance::{
    COMMERCIAL_MONTH_DAYS, SALARY_BALANCE_LEGAL_REF, SalaryBalanceResult, calculate_salary_balance,
};
pub use settlement::calculate_settlement;
pub use thirteenth_salary::{
    THIRTEENTH_LEGAL_REF, ThirteenthSalaryResult, calculate_thirteenth_salary,
    thirteenth_period_start, thirteenth_twelfths,
};
pub use twelfths::{MAX_TWELFTHS, MIN_FRAGMENT_DAYS, MonthFragment, clamp_twelfths, fragment_counts};
pub use vacation::{
    VACATION_LEGAL_REF, VacationResult, acquisition_period_start, calculate_vacation,
    vacation_twelfths,
};
pub use withholding::{
    WITHHOLDING_LEGAL_REF, WithholdingResult, calculate_withholding, withholding,
};
