//! Contract input models.
//!
//! This module defines [`ContractInputs`], the validated description of an
//! employment contract being terminated, and [`ContractRequest`], the raw
//! boundary shape with ISO date strings and decimal strings.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::parse_iso_date;
use crate::error::{EngineError, EngineResult};

/// How the notice period (aviso prévio) is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeModality {
    /// The employee works through the notice period.
    #[serde(alias = "trabalhado")]
    Worked,
    /// The notice period is paid in lieu and projects the termination date.
    #[serde(alias = "indenizado")]
    Indemnified,
}

impl NoticeModality {
    /// Returns the snake_case name used in serialized payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeModality::Worked => "worked",
            NoticeModality::Indemnified => "indemnified",
        }
    }
}

/// Overdue vacation counts above this raise an audit warning.
pub const EXPECTED_MAX_OVERDUE_PERIODS: u32 = 5;

/// Largest monetary amount accepted anywhere in the engine (10^15).
///
/// Every derived line, including overdue vacation over the full `u32` range
/// of periods, stays inside the range of [`Decimal`].
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Rejects negative amounts and amounts above [`MAX_AMOUNT`].
pub(crate) fn check_amount(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    if value > MAX_AMOUNT {
        return Err(EngineError::invalid_input(
            field,
            format!("must not exceed {}, got {}", MAX_AMOUNT, value),
        ));
    }
    Ok(())
}

/// The contract being terminated.
///
/// # Example
///
/// ```
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
/// assert!(inputs.validate().is_ok());
/// assert_eq!(inputs.salary_total(), Decimal::new(3000, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInputs {
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Monthly health/hazard allowance (adicional de insalubridade).
    pub allowance: Decimal,
    /// First day of employment.
    pub hire_date: NaiveDate,
    /// Last day of employment.
    pub termination_date: NaiveDate,
    /// How the notice period is served.
    pub notice: NoticeModality,
    /// Complete vacation periods acquired but never taken.
    #[serde(default)]
    pub overdue_vacation_periods: u32,
}

impl ContractInputs {
    /// Monthly remuneration used by every proration: salary plus allowance.
    pub fn salary_total(&self) -> Decimal {
        self.base_salary + self.allowance
    }

    /// Checks amounts and the date range.
    ///
    /// Returns [`EngineError::InvalidDateRange`] when the termination date
    /// precedes the hire date, and [`EngineError::InvalidInput`] for negative
    /// amounts, amounts above [`MAX_AMOUNT`] or dates outside the four-digit
    /// year range.
    pub fn validate(&self) -> EngineResult<()> {
        check_amount("base_salary", self.base_salary)?;
        check_amount("allowance", self.allowance)?;
        check_year("hire_date", self.hire_date)?;
        check_year("termination_date", self.termination_date)?;

        if self.termination_date < self.hire_date {
            return Err(EngineError::InvalidDateRange {
                hire_date: self.hire_date,
                termination_date: self.termination_date,
            });
        }
        Ok(())
    }
}

fn check_year(field: &str, date: NaiveDate) -> EngineResult<()> {
    if (1..=9999).contains(&date.year()) {
        Ok(())
    } else {
        Err(EngineError::invalid_input(
            field,
            format!("year {} is outside 0001-9999", date.year()),
        ))
    }
}

/// Contract inputs as collected by a form: dates and amounts are strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRequest {
    /// Monthly base salary, as a decimal string.
    pub base_salary: String,
    /// Monthly allowance, as a decimal string. Blank means zero.
    #[serde(default)]
    pub allowance: String,
    /// Hire date, `YYYY-MM-DD`.
    pub hire_date: String,
    /// Termination date, `YYYY-MM-DD`.
    pub termination_date: String,
    /// How the notice period is served.
    pub notice: NoticeModality,
    /// Complete vacation periods acquired but never taken.
    #[serde(default)]
    pub overdue_vacation_periods: u32,
}

impl TryFrom<ContractRequest> for ContractInputs {
    type Error = EngineError;

    fn try_from(req: ContractRequest) -> EngineResult<Self> {
        Ok(ContractInputs {
            base_salary: parse_amount("base_salary", &req.base_salary)?,
            allowance: parse_amount("allowance", &req.allowance)?,
            hire_date: parse_iso_date(&req.hire_date)
                .map_err(|e| rename_field(e, "hire_date"))?,
            termination_date: parse_iso_date(&req.termination_date)
                .map_err(|e| rename_field(e, "termination_date"))?,
            notice: req.notice,
            overdue_vacation_periods: req.overdue_vacation_periods,
        })
    }
}

fn parse_amount(field: &str, raw: &str) -> EngineResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(trimmed)
        .map_err(|_| EngineError::invalid_input(field, format!("'{}' is not a number", raw)))
}

fn rename_field(error: EngineError, field: &str) -> EngineError {
    match error {
        EngineError::InvalidInput { message, .. } => EngineError::invalid_input(field, message),
        other => other,
    }
}
