//! Caller-held settlement worksheet.
//!
//! A [`Worksheet`] keeps the last accepted contract and its settlement so that
//! a host application can apply edits and fund overrides to it, and so that a
//! rejected recalculation does not discard the previous result.

use chrono::NaiveDate;
use tracing::warn;

use crate::calculation::{apply_fund_override, apply_settlement_edit, calculate_settlement};
use crate::config::RuleSet;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditTrace, ContractInputs, ContractRequest, FundHistory, FundOverride, FundOverrideRequest,
    SettlementCalculation, SettlementEdit, SettlementReport, SettlementResult,
};

/// What the worksheet currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorksheetStatus {
    /// Nothing has been calculated yet.
    Empty,
    /// The last calculation succeeded.
    Calculated,
    /// The last calculation was rejected; any earlier settlement is kept.
    Rejected,
}

/// A settlement session over one rule set.
///
/// # Example
///
/// ```
/// use settlement_engine::models::{ContractRequest, NoticeModality};
/// use settlement_engine::worksheet::{Worksheet, WorksheetStatus};
///
/// let mut worksheet = Worksheet::default();
/// let request = ContractRequest {
///     base_salary: "3000".to_string(),
///     allowance: String::new(),
///     hire_date: "2023-01-01".to_string(),
///     termination_date: "2025-03-15".to_string(),
///     notice: NoticeModality::Worked,
///     overdue_vacation_periods: 0,
/// };
///
/// worksheet.submit(request).unwrap();
/// assert_eq!(worksheet.status(), WorksheetStatus::Calculated);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    rules: RuleSet,
    inputs: Option<ContractInputs>,
    calculation: Option<SettlementCalculation>,
    rejection: Option<EngineError>,
}

impl Worksheet {
    /// Creates an empty worksheet over the given rule set.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            inputs: None,
            calculation: None,
            rejection: None,
        }
    }

    /// The rule set in use.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The current status.
    pub fn status(&self) -> WorksheetStatus {
        match (&self.rejection, &self.calculation) {
            (Some(_), _) => WorksheetStatus::Rejected,
            (None, Some(_)) => WorksheetStatus::Calculated,
            (None, None) => WorksheetStatus::Empty,
        }
    }

    /// Inputs of the held settlement.
    pub fn inputs(&self) -> Option<&ContractInputs> {
        self.inputs.as_ref()
    }

    /// The held settlement.
    pub fn settlement(&self) -> Option<&SettlementResult> {
        self.calculation.as_ref().map(|c| &c.settlement)
    }

    /// Audit trace of the held settlement's calculation.
    pub fn audit_trace(&self) -> Option<&AuditTrace> {
        self.calculation.as_ref().map(|c| &c.audit_trace)
    }

    /// Why the last calculation was rejected, if it was.
    pub fn rejection(&self) -> Option<&EngineError> {
        self.rejection.as_ref()
    }

    /// Calculates a settlement and holds it.
    ///
    /// On failure the error is recorded, returned, and any earlier
    /// settlement is kept.
    pub fn calculate(&mut self, inputs: ContractInputs) -> EngineResult<&SettlementResult> {
        match calculate_settlement(&inputs, &self.rules) {
            Ok(calculation) => {
                self.inputs = Some(inputs);
                self.calculation = Some(calculation);
                self.rejection = None;
                self.held_settlement()
            }
            Err(err) => {
                self.rejection = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Converts a form request and calculates it.
    pub fn submit(&mut self, request: ContractRequest) -> EngineResult<&SettlementResult> {
        match ContractInputs::try_from(request) {
            Ok(inputs) => self.calculate(inputs),
            Err(err) => {
                warn!(error = %err, "Rejected contract request");
                self.rejection = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Replaces the held settlement with an edited copy.
    pub fn apply_edit(&mut self, edit: &SettlementEdit) -> EngineResult<&SettlementResult> {
        let calculation = self.calculation.as_mut().ok_or(EngineError::NoSettlement)?;
        calculation.settlement =
            apply_settlement_edit(&calculation.settlement, edit, self.rules.fund())?;
        self.held_settlement()
    }

    /// Replaces the fund sub-record of the held settlement.
    ///
    /// A month-by-month history must list exactly the months of the held
    /// contract; any other history is rejected with
    /// [`EngineError::InvalidInput`].
    pub fn apply_fund_override(
        &mut self,
        fund_override: &FundOverride,
    ) -> EngineResult<&SettlementResult> {
        let (Some(inputs), Some(calculation)) = (self.inputs.as_ref(), self.calculation.as_mut())
        else {
            return Err(EngineError::NoSettlement);
        };

        if let FundOverride::MonthByMonth(history) = fund_override {
            if !history.covers_contract(inputs.hire_date, inputs.termination_date) {
                warn!(
                    hire_date = %inputs.hire_date,
                    termination_date = %inputs.termination_date,
                    months = history.len(),
                    "Rejected fund history for another contract"
                );
                return Err(EngineError::invalid_input(
                    "fund_history",
                    format!(
                        "months do not match the contract from {} to {}",
                        inputs.hire_date, inputs.termination_date
                    ),
                ));
            }
        }

        calculation.settlement =
            apply_fund_override(&calculation.settlement, fund_override, self.rules.fund())?;
        self.held_settlement()
    }

    /// Resolves a caller's override against the held contract and applies it.
    pub fn apply_fund_override_request(
        &mut self,
        request: FundOverrideRequest,
    ) -> EngineResult<&SettlementResult> {
        let inputs = self.inputs.as_ref().ok_or(EngineError::NoSettlement)?;
        let fund_override = request.into_override(inputs.hire_date, inputs.termination_date)?;
        self.apply_fund_override(&fund_override)
    }

    /// Lists the contract months of the held inputs, all at zero.
    pub fn fund_history(&self) -> EngineResult<FundHistory> {
        let inputs = self.inputs.as_ref().ok_or(EngineError::NoSettlement)?;
        FundHistory::for_contract(inputs.hire_date, inputs.termination_date)
    }

    /// Packages the held settlement as a report.
    pub fn report(&self, generated_on: NaiveDate) -> EngineResult<SettlementReport> {
        match (&self.inputs, &self.calculation) {
            (Some(inputs), Some(calculation)) => Ok(SettlementReport::new(
                inputs.clone(),
                calculation.settlement.clone(),
                generated_on,
            )),
            _ => Err(EngineError::NoSettlement),
        }
    }

    fn held_settlement(&self) -> EngineResult<&SettlementResult> {
        self.settlement().ok_or(EngineError::NoSettlement)
    }
}
