//! Core data models for the Settlement Engine.
//!
//! This module contains the contract inputs, the settlement record and its
//! audit trail, and the severance fund history used by overrides.

mod audit;
mod contract;
mod edit;
mod fund_history;
mod report;
pub(crate) mod settlement;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub(crate) use contract::check_amount;
pub use contract::{
    ContractInputs, ContractRequest, EXPECTED_MAX_OVERDUE_PERIODS, MAX_AMOUNT, NoticeModality,
};
pub use edit::SettlementEdit;
pub use fund_history::{FundHistory, FundOverride, FundOverrideRequest, YearMonth};
pub use report::SettlementReport;
pub use settlement::{FundSummary, SettlementCalculation, SettlementResult};
