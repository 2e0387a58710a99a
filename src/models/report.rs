//! Settlement report envelope.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ContractInputs, SettlementResult};

/// A settlement packaged for printing or archiving by the host application.
///
/// The report carries its own identifier so that printed copies can be
/// matched back to the inputs that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// The date the report was generated.
    pub generated_on: NaiveDate,
    /// Version of the engine that produced the settlement.
    pub engine_version: String,
    /// The contract the settlement was computed for.
    pub inputs: ContractInputs,
    /// The settlement lines.
    pub settlement: SettlementResult,
}

impl SettlementReport {
    /// Wraps a settlement with a fresh report id.
    pub fn new(inputs: ContractInputs, settlement: SettlementResult, generated_on: NaiveDate) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            generated_on,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            inputs,
            settlement,
        }
    }
}
