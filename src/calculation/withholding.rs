//! Progressive social-security withholding (INSS).
//!
//! The base is capped at the contribution ceiling and split across the
//! brackets of a [`WithholdingTable`]; each slice is taxed at its own rate and
//! the sum is rounded to cents.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::WithholdingTable;
use crate::models::AuditStep;

/// Legal reference for the progressive withholding table.
pub const WITHHOLDING_LEGAL_REF: &str = "Lei 8.212/1991 art. 28; EC 103/2019 art. 28";

/// The result of a withholding calculation.
#[derive(Debug, Clone)]
pub struct WithholdingResult {
    /// Withholding, rounded to cents.
    pub amount: Decimal,
    /// The base after applying the contribution ceiling.
    pub capped_base: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the withholding over `base` without recording an audit step.
///
/// Zero and negative bases yield zero. The function is monotone in `base`
/// and continuous at every bracket boundary.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::withholding;
/// use settlement_engine::config::RuleSet;
/// use rust_decimal::Decimal;
///
/// let rules = RuleSet::default();
/// assert_eq!(withholding(Decimal::new(2000, 0), rules.withholding()), Decimal::new(15723, 2));
/// assert_eq!(withholding(Decimal::ZERO, rules.withholding()), Decimal::ZERO);
/// ```
pub fn withholding(base: Decimal, table: &WithholdingTable) -> Decimal {
    if base <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let capped = base.min(table.ceiling());
    let mut lower = Decimal::ZERO;
    let mut total = Decimal::ZERO;

    for bracket in table.brackets() {
        let slice = capped.min(bracket.upper_bound) - lower;
        if slice <= Decimal::ZERO {
            break;
        }
        total += slice * bracket.rate;
        lower = bracket.upper_bound;
    }

    total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the withholding over `base` and records it as an audit step.
///
/// # Arguments
///
/// * `base` - Salary balance plus proportional 13th salary
/// * `table` - The withholding brackets in force
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_withholding(
    base: Decimal,
    table: &WithholdingTable,
    step_number: u32,
) -> WithholdingResult {
    let capped_base = base.max(Decimal::ZERO).min(table.ceiling());
    let amount = withholding(base, table);

    let reasoning = if base <= Decimal::ZERO {
        "No withholding on a zero base".to_string()
    } else if base > table.ceiling() {
        format!(
            "Base R${} capped at ceiling R${}; progressive brackets give R${}",
            base.normalize(),
            table.ceiling().normalize(),
            amount
        )
    } else {
        format!(
            "Progressive brackets over R${} give R${}",
            base.normalize(),
            amount
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "social_security_withholding".to_string(),
        rule_name: "Social Security Withholding".to_string(),
        legal_ref: WITHHOLDING_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "base": base.normalize().to_string(),
            "ceiling": table.ceiling().normalize().to_string(),
            "table_effective_date": table.effective_date().to_string()
        }),
        output: serde_json::json!({
            "capped_base": capped_base.normalize().to_string(),
            "withholding": amount.to_string()
        }),
        reasoning,
    };

    WithholdingResult {
        amount,
        capped_base,
        audit_step,
    }
}
