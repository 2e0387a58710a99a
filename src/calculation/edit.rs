//! Manual settlement edits.

use tracing::{info, warn};

use crate::config::FundRates;
use crate::error::EngineResult;
use crate::models::{FundSummary, SettlementEdit, SettlementResult, check_amount};

/// Applies manual replacements to a settlement.
///
/// Supplied lines replace the current ones; everything else is kept. A new
/// fund balance re-derives the penalty at the configured rate unless a
/// penalty is supplied as well. Fund total, net settlement and combined
/// payout are always recomputed. Withholding and fund deposits are not
/// re-derived from edited lines.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput)
/// naming the first amount that is negative or above
/// [`MAX_AMOUNT`](crate::models::MAX_AMOUNT).
pub fn apply_settlement_edit(
    settlement: &SettlementResult,
    edit: &SettlementEdit,
    rates: &FundRates,
) -> EngineResult<SettlementResult> {
    for (field, value) in edit.supplied_fields() {
        if let Err(err) = check_amount(field, value) {
            warn!(field, value = %value, "Rejected settlement edit");
            return Err(err);
        }
    }

    let mut edited = settlement.clone();
    let lines = [
        (&mut edited.salary_balance, edit.salary_balance),
        (&mut edited.notice_pay, edit.notice_pay),
        (&mut edited.thirteenth_proportional, edit.thirteenth_proportional),
        (&mut edited.thirteenth_indemnified, edit.thirteenth_indemnified),
        (&mut edited.overdue_vacation, edit.overdue_vacation),
        (&mut edited.overdue_vacation_bonus, edit.overdue_vacation_bonus),
        (&mut edited.proportional_vacation, edit.proportional_vacation),
        (&mut edited.proportional_vacation_bonus, edit.proportional_vacation_bonus),
        (&mut edited.indemnified_vacation, edit.indemnified_vacation),
        (&mut edited.indemnified_vacation_bonus, edit.indemnified_vacation_bonus),
        (&mut edited.social_security_withholding, edit.social_security_withholding),
    ];
    for (line, replacement) in lines {
        if let Some(value) = replacement {
            *line = value;
        }
    }

    let balance = edit.fund_balance.unwrap_or(settlement.fund.balance);
    let penalty = match (edit.fund_penalty, edit.fund_balance) {
        (Some(penalty), _) => penalty,
        (None, Some(balance)) => balance * rates.penalty_rate,
        (None, None) => settlement.fund.penalty,
    };
    edited.fund = FundSummary::new(balance, penalty);

    let edited = edited.with_recomputed_totals();
    info!(
        fields = edit.supplied_fields().len(),
        net_settlement = %edited.net_settlement,
        combined_payout = %edited.combined_payout,
        "Settlement edit applied"
    );
    Ok(edited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::settlement::fixtures::{dec, sample_settlement};

    fn rates() -> FundRates {
        FundRates {
            contribution_rate: dec("0.08"),
            penalty_rate: dec("0.40"),
        }
    }

    #[test]
    fn test_empty_edit_keeps_settlement() {
        let settlement = sample_settlement();
        let edited =
            apply_settlement_edit(&settlement, &SettlementEdit::default(), &rates()).unwrap();
        assert_eq!(edited, settlement);
    }

    #[test]
    fn test_edited_line_updates_net_and_combined() {
        let settlement = sample_settlement();
        let edit = SettlementEdit {
            notice_pay: Some(dec("1000")),
            ..Default::default()
        };

        let edited = apply_settlement_edit(&settlement, &edit, &rates()).unwrap();
        assert_eq!(edited.notice_pay, dec("1000"));
        assert_eq!(edited.net_settlement, dec("4070.27"));
        assert_eq!(edited.combined_payout, dec("5470.27"));
    }

    #[test]
    fn test_edited_withholding_reduces_net() {
        let settlement = sample_settlement();
        let edit = SettlementEdit {
            social_security_withholding: Some(dec("200")),
            ..Default::default()
        };

        let edited = apply_settlement_edit(&settlement, &edit, &rates()).unwrap();
        assert_eq!(edited.net_settlement, dec("3800"));
        // Base is informational and not re-derived
        assert_eq!(edited.social_security_base, settlement.social_security_base);
    }

    #[test]
    fn test_fund_balance_rederives_penalty() {
        let settlement = sample_settlement();
        let edit = SettlementEdit {
            fund_balance: Some(dec("2000")),
            ..Default::default()
        };

        let edited = apply_settlement_edit(&settlement, &edit, &rates()).unwrap();
        assert_eq!(edited.fund.balance, dec("2000"));
        assert_eq!(edited.fund.penalty, dec("800"));
        assert_eq!(edited.fund.total, dec("2800"));
    }

    #[test]
    fn test_explicit_penalty_wins_over_rederivation() {
        let settlement = sample_settlement();
        let edit = SettlementEdit {
            fund_balance: Some(dec("2000")),
            fund_penalty: Some(dec("100")),
            ..Default::default()
        };

        let edited = apply_settlement_edit(&settlement, &edit, &rates()).unwrap();
        assert_eq!(edited.fund.penalty, dec("100"));
        assert_eq!(edited.fund.total, dec("2100"));
    }

    #[test]
    fn test_penalty_only_edit_keeps_balance() {
        let settlement = sample_settlement();
        let edit = SettlementEdit {
            fund_penalty: Some(dec("0")),
            ..Default::default()
        };

        let edited = apply_settlement_edit(&settlement, &edit, &rates()).unwrap();
        assert_eq!(edited.fund.balance, settlement.fund.balance);
        assert_eq!(edited.fund.total, settlement.fund.balance);
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let settlement = sample_settlement();
        let edit = SettlementEdit {
            proportional_vacation_bonus: Some(dec("-1")),
            ..Default::default()
        };

        match apply_settlement_edit(&settlement, &edit, &rates()) {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "proportional_vacation_bonus")
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_amount_above_cap_is_rejected() {
        let settlement = sample_settlement();
        let edit = SettlementEdit {
            notice_pay: Some(dec("79228162514264337593543950335")),
            ..Default::default()
        };

        match apply_settlement_edit(&settlement, &edit, &rates()) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "notice_pay"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }
}
