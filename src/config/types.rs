//! Rule set types for settlement calculation.
//!
//! This module contains the strongly-typed structures that describe one
//! version of the legislative parameters: the minimum wage history, the
//! social-security withholding brackets, the notice-period rules and the
//! severance-fund rates. File structures are deserialized from YAML and
//! validated into the table types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata identifying a rule set version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetMetadata {
    /// Short code for the rule set (e.g., "CLT-2025").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Version label.
    pub version: String,
    /// The date from which these parameters apply.
    pub effective_date: NaiveDate,
}

/// A minimum wage value and the date it came into force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumWageRecord {
    /// The first day this wage applies.
    pub effective_date: NaiveDate,
    /// The monthly minimum wage.
    pub wage: Decimal,
}

/// Minimum wage file structure (`minimum_wage.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct MinimumWageConfig {
    /// The wage records, in any order.
    pub records: Vec<MinimumWageRecord>,
}

/// Minimum wage history, kept newest first.
///
/// The table is never empty, which makes lookups total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinimumWageTable {
    records: Vec<MinimumWageRecord>,
}

impl MinimumWageTable {
    /// Builds a table from records in any order.
    ///
    /// Fails with [`EngineError::InvalidConfig`] when the table is empty, a
    /// wage is negative, or two records share an effective date.
    pub fn new(mut records: Vec<MinimumWageRecord>) -> EngineResult<Self> {
        if records.is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "minimum wage table is empty".to_string(),
            });
        }
        if let Some(record) = records.iter().find(|r| r.wage < Decimal::ZERO) {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "negative minimum wage {} effective {}",
                    record.wage, record.effective_date
                ),
            });
        }

        records.sort_by(|a, b| b.effective_date.cmp(&a.effective_date));
        if let Some(pair) = records
            .windows(2)
            .find(|w| w[0].effective_date == w[1].effective_date)
        {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "duplicate minimum wage record for {}",
                    pair[0].effective_date
                ),
            });
        }

        Ok(Self { records })
    }

    /// Returns the records, newest first.
    pub fn records(&self) -> &[MinimumWageRecord] {
        &self.records
    }

    /// Returns the oldest tabulated wage.
    pub fn oldest_wage(&self) -> Decimal {
        self.records.last().map(|r| r.wage).unwrap_or(Decimal::ZERO)
    }
}

/// A single marginal bracket of the withholding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingBracket {
    /// Upper bound of the bracket (inclusive).
    pub upper_bound: Decimal,
    /// Marginal rate applied to the slice of base inside the bracket.
    pub rate: Decimal,
}

/// Withholding file structure (`withholding.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct WithholdingConfig {
    /// The date from which these brackets apply.
    pub effective_date: NaiveDate,
    /// Brackets in ascending order of upper bound.
    pub brackets: Vec<WithholdingBracket>,
}

/// Progressive social-security withholding table (INSS).
///
/// The upper bound of the last bracket is the contribution ceiling: bases
/// above it are treated as if capped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithholdingTable {
    effective_date: NaiveDate,
    brackets: Vec<WithholdingBracket>,
}

impl WithholdingTable {
    /// Builds a table, checking that brackets are non-empty, strictly
    /// ascending and carry rates between 0 and 1.
    pub fn new(effective_date: NaiveDate, brackets: Vec<WithholdingBracket>) -> EngineResult<Self> {
        if brackets.is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "withholding table has no brackets".to_string(),
            });
        }

        let mut lower = Decimal::ZERO;
        for bracket in &brackets {
            if bracket.upper_bound <= lower {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "withholding bracket upper bound {} is not above {}",
                        bracket.upper_bound, lower
                    ),
                });
            }
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(EngineError::InvalidConfig {
                    message: format!("withholding rate {} is outside [0, 1]", bracket.rate),
                });
            }
            lower = bracket.upper_bound;
        }

        Ok(Self {
            effective_date,
            brackets,
        })
    }

    /// The date from which these brackets apply.
    pub fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }

    /// Brackets in ascending order.
    pub fn brackets(&self) -> &[WithholdingBracket] {
        &self.brackets
    }

    /// The contribution ceiling (upper bound of the last bracket).
    pub fn ceiling(&self) -> Decimal {
        self.brackets
            .last()
            .map(|b| b.upper_bound)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Notice period (aviso prévio) length rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeRules {
    /// Days of notice owed regardless of tenure; also the worked portion.
    pub base_days: u32,
    /// Extra days per complete year of service.
    pub days_per_year: u32,
    /// Maximum notice length.
    pub max_days: u32,
}

/// Severance fund (FGTS) rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundRates {
    /// Monthly deposit rate over remuneration.
    pub contribution_rate: Decimal,
    /// Dismissal penalty rate over the balance.
    pub penalty_rate: Decimal,
}

/// Rule set file structure (`ruleset.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSetConfig {
    /// Rule set metadata.
    pub metadata: RuleSetMetadata,
    /// Notice period rules.
    pub notice: NoticeRules,
    /// Severance fund rates.
    pub fund: FundRates,
}

/// A complete, validated version of the legislative parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    metadata: RuleSetMetadata,
    minimum_wage: MinimumWageTable,
    withholding: WithholdingTable,
    notice: NoticeRules,
    fund: FundRates,
}

impl RuleSet {
    /// Creates a rule set from its component parts.
    pub fn new(
        metadata: RuleSetMetadata,
        minimum_wage: MinimumWageTable,
        withholding: WithholdingTable,
        notice: NoticeRules,
        fund: FundRates,
    ) -> Self {
        Self {
            metadata,
            minimum_wage,
            withholding,
            notice,
            fund,
        }
    }

    /// Returns the rule set metadata.
    pub fn metadata(&self) -> &RuleSetMetadata {
        &self.metadata
    }

    /// Returns the minimum wage history.
    pub fn minimum_wage(&self) -> &MinimumWageTable {
        &self.minimum_wage
    }

    /// Returns the withholding table.
    pub fn withholding(&self) -> &WithholdingTable {
        &self.withholding
    }

    /// Returns the notice period rules.
    pub fn notice(&self) -> &NoticeRules {
        &self.notice
    }

    /// Returns the severance fund rates.
    pub fn fund(&self) -> &FundRates {
        &self.fund
    }
}

impl Default for RuleSet {
    /// The built-in 2025 rule set.
    fn default() -> Self {
        super::builtin::clt_2025()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(date: &str, wage: &str) -> MinimumWageRecord {
        MinimumWageRecord {
            effective_date: NaiveDate::from_str(date).unwrap(),
            wage: dec(wage),
        }
    }

    #[test]
    fn test_minimum_wage_table_sorts_newest_first() {
        let table = MinimumWageTable::new(vec![
            record("2023-01-01", "1302.00"),
            record("2025-01-01", "1518.00"),
            record("2024-01-01", "1412.00"),
        ])
        .unwrap();

        let dates: Vec<String> = table
            .records()
            .iter()
            .map(|r| r.effective_date.to_string())
            .collect();
        assert_eq!(dates, vec!["2025-01-01", "2024-01-01", "2023-01-01"]);
        assert_eq!(table.oldest_wage(), dec("1302.00"));
    }

    #[test]
    fn test_minimum_wage_table_rejects_empty() {
        let result = MinimumWageTable::new(vec![]);
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_minimum_wage_table_rejects_duplicate_dates() {
        let result = MinimumWageTable::new(vec![
            record("2024-01-01", "1412.00"),
            record("2024-01-01", "1400.00"),
        ]);
        match result {
            Err(EngineError::InvalidConfig { message }) => {
                assert!(message.contains("2024-01-01"));
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_minimum_wage_table_rejects_negative_wage() {
        let result = MinimumWageTable::new(vec![record("2024-01-01", "-1")]);
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_withholding_table_ceiling_is_last_upper_bound() {
        let table = WithholdingTable::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            vec![
                WithholdingBracket {
                    upper_bound: dec("1000"),
                    rate: dec("0.1"),
                },
                WithholdingBracket {
                    upper_bound: dec("2000"),
                    rate: dec("0.2"),
                },
            ],
        )
        .unwrap();
        assert_eq!(table.ceiling(), dec("2000"));
    }

    #[test]
    fn test_withholding_table_rejects_unordered_brackets() {
        let result = WithholdingTable::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            vec![
                WithholdingBracket {
                    upper_bound: dec("2000"),
                    rate: dec("0.1"),
                },
                WithholdingBracket {
                    upper_bound: dec("1000"),
                    rate: dec("0.2"),
                },
            ],
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_withholding_table_rejects_rate_above_one() {
        let result = WithholdingTable::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            vec![WithholdingBracket {
                upper_bound: dec("1000"),
                rate: dec("1.5"),
            }],
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_default_rule_set_is_clt_2025() {
        let rules = RuleSet::default();
        assert_eq!(rules.metadata().code, "CLT-2025");
        assert_eq!(rules.withholding().ceiling(), dec("8157.41"));
        assert_eq!(rules.notice().max_days, 90);
        assert_eq!(rules.fund().penalty_rate, dec("0.40"));
    }
}
