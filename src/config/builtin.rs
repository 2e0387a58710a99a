//! The built-in rule set, kept in sync with `config/clt-2025/`.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{
    FundRates, MinimumWageRecord, MinimumWageTable, NoticeRules, RuleSet, RuleSetMetadata,
    WithholdingBracket, WithholdingTable,
};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("built-in dates are valid")
}

/// Minimum wage history (value, in cents) from June 2000 onwards, newest first.
const MINIMUM_WAGE_HISTORY: [(i32, u32, u32, i64); 29] = [
    (2025, 1, 1, 151800),
    (2024, 1, 1, 141200),
    (2023, 5, 1, 132000),
    (2023, 1, 1, 130200),
    (2022, 1, 1, 121200),
    (2021, 1, 1, 110000),
    (2020, 2, 1, 104500),
    (2020, 1, 1, 103900),
    (2019, 1, 1, 99800),
    (2018, 1, 1, 95400),
    (2017, 1, 1, 93700),
    (2016, 1, 1, 88000),
    (2015, 1, 1, 78800),
    (2014, 1, 1, 72400),
    (2013, 1, 1, 67800),
    (2012, 1, 1, 62200),
    (2011, 3, 1, 54500),
    (2011, 1, 1, 54000),
    (2010, 1, 1, 51000),
    (2009, 2, 1, 46500),
    (2008, 3, 1, 41500),
    (2007, 4, 1, 38000),
    (2006, 4, 1, 35000),
    (2005, 5, 1, 30000),
    (2004, 5, 1, 26000),
    (2003, 6, 1, 24000),
    (2002, 6, 1, 20000),
    (2001, 6, 1, 18000),
    (2000, 6, 1, 15100),
];

/// 2025 INSS brackets as (upper bound in cents, rate in thousandths).
const WITHHOLDING_BRACKETS: [(i64, i64); 4] = [
    (151800, 75),
    (279388, 90),
    (419083, 120),
    (815741, 140),
];

pub(super) fn clt_2025() -> RuleSet {
    let metadata = RuleSetMetadata {
        code: "CLT-2025".to_string(),
        name: "CLT termination rules".to_string(),
        version: "2025-01-01".to_string(),
        effective_date: ymd(2025, 1, 1),
    };

    let minimum_wage = MINIMUM_WAGE_HISTORY
        .iter()
        .map(|&(year, month, day, cents)| MinimumWageRecord {
            effective_date: ymd(year, month, day),
            wage: Decimal::new(cents, 2),
        })
        .collect();

    let brackets = WITHHOLDING_BRACKETS
        .iter()
        .map(|&(cents, thousandths)| WithholdingBracket {
            upper_bound: Decimal::new(cents, 2),
            rate: Decimal::new(thousandths, 3),
        })
        .collect();

    RuleSet::new(
        metadata,
        MinimumWageTable::new(minimum_wage).expect("built-in minimum wage table is valid"),
        WithholdingTable::new(ymd(2025, 1, 1), brackets)
            .expect("built-in withholding table is valid"),
        NoticeRules {
            base_days: 30,
            days_per_year: 3,
            max_days: 90,
        },
        FundRates {
            contribution_rate: Decimal::new(8, 2),
            penalty_rate: Decimal::new(40, 2),
        },
    )
}
