//! Severance fund history models.
//!
//! A [`FundHistory`] lists the monthly remuneration for every month of the
//! contract before the termination month. It backs the month-by-month
//! [`FundOverride`], which replaces the automatic fund estimate.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::calculation::minimum_wage_on;
use crate::config::MinimumWageTable;
use crate::error::{EngineError, EngineResult};
use crate::models::check_amount;

/// A calendar month, written `YYYY-MM`.
///
/// # Example
///
/// ```
/// use settlement_engine::models::YearMonth;
///
/// let month: YearMonth = "2024-12".parse().unwrap();
/// assert_eq!(month.next().to_string(), "2025-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a month, rejecting month numbers outside 1..=12.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::invalid_input(
                "month",
                format!("month {} is outside 1-12", month),
            ));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month number, 1-based.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following month.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The first day of the month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let invalid = || EngineError::invalid_input("month", format!("'{}' is not YYYY-MM", s));

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Monthly remuneration for each month of the contract before termination.
///
/// Every month from the hire month up to, but not including, the termination
/// month is present; months nobody filled in count as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundHistory {
    salaries: BTreeMap<YearMonth, Decimal>,
}

impl FundHistory {
    /// Lists the contract months with a zero salary each.
    ///
    /// # Example
    ///
    /// ```
    /// use settlement_engine::models::FundHistory;
    /// use chrono::NaiveDate;
    ///
    /// let history = FundHistory::for_contract(
    ///     NaiveDate::from_ymd_opt(2024, 11, 20).unwrap(),
    ///     NaiveDate::from_ymd_opt(2025, 2, 5).unwrap(),
    /// )
    /// .unwrap();
    /// let months: Vec<String> = history.months().map(|m| m.to_string()).collect();
    /// assert_eq!(months, vec!["2024-11", "2024-12", "2025-01"]);
    /// ```
    pub fn for_contract(hire_date: NaiveDate, termination_date: NaiveDate) -> EngineResult<Self> {
        if termination_date < hire_date {
            return Err(EngineError::InvalidDateRange {
                hire_date,
                termination_date,
            });
        }

        let end = YearMonth::of(termination_date);
        let mut salaries = BTreeMap::new();
        let mut month = YearMonth::of(hire_date);
        while month < end {
            salaries.insert(month, Decimal::ZERO);
            month = month.next();
        }
        Ok(Self { salaries })
    }

    /// Builds a history from caller-supplied entries.
    ///
    /// Entries outside the contract months or with negative salaries are
    /// rejected with [`EngineError::InvalidInput`].
    pub fn from_entries(
        hire_date: NaiveDate,
        termination_date: NaiveDate,
        entries: BTreeMap<YearMonth, Decimal>,
    ) -> EngineResult<Self> {
        let mut history = Self::for_contract(hire_date, termination_date)?;
        for (month, salary) in entries {
            history.set_salary(month, salary)?;
        }
        Ok(history)
    }

    /// Iterates over the contract months in order.
    pub fn months(&self) -> impl Iterator<Item = YearMonth> + '_ {
        self.salaries.keys().copied()
    }

    /// Iterates over months and their salaries in order.
    pub fn entries(&self) -> impl Iterator<Item = (YearMonth, Decimal)> + '_ {
        self.salaries.iter().map(|(m, s)| (*m, *s))
    }

    /// Number of months in the history.
    pub fn len(&self) -> usize {
        self.salaries.len()
    }

    /// True when hire and termination fall in the same month.
    pub fn is_empty(&self) -> bool {
        self.salaries.is_empty()
    }

    /// The salary recorded for a month.
    pub fn salary(&self, month: YearMonth) -> Option<Decimal> {
        self.salaries.get(&month).copied()
    }

    /// Overrides the salary for one month.
    ///
    /// Fails with [`EngineError::InvalidInput`] for months outside the
    /// history and for amounts that are negative or above
    /// [`MAX_AMOUNT`](crate::models::MAX_AMOUNT).
    pub fn set_salary(&mut self, month: YearMonth, salary: Decimal) -> EngineResult<()> {
        check_amount(&month.to_string(), salary)?;
        match self.salaries.get_mut(&month) {
            Some(slot) => {
                *slot = salary;
                Ok(())
            }
            None => Err(EngineError::invalid_input(
                month.to_string(),
                "month is outside the contract period before termination",
            )),
        }
    }

    /// True when the history lists exactly the months of the given contract.
    pub fn covers_contract(&self, hire_date: NaiveDate, termination_date: NaiveDate) -> bool {
        match Self::for_contract(hire_date, termination_date) {
            Ok(expected) => self.months().eq(expected.months()),
            Err(_) => false,
        }
    }

    /// Sets every month to the minimum wage in force on its first day.
    pub fn fill_with_minimum_wage(&mut self, table: &MinimumWageTable) {
        for (month, salary) in self.salaries.iter_mut() {
            *salary = match month.first_day() {
                Some(day) => minimum_wage_on(table, day),
                None => table.oldest_wage(),
            };
        }
    }

    /// Sum of the monthly deposits at `contribution_rate`.
    pub fn total_deposits(&self, contribution_rate: Decimal) -> Decimal {
        self.salaries
            .values()
            .map(|salary| *salary * contribution_rate)
            .sum()
    }
}

impl Serialize for FundHistory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.salaries.serialize(serializer)
    }
}

/// Replacement strategy for the automatic fund estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FundOverride {
    /// A declared balance for the account before this termination's deposit.
    ManualBalance(Decimal),
    /// Historical monthly salaries from which deposits are derived.
    MonthByMonth(FundHistory),
}

/// A fund override as received from a caller, before it is checked against
/// the contract.
///
/// ```
/// use settlement_engine::models::FundOverrideRequest;
///
/// let request: FundOverrideRequest =
///     serde_json::from_str(r#"{ "month_by_month": { "2024-11": "2000" } }"#).unwrap();
/// assert!(matches!(request, FundOverrideRequest::MonthByMonth(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundOverrideRequest {
    /// A declared balance before this termination's deposit.
    ManualBalance(Decimal),
    /// Salaries keyed by `YYYY-MM`; months left out count as zero.
    MonthByMonth(BTreeMap<YearMonth, Decimal>),
}

impl FundOverrideRequest {
    /// Resolves the request against the contract dates.
    ///
    /// Month entries go through [`FundHistory::from_entries`], so months
    /// outside the contract and invalid amounts are rejected here.
    pub fn into_override(
        self,
        hire_date: NaiveDate,
        termination_date: NaiveDate,
    ) -> EngineResult<FundOverride> {
        match self {
            FundOverrideRequest::ManualBalance(balance) => Ok(FundOverride::ManualBalance(balance)),
            FundOverrideRequest::MonthByMonth(entries) => {
                FundHistory::from_entries(hire_date, termination_date, entries)
                    .map(FundOverride::MonthByMonth)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleSet;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    #[test]
    fn test_year_month_parse_and_display() {
        assert_eq!(ym("2025-03").to_string(), "2025-03");
        assert_eq!(ym("2025-3").to_string(), "2025-03");
        assert!("2025-13".parse::<YearMonth>().is_err());
        assert!("2025".parse::<YearMonth>().is_err());
        assert!("abcd-01".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_year_month_ordering_and_next() {
        assert!(ym("2024-12") < ym("2025-01"));
        assert_eq!(ym("2024-12").next(), ym("2025-01"));
        assert_eq!(ym("2025-01").next(), ym("2025-02"));
    }

    #[test]
    fn test_history_excludes_termination_month() {
        let history = FundHistory::for_contract(date(2024, 10, 15), date(2025, 2, 20)).unwrap();

        let months: Vec<String> = history.months().map(|m| m.to_string()).collect();
        assert_eq!(months, vec!["2024-10", "2024-11", "2024-12", "2025-01"]);
        assert!(history.entries().all(|(_, s)| s == Decimal::ZERO));
    }

    #[test]
    fn test_history_is_empty_within_hire_month() {
        let history = FundHistory::for_contract(date(2025, 2, 3), date(2025, 2, 20)).unwrap();
        assert!(history.is_empty());
        assert_eq!(history.total_deposits(dec("0.08")), Decimal::ZERO);
    }

    #[test]
    fn test_history_rejects_reversed_dates() {
        let result = FundHistory::for_contract(date(2025, 2, 20), date(2025, 2, 3));
        assert!(matches!(result, Err(EngineError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_fill_with_minimum_wage_uses_first_day_of_month() {
        let mut history =
            FundHistory::for_contract(date(2024, 10, 15), date(2025, 2, 20)).unwrap();
        history.fill_with_minimum_wage(RuleSet::default().minimum_wage());

        assert_eq!(history.salary(ym("2024-10")), Some(dec("1412.00")));
        assert_eq!(history.salary(ym("2024-12")), Some(dec("1412.00")));
        assert_eq!(history.salary(ym("2025-01")), Some(dec("1518.00")));
        assert_eq!(history.total_deposits(dec("0.08")), dec("460.32"));
    }

    #[test]
    fn test_set_salary_overrides_filled_month() {
        let mut history =
            FundHistory::for_contract(date(2024, 10, 15), date(2025, 2, 20)).unwrap();
        history.fill_with_minimum_wage(RuleSet::default().minimum_wage());
        history.set_salary(ym("2025-01"), dec("3000")).unwrap();

        assert_eq!(history.salary(ym("2025-01")), Some(dec("3000")));
        assert_eq!(history.salary(ym("2024-11")), Some(dec("1412.00")));
    }

    #[test]
    fn test_set_salary_rejects_termination_month() {
        let mut history =
            FundHistory::for_contract(date(2024, 10, 15), date(2025, 2, 20)).unwrap();

        match history.set_salary(ym("2025-02"), dec("3000")) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "2025-02"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_set_salary_rejects_negative_amount() {
        let mut history =
            FundHistory::for_contract(date(2024, 10, 15), date(2025, 2, 20)).unwrap();
        assert!(history.set_salary(ym("2024-10"), dec("-5")).is_err());
    }

    #[test]
    fn test_set_salary_rejects_amount_above_cap() {
        let mut history =
            FundHistory::for_contract(date(2024, 10, 15), date(2025, 2, 20)).unwrap();

        match history.set_salary(ym("2024-10"), dec("79228162514264337593543950335")) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "2024-10"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_covers_contract_matches_month_range() {
        let history = FundHistory::for_contract(date(2024, 10, 15), date(2025, 2, 20)).unwrap();

        assert!(history.covers_contract(date(2024, 10, 1), date(2025, 2, 28)));
        assert!(!history.covers_contract(date(2024, 11, 1), date(2025, 2, 20)));
        assert!(!history.covers_contract(date(2024, 10, 15), date(2025, 3, 1)));
        assert!(!history.covers_contract(date(2025, 2, 20), date(2024, 10, 15)));
    }

    #[test]
    fn test_override_request_resolves_month_entries() {
        let request: FundOverrideRequest =
            serde_json::from_str(r#"{ "month_by_month": { "2024-11": "2000" } }"#).unwrap();

        match request.into_override(date(2024, 10, 15), date(2025, 2, 20)).unwrap() {
            FundOverride::MonthByMonth(history) => {
                assert_eq!(history.len(), 4);
                assert_eq!(history.salary(ym("2024-11")), Some(dec("2000")));
                assert_eq!(history.salary(ym("2024-12")), Some(Decimal::ZERO));
            }
            other => panic!("Expected MonthByMonth, got {:?}", other),
        }
    }

    #[test]
    fn test_override_request_rejects_month_outside_contract() {
        let request: FundOverrideRequest =
            serde_json::from_str(r#"{ "month_by_month": { "2012-01": "2000" } }"#).unwrap();

        match request.into_override(date(2024, 10, 15), date(2025, 2, 20)) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "2012-01"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_override_request_manual_balance() {
        let request: FundOverrideRequest =
            serde_json::from_str(r#"{ "manual_balance": "5000" }"#).unwrap();

        assert_eq!(
            request.into_override(date(2024, 10, 15), date(2025, 2, 20)).unwrap(),
            FundOverride::ManualBalance(dec("5000"))
        );
    }

    #[test]
    fn test_from_entries_keeps_missing_months_at_zero() {
        let mut entries = BTreeMap::new();
        entries.insert(ym("2024-11"), dec("2000"));

        let history =
            FundHistory::from_entries(date(2024, 10, 15), date(2025, 2, 20), entries).unwrap();
        assert_eq!(history.salary(ym("2024-10")), Some(Decimal::ZERO));
        assert_eq!(history.total_deposits(dec("0.08")), dec("160"));
    }

    #[test]
    fn test_history_serializes_as_month_map() {
        let mut history = FundHistory::for_contract(date(2024, 12, 1), date(2025, 1, 10)).unwrap();
        history.set_salary(ym("2024-12"), dec("1412.00")).unwrap();

        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json, serde_json::json!({ "2024-12": "1412.00" }));
    }

    #[test]
    fn test_entries_deserialize_from_month_map() {
        let entries: BTreeMap<YearMonth, Decimal> =
            serde_json::from_str(r#"{ "2024-12": "1412.00", "2024-11": 1400 }"#).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[&ym("2024-11")], dec("1400"));
    }
}
