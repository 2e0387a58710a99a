//! Calendar utilities.
//!
//! Dates are calendar days without a time of day. Out-of-range month and day
//! components are normalized by rolling over into neighbouring months, the
//! way form inputs and anniversary arithmetic expect: day 32 of January is
//! 1 February, month 13 is January of the following year and day 0 is the
//! last day of the previous month.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{EngineError, EngineResult};

/// Builds a date from possibly out-of-range components, rolling overflow
/// into the following (or preceding) months and years.
///
/// Returns `None` only when the result is outside the range chrono supports.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::normalized_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(normalized_date(2025, 2, 30), NaiveDate::from_ymd_opt(2025, 3, 2));
/// assert_eq!(normalized_date(2025, 13, 1), NaiveDate::from_ymd_opt(2026, 1, 1));
/// assert_eq!(normalized_date(2025, 3, 0), NaiveDate::from_ymd_opt(2025, 2, 28));
/// ```
pub fn normalized_date(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    let months = year.checked_mul(12)?.checked_add(month.checked_sub(1)?)?;
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = u32::try_from(months.rem_euclid(12) + 1).ok()?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;

    let offset = day.checked_sub(1)?;
    if offset >= 0 {
        first.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        first.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}

/// Parses a `YYYY-MM-DD` date, normalizing out-of-range components.
///
/// Input that is not three dash-separated integers, or whose normalized
/// year falls outside 0001-9999, is rejected with
/// [`EngineError::InvalidInput`].
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::parse_iso_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     parse_iso_date("2025-01-32").unwrap(),
///     NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
/// );
/// assert!(parse_iso_date("2025-01").is_err());
/// ```
pub fn parse_iso_date(s: &str) -> EngineResult<NaiveDate> {
    let invalid = |reason: &str| {
        EngineError::invalid_input("date", format!("'{}' is not a YYYY-MM-DD date: {}", s, reason))
    };

    let parts: Vec<&str> = s.trim().split('-').collect();
    if parts.len() != 3 {
        return Err(invalid("expected three dash-separated parts"));
    }

    let mut numbers = [0i64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        *slot = part
            .parse::<i64>()
            .map_err(|_| invalid("components must be integers"))?;
    }

    let [year, month, day] = numbers;
    let date = normalized_date(year, month, day).ok_or_else(|| invalid("date out of range"))?;
    if !(1..=9999).contains(&date.year()) {
        return Err(invalid("year must be between 0001 and 9999"));
    }
    Ok(date)
}

/// Shifts a date by `months` calendar months, keeping the day of month and
/// normalizing overflow (31 January plus one month is 3 March in a common
/// year).
pub fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    normalized_date(
        i64::from(date.year()),
        i64::from(date.month()).checked_add(months)?,
        i64::from(date.day()),
    )
}

/// Absolute number of whole days between two dates.
pub fn day_difference(a: NaiveDate, b: NaiveDate) -> i64 {
    a.signed_duration_since(b).num_days().abs()
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    normalized_date(i64::from(date.year()), i64::from(date.month()) + 1, 0)
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Calendar-month difference between two dates, ignoring the day of month.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::whole_months_between;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// assert_eq!(whole_months_between(start, end), 26);
/// ```
pub fn whole_months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (i64::from(end.year()) - i64::from(start.year())) * 12
        + (i64::from(end.month()) - i64::from(start.month()))
}
