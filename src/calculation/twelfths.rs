//! Shared twelfths (avos) primitives.
//!
//! Both the 13th salary and vacation accrue one twelfth per qualifying month.
//! A partial month qualifies when it covers at least fifteen days.

use chrono::NaiveDate;

use super::calendar::day_difference;

/// Minimum number of days a partial month must cover to earn a twelfth.
pub const MIN_FRAGMENT_DAYS: i64 = 15;

/// Maximum twelfths accrued in one period.
pub const MAX_TWELFTHS: u32 = 12;

/// An inclusive span of days inside a single month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthFragment {
    /// First day covered.
    pub first_day: NaiveDate,
    /// Last day covered.
    pub last_day: NaiveDate,
}

impl MonthFragment {
    /// Number of days covered, counting both ends.
    pub fn days(&self) -> i64 {
        day_difference(self.last_day, self.first_day) + 1
    }

    /// Whether the fragment earns a twelfth.
    pub fn counts(&self) -> bool {
        fragment_counts(self.days())
    }
}

/// Whether a fragment of `days` days earns a twelfth.
pub fn fragment_counts(days: i64) -> bool {
    days >= MIN_FRAGMENT_DAYS
}

/// Caps a twelfths count at twelve.
pub fn clamp_twelfths(count: u32) -> u32 {
    count.min(MAX_TWELFTHS)
}
