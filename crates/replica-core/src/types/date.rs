//! Date type for return series.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ReplicaError, ReplicaResult};

/// A trading date.
///
/// This is a newtype wrapper around `chrono::NaiveDate`. Dates order
/// chronologically, which is what every series and table in the crate
/// relies on.
///
/// # Example
///
/// ```rust
/// use replica_core::types::Date;
///
/// let date = Date::parse("2025-03-24").unwrap();
/// assert_eq!(date.add_days(1).to_string(), "2025-03-25");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `ReplicaError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> ReplicaResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| ReplicaError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `ReplicaError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> ReplicaResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| ReplicaError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns today's date.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Calculates the number of calendar days between two dates.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = ReplicaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ymd() {
        let date = Date::from_ymd(2024, 3, 25).unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 3);
        assert_eq!(date.day(), 25);

        assert!(Date::from_ymd(2024, 2, 30).is_err());
    }

    #[test]
    fn test_parse_and_display() {
        let date = Date::parse("2025-01-02").unwrap();
        assert_eq!(date.to_string(), "2025-01-02");
        assert_eq!("2025-01-02".parse::<Date>().unwrap(), date);
        assert!(Date::parse("01/02/2025").is_err());
    }

    #[test]
    fn test_days_between() {
        let a = Date::from_ymd(2024, 12, 30).unwrap();
        let b = a.add_days(3);
        assert_eq!(b.to_string(), "2025-01-02");
        assert_eq!(a.days_between(&b), 3);
        assert_eq!(b.days_between(&a), -3);
    }

    #[test]
    fn test_ordering() {
        let a = Date::from_ymd(2024, 1, 1).unwrap();
        let b = Date::from_ymd(2024, 1, 2).unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_serde_transparent() {
        let date = Date::from_ymd(2024, 6, 3).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2024-06-03\"");
        let back: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
    }
}
