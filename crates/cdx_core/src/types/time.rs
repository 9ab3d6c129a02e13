//! Time types and day count conventions for financial calculations.
//!
//! This module provides:
//! - `Date`: type-safe date wrapper around chrono::NaiveDate
//! - `DayCount`: the day count conventions used by the valuation engine
//!
//! # Examples
//!
//! ```
//! use cdx_core::types::time::{Date, DayCount};
//!
//! let start = Date::from_ymd(2005, 3, 10).unwrap();
//! let end = Date::from_ymd(2005, 9, 10).unwrap();
//!
//! // Actual/365 Fixed is the engine-wide accrual convention.
//! let yf = DayCount::Act365F.year_fraction(start, end);
//! assert!((yf - 184.0 / 365.0).abs() < 1e-12);
//! ```

use chrono::{Datelike, Months, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 parsing/formatting, day differences, and calendar-month
/// arithmetic. All schedule and curve indices in the workspace are built
/// from this type.
///
/// # Examples
///
/// ```
/// use cdx_core::types::time::Date;
///
/// let date = Date::from_ymd(2005, 3, 10).unwrap();
/// assert_eq!(date.year(), 2005);
///
/// let parsed: Date = "2005-03-10".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// // Day difference
/// let later = Date::from_ymd(2005, 3, 20).unwrap();
/// assert_eq!(later - date, 10);
///
/// // Calendar-month stepping (clamps to month end)
/// let jan31 = Date::from_ymd(2005, 1, 31).unwrap();
/// assert_eq!(jan31.add_months(1).unwrap().to_string(), "2005-02-28");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdx_core::types::time::Date;
    ///
    /// let date = Date::from_ymd(2024, 2, 29).unwrap(); // leap day
    /// assert_eq!(date.day(), 29);
    ///
    /// assert!(Date::from_ymd(2023, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format (YYYY-MM-DD).
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Returns the date shifted forward by whole calendar months.
    ///
    /// Day-of-month is clamped to the target month's last day, matching
    /// chrono's `checked_add_months` semantics.
    pub fn add_months(self, months: u32) -> Result<Self, DateError> {
        self.0
            .checked_add_months(Months::new(months))
            .map(Date)
            .ok_or_else(|| DateError::ParseError(format!("date overflow adding {months} months")))
    }

    /// Returns the date shifted forward by whole days.
    pub fn add_days(self, days: u64) -> Result<Self, DateError> {
        self.0
            .checked_add_days(chrono::Days::new(days))
            .map(Date)
            .ok_or_else(|| DateError::ParseError(format!("date overflow adding {days} days")))
    }

    /// Returns the underlying NaiveDate for access to chrono's full API.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    ///
    /// Positive if `self` is after `other`, negative otherwise.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Day count convention (year fraction convention).
///
/// The valuation engine accrues on Actual/365 Fixed throughout; Act/360 is
/// provided for money-market style inputs.
///
/// # Examples
///
/// ```
/// use cdx_core::types::time::{Date, DayCount};
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 7, 1).unwrap();
///
/// let yf = DayCount::Act365F.year_fraction(start, end);
/// assert!((yf - 182.0 / 365.0).abs() < 1e-12);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayCount {
    /// Actual/365 Fixed: actual_days / 365.0
    Act365F,

    /// Actual/360: actual_days / 360.0
    Act360,
}

impl DayCount {
    /// Returns the standard convention name.
    pub fn name(&self) -> &'static str {
        match self {
            DayCount::Act365F => "ACT/365F",
            DayCount::Act360 => "ACT/360",
        }
    }

    /// Calculates the year fraction between two dates.
    ///
    /// Negative when `start > end`; the sign indicates direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdx_core::types::time::{Date, DayCount};
    ///
    /// let start = Date::from_ymd(2024, 1, 1).unwrap();
    /// let end = Date::from_ymd(2024, 1, 11).unwrap();
    ///
    /// assert!((DayCount::Act365F.year_fraction(start, end) - 10.0 / 365.0).abs() < 1e-12);
    /// assert!(DayCount::Act365F.year_fraction(end, start) < 0.0);
    /// ```
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        let days = end - start;
        match self {
            DayCount::Act365F => days as f64 / 365.0,
            DayCount::Act360 => days as f64 / 360.0,
        }
    }
}

impl FromStr for DayCount {
    type Err = String;

    /// Parses a day count convention from string (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(['/', ' '], "").as_str() {
            "ACT365F" | "ACT365" | "ACTUAL365" | "A365" => Ok(DayCount::Act365F),
            "ACT360" | "ACTUAL360" | "A360" => Ok(DayCount::Act360),
            _ => Err(format!("Unknown day count convention: {}", s)),
        }
    }
}

impl fmt::Display for DayCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_act_365f_known_dates() {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let end = Date::from_ymd(2024, 7, 1).unwrap();
        let result = DayCount::Act365F.year_fraction(start, end);
        assert_relative_eq!(result, 182.0 / 365.0, epsilon = 1e-12);
    }

    #[test]
    fn test_act_360_known_dates() {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let end = Date::from_ymd(2024, 7, 1).unwrap();
        let result = DayCount::Act360.year_fraction(start, end);
        assert_relative_eq!(result, 182.0 / 360.0, epsilon = 1e-12);
    }

    #[test]
    fn test_same_date_returns_zero() {
        let date = Date::from_ymd(2024, 6, 15).unwrap();
        assert_eq!(DayCount::Act365F.year_fraction(date, date), 0.0);
        assert_eq!(DayCount::Act360.year_fraction(date, date), 0.0);
    }

    #[test]
    fn test_year_fraction_negative_when_reversed() {
        let start = Date::from_ymd(2024, 7, 1).unwrap();
        let end = Date::from_ymd(2024, 1, 1).unwrap();
        let yf = DayCount::Act365F.year_fraction(start, end);
        assert_relative_eq!(yf, -182.0 / 365.0, epsilon = 1e-12);
    }

    #[test]
    fn test_date_from_ymd_invalid() {
        assert!(Date::from_ymd(2024, 2, 30).is_err());
        assert!(Date::from_ymd(2024, 13, 1).is_err());
        assert!(Date::from_ymd(2023, 2, 29).is_err());
    }

    #[test]
    fn test_date_parse() {
        let date = Date::parse("2005-03-10").unwrap();
        assert_eq!(date.year(), 2005);
        assert_eq!(date.month(), 3);
        assert_eq!(date.day(), 10);

        assert!(Date::parse("not-a-date").is_err());
        assert!(Date::parse("2005/03/10").is_err());
    }

    #[test]
    fn test_date_display_roundtrip() {
        let date = Date::from_ymd(2005, 3, 10).unwrap();
        assert_eq!(format!("{}", date), "2005-03-10");
        assert_eq!(Date::parse(&date.to_string()).unwrap(), date);
    }

    #[test]
    fn test_date_subtraction() {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let end = Date::from_ymd(2024, 1, 11).unwrap();
        assert_eq!(end - start, 10);
        assert_eq!(start - end, -10);
    }

    #[test]
    fn test_date_ordering() {
        let earlier = Date::from_ymd(2024, 1, 1).unwrap();
        let later = Date::from_ymd(2024, 12, 31).unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        let jan31 = Date::from_ymd(2005, 1, 31).unwrap();
        assert_eq!(jan31.add_months(1).unwrap(), Date::from_ymd(2005, 2, 28).unwrap());

        let leap = Date::from_ymd(2024, 1, 31).unwrap();
        assert_eq!(leap.add_months(1).unwrap(), Date::from_ymd(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_add_days() {
        let date = Date::from_ymd(2005, 12, 30).unwrap();
        assert_eq!(date.add_days(2).unwrap(), Date::from_ymd(2006, 1, 1).unwrap());
        assert_eq!(date.add_days(0).unwrap(), date);
    }

    #[test]
    fn test_add_months_across_year() {
        let date = Date::from_ymd(2005, 11, 10).unwrap();
        assert_eq!(date.add_months(3).unwrap(), Date::from_ymd(2006, 2, 10).unwrap());
        assert_eq!(date.add_months(24).unwrap(), Date::from_ymd(2007, 11, 10).unwrap());
    }

    #[test]
    fn test_day_count_from_str() {
        assert_eq!("ACT/365".parse::<DayCount>().unwrap(), DayCount::Act365F);
        assert_eq!("act360".parse::<DayCount>().unwrap(), DayCount::Act360);
        assert!("30/360".parse::<DayCount>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_date_serde_roundtrip() {
        let date = Date::from_ymd(2005, 3, 10).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2005-03-10\"");
        let parsed: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn date_strategy() -> impl Strategy<Value = Date> {
            (2000i32..2100i32, 1u32..13u32, 1u32..29u32)
                .prop_filter_map("valid date", |(y, m, d)| Date::from_ymd(y, m, d).ok())
        }

        proptest! {
            #[test]
            fn test_year_fraction_additive(
                a in date_strategy(),
                b in date_strategy(),
                c in date_strategy(),
            ) {
                let mut dates = [a, b, c];
                dates.sort();
                let [d1, d2, d3] = dates;

                for dc in [DayCount::Act365F, DayCount::Act360] {
                    let total = dc.year_fraction(d1, d3);
                    let parts = dc.year_fraction(d1, d2) + dc.year_fraction(d2, d3);
                    assert_relative_eq!(total, parts, epsilon = 1e-12);
                }
            }

            #[test]
            fn test_year_fraction_finite_and_signed(
                start in date_strategy(),
                end in date_strategy(),
            ) {
                let yf = DayCount::Act365F.year_fraction(start, end);
                prop_assert!(yf.is_finite());
                prop_assert_eq!(yf >= 0.0, start <= end);
            }

            #[test]
            fn test_add_months_monotonic(date in date_strategy(), months in 0u32..60) {
                let shifted = date.add_months(months).unwrap();
                prop_assert!(shifted >= date);
            }
        }
    }
}
