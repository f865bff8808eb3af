use std::fmt;

use chrono::{Datelike, Months, NaiveDate};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{Error, Result};

/// A calendar month. Always holds a valid year/month pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidMonth(month));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(Error::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn first_day(self) -> NaiveDate {
        // validated in the constructors
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(self) -> u32 {
        // next() saturates at NaiveDate::MAX
        (28..=31).rev().find(|day| self.date(*day).is_some()).unwrap_or(28)
    }

    /// Weekday of the 1st, counted from Sunday = 0.
    pub fn first_weekday(self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    pub fn date(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn add_months(self, delta: i32) -> Self {
        let months = Months::new(delta.unsigned_abs());
        let first = self.first_day();
        let shifted = if delta >= 0 {
            first.checked_add_months(months)
        } else {
            first.checked_sub_months(months)
        };
        shifted.map(Self::of).unwrap_or(self)
    }

    pub fn next(self) -> Self {
        self.add_months(1)
    }

    pub fn previous(self) -> Self {
        self.add_months(-1)
    }

    /// Fixed English rendering, e.g. `January 2026`.
    pub fn label(self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn rejects_out_of_range_months() {
        assert_eq!(YearMonth::new(2026, 0), Err(Error::InvalidMonth(0)));
        assert_eq!(YearMonth::new(2026, 13), Err(Error::InvalidMonth(13)));
    }

    #[test]
    fn rejects_years_chrono_cannot_hold() {
        assert_eq!(YearMonth::new(i32::MAX, 1), Err(Error::InvalidYear(i32::MAX)));
        assert_eq!(YearMonth::new(i32::MIN, 12), Err(Error::InvalidYear(i32::MIN)));
        assert_eq!(
            YearMonth::new(i32::MAX, 13),
            Err(Error::InvalidMonth(13))
        );
    }

    #[test]
    fn last_representable_month_is_complete() {
        let last = YearMonth::of(NaiveDate::MAX);
        assert_eq!(last.days_in_month(), NaiveDate::MAX.day());
        assert_eq!(last.next(), last);

        let first = YearMonth::of(NaiveDate::MIN);
        assert_eq!(first.days_in_month(), 31);
        assert_eq!(first.previous(), first);
    }

    #[test]
    fn days_in_month_follows_gregorian_rules() {
        assert_eq!(ym(2026, 2).days_in_month(), 28);
        assert_eq!(ym(2024, 2).days_in_month(), 29);
        assert_eq!(ym(1900, 2).days_in_month(), 28);
        assert_eq!(ym(2000, 2).days_in_month(), 29);
        assert_eq!(ym(2026, 4).days_in_month(), 30);
        assert_eq!(ym(2026, 1).days_in_month(), 31);
        assert_eq!(ym(2026, 12).days_in_month(), 31);
    }

    #[test]
    fn first_weekday_counts_from_sunday() {
        // 2026-01-01 is a Thursday, 2026-02-01 a Sunday, 2026-08-01 a Saturday
        assert_eq!(ym(2026, 1).first_weekday(), 4);
        assert_eq!(ym(2026, 2).first_weekday(), 0);
        assert_eq!(ym(2026, 8).first_weekday(), 6);
    }

    #[test]
    fn navigation_wraps_year_boundaries() {
        assert_eq!(ym(2026, 12).next(), ym(2027, 1));
        assert_eq!(ym(2026, 1).previous(), ym(2025, 12));
        assert_eq!(ym(2026, 5).add_months(-17), ym(2024, 12));
    }

    #[test]
    fn twelve_forward_twelve_back_is_identity() {
        for month in 1..=12 {
            let start = ym(2026, month);
            let mut current = start;
            for _ in 0..12 {
                current = current.next();
            }
            assert_eq!(current, ym(2027, month));
            for _ in 0..12 {
                current = current.previous();
            }
            assert_eq!(current, start);
        }
    }

    #[test]
    fn labels_are_english() {
        assert_eq!(ym(2026, 1).label(), "January 2026");
        assert_eq!(ym(2025, 9).to_string(), "2025-09");
    }

    #[test]
    fn date_checks_day_bounds() {
        assert!(ym(2026, 2).date(28).is_some());
        assert!(ym(2026, 2).date(29).is_none());
        assert!(ym(2026, 2).date(0).is_none());
    }
}
