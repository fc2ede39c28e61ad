//! Core journal functionality without I/O operations.
//!
//! This module contains the date-keyed journal model: how dates are named and
//! parsed, what a day's entry holds, the collection that owns every entry, and
//! the month grid used for calendar navigation. Nothing here touches the disk or
//! the network.

mod calendar;
mod entry;
mod journal;

pub use calendar::{month_grid, shift_day, CalendarDay, MonthGrid};
pub use entry::{
    ChatMessage, ChatRole, DayEntry, PracticeLog, ProgressStatus, SenseChannel, SensoryLog,
    TodayAwareness, TomorrowSeed,
};
pub use journal::Journal;

use crate::constants::{DATE_FORMAT_COMPACT, DATE_FORMAT_ISO};
use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Represents the different ways a command can name the day it acts on.
///
/// # Examples
///
/// ```
/// use echo_journal::journal_core::DateSpecifier;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
///
/// assert_eq!(DateSpecifier::Today.resolve(today), today);
/// assert_eq!(
///     DateSpecifier::Yesterday.resolve(today),
///     NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DateSpecifier {
    /// The current local date.
    Today,

    /// The day before the current local date.
    Yesterday,

    /// An explicit calendar date.
    Specific(NaiveDate),
}

impl DateSpecifier {
    /// Creates a DateSpecifier from an optional `--date` argument.
    ///
    /// Accepts `today`, `yesterday`, `YYYY-MM-DD` or `YYYYMMDD`. A missing
    /// argument means today.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Journal` if the string is not a real calendar date in
    /// one of the supported formats.
    ///
    /// # Examples
    ///
    /// ```
    /// use echo_journal::journal_core::DateSpecifier;
    ///
    /// assert_eq!(DateSpecifier::from_cli_arg(None).unwrap(), DateSpecifier::Today);
    /// assert!(DateSpecifier::from_cli_arg(Some("2024-01-32")).is_err());
    /// ```
    pub fn from_cli_arg(date_str: Option<&str>) -> AppResult<Self> {
        match date_str.map(str::trim) {
            None => Ok(DateSpecifier::Today),
            Some(s) if s.eq_ignore_ascii_case("today") => Ok(DateSpecifier::Today),
            Some(s) if s.eq_ignore_ascii_case("yesterday") => Ok(DateSpecifier::Yesterday),
            Some(s) => parse_date_key(s).map(DateSpecifier::Specific),
        }
    }

    /// Resolves the specifier against the current date.
    pub fn resolve(&self, current_date: NaiveDate) -> NaiveDate {
        match self {
            DateSpecifier::Today => current_date,
            DateSpecifier::Yesterday => shift_day(current_date, -1),
            DateSpecifier::Specific(date) => *date,
        }
    }
}

/// Parses a date key in `YYYY-MM-DD` or `YYYYMMDD` format.
///
/// # Errors
///
/// Returns `AppError::Journal` with an "Invalid date format" message for
/// anything that is not a valid calendar date.
pub fn parse_date_key(date_str: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str, DATE_FORMAT_ISO)
        .or_else(|_| NaiveDate::parse_from_str(date_str, DATE_FORMAT_COMPACT))
        .map_err(|e| AppError::Journal(format!("Invalid date format '{}': {}", date_str, e)))
}

/// Formats a date as its `YYYY-MM-DD` journal key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT_ISO).to_string()
}

/// A calendar month, the unit of monthly statistics and the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Creates a month key, returning `None` when `month` is not 1 to 12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) && NaiveDate::from_ymd_opt(year, month, 1).is_some() {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Whether `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Number of days in the month.
    pub fn days_in_month(&self) -> u32 {
        let next_first = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        match next_first {
            Some(next) => (next - Duration::days(1)).day(),
            // Only reachable for the last representable month
            None => 31,
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = AppError;

    /// Parses `YYYY-MM` or `YYYYMM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::Journal(format!("Invalid month format '{}': expected YYYY-MM", s));
        let s = s.trim();
        let (year_str, month_str) = match s.split_once('-') {
            Some(parts) => parts,
            None if s.len() == 6 && s.is_ascii() => s.split_at(4),
            None => return Err(invalid()),
        };
        if year_str.len() != 4 || month_str.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year_str.parse().map_err(|_| invalid())?;
        let month: u32 = month_str.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}
