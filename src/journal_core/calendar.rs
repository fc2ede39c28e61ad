//! Month grid and day stepping for calendar navigation.

use super::{Journal, MonthKey};
use crate::lunar::{self, MoonPhase};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub phase: MoonPhase,
    pub has_entry: bool,
    pub has_practice: bool,
    pub reflection_done: bool,
}

/// A month laid out for a Sunday-first calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: MonthKey,
    /// Empty cells before the 1st (0 when the month starts on a Sunday).
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

/// Moves `date` by `offset` days, saturating at the representable range.
pub fn shift_day(date: NaiveDate, offset: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(offset))
        .unwrap_or(date)
}

/// Builds the grid for `month`, marking which days have journal activity.
pub fn month_grid(journal: &Journal, month: MonthKey) -> MonthGrid {
    let first = month.first_day();
    let days = first
        .iter_days()
        .take(month.days_in_month() as usize)
        .map(|date| {
            let entry = journal.get(date);
            CalendarDay {
                date,
                phase: lunar::phase_for(date),
                has_entry: entry.is_some_and(|e| !e.is_blank()),
                has_practice: entry.is_some_and(|e| e.has_practice()),
                reflection_done: entry.is_some_and(|e| e.completed_reflection().is_some()),
            }
        })
        .collect();

    MonthGrid {
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    }
}
