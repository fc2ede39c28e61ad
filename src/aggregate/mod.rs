//! Derived statistics over a journal.
//!
//! Every function here borrows a slice of entries and returns fresh values.
//! Inputs are never mutated, so calling any of them twice gives the same
//! answer. Anything order-dependent first sorts the entries ascending by date.
//!
//! # Example
//!
//! ```
//! use echo_journal::aggregate::{cumulative_reflection_depth, total_streak_count};
//!
//! assert_eq!(total_streak_count(&[]), 0);
//! assert_eq!(cumulative_reflection_depth(&[]), 0);
//! ```

use crate::constants::{DISPLAY_KEYWORD_LIMIT, TREND_LABEL_FORMAT};
use crate::journal_core::{DayEntry, MonthKey};
use crate::lunar::MoonPhase;
use crate::tarot::Deck;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Entries ordered ascending by date. The sort is stable.
pub fn sorted_chronologically(entries: &[DayEntry]) -> Vec<&DayEntry> {
    let mut sorted: Vec<&DayEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.date);
    sorted
}

/// Entries dated inside `month`, ascending by date.
pub fn entries_in_month(entries: &[DayEntry], month: MonthKey) -> Vec<&DayEntry> {
    sorted_chronologically(entries)
        .into_iter()
        .filter(|e| month.contains(e.date))
        .collect()
}

/// Number of journaled days.
///
/// This is a plain count of entries, not a run of consecutive dates.
pub fn total_streak_count(entries: &[DayEntry]) -> usize {
    entries.len()
}

/// Total characters the user has written across every reflection.
pub fn cumulative_reflection_depth(entries: &[DayEntry]) -> usize {
    entries
        .iter()
        .filter_map(|e| e.today_awareness.as_ref())
        .map(|a| a.user_char_count())
        .sum()
}

/// The month's most frequent card keywords, most frequent first.
///
/// Only completed reflections count. Keywords are taken from the card each
/// reflection references; ids missing from `deck` contribute nothing. Ties
/// keep the order in which keywords were first seen walking the month's
/// entries by date.
pub fn monthly_keyword_ranking(
    entries: &[DayEntry],
    deck: &Deck,
    month: MonthKey,
    limit: usize,
) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for entry in entries_in_month(entries, month) {
        let Some(reflection) = entry.completed_reflection() else {
            continue;
        };
        let Some(card) = deck.find(&reflection.card_id) else {
            continue;
        };
        for keyword in &card.keywords {
            match positions.get(keyword.as_str()) {
                Some(&index) => counts[index].1 += 1,
                None => {
                    positions.insert(keyword.as_str(), counts.len());
                    counts.push((keyword.as_str(), 1));
                }
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(keyword, _)| keyword.to_string())
        .collect()
}

/// The month's completed reflection with the highest depth score.
///
/// Reflections with an empty transcript are ignored. Equal scores go to the
/// earlier date.
pub fn deepest_conversation(entries: &[DayEntry], month: MonthKey) -> Option<&DayEntry> {
    entries_in_month(entries, month)
        .into_iter()
        .filter(|e| {
            e.completed_reflection()
                .is_some_and(|a| !a.chat_history.is_empty())
        })
        .fold(None, |best: Option<&DayEntry>, entry| match best {
            Some(current) if current.complexity_score() >= entry.complexity_score() => {
                Some(current)
            }
            _ => Some(entry),
        })
}

/// One point on the depth trend chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// `MM/DD`
    pub label: String,
    pub score: u32,
    pub title: Option<String>,
    pub phase: MoonPhase,
    pub bright: bool,
}

/// Depth scores of every entry up to and including `today`, oldest first.
pub fn trend_series(entries: &[DayEntry], today: NaiveDate) -> Vec<TrendPoint> {
    sorted_chronologically(entries)
        .into_iter()
        .filter(|e| e.date <= today)
        .map(|e| TrendPoint {
            date: e.date,
            label: e.date.format(TREND_LABEL_FORMAT).to_string(),
            score: e.complexity_score(),
            title: e.selected_title().map(str::to_string),
            phase: e.moon_phase,
            bright: e.moon_phase.is_bright(),
        })
        .collect()
}

/// Summary of a reflection, detached from the journal it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationHighlight {
    pub date: NaiveDate,
    pub card_id: String,
    pub title: Option<String>,
    pub score: u32,
    pub user_chars: usize,
}

impl ConversationHighlight {
    fn from_entry(entry: &DayEntry) -> Option<Self> {
        let reflection = entry.today_awareness.as_ref()?;
        Some(Self {
            date: entry.date,
            card_id: reflection.card_id.clone(),
            title: reflection.selected_title.clone(),
            score: reflection.complexity_score,
            user_chars: reflection.user_char_count(),
        })
    }
}

/// Everything the monthly stats view shows.
///
/// Streak and depth cover the whole journal; keywords and the highlight are
/// scoped to `month`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySnapshot {
    pub month: String,
    pub streak: usize,
    pub depth: usize,
    pub entries_this_month: usize,
    pub top_keywords: Vec<String>,
    pub deepest: Option<ConversationHighlight>,
}

impl MonthlySnapshot {
    pub fn build(entries: &[DayEntry], deck: &Deck, month: MonthKey) -> Self {
        Self {
            month: month.to_string(),
            streak: total_streak_count(entries),
            depth: cumulative_reflection_depth(entries),
            entries_this_month: entries_in_month(entries, month).len(),
            top_keywords: monthly_keyword_ranking(entries, deck, month, DISPLAY_KEYWORD_LIMIT),
            deepest: deepest_conversation(entries, month).and_then(ConversationHighlight::from_entry),
        }
    }

    /// Whether the month has nothing to show.
    pub fn is_empty_month(&self) -> bool {
        self.top_keywords.is_empty() && self.deepest.is_none()
    }
}
