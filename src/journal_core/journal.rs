//! The date-keyed collection that owns every Day Entry.

use super::entry::DayEntry;
use crate::lunar;
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, warn};

/// All Day Entries, in insertion order, at most one per date.
///
/// The journal is the only owner of its entries. Callers borrow them through
/// `entries`, `get` and `get_mut`; the aggregator works on the borrowed slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Journal {
    entries: Vec<DayEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a journal from loaded records.
    ///
    /// Later records for an already-seen date are dropped with a warning, and
    /// every cached `moon_phase` is recomputed from its date.
    pub fn from_entries(entries: Vec<DayEntry>) -> Self {
        let mut seen = HashSet::with_capacity(entries.len());
        let mut kept = Vec::with_capacity(entries.len());

        for mut entry in entries {
            if !seen.insert(entry.date) {
                warn!("Dropping duplicate journal entry for {}", entry.date);
                continue;
            }
            let phase = lunar::phase_for(entry.date);
            if entry.moon_phase != phase {
                debug!(
                    "Repairing cached moon phase for {}: {:?} -> {:?}",
                    entry.date, entry.moon_phase, phase
                );
                entry.moon_phase = phase;
            }
            kept.push(entry);
        }

        Self { entries: kept }
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[DayEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayEntry> {
        self.entries.iter().find(|e| e.date == date)
    }

    pub fn get_mut(&mut self, date: NaiveDate) -> Option<&mut DayEntry> {
        self.entries.iter_mut().find(|e| e.date == date)
    }

    /// The entry for `date`, appending an empty one if the date is new.
    pub fn entry_mut_or_create(&mut self, date: NaiveDate) -> &mut DayEntry {
        let index = match self.entries.iter().position(|e| e.date == date) {
            Some(index) => index,
            None => {
                debug!("Creating journal entry for {}", date);
                self.entries.push(DayEntry::new(date));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index]
    }
}
