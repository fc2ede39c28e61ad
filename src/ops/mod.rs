//! High-level journaling workflows.
//!
//! This module provides the user-facing operations that tie the journal
//! model, the tarot deck and the AI companion together: the daily tarot
//! reflection, energy seeds, practice and sensory logs, the natal moon and
//! the monthly report. Every operation takes the journal and its
//! collaborators as arguments and leaves persistence to the caller.

pub mod natal;
pub mod practice;
pub mod reflect;
pub mod report;
pub mod seed;

// Re-export commonly used functions
pub use natal::{natal_reading, NatalReading};
pub use practice::{log_practice, log_sensory, sensory_task};
pub use reflect::{
    continue_reflection, estimate_depth_score, finish_reflection, start_reflection, suggest_titles,
};
pub use report::{generate_monthly_report, monthly_report_for, MonthlyReport};
pub use seed::{complete_seed, plant_seed, review_seed, suggest_seeds, SeedReview};
