/*!
# Echo

Echo is a lunar journaling companion. Every day carries the moon's phase; on
any day you can draw a tarot card and reflect on it with an AI companion,
plant a small intention for tomorrow, and log mindfulness practice and
five-senses calibrations. Monthly views summarise streak, reflection depth,
recurring card keywords and the deepest conversation.

## Architecture

The codebase follows a modular architecture with clear separation of concerns:

- `lunar`: Moon age, phase and illumination for any date (pure)
- `journal_core`: Day entries, the journal collection, dates, months and the calendar grid (pure)
- `aggregate`: Statistics over the journal (pure)
- `tarot`: Card model, built-in deck and hosted card store client
- `ai`: Generative AI client, prompts and fail-soft helper
- `journal_io`: Locking, loading and atomically saving the journal file
- `ops`: Journaling workflows built on all of the above
- `cli`: Command-line interface and text rendering
- `config`: Configuration loading and validation
- `errors`: Error handling infrastructure

## Usage Example

```rust,no_run
use echo_journal::aggregate::MonthlySnapshot;
use echo_journal::journal_core::MonthKey;
use echo_journal::tarot::Deck;
use echo_journal::{journal_io, Config};

fn main() -> echo_journal::AppResult<()> {
    let config = Config::load()?;
    let journal = journal_io::load_journal(&config.data_dir)?;

    let month = MonthKey::new(2024, 3).expect("valid month");
    let snapshot = MonthlySnapshot::build(journal.entries(), &Deck::builtin(), month);
    println!("{} days journaled", snapshot.streak);
    Ok(())
}
```
*/

/// Statistics over journal entries
pub mod aggregate;
/// Generative AI companion
pub mod ai;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Error types and utilities for error handling
pub mod errors;
/// Core journal model without I/O
pub mod journal_core;
/// Journal persistence and locking
pub mod journal_io;
/// Moon phase calculation
pub mod lunar;
/// High-level journaling workflows
pub mod ops;
/// Tarot cards and the hosted card store
pub mod tarot;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use journal_core::{DateSpecifier, DayEntry, Journal, MonthKey};
pub use lunar::{phase_and_illumination, MoonPhase};
