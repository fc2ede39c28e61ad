//! Command-line interface for the echo journal.
//!
//! Every subcommand that works on a day takes an optional `--date` accepting
//! `today`, `yesterday`, `YYYY-MM-DD` or `YYYYMMDD`. Monthly subcommands take
//! `--month YYYY-MM` and default to the current month.

pub mod render;

use crate::constants::{APP_DESCRIPTION, APP_NAME, LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use crate::journal_core::SenseChannel;
use clap::{Args, Parser, Subcommand};

/// A lunar journaling companion for daily tarot reflections
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION)]
#[command(author, version, long_about = None)]
pub struct CliArgs {
    /// Print verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(
        long = "log-format",
        global = true,
        default_value = LOG_FORMAT_TEXT,
        value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON]
    )]
    pub log_format: String,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Selects the day a command acts on.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct DateArg {
    /// Day to act on (today, yesterday, YYYY-MM-DD or YYYYMMDD)
    #[arg(short = 'd', long)]
    pub date: Option<String>,
}

/// Selects the month a command summarises.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthArg {
    /// Month to show (YYYY-MM), defaults to the current month
    #[arg(short = 'm', long)]
    pub month: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Show the moon phase and illumination for a day
    Moon {
        #[command(flatten)]
        date: DateArg,
    },

    /// Show a month as a calendar with phases and journaled days
    Calendar {
        #[command(flatten)]
        month: MonthArg,
    },

    /// Show everything recorded on a day
    Day {
        #[command(flatten)]
        date: DateArg,
    },

    /// List the tarot deck
    Deck,

    /// Draw a card and start the day's reflection
    Draw {
        /// Card id from `deck` (e.g. c9)
        card_id: String,
        #[command(flatten)]
        date: DateArg,
    },

    /// Reply in the day's reflection
    Chat {
        /// What you want to say
        message: String,
        #[command(flatten)]
        date: DateArg,
    },

    /// Suggest titles for the day's reflection
    Titles {
        #[command(flatten)]
        date: DateArg,
    },

    /// Finish the day's reflection
    Finish {
        /// Title to keep for the reflection
        #[arg(short = 't', long)]
        title: Option<String>,
        /// Depth score from 0 to 100; estimated when omitted
        #[arg(short = 's', long)]
        score: Option<u32>,
        #[command(flatten)]
        date: DateArg,
    },

    /// Plant, suggest and review energy seeds
    #[command(subcommand)]
    Seed(SeedCommand),

    /// Log a mindfulness practice session
    Practice {
        /// What you practised
        title: String,
        /// Length of the session in minutes
        #[arg(long, default_value_t = 5)]
        minutes: u32,
        /// The session was interrupted
        #[arg(long)]
        interrupted: bool,
        #[command(flatten)]
        date: DateArg,
    },

    /// Five-senses calibration
    #[command(subcommand)]
    Sense(SenseCommand),

    /// Show streak, depth, keywords and deepest conversation for a month
    Stats {
        #[command(flatten)]
        month: MonthArg,
    },

    /// Show the depth trend up to a day
    Trend {
        #[command(flatten)]
        date: DateArg,
    },

    /// Generate the monthly report
    Report {
        #[command(flatten)]
        month: MonthArg,
    },

    /// Show the moon phase you were born under
    Natal {
        /// Birth date (YYYY-MM-DD or YYYYMMDD)
        #[arg(short = 'b', long = "birth-date")]
        birth_date: String,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SeedCommand {
    /// Plant an energy seed for tomorrow
    Plant {
        /// The intention
        seed: String,
        #[command(flatten)]
        date: DateArg,
    },

    /// Suggest seeds from the day's card
    Suggest {
        #[command(flatten)]
        date: DateArg,
    },

    /// Mark the seed planted on a day as carried out
    Complete {
        /// Mark as not carried out instead
        #[arg(long)]
        undo: bool,
        #[command(flatten)]
        date: DateArg,
    },

    /// Review yesterday's seed
    Review {
        /// Record that the seed was carried out
        #[arg(long, conflicts_with = "missed")]
        done: bool,
        /// Record that the seed was not carried out
        #[arg(long)]
        missed: bool,
        #[command(flatten)]
        date: DateArg,
    },
}

impl SeedCommand {
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            SeedCommand::Suggest { .. } | SeedCommand::Review { done: false, missed: false, .. }
        )
    }
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SenseCommand {
    /// Show a calibration task for a sense
    Task {
        /// visual, audio, touch, smell or taste
        sense: SenseChannel,
        #[command(flatten)]
        date: DateArg,
    },

    /// Record what you noticed
    Log {
        /// visual, audio, touch, smell or taste
        sense: SenseChannel,
        /// What you noticed
        content: String,
        /// Title for the log, defaults to the day's task
        #[arg(short = 't', long)]
        title: Option<String>,
        #[command(flatten)]
        date: DateArg,
    },
}

impl Command {
    /// Whether the command changes the journal file.
    pub fn mutates_journal(&self) -> bool {
        match self {
            Command::Draw { .. }
            | Command::Chat { .. }
            | Command::Finish { .. }
            | Command::Practice { .. }
            | Command::Sense(SenseCommand::Log { .. }) => true,
            Command::Seed(seed) => !seed.is_read_only(),
            _ => false,
        }
    }
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }
}
