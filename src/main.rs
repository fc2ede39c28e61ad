/*!
# Echo - A Lunar Journaling Companion

Echo is a command-line journal organised around the moon. Each day you can draw
a tarot card and talk it through with an AI companion, plant a small intention
for tomorrow, and log mindfulness practice and five-senses calibrations.
Monthly views summarise how deep your reflections went.

This file contains the main application flow: logging setup, configuration,
and dispatching each subcommand against the journal file.

## Usage

```text
echo-journal [OPTIONS] <COMMAND>

Commands:
  moon      Show the moon phase and illumination for a day
  calendar  Show a month as a calendar with phases and journaled days
  day       Show everything recorded on a day
  deck      List the tarot deck
  draw      Draw a card and start the day's reflection
  chat      Reply in the day's reflection
  titles    Suggest titles for the day's reflection
  finish    Finish the day's reflection
  seed      Plant, suggest and review energy seeds
  practice  Log a mindfulness practice session
  sense     Five-senses calibration
  stats     Show streak, depth, keywords and deepest conversation for a month
  trend     Show the depth trend up to a day
  report    Generate the monthly report
  natal     Show the moon phase you were born under

Options:
  -v, --verbose                 Print verbose output
      --log-format <LOG_FORMAT> Log output format [default: text] [possible values: text, json]
      --json                    Print results as JSON instead of text
```

## Configuration

See the `config` module for the environment variables that control where the
journal lives and how the AI service and card store are reached.
*/

use chrono::{Local, NaiveDate};
use echo_journal::aggregate::{trend_series, MonthlySnapshot};
use echo_journal::ai::GeminiClient;
use echo_journal::cli::{render, CliArgs, Command, DateArg, MonthArg, SeedCommand, SenseCommand};
use echo_journal::config::Config;
use echo_journal::constants::{
    DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME,
    VERBOSE_LOG_LEVEL,
};
use echo_journal::errors::{AppError, AppResult};
use echo_journal::journal_core::{month_grid, parse_date_key, DateSpecifier, Journal, MonthKey};
use echo_journal::journal_io::{self, JournalLock};
use echo_journal::lunar::lunar_details;
use echo_journal::ops;
use echo_journal::tarot::{load_deck, CardStore, Deck};
use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

/// Sets up the global tracing subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise the level is `info`, or `debug` with
/// `--verbose`.
fn init_tracing(verbose: bool, log_format: &str) -> AppResult<()> {
    let default_level = if verbose {
        VERBOSE_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if log_format == LOG_FORMAT_JSON {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| AppError::Config(format!("Failed to initialize logging: {}", e)))
}

/// Everything a command needs besides its own arguments.
struct Context {
    config: Config,
    today: NaiveDate,
    json: bool,
}

impl Context {
    fn resolve_date(&self, arg: &DateArg) -> AppResult<NaiveDate> {
        Ok(DateSpecifier::from_cli_arg(arg.date.as_deref())?.resolve(self.today))
    }

    fn resolve_month(&self, arg: &MonthArg) -> AppResult<MonthKey> {
        match arg.month.as_deref() {
            Some(month) => MonthKey::from_str(month),
            None => Ok(MonthKey::of(self.today)),
        }
    }

    fn deck(&self) -> Deck {
        load_deck(CardStore::from_config(&self.config).as_ref())
    }

    fn ai(&self) -> GeminiClient {
        GeminiClient::from_config(&self.config)
    }

    /// Prints `value` as JSON, or `text` otherwise.
    fn emit<T: Serialize + ?Sized>(&self, value: &T, text: impl FnOnce() -> String) -> AppResult<()> {
        if self.json {
            let json = serde_json::to_string_pretty(value)
                .map_err(|e| AppError::Journal(format!("Failed to serialize output: {}", e)))?;
            println!("{}", json);
        } else {
            println!("{}", text());
        }
        Ok(())
    }

    fn load(&self) -> AppResult<Journal> {
        journal_io::load_journal(&self.config.data_dir)
    }
}

fn run_read_only(ctx: &Context, command: Command) -> AppResult<()> {
    match command {
        Command::Moon { date } => {
            let date = ctx.resolve_date(&date)?;
            let details = lunar_details(date);
            let value = serde_json::json!({
                "date": date,
                "phase": details.phase,
                "name": details.phase.info().name,
                "illuminationPercent": details.illumination_percent,
                "ageDays": details.age_days,
            });
            ctx.emit(&value, || render::moon(date, &details))
        }
        Command::Calendar { month } => {
            let month = ctx.resolve_month(&month)?;
            let grid = month_grid(&ctx.load()?, month);
            let value = serde_json::json!({
                "month": grid.month.to_string(),
                "leadingBlanks": grid.leading_blanks,
                "days": grid.days,
            });
            ctx.emit(&value, || render::calendar(&grid))
        }
        Command::Day { date } => {
            let date = ctx.resolve_date(&date)?;
            let journal = ctx.load()?;
            let entry = journal.get(date);
            let deck = if entry.and_then(|e| e.today_awareness.as_ref()).is_some() {
                ctx.deck()
            } else {
                Deck::builtin()
            };
            ctx.emit(&entry, || render::day(date, entry, &deck))
        }
        Command::Deck => {
            let deck = ctx.deck();
            ctx.emit(deck.cards(), || render::deck(&deck))
        }
        Command::Titles { date } => {
            let date = ctx.resolve_date(&date)?;
            let titles = ops::suggest_titles(&ctx.load()?, &ctx.ai(), date)?;
            ctx.emit(&titles, || render::numbered(&titles))
        }
        Command::Seed(SeedCommand::Suggest { date }) => {
            let date = ctx.resolve_date(&date)?;
            let seeds = ops::suggest_seeds(&ctx.load()?, &ctx.deck(), &ctx.ai(), date)?;
            ctx.emit(&seeds, || render::numbered(&seeds))
        }
        Command::Seed(SeedCommand::Review { date, .. }) => {
            let today = ctx.resolve_date(&date)?;
            let mut journal = ctx.load()?;
            let review = ops::review_seed(&mut journal, &ctx.ai(), today, None)?;
            ctx.emit(&review, || render::seed_review(review.as_ref()))
        }
        Command::Sense(SenseCommand::Task { sense, date }) => {
            let date = ctx.resolve_date(&date)?;
            let task = ops::sensory_task(sense, date);
            ctx.emit(&serde_json::json!({ "sense": sense, "task": task }), || {
                task.to_string()
            })
        }
        Command::Stats { month } => {
            let month = ctx.resolve_month(&month)?;
            let journal = ctx.load()?;
            let snapshot = MonthlySnapshot::build(journal.entries(), &ctx.deck(), month);
            ctx.emit(&snapshot, || render::snapshot(&snapshot))
        }
        Command::Trend { date } => {
            let until = ctx.resolve_date(&date)?;
            let points = trend_series(ctx.load()?.entries(), until);
            ctx.emit(&points, || render::trend(&points))
        }
        Command::Report { month } => {
            let month = ctx.resolve_month(&month)?;
            let journal = ctx.load()?;
            let (keywords, report) =
                ops::monthly_report_for(journal.entries(), &ctx.deck(), &ctx.ai(), month);
            let label = month.to_string();
            ctx.emit(&report, || render::report(&label, &keywords, &report))
        }
        Command::Natal { birth_date } => {
            let birth_date = parse_date_key(&birth_date)?;
            let reading = ops::natal_reading(birth_date, ctx.today)?;
            ctx.emit(&reading, || render::natal(&reading))
        }
        other => Err(AppError::Journal(format!(
            "Command needs write access to the journal: {:?}",
            other
        ))),
    }
}

/// Applies a mutating command to `journal` and prints its result.
fn run_mutating(ctx: &Context, journal: &mut Journal, command: Command) -> AppResult<()> {
    match command {
        Command::Draw { card_id, date } => {
            let date = ctx.resolve_date(&date)?;
            let opening =
                ops::start_reflection(journal, &ctx.deck(), &ctx.ai(), date, &card_id)?;
            ctx.emit(&opening, || opening.clone())
        }
        Command::Chat { message, date } => {
            let date = ctx.resolve_date(&date)?;
            let reply =
                ops::continue_reflection(journal, &ctx.deck(), &ctx.ai(), date, &message)?;
            ctx.emit(&reply, || reply.clone())
        }
        Command::Finish { title, score, date } => {
            let date = ctx.resolve_date(&date)?;
            let score = ops::finish_reflection(journal, &ctx.ai(), date, title.as_deref(), score)?;
            ctx.emit(&serde_json::json!({ "date": date, "score": score }), || {
                format!("Reflection for {} finished with depth {}.", date, score)
            })
        }
        Command::Seed(SeedCommand::Plant { seed, date }) => {
            let date = ctx.resolve_date(&date)?;
            let planted = ops::plant_seed(journal, date, &seed, None)?;
            ctx.emit(&planted, || {
                format!("Planted for tomorrow: {}", planted.energy_seed)
            })
        }
        Command::Seed(SeedCommand::Complete { undo, date }) => {
            let date = ctx.resolve_date(&date)?;
            let seed = ops::complete_seed(journal, date, !undo)?;
            ctx.emit(&seed, || {
                format!(
                    "Seed from {} marked {}: {}",
                    date,
                    if seed.blessing_completed { "done" } else { "open" },
                    seed.energy_seed
                )
            })
        }
        Command::Seed(SeedCommand::Review { done, missed, date }) => {
            let today = ctx.resolve_date(&date)?;
            let outcome = if done {
                Some(true)
            } else if missed {
                Some(false)
            } else {
                None
            };
            let review = ops::review_seed(journal, &ctx.ai(), today, outcome)?;
            ctx.emit(&review, || render::seed_review(review.as_ref()))
        }
        Command::Practice {
            title,
            minutes,
            interrupted,
            date,
        } => {
            let date = ctx.resolve_date(&date)?;
            let log = ops::log_practice(journal, date, &title, minutes, !interrupted)?;
            ctx.emit(&log, || {
                format!("Logged {} ({} min) on {}.", log.title, log.duration_minutes, date)
            })
        }
        Command::Sense(SenseCommand::Log {
            sense,
            content,
            title,
            date,
        }) => {
            let date = ctx.resolve_date(&date)?;
            let log = ops::log_sensory(journal, date, sense, title.as_deref(), &content)?;
            ctx.emit(&log, || format!("Logged {} calibration on {}.", log.sense, date))
        }
        other => run_read_only(ctx, other),
    }
}

/// The main entry point for the echo-journal application.
///
/// This function coordinates the overall application flow:
/// 1. Captures the current date once
/// 2. Parses command-line arguments and initializes logging
/// 3. Loads and validates configuration
/// 4. For commands that change the journal: takes the lock, loads, applies
///    the change and saves atomically
/// 5. Otherwise reads the journal without locking
///
/// # Errors
///
/// Configuration, I/O, lock and journal errors end the process with a
/// non-zero status. AI and card store failures never do; they fall back to
/// fixed text and the built-in deck.
fn main() -> AppResult<()> {
    let today = Local::now().date_naive();

    let args = CliArgs::parse_args();
    init_tracing(args.verbose, &args.log_format)?;

    let span = info_span!(TRACING_ROOT_SPAN_NAME, service = TRACING_SERVICE_NAME);
    let _guard = span.enter();

    debug!("CLI arguments: {:?}", args);

    let config = Config::load()?;
    config.validate()?;
    debug!("Configuration: {:?}", config);

    let ctx = Context {
        config,
        today,
        json: args.json,
    };

    if args.command.mutates_journal() {
        journal_io::ensure_data_directory_exists(&ctx.config.data_dir)?;
        let _lock = JournalLock::acquire(&ctx.config.data_dir)?;

        let mut journal = ctx.load()?;
        run_mutating(&ctx, &mut journal, args.command)?;
        journal_io::save_journal(&ctx.config.data_dir, &journal)?;
    } else {
        run_read_only(&ctx, args.command)?;
    }

    info!("Command completed");
    Ok(())
}
