//! Constants used throughout the application.
//!
//! This module contains all constants used in the Echo application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "echo-journal";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str =
    "A moonlit journal: tarot reflections, energy seeds and lunar statistics";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Log level used when `--verbose` is passed.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Configuration Keys & Environment Variables
/// Environment variable for the Echo data directory.
pub const ENV_VAR_ECHO_DIR: &str = "ECHO_DIR";
/// Environment variable for the generative AI API key.
pub const ENV_VAR_ECHO_GEMINI_API_KEY: &str = "ECHO_GEMINI_API_KEY";
/// Fallback environment variable for the generative AI API key.
pub const ENV_VAR_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Environment variable overriding the generative AI base URL.
pub const ENV_VAR_ECHO_GEMINI_URL: &str = "ECHO_GEMINI_URL";
/// Environment variable overriding the generative AI model name.
pub const ENV_VAR_ECHO_MODEL: &str = "ECHO_MODEL";
/// Environment variable for the hosted card store base URL.
pub const ENV_VAR_ECHO_STORE_URL: &str = "ECHO_STORE_URL";
/// Environment variable for the hosted card store anonymous key.
pub const ENV_VAR_ECHO_STORE_KEY: &str = "ECHO_STORE_KEY";
/// Environment variable for the network request timeout in seconds.
pub const ENV_VAR_ECHO_TIMEOUT_SECS: &str = "ECHO_TIMEOUT_SECS";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory for Echo data within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = ".local/share/echo";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Network
/// Default base URL of the generative AI REST API.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default generative model.
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.0-flash";
/// Default timeout applied to every outbound request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;
/// Table holding the tarot deck in the hosted store.
pub const TAROT_CARDS_TABLE: &str = "tarot_cards";

// File System Parameters
/// File name of the persisted journal.
pub const JOURNAL_FILE_NAME: &str = "journal.json";
/// File name of the advisory lock guarding the journal.
pub const JOURNAL_LOCK_FILE_NAME: &str = "journal.lock";
/// Current on-disk journal format version.
pub const JOURNAL_FORMAT_VERSION: u32 = 1;
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for newly created files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";
/// Label format used on trend chart points.
pub const TREND_LABEL_FORMAT: &str = "%m/%d";

// Lunar
/// Mean length of the synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530588853;
/// Number of named phases the synodic cycle is divided into.
pub const MOON_PHASE_COUNT: usize = 8;
/// Year of the reference new moon.
pub const REFERENCE_NEW_MOON_YEAR: i32 = 2000;
/// Month of the reference new moon.
pub const REFERENCE_NEW_MOON_MONTH: u32 = 1;
/// Day of the reference new moon.
pub const REFERENCE_NEW_MOON_DAY: u32 = 6;

// Aggregation
/// Number of keywords shown in the monthly keyword cloud.
pub const DISPLAY_KEYWORD_LIMIT: usize = 5;
/// Number of keywords passed to the monthly report prompt.
pub const PROMPT_KEYWORD_LIMIT: usize = 3;
/// Upper bound of a conversation depth score.
pub const MAX_COMPLEXITY_SCORE: u32 = 100;
/// User characters per point of the fallback depth estimate.
pub const FALLBACK_SCORE_CHARS_PER_POINT: usize = 5;
/// Number of suggestions requested for titles and energy seeds.
pub const SUGGESTION_COUNT: usize = 3;

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "echo-journal";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
