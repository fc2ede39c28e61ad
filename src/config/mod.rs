//! Configuration management for the echo application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults. It covers where the journal lives and how the
//! two hosted collaborators (the generative AI service and the tarot card store) are
//! reached.
//!
//! # Environment Variables
//!
//! - `ECHO_DIR`: Data directory holding `journal.json` (defaults to ~/.local/share/echo)
//! - `ECHO_GEMINI_API_KEY` / `GEMINI_API_KEY`: API key for the AI companion (optional)
//! - `ECHO_GEMINI_URL`: Base URL of the AI service
//! - `ECHO_MODEL`: Generative model name
//! - `ECHO_STORE_URL` / `ECHO_STORE_KEY`: Hosted card store (optional)
//! - `ECHO_TIMEOUT_SECS`: Request timeout in seconds (defaults to 20)
//! - `HOME`: Used for expanding the default data directory path

use crate::constants::{
    DEFAULT_CHAT_MODEL, DEFAULT_DATA_SUBDIR, DEFAULT_GEMINI_BASE_URL,
    DEFAULT_REQUEST_TIMEOUT_SECS, ENV_VAR_ECHO_DIR, ENV_VAR_ECHO_GEMINI_API_KEY,
    ENV_VAR_ECHO_GEMINI_URL, ENV_VAR_ECHO_MODEL, ENV_VAR_ECHO_STORE_KEY, ENV_VAR_ECHO_STORE_URL,
    ENV_VAR_ECHO_TIMEOUT_SECS, ENV_VAR_GEMINI_API_KEY, ENV_VAR_HOME, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the echo application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use echo_journal::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("/path/to/echo"),
///     ..Config::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct Config {
    /// Directory where `journal.json` and its lock file live.
    pub data_dir: PathBuf,

    /// API key for the generative AI service. Without one the companion
    /// answers with its fixed fallback lines.
    pub gemini_api_key: Option<String>,

    /// Base URL of the generative AI REST API.
    pub gemini_base_url: String,

    /// Generative model name.
    pub model: String,

    /// Base URL of the hosted card store.
    pub store_url: Option<String>,

    /// Anonymous key for the hosted card store.
    pub store_key: Option<String>,

    /// Timeout applied to every outbound request.
    pub request_timeout: Duration,
}

fn redact<T>(value: &Option<T>) -> &'static str {
    if value.is_some() {
        REDACTED_PLACEHOLDER
    } else {
        "None"
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &"[REDACTED_PATH]")
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .field("gemini_base_url", &self.gemini_base_url)
            .field("model", &self.model)
            .field("store_url", &self.store_url)
            .field("store_key", &redact(&self.store_key))
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for Config {
    /// Creates a new Config with default values and an empty data directory.
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from(""),
            gemini_api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            store_url: None,
            store_key: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// Reads a variable, treating unset and blank the same.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The data directory is expanded with `shellexpand` so `~` and `$VARS`
    /// work as expected.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The data directory path expansion fails or yields an empty path
    /// - `ECHO_TIMEOUT_SECS` is not a positive integer
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use echo_journal::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Loaded config: {:?}", config),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let data_dir_str = non_empty_var(ENV_VAR_ECHO_DIR).unwrap_or_else(|| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_DATA_SUBDIR)
        });

        let expanded_path = shellexpand::full(&data_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
        let data_dir = PathBuf::from(expanded_path.into_owned());

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        let request_timeout = match non_empty_var(ENV_VAR_ECHO_TIMEOUT_SECS) {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    AppError::Config(format!(
                        "{} must be a whole number of seconds, got '{}'",
                        ENV_VAR_ECHO_TIMEOUT_SECS, raw
                    ))
                })?;
                if secs == 0 {
                    return Err(AppError::Config(format!(
                        "{} must be greater than zero",
                        ENV_VAR_ECHO_TIMEOUT_SECS
                    )));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Config {
            data_dir,
            gemini_api_key: non_empty_var(ENV_VAR_ECHO_GEMINI_API_KEY)
                .or_else(|| non_empty_var(ENV_VAR_GEMINI_API_KEY)),
            gemini_base_url: non_empty_var(ENV_VAR_ECHO_GEMINI_URL)
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            model: non_empty_var(ENV_VAR_ECHO_MODEL)
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            store_url: non_empty_var(ENV_VAR_ECHO_STORE_URL),
            store_key: non_empty_var(ENV_VAR_ECHO_STORE_KEY),
            request_timeout,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Data directory path is empty"
    /// - "Data directory must be an absolute path"
    /// - "Model name is empty"
    /// - "Request timeout must be greater than zero"
    ///
    /// # Examples
    ///
    /// ```
    /// use echo_journal::Config;
    /// use std::path::PathBuf;
    ///
    /// let relative = Config {
    ///     data_dir: PathBuf::from("relative/path"),
    ///     ..Config::default()
    /// };
    /// assert!(relative.validate().is_err());
    /// ```
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        if self.model.trim().is_empty() {
            return Err(AppError::Config("Model name is empty".to_string()));
        }

        if self.request_timeout.is_zero() {
            return Err(AppError::Config(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Store URL and key, when both are set.
    pub fn store_credentials(&self) -> Option<(&str, &str)> {
        Some((self.store_url.as_deref()?, self.store_key.as_deref()?))
    }
}
