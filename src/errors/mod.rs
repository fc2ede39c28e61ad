//! Error handling utilities for the echo application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! The lunar calculator and the journal aggregator never produce errors; every
//! variant here originates in configuration, persistence or the network glue.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents errors that can occur when attempting to lock the journal file.
///
/// # Examples
///
/// ```
/// use echo_journal::errors::LockError;
/// use std::path::PathBuf;
///
/// let error = LockError::FileBusy {
///     path: PathBuf::from("/path/to/journal.lock"),
/// };
///
/// assert!(format!("{}", error).contains("in use by another"));
/// ```
#[derive(Debug, Error)]
pub enum LockError {
    /// Error when the journal is already locked by another process.
    #[error("Journal is currently in use by another echo-journal process: {path}. Please wait for the other command to finish.")]
    FileBusy {
        /// The path to the lock file
        path: PathBuf,
    },

    /// Error when acquiring the lock fails for a technical reason.
    #[error("Failed to acquire journal lock {path}: {source}. Please check file permissions and ensure the directory is accessible.")]
    AcquisitionFailed {
        /// The path to the lock file that couldn't be locked
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents specific error cases that can occur during generative AI calls.
///
/// None of these reach the user as a failure: the companion operations log them
/// and substitute fixed fallback text.
///
/// # Examples
///
/// ```
/// use echo_journal::errors::AIError;
///
/// let error = AIError::ModelNotFound("gemini-2.0-flash".to_string());
/// assert!(format!("{}", error).contains("gemini-2.0-flash"));
/// ```
#[derive(Debug, Error)]
pub enum AIError {
    /// The AI service is not reachable (connection, TLS or timeout failure).
    #[error("Generative AI service unreachable: {0}. Check your network connection.")]
    Unreachable(#[source] reqwest::Error),

    /// No API key was configured.
    #[error("No generative AI API key configured. Set ECHO_GEMINI_API_KEY to enable the companion.")]
    MissingApiKey,

    /// Requested model not found.
    #[error("Model not found: {0}. Check ECHO_MODEL.")]
    ModelNotFound(String),

    /// Invalid or unexpected response from the AI service.
    #[error("Invalid response from generative AI service: {0}")]
    InvalidResponse(String),
}

/// Represents specific error cases that can occur when fetching the tarot deck
/// from the hosted store.
///
/// # Examples
///
/// ```
/// use echo_journal::errors::StoreError;
///
/// let error = StoreError::NotConfigured;
/// assert!(format!("{}", error).contains("ECHO_STORE_URL"));
/// ```
#[derive(Debug, Error)]
pub enum StoreError {
    /// No store URL or key was configured.
    #[error("Card store not configured. Set ECHO_STORE_URL and ECHO_STORE_KEY to fetch the deck.")]
    NotConfigured,

    /// The store is not reachable.
    #[error("Card store unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The store answered with an error status or an unreadable body.
    #[error("Invalid response from card store: {0}")]
    InvalidResponse(String),
}

/// Represents all possible errors that can occur in the echo application.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use echo_journal::errors::AppError;
///
/// let error = AppError::Config("Missing data directory".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing data directory");
/// ```
///
/// Converting from an IO error:
/// ```
/// use echo_journal::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors in journal logic (invalid dates, unknown cards, missing entries,
    /// unreadable journal files).
    #[error("Journal logic error: {0}")]
    Journal(String),

    /// Errors related to locking the journal file.
    #[error("File locking error: {0}")]
    Lock(#[from] LockError),

    /// Errors related to generative AI calls.
    #[error("AI error: {0}")]
    AI(#[from] AIError),

    /// Errors related to the hosted card store.
    #[error("Card store error: {0}")]
    Store(#[from] StoreError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use echo_journal::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Journal("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
