//! Journal persistence and file management.
//!
//! This module owns everything that touches the data directory: creating it
//! with private permissions, the advisory lock that serializes commands, and
//! loading and atomically saving `journal.json`.

use crate::constants::{JOURNAL_FILE_NAME, JOURNAL_FORMAT_VERSION, JOURNAL_LOCK_FILE_NAME};
use crate::errors::{AppError, AppResult, LockError};
use crate::journal_core::{DayEntry, Journal};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Ensures the data directory exists, creating it if necessary.
///
/// # Errors
///
/// Returns:
/// - `AppError::Journal` if the provided path is not an absolute path
/// - `AppError::Io` if the directory creation fails due to permission issues,
///   invalid paths, or other filesystem errors
pub fn ensure_data_directory_exists(data_dir: &Path) -> AppResult<()> {
    if !data_dir.is_absolute() {
        return Err(AppError::Journal(format!(
            "Data directory path must be absolute: {}",
            data_dir.display()
        )));
    }

    if !data_dir.exists() {
        fs::create_dir_all(data_dir).map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create data directory: {}", e),
            ))
        })?;

        #[cfg(unix)]
        {
            use crate::constants::DEFAULT_DIR_PERMISSIONS;
            let permissions = fs::Permissions::from_mode(DEFAULT_DIR_PERMISSIONS);
            fs::set_permissions(data_dir, permissions).map_err(|e| {
                AppError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to set secure permissions on data directory: {}", e),
                ))
            })?;
            debug!("Set 0o700 permissions on data directory");
        }
    }
    Ok(())
}

pub fn journal_path(data_dir: &Path) -> PathBuf {
    data_dir.join(JOURNAL_FILE_NAME)
}

pub fn lock_path(data_dir: &Path) -> PathBuf {
    data_dir.join(JOURNAL_LOCK_FILE_NAME)
}

/// Exclusive advisory lock on the journal, released on drop.
#[derive(Debug)]
pub struct JournalLock {
    file: File,
    path: PathBuf,
}

impl JournalLock {
    /// Takes the lock without waiting.
    ///
    /// # Errors
    ///
    /// - `LockError::FileBusy` when another process holds the lock
    /// - `LockError::AcquisitionFailed` when the lock file cannot be opened or locked
    pub fn acquire(data_dir: &Path) -> AppResult<Self> {
        let path = lock_path(data_dir);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|source| LockError::AcquisitionFailed {
                path: path.clone(),
                source,
            })?;

        if let Err(e) = file.try_lock_exclusive() {
            let contended = e.kind() == ErrorKind::WouldBlock
                || e.raw_os_error() == fs2::lock_contended_error().raw_os_error();
            return Err(if contended {
                LockError::FileBusy { path }
            } else {
                LockError::AcquisitionFailed { path, source: e }
            }
            .into());
        }

        debug!("Acquired journal lock {}", path.display());
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for JournalLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            debug!("Failed to release journal lock {}: {}", self.path.display(), e);
        }
    }
}

/// On-disk layout of `journal.json`.
#[derive(Debug, Serialize, Deserialize)]
struct JournalFile {
    version: u32,
    #[serde(default)]
    entries: Vec<DayEntry>,
}

/// Parses journal JSON text.
///
/// Two layouts are accepted: the versioned document, or a bare array of
/// entries as exported by the mobile app.
///
/// # Errors
///
/// Returns `AppError::Journal` if the text is not a journal document or its
/// version is newer than this build understands. The message names the
/// offending field when a record is malformed.
pub fn parse_journal(text: &str) -> AppResult<Journal> {
    let parse_error = |e: serde_json::Error| {
        AppError::Journal(format!("Failed to parse journal file: {}", e))
    };

    let document: Value = serde_json::from_str(text).map_err(parse_error)?;
    let entries: Vec<DayEntry> = if document.is_array() {
        serde_json::from_value(document).map_err(parse_error)?
    } else {
        let file: JournalFile = serde_json::from_value(document).map_err(parse_error)?;
        if file.version > JOURNAL_FORMAT_VERSION {
            return Err(AppError::Journal(format!(
                "Journal file version {} is newer than supported version {}",
                file.version, JOURNAL_FORMAT_VERSION
            )));
        }
        file.entries
    };

    Ok(Journal::from_entries(entries))
}

/// Loads the journal from the data directory.
///
/// A missing file is an empty journal.
pub fn load_journal(data_dir: &Path) -> AppResult<Journal> {
    let path = journal_path(data_dir);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No journal at {}, starting empty", path.display());
            return Ok(Journal::new());
        }
        Err(e) => {
            return Err(AppError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read journal file {}: {}", path.display(), e),
            )))
        }
    };

    let journal = parse_journal(&text)?;
    debug!("Loaded {} journal entries", journal.len());
    Ok(journal)
}

/// Writes the journal atomically.
///
/// The document is written to a temporary file in the same directory and
/// renamed over `journal.json`, so a crash leaves either the old or the new
/// file, never a partial one.
pub fn save_journal(data_dir: &Path, journal: &Journal) -> AppResult<()> {
    let path = journal_path(data_dir);
    let document = JournalFile {
        version: JOURNAL_FORMAT_VERSION,
        entries: journal.entries().to_vec(),
    };
    let json = serde_json::to_string_pretty(&document)
        .map_err(|e| AppError::Journal(format!("Failed to serialize journal: {}", e)))?;

    let mut temp = NamedTempFile::new_in(data_dir)?;
    temp.write_all(json.as_bytes())?;
    temp.write_all(b"\n")?;

    #[cfg(unix)]
    {
        use crate::constants::DEFAULT_FILE_PERMISSIONS;
        fs::set_permissions(
            temp.path(),
            fs::Permissions::from_mode(DEFAULT_FILE_PERMISSIONS),
        )?;
    }

    temp.as_file().sync_all()?;
    temp.persist(&path).map_err(|e| AppError::Io(e.error))?;

    info!("Saved {} journal entries", journal.len());
    Ok(())
}
