//! Run transcript logging.
//!
//! A [`Session`] is a scoped handle on the dated transcript file for one
//! run. It appends when a log for the date already exists, mirrors lines
//! to stderr when stderr is a terminal, and flushes on `Drop` so every
//! exit path (success, error, abort) releases the log exactly once.

use std::fs::{self, File, OpenOptions};
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::core::error::{Error, Result};

#[derive(Debug)]
pub struct Session {
    file: File,
    path: PathBuf,
}

impl Session {
    /// Open (creating the log directory if needed) today's transcript in
    /// append mode. Failure to create the directory or the file is fatal.
    pub fn open(log_dir: &Path) -> Result<Session> {
        fs::create_dir_all(log_dir).map_err(|e| {
            Error::Config(format!(
                "Failed to create log directory {}: {}",
                log_dir.display(),
                e
            ))
        })?;

        let path = log_dir.join(format!(
            "bastion-weekly-{}.log",
            Local::now().format("%Y-%m-%d")
        ));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                Error::Config(format!("Failed to open log file {}: {}", path.display(), e))
            })?;

        Ok(Session { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a timestamped line to the transcript. Mirrored to stderr
    /// when stderr is a terminal. Write failures after open are swallowed.
    pub fn line(&mut self, message: &str) {
        let stamped = format!("[{}] {}", Local::now().format("%Y-%m-%d %H:%M:%S"), message);
        let _ = writeln!(self.file, "{}", stamped);
        if std::io::stderr().is_terminal() {
            eprintln!("{}", stamped);
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = self.file.flush();
    }
}
