// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dedicated failure log for test-case imports.
//!
//! Failed test cases are recorded with their full error chain in a per-run
//! timestamped file, independent of the main log stream. The file is created
//! lazily so clean runs leave nothing behind.

use chrono::Utc;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::Error;

/// Per-run failure log, created on first record.
pub struct FailureLog {
    path: PathBuf,
    file: Option<File>,
}

impl FailureLog {
    /// Prepares a log file path inside `dir`; nothing is written yet.
    pub fn new(dir: &Path) -> Self {
        let stamp = Utc::now().format("%Y%m%d-%H%M%S");
        FailureLog {
            path: dir.join(format!("caseport-failures-{stamp}.log")),
            file: None,
        }
    }

    /// Records one failed test case with its full error chain.
    pub fn record(&mut self, name: &str, id: Uuid, error: &Error) -> std::io::Result<()> {
        if self.file.is_none() {
            self.file = Some(File::create(&self.path)?);
        }
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };
        writeln!(
            file,
            "[{}] test case '{name}' ({id}) was not imported",
            Utc::now().to_rfc3339()
        )?;
        writeln!(file, "  {error}")?;
        let mut source = std::error::Error::source(error);
        while let Some(cause) = source {
            writeln!(file, "  caused by: {cause}")?;
            source = cause.source();
        }
        file.flush()
    }

    /// Where the log is (or would be) written.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True once at least one failure has been recorded.
    pub fn is_created(&self) -> bool {
        self.file.is_some()
    }
}

#[cfg(test)]
#[path = "faillog_tests.rs"]
mod tests;
