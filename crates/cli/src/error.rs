// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;
use uuid::Uuid;

use crate::client::ClientError;
use crate::source::SourceError;

/// All possible errors that can occur in the cprs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("project '{0}' already exists on the remote\n  hint: set use_existing_project = true to import into it")]
    ProjectExists(String),

    #[error("work item references unknown section {0}\n  hint: the export manifest does not declare this section")]
    UnmappedSection(Uuid),

    #[error("remote service error: {0}")]
    Client(#[from] ClientError),

    #[error("export source error: {0}")]
    Source(#[from] SourceError),
}

/// A specialized Result type for cprs operations.
pub type Result<T> = std::result::Result<T, Error>;
