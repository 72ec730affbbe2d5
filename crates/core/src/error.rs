// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for cp-core operations.

use thiserror::Error;

/// All possible errors that can occur in cp-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid attribute type: '{0}'\n  hint: valid types are: string, options, multipleOptions, checkbox, user, datetime")]
    InvalidAttributeType(String),

    #[error("invalid work item state: '{0}'\n  hint: valid states are: notReady, ready, needsWork")]
    InvalidState(String),

    #[error("invalid priority: '{0}'\n  hint: valid priorities are: lowest, low, medium, high, highest")]
    InvalidPriority(String),
}

/// A specialized Result type for cp-core operations.
pub type Result<T> = std::result::Result<T, Error>;
