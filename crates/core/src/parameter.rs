// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test-case parameters.
//!
//! A parameter is a (name, value) pair; the remote service groups all values
//! of one name under a shared parameter-key id, which mention markup embeds.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder value substituted for empty or whitespace-only parameter values
/// before matching and creation.
pub const EMPTY_PARAMETER_VALUE: &str = "N/A";

/// A parameter as it appears in a test-case iteration of the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

impl Parameter {
    /// Returns the value with empty/whitespace-only input normalized to
    /// [`EMPTY_PARAMETER_VALUE`].
    pub fn normalized_value(&self) -> &str {
        if self.value.trim().is_empty() {
            EMPTY_PARAMETER_VALUE
        } else {
            &self.value
        }
    }
}

/// A parameter as it exists in the destination service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteParameter {
    /// Identifier of this concrete (name, value) pair.
    pub id: Uuid,
    /// Identifier of the name-level grouping key shared by all values.
    pub key_id: Uuid,
    pub name: String,
    pub value: String,
}

#[cfg(test)]
#[path = "parameter_tests.rs"]
mod tests;
