// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level export manifest.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attribute::Attribute;
use crate::section::Section;

/// The project manifest at the root of an export.
///
/// Work items are listed by id only; each shared step and test case lives in
/// its own document and is read on demand during the import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectManifest {
    /// Project name, used for remote lookup unless overridden by config.
    pub name: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub shared_step_ids: Vec<Uuid>,
    #[serde(default)]
    pub test_case_ids: Vec<Uuid>,
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
