// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Section tree of a test-case repository.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::workitem::Step;

/// An organizational folder node in the test-case repository.
///
/// Sections form a tree; the parent owns its children. During replication each
/// source section maps 1:1 to a newly created remote section, and the mapping
/// lives only for the duration of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: Uuid,
    pub name: String,
    /// Steps executed before any test case in this section.
    #[serde(default)]
    pub precondition_steps: Vec<Step>,
    /// Steps executed after all test cases in this section.
    #[serde(default)]
    pub postcondition_steps: Vec<Step>,
    /// Child sections in source order.
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Section {
    /// Counts this section and all of its descendants.
    pub fn subtree_len(&self) -> usize {
        1 + self.sections.iter().map(Section::subtree_len).sum::<usize>()
    }
}

#[cfg(test)]
#[path = "section_tests.rs"]
mod tests;
