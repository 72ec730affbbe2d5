// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Work items of the export: shared steps and test cases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::parameter::Parameter;

/// Lifecycle state of a work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkItemState {
    NotReady,
    Ready,
    NeedsWork,
}

impl WorkItemState {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkItemState::NotReady => "notReady",
            WorkItemState::Ready => "ready",
            WorkItemState::NeedsWork => "needsWork",
        }
    }
}

impl fmt::Display for WorkItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkItemState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "notReady" => Ok(WorkItemState::NotReady),
            "ready" => Ok(WorkItemState::Ready),
            "needsWork" => Ok(WorkItemState::NeedsWork),
            _ => Err(Error::InvalidState(s.to_string())),
        }
    }
}

/// Priority of a work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Priority {
    Lowest,
    Low,
    Medium,
    High,
    Highest,
}

impl Priority {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Lowest => "lowest",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Highest => "highest",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lowest" => Ok(Priority::Lowest),
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "highest" => Ok(Priority::Highest),
            _ => Err(Error::InvalidPriority(s.to_string())),
        }
    }
}

/// One step of a work item.
///
/// The text fields are rich-text fragments that may embed `<<<filename>>>`
/// attachment placeholders; `attachments` lists filenames that belong to this
/// step whether or not a placeholder references them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub expected: String,
    #[serde(default)]
    pub test_data: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    /// Reference to a shared step replacing this step's own content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_step_id: Option<Uuid>,
}

impl Step {
    /// Creates a plain text step with empty expected/test-data fields.
    pub fn action(action: impl Into<String>) -> Self {
        Step {
            action: action.into(),
            expected: String::new(),
            test_data: String::new(),
            attachments: Vec::new(),
            shared_step_id: None,
        }
    }
}

/// An external link attached to a work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// One attribute-value assignment on a work item, keyed by source attribute id.
///
/// Kept as a list rather than a map: exports can carry duplicate ids, and the
/// conversion pass keeps the first non-empty value per id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeValue {
    pub id: Uuid,
    pub value: serde_json::Value,
}

/// A reusable named step sequence referenced by test cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedStep {
    pub id: Uuid,
    pub name: String,
    /// Section this shared step lives in, as a source section id.
    pub section_id: Uuid,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub attributes: Vec<AttributeValue>,
    pub state: WorkItemState,
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub links: Vec<Link>,
    /// Item-level attachment filenames not tied to a particular step.
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
}

/// One parameter-bound repetition of a test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Iteration {
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

/// A test case from the export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: Uuid,
    pub name: String,
    /// Section this test case lives in, as a source section id.
    pub section_id: Uuid,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub precondition_steps: Vec<Step>,
    #[serde(default)]
    pub postcondition_steps: Vec<Step>,
    #[serde(default)]
    pub attributes: Vec<AttributeValue>,
    pub state: WorkItemState,
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub iterations: Vec<Iteration>,
    /// Expected duration in milliseconds; zero means "not set".
    #[serde(default)]
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[path = "workitem_tests.rs"]
mod tests;
