// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Custom attribute types for imported work items.
//!
//! Source attributes come out of the export manifest; remote attributes mirror
//! what the destination service holds. The reconciliation pass matches the two
//! by (name, type) and records the resolved remote record per source id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Value shape of a custom attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeType {
    /// Free-form text.
    String,
    /// Single choice from a fixed option list.
    Options,
    /// Multiple choices from a fixed option list.
    MultipleOptions,
    /// Boolean flag.
    Checkbox,
    /// Reference to a service user.
    User,
    /// Date and time value.
    Datetime,
}

impl AttributeType {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Options => "options",
            AttributeType::MultipleOptions => "multipleOptions",
            AttributeType::Checkbox => "checkbox",
            AttributeType::User => "user",
            AttributeType::Datetime => "datetime",
        }
    }

    /// Returns true for types backed by a fixed option list.
    pub fn has_options(&self) -> bool {
        matches!(self, AttributeType::Options | AttributeType::MultipleOptions)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AttributeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "string" => Ok(AttributeType::String),
            "options" => Ok(AttributeType::Options),
            "multipleOptions" => Ok(AttributeType::MultipleOptions),
            "checkbox" => Ok(AttributeType::Checkbox),
            "user" => Ok(AttributeType::User),
            "datetime" => Ok(AttributeType::Datetime),
            _ => Err(Error::InvalidAttributeType(s.to_string())),
        }
    }
}

/// A custom attribute as declared in the export manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    /// Source-side identifier, used as the key of the reconciliation map.
    pub id: Uuid,
    /// Display name. May be renamed during reconciliation on type collisions.
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    /// Whether the source project required a value for this attribute.
    pub is_required: bool,
    pub is_active: bool,
    /// Option values for option-backed types; empty otherwise.
    #[serde(default)]
    pub options: Vec<String>,
}

/// One option value of a remote option-backed attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteOption {
    pub id: Uuid,
    pub value: String,
}

/// A custom attribute as it exists in the destination service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAttribute {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    pub is_enabled: bool,
    pub is_required: bool,
    /// Global attributes are shared across projects and attached per project.
    pub is_global: bool,
    #[serde(default)]
    pub options: Vec<RemoteOption>,
}

impl RemoteAttribute {
    /// Looks up an option id by exact value match.
    pub fn option_id(&self, value: &str) -> Option<Uuid> {
        self.options.iter().find(|o| o.value == value).map(|o| o.id)
    }
}

#[cfg(test)]
#[path = "attribute_tests.rs"]
mod tests;
