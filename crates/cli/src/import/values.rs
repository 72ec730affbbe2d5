// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Type-directed attribute value conversion.
//!
//! Each variant of [`AttributeType`] has one handler; the match is exhaustive
//! so a new type cannot slip through unconverted. Output is keyed by remote
//! attribute id, which also collapses duplicate source assignments: the first
//! non-empty value per id wins.

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use cp_core::{AttributeType, AttributeValue, RemoteAttribute, RemoteOption};

use crate::client::RemoteService;
use crate::error::Result;
use crate::retry::call_with_retry;

/// Prefix tagging values that are syntactically UUIDs but resolvable only by
/// the service (user references and the like).
pub const UUID_VALUE_PREFIX: &str = "uuid ";

/// Converts raw attribute assignments into submission values keyed by remote
/// attribute id.
///
/// Multiple-option conversion may append missing options remotely; the
/// refreshed attribute record replaces the map entry.
pub async fn convert_attribute_values(
    remote: &dyn RemoteService,
    attribute_map: &mut HashMap<Uuid, RemoteAttribute>,
    values: &[AttributeValue],
) -> Result<HashMap<Uuid, Value>> {
    let mut out = HashMap::new();

    for assignment in values {
        if is_empty_value(&assignment.value) {
            continue;
        }
        let Some(attribute) = attribute_map.get(&assignment.id).cloned() else {
            warn!(id = %assignment.id, "value for unmapped attribute, skipping");
            continue;
        };
        if out.contains_key(&attribute.id) {
            continue;
        }

        let converted = match attribute.attribute_type {
            AttributeType::Options => convert_options(&attribute, &assignment.value),
            AttributeType::MultipleOptions => {
                convert_multiple_options(remote, attribute_map, assignment.id, &assignment.value)
                    .await?
            }
            AttributeType::Checkbox => convert_checkbox(&attribute, &assignment.value),
            AttributeType::String | AttributeType::User | AttributeType::Datetime => {
                convert_text(&assignment.value)
            }
        };
        if let Some(value) = converted {
            out.insert(attribute.id, value);
        }
    }

    Ok(out)
}

/// Null, empty-string and empty-list values are dropped before submission.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Single choice: the raw text maps to the matching option's id; no match
/// submits an empty value.
fn convert_options(attribute: &RemoteAttribute, raw: &Value) -> Option<Value> {
    let text = raw_text(raw)?;
    let resolved = attribute
        .option_id(&text)
        .map(|id| id.to_string())
        .unwrap_or_default();
    Some(Value::String(resolved))
}

/// Multiple choice: unmatched non-empty entries are appended as new remote
/// options, the attribute refetched, and the fresh ids used.
async fn convert_multiple_options(
    remote: &dyn RemoteService,
    attribute_map: &mut HashMap<Uuid, RemoteAttribute>,
    source_id: Uuid,
    raw: &Value,
) -> Result<Option<Value>> {
    let entries = string_list(raw);
    if entries.is_empty() {
        return Ok(None);
    }
    let Some(mut attribute) = attribute_map.get(&source_id).cloned() else {
        return Ok(None);
    };

    let missing: Vec<String> = entries
        .iter()
        .filter(|value| !value.is_empty() && attribute.option_id(value).is_none())
        .cloned()
        .collect();
    if !missing.is_empty() {
        let mut updated = attribute.clone();
        updated
            .options
            .extend(missing.into_iter().map(|value| RemoteOption {
                id: Uuid::nil(),
                value,
            }));
        call_with_retry("update attribute", || {
            remote.update_attribute(updated.clone())
        })
        .await?;
        let fresh =
            call_with_retry("refresh attribute", || remote.get_attribute(attribute.id)).await?;
        attribute_map.insert(source_id, fresh.clone());
        attribute = fresh;
    }

    let ids: Vec<Value> = entries
        .iter()
        .filter_map(|value| attribute.option_id(value))
        .map(|id| Value::String(id.to_string()))
        .collect();
    Ok(Some(Value::Array(ids)))
}

fn convert_checkbox(attribute: &RemoteAttribute, raw: &Value) -> Option<Value> {
    match raw {
        Value::Bool(b) => Some(Value::Bool(*b)),
        Value::String(s) => match s.trim().to_lowercase().parse::<bool>() {
            Ok(b) => Some(Value::Bool(b)),
            Err(_) => {
                warn!(name = %attribute.name, value = %s, "unparseable checkbox value, skipping");
                None
            }
        },
        _ => None,
    }
}

/// Text-ish types: UUID-shaped values are tagged and left unresolved,
/// everything else passes through as text.
fn convert_text(raw: &Value) -> Option<Value> {
    let text = raw_text(raw)?;
    if Uuid::parse_str(&text).is_ok() {
        return Some(Value::String(format!("{UUID_VALUE_PREFIX}{text}")));
    }
    Some(Value::String(text))
}

fn raw_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}
