// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for attribute value conversion.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::HashMap;

use cp_core::{AttributeType, AttributeValue, RemoteAttribute};
use serde_json::{json, Value};
use uuid::Uuid;

use super::convert_attribute_values;
use super::values::UUID_VALUE_PREFIX;
use crate::test_helpers::{remote_attribute, MockRemote};

fn map_of(attrs: &[(Uuid, RemoteAttribute)]) -> HashMap<Uuid, RemoteAttribute> {
    attrs.iter().cloned().collect()
}

fn assignment(id: Uuid, value: Value) -> AttributeValue {
    AttributeValue { id, value }
}

#[tokio::test]
async fn options_value_maps_to_the_option_id() {
    let remote = MockRemote::new();
    let attr = remote_attribute("Browser", AttributeType::Options, &["Chrome", "Firefox"]);
    let chrome = attr.option_id("Chrome").unwrap();
    let source_id = Uuid::new_v4();
    let mut map = map_of(&[(source_id, attr)]);

    let out = convert_attribute_values(&remote, &mut map, &[assignment(source_id, json!("Chrome"))])
        .await
        .unwrap();

    assert_eq!(out[&map[&source_id].id], json!(chrome.to_string()));
}

#[tokio::test]
async fn unmatched_options_value_submits_empty() {
    let remote = MockRemote::new();
    let attr = remote_attribute("Browser", AttributeType::Options, &["Chrome"]);
    let source_id = Uuid::new_v4();
    let mut map = map_of(&[(source_id, attr)]);

    let out = convert_attribute_values(&remote, &mut map, &[assignment(source_id, json!("Opera"))])
        .await
        .unwrap();

    assert_eq!(out[&map[&source_id].id], json!(""));
}

#[tokio::test]
async fn multiple_options_appends_unmatched_values_remotely() {
    let remote = MockRemote::new();
    let attr = remote_attribute("Labels", AttributeType::MultipleOptions, &["smoke"]);
    remote.seed_attribute(attr.clone());
    let source_id = Uuid::new_v4();
    let mut map = map_of(&[(source_id, attr)]);

    let out = convert_attribute_values(
        &remote,
        &mut map,
        &[assignment(source_id, json!(["smoke", "nightly"]))],
    )
    .await
    .unwrap();

    // The map entry was refetched and now covers the appended option.
    let refreshed = &map[&source_id];
    assert!(refreshed.option_id("nightly").is_some());

    let ids = out[&refreshed.id].as_array().unwrap();
    assert_eq!(ids.len(), 2);
}

#[tokio::test]
async fn checkbox_values_parse_to_booleans() {
    let remote = MockRemote::new();
    let attr = remote_attribute("Automated", AttributeType::Checkbox, &[]);
    let source_id = Uuid::new_v4();
    let mut map = map_of(&[(source_id, attr)]);

    let out = convert_attribute_values(
        &remote,
        &mut map,
        &[assignment(source_id, json!("True"))],
    )
    .await
    .unwrap();

    assert_eq!(out[&map[&source_id].id], json!(true));
}

#[tokio::test]
async fn uuid_shaped_text_is_tagged_and_left_unresolved() {
    let remote = MockRemote::new();
    let attr = remote_attribute("Assignee", AttributeType::User, &[]);
    let source_id = Uuid::new_v4();
    let mut map = map_of(&[(source_id, attr)]);
    let user = Uuid::new_v4();

    let out = convert_attribute_values(
        &remote,
        &mut map,
        &[assignment(source_id, json!(user.to_string()))],
    )
    .await
    .unwrap();

    assert_eq!(
        out[&map[&source_id].id],
        json!(format!("{UUID_VALUE_PREFIX}{user}"))
    );
}

#[tokio::test]
async fn plain_text_passes_through() {
    let remote = MockRemote::new();
    let attr = remote_attribute("Owner", AttributeType::String, &[]);
    let source_id = Uuid::new_v4();
    let mut map = map_of(&[(source_id, attr)]);

    let out = convert_attribute_values(
        &remote,
        &mut map,
        &[assignment(source_id, json!("Alice"))],
    )
    .await
    .unwrap();

    assert_eq!(out[&map[&source_id].id], json!("Alice"));
}

#[tokio::test]
async fn null_and_empty_values_are_dropped() {
    let remote = MockRemote::new();
    let attr = remote_attribute("Owner", AttributeType::String, &[]);
    let source_id = Uuid::new_v4();
    let mut map = map_of(&[(source_id, attr)]);

    let out = convert_attribute_values(
        &remote,
        &mut map,
        &[
            assignment(source_id, Value::Null),
            assignment(source_id, json!("")),
        ],
    )
    .await
    .unwrap();

    assert!(out.is_empty());
}

#[tokio::test]
async fn duplicate_ids_keep_the_first_non_empty_value() {
    let remote = MockRemote::new();
    let attr = remote_attribute("Owner", AttributeType::String, &[]);
    let source_id = Uuid::new_v4();
    let mut map = map_of(&[(source_id, attr)]);

    let out = convert_attribute_values(
        &remote,
        &mut map,
        &[
            assignment(source_id, json!("")),
            assignment(source_id, json!("Alice")),
            assignment(source_id, json!("Bob")),
        ],
    )
    .await
    .unwrap();

    assert_eq!(out[&map[&source_id].id], json!("Alice"));
}

#[tokio::test]
async fn values_for_unmapped_attributes_are_skipped() {
    let remote = MockRemote::new();
    let mut map = HashMap::new();

    let out = convert_attribute_values(
        &remote,
        &mut map,
        &[assignment(Uuid::new_v4(), json!("orphan"))],
    )
    .await
    .unwrap();

    assert!(out.is_empty());
}
