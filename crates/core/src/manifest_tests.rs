// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the export manifest.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::ProjectManifest;

#[test]
fn manifest_deserializes_from_export_json() {
    let manifest: ProjectManifest = serde_json::from_str(
        r#"{
            "name": "Web Shop",
            "sections": [
                {"id": "7e9ae91b-9747-4bb1-8d51-4f1cbfd08c9c", "name": "Checkout"}
            ],
            "attributes": [
                {
                    "id": "07f65e19-9e36-45f3-a9be-f2a90e64e394",
                    "name": "Owner",
                    "type": "string",
                    "isRequired": false,
                    "isActive": true
                }
            ],
            "sharedStepIds": ["f7f3b52f-0a10-4b5c-8d5e-6a7b8c9d0e1f"],
            "testCaseIds": ["9dd439d8-22b6-4b41-a45c-9b2e4f1c5f4a"]
        }"#,
    )
    .unwrap();

    assert_eq!(manifest.name, "Web Shop");
    assert_eq!(manifest.sections.len(), 1);
    assert_eq!(manifest.attributes.len(), 1);
    assert_eq!(manifest.shared_step_ids.len(), 1);
    assert_eq!(manifest.test_case_ids.len(), 1);
}

#[test]
fn manifest_tolerates_missing_lists() {
    let manifest: ProjectManifest = serde_json::from_str(r#"{"name": "Empty"}"#).unwrap();
    assert!(manifest.sections.is_empty());
    assert!(manifest.attributes.is_empty());
    assert!(manifest.shared_step_ids.is_empty());
    assert!(manifest.test_case_ids.is_empty());
}
