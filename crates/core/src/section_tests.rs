// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the section tree.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::Section;

#[test]
fn section_tree_deserializes_nested_children_in_order() {
    let section: Section = serde_json::from_str(
        r#"{
            "id": "7e9ae91b-9747-4bb1-8d51-4f1cbfd08c9c",
            "name": "Regression",
            "preconditionSteps": [{"action": "log in"}],
            "sections": [
                {"id": "3f3a1c9d-5b0e-4d0a-9c6f-2b9f18c3a111", "name": "Login"},
                {"id": "d0a1b2c3-d4e5-4f60-8172-93a4b5c6d7e8", "name": "Search"}
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(section.name, "Regression");
    assert_eq!(section.precondition_steps.len(), 1);
    assert!(section.postcondition_steps.is_empty());
    let children: Vec<&str> = section.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(children, vec!["Login", "Search"]);
}

#[test]
fn subtree_len_counts_all_descendants() {
    let section: Section = serde_json::from_str(
        r#"{
            "id": "7e9ae91b-9747-4bb1-8d51-4f1cbfd08c9c",
            "name": "root",
            "sections": [
                {
                    "id": "3f3a1c9d-5b0e-4d0a-9c6f-2b9f18c3a111",
                    "name": "a",
                    "sections": [
                        {"id": "d0a1b2c3-d4e5-4f60-8172-93a4b5c6d7e8", "name": "a1"}
                    ]
                },
                {"id": "a81b2c3d-4e5f-4a6b-8c7d-0e1f2a3b4c5d", "name": "b"}
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(section.subtree_len(), 4);
}
