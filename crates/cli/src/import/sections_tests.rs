// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for section-tree replication.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::HashSet;

use cp_core::{Section, Step};
use uuid::Uuid;

use super::replicate_sections;
use crate::test_helpers::{section, MockRemote};

fn three_level_tree() -> Vec<Section> {
    let mut a = section("a");
    let mut a1 = section("a1");
    a1.sections.push(section("a1x"));
    a.sections.push(a1);
    a.sections.push(section("a2"));
    let b = section("b");
    vec![a, b]
}

#[tokio::test]
async fn mapping_is_a_bijection_over_a_nested_tree() {
    let remote = MockRemote::new();
    let project_id = remote.seed_project("P");
    let tree = three_level_tree();

    let map = replicate_sections(&remote, project_id, &tree).await.unwrap();

    assert_eq!(map.len(), 5);
    let new_ids: HashSet<Uuid> = map.values().copied().collect();
    assert_eq!(new_ids.len(), 5, "new ids must be distinct");

    let source_ids: Vec<Uuid> = collect_ids(&tree);
    for id in source_ids {
        assert!(map.contains_key(&id));
    }
}

fn collect_ids(sections: &[Section]) -> Vec<Uuid> {
    let mut ids = Vec::new();
    for s in sections {
        ids.push(s.id);
        ids.extend(collect_ids(&s.sections));
    }
    ids
}

#[tokio::test]
async fn children_are_created_under_their_parents_new_id() {
    let remote = MockRemote::new();
    let project_id = remote.seed_project("P");
    let root = {
        let state = remote.state.lock().unwrap();
        state.root_sections[&project_id]
    };
    let tree = three_level_tree();

    let map = replicate_sections(&remote, project_id, &tree).await.unwrap();

    let created = remote.sections();
    // Pre-order: a, a1, a1x, a2, b.
    let names: Vec<&str> = created.iter().map(|s| s.request.name.as_str()).collect();
    assert_eq!(names, vec!["a", "a1", "a1x", "a2", "b"]);

    let by_name = |name: &str| created.iter().find(|s| s.request.name == name).unwrap();
    assert_eq!(by_name("a").parent_id, root);
    assert_eq!(by_name("b").parent_id, root);
    assert_eq!(by_name("a1").parent_id, by_name("a").id);
    assert_eq!(by_name("a2").parent_id, by_name("a").id);
    assert_eq!(by_name("a1x").parent_id, by_name("a1").id);

    assert_eq!(map[&tree[0].id], by_name("a").id);
}

#[tokio::test]
async fn precondition_and_postcondition_steps_are_converted() {
    let remote = MockRemote::new();
    let project_id = remote.seed_project("P");
    let mut s = section("setup");
    s.precondition_steps.push(Step::action("start the server"));
    s.postcondition_steps.push(Step::action("stop the server"));

    replicate_sections(&remote, project_id, &[s]).await.unwrap();

    let created = remote.sections();
    assert_eq!(created[0].request.precondition_steps.len(), 1);
    assert_eq!(created[0].request.precondition_steps[0].action, "start the server");
    assert_eq!(created[0].request.postcondition_steps[0].action, "stop the server");
}
