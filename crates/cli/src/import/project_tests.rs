// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for project resolution.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::resolve_project;
use crate::error::Error;
use crate::test_helpers::MockRemote;

#[tokio::test]
async fn creates_the_project_when_absent() {
    let remote = MockRemote::new();

    let id = resolve_project(&remote, "Web Shop", false).await.unwrap();

    let state = remote.state.lock().unwrap();
    assert_eq!(state.projects.len(), 1);
    assert_eq!(state.projects[0].id, id);
    assert_eq!(state.projects[0].name, "Web Shop");
}

#[tokio::test]
async fn reuses_an_existing_project_when_allowed() {
    let remote = MockRemote::new();
    let seeded = remote.seed_project("Web Shop");

    let id = resolve_project(&remote, "Web Shop", true).await.unwrap();

    assert_eq!(id, seeded);
    assert_eq!(remote.state.lock().unwrap().projects.len(), 1);
}

#[tokio::test]
async fn collision_is_fatal_when_reuse_is_disabled() {
    let remote = MockRemote::new();
    remote.seed_project("Web Shop");

    let err = resolve_project(&remote, "Web Shop", false)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ProjectExists(name) if name == "Web Shop"));
}
