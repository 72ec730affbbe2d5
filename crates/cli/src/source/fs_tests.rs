// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the filesystem export reader.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::fs;
use tempfile::tempdir;
use uuid::Uuid;

use super::api::{ExportSource, SourceError};
use super::fs::FsExportSource;

const MANIFEST: &str = r#"{
    "name": "Web Shop",
    "sections": [],
    "attributes": [],
    "sharedStepIds": [],
    "testCaseIds": []
}"#;

fn test_case_json(id: Uuid) -> String {
    format!(
        r#"{{
            "id": "{id}",
            "name": "Login works",
            "sectionId": "7e9ae91b-9747-4bb1-8d51-4f1cbfd08c9c",
            "state": "ready",
            "priority": "medium"
        }}"#
    )
}

#[tokio::test]
async fn reads_the_manifest() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("project.json"), MANIFEST).unwrap();

    let source = FsExportSource::new(dir.path());
    let manifest = source.read_manifest().await.unwrap();
    assert_eq!(manifest.name, "Web Shop");
}

#[tokio::test]
async fn missing_manifest_is_an_error() {
    let dir = tempdir().unwrap();
    let source = FsExportSource::new(dir.path());
    let err = source.read_manifest().await.unwrap_err();
    assert!(matches!(err, SourceError::Missing { .. }));
}

#[tokio::test]
async fn empty_manifest_is_an_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("project.json"), "").unwrap();
    let source = FsExportSource::new(dir.path());
    let err = source.read_manifest().await.unwrap_err();
    assert!(matches!(err, SourceError::Empty { .. }));
}

#[tokio::test]
async fn unparseable_manifest_is_an_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("project.json"), "{ truncated").unwrap();
    let source = FsExportSource::new(dir.path());
    let err = source.read_manifest().await.unwrap_err();
    assert!(matches!(err, SourceError::Json { .. }));
}

#[tokio::test]
async fn reads_a_test_case_document() {
    let dir = tempdir().unwrap();
    let id = Uuid::new_v4();
    let workitems = dir.path().join("workitems");
    fs::create_dir_all(&workitems).unwrap();
    fs::write(workitems.join(format!("{id}.json")), test_case_json(id)).unwrap();

    let source = FsExportSource::new(dir.path());
    let case = source.read_test_case(id).await.unwrap();
    assert_eq!(case.id, id);
    assert_eq!(case.name, "Login works");
}

#[tokio::test]
async fn missing_work_item_is_an_error() {
    let dir = tempdir().unwrap();
    let source = FsExportSource::new(dir.path());
    let err = source.read_shared_step(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, SourceError::Missing { .. }));
}

#[tokio::test]
async fn reads_an_attachment_payload() {
    let dir = tempdir().unwrap();
    let owner = Uuid::new_v4();
    let folder = dir.path().join("attachments").join(owner.to_string());
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join("shot.png"), b"\x89PNG...").unwrap();

    let source = FsExportSource::new(dir.path());
    let bytes = source.read_attachment(owner, "shot.png").await.unwrap();
    assert_eq!(bytes, b"\x89PNG...");
}

#[tokio::test]
async fn missing_attachment_is_an_error() {
    let dir = tempdir().unwrap();
    let source = FsExportSource::new(dir.path());
    let err = source
        .read_attachment(Uuid::new_v4(), "gone.png")
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::Missing { .. }));
}
