// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the failure log.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::fs;
use tempfile::tempdir;
use uuid::Uuid;

use super::FailureLog;
use crate::error::Error;
use crate::source::SourceError;

fn chained_error() -> Error {
    let json_err = serde_json::from_str::<cp_core::ProjectManifest>("{ truncated").unwrap_err();
    Error::Source(SourceError::Json {
        path: "workitems/broken.json".into(),
        source: json_err,
    })
}

#[test]
fn nothing_is_written_until_the_first_record() {
    let dir = tempdir().unwrap();
    let log = FailureLog::new(dir.path());
    assert!(!log.is_created());
    assert!(!log.path().exists());
}

#[test]
fn records_carry_name_id_and_error_chain() {
    let dir = tempdir().unwrap();
    let mut log = FailureLog::new(dir.path());
    let id = Uuid::new_v4();

    log.record("Login works", id, &chained_error()).unwrap();
    assert!(log.is_created());

    let contents = fs::read_to_string(log.path()).unwrap();
    assert!(contents.contains("Login works"));
    assert!(contents.contains(&id.to_string()));
    assert!(contents.contains("workitems/broken.json"));
    assert!(contents.contains("caused by:"));
}

#[test]
fn multiple_records_append() {
    let dir = tempdir().unwrap();
    let mut log = FailureLog::new(dir.path());

    log.record("first", Uuid::new_v4(), &chained_error()).unwrap();
    log.record("second", Uuid::new_v4(), &chained_error()).unwrap();

    let contents = fs::read_to_string(log.path()).unwrap();
    assert!(contents.contains("first"));
    assert!(contents.contains("second"));
}

#[test]
fn file_name_is_timestamped() {
    let dir = tempdir().unwrap();
    let log = FailureLog::new(dir.path());
    let name = log.path().file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("caseport-failures-"));
    assert!(name.ends_with(".log"));
}
