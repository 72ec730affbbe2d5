// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for configuration loading and validation.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use clap::Parser;
use std::fs;
use tempfile::tempdir;

use super::Config;
use crate::cli::Cli;
use crate::error::Error;

fn write_config(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("caseport.toml");
    fs::write(&path, contents).unwrap();
    path
}

fn valid_toml(export_dir: &std::path::Path) -> String {
    format!(
        r#"
[remote]
url = "https://testhub.example.com"
token = "secret"

[source]
export_dir = "{}"
"#,
        export_dir.display()
    )
}

#[test]
fn loads_a_valid_config() {
    let dir = tempdir().unwrap();
    let path = write_config(&dir, &valid_toml(dir.path()));

    let config = Config::load(&path).unwrap();
    assert_eq!(config.remote.url, "https://testhub.example.com");
    assert_eq!(config.remote.token, "secret");
    assert!(config.remote.project_name.is_none());
    assert!(!config.remote.use_existing_project);
    config.validate().unwrap();
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempdir().unwrap();
    let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn unparseable_file_is_a_config_error() {
    let dir = tempdir().unwrap();
    let path = write_config(&dir, "this is not toml [");
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn validate_rejects_non_http_url() {
    let dir = tempdir().unwrap();
    let path = write_config(
        &dir,
        &valid_toml(dir.path()).replace("https://testhub.example.com", "ftp://testhub"),
    );
    let config = Config::load(&path).unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("http"));
}

#[test]
fn validate_rejects_empty_token() {
    let dir = tempdir().unwrap();
    let path = write_config(&dir, &valid_toml(dir.path()).replace("secret", "  "));
    let config = Config::load(&path).unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("token"));
}

#[test]
fn validate_rejects_missing_export_dir() {
    let dir = tempdir().unwrap();
    let path = write_config(&dir, &valid_toml(&dir.path().join("absent")));
    let config = Config::load(&path).unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("export directory"));
}

#[test]
fn cli_flags_override_file_values() {
    let dir = tempdir().unwrap();
    let path = write_config(&dir, &valid_toml(dir.path()));
    let mut config = Config::load(&path).unwrap();

    let cli = Cli::parse_from([
        "caseport",
        "--url",
        "https://other.example.com",
        "--token",
        "override",
        "--project-name",
        "Renamed",
        "--use-existing-project",
    ]);
    config.apply_overrides(&cli);

    assert_eq!(config.remote.url, "https://other.example.com");
    assert_eq!(config.remote.token, "override");
    assert_eq!(config.remote.project_name.as_deref(), Some("Renamed"));
    assert!(config.remote.use_existing_project);
}

#[test]
fn absent_cli_flags_keep_file_values() {
    let dir = tempdir().unwrap();
    let path = write_config(&dir, &valid_toml(dir.path()));
    let mut config = Config::load(&path).unwrap();

    let cli = Cli::parse_from(["caseport"]);
    config.apply_overrides(&cli);

    assert_eq!(config.remote.url, "https://testhub.example.com");
    assert_eq!(config.remote.token, "secret");
    assert!(!config.remote.use_existing_project);
}
