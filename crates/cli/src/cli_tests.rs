// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for command-line parsing.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use clap::Parser;
use std::path::PathBuf;

use super::Cli;

#[test]
fn defaults_are_sensible() {
    let cli = Cli::parse_from(["caseport"]);
    assert_eq!(cli.config, PathBuf::from("caseport.toml"));
    assert!(cli.export_dir.is_none());
    assert!(cli.url.is_none());
    assert!(cli.token.is_none());
    assert!(cli.project_name.is_none());
    assert!(!cli.use_existing_project);
    assert!(!cli.verbose);
}

#[test]
fn all_flags_parse() {
    let cli = Cli::parse_from([
        "caseport",
        "--config",
        "other.toml",
        "--export-dir",
        "/tmp/export",
        "--url",
        "https://hub.example.com",
        "--token",
        "t0k3n",
        "--project-name",
        "P",
        "--use-existing-project",
        "--verbose",
    ]);
    assert_eq!(cli.config, PathBuf::from("other.toml"));
    assert_eq!(cli.export_dir, Some(PathBuf::from("/tmp/export")));
    assert_eq!(cli.url.as_deref(), Some("https://hub.example.com"));
    assert_eq!(cli.token.as_deref(), Some("t0k3n"));
    assert_eq!(cli.project_name.as_deref(), Some("P"));
    assert!(cli.use_existing_project);
    assert!(cli.verbose);
}

#[test]
fn short_flags_parse() {
    let cli = Cli::parse_from(["caseport", "-c", "x.toml", "-v"]);
    assert_eq!(cli.config, PathBuf::from("x.toml"));
    assert!(cli.verbose);
}
