// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line interface definition.

use clap::Parser;
use std::path::PathBuf;

/// caseport: Import a test-management project export into a remote service
#[derive(Parser, Debug)]
#[command(name = "caseport")]
#[command(about = "Import a test-management project export into a remote test-management service")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "caseport.toml")]
    pub config: PathBuf,

    /// Export directory (overrides the config file)
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Remote service URL (overrides the config file)
    #[arg(long)]
    pub url: Option<String>,

    /// Remote service API token (overrides the config file)
    #[arg(long)]
    pub token: Option<String>,

    /// Remote project name (overrides the manifest name)
    #[arg(long)]
    pub project_name: Option<String>,

    /// Import into an existing remote project instead of failing on collision
    #[arg(long)]
    pub use_existing_project: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
