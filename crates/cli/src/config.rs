// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Import configuration.
//!
//! Configuration is stored in `caseport.toml` and covers the two external
//! collaborators: where the export lives on disk and how to reach the remote
//! service. Command-line flags override file values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::{Error, Result};

/// Import configuration stored in `caseport.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub remote: RemoteConfig,
    pub source: SourceConfig,
}

/// Remote service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the remote service, e.g. `https://testhub.example.com`.
    pub url: String,
    /// API token sent as a bearer credential.
    pub token: String,
    /// Fixed project name, overriding the name in the export manifest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// Import into a pre-existing project of the same name instead of
    /// treating the collision as fatal.
    #[serde(default)]
    pub use_existing_project: bool,
}

/// Export source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Directory holding the export: `project.json`, work item documents and
    /// attachment payloads.
    pub export_dir: PathBuf,
}

impl Config {
    /// Loads and validates configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config> {
        let raw = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Config = toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("cannot parse {}: {e}", path.display())))?;
        Ok(config)
    }

    /// Applies command-line overrides on top of the file values.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.export_dir {
            self.source.export_dir = dir.clone();
        }
        if let Some(url) = &cli.url {
            self.remote.url = url.clone();
        }
        if let Some(token) = &cli.token {
            self.remote.token = token.clone();
        }
        if let Some(name) = &cli.project_name {
            self.remote.project_name = Some(name.clone());
        }
        if cli.use_existing_project {
            self.remote.use_existing_project = true;
        }
    }

    /// Validates the effective configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.remote.url.starts_with("http://") && !self.remote.url.starts_with("https://") {
            return Err(Error::Config(format!(
                "remote url '{}' must start with http:// or https://",
                self.remote.url
            )));
        }
        if self.remote.token.trim().is_empty() {
            return Err(Error::Config("remote token is empty".to_string()));
        }
        if !self.source.export_dir.is_dir() {
            return Err(Error::Config(format!(
                "export directory {} does not exist",
                self.source.export_dir.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
