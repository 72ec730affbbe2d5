// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Import pipeline.
//!
//! Phases run in strict program order, each consuming the id maps produced by
//! the phases before it:
//!
//! ```text
//! manifest ──► project id ──► section map ──► attribute map
//!                                                   │
//!                              shared-step map ◄────┘
//!                                    │
//!                              test-case results
//! ```
//!
//! The orchestrator owns every id-remap table for the run and passes them by
//! argument; a producing phase mutates its table exclusively and later phases
//! read it. A failing phase is fatal, except individual test cases: their
//! failures are recorded and returned instead.

mod attachments;
mod attributes;
mod parameters;
mod project;
mod sections;
mod shared_steps;
mod test_cases;
mod values;

pub use attachments::{rewrite_step_fields, upload_attachments};
pub use attributes::reconcile_attributes;
pub use parameters::find_or_create_parameter;
pub use project::resolve_project;
pub use sections::replicate_sections;
pub use shared_steps::import_shared_steps;
pub use test_cases::import_test_cases;
pub use values::convert_attribute_values;

use std::path::PathBuf;

use tracing::info;

use crate::client::RemoteService;
use crate::config::Config;
use crate::error::Result;
use crate::faillog::FailureLog;
use crate::source::ExportSource;

/// Duration submitted for work items whose export carries none.
pub const DEFAULT_DURATION_MS: u32 = 10_000;

/// Run-level options distilled from configuration.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Fixed project name overriding the manifest name.
    pub project_name: Option<String>,
    /// Import into a pre-existing project instead of failing.
    pub use_existing_project: bool,
    /// Directory receiving the per-run failure log.
    pub log_dir: PathBuf,
}

impl From<&Config> for ImportOptions {
    fn from(config: &Config) -> Self {
        ImportOptions {
            project_name: config.remote.project_name.clone(),
            use_existing_project: config.remote.use_existing_project,
            log_dir: PathBuf::from("."),
        }
    }
}

/// Outcome of one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub sections: usize,
    pub attributes: usize,
    pub shared_steps: usize,
    pub test_cases: usize,
    /// Names (or ids, when the document could not even be read) of test cases
    /// that were not imported.
    pub not_imported: Vec<String>,
}

/// Runs the whole import: resolve project, replicate sections, reconcile
/// attributes, import shared steps, then test cases.
pub async fn run_import(
    source: &dyn ExportSource,
    remote: &dyn RemoteService,
    options: &ImportOptions,
) -> Result<ImportReport> {
    let manifest = source.read_manifest().await?;
    let project_name = options
        .project_name
        .as_deref()
        .unwrap_or(&manifest.name);
    info!(project = project_name, "starting import");

    let project_id = resolve_project(remote, project_name, options.use_existing_project).await?;

    let section_map = replicate_sections(remote, project_id, &manifest.sections).await?;
    info!(count = section_map.len(), "sections replicated");

    let mut attribute_map = reconcile_attributes(remote, project_id, &manifest.attributes).await?;
    info!(count = attribute_map.len(), "attributes reconciled");

    let shared_step_map = import_shared_steps(
        source,
        remote,
        project_id,
        &section_map,
        &mut attribute_map,
        &manifest.shared_step_ids,
    )
    .await?;
    info!(count = shared_step_map.len(), "shared steps imported");

    let mut failure_log = FailureLog::new(&options.log_dir);
    let not_imported = import_test_cases(
        source,
        remote,
        project_id,
        &section_map,
        &mut attribute_map,
        &shared_step_map,
        &manifest.test_case_ids,
        &mut failure_log,
    )
    .await?;

    let imported = manifest.test_case_ids.len() - not_imported.len();
    info!(imported, failed = not_imported.len(), "test cases imported");
    if failure_log.is_created() {
        info!(path = %failure_log.path().display(), "failure details written");
    }

    Ok(ImportReport {
        sections: section_map.len(),
        attributes: attribute_map.len(),
        shared_steps: shared_step_map.len(),
        test_cases: imported,
        not_imported,
    })
}





#[cfg(test)]
#[path = "project_tests.rs"]
mod project_tests;

#[cfg(test)]
#[path = "sections_tests.rs"]
mod sections_tests;



#[cfg(test)]
#[path = "values_tests.rs"]
mod values_tests;
