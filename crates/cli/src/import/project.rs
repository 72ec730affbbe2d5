// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project resolution: find-or-create the remote project.

use tracing::info;
use uuid::Uuid;

use crate::client::RemoteService;
use crate::error::{Error, Result};
use crate::retry::call_with_retry;

/// Resolves the target project by name.
///
/// A pre-existing project is fatal unless `use_existing` is set; an absent
/// project is created.
pub async fn resolve_project(
    remote: &dyn RemoteService,
    name: &str,
    use_existing: bool,
) -> Result<Uuid> {
    let existing = call_with_retry("find project", || remote.find_project(name)).await?;
    match existing {
        Some(project) if use_existing => {
            info!(name = %project.name, id = %project.id, "reusing existing project");
            Ok(project.id)
        }
        Some(project) => Err(Error::ProjectExists(project.name)),
        None => {
            let id = call_with_retry("create project", || remote.create_project(name)).await?;
            info!(name, %id, "project created");
            Ok(id)
        }
    }
}
