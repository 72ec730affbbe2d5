// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared-step import.
//!
//! Shared steps go in before test cases so the references in test-case steps
//! can be remapped. A failing shared step aborts the whole run.

use std::collections::HashMap;

use tracing::info;
use uuid::Uuid;

use cp_core::{RemoteAttribute, SharedStep};

use super::attachments::{rewrite_step_fields, upload_attachments};
use super::values::convert_attribute_values;
use super::DEFAULT_DURATION_MS;
use crate::client::{NewWorkItem, RemoteService, WorkItemKind};
use crate::error::{Error, Result};
use crate::retry::call_with_retry;
use crate::source::ExportSource;

/// Imports all shared steps and returns the old→new id map.
pub async fn import_shared_steps(
    source: &dyn ExportSource,
    remote: &dyn RemoteService,
    project_id: Uuid,
    section_map: &HashMap<Uuid, Uuid>,
    attribute_map: &mut HashMap<Uuid, RemoteAttribute>,
    ids: &[Uuid],
) -> Result<HashMap<Uuid, Uuid>> {
    let mut map = HashMap::new();
    for &id in ids {
        let shared_step = source.read_shared_step(id).await?;
        info!(name = %shared_step.name, "importing shared step");
        let item =
            convert_shared_step(source, remote, section_map, attribute_map, &shared_step).await?;
        let new_id = call_with_retry("create shared step", || {
            remote.create_work_item(project_id, item.clone())
        })
        .await?;
        map.insert(id, new_id);
    }
    Ok(map)
}

async fn convert_shared_step(
    source: &dyn ExportSource,
    remote: &dyn RemoteService,
    section_map: &HashMap<Uuid, Uuid>,
    attribute_map: &mut HashMap<Uuid, RemoteAttribute>,
    shared_step: &SharedStep,
) -> Result<NewWorkItem> {
    let section_id = *section_map
        .get(&shared_step.section_id)
        .ok_or(Error::UnmappedSection(shared_step.section_id))?;

    let mut filenames = shared_step.attachments.clone();
    for step in &shared_step.steps {
        filenames.extend(step.attachments.iter().cloned());
    }
    let uploads = upload_attachments(source, remote, shared_step.id, &filenames).await;

    let steps = shared_step
        .steps
        .iter()
        .map(|step| rewrite_step_fields(step, &uploads))
        .collect();

    let attributes = convert_attribute_values(remote, attribute_map, &shared_step.attributes).await?;

    Ok(NewWorkItem {
        kind: WorkItemKind::SharedStep,
        section_id,
        name: shared_step.name.clone(),
        state: shared_step.state,
        priority: shared_step.priority,
        steps,
        precondition_steps: Vec::new(),
        postcondition_steps: Vec::new(),
        attributes,
        tags: shared_step.tags.clone(),
        links: shared_step.links.clone(),
        attachment_ids: uploads.values().copied().collect(),
        iterations: Vec::new(),
        duration: DEFAULT_DURATION_MS,
    })
}
