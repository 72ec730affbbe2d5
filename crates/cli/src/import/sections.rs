// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Section-tree replication.
//!
//! Pre-order depth-first: each source section is created under its parent's
//! new id, so children can only go in after their parent exists. Sibling
//! order follows the source.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use tracing::debug;
use uuid::Uuid;

use cp_core::{Section, Step};

use crate::client::{NewSection, RemoteService, RemoteStep};
use crate::error::Result;
use crate::retry::call_with_retry;

/// Replicates the section tree and returns the old→new id map.
pub async fn replicate_sections(
    remote: &dyn RemoteService,
    project_id: Uuid,
    sections: &[Section],
) -> Result<HashMap<Uuid, Uuid>> {
    let root = call_with_retry("fetch root section", || remote.root_section(project_id)).await?;
    let mut map = HashMap::new();
    for section in sections {
        replicate_node(remote, project_id, root, section, &mut map).await?;
    }
    Ok(map)
}

/// Converts section steps to submission shape. No attachment handling here;
/// section steps carry plain text.
fn to_remote_steps(steps: &[Step]) -> Vec<RemoteStep> {
    steps
        .iter()
        .map(|step| RemoteStep {
            action: step.action.clone(),
            expected: step.expected.clone(),
            test_data: step.test_data.clone(),
            shared_step_id: None,
        })
        .collect()
}

fn replicate_node<'a>(
    remote: &'a dyn RemoteService,
    project_id: Uuid,
    parent_id: Uuid,
    section: &'a Section,
    map: &'a mut HashMap<Uuid, Uuid>,
) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
    Box::pin(async move {
        let request = NewSection {
            name: section.name.clone(),
            precondition_steps: to_remote_steps(&section.precondition_steps),
            postcondition_steps: to_remote_steps(&section.postcondition_steps),
        };
        let new_id = call_with_retry("create section", || {
            remote.create_section(project_id, parent_id, request.clone())
        })
        .await?;
        debug!(name = %section.name, old = %section.id, new = %new_id, "section created");
        map.insert(section.id, new_id);

        for child in &section.sections {
            replicate_node(remote, project_id, new_id, child, map).await?;
        }
        Ok(())
    })
}
