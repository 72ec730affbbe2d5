// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test-case import.
//!
//! Unlike every other phase, a failing test case does not abort the run: the
//! failure is logged (main stream plus the dedicated failure log) and its
//! name accumulated into the returned not-imported list.

use std::collections::HashMap;

use tracing::{error, info, warn};
use uuid::Uuid;

use cp_core::richtext::substitute_parameter_mentions;
use cp_core::{RemoteAttribute, RemoteParameter, TestCase};

use super::attachments::{rewrite_step_fields, upload_attachments};
use super::parameters::find_or_create_parameter;
use super::values::convert_attribute_values;
use super::DEFAULT_DURATION_MS;
use crate::client::{NewIteration, NewWorkItem, RemoteService, RemoteStep, WorkItemKind};
use crate::error::{Error, Result};
use crate::faillog::FailureLog;
use crate::retry::call_with_retry;
use crate::source::ExportSource;

/// Imports all test cases, returning the names of those not imported.
#[allow(clippy::too_many_arguments)]
pub async fn import_test_cases(
    source: &dyn ExportSource,
    remote: &dyn RemoteService,
    project_id: Uuid,
    section_map: &HashMap<Uuid, Uuid>,
    attribute_map: &mut HashMap<Uuid, RemoteAttribute>,
    shared_step_map: &HashMap<Uuid, Uuid>,
    ids: &[Uuid],
    failure_log: &mut FailureLog,
) -> Result<Vec<String>> {
    let mut not_imported = Vec::new();

    for &id in ids {
        let test_case = match source.read_test_case(id).await {
            Ok(test_case) => test_case,
            Err(err) => {
                let err = Error::from(err);
                error!(%id, error = %err, "failed to read test case");
                record_failure(failure_log, &id.to_string(), id, &err);
                not_imported.push(id.to_string());
                continue;
            }
        };

        info!(name = %test_case.name, "importing test case");
        if let Err(err) = import_one(
            source,
            remote,
            project_id,
            section_map,
            attribute_map,
            shared_step_map,
            &test_case,
        )
        .await
        {
            error!(name = %test_case.name, error = %err, "test case not imported");
            record_failure(failure_log, &test_case.name, id, &err);
            not_imported.push(test_case.name.clone());
        }
    }

    Ok(not_imported)
}

fn record_failure(failure_log: &mut FailureLog, name: &str, id: Uuid, err: &Error) {
    if let Err(log_err) = failure_log.record(name, id, err) {
        warn!(error = %log_err, "could not write failure log");
    }
}

async fn import_one(
    source: &dyn ExportSource,
    remote: &dyn RemoteService,
    project_id: Uuid,
    section_map: &HashMap<Uuid, Uuid>,
    attribute_map: &mut HashMap<Uuid, RemoteAttribute>,
    shared_step_map: &HashMap<Uuid, Uuid>,
    test_case: &TestCase,
) -> Result<()> {
    let section_id = *section_map
        .get(&test_case.section_id)
        .ok_or(Error::UnmappedSection(test_case.section_id))?;

    let mut filenames = test_case.attachments.clone();
    for step in test_case
        .steps
        .iter()
        .chain(&test_case.precondition_steps)
        .chain(&test_case.postcondition_steps)
    {
        filenames.extend(step.attachments.iter().cloned());
    }
    let uploads = upload_attachments(source, remote, test_case.id, &filenames).await;

    let mut steps: Vec<RemoteStep> = test_case
        .steps
        .iter()
        .map(|step| {
            let mut converted = rewrite_step_fields(step, &uploads);
            converted.shared_step_id = remap_shared_step(shared_step_map, step.shared_step_id);
            converted
        })
        .collect();
    let mut precondition_steps: Vec<RemoteStep> = test_case
        .precondition_steps
        .iter()
        .map(|step| rewrite_step_fields(step, &uploads))
        .collect();
    let mut postcondition_steps: Vec<RemoteStep> = test_case
        .postcondition_steps
        .iter()
        .map(|step| rewrite_step_fields(step, &uploads))
        .collect();

    let mut iterations = Vec::with_capacity(test_case.iterations.len());
    for (index, iteration) in test_case.iterations.iter().enumerate() {
        let mut parameters = Vec::with_capacity(iteration.parameters.len());
        for parameter in &iteration.parameters {
            if let Some(remote_parameter) = find_or_create_parameter(remote, parameter).await? {
                parameters.push(remote_parameter);
            }
        }
        if index == 0 {
            substitute_mentions_in(&mut steps, &parameters);
            substitute_mentions_in(&mut precondition_steps, &parameters);
            substitute_mentions_in(&mut postcondition_steps, &parameters);
        }
        iterations.push(NewIteration {
            parameter_ids: parameters.iter().map(|p| p.id).collect(),
        });
    }

    let attributes = convert_attribute_values(remote, attribute_map, &test_case.attributes).await?;

    let duration = if test_case.duration == 0 {
        DEFAULT_DURATION_MS
    } else {
        test_case.duration
    };

    let item = NewWorkItem {
        kind: WorkItemKind::TestCase,
        section_id,
        name: test_case.name.clone(),
        state: test_case.state,
        priority: test_case.priority,
        steps,
        precondition_steps,
        postcondition_steps,
        attributes,
        tags: test_case.tags.clone(),
        links: test_case.links.clone(),
        attachment_ids: uploads.values().copied().collect(),
        iterations,
        duration,
    };
    call_with_retry("create test case", || {
        remote.create_work_item(project_id, item.clone())
    })
    .await?;
    Ok(())
}

/// Remaps a shared-step reference; an unmapped reference is cleared, not an
/// error.
fn remap_shared_step(
    shared_step_map: &HashMap<Uuid, Uuid>,
    reference: Option<Uuid>,
) -> Option<Uuid> {
    let id = reference?;
    match shared_step_map.get(&id) {
        Some(mapped) => Some(*mapped),
        None => {
            warn!(%id, "unmapped shared step reference, clearing");
            None
        }
    }
}

/// First-iteration parameter substitution across all step text fields.
fn substitute_mentions_in(steps: &mut [RemoteStep], parameters: &[RemoteParameter]) {
    if parameters.is_empty() {
        return;
    }
    for step in steps {
        step.action = substitute_parameter_mentions(&step.action, parameters);
        step.expected = substitute_parameter_mentions(&step.expected, parameters);
        step.test_data = substitute_parameter_mentions(&step.test_data, parameters);
    }
}
