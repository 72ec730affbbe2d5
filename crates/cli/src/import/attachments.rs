// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Attachment upload and step-field rewriting.
//!
//! Uploads are best-effort: a file that cannot be read or uploaded is logged
//! and omitted from the result map, and any placeholder referencing it is
//! deleted during rewriting.

use std::collections::HashMap;

use tracing::warn;
use uuid::Uuid;

use cp_core::richtext::{
    any_field_references, append_reference, placeholder, rewrite_attachment,
};
use cp_core::Step;

use crate::client::{RemoteService, RemoteStep};
use crate::error::Result;
use crate::retry::call_with_retry;
use crate::source::ExportSource;

/// Uploads the given filenames for one owning work item.
///
/// Returns the filename → remote attachment id map; failed files are absent.
pub async fn upload_attachments(
    source: &dyn ExportSource,
    remote: &dyn RemoteService,
    owner_id: Uuid,
    filenames: &[String],
) -> HashMap<String, Uuid> {
    let mut uploads = HashMap::new();
    for filename in filenames {
        if uploads.contains_key(filename) {
            continue;
        }
        match upload_one(source, remote, owner_id, filename).await {
            Ok(id) => {
                uploads.insert(filename.clone(), id);
            }
            Err(err) => {
                warn!(
                    owner = %owner_id,
                    %filename,
                    error = %err,
                    "attachment upload failed, skipping"
                );
            }
        }
    }
    uploads
}

async fn upload_one(
    source: &dyn ExportSource,
    remote: &dyn RemoteService,
    owner_id: Uuid,
    filename: &str,
) -> Result<Uuid> {
    let bytes = source.read_attachment(owner_id, filename).await?;
    let id = call_with_retry("upload attachment", || {
        remote.upload_attachment(filename, bytes.clone())
    })
    .await?;
    Ok(id)
}

/// Converts one source step to submission shape, rewriting its text fields
/// for every attached filename.
///
/// A filename referenced by a placeholder is relocated per field; one that is
/// attached but referenced nowhere gets its reference appended to the action
/// field. The shared-step reference is left for the caller to remap.
pub fn rewrite_step_fields(step: &Step, uploads: &HashMap<String, Uuid>) -> RemoteStep {
    let mut action = step.action.clone();
    let mut expected = step.expected.clone();
    let mut test_data = step.test_data.clone();

    for filename in &step.attachments {
        let uploaded = uploads.get(filename).copied();
        if any_field_references(&[&action, &expected, &test_data], filename) {
            let marker = placeholder(filename);
            for field in [&mut action, &mut expected, &mut test_data] {
                if field.contains(&marker) {
                    *field = rewrite_attachment(field, filename, uploaded);
                }
            }
        } else if let Some(id) = uploaded {
            action = append_reference(&action, filename, id);
        }
    }

    RemoteStep {
        action,
        expected,
        test_data,
        shared_step_id: step.shared_step_id,
    }
}
