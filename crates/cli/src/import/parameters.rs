// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parameter deduplication.
//!
//! Parameters match by (name, value), with blank values normalized to "N/A"
//! before both matching and creation. Creation failures degrade to an
//! existing fallback value rather than failing the surrounding test case;
//! when no fallback exists the parameter is dropped from the result.

use tracing::warn;

use cp_core::{Parameter, RemoteParameter, EMPTY_PARAMETER_VALUE};

use crate::client::RemoteService;
use crate::error::Result;
use crate::retry::call_with_retry;

/// Finds or creates the remote parameter matching `parameter`.
///
/// Returns `None` when the parameter could not be created and no fallback
/// value exists under the same name; the caller omits it from the iteration.
pub async fn find_or_create_parameter(
    remote: &dyn RemoteService,
    parameter: &Parameter,
) -> Result<Option<RemoteParameter>> {
    let value = parameter.normalized_value().to_string();
    let existing = call_with_retry("search parameters", || {
        remote.search_parameters(&parameter.name)
    })
    .await?;

    if let Some(hit) = existing.iter().find(|p| p.value == value) {
        return Ok(Some(hit.clone()));
    }

    let request = Parameter {
        name: parameter.name.clone(),
        value: value.clone(),
    };
    match call_with_retry("create parameter", || {
        remote.create_parameter(request.clone())
    })
    .await
    {
        Ok(created) => Ok(Some(created)),
        Err(err) => {
            warn!(
                name = %parameter.name,
                value = %value,
                error = %err,
                "parameter creation failed, falling back"
            );
            let fallback = existing
                .iter()
                .find(|p| p.value == EMPTY_PARAMETER_VALUE)
                .or_else(|| existing.iter().find(|p| p.value.is_empty()));
            match fallback {
                Some(hit) => Ok(Some(hit.clone())),
                None => {
                    warn!(name = %parameter.name, "no fallback parameter, dropping");
                    Ok(None)
                }
            }
        }
    }
}
