// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Attribute reconciliation against remote state.
//!
//! Source attributes are matched by (name, type) against the service's global
//! attributes. A same-name/same-type hit is reused (with option values
//! unioned in); a same-name/different-type hit forces a deterministic
//! rename; a miss creates the attribute. Afterwards, project-required
//! attributes untouched by the pass are demoted to optional, and all mapped
//! attributes are attached to the project in one bulk call.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};
use uuid::Uuid;

use cp_core::{Attribute, AttributeType, RemoteAttribute, RemoteOption};

use crate::client::{NewAttribute, RemoteService};
use crate::error::Result;
use crate::retry::call_with_retry;

/// Option value synthesized for option-backed attributes exported without any
/// options; the service rejects an empty option list.
const SYNTHESIZED_OPTION: &str = "Empty";

/// Reconciles all source attributes and returns the map from source attribute
/// id to the resolved remote record.
pub async fn reconcile_attributes(
    remote: &dyn RemoteService,
    project_id: Uuid,
    attributes: &[Attribute],
) -> Result<HashMap<Uuid, RemoteAttribute>> {
    let mut existing = call_with_retry("list attributes", || remote.list_attributes()).await?;
    let mut map = HashMap::new();

    for attribute in attributes {
        let resolved = resolve_one(remote, attribute, &mut existing).await?;
        debug!(
            source = %attribute.id,
            remote = %resolved.id,
            name = %resolved.name,
            "attribute mapped"
        );
        map.insert(attribute.id, resolved);
    }

    demote_untouched_required(remote, project_id, &map).await?;

    let attribute_ids: Vec<Uuid> = map.values().map(|r| r.id).collect();
    if !attribute_ids.is_empty() {
        call_with_retry("attach attributes", || {
            remote.attach_attributes(project_id, attribute_ids.clone())
        })
        .await?;
    }

    Ok(map)
}

/// Resolves one source attribute against the working remote list.
///
/// The rename loop is unbounded on purpose: it keeps probing "name (n)" until
/// a candidate has no same-name/different-type collision, then re-matches
/// under that name (which may reuse a same-type attribute or create one).
async fn resolve_one(
    remote: &dyn RemoteService,
    attribute: &Attribute,
    existing: &mut Vec<RemoteAttribute>,
) -> Result<RemoteAttribute> {
    let mut name = attribute.name.clone();
    loop {
        match existing.iter().position(|r| r.name == name) {
            Some(pos) if existing[pos].attribute_type == attribute.attribute_type => {
                let current = existing[pos].clone();
                if attribute.attribute_type.has_options() {
                    if let Some(fresh) =
                        union_options(remote, attribute, &current).await?
                    {
                        existing[pos] = fresh.clone();
                        return Ok(fresh);
                    }
                }
                return Ok(current);
            }
            Some(_) => {
                let next = renamed(&attribute.name, attribute.attribute_type, existing);
                warn!(
                    name = %attribute.name,
                    renamed = %next,
                    "attribute exists with a different type, renaming"
                );
                name = next;
            }
            None => {
                let mut options = attribute.options.clone();
                if attribute.attribute_type.has_options() && options.is_empty() {
                    options.push(SYNTHESIZED_OPTION.to_string());
                }
                let request = NewAttribute {
                    name: name.clone(),
                    attribute_type: attribute.attribute_type,
                    is_required: attribute.is_required,
                    options,
                };
                let created = call_with_retry("create attribute", || {
                    remote.create_attribute(request.clone())
                })
                .await?;
                existing.push(created.clone());
                return Ok(created);
            }
        }
    }
}

/// Unions missing source option values into a matched remote attribute.
///
/// Returns the refreshed record when an update was pushed, `None` when the
/// remote already covers every value.
async fn union_options(
    remote: &dyn RemoteService,
    attribute: &Attribute,
    current: &RemoteAttribute,
) -> Result<Option<RemoteAttribute>> {
    let missing: Vec<String> = attribute
        .options
        .iter()
        .filter(|value| current.option_id(value).is_none())
        .cloned()
        .collect();
    if missing.is_empty() {
        return Ok(None);
    }

    let mut updated = current.clone();
    updated.options.extend(missing.into_iter().map(|value| RemoteOption {
        id: Uuid::nil(),
        value,
    }));
    call_with_retry("update attribute", || {
        remote.update_attribute(updated.clone())
    })
    .await?;
    let fresh = call_with_retry("refresh attribute", || remote.get_attribute(current.id)).await?;
    Ok(Some(fresh))
}

/// Picks the smallest "base (n)" not colliding by (name, type) with any known
/// remote attribute.
fn renamed(base: &str, attribute_type: AttributeType, existing: &[RemoteAttribute]) -> String {
    let mut n = 1u32;
    loop {
        let candidate = format!("{base} ({n})");
        let collides = existing
            .iter()
            .any(|r| r.name == candidate && r.attribute_type != attribute_type);
        if !collides {
            return candidate;
        }
        n += 1;
    }
}

/// Demotes project-required attributes the import did not touch to optional.
async fn demote_untouched_required(
    remote: &dyn RemoteService,
    project_id: Uuid,
    map: &HashMap<Uuid, RemoteAttribute>,
) -> Result<()> {
    let required = call_with_retry("fetch required attributes", || {
        remote.project_required_attributes(project_id)
    })
    .await?;
    let touched: HashSet<Uuid> = map.values().map(|r| r.id).collect();

    for attribute in required {
        if touched.contains(&attribute.id) {
            continue;
        }
        warn!(name = %attribute.name, "demoting untouched required attribute to optional");
        let mut demoted = attribute;
        demoted.is_required = false;
        call_with_retry("demote attribute", || {
            remote.update_project_attribute(project_id, demoted.clone())
        })
        .await?;
    }
    Ok(())
}
