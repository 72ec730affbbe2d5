// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote service trait and submission shapes.
//!
//! One capability per pipeline need. Implementations must not borrow their
//! string arguments past the synchronous prefix of each method (clone before
//! entering the async block), which keeps the futures tied only to `&self`.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cp_core::{AttributeType, Link, Parameter, Priority, RemoteAttribute, RemoteParameter, WorkItemState};

use super::error::ClientResult;

/// Boxed future returned by [`RemoteService`] methods.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = ClientResult<T>> + Send + 'a>>;

/// A project as known to the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProject {
    pub id: Uuid,
    pub name: String,
}

/// One step of a work item or section, in submission shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteStep {
    pub action: String,
    pub expected: String,
    pub test_data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_step_id: Option<Uuid>,
}

/// A section creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSection {
    pub name: String,
    pub precondition_steps: Vec<RemoteStep>,
    pub postcondition_steps: Vec<RemoteStep>,
}

/// A global attribute creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttribute {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    pub is_required: bool,
    /// Option values for option-backed types; the service assigns ids.
    pub options: Vec<String>,
}

/// Kind of work item being created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkItemKind {
    SharedStep,
    TestCase,
}

/// One iteration of a test case, in submission shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIteration {
    pub parameter_ids: Vec<Uuid>,
}

/// A work item creation request (shared step or test case).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkItem {
    pub kind: WorkItemKind,
    pub section_id: Uuid,
    pub name: String,
    pub state: WorkItemState,
    pub priority: Priority,
    pub steps: Vec<RemoteStep>,
    pub precondition_steps: Vec<RemoteStep>,
    pub postcondition_steps: Vec<RemoteStep>,
    /// Converted attribute values keyed by remote attribute id.
    pub attributes: HashMap<Uuid, serde_json::Value>,
    pub tags: Vec<String>,
    pub links: Vec<Link>,
    /// Remote ids of successfully uploaded attachments.
    pub attachment_ids: Vec<Uuid>,
    pub iterations: Vec<NewIteration>,
    /// Expected duration in milliseconds; never zero on submission.
    pub duration: u32,
}

/// Client for the destination test-management service.
///
/// This trait abstracts over the actual HTTP client, allowing for easy
/// testing with mock implementations.
pub trait RemoteService: Send + Sync {
    /// Looks up a project by exact name.
    fn find_project(&self, name: &str) -> ApiFuture<'_, Option<RemoteProject>>;

    /// Creates a project and returns its id.
    fn create_project(&self, name: &str) -> ApiFuture<'_, Uuid>;

    /// Returns the id of a project's root section.
    fn root_section(&self, project_id: Uuid) -> ApiFuture<'_, Uuid>;

    /// Creates a section under a parent and returns the new id.
    fn create_section(
        &self,
        project_id: Uuid,
        parent_id: Uuid,
        section: NewSection,
    ) -> ApiFuture<'_, Uuid>;

    /// Lists all global attributes.
    fn list_attributes(&self) -> ApiFuture<'_, Vec<RemoteAttribute>>;

    /// Fetches one global attribute by id.
    fn get_attribute(&self, id: Uuid) -> ApiFuture<'_, RemoteAttribute>;

    /// Creates a global attribute and returns it with service-assigned ids.
    fn create_attribute(&self, attribute: NewAttribute) -> ApiFuture<'_, RemoteAttribute>;

    /// Pushes an updated global attribute. Options with a nil id are new and
    /// get their ids assigned by the service.
    fn update_attribute(&self, attribute: RemoteAttribute) -> ApiFuture<'_, ()>;

    /// Lists the attributes a project currently marks as required.
    fn project_required_attributes(&self, project_id: Uuid) -> ApiFuture<'_, Vec<RemoteAttribute>>;

    /// Updates a project-scoped attribute (e.g. demoting required to optional).
    fn update_project_attribute(
        &self,
        project_id: Uuid,
        attribute: RemoteAttribute,
    ) -> ApiFuture<'_, ()>;

    /// Attaches global attributes to a project in one bulk call.
    fn attach_attributes(&self, project_id: Uuid, attribute_ids: Vec<Uuid>) -> ApiFuture<'_, ()>;

    /// Creates a work item and returns its id.
    fn create_work_item(&self, project_id: Uuid, item: NewWorkItem) -> ApiFuture<'_, Uuid>;

    /// Uploads an attachment payload and returns its id.
    fn upload_attachment(&self, filename: &str, bytes: Vec<u8>) -> ApiFuture<'_, Uuid>;

    /// Lists all parameters sharing a name.
    fn search_parameters(&self, name: &str) -> ApiFuture<'_, Vec<RemoteParameter>>;

    /// Creates a parameter value and returns the full record.
    fn create_parameter(&self, parameter: Parameter) -> ApiFuture<'_, RemoteParameter>;
}
