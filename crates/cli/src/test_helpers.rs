// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers: in-memory fakes for the two trait seams plus fixture
//! builders.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use uuid::Uuid;

use cp_core::{
    Attribute, AttributeType, Parameter, Priority, ProjectManifest, RemoteAttribute,
    RemoteOption, RemoteParameter, Section, SharedStep, TestCase, WorkItemState,
};

use crate::client::{
    ApiFuture, ClientError, NewAttribute, NewSection, NewWorkItem, RemoteProject, RemoteService,
};
use crate::source::{ExportSource, SourceError, SourceFuture};

/// A section created through the mock, with its placement recorded.
#[derive(Debug, Clone)]
pub struct CreatedSection {
    pub id: Uuid,
    pub project_id: Uuid,
    pub parent_id: Uuid,
    pub request: NewSection,
}

/// Mutable state behind [`MockRemote`].
#[derive(Default)]
pub struct RemoteState {
    pub projects: Vec<RemoteProject>,
    pub root_sections: HashMap<Uuid, Uuid>,
    pub sections: Vec<CreatedSection>,
    pub attributes: Vec<RemoteAttribute>,
    /// Project-required attributes served by `project_required_attributes`.
    pub required: Vec<RemoteAttribute>,
    /// Recorded `update_project_attribute` calls.
    pub project_attribute_updates: Vec<RemoteAttribute>,
    /// Recorded bulk-attach calls.
    pub attached: Vec<Vec<Uuid>>,
    pub work_items: Vec<(Uuid, NewWorkItem)>,
    pub parameters: Vec<RemoteParameter>,
    /// Uploaded attachments as (filename, payload length, assigned id).
    pub uploads: Vec<(String, usize, Uuid)>,
    /// Filenames whose upload fails fatally.
    pub fail_uploads: HashSet<String>,
    /// When set, every `create_parameter` call fails fatally.
    pub fail_parameter_create: bool,
    /// Work item names whose creation fails fatally.
    pub fail_work_item_names: HashSet<String>,
}

/// In-memory fake of the remote service.
///
/// Behaves like a tiny consistent server so pipeline tests can assert on the
/// resulting state instead of scripting every response.
#[derive(Default)]
pub struct MockRemote {
    pub state: Mutex<RemoteState>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a pre-existing project and returns its id.
    pub fn seed_project(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        let mut state = self.state.lock().unwrap();
        state.projects.push(RemoteProject {
            id,
            name: name.to_string(),
        });
        state.root_sections.insert(id, Uuid::new_v4());
        id
    }

    /// Seeds a global remote attribute.
    pub fn seed_attribute(&self, attribute: RemoteAttribute) {
        self.state.lock().unwrap().attributes.push(attribute);
    }

    /// Seeds an existing parameter value.
    pub fn seed_parameter(&self, name: &str, value: &str, key_id: Uuid) -> RemoteParameter {
        let parameter = RemoteParameter {
            id: Uuid::new_v4(),
            key_id,
            name: name.to_string(),
            value: value.to_string(),
        };
        self.state
            .lock()
            .unwrap()
            .parameters
            .push(parameter.clone());
        parameter
    }

    pub fn work_items(&self) -> Vec<NewWorkItem> {
        self.state
            .lock()
            .unwrap()
            .work_items
            .iter()
            .map(|(_, item)| item.clone())
            .collect()
    }

    pub fn sections(&self) -> Vec<CreatedSection> {
        self.state.lock().unwrap().sections.clone()
    }
}

fn fatal(message: &str) -> ClientError {
    ClientError::Api {
        status: 400,
        message: message.to_string(),
    }
}

impl RemoteService for MockRemote {
    fn find_project(&self, name: &str) -> ApiFuture<'_, Option<RemoteProject>> {
        let name = name.to_string();
        Box::pin(async move {
            let state = self.state.lock().unwrap();
            Ok(state.projects.iter().find(|p| p.name == name).cloned())
        })
    }

    fn create_project(&self, name: &str) -> ApiFuture<'_, Uuid> {
        let name = name.to_string();
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            let id = Uuid::new_v4();
            state.projects.push(RemoteProject { id, name });
            state.root_sections.insert(id, Uuid::new_v4());
            Ok(id)
        })
    }

    fn root_section(&self, project_id: Uuid) -> ApiFuture<'_, Uuid> {
        Box::pin(async move {
            let state = self.state.lock().unwrap();
            state
                .root_sections
                .get(&project_id)
                .copied()
                .ok_or(ClientError::NotFound {
                    entity: "project",
                    id: project_id.to_string(),
                })
        })
    }

    fn create_section(
        &self,
        project_id: Uuid,
        parent_id: Uuid,
        section: NewSection,
    ) -> ApiFuture<'_, Uuid> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            let id = Uuid::new_v4();
            state.sections.push(CreatedSection {
                id,
                project_id,
                parent_id,
                request: section,
            });
            Ok(id)
        })
    }

    fn list_attributes(&self) -> ApiFuture<'_, Vec<RemoteAttribute>> {
        Box::pin(async move { Ok(self.state.lock().unwrap().attributes.clone()) })
    }

    fn get_attribute(&self, id: Uuid) -> ApiFuture<'_, RemoteAttribute> {
        Box::pin(async move {
            let state = self.state.lock().unwrap();
            state
                .attributes
                .iter()
                .find(|a| a.id == id)
                .cloned()
                .ok_or(ClientError::NotFound {
                    entity: "attribute",
                    id: id.to_string(),
                })
        })
    }

    fn create_attribute(&self, attribute: NewAttribute) -> ApiFuture<'_, RemoteAttribute> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            let created = RemoteAttribute {
                id: Uuid::new_v4(),
                name: attribute.name,
                attribute_type: attribute.attribute_type,
                is_enabled: true,
                is_required: attribute.is_required,
                is_global: true,
                options: attribute
                    .options
                    .into_iter()
                    .map(|value| RemoteOption {
                        id: Uuid::new_v4(),
                        value,
                    })
                    .collect(),
            };
            state.attributes.push(created.clone());
            Ok(created)
        })
    }

    fn update_attribute(&self, attribute: RemoteAttribute) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            let Some(slot) = state.attributes.iter_mut().find(|a| a.id == attribute.id) else {
                return Err(ClientError::NotFound {
                    entity: "attribute",
                    id: attribute.id.to_string(),
                });
            };
            let mut updated = attribute;
            for option in &mut updated.options {
                // The service assigns ids to new options.
                if option.id.is_nil() {
                    option.id = Uuid::new_v4();
                }
            }
            *slot = updated;
            Ok(())
        })
    }

    fn project_required_attributes(&self, _project_id: Uuid) -> ApiFuture<'_, Vec<RemoteAttribute>> {
        Box::pin(async move { Ok(self.state.lock().unwrap().required.clone()) })
    }

    fn update_project_attribute(
        &self,
        _project_id: Uuid,
        attribute: RemoteAttribute,
    ) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            self.state
                .lock()
                .unwrap()
                .project_attribute_updates
                .push(attribute);
            Ok(())
        })
    }

    fn attach_attributes(&self, _project_id: Uuid, attribute_ids: Vec<Uuid>) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            self.state.lock().unwrap().attached.push(attribute_ids);
            Ok(())
        })
    }

    fn create_work_item(&self, project_id: Uuid, item: NewWorkItem) -> ApiFuture<'_, Uuid> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            if state.fail_work_item_names.contains(&item.name) {
                return Err(fatal("work item rejected"));
            }
            let id = Uuid::new_v4();
            state.work_items.push((project_id, item));
            Ok(id)
        })
    }

    fn upload_attachment(&self, filename: &str, bytes: Vec<u8>) -> ApiFuture<'_, Uuid> {
        let filename = filename.to_string();
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            if state.fail_uploads.contains(&filename) {
                return Err(fatal("attachment rejected"));
            }
            let id = Uuid::new_v4();
            state.uploads.push((filename, bytes.len(), id));
            Ok(id)
        })
    }

    fn search_parameters(&self, name: &str) -> ApiFuture<'_, Vec<RemoteParameter>> {
        let name = name.to_string();
        Box::pin(async move {
            let state = self.state.lock().unwrap();
            Ok(state
                .parameters
                .iter()
                .filter(|p| p.name == name)
                .cloned()
                .collect())
        })
    }

    fn create_parameter(&self, parameter: Parameter) -> ApiFuture<'_, RemoteParameter> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            if state.fail_parameter_create {
                return Err(fatal("parameter rejected"));
            }
            let key_id = state
                .parameters
                .iter()
                .find(|p| p.name == parameter.name)
                .map(|p| p.key_id)
                .unwrap_or_else(Uuid::new_v4);
            let created = RemoteParameter {
                id: Uuid::new_v4(),
                key_id,
                name: parameter.name,
                value: parameter.value,
            };
            state.parameters.push(created.clone());
            Ok(created)
        })
    }
}

/// In-memory fake of the export source.
#[derive(Default)]
pub struct MockSource {
    pub manifest: Option<ProjectManifest>,
    pub shared_steps: HashMap<Uuid, SharedStep>,
    pub test_cases: HashMap<Uuid, TestCase>,
    pub attachments: HashMap<(Uuid, String), Vec<u8>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_manifest(manifest: ProjectManifest) -> Self {
        MockSource {
            manifest: Some(manifest),
            ..Self::default()
        }
    }

    pub fn add_shared_step(&mut self, shared_step: SharedStep) {
        self.shared_steps.insert(shared_step.id, shared_step);
    }

    pub fn add_test_case(&mut self, test_case: TestCase) {
        self.test_cases.insert(test_case.id, test_case);
    }

    pub fn add_attachment(&mut self, owner_id: Uuid, filename: &str, bytes: &[u8]) {
        self.attachments
            .insert((owner_id, filename.to_string()), bytes.to_vec());
    }
}

fn missing(name: &str) -> SourceError {
    SourceError::Missing {
        path: std::path::PathBuf::from(name),
    }
}

impl ExportSource for MockSource {
    fn read_manifest(&self) -> SourceFuture<'_, ProjectManifest> {
        Box::pin(async move { self.manifest.clone().ok_or_else(|| missing("project.json")) })
    }

    fn read_shared_step(&self, id: Uuid) -> SourceFuture<'_, SharedStep> {
        Box::pin(async move {
            self.shared_steps
                .get(&id)
                .cloned()
                .ok_or_else(|| missing(&format!("{id}.json")))
        })
    }

    fn read_test_case(&self, id: Uuid) -> SourceFuture<'_, TestCase> {
        Box::pin(async move {
            self.test_cases
                .get(&id)
                .cloned()
                .ok_or_else(|| missing(&format!("{id}.json")))
        })
    }

    fn read_attachment(&self, owner_id: Uuid, filename: &str) -> SourceFuture<'_, Vec<u8>> {
        let key = (owner_id, filename.to_string());
        Box::pin(async move {
            self.attachments
                .get(&key)
                .cloned()
                .ok_or_else(|| missing(&key.1))
        })
    }
}

/// Builds a source attribute with the given name and type.
pub fn source_attribute(name: &str, attribute_type: AttributeType) -> Attribute {
    Attribute {
        id: Uuid::new_v4(),
        name: name.to_string(),
        attribute_type,
        is_required: false,
        is_active: true,
        options: Vec::new(),
    }
}

/// Builds a remote attribute with the given name, type and option values.
pub fn remote_attribute(name: &str, attribute_type: AttributeType, options: &[&str]) -> RemoteAttribute {
    RemoteAttribute {
        id: Uuid::new_v4(),
        name: name.to_string(),
        attribute_type,
        is_enabled: true,
        is_required: false,
        is_global: true,
        options: options
            .iter()
            .map(|value| RemoteOption {
                id: Uuid::new_v4(),
                value: (*value).to_string(),
            })
            .collect(),
    }
}

/// Builds a minimal test case in the given section.
pub fn test_case(name: &str, section_id: Uuid) -> TestCase {
    TestCase {
        id: Uuid::new_v4(),
        name: name.to_string(),
        section_id,
        steps: Vec::new(),
        precondition_steps: Vec::new(),
        postcondition_steps: Vec::new(),
        attributes: Vec::new(),
        state: WorkItemState::Ready,
        priority: Priority::Medium,
        tags: Vec::new(),
        links: Vec::new(),
        attachments: Vec::new(),
        iterations: Vec::new(),
        duration: 0,
        created_date: None,
    }
}

/// Builds a minimal shared step in the given section.
pub fn shared_step(name: &str, section_id: Uuid) -> SharedStep {
    SharedStep {
        id: Uuid::new_v4(),
        name: name.to_string(),
        section_id,
        steps: Vec::new(),
        attributes: Vec::new(),
        state: WorkItemState::Ready,
        priority: Priority::Medium,
        tags: Vec::new(),
        links: Vec::new(),
        attachments: Vec::new(),
        created_date: None,
    }
}

/// Builds a leaf section with the given name.
pub fn section(name: &str) -> Section {
    Section {
        id: Uuid::new_v4(),
        name: name.to_string(),
        precondition_steps: Vec::new(),
        postcondition_steps: Vec::new(),
        sections: Vec::new(),
    }
}
