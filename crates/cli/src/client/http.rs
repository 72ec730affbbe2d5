// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP implementation of [`RemoteService`] using reqwest.
//!
//! Owns URL layout, authentication and wire shapes; nothing outside this file
//! knows what the service's JSON looks like.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cp_core::{Parameter, RemoteAttribute, RemoteParameter};

use super::api::{ApiFuture, NewAttribute, NewSection, NewWorkItem, RemoteProject, RemoteService};
use super::error::{ClientError, ClientResult};

/// Response body carrying just a created entity's id.
#[derive(Debug, Deserialize)]
struct IdBody {
    id: Uuid,
}

/// Wire body for section creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSectionBody {
    parent_id: Uuid,
    #[serde(flatten)]
    section: NewSection,
}

/// Wire body for the bulk attribute attach call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AttachAttributesBody {
    attribute_ids: Vec<Uuid>,
}

/// HTTP client for the remote test-management service.
pub struct HttpRemoteService {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpRemoteService {
    /// Creates a client for the given base URL and API token.
    pub fn new(base_url: &str, token: &str) -> ClientResult<Self> {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::BadUrl(base_url.to_string()));
        }
        let client = reqwest::Client::builder().build()?;
        Ok(HttpRemoteService {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Turns a non-success response into [`ClientError::Api`] with the body
    /// text preserved for marker classification.
    async fn check(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl RemoteService for HttpRemoteService {
    fn find_project(&self, name: &str) -> ApiFuture<'_, Option<RemoteProject>> {
        let name = name.to_string();
        Box::pin(async move {
            let response = self
                .client
                .get(self.url("/api/projects"))
                .query(&[("name", name.as_str())])
                .bearer_auth(&self.token)
                .send()
                .await?;
            let projects: Vec<RemoteProject> = Self::check(response).await?.json().await?;
            Ok(projects.into_iter().find(|p| p.name == name))
        })
    }

    fn create_project(&self, name: &str) -> ApiFuture<'_, Uuid> {
        let name = name.to_string();
        Box::pin(async move {
            let response = self
                .client
                .post(self.url("/api/projects"))
                .bearer_auth(&self.token)
                .json(&serde_json::json!({ "name": name }))
                .send()
                .await?;
            let body: IdBody = Self::check(response).await?.json().await?;
            Ok(body.id)
        })
    }

    fn root_section(&self, project_id: Uuid) -> ApiFuture<'_, Uuid> {
        Box::pin(async move {
            let response = self
                .client
                .get(self.url(&format!("/api/projects/{project_id}/sections/root")))
                .bearer_auth(&self.token)
                .send()
                .await?;
            let body: IdBody = Self::check(response).await?.json().await?;
            Ok(body.id)
        })
    }

    fn create_section(
        &self,
        project_id: Uuid,
        parent_id: Uuid,
        section: NewSection,
    ) -> ApiFuture<'_, Uuid> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.url(&format!("/api/projects/{project_id}/sections")))
                .bearer_auth(&self.token)
                .json(&CreateSectionBody { parent_id, section })
                .send()
                .await?;
            let body: IdBody = Self::check(response).await?.json().await?;
            Ok(body.id)
        })
    }

    fn list_attributes(&self) -> ApiFuture<'_, Vec<RemoteAttribute>> {
        Box::pin(async move {
            let response = self
                .client
                .get(self.url("/api/attributes"))
                .bearer_auth(&self.token)
                .send()
                .await?;
            let attributes: Vec<RemoteAttribute> = Self::check(response).await?.json().await?;
            Ok(attributes)
        })
    }

    fn get_attribute(&self, id: Uuid) -> ApiFuture<'_, RemoteAttribute> {
        Box::pin(async move {
            let response = self
                .client
                .get(self.url(&format!("/api/attributes/{id}")))
                .bearer_auth(&self.token)
                .send()
                .await?;
            let attribute: RemoteAttribute = Self::check(response).await?.json().await?;
            Ok(attribute)
        })
    }

    fn create_attribute(&self, attribute: NewAttribute) -> ApiFuture<'_, RemoteAttribute> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.url("/api/attributes"))
                .bearer_auth(&self.token)
                .json(&attribute)
                .send()
                .await?;
            let created: RemoteAttribute = Self::check(response).await?.json().await?;
            Ok(created)
        })
    }

    fn update_attribute(&self, attribute: RemoteAttribute) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let response = self
                .client
                .put(self.url(&format!("/api/attributes/{}", attribute.id)))
                .bearer_auth(&self.token)
                .json(&attribute)
                .send()
                .await?;
            Self::check(response).await?;
            Ok(())
        })
    }

    fn project_required_attributes(&self, project_id: Uuid) -> ApiFuture<'_, Vec<RemoteAttribute>> {
        Box::pin(async move {
            let response = self
                .client
                .get(self.url(&format!("/api/projects/{project_id}/attributes")))
                .query(&[("isRequired", "true")])
                .bearer_auth(&self.token)
                .send()
                .await?;
            let attributes: Vec<RemoteAttribute> = Self::check(response).await?.json().await?;
            Ok(attributes)
        })
    }

    fn update_project_attribute(
        &self,
        project_id: Uuid,
        attribute: RemoteAttribute,
    ) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let response = self
                .client
                .put(self.url(&format!(
                    "/api/projects/{project_id}/attributes/{}",
                    attribute.id
                )))
                .bearer_auth(&self.token)
                .json(&attribute)
                .send()
                .await?;
            Self::check(response).await?;
            Ok(())
        })
    }

    fn attach_attributes(&self, project_id: Uuid, attribute_ids: Vec<Uuid>) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.url(&format!("/api/projects/{project_id}/attributes")))
                .bearer_auth(&self.token)
                .json(&AttachAttributesBody { attribute_ids })
                .send()
                .await?;
            Self::check(response).await?;
            Ok(())
        })
    }

    fn create_work_item(&self, project_id: Uuid, item: NewWorkItem) -> ApiFuture<'_, Uuid> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.url(&format!("/api/projects/{project_id}/workitems")))
                .bearer_auth(&self.token)
                .json(&item)
                .send()
                .await?;
            let body: IdBody = Self::check(response).await?.json().await?;
            Ok(body.id)
        })
    }

    fn upload_attachment(&self, filename: &str, bytes: Vec<u8>) -> ApiFuture<'_, Uuid> {
        let filename = filename.to_string();
        Box::pin(async move {
            let part = reqwest::multipart::Part::bytes(bytes).file_name(filename);
            let form = reqwest::multipart::Form::new().part("file", part);
            let response = self
                .client
                .post(self.url("/api/attachments"))
                .bearer_auth(&self.token)
                .multipart(form)
                .send()
                .await?;
            let body: IdBody = Self::check(response).await?.json().await?;
            Ok(body.id)
        })
    }

    fn search_parameters(&self, name: &str) -> ApiFuture<'_, Vec<RemoteParameter>> {
        let name = name.to_string();
        Box::pin(async move {
            let response = self
                .client
                .get(self.url("/api/parameters"))
                .query(&[("name", name.as_str())])
                .bearer_auth(&self.token)
                .send()
                .await?;
            let parameters: Vec<RemoteParameter> = Self::check(response).await?.json().await?;
            Ok(parameters)
        })
    }

    fn create_parameter(&self, parameter: Parameter) -> ApiFuture<'_, RemoteParameter> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.url("/api/parameters"))
                .bearer_auth(&self.token)
                .json(&parameter)
                .send()
                .await?;
            let created: RemoteParameter = Self::check(response).await?.json().await?;
            Ok(created)
        })
    }
}
