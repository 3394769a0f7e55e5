//! API client, the single point of entry for all backend calls.
//!
//! Reads are coalesced through the request coordinator. Writes run under an
//! in-flight flag and invalidate the cached reads they make stale before
//! returning. No other module talks to the backend directly.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::coordinator::{Guarded, RequestCoordinator, RequestKey};
use crate::errors::ApiError;
use crate::models::{ApiResponse, BulkSendForm};

pub mod account;
pub mod contacts;
pub mod emails;
pub mod operations;
#[cfg(test)]
pub(crate) mod testing;

pub use operations::Operation;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

pub mod paths {
    pub const CONTACTS: &str = "/getAllContacts";
    pub const ADD_CONTACT: &str = "/addContact";
    pub const UPDATE_CONTACT: &str = "/updateContact";
    pub const DELETE_CONTACT: &str = "/deleteContact";
    pub const EMAILS: &str = "/emails";
    pub const BULK_SEND: &str = "/emails/bulk-send";
    pub const EMAIL_LOGS: &str = "/emails/logs";
    pub const EMAIL_STATS: &str = "/emails/stats";
    pub const PROFILE: &str = "/user/profile";
    pub const ANALYTICS: &str = "/analytics";
    pub const SETTINGS: &str = "/settings";
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    BulkSend(BulkSendForm),
}

/// A request relative to the backend base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path, RequestBody::Empty)
    }

    pub fn new(method: Method, path: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }
}

/// Moves one request over the wire and hands back the decoded JSON body.
/// Non-2xx statuses come back as [`ApiError::Http`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

/// HTTP transport backed by `reqwest`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            // reqwest sets the multipart content type and boundary itself.
            RequestBody::BulkSend(form) => builder.multipart(build_bulk_form(form)?),
        };

        let response = builder.send().await.map_err(|e| {
            warn!("{} {} failed to send: {}", request.method, url, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        debug!("{} {} -> {}", request.method, url, status);

        if !status.is_success() {
            warn!("{} {} returned {}: {}", request.method, url, status, body);
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(serde_json::json!({ "success": true }));
        }

        serde_json::from_str(&body).map_err(ApiError::from)
    }
}

fn build_bulk_form(form: BulkSendForm) -> Result<Form, ApiError> {
    let resume = Part::bytes(form.resume.bytes().to_vec())
        .file_name(form.resume.file_name().to_string())
        .mime_str(form.resume.mime().as_str())?;

    let mut multipart = Form::new()
        .part("resume", resume)
        .text("contacts", serde_json::to_string(&form.contacts)?);
    if let Some(profile) = &form.user_profile {
        multipart = multipart.text("userProfile", serde_json::to_string(profile)?);
    }
    Ok(multipart)
}

/// Typed access to every backend endpoint.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    coordinator: RequestCoordinator,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, coordinator: RequestCoordinator) -> Self {
        Self {
            transport,
            coordinator,
        }
    }

    pub fn coordinator(&self) -> &RequestCoordinator {
        &self.coordinator
    }

    /// Issues a read through the coalescing cache and decodes the shared body.
    async fn read<T: DeserializeOwned>(
        &self,
        key: RequestKey,
        request: ApiRequest,
    ) -> Result<ApiResponse<T>, ApiError> {
        let transport = Arc::clone(&self.transport);
        let body = self
            .coordinator
            .cached_get(key, move || async move { transport.send(request).await })
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Issues a write under `operation`'s in-flight flag. A successful response
    /// invalidates every cached read the operation can make stale.
    async fn write<T: DeserializeOwned + Send>(
        &self,
        operation: Operation,
        request: ApiRequest,
    ) -> Result<ApiResponse<T>, ApiError> {
        let transport = Arc::clone(&self.transport);
        let coordinator = self.coordinator.clone();

        let outcome = self
            .coordinator
            .guard_once(operation.flag(), move || async move {
                let body = transport.send(request).await?;
                let response: ApiResponse<T> = serde_json::from_value(body)?;
                if response.success {
                    for prefix in operation.invalidates().iter().copied() {
                        coordinator.invalidate(Some(prefix));
                    }
                }
                Ok::<_, ApiError>(response)
            })
            .await;

        match outcome {
            Guarded::Completed(result) => result,
            Guarded::Busy => Ok(ApiResponse::rejected(operation.busy_message())),
        }
    }
}
