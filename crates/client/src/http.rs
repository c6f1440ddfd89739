//! `reqwest` implementation of [`PortalClient`].

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, header};
use serde::de::DeserializeOwned;
use talentscan_core::editor::FileUpload;
use talentscan_core::profile::ProfileUpdate;
use talentscan_shared::portal::{
    ConfirmUploadRequest, ConfirmUploadResponse, IssueSlotRequest, ProfileResponse, SlotResponse,
    UploadPurpose,
};
use talentscan_shared::types::UploadId;
use tracing::debug;

use crate::error::ClientError;
use crate::port::PortalClient;

/// Portal client carrying a session cookie.
#[derive(Clone)]
pub struct HttpPortalClient {
    http: reqwest::Client,
    base_url: String,
    cookie: String,
}

impl std::fmt::Debug for HttpPortalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPortalClient")
            .field("base_url", &self.base_url)
            .field("cookie", &"[hidden]")
            .finish_non_exhaustive()
    }
}

impl HttpPortalClient {
    /// Create a client for `base_url` (e.g. `https://portal.example.com`).
    #[must_use]
    pub fn new(base_url: impl Into<String>, cookie_name: &str, session_token: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, cookie_name, session_token)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        cookie_name: &str,
        session_token: &str,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cookie: format!("{cookie_name}={session_token}"),
        }
    }

    fn api(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/api{path}", self.base_url))
            .header(header::COOKIE, &self.cookie)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let body = response.bytes().await?;
        Err(ClientError::from_response(status.as_u16(), &body))
    }
}

#[async_trait]
impl PortalClient for HttpPortalClient {
    async fn get_profile(&self, code: &str) -> Result<ProfileResponse, ClientError> {
        Self::send(self.api(Method::GET, &format!("/students/{code}"))).await
    }

    async fn issue_slot(&self, request: &IssueSlotRequest) -> Result<SlotResponse, ClientError> {
        Self::send(self.api(Method::POST, "/uploads").json(request)).await
    }

    async fn upload_to_slot(
        &self,
        slot: &SlotResponse,
        file: &FileUpload,
    ) -> Result<(), ClientError> {
        let method = Method::from_bytes(slot.method.as_bytes()).unwrap_or(Method::PUT);
        let mut request = self.http.request(method, &slot.url);
        for (name, value) in &slot.headers {
            request = request.header(name, value);
        }

        let response = request.body(file.bytes.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Storage {
                status: status.as_u16(),
            });
        }

        debug!(upload_id = %slot.id, size = file.len(), "Uploaded to slot");
        Ok(())
    }

    async fn confirm_upload(
        &self,
        code: &str,
        purpose: UploadPurpose,
        upload_id: UploadId,
    ) -> Result<ConfirmUploadResponse, ClientError> {
        let path = format!("/students/{code}/{purpose}");
        Self::send(self.api(Method::POST, &path).json(&ConfirmUploadRequest { upload_id })).await
    }

    async fn update_profile(
        &self,
        code: &str,
        update: &ProfileUpdate,
    ) -> Result<ProfileResponse, ClientError> {
        Self::send(self.api(Method::PATCH, &format!("/students/{code}")).json(update)).await
    }
}
