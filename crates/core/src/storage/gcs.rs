//! Object ACL publishing through the GCS JSON API.
//!
//! OpenDAL covers reads, writes and presigning but not per-object ACLs, so
//! publishing an uploaded object goes straight to the JSON API.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use super::error::StorageError;

const DEFAULT_API_BASE: &str = "https://storage.googleapis.com";
const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";
/// Metadata tokens live for an hour; refresh well before that.
const TOKEN_TTL: Duration = Duration::from_secs(45 * 60);

#[derive(Debug, Clone)]
enum TokenSource {
    Static(Arc<str>),
    Metadata,
}

#[derive(Deserialize)]
struct MetadataToken {
    access_token: String,
}

/// Grants `allUsers:READER` on objects of one bucket.
#[derive(Debug, Clone)]
pub(crate) struct GcsPublisher {
    http: reqwest::Client,
    api_base: String,
    bucket: String,
    token_source: TokenSource,
    tokens: Cache<(), Arc<str>>,
}

impl GcsPublisher {
    pub(crate) fn new(bucket: &str, endpoint: Option<&str>, access_token: Option<&str>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: endpoint
                .unwrap_or(DEFAULT_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            bucket: bucket.to_string(),
            token_source: access_token
                .map_or(TokenSource::Metadata, |t| TokenSource::Static(Arc::from(t))),
            tokens: Cache::builder()
                .max_capacity(1)
                .time_to_live(TOKEN_TTL)
                .build(),
        }
    }

    async fn token(&self) -> Result<Arc<str>, StorageError> {
        match &self.token_source {
            TokenSource::Static(token) => Ok(token.clone()),
            TokenSource::Metadata => self
                .tokens
                .try_get_with((), fetch_metadata_token(&self.http))
                .await
                .map_err(|e| StorageError::operation(e.to_string())),
        }
    }

    /// ACL collection of one object; the object name is a single path segment.
    fn acl_url(&self, key: &str) -> Result<reqwest::Url, StorageError> {
        let mut url = reqwest::Url::parse(&self.api_base)
            .map_err(|e| StorageError::configuration(format!("GCS endpoint: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| StorageError::configuration("GCS endpoint cannot be a base URL"))?
            .pop_if_empty()
            .extend(["storage", "v1", "b", &self.bucket, "o", key, "acl"]);
        Ok(url)
    }

    /// Insert a public-read ACL entry on `key`.
    ///
    /// Re-publishing an already public object succeeds.
    pub(crate) async fn make_public(&self, key: &str) -> Result<(), StorageError> {
        let url = self.acl_url(key)?;
        let token = self.token().await?;

        let response = self
            .http
            .post(url)
            .bearer_auth(&*token)
            .json(&json!({ "entity": "allUsers", "role": "READER" }))
            .send()
            .await
            .map_err(|e| StorageError::publish(key, e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(StorageError::not_found(key)),
            status => Err(StorageError::publish(key, format!("GCS returned {status}"))),
        }
    }
}

async fn fetch_metadata_token(http: &reqwest::Client) -> Result<Arc<str>, StorageError> {
    let token: MetadataToken = http
        .get(METADATA_TOKEN_URL)
        .header("Metadata-Flavor", "Google")
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| StorageError::operation(format!("metadata token: {e}")))?
        .json()
        .await
        .map_err(|e| StorageError::operation(format!("metadata token: {e}")))?;

    Ok(Arc::from(token.access_token))
}
