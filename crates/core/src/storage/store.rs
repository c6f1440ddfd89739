//! Object store port and addressing helpers.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use talentscan_shared::portal::UploadPurpose;
use talentscan_shared::types::UploadId;

use super::error::StorageError;

/// Presigned URL for a direct-to-storage upload.
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL.
    pub url: String,
    /// HTTP method to use.
    pub method: String,
    /// When the URL expires.
    pub expires_at: DateTime<Utc>,
    /// Required headers for the request.
    pub headers: HashMap<String, String>,
}

/// Key of an uploaded object: `{purpose}/{uploadId}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    /// Purpose prefix.
    pub purpose: UploadPurpose,
    /// Upload identifier.
    pub upload_id: UploadId,
}

impl ObjectKey {
    /// Create a key for an upload.
    #[must_use]
    pub const fn new(purpose: UploadPurpose, upload_id: UploadId) -> Self {
        Self { purpose, upload_id }
    }

    /// Parse a `{purpose}/{uploadId}` key.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        let (purpose, id) = key.split_once('/')?;
        Some(Self {
            purpose: UploadPurpose::parse(purpose)?,
            upload_id: id.parse().ok()?,
        })
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.purpose, self.upload_id)
    }
}

/// Bucket/object identity reported by the backend after publishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectIdentity {
    /// Bucket holding the object.
    pub bucket: String,
    /// Object name inside the bucket.
    pub object: String,
}

impl ObjectIdentity {
    /// Canonical public URL: `{base}/{bucket}/{object}`.
    #[must_use]
    pub fn public_url(&self, base: &str) -> String {
        format!("{}/{}/{}", base.trim_end_matches('/'), self.bucket, self.object)
    }
}

/// Inverse of [`ObjectIdentity::public_url`] for objects in `bucket`.
///
/// Returns `None` for URLs that point elsewhere.
#[must_use]
pub fn object_from_public_url(base: &str, bucket: &str, url: &str) -> Option<String> {
    let prefix = format!("{}/{}/", base.trim_end_matches('/'), bucket);
    url.strip_prefix(&prefix)
        .filter(|object| !object.is_empty())
        .map(String::from)
}

/// Object storage capability.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Mint a signed URL allowing one direct write to `key`.
    async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<PresignedUrl, StorageError>;

    /// Whether an object exists at `key`.
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;

    /// Make the object at `key` publicly readable.
    async fn make_public(&self, key: &str) -> Result<ObjectIdentity, StorageError>;

    /// Delete the object at `key`. Deleting a missing object succeeds.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Bucket objects are stored in.
    fn bucket(&self) -> &str;

    /// Base of public object URLs.
    fn public_base_url(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use uuid::Uuid;

    #[test]
    fn test_object_key_format() {
        let id = UploadId::from_uuid(
            Uuid::parse_str("6ba7b811-9dad-11d1-80b4-00c04fd430c8").expect("valid uuid"),
        );
        let key = ObjectKey::new(UploadPurpose::Avatar, id);
        assert_eq!(key.to_string(), "avatar/6ba7b811-9dad-11d1-80b4-00c04fd430c8");
        assert_eq!(ObjectKey::parse(&key.to_string()), Some(key));
    }

    #[test]
    fn test_object_key_parse_rejects_foreign_keys() {
        assert_eq!(ObjectKey::parse("profile/6ba7b811-9dad-11d1-80b4-00c04fd430c8"), None);
        assert_eq!(ObjectKey::parse("cv/not-a-uuid"), None);
        assert_eq!(ObjectKey::parse("cv"), None);
    }

    #[test]
    fn test_public_url_matches_gcs_format() {
        let identity = ObjectIdentity {
            bucket: "fair-uploads".into(),
            object: "avatar/abc".into(),
        };
        assert_eq!(
            identity.public_url("https://storage.googleapis.com"),
            "https://storage.googleapis.com/fair-uploads/avatar/abc"
        );
    }

    #[test]
    fn test_object_from_public_url_ignores_other_buckets() {
        let base = "https://storage.googleapis.com";
        assert_eq!(
            object_from_public_url(base, "fair", "https://storage.googleapis.com/fair/cv/x"),
            Some("cv/x".to_string())
        );
        assert_eq!(
            object_from_public_url(base, "fair", "https://storage.googleapis.com/other/cv/x"),
            None
        );
        assert_eq!(
            object_from_public_url(base, "fair", "https://cdn.example.com/fair/cv/x"),
            None
        );
    }

    proptest! {
        #[test]
        fn prop_public_url_roundtrip(
            bucket in "[a-z][a-z0-9-]{2,30}",
            purpose_idx in 0usize..2,
        ) {
            let key = ObjectKey::new(UploadPurpose::ALL[purpose_idx], UploadId::new());
            let identity = ObjectIdentity { bucket: bucket.clone(), object: key.to_string() };
            let url = identity.public_url("https://storage.googleapis.com");

            prop_assert!(url.starts_with("https://storage.googleapis.com/"));
            let object = object_from_public_url("https://storage.googleapis.com", &bucket, &url);
            prop_assert_eq!(object, Some(key.to_string()));
            prop_assert_eq!(ObjectKey::parse(&key.to_string()), Some(key));
        }
    }
}
