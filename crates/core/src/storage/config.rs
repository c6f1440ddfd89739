//! Storage configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use talentscan_shared::config::{StorageBackend, StorageSettings};

use super::error::StorageError;

/// Storage provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// Google Cloud Storage.
    Gcs {
        /// Bucket name.
        bucket: String,
        /// Service account JSON file used for signing.
        credential_path: Option<PathBuf>,
        /// Endpoint override (emulators).
        endpoint: Option<String>,
        /// Static OAuth token for ACL calls; metadata server when absent.
        access_token: Option<String>,
    },
    /// S3-compatible storage: MinIO, Cloudflare R2, AWS S3
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// Access key ID.
        access_key_id: String,
        /// Secret access key.
        secret_access_key: String,
        /// Region.
        region: String,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Bucket name used when building public URLs.
        bucket: String,
        /// Root directory path.
        root: PathBuf,
    },
    /// In-process memory (tests only)
    Memory {
        /// Bucket name used when building public URLs.
        bucket: String,
    },
}

impl StorageProvider {
    /// Create a GCS provider with ambient credentials.
    #[must_use]
    pub fn gcs(bucket: impl Into<String>) -> Self {
        Self::Gcs {
            bucket: bucket.into(),
            credential_path: None,
            endpoint: None,
            access_token: None,
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(bucket: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self::LocalFs {
            bucket: bucket.into(),
            root: root.into(),
        }
    }

    /// Create an in-memory provider (tests only).
    #[must_use]
    pub fn memory(bucket: impl Into<String>) -> Self {
        Self::Memory {
            bucket: bucket.into(),
        }
    }

    /// Get the provider name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gcs { .. } => "gcs",
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
            Self::Memory { .. } => "memory",
        }
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        match self {
            Self::Gcs { bucket, .. }
            | Self::S3 { bucket, .. }
            | Self::LocalFs { bucket, .. }
            | Self::Memory { bucket } => bucket,
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Base of public object URLs, without trailing slash.
    pub public_base_url: String,
}

impl StorageConfig {
    /// Public URL base used by Google Cloud Storage.
    pub const GCS_PUBLIC_BASE_URL: &'static str = "https://storage.googleapis.com";

    /// Create a new storage config with the GCS public URL base.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            public_base_url: Self::GCS_PUBLIC_BASE_URL.to_string(),
        }
    }

    /// Set the public URL base.
    #[must_use]
    pub fn with_public_base_url(mut self, base: impl Into<String>) -> Self {
        self.public_base_url = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Build from application settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected backend is missing required settings.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        let bucket = settings.bucket.clone();
        let provider = match settings.backend {
            StorageBackend::Gcs => StorageProvider::Gcs {
                bucket,
                credential_path: settings.credential_path.as_ref().map(PathBuf::from),
                endpoint: settings.endpoint.clone(),
                access_token: settings.access_token.clone(),
            },
            StorageBackend::S3 => {
                let required = |value: &Option<String>, name: &str| {
                    value
                        .clone()
                        .ok_or_else(|| StorageError::configuration(format!("storage.{name} is required for s3")))
                };
                StorageProvider::S3 {
                    endpoint: required(&settings.endpoint, "endpoint")?,
                    bucket,
                    access_key_id: required(&settings.access_key_id, "access_key_id")?,
                    secret_access_key: required(&settings.secret_access_key, "secret_access_key")?,
                    region: settings.region.clone().unwrap_or_else(|| "auto".to_string()),
                }
            }
            StorageBackend::Local => StorageProvider::local_fs(bucket, &settings.root),
            StorageBackend::Memory => StorageProvider::memory(bucket),
        };

        Ok(Self::new(provider).with_public_base_url(settings.public_base_url.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_provider_gcs() {
        let provider = StorageProvider::gcs("fair-uploads");
        assert_eq!(provider.name(), "gcs");
        assert_eq!(provider.bucket(), "fair-uploads");
    }

    #[test]
    fn test_storage_provider_local() {
        let provider = StorageProvider::local_fs("dev-bucket", "./storage");
        assert_eq!(provider.name(), "local");
        assert_eq!(provider.bucket(), "dev-bucket");
    }

    #[test]
    fn test_public_base_url_trailing_slash_trimmed() {
        let config = StorageConfig::new(StorageProvider::memory("b"))
            .with_public_base_url("http://localhost:4443/");
        assert_eq!(config.public_base_url, "http://localhost:4443");
    }

    #[test]
    fn test_from_settings_defaults_to_gcs() {
        let config = StorageConfig::from_settings(&StorageSettings::default()).unwrap();
        assert_eq!(config.provider.name(), "gcs");
        assert_eq!(config.provider.bucket(), "talentscan-uploads");
        assert_eq!(config.public_base_url, StorageConfig::GCS_PUBLIC_BASE_URL);
    }

    #[test]
    fn test_from_settings_s3_requires_credentials() {
        let settings = StorageSettings {
            backend: StorageBackend::S3,
            endpoint: Some("http://minio:9000".into()),
            ..StorageSettings::default()
        };
        let err = StorageConfig::from_settings(&settings).unwrap_err();
        assert!(matches!(err, StorageError::Configuration(_)));
    }
}
