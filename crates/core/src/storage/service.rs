//! Object store implementation using Apache OpenDAL.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use opendal::{ErrorKind, Operator, services};

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;
use super::gcs::GcsPublisher;
use super::store::{ObjectIdentity, ObjectStore, PresignedUrl};

/// OpenDAL-backed object store.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
    publisher: Option<GcsPublisher>,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        let publisher = match &config.provider {
            StorageProvider::Gcs {
                bucket,
                endpoint,
                access_token,
                ..
            } => Some(GcsPublisher::new(
                bucket,
                endpoint.as_deref(),
                access_token.as_deref(),
            )),
            _ => None,
        };

        Ok(Self {
            operator,
            config,
            publisher,
        })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::Gcs {
                bucket,
                credential_path,
                endpoint,
                ..
            } => {
                let mut builder = services::Gcs::default().bucket(bucket);
                if let Some(path) = credential_path {
                    builder = builder.credential_path(
                        path.to_str()
                            .ok_or_else(|| StorageError::configuration("invalid credential path"))?,
                    );
                }
                if let Some(endpoint) = endpoint {
                    builder = builder.endpoint(endpoint);
                }

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            StorageProvider::LocalFs { root, .. } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            StorageProvider::Memory { .. } => Ok(Operator::new(services::Memory::default())
                .map_err(|e| StorageError::configuration(e.to_string()))?
                .finish()),
        }
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

#[async_trait]
impl ObjectStore for StorageService {
    async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<PresignedUrl, StorageError> {
        let presigned = self
            .operator
            .presign_write(key, ttl)
            .await
            .map_err(StorageError::from)?;

        let mut headers: HashMap<String, String> = presigned
            .header()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        headers.insert("Content-Type".to_string(), content_type.to_string());

        Ok(PresignedUrl {
            url: presigned.uri().to_string(),
            method: presigned.method().to_string(),
            expires_at: Utc::now()
                + chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
            headers,
        })
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        match self.operator.stat(key).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn make_public(&self, key: &str) -> Result<ObjectIdentity, StorageError> {
        match &self.publisher {
            Some(publisher) => publisher.make_public(key).await?,
            // Other backends serve objects through their own public base URL.
            None => {
                if !self.exists(key).await? {
                    return Err(StorageError::not_found(key));
                }
            }
        }

        Ok(ObjectIdentity {
            bucket: self.bucket().to_string(),
            object: key.to_string(),
        })
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.operator.delete(key).await.map_err(StorageError::from)
    }

    fn bucket(&self) -> &str {
        self.config.provider.bucket()
    }

    fn public_base_url(&self) -> &str {
        &self.config.public_base_url
    }
}
