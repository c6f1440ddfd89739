//! Upload service implementation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use talentscan_shared::portal::UploadPurpose;
use talentscan_shared::types::UploadId;
use tracing::{debug, error, info, warn};

use super::error::UploadError;
use super::types::{
    ConfirmedUpload, IssuedSlot, SlotState, SweepReport, UploadPolicy, UploadSlot, essence,
};
use crate::profile::ProfileRepository;
use crate::storage::{ObjectKey, ObjectStore, object_from_public_url};

/// Repository trait for upload slot persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Persist a freshly issued slot.
    async fn insert(&self, slot: &UploadSlot) -> Result<(), UploadError>;

    /// Find a slot by id.
    async fn find(&self, id: UploadId) -> Result<Option<UploadSlot>, UploadError>;

    /// Move a pending slot that has not expired by `bound_at` to bound.
    /// Returns `false` if it was not pending or had already expired.
    async fn mark_bound(
        &self,
        id: UploadId,
        url: &str,
        bound_at: DateTime<Utc>,
    ) -> Result<bool, UploadError>;

    /// Move a bound slot back to pending. Returns `false` if it was not bound.
    async fn release(&self, id: UploadId) -> Result<bool, UploadError>;

    /// Pending slots whose expiry is at or before `now`, oldest first.
    async fn list_expired_pending(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<UploadSlot>, UploadError>;

    /// Delete a slot.
    async fn remove(&self, id: UploadId) -> Result<(), UploadError>;
}

/// Issues, confirms and garbage-collects upload slots.
pub struct UploadService {
    store: Arc<dyn ObjectStore>,
    slots: Arc<dyn SlotRepository>,
    profiles: Arc<dyn ProfileRepository>,
    policy: UploadPolicy,
}

impl UploadService {
    /// Create a new upload service.
    #[must_use]
    pub fn new(
        store: Arc<dyn ObjectStore>,
        slots: Arc<dyn SlotRepository>,
        profiles: Arc<dyn ProfileRepository>,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            store,
            slots,
            profiles,
            policy,
        }
    }

    /// Mint a signed upload URL for `owner_code` and record the pending slot.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedContentType` for content types the purpose does not
    /// accept, or a storage/repository error.
    pub async fn issue_slot(
        &self,
        owner_code: &str,
        purpose: UploadPurpose,
        content_type: &str,
    ) -> Result<IssuedSlot, UploadError> {
        let rule = self.policy.rule(purpose);
        if !rule.allows(content_type) {
            return Err(UploadError::UnsupportedContentType {
                purpose,
                content_type: content_type.to_string(),
            });
        }
        let content_type = essence(content_type);

        let id = UploadId::new();
        let key = ObjectKey::new(purpose, id).to_string();
        let presigned = self
            .store
            .presign_upload(&key, &content_type, self.policy.slot_ttl)
            .await?;

        let slot = UploadSlot {
            id,
            purpose,
            content_type,
            max_size: rule.max_size,
            owner_code: owner_code.to_string(),
            expires_at: presigned.expires_at,
            created_at: Utc::now(),
            state: SlotState::Pending,
        };
        self.slots.insert(&slot).await?;

        info!(upload_id = %id, code = %owner_code, purpose = %purpose, "Upload slot issued");

        Ok(IssuedSlot {
            id,
            url: presigned.url,
            method: presigned.method,
            headers: presigned.headers,
            max_size: rule.max_size,
            expires_at: presigned.expires_at,
            key,
        })
    }

    /// Bind an uploaded object to a student's profile.
    ///
    /// Re-confirming a slot already bound to `code` returns the same URL.
    /// The slot is bound before the profile is written, so the sweeper never
    /// sees a pending slot whose object a profile points to. A failed profile
    /// write releases the slot again and leaves a public object no profile
    /// points to; it is logged and left in place.
    ///
    /// # Errors
    ///
    /// Returns `SlotNotFound`, `SlotExpired` or `SlotConsumed` for unusable
    /// slots, `PurposeMismatch` when the slot was issued for the other field,
    /// `StudentNotFound`, `BlobMissing`, or a storage/repository error.
    pub async fn confirm(
        &self,
        code: &str,
        upload_id: UploadId,
        purpose: UploadPurpose,
    ) -> Result<ConfirmedUpload, UploadError> {
        let now = Utc::now();
        let slot = self
            .slots
            .find(upload_id)
            .await?
            .filter(|slot| slot.owner_code == code)
            .ok_or(UploadError::SlotNotFound(upload_id))?;

        if slot.purpose != purpose {
            return Err(UploadError::PurposeMismatch {
                expected: purpose,
                actual: slot.purpose,
            });
        }

        match &slot.state {
            SlotState::Bound { url, .. } => {
                debug!(upload_id = %upload_id, code = %code, "Upload already bound");
                return Ok(ConfirmedUpload {
                    code: code.to_string(),
                    purpose,
                    url: url.clone(),
                    replaced: None,
                    already_bound: true,
                });
            }
            SlotState::Pending if slot.is_expired(now) => {
                return Err(UploadError::SlotExpired(upload_id));
            }
            SlotState::Pending => {}
        }

        if !self.profiles.exists(code).await? {
            return Err(UploadError::StudentNotFound(code.to_string()));
        }

        let key = slot.key().to_string();
        if !self.store.exists(&key).await? {
            return Err(UploadError::BlobMissing { key });
        }

        let identity = self.store.make_public(&key).await?;
        let url = identity.public_url(self.store.public_base_url());

        if !self.slots.mark_bound(upload_id, &url, Utc::now()).await? {
            return self.resolve_lost_claim(code, upload_id, purpose).await;
        }

        let swap = match self.profiles.set_asset(code, purpose.into(), &url).await {
            Ok(Some(swap)) => swap,
            Ok(None) => {
                error!(key = %key, code = %code, "Published object orphaned: student disappeared");
                self.release_claim(upload_id).await;
                return Err(UploadError::StudentNotFound(code.to_string()));
            }
            Err(e) => {
                error!(key = %key, code = %code, error = %e, "Published object orphaned: profile update failed");
                self.release_claim(upload_id).await;
                return Err(e.into());
            }
        };

        info!(upload_id = %upload_id, code = %code, purpose = %purpose, "Upload confirmed");

        if let Some(previous) = swap.previous.as_deref().filter(|prev| *prev != url) {
            self.delete_superseded(previous).await;
        }

        Ok(ConfirmedUpload {
            code: code.to_string(),
            purpose,
            url,
            replaced: swap.previous,
            already_bound: false,
        })
    }

    /// Outcome of a confirmation whose conditional bind matched no pending slot.
    async fn resolve_lost_claim(
        &self,
        code: &str,
        upload_id: UploadId,
        purpose: UploadPurpose,
    ) -> Result<ConfirmedUpload, UploadError> {
        match self.slots.find(upload_id).await?.map(|slot| slot.state) {
            Some(SlotState::Bound { url, .. }) => {
                warn!(upload_id = %upload_id, "Upload slot was bound concurrently");
                Ok(ConfirmedUpload {
                    code: code.to_string(),
                    purpose,
                    url,
                    replaced: None,
                    already_bound: true,
                })
            }
            Some(SlotState::Pending) | None => Err(UploadError::SlotExpired(upload_id)),
        }
    }

    async fn release_claim(&self, upload_id: UploadId) {
        match self.slots.release(upload_id).await {
            Ok(true) => debug!(upload_id = %upload_id, "Upload slot released"),
            Ok(false) => warn!(upload_id = %upload_id, "Upload slot was not bound on release"),
            Err(e) => warn!(upload_id = %upload_id, error = %e, "Failed to release upload slot"),
        }
    }

    /// Best-effort removal of an object a profile no longer points to.
    async fn delete_superseded(&self, previous_url: &str) {
        let Some(object) = object_from_public_url(
            self.store.public_base_url(),
            self.store.bucket(),
            previous_url,
        ) else {
            debug!(url = %previous_url, "Superseded asset is outside the bucket, keeping it");
            return;
        };

        match self.store.delete(&object).await {
            Ok(()) => debug!(key = %object, "Superseded asset deleted"),
            Err(e) => warn!(key = %object, error = %e, "Failed to delete superseded asset"),
        }
    }

    /// Remove up to `batch` expired pending slots and their objects.
    ///
    /// Slots whose object cannot be deleted are kept for the next sweep.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot store cannot be read or written.
    pub async fn sweep_expired(
        &self,
        now: DateTime<Utc>,
        batch: u64,
    ) -> Result<SweepReport, UploadError> {
        let expired = self.slots.list_expired_pending(now, batch).await?;
        let mut report = SweepReport {
            scanned: expired.len(),
            ..SweepReport::default()
        };

        for slot in expired {
            let key = slot.key().to_string();
            if let Err(e) = self.store.delete(&key).await {
                warn!(upload_id = %slot.id, key = %key, error = %e, "Failed to delete expired upload");
                report.failed += 1;
                continue;
            }
            self.slots.remove(slot.id).await?;
            report.removed += 1;
        }

        if report.scanned > 0 {
            info!(
                scanned = report.scanned,
                removed = report.removed,
                failed = report.failed,
                "Expired upload slots swept"
            );
        }

        Ok(report)
    }
}
