//! Upload domain types.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use talentscan_shared::config::StorageSettings;
use talentscan_shared::portal::{ConfirmUploadResponse, SlotResponse, UploadPurpose};
use talentscan_shared::types::UploadId;

use crate::storage::ObjectKey;

/// Accepted content types and size limit for one purpose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurposeRule {
    /// Maximum object size in bytes.
    pub max_size: u64,
    /// Accepted MIME types, lowercase.
    pub content_types: Vec<String>,
}

impl PurposeRule {
    /// Whether `content_type` is accepted. Parameters such as `charset` are ignored.
    #[must_use]
    pub fn allows(&self, content_type: &str) -> bool {
        let essence = essence(content_type);
        self.content_types.iter().any(|allowed| *allowed == essence)
    }
}

/// MIME type without parameters, lowercased.
pub(crate) fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Per-purpose upload rules and slot lifetime.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    /// Avatar rule.
    pub avatar: PurposeRule,
    /// CV rule.
    pub cv: PurposeRule,
    /// How long an issued slot stays usable.
    pub slot_ttl: Duration,
}

impl UploadPolicy {
    /// Rule for a purpose.
    #[must_use]
    pub const fn rule(&self, purpose: UploadPurpose) -> &PurposeRule {
        match purpose {
            UploadPurpose::Avatar => &self.avatar,
            UploadPurpose::Cv => &self.cv,
        }
    }

    /// Build from storage settings.
    #[must_use]
    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self {
            avatar: PurposeRule {
                max_size: settings.avatar_max_size,
                content_types: vec![
                    "image/png".to_string(),
                    "image/jpeg".to_string(),
                    "image/webp".to_string(),
                ],
            },
            cv: PurposeRule {
                max_size: settings.cv_max_size,
                content_types: vec!["application/pdf".to_string()],
            },
            slot_ttl: Duration::from_secs(settings.upload_ttl_secs),
        }
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::from_settings(&StorageSettings::default())
    }
}

/// Lifecycle of an upload slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotState {
    /// Issued, waiting for confirmation.
    Pending,
    /// Confirmed and recorded on the owner's profile.
    Bound {
        /// Public URL recorded on the profile.
        url: String,
        /// When the slot was bound.
        bound_at: DateTime<Utc>,
    },
}

/// An issued upload authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSlot {
    /// Slot identifier, also the object name suffix.
    pub id: UploadId,
    /// What the upload is for.
    pub purpose: UploadPurpose,
    /// Declared content type.
    pub content_type: String,
    /// Size limit advertised to the client.
    pub max_size: u64,
    /// Student the slot was issued to.
    pub owner_code: String,
    /// When the signed URL stops working.
    pub expires_at: DateTime<Utc>,
    /// When the slot was issued.
    pub created_at: DateTime<Utc>,
    /// Pending or bound.
    pub state: SlotState,
}

impl UploadSlot {
    /// Object key the slot authorizes.
    #[must_use]
    pub const fn key(&self) -> ObjectKey {
        ObjectKey::new(self.purpose, self.id)
    }

    /// Whether the slot can no longer be confirmed for the first time.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.state == SlotState::Pending && self.expires_at <= now
    }
}

/// Result of slot issuance.
#[derive(Debug, Clone)]
pub struct IssuedSlot {
    /// Upload identifier.
    pub id: UploadId,
    /// Signed URL.
    pub url: String,
    /// HTTP method for the signed URL.
    pub method: String,
    /// Headers the client must send.
    pub headers: HashMap<String, String>,
    /// Maximum object size in bytes.
    pub max_size: u64,
    /// When the signed URL expires.
    pub expires_at: DateTime<Utc>,
    /// Object key.
    pub key: String,
}

impl From<IssuedSlot> for SlotResponse {
    fn from(slot: IssuedSlot) -> Self {
        Self {
            id: slot.id,
            url: slot.url,
            method: slot.method,
            headers: slot.headers,
            max_size: slot.max_size,
            expiry: slot.expires_at,
            key: slot.key,
        }
    }
}

/// Result of a confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedUpload {
    /// Student code the object is bound to.
    pub code: String,
    /// Purpose of the upload.
    pub purpose: UploadPurpose,
    /// Public URL now recorded on the profile.
    pub url: String,
    /// URL the profile held before, if any.
    pub replaced: Option<String>,
    /// True when the slot had already been bound by an earlier call.
    pub already_bound: bool,
}

impl From<ConfirmedUpload> for ConfirmUploadResponse {
    fn from(c: ConfirmedUpload) -> Self {
        Self {
            user_code: c.code.clone(),
            code: c.code,
            url: c.url,
        }
    }
}

/// Outcome of one expired-slot sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Expired pending slots examined.
    pub scanned: usize,
    /// Slots removed together with their objects.
    pub removed: usize,
    /// Slots kept because their object could not be deleted.
    pub failed: usize,
}
