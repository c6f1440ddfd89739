//! Portal API port.

use async_trait::async_trait;
use talentscan_core::editor::FileUpload;
use talentscan_core::profile::ProfileUpdate;
use talentscan_shared::portal::{
    ConfirmUploadResponse, IssueSlotRequest, ProfileResponse, SlotResponse, UploadPurpose,
};
use talentscan_shared::types::UploadId;

use crate::error::ClientError;

/// Calls the editor makes against the portal and storage.
#[async_trait]
pub trait PortalClient: Send + Sync {
    /// `GET /api/students/{code}`.
    async fn get_profile(&self, code: &str) -> Result<ProfileResponse, ClientError>;

    /// `POST /api/uploads`.
    async fn issue_slot(&self, request: &IssueSlotRequest) -> Result<SlotResponse, ClientError>;

    /// Write `file` to the slot's signed URL.
    async fn upload_to_slot(&self, slot: &SlotResponse, file: &FileUpload)
    -> Result<(), ClientError>;

    /// `POST /api/students/{code}/avatar` or `/cv`.
    async fn confirm_upload(
        &self,
        code: &str,
        purpose: UploadPurpose,
        upload_id: UploadId,
    ) -> Result<ConfirmUploadResponse, ClientError>;

    /// `PATCH /api/students/{code}`.
    async fn update_profile(
        &self,
        code: &str,
        update: &ProfileUpdate,
    ) -> Result<ProfileResponse, ClientError>;
}
