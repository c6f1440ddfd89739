//! Profile editor orchestration.

use talentscan_core::editor::{EditFailure, EditPhase, FileUpload, FormState, InvalidTransition};
use talentscan_shared::portal::{IssueSlotRequest, ProfileResponse, UploadPurpose};
use thiserror::Error;
use tracing::{info, warn};

use crate::error::ClientError;
use crate::port::PortalClient;

/// Why an editor operation did not complete.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The save stopped; the phase is now `Failed` with the same failure.
    #[error("{0}")]
    Failed(EditFailure),

    /// A save is already in flight.
    #[error(transparent)]
    Busy(#[from] InvalidTransition),
}

impl From<EditFailure> for EditorError {
    fn from(failure: EditFailure) -> Self {
        Self::Failed(failure)
    }
}

/// Drives one student's profile edits against a [`PortalClient`].
#[derive(Debug)]
pub struct ProfileEditor<C> {
    client: C,
    phase: EditPhase,
}

impl<C: PortalClient> ProfileEditor<C> {
    /// Create an idle editor.
    pub const fn new(client: C) -> Self {
        Self {
            client,
            phase: EditPhase::Idle,
        }
    }

    /// Current phase.
    pub const fn phase(&self) -> &EditPhase {
        &self.phase
    }

    /// The underlying client.
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Return to `Idle` after a finished save.
    pub fn reset(&mut self) -> Result<(), InvalidTransition> {
        self.enter(EditPhase::Idle)
    }

    /// Upload an already-cropped avatar to its own slot.
    ///
    /// The avatar is not bound to the profile until [`save`](Self::save)
    /// confirms it after the PATCH.
    pub async fn stage_avatar(
        &self,
        form: FormState,
        avatar: FileUpload,
    ) -> Result<FormState, EditorError> {
        let upload_id = self
            .upload(UploadPurpose::Avatar, &avatar)
            .await
            .map_err(|e| EditFailure::AvatarUpload(e.to_string()))?;
        Ok(form.with_avatar_upload(upload_id))
    }

    /// Save the form.
    ///
    /// Order: validate, upload and confirm the CV, PATCH the profile, then
    /// confirm the staged avatar. Nothing is sent when validation fails.
    pub async fn save(
        &mut self,
        code: &str,
        form: &FormState,
    ) -> Result<ProfileResponse, EditorError> {
        self.enter(EditPhase::Validating)?;

        match self.run_save(code, form).await {
            Ok(profile) => {
                self.enter(EditPhase::Done)?;
                info!(code = %code, "Profile saved");
                Ok(profile)
            }
            Err(EditorError::Failed(failure)) => {
                warn!(code = %code, phase = self.phase.name(), error = %failure, "Profile save failed");
                self.enter(EditPhase::Failed(failure.clone()))?;
                Err(EditorError::Failed(failure))
            }
            Err(e) => Err(e),
        }
    }

    async fn run_save(
        &mut self,
        code: &str,
        form: &FormState,
    ) -> Result<ProfileResponse, EditorError> {
        form.validate().map_err(EditFailure::Invalid)?;

        if let Some(cv) = form.cv() {
            self.enter(EditPhase::UploadingCv)?;
            self.upload_and_confirm(code, cv)
                .await
                .map_err(|e| EditFailure::CvUpload(e.to_string()))?;
        }

        self.enter(EditPhase::Saving)?;
        let mut profile = self
            .client
            .update_profile(code, &form.to_update())
            .await
            .map_err(|e| EditFailure::Save(e.to_string()))?;

        if let Some(upload_id) = form.avatar_upload() {
            self.enter(EditPhase::Confirming)?;
            let confirmed = self
                .client
                .confirm_upload(code, UploadPurpose::Avatar, upload_id)
                .await
                .map_err(|e| EditFailure::AvatarConfirm(e.to_string()))?;
            profile.image = Some(confirmed.url);
        }

        Ok(profile)
    }

    async fn upload_and_confirm(&self, code: &str, cv: &FileUpload) -> Result<(), ClientError> {
        let upload_id = self.upload(UploadPurpose::Cv, cv).await?;
        self.client
            .confirm_upload(code, UploadPurpose::Cv, upload_id)
            .await?;
        Ok(())
    }

    async fn upload(
        &self,
        purpose: UploadPurpose,
        file: &FileUpload,
    ) -> Result<talentscan_shared::types::UploadId, ClientError> {
        let slot = self
            .client
            .issue_slot(&IssueSlotRequest {
                purpose,
                content_type: file.content_type.clone(),
            })
            .await?;

        if file.len() > slot.max_size {
            return Err(ClientError::FileTooLarge {
                size: file.len(),
                max: slot.max_size,
            });
        }

        self.client.upload_to_slot(&slot, file).await?;
        Ok(slot.id)
    }

    fn enter(&mut self, next: EditPhase) -> Result<(), InvalidTransition> {
        let current = std::mem::replace(&mut self.phase, EditPhase::Idle);
        match current.clone().transition(next) {
            Ok(phase) => {
                self.phase = phase;
                Ok(())
            }
            Err(e) => {
                self.phase = current;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use talentscan_core::profile::ProfileUpdate;
    use talentscan_shared::portal::{ConfirmUploadResponse, SlotResponse};
    use talentscan_shared::types::UploadId;

    use super::*;

    /// Records every call in order; failures are injected by call name.
    #[derive(Default)]
    struct MockPortal {
        calls: Mutex<Vec<String>>,
        fail: Mutex<Option<&'static str>>,
        max_size: u64,
    }

    impl MockPortal {
        fn new() -> Self {
            Self {
                max_size: 1024,
                ..Self::default()
            }
        }

        fn failing(call: &'static str) -> Self {
            let portal = Self::new();
            *portal.fail.lock().unwrap() = Some(call);
            portal
        }

        fn record(&self, call: String) -> Result<(), ClientError> {
            let name = call.split(' ').next().unwrap_or_default().to_string();
            self.calls.lock().unwrap().push(call);
            if *self.fail.lock().unwrap() == Some(name.as_str()) {
                return Err(ClientError::Api {
                    status: 500,
                    message: "Something went wrong".into(),
                    details: Vec::new(),
                });
            }
            Ok(())
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn profile(code: &str) -> ProfileResponse {
        ProfileResponse {
            code: code.into(),
            name: "Ana".into(),
            year: 3,
            image: None,
            cv: None,
            bio: None,
            linkedin: None,
            github: None,
            interests: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    #[async_trait]
    impl PortalClient for MockPortal {
        async fn get_profile(&self, code: &str) -> Result<ProfileResponse, ClientError> {
            self.record(format!("get {code}"))?;
            Ok(profile(code))
        }

        async fn issue_slot(
            &self,
            request: &IssueSlotRequest,
        ) -> Result<SlotResponse, ClientError> {
            self.record(format!("issue {}", request.purpose))?;
            let id = UploadId::new();
            Ok(SlotResponse {
                id,
                url: format!("https://upload.test/{}/{id}", request.purpose),
                method: "PUT".into(),
                headers: HashMap::new(),
                max_size: self.max_size,
                expiry: Utc::now(),
                key: format!("{}/{id}", request.purpose),
            })
        }

        async fn upload_to_slot(
            &self,
            slot: &SlotResponse,
            _file: &FileUpload,
        ) -> Result<(), ClientError> {
            let purpose = slot.key.split('/').next().unwrap_or_default();
            self.record(format!("upload {purpose}"))
        }

        async fn confirm_upload(
            &self,
            code: &str,
            purpose: UploadPurpose,
            upload_id: UploadId,
        ) -> Result<ConfirmUploadResponse, ClientError> {
            self.record(format!("confirm {purpose}"))?;
            Ok(ConfirmUploadResponse {
                user_code: code.into(),
                code: code.into(),
                url: format!("https://storage.googleapis.com/b/{purpose}/{upload_id}"),
            })
        }

        async fn update_profile(
            &self,
            code: &str,
            update: &ProfileUpdate,
        ) -> Result<ProfileResponse, ClientError> {
            self.record(format!("patch {code}"))?;
            let mut p = profile(code);
            p.bio.clone_from(&update.bio);
            Ok(p)
        }
    }

    fn pdf() -> FileUpload {
        FileUpload::new("application/pdf", vec![0u8; 100])
    }

    fn png(size: usize) -> FileUpload {
        FileUpload::new("image/png", vec![0u8; size])
    }

    #[tokio::test]
    async fn test_save_text_only() {
        let mut editor = ProfileEditor::new(MockPortal::new());
        let form = FormState::default().with_bio("Hello");

        let saved = editor.save("S123", &form).await.unwrap();

        assert_eq!(saved.bio.as_deref(), Some("Hello"));
        assert_eq!(editor.phase(), &EditPhase::Done);
        assert_eq!(editor.client().calls(), vec!["patch S123"]);
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let mut editor = ProfileEditor::new(MockPortal::new());
        let form = FormState::default()
            .with_github("https://gitlab.com/ana")
            .with_cv(pdf());

        let err = editor.save("S123", &form).await.unwrap_err();

        assert!(matches!(err, EditorError::Failed(EditFailure::Invalid(_))));
        assert!(matches!(editor.phase(), EditPhase::Failed(EditFailure::Invalid(_))));
        assert!(editor.client().calls().is_empty());
    }

    #[tokio::test]
    async fn test_cv_confirmed_before_patch_and_avatar_after() {
        let mut editor = ProfileEditor::new(MockPortal::new());
        let form = editor
            .stage_avatar(FormState::default(), png(512))
            .await
            .unwrap();
        let form = form.with_cv(pdf());

        let saved = editor.save("S123", &form).await.unwrap();

        assert_eq!(
            editor.client().calls(),
            vec![
                "issue avatar",
                "upload avatar",
                "issue cv",
                "upload cv",
                "confirm cv",
                "patch S123",
                "confirm avatar",
            ]
        );
        let image = saved.image.unwrap();
        assert!(image.ends_with(&form.avatar_upload().unwrap().to_string()));
    }

    #[tokio::test]
    async fn test_oversized_avatar_is_not_uploaded() {
        let editor = ProfileEditor::new(MockPortal::new());

        let err = editor
            .stage_avatar(FormState::default(), png(4096))
            .await
            .unwrap_err();

        assert!(matches!(err, EditorError::Failed(EditFailure::AvatarUpload(_))));
        assert_eq!(editor.client().calls(), vec!["issue avatar"]);
    }

    #[tokio::test]
    async fn test_failed_patch_is_reported() {
        let mut editor = ProfileEditor::new(MockPortal::failing("patch"));
        let form = FormState::default()
            .with_bio("Hello")
            .with_avatar_upload(UploadId::new());

        let err = editor.save("S123", &form).await.unwrap_err();

        assert!(matches!(err, EditorError::Failed(EditFailure::Save(_))));
        assert!(!editor.client().calls().contains(&"confirm avatar".to_string()));
        assert!(matches!(editor.phase(), EditPhase::Failed(EditFailure::Save(_))));
    }

    #[tokio::test]
    async fn test_cv_failure_stops_before_patch() {
        let mut editor = ProfileEditor::new(MockPortal::failing("confirm"));
        let form = FormState::default().with_cv(pdf());

        let err = editor.save("S123", &form).await.unwrap_err();

        assert!(matches!(err, EditorError::Failed(EditFailure::CvUpload(_))));
        assert!(!editor.client().calls().iter().any(|c| c.starts_with("patch")));
    }

    #[tokio::test]
    async fn test_avatar_confirm_failure_keeps_saved_profile() {
        let mut editor = ProfileEditor::new(MockPortal::failing("confirm"));
        let form = FormState::default().with_avatar_upload(UploadId::new());

        let err = editor.save("S123", &form).await.unwrap_err();

        let EditorError::Failed(failure) = err else {
            panic!("expected a failed save");
        };
        assert!(failure.profile_saved());
    }

    #[tokio::test]
    async fn test_editor_can_save_again_after_failure() {
        let mut editor = ProfileEditor::new(MockPortal::failing("patch"));
        let form = FormState::default().with_bio("Hello");

        assert!(editor.save("S123", &form).await.is_err());
        *editor.client().fail.lock().unwrap() = None;

        assert!(editor.save("S123", &form).await.is_ok());
        editor.reset().unwrap();
        assert_eq!(editor.phase(), &EditPhase::Idle);
    }
}
