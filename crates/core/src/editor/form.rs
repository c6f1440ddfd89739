//! Immutable editor form state.

use bytes::Bytes;
use talentscan_shared::types::UploadId;

use crate::profile::{ProfileUpdate, ProfileValidationError, StudentProfile};

/// A file picked by the user, held in memory until the save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// MIME type sent with the upload.
    pub content_type: String,
    /// File contents.
    pub bytes: Bytes,
}

impl FileUpload {
    /// Create a file upload.
    #[must_use]
    pub fn new(content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Size in bytes.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Whether the file is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Editable profile fields plus staged uploads.
///
/// Every `with_*` call returns a new value; nothing is mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    bio: String,
    linkedin: String,
    github: String,
    interests: Vec<String>,
    cv: Option<FileUpload>,
    avatar_upload: Option<UploadId>,
}

impl FormState {
    /// Seed the form from a loaded profile.
    #[must_use]
    pub fn from_profile(profile: &StudentProfile) -> Self {
        Self {
            bio: profile.bio.clone().unwrap_or_default(),
            linkedin: profile.linkedin.clone().unwrap_or_default(),
            github: profile.github.clone().unwrap_or_default(),
            interests: profile.interests.clone(),
            cv: None,
            avatar_upload: None,
        }
    }

    /// Bio text.
    #[must_use]
    pub fn bio(&self) -> &str {
        &self.bio
    }

    /// LinkedIn URL text.
    #[must_use]
    pub fn linkedin(&self) -> &str {
        &self.linkedin
    }

    /// GitHub URL text.
    #[must_use]
    pub fn github(&self) -> &str {
        &self.github
    }

    /// Selected interests.
    #[must_use]
    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    /// CV waiting to be uploaded on save.
    #[must_use]
    pub const fn cv(&self) -> Option<&FileUpload> {
        self.cv.as_ref()
    }

    /// Uploaded avatar waiting for confirmation on save.
    #[must_use]
    pub const fn avatar_upload(&self) -> Option<UploadId> {
        self.avatar_upload
    }

    /// Replace the bio.
    #[must_use]
    pub fn with_bio(self, bio: impl Into<String>) -> Self {
        Self {
            bio: bio.into(),
            ..self
        }
    }

    /// Replace the LinkedIn URL.
    #[must_use]
    pub fn with_linkedin(self, url: impl Into<String>) -> Self {
        Self {
            linkedin: url.into(),
            ..self
        }
    }

    /// Replace the GitHub URL.
    #[must_use]
    pub fn with_github(self, url: impl Into<String>) -> Self {
        Self {
            github: url.into(),
            ..self
        }
    }

    /// Toggle an interest on or off.
    #[must_use]
    pub fn with_interest_toggled(self, interest: &str) -> Self {
        let mut interests = self.interests;
        if let Some(pos) = interests.iter().position(|i| i == interest) {
            interests.remove(pos);
        } else {
            interests.push(interest.to_string());
        }
        Self { interests, ..self }
    }

    /// Attach a CV to upload on save.
    #[must_use]
    pub fn with_cv(self, cv: FileUpload) -> Self {
        Self {
            cv: Some(cv),
            ..self
        }
    }

    /// Record an avatar already written to its upload slot.
    #[must_use]
    pub fn with_avatar_upload(self, upload_id: UploadId) -> Self {
        Self {
            avatar_upload: Some(upload_id),
            ..self
        }
    }

    /// Drop staged uploads, keeping the text fields.
    #[must_use]
    pub fn without_uploads(self) -> Self {
        Self {
            cv: None,
            avatar_upload: None,
            ..self
        }
    }

    /// Body for the profile PATCH.
    #[must_use]
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            bio: Some(self.bio.clone()),
            linkedin: Some(self.linkedin.clone()),
            github: Some(self.github.clone()),
            interests: Some(self.interests.clone()),
        }
    }

    /// Check the text fields against the profile rules.
    ///
    /// # Errors
    ///
    /// Returns every violation found.
    pub fn validate(&self) -> Result<(), Vec<ProfileValidationError>> {
        self.to_update().validate()
    }
}
