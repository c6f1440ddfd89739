//! Profile domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use talentscan_shared::portal::{ProfileResponse, UploadPurpose};

/// A student's profile record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentProfile {
    /// Student code (primary key).
    pub code: String,
    /// Display name.
    pub name: String,
    /// Year of study.
    pub year: i32,
    /// Public avatar URL.
    pub image: Option<String>,
    /// Public CV URL.
    pub cv: Option<String>,
    /// Free-text bio.
    pub bio: Option<String>,
    /// LinkedIn profile URL.
    pub linkedin: Option<String>,
    /// GitHub profile URL.
    pub github: Option<String>,
    /// Selected interests.
    pub interests: Vec<String>,
    /// Last modification.
    pub updated_at: DateTime<Utc>,
}

impl From<StudentProfile> for ProfileResponse {
    fn from(p: StudentProfile) -> Self {
        Self {
            code: p.code,
            name: p.name,
            year: p.year,
            image: p.image,
            cv: p.cv,
            bio: p.bio,
            linkedin: p.linkedin,
            github: p.github,
            interests: p.interests,
            updated_at: p.updated_at,
        }
    }
}

/// Profile field holding an uploaded object's URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetField {
    /// Avatar image.
    Image,
    /// Curriculum vitae.
    Cv,
}

impl From<UploadPurpose> for AssetField {
    fn from(purpose: UploadPurpose) -> Self {
        match purpose {
            UploadPurpose::Avatar => Self::Image,
            UploadPurpose::Cv => Self::Cv,
        }
    }
}

/// Outcome of overwriting an asset field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSwap {
    /// URL the field held before the write.
    pub previous: Option<String>,
}

/// Body of `PATCH /api/students/{code}`.
///
/// Absent fields are left untouched; an empty link clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New bio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// New LinkedIn URL, or empty to clear.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    /// New GitHub URL, or empty to clear.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    /// Replacement interest list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
}

impl ProfileUpdate {
    /// Whether the update touches nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bio.is_none()
            && self.linkedin.is_none()
            && self.github.is_none()
            && self.interests.is_none()
    }

    /// Normalize into column-level changes.
    ///
    /// Empty strings become [`FieldChange::Clear`]; interests are trimmed.
    #[must_use]
    pub fn into_changes(self) -> ProfileChanges {
        ProfileChanges {
            bio: FieldChange::from_text(self.bio),
            linkedin: FieldChange::from_text(self.linkedin),
            github: FieldChange::from_text(self.github),
            interests: self
                .interests
                .map(|list| list.iter().map(|i| i.trim().to_string()).collect()),
        }
    }
}

/// Change to one nullable text column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldChange {
    /// Leave as is.
    #[default]
    Keep,
    /// Set to NULL.
    Clear,
    /// Set to the value.
    Set(String),
}

impl FieldChange {
    fn from_text(value: Option<String>) -> Self {
        match value {
            None => Self::Keep,
            Some(v) if v.trim().is_empty() => Self::Clear,
            Some(v) => Self::Set(v.trim().to_string()),
        }
    }

    /// Resolve against the current value.
    #[must_use]
    pub fn apply(&self, current: Option<String>) -> Option<String> {
        match self {
            Self::Keep => current,
            Self::Clear => None,
            Self::Set(v) => Some(v.clone()),
        }
    }
}

/// Validated, normalized profile changes handed to the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    /// Bio change.
    pub bio: FieldChange,
    /// LinkedIn change.
    pub linkedin: FieldChange,
    /// GitHub change.
    pub github: FieldChange,
    /// Replacement interests, if any.
    pub interests: Option<Vec<String>>,
}
