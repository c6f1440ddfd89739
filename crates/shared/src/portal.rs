//! Wire types exchanged between the portal API and its clients.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CompanyId, UploadId};

/// What an uploaded object is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadPurpose {
    /// Profile picture.
    Avatar,
    /// Curriculum vitae.
    Cv,
}

impl UploadPurpose {
    /// All purposes.
    pub const ALL: [Self; 2] = [Self::Avatar, Self::Cv];

    /// Wire/database string value; also the object key prefix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Avatar => "avatar",
            Self::Cv => "cv",
        }
    }

    /// Parse from wire/database string value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "avatar" => Some(Self::Avatar),
            "cv" => Some(Self::Cv),
            _ => None,
        }
    }
}

impl fmt::Display for UploadPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /api/uploads`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueSlotRequest {
    /// Purpose of the upload.
    pub purpose: UploadPurpose,
    /// Declared MIME type of the object.
    pub content_type: String,
}

/// A freshly minted upload slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotResponse {
    /// Upload identifier, passed back on confirmation.
    pub id: UploadId,
    /// Signed URL the client writes to.
    pub url: String,
    /// HTTP method for the signed URL.
    pub method: String,
    /// Headers the client must send with the upload.
    pub headers: HashMap<String, String>,
    /// Maximum object size in bytes.
    pub max_size: u64,
    /// When the signed URL stops working.
    pub expiry: DateTime<Utc>,
    /// Object key the upload lands at.
    pub key: String,
}

/// Body of `POST /api/students/{code}/avatar` and `/cv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmUploadRequest {
    /// Identifier returned by slot issuance.
    pub upload_id: UploadId,
}

/// Result of a confirmed upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmUploadResponse {
    /// Owning student code.
    pub user_code: String,
    /// Owning student code (alias kept for older clients).
    pub code: String,
    /// Public URL of the bound object.
    pub url: String,
}

/// A student profile as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// Student code.
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

/// One entry of a student's recent activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    /// Company that saved the student.
    pub company_id: CompanyId,
    /// Company display name.
    pub company_name: String,
    /// When the profile was saved.
    pub saved_at: DateTime<Utc>,
}

/// Body of `GET /api/students/{code}/history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    /// Student code.
    pub code: String,
    /// Number of times the student was scanned.
    pub scans: u64,
    /// Number of times the profile was saved.
    pub saves: u64,
    /// Companies that have not scanned the student yet.
    pub companies_left: u64,
    /// Most recent saves, newest first.
    pub recent: Vec<HistoryItem>,
}

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: String,
    /// HTTP status.
    pub status: u16,
    /// Human-readable message.
    pub message: String,
    /// Field-level violations, for validation errors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_purpose_roundtrip() {
        for purpose in UploadPurpose::ALL {
            assert_eq!(UploadPurpose::parse(purpose.as_str()), Some(purpose));
        }
        assert_eq!(UploadPurpose::parse("profile"), None);
    }

    #[test]
    fn test_confirm_request_uses_camel_case() {
        let body: ConfirmUploadRequest =
            serde_json::from_str(r#"{"uploadId":"6ba7b811-9dad-11d1-80b4-00c04fd430c8"}"#)
                .unwrap();
        assert_eq!(
            body.upload_id.to_string(),
            "6ba7b811-9dad-11d1-80b4-00c04fd430c8"
        );
    }

    #[test]
    fn test_confirm_request_rejects_non_uuid() {
        let parsed: Result<ConfirmUploadRequest, _> =
            serde_json::from_str(r#"{"uploadId":"abc"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_confirm_response_field_names() {
        let body = ConfirmUploadResponse {
            user_code: "S123".into(),
            code: "S123".into(),
            url: "https://storage.googleapis.com/b/avatar/x".into(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["userCode"], "S123");
        assert_eq!(value["code"], "S123");
    }

    #[test]
    fn test_issue_request_rejects_unknown_purpose() {
        let parsed: Result<IssueSlotRequest, _> =
            serde_json::from_str(r#"{"purpose":"banner","contentType":"image/png"}"#);
        assert!(parsed.is_err());
    }
}
