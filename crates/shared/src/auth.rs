//! Session claims carried in the session cookie.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of the principal behind a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A student with a profile.
    Student,
    /// A company representative.
    Company,
    /// Portal staff.
    Admin,
}

impl Role {
    /// Wire/database string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Company => "company",
            Self::Admin => "admin",
        }
    }
}

/// JWT claims for session tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Role of the user.
    pub role: Role,
    /// Student code, present for student sessions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, role: Role, code: Option<&str>, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role,
            code: code.map(String::from),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the student code, if this is a student session.
    #[must_use]
    pub fn student_code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Whether this session may modify the profile identified by `code`.
    #[must_use]
    pub fn can_edit(&self, code: &str) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Student => self.student_code() == Some(code),
            Role::Company => false,
        }
    }
}
