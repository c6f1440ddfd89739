//! Save phases and their legal transitions.

use std::fmt;

use thiserror::Error;

use crate::profile::ProfileValidationError;

/// Why a save stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditFailure {
    /// The form breaks profile rules; nothing was sent.
    Invalid(Vec<ProfileValidationError>),
    /// The avatar could not be staged.
    AvatarUpload(String),
    /// The CV could not be uploaded or confirmed; the profile was not saved.
    CvUpload(String),
    /// The profile PATCH failed.
    Save(String),
    /// The profile was saved but the avatar was not bound to it.
    AvatarConfirm(String),
}

impl EditFailure {
    /// Whether the profile text fields reached the server.
    #[must_use]
    pub const fn profile_saved(&self) -> bool {
        matches!(self, Self::AvatarConfirm(_))
    }
}

impl fmt::Display for EditFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(violations) => {
                f.write_str("please fix the highlighted fields: ")?;
                let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
                f.write_str(&messages.join("; "))
            }
            Self::AvatarUpload(msg) => write!(f, "avatar upload failed: {msg}"),
            Self::CvUpload(msg) => write!(f, "CV upload failed: {msg}"),
            Self::Save(msg) => write!(f, "profile could not be saved: {msg}"),
            Self::AvatarConfirm(msg) => {
                write!(f, "profile saved, but the new avatar was not applied: {msg}")
            }
        }
    }
}

/// Where an edit session is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditPhase {
    /// Nothing in flight.
    Idle,
    /// Checking the form locally.
    Validating,
    /// Uploading and confirming the CV.
    UploadingCv,
    /// PATCHing the profile.
    Saving,
    /// Confirming the staged avatar.
    Confirming,
    /// The save completed.
    Done,
    /// The save stopped.
    Failed(EditFailure),
}

impl EditPhase {
    /// Short name, for logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::UploadingCv => "uploading_cv",
            Self::Saving => "saving",
            Self::Confirming => "confirming",
            Self::Done => "done",
            Self::Failed(_) => "failed",
        }
    }

    /// Whether a request may be in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::Validating | Self::UploadingCv | Self::Saving | Self::Confirming
        )
    }

    /// Whether the session has finished, successfully or not.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed(_))
    }

    /// Move to `next` if the machine allows it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` for edges the machine does not have.
    pub fn transition(self, next: Self) -> Result<Self, InvalidTransition> {
        let allowed = match (&self, &next) {
            (Self::Idle | Self::Done | Self::Failed(_), Self::Validating)
            | (Self::Validating, Self::UploadingCv | Self::Saving)
            | (Self::UploadingCv, Self::Saving)
            | (Self::Saving, Self::Confirming | Self::Done)
            | (Self::Confirming, Self::Done)
            | (Self::Done | Self::Failed(_), Self::Idle) => true,
            (from, Self::Failed(_)) => from.is_busy(),
            _ => false,
        };

        if allowed {
            Ok(next)
        } else {
            Err(InvalidTransition {
                from: self.name(),
                to: next.name(),
            })
        }
    }
}

/// A transition the machine does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot move from {from} to {to}")]
pub struct InvalidTransition {
    /// Phase left.
    pub from: &'static str,
    /// Phase requested.
    pub to: &'static str,
}
