//! Student profiles: validation and partial updates.
//!
//! Avatar and CV URLs are not edited here; they are written by upload
//! confirmation through [`ProfileRepository::set_asset`].

mod error;
mod service;
mod types;
mod validation;

pub use error::ProfileError;
#[cfg(test)]
pub(crate) use service::mock;
pub use service::{ProfileRepository, ProfileService};
pub use types::{AssetField, AssetSwap, FieldChange, ProfileChanges, ProfileUpdate, StudentProfile};
pub use validation::{
    BIO_MAX_CHARS, INTEREST_MAX_CHARS, MAX_INTERESTS, ProfileValidationError, is_valid_github,
    is_valid_linkedin, validate_update,
};
