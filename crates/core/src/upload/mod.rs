//! Two-phase uploads for avatars and CVs.
//!
//! A client first asks for a slot and receives a signed URL to write to. After
//! writing, it confirms the slot against a student code; the object is then
//! published and its URL recorded on the profile.
//!
//! ```text
//! issue_slot ──► UploadSlot::Pending ──confirm──► UploadSlot::Bound
//!                      │
//!                      └──expired──► sweep_expired (slot + blob removed)
//! ```

mod error;
mod service;
mod types;

pub use error::UploadError;
pub use service::{SlotRepository, UploadService};
pub use types::{
    ConfirmedUpload, IssuedSlot, PurposeRule, SlotState, SweepReport, UploadPolicy, UploadSlot,
};
