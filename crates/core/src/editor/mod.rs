//! Profile editor state: an immutable form value and the phase machine a
//! save goes through.
//!
//! ```text
//! Idle ─► Validating ─► [UploadingCv] ─► Saving ─► [Confirming] ─► Done
//!              │              │             │            │
//!              └──────────────┴─────────────┴────────────┴──► Failed
//! ```
//!
//! The network side lives in the client crate; this module has no I/O.

mod form;
mod phase;

pub use form::{FileUpload, FormState};
pub use phase::{EditFailure, EditPhase, InvalidTransition};
