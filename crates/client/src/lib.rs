//! Client side of the career portal.
//!
//! This crate provides:
//! - [`PortalClient`], the API surface the editor needs
//! - [`HttpPortalClient`], its `reqwest` implementation
//! - [`ProfileEditor`], which drives a profile save through
//!   slot issuance, direct upload, confirmation and the profile PATCH

pub mod editor;
pub mod error;
pub mod http;
pub mod port;

pub use editor::{EditorError, ProfileEditor};
pub use error::ClientError;
pub use http::HttpPortalClient;
pub use port::PortalClient;
