//! Core business logic for Talentscan.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence and object storage are reached through the ports each module defines.
//!
//! # Modules
//!
//! - `storage` - Object storage access (signed uploads, publishing, deletion)
//! - `upload` - Two-phase upload slots: issuance and confirmation
//! - `profile` - Student profile validation and updates
//! - `history` - Scan/save statistics for a student
//! - `editor` - Profile editor form state and phase machine

pub mod editor;
pub mod history;
pub mod profile;
pub mod storage;
pub mod upload;
