//! Scan and save statistics shown to a student.

mod error;
mod service;
mod types;

pub use error::HistoryError;
pub use service::{HistoryRepository, HistoryService};
pub use types::{HistoryCounters, HistoryEntry, StudentHistory};
