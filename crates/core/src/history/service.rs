//! History service implementation.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::HistoryError;
use super::types::{HistoryCounters, HistoryEntry, StudentHistory};

/// Repository trait for scan/save statistics.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Counters for a student. `None` for unknown codes.
    async fn counters(&self, code: &str) -> Result<Option<HistoryCounters>, HistoryError>;

    /// Most recent saves of a student, newest first.
    async fn recent_saves(&self, code: &str, limit: u64)
    -> Result<Vec<HistoryEntry>, HistoryError>;
}

/// Builds the history view of a student.
pub struct HistoryService {
    repo: Arc<dyn HistoryRepository>,
    recent_limit: u64,
}

impl HistoryService {
    /// Create a new history service returning at most `recent_limit` entries.
    #[must_use]
    pub fn new(repo: Arc<dyn HistoryRepository>, recent_limit: u64) -> Self {
        Self { repo, recent_limit }
    }

    /// Aggregate counters and recent activity.
    ///
    /// # Errors
    ///
    /// Returns `StudentNotFound` for unknown codes.
    pub async fn get(&self, code: &str) -> Result<StudentHistory, HistoryError> {
        let counters = self
            .repo
            .counters(code)
            .await?
            .ok_or_else(|| HistoryError::StudentNotFound(code.to_string()))?;

        let mut recent = self.repo.recent_saves(code, self.recent_limit).await?;
        recent.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        recent.truncate(usize::try_from(self.recent_limit).unwrap_or(usize::MAX));

        Ok(StudentHistory {
            code: code.to_string(),
            scans: counters.scans,
            saves: counters.saves,
            companies_left: counters.companies_left(),
            recent,
        })
    }
}
