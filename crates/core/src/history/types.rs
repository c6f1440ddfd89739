//! History domain types.

use chrono::{DateTime, Utc};
use talentscan_shared::portal::{HistoryItem, HistoryResponse};
use talentscan_shared::types::CompanyId;

/// Raw counts for one student.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryCounters {
    /// Total scans of the student.
    pub scans: u64,
    /// Total saves of the student.
    pub saves: u64,
    /// Companies registered at the fair.
    pub companies_total: u64,
    /// Distinct companies that scanned the student.
    pub companies_scanned: u64,
}

impl HistoryCounters {
    /// Companies that have not scanned the student yet.
    #[must_use]
    pub const fn companies_left(&self) -> u64 {
        self.companies_total.saturating_sub(self.companies_scanned)
    }
}

/// A company saving the student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Saving company.
    pub company_id: CompanyId,
    /// Company display name.
    pub company_name: String,
    /// When the save happened.
    pub saved_at: DateTime<Utc>,
}

/// Aggregated activity for a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentHistory {
    /// Student code.
    pub code: String,
    /// Total scans.
    pub scans: u64,
    /// Total saves.
    pub saves: u64,
    /// Companies that have not scanned the student.
    pub companies_left: u64,
    /// Most recent saves, newest first.
    pub recent: Vec<HistoryEntry>,
}

impl From<StudentHistory> for HistoryResponse {
    fn from(h: StudentHistory) -> Self {
        Self {
            code: h.code,
            scans: h.scans,
            saves: h.saves,
            companies_left: h.companies_left,
            recent: h
                .recent
                .into_iter()
                .map(|e| HistoryItem {
                    company_id: e.company_id,
                    company_name: e.company_name,
                    saved_at: e.saved_at,
                })
                .collect(),
        }
    }
}
