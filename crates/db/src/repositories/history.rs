//! Scan/save statistics queries.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use talentscan_core::history::{HistoryCounters, HistoryEntry, HistoryError, HistoryRepository};
use talentscan_shared::types::CompanyId;
use uuid::Uuid;

use crate::entities::{companies, saved_students, scans, students};

/// History repository implementation.
#[derive(Debug, Clone)]
pub struct ActivityRepository {
    db: DatabaseConnection,
}

impl ActivityRepository {
    /// Create a new activity repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct SaveRow {
    company_id: Uuid,
    company_name: String,
    saved_at: chrono::DateTime<chrono::FixedOffset>,
}

fn repo_err(e: sea_orm::DbErr) -> HistoryError {
    HistoryError::Repository(e.to_string())
}

#[async_trait]
impl HistoryRepository for ActivityRepository {
    async fn counters(&self, code: &str) -> Result<Option<HistoryCounters>, HistoryError> {
        let known = students::Entity::find_by_id(code.to_string())
            .count(&self.db)
            .await
            .map_err(repo_err)?;
        if known == 0 {
            return Ok(None);
        }

        let scans = scans::Entity::find()
            .filter(scans::Column::StudentCode.eq(code))
            .count(&self.db)
            .await
            .map_err(repo_err)?;

        let saves = saved_students::Entity::find()
            .filter(saved_students::Column::StudentCode.eq(code))
            .count(&self.db)
            .await
            .map_err(repo_err)?;

        let companies_total = companies::Entity::find()
            .count(&self.db)
            .await
            .map_err(repo_err)?;

        let companies_scanned = scans::Entity::find()
            .select_only()
            .column(scans::Column::CompanyId)
            .distinct()
            .filter(scans::Column::StudentCode.eq(code))
            .count(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(Some(HistoryCounters {
            scans,
            saves,
            companies_total,
            companies_scanned,
        }))
    }

    async fn recent_saves(
        &self,
        code: &str,
        limit: u64,
    ) -> Result<Vec<HistoryEntry>, HistoryError> {
        let rows = saved_students::Entity::find()
            .select_only()
            .column(saved_students::Column::CompanyId)
            .column(saved_students::Column::SavedAt)
            .column_as(companies::Column::Name, "company_name")
            .join(
                JoinType::InnerJoin,
                saved_students::Relation::Companies.def(),
            )
            .filter(saved_students::Column::StudentCode.eq(code))
            .order_by_desc(saved_students::Column::SavedAt)
            .limit(limit)
            .into_model::<SaveRow>()
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(rows
            .into_iter()
            .map(|row| HistoryEntry {
                company_id: CompanyId::from_uuid(row.company_id),
                company_name: row.company_name,
                saved_at: row.saved_at.with_timezone(&Utc),
            })
            .collect())
    }
}
