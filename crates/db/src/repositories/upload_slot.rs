//! Upload slot repository for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use talentscan_core::upload::{SlotRepository, SlotState, UploadError, UploadSlot};
use talentscan_shared::portal::UploadPurpose;
use talentscan_shared::types::UploadId;

use crate::entities::{
    sea_orm_active_enums::SlotStatus, sea_orm_active_enums::UploadPurpose as DbUploadPurpose,
    upload_slots,
};

/// Upload slot repository implementation.
#[derive(Debug, Clone)]
pub struct UploadSlotRepository {
    db: DatabaseConnection,
}

impl UploadSlotRepository {
    /// Create a new upload slot repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SlotRepository for UploadSlotRepository {
    async fn insert(&self, slot: &UploadSlot) -> Result<(), UploadError> {
        let (status, url, bound_at) = match &slot.state {
            SlotState::Pending => (SlotStatus::Pending, None, None),
            SlotState::Bound { url, bound_at } => {
                (SlotStatus::Bound, Some(url.clone()), Some((*bound_at).into()))
            }
        };

        let active_model = upload_slots::ActiveModel {
            id: Set(slot.id.into_inner()),
            purpose: Set(to_db_purpose(slot.purpose)),
            content_type: Set(slot.content_type.clone()),
            max_size: Set(i64::try_from(slot.max_size).unwrap_or(i64::MAX)),
            owner_code: Set(slot.owner_code.clone()),
            status: Set(status),
            url: Set(url),
            expires_at: Set(slot.expires_at.into()),
            bound_at: Set(bound_at),
            created_at: Set(slot.created_at.into()),
        };

        active_model
            .insert(&self.db)
            .await
            .map_err(|e| UploadError::repository(e.to_string()))?;

        Ok(())
    }

    async fn find(&self, id: UploadId) -> Result<Option<UploadSlot>, UploadError> {
        let model = upload_slots::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| UploadError::repository(e.to_string()))?;

        model.map(to_domain).transpose()
    }

    async fn mark_bound(
        &self,
        id: UploadId,
        url: &str,
        bound_at: DateTime<Utc>,
    ) -> Result<bool, UploadError> {
        let result = upload_slots::Entity::update_many()
            .set(upload_slots::ActiveModel {
                status: Set(SlotStatus::Bound),
                url: Set(Some(url.to_string())),
                bound_at: Set(Some(bound_at.into())),
                ..Default::default()
            })
            .filter(upload_slots::Column::Id.eq(id.into_inner()))
            .filter(upload_slots::Column::Status.eq(SlotStatus::Pending))
            .filter(upload_slots::Column::ExpiresAt.gt(bound_at))
            .exec(&self.db)
            .await
            .map_err(|e| UploadError::repository(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    async fn release(&self, id: UploadId) -> Result<bool, UploadError> {
        let result = upload_slots::Entity::update_many()
            .set(upload_slots::ActiveModel {
                status: Set(SlotStatus::Pending),
                url: Set(None),
                bound_at: Set(None),
                ..Default::default()
            })
            .filter(upload_slots::Column::Id.eq(id.into_inner()))
            .filter(upload_slots::Column::Status.eq(SlotStatus::Bound))
            .exec(&self.db)
            .await
            .map_err(|e| UploadError::repository(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    async fn list_expired_pending(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<UploadSlot>, UploadError> {
        let models = upload_slots::Entity::find()
            .filter(upload_slots::Column::Status.eq(SlotStatus::Pending))
            .filter(upload_slots::Column::ExpiresAt.lte(now))
            .order_by_asc(upload_slots::Column::ExpiresAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| UploadError::repository(e.to_string()))?;

        models.into_iter().map(to_domain).collect()
    }

    async fn remove(&self, id: UploadId) -> Result<(), UploadError> {
        upload_slots::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(|e| UploadError::repository(e.to_string()))?;

        Ok(())
    }
}

/// Convert domain purpose to database enum.
const fn to_db_purpose(purpose: UploadPurpose) -> DbUploadPurpose {
    match purpose {
        UploadPurpose::Avatar => DbUploadPurpose::Avatar,
        UploadPurpose::Cv => DbUploadPurpose::Cv,
    }
}

/// Convert database enum to domain purpose.
const fn from_db_purpose(purpose: DbUploadPurpose) -> UploadPurpose {
    match purpose {
        DbUploadPurpose::Avatar => UploadPurpose::Avatar,
        DbUploadPurpose::Cv => UploadPurpose::Cv,
    }
}

/// Convert database model to domain slot.
fn to_domain(model: upload_slots::Model) -> Result<UploadSlot, UploadError> {
    let state = match (model.status, model.url, model.bound_at) {
        (SlotStatus::Pending, _, _) => SlotState::Pending,
        (SlotStatus::Bound, Some(url), Some(bound_at)) => SlotState::Bound {
            url,
            bound_at: bound_at.with_timezone(&Utc),
        },
        (SlotStatus::Bound, _, _) => {
            return Err(UploadError::repository(format!(
                "upload slot {} is bound without a url",
                model.id
            )));
        }
    };

    Ok(UploadSlot {
        id: UploadId::from_uuid(model.id),
        purpose: from_db_purpose(model.purpose),
        content_type: model.content_type,
        max_size: u64::try_from(model.max_size).unwrap_or(0),
        owner_code: model.owner_code,
        expires_at: model.expires_at.with_timezone(&Utc),
        created_at: model.created_at.with_timezone(&Utc),
        state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn model(status: SlotStatus, url: Option<&str>) -> upload_slots::Model {
        let now = Utc::now();
        upload_slots::Model {
            id: Uuid::now_v7(),
            purpose: DbUploadPurpose::Cv,
            content_type: "application/pdf".into(),
            max_size: 1024,
            owner_code: "S123".into(),
            status,
            url: url.map(String::from),
            expires_at: (now + chrono::Duration::minutes(15)).into(),
            bound_at: url.map(|_| now.into()),
            created_at: now.into(),
        }
    }

    #[test]
    fn test_pending_model_to_domain() {
        let slot = to_domain(model(SlotStatus::Pending, None)).unwrap();
        assert_eq!(slot.state, SlotState::Pending);
        assert_eq!(slot.purpose, UploadPurpose::Cv);
        assert_eq!(slot.max_size, 1024);
    }

    #[test]
    fn test_bound_model_to_domain() {
        let slot = to_domain(model(SlotStatus::Bound, Some("https://x/b/cv/1"))).unwrap();
        assert!(matches!(slot.state, SlotState::Bound { ref url, .. } if url == "https://x/b/cv/1"));
    }

    #[test]
    fn test_bound_model_without_url_is_rejected() {
        assert!(to_domain(model(SlotStatus::Bound, None)).is_err());
    }

    #[test]
    fn test_purpose_mapping_is_symmetric() {
        for purpose in UploadPurpose::ALL {
            assert_eq!(from_db_purpose(to_db_purpose(purpose)), purpose);
        }
    }
}
