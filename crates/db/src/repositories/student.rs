//! Student repository for database operations.
//!
//! Implements the profile port using SeaORM.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QuerySelect, Set,
    TransactionTrait,
};
use talentscan_core::profile::{
    AssetField, AssetSwap, ProfileChanges, ProfileError, ProfileRepository, StudentProfile,
};

use crate::entities::students;

/// Student repository implementation.
#[derive(Debug, Clone)]
pub struct StudentRepository {
    db: DatabaseConnection,
}

impl StudentRepository {
    /// Create a new student repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for StudentRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<StudentProfile>, ProfileError> {
        let model = students::Entity::find_by_id(code.to_string())
            .one(&self.db)
            .await
            .map_err(|e| ProfileError::repository(e.to_string()))?;

        Ok(model.map(to_domain))
    }

    async fn exists(&self, code: &str) -> Result<bool, ProfileError> {
        let count = students::Entity::find_by_id(code.to_string())
            .count(&self.db)
            .await
            .map_err(|e| ProfileError::repository(e.to_string()))?;

        Ok(count > 0)
    }

    async fn apply_changes(
        &self,
        code: &str,
        changes: &ProfileChanges,
    ) -> Result<Option<StudentProfile>, ProfileError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ProfileError::repository(e.to_string()))?;

        let Some(model) = students::Entity::find_by_id(code.to_string())
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| ProfileError::repository(e.to_string()))?
        else {
            return Ok(None);
        };

        let mut active: students::ActiveModel = model.clone().into();
        active.bio = Set(changes.bio.apply(model.bio));
        active.linkedin = Set(changes.linkedin.apply(model.linkedin));
        active.github = Set(changes.github.apply(model.github));
        if let Some(interests) = &changes.interests {
            active.interests = Set(serde_json::json!(interests));
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active
            .update(&txn)
            .await
            .map_err(|e| ProfileError::repository(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| ProfileError::repository(e.to_string()))?;

        Ok(Some(to_domain(updated)))
    }

    async fn set_asset(
        &self,
        code: &str,
        field: AssetField,
        url: &str,
    ) -> Result<Option<AssetSwap>, ProfileError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ProfileError::repository(e.to_string()))?;

        let Some(model) = students::Entity::find_by_id(code.to_string())
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| ProfileError::repository(e.to_string()))?
        else {
            return Ok(None);
        };

        let mut active: students::ActiveModel = model.clone().into();
        let previous = match field {
            AssetField::Image => {
                active.image = Set(Some(url.to_string()));
                model.image
            }
            AssetField::Cv => {
                active.cv = Set(Some(url.to_string()));
                model.cv
            }
        };
        active.updated_at = Set(Utc::now().into());

        active
            .update(&txn)
            .await
            .map_err(|e| ProfileError::repository(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| ProfileError::repository(e.to_string()))?;

        Ok(Some(AssetSwap { previous }))
    }
}

/// Convert database model to domain profile.
///
/// Non-string entries in `interests` are dropped.
fn to_domain(model: students::Model) -> StudentProfile {
    let interests = model
        .interests
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    StudentProfile {
        code: model.code,
        name: model.name,
        year: model.year,
        image: model.image,
        cv: model.cv,
        bio: model.bio,
        linkedin: model.linkedin,
        github: model.github,
        interests,
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
