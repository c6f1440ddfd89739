//! `SeaORM` Entity for upload_slots table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{SlotStatus, UploadPurpose};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "upload_slots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub purpose: UploadPurpose,
    pub content_type: String,
    pub max_size: i64,
    pub owner_code: String,
    pub status: SlotStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub url: Option<String>,
    pub expires_at: DateTimeWithTimeZone,
    pub bound_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
