//! Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `user_role` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
pub enum UserRole {
    /// Student.
    #[sea_orm(string_value = "student")]
    Student,
    /// Company representative.
    #[sea_orm(string_value = "company")]
    Company,
    /// Portal staff.
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// `upload_purpose` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "upload_purpose")]
pub enum UploadPurpose {
    /// Avatar image.
    #[sea_orm(string_value = "avatar")]
    Avatar,
    /// Curriculum vitae.
    #[sea_orm(string_value = "cv")]
    Cv,
}

/// `slot_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "slot_status")]
pub enum SlotStatus {
    /// Issued, not yet confirmed.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Confirmed and recorded on a profile.
    #[sea_orm(string_value = "bound")]
    Bound,
}
