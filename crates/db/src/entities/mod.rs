//! `SeaORM` entity definitions.

pub mod prelude;

pub mod companies;
pub mod saved_students;
pub mod scans;
pub mod sea_orm_active_enums;
pub mod students;
pub mod upload_slots;
pub mod users;
