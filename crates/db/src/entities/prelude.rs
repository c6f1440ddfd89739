//! `SeaORM` entity prelude.

pub use super::companies::Entity as Companies;
pub use super::saved_students::Entity as SavedStudents;
pub use super::scans::Entity as Scans;
pub use super::students::Entity as Students;
pub use super::upload_slots::Entity as UploadSlots;
pub use super::users::Entity as Users;
