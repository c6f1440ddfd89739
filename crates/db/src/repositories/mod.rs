//! Repository abstractions for data access.
//!
//! Repositories implement the ports defined in `talentscan-core`,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod history;
pub mod student;
pub mod upload_slot;

pub use history::ActivityRepository;
pub use student::StudentRepository;
pub use upload_slot::UploadSlotRepository;
