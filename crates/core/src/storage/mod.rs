//! Object storage for uploaded avatars and CVs using Apache OpenDAL.
//!
//! Clients write directly to storage through presigned URLs; the server only
//! checks existence, publishes, and deletes.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        ObjectStore                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ presign_upload("key", ttl)  │ op.presign_write                   │
//! │ exists("key")               │ op.stat                            │
//! │ make_public("key")          │ GCS JSON API object ACL            │
//! │ delete("key")               │ op.delete                          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod gcs;
mod service;
mod store;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::StorageService;
pub use store::{ObjectIdentity, ObjectKey, ObjectStore, PresignedUrl, object_from_public_url};
