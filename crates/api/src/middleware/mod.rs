//! Request middleware.

pub mod session;

pub use session::{AuthUser, session_middleware};
