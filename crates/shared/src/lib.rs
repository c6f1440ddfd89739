//! Shared types, errors, and configuration for Talentscan.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Session claims and JWT verification
//! - Wire types exchanged between the portal API and its clients
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod portal;
pub mod types;


pub use auth::{Claims, Role};
pub use config::AppConfig;
pub use error::AppError;
pub use jwt::{JwtConfig, JwtError, JwtService};
