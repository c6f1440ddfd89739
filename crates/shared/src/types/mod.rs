//! Common types used across the application.

pub mod id;

#[cfg(test)]
mod id_tests;

pub use id::*;
