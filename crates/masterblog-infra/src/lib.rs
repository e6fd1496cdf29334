//! # Masterblog Infrastructure
//!
//! Concrete implementations of the ports defined in `masterblog-core`.
//! Posts live in a single JSON document on disk.

pub mod storage;

pub use storage::{JsonDocument, JsonPostStore};
