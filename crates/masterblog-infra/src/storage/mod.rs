//! JSON document storage.

mod document;
mod json_store;

pub use document::JsonDocument;
pub use json_store::JsonPostStore;
