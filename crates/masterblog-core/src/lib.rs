//! # Masterblog Core
//!
//! The domain layer of the Masterblog API.
//! Posts, field validation and the query/mutation rules over a post collection.
//! Nothing in here touches the filesystem.

pub mod collection;
pub mod domain;
pub mod error;
pub mod ports;
pub mod query;

pub use collection::PostCollection;
pub use error::{DomainError, RepoError};
