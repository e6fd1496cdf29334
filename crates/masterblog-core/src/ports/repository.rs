use async_trait::async_trait;

use crate::domain::{Fields, Post};
use crate::error::RepoError;
use crate::query::ListParams;

/// Post repository - every operation the HTTP layer can ask of the store.
///
/// Validation failures come back as [`RepoError::Domain`]; anything else is a
/// storage fault.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Sorted, paginated listing.
    async fn list(&self, params: &ListParams) -> Result<Vec<Post>, RepoError>;

    /// Find a post by its id.
    async fn get(&self, id: u64) -> Result<Post, RepoError>;

    /// Create a post from a raw create body.
    async fn add(&self, fields: &Fields) -> Result<Post, RepoError>;

    /// Overwrite allow-listed fields of a post.
    async fn update(&self, id: u64, fields: &Fields) -> Result<Post, RepoError>;

    /// Delete a post, returning the removed record.
    async fn delete(&self, id: u64) -> Result<Post, RepoError>;

    /// Append comments, categories or tags to a post.
    async fn attach(&self, id: u64, fields: &Fields) -> Result<Post, RepoError>;

    /// Substring search over `(field, value)` pairs in request order.
    async fn search(&self, params: &[(String, String)]) -> Result<Vec<Post>, RepoError>;
}
