//! Post repository backed by a single JSON document.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Local;
use tokio::sync::Mutex;

use masterblog_core::domain::{Fields, Post};
use masterblog_core::error::{DomainError, RepoError};
use masterblog_core::ports::PostRepository;
use masterblog_core::query::ListParams;
use masterblog_core::PostCollection;

use super::document::JsonDocument;

/// JSON document post repository.
///
/// Every call loads the whole document, works on the in-memory copy and, for
/// mutations, writes the whole document back. The mutex serializes these
/// cycles within one process; a second process writing the same file can
/// still overwrite changes.
pub struct JsonPostStore {
    document: JsonDocument,
    lock: Mutex<()>,
}

impl JsonPostStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            document: JsonDocument::new(path),
            lock: Mutex::new(()),
        }
    }

    /// Create the store and make sure its document exists.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepoError> {
        let store = Self::new(path);
        store.document.ensure().await?;
        Ok(store)
    }

    pub fn document(&self) -> &JsonDocument {
        &self.document
    }

    async fn read<T, F>(&self, op: F) -> Result<T, RepoError>
    where
        F: FnOnce(&PostCollection) -> Result<T, DomainError> + Send,
        T: Send,
    {
        let _guard = self.lock.lock().await;
        let posts = self.document.load().await?;
        Ok(op(&posts)?)
    }

    /// Load, apply `op`, and persist only if it succeeded.
    async fn mutate<T, F>(&self, op: F) -> Result<T, RepoError>
    where
        F: FnOnce(&mut PostCollection) -> Result<T, DomainError> + Send,
        T: Send,
    {
        let _guard = self.lock.lock().await;
        let mut posts = self.document.load().await?;
        let result = op(&mut posts)?;
        self.document.save(&posts).await?;
        Ok(result)
    }
}

#[async_trait]
impl PostRepository for JsonPostStore {
    async fn list(&self, params: &ListParams) -> Result<Vec<Post>, RepoError> {
        self.read(|posts| Ok(posts.list(params))).await
    }

    async fn get(&self, id: u64) -> Result<Post, RepoError> {
        self.read(|posts| posts.get(id).cloned()).await
    }

    async fn add(&self, fields: &Fields) -> Result<Post, RepoError> {
        let today = Local::now().date_naive();
        let post = self.mutate(|posts| posts.add(fields, today)).await?;
        tracing::info!(post_id = post.id, "Post created");
        Ok(post)
    }

    async fn update(&self, id: u64, fields: &Fields) -> Result<Post, RepoError> {
        let post = self.mutate(|posts| posts.update(id, fields)).await?;
        tracing::info!(post_id = id, "Post updated");
        Ok(post)
    }

    async fn delete(&self, id: u64) -> Result<Post, RepoError> {
        let post = self.mutate(|posts| posts.delete(id)).await?;
        tracing::info!(post_id = id, "Post deleted");
        Ok(post)
    }

    async fn attach(&self, id: u64, fields: &Fields) -> Result<Post, RepoError> {
        let post = self.mutate(|posts| posts.attach(id, fields)).await?;
        tracing::info!(post_id = id, fields = ?fields.keys().collect::<Vec<_>>(), "Attached to post");
        Ok(post)
    }

    async fn search(&self, params: &[(String, String)]) -> Result<Vec<Post>, RepoError> {
        self.read(|posts| posts.search(params)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn fields(value: Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    async fn store_with_posts(dir: &tempfile::TempDir) -> JsonPostStore {
        let store = JsonPostStore::open(dir.path().join("posts.json"))
            .await
            .unwrap();
        for title in ["First post", "Second post", "Third post"] {
            store
                .add(&fields(json!({"title": title, "content": "Body"})))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_add_then_get_round_trips() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonPostStore::new(dir.path().join("posts.json"));

        let added = store
            .add(&fields(json!({"title": "T", "content": "C", "author": "Ada"})))
            .await
            .unwrap();

        assert_eq!(added.id, 1);
        assert_eq!(added.date, Local::now().date_naive());
        assert_eq!(store.get(added.id).await.unwrap(), added);
    }

    #[tokio::test]
    async fn test_changes_survive_a_fresh_store() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("posts.json");
        store_with_posts(&dir).await;

        let reopened = JsonPostStore::new(&path);
        let listed = reopened
            .list(&ListParams::parse(Some("id"), Some("desc"), None, None).unwrap())
            .await
            .unwrap();

        let ids: Vec<u64> = listed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = store_with_posts(&dir).await;

        store.delete(2).await.unwrap();

        let err = store.get(2).await.unwrap_err();
        assert!(matches!(err, RepoError::Domain(DomainError::NotFound { id: 2 })));
        assert_eq!(store.document().load().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_validation_does_not_write() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = store_with_posts(&dir).await;
        let before = std::fs::read_to_string(store.document().path()).unwrap();

        let err = store
            .attach(1, &fields(json!({"tags": "rust", "bogus": "x"})))
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::Domain(DomainError::InvalidField(_))));
        let after = std::fs::read_to_string(store.document().path()).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_duplicate_category_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = store_with_posts(&dir).await;
        let body = fields(json!({"categories": "news"}));

        store.attach(1, &body).await.unwrap();
        let err = store.attach(1, &body).await.unwrap_err();

        assert!(matches!(
            err,
            RepoError::Domain(DomainError::AlreadyExists { .. })
        ));
        assert_eq!(store.get(1).await.unwrap().categories, vec!["news"]);
    }

    #[tokio::test]
    async fn test_search_through_store() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = store_with_posts(&dir).await;

        let found = store
            .search(&[("title".to_string(), "second".to_string())])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        let err = store
            .search(&[("title".to_string(), "zzz".to_string())])
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Domain(DomainError::NoPostsFound)));
    }

    #[tokio::test]
    async fn test_concurrent_adds_keep_every_post() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = std::sync::Arc::new(JsonPostStore::new(dir.path().join("posts.json")));

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .add(&fields(json!({"title": format!("Post {i}"), "content": "C"})))
                        .await
                        .unwrap()
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let listed = store
            .list(&ListParams::parse(None, None, None, None).unwrap())
            .await
            .unwrap();
        let ids: Vec<u64> = listed.iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }
}
