//! The backing document - one JSON array holding every post.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tokio::fs;

use masterblog_core::PostCollection;
use masterblog_core::error::RepoError;

/// Handle on the JSON file that stores the post collection.
///
/// Reads and writes always cover the whole file. Writes go to a sibling
/// temporary file that is renamed over the document.
#[derive(Debug, Clone)]
pub struct JsonDocument {
    path: PathBuf,
}

impl JsonDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the document as an empty array if it does not exist yet.
    pub async fn ensure(&self) -> Result<(), RepoError> {
        if fs::try_exists(&self.path).await.map_err(|e| self.io_error(e))? {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        self.save(&PostCollection::default()).await?;

        tracing::info!(path = %self.path.display(), "Created empty posts document");
        Ok(())
    }

    /// Read and parse the whole document, creating it first if needed.
    pub async fn load(&self) -> Result<PostCollection, RepoError> {
        self.ensure().await?;

        let bytes = fs::read(&self.path).await.map_err(|e| self.io_error(e))?;
        let posts: PostCollection = serde_json::from_slice(&bytes).map_err(|e| {
            RepoError::MalformedDocument(format!("{}: {}", self.path.display(), e))
        })?;

        tracing::debug!(path = %self.path.display(), count = posts.len(), "Loaded posts document");
        Ok(posts)
    }

    /// Overwrite the document with `posts`, pretty-printed with 4-space indentation.
    pub async fn save(&self, posts: &PostCollection) -> Result<(), RepoError> {
        let bytes = encode(posts)?;

        let tmp = self.tmp_path();
        fs::write(&tmp, &bytes).await.map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, err: std::io::Error) -> RepoError {
        RepoError::MalformedDocument(format!("{}: {}", self.path.display(), err))
    }
}

fn encode(posts: &PostCollection) -> Result<Vec<u8>, RepoError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    posts
        .serialize(&mut serializer)
        .map_err(|e| RepoError::Internal(format!("Failed to encode posts: {}", e)))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use masterblog_core::domain::Fields;
    use serde_json::json;

    fn one_post() -> PostCollection {
        let mut posts = PostCollection::default();
        let fields: Fields = json!({"title": "Hello", "content": "World"})
            .as_object()
            .cloned()
            .unwrap();
        posts
            .add(&fields, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
            .unwrap();
        posts
    }

    #[tokio::test]
    async fn test_load_creates_missing_document() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("posts.json");
        let document = JsonDocument::new(&path);

        let posts = document.load().await.unwrap();

        assert!(posts.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().expect("temp dir");
        let document = JsonDocument::new(dir.path().join("posts.json"));

        document.save(&one_post()).await.unwrap();

        assert_eq!(document.load().await.unwrap(), one_post());
        assert!(!document.tmp_path().exists());
    }

    #[tokio::test]
    async fn test_save_uses_four_space_indent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("posts.json");
        let document = JsonDocument::new(&path);

        document.save(&one_post()).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n    {\n        \"id\": 1,"));
        assert!(text.contains("\n        \"date\": \"2024-02-29\","));
    }

    #[tokio::test]
    async fn test_malformed_document_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("posts.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonDocument::new(&path).load().await.unwrap_err();

        assert!(matches!(err, RepoError::MalformedDocument(_)));
    }
}
