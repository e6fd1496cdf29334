use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fields::{NewPost, PostChanges};

/// Author recorded when a post is created without one.
pub const DEFAULT_AUTHOR: &str = "unknown";

/// A comment attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub user_id: String,
    pub comment: String,
}

/// Post entity - a single blog entry.
///
/// Documents written before comments, categories and tags existed load with
/// empty sequences, and a missing author loads as [`DEFAULT_AUTHOR`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub date: NaiveDate,
    pub title: String,
    pub content: String,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

impl Post {
    /// Create a new post from validated fields.
    pub fn new(id: u64, date: NaiveDate, new: NewPost) -> Self {
        Self {
            id,
            date,
            title: new.title,
            content: new.content,
            author: new.author.unwrap_or_else(default_author),
            comments: Vec::new(),
            categories: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Overwrite the fields present in `changes`, leaving the rest untouched.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(author) = changes.author {
            self.author = author;
        }
    }

    /// Text form of a field, used for substring search. `None` for unknown names.
    pub fn field_text(&self, name: &str) -> Option<String> {
        let text = match name {
            "id" => self.id.to_string(),
            "date" => self.date.format("%Y-%m-%d").to_string(),
            "title" => self.title.clone(),
            "content" => self.content.clone(),
            "author" => self.author.clone(),
            "comments" => self
                .comments
                .iter()
                .map(|c| format!("{}: {}", c.user_id, c.comment))
                .collect::<Vec<_>>()
                .join("\n"),
            "categories" => self.categories.join(", "),
            "tags" => self.tags.join(", "),
            _ => return None,
        };
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Post {
        Post::new(
            3,
            NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
            NewPost {
                title: "First post".into(),
                content: "Hello".into(),
                author: None,
            },
        )
    }

    #[test]
    fn test_new_post_defaults_author_and_nested_fields() {
        let post = sample();
        assert_eq!(post.author, DEFAULT_AUTHOR);
        assert!(post.comments.is_empty());
        assert!(post.categories.is_empty());
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_serializes_date_as_plain_day() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["date"], json!("2024-05-17"));
        assert_eq!(value["id"], json!(3));
    }

    #[test]
    fn test_legacy_record_without_nested_fields_loads() {
        let post: Post = serde_json::from_value(json!({
            "id": 1,
            "date": "2023-01-02",
            "title": "Old",
            "content": "From an early revision"
        }))
        .unwrap();
        assert_eq!(post.author, DEFAULT_AUTHOR);
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_apply_only_touches_given_fields() {
        let mut post = sample();
        post.apply(PostChanges {
            title: Some("Renamed".into()),
            content: None,
            author: None,
        });
        assert_eq!(post.title, "Renamed");
        assert_eq!(post.content, "Hello");
    }

    #[test]
    fn test_field_text_covers_known_fields_only() {
        let mut post = sample();
        post.tags.push("Rust".into());
        assert_eq!(post.field_text("id").as_deref(), Some("3"));
        assert_eq!(post.field_text("date").as_deref(), Some("2024-05-17"));
        assert_eq!(post.field_text("tags").as_deref(), Some("Rust"));
        assert_eq!(post.field_text("nope"), None);
    }
}
