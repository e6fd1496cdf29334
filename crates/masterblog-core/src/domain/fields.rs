//! Field policy for client-supplied post data.
//!
//! Bodies arrive as raw JSON objects so that unknown keys can be reported by
//! name. Validation turns them into typed values before anything is stored.

use serde_json::{Map, Value};

use super::post::Comment;
use crate::error::DomainError;

/// A raw JSON object as received from a client.
pub type Fields = Map<String, Value>;

/// Top-level fields a client may set on create and update.
pub const ALLOWED_FIELDS: [&str; 3] = ["title", "content", "author"];

/// Fields that must be present on create.
pub const REQUIRED_FIELDS: [&str; 2] = ["title", "content"];

/// Nested sequences that accept attachments.
pub const NESTED_FIELDS: [&str; 3] = ["comments", "categories", "tags"];

/// Validated input for a new post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: Option<String>,
}

impl NewPost {
    /// Validate a create body.
    ///
    /// Missing required fields are reported before unsupported ones. A null or
    /// empty author counts as absent.
    pub fn from_fields(fields: &Fields) -> Result<Self, DomainError> {
        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|key| !fields.contains_key(**key))
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::MissingFields(missing));
        }

        check_unsupported(fields)?;

        let author = match fields.get("author") {
            None | Some(Value::Null) => None,
            Some(value) => Some(string_value("author", value)?).filter(|a| !a.is_empty()),
        };

        Ok(Self {
            title: string_value("title", &fields["title"])?,
            content: string_value("content", &fields["content"])?,
            author,
        })
    }
}

/// Validated partial update of the allow-listed fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

impl PostChanges {
    /// Validate an update body. At least one allow-listed field must be present.
    pub fn from_fields(fields: &Fields) -> Result<Self, DomainError> {
        if !ALLOWED_FIELDS.iter().any(|key| fields.contains_key(*key)) {
            return Err(DomainError::NoSupportedFields(
                ALLOWED_FIELDS.iter().map(|key| key.to_string()).collect(),
            ));
        }

        check_unsupported(fields)?;

        let optional = |key: &str| {
            fields
                .get(key)
                .map(|value| string_value(key, value))
                .transpose()
        };

        Ok(Self {
            title: optional("title")?,
            content: optional("content")?,
            author: optional("author")?,
        })
    }
}

/// One value to append to a post's nested sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    Comment(Comment),
    Category(String),
    Tag(String),
}

impl Attachment {
    /// Validate every key of an attach body.
    ///
    /// Only checks shape and types. Duplicate detection needs the target post
    /// and happens in [`crate::PostCollection::attach`].
    pub fn parse_all(fields: &Fields) -> Result<Vec<Self>, DomainError> {
        if fields.is_empty() {
            return Err(DomainError::NoSupportedFields(
                NESTED_FIELDS.iter().map(|key| key.to_string()).collect(),
            ));
        }

        fields
            .iter()
            .map(|(key, value)| Self::parse(key, value))
            .collect()
    }

    fn parse(key: &str, value: &Value) -> Result<Self, DomainError> {
        match key {
            "comments" => {
                let object = value.as_object().ok_or_else(|| DomainError::WrongDatatype {
                    field: key.to_string(),
                    expected: "object with user_id and comment",
                })?;
                Ok(Self::Comment(Comment {
                    user_id: required_text(object, "user_id")?,
                    comment: required_text(object, "comment")?,
                }))
            }
            "categories" => non_empty(key, value).map(Self::Category),
            "tags" => non_empty(key, value).map(Self::Tag),
            other => Err(DomainError::InvalidField(other.to_string())),
        }
    }

    /// Name of the nested sequence this attachment goes into.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Comment(_) => "comments",
            Self::Category(_) => "categories",
            Self::Tag(_) => "tags",
        }
    }
}

fn check_unsupported(fields: &Fields) -> Result<(), DomainError> {
    let unsupported: Vec<String> = fields
        .keys()
        .filter(|key| !ALLOWED_FIELDS.contains(&key.as_str()))
        .cloned()
        .collect();
    if unsupported.is_empty() {
        Ok(())
    } else {
        Err(DomainError::UnsupportedFields(unsupported))
    }
}

fn string_value(field: &str, value: &Value) -> Result<String, DomainError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| DomainError::WrongDatatype {
            field: field.to_string(),
            expected: "string",
        })
}

fn non_empty(field: &str, value: &Value) -> Result<String, DomainError> {
    let text = string_value(field, value)?;
    if text.is_empty() {
        return Err(DomainError::MissingField(field.to_string()));
    }
    Ok(text)
}

fn required_text(object: &Fields, field: &str) -> Result<String, DomainError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(DomainError::MissingField(field.to_string())),
        Some(value) => non_empty(field, value),
    }
}
