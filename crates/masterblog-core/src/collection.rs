//! The post collection and every rule that reads or changes it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Attachment, Fields, NewPost, Post, PostChanges};
use crate::error::DomainError;
use crate::query::{ListParams, paginate, sort_posts};

/// All posts, in stored order.
///
/// Serializes as a bare JSON array, the layout of the backing document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostCollection {
    posts: Vec<Post>,
}

impl PostCollection {
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// One more than the highest id, or 1 for an empty collection.
    pub fn next_id(&self) -> u64 {
        self.posts.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
    }

    fn position(&self, id: u64) -> Result<usize, DomainError> {
        self.posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(DomainError::NotFound { id })
    }

    pub fn get(&self, id: u64) -> Result<&Post, DomainError> {
        self.position(id).map(|index| &self.posts[index])
    }

    /// Sorted and paginated copy of the collection.
    pub fn list(&self, params: &ListParams) -> Vec<Post> {
        let mut posts = self.posts.clone();
        sort_posts(&mut posts, params.sort, params.direction);
        paginate(posts, params.page, params.per_page)
    }

    /// Validate a create body and append the new post.
    pub fn add(&mut self, fields: &Fields, today: NaiveDate) -> Result<Post, DomainError> {
        let new = NewPost::from_fields(fields)?;
        let post = Post::new(self.next_id(), today, new);
        self.posts.push(post.clone());
        Ok(post)
    }

    /// Merge allow-listed fields into an existing post.
    pub fn update(&mut self, id: u64, fields: &Fields) -> Result<Post, DomainError> {
        let index = self.position(id)?;
        let changes = PostChanges::from_fields(fields)?;
        let post = &mut self.posts[index];
        post.apply(changes);
        Ok(post.clone())
    }

    /// Remove a post; returns the removed record.
    pub fn delete(&mut self, id: u64) -> Result<Post, DomainError> {
        let index = self.position(id)?;
        Ok(self.posts.remove(index))
    }

    /// Append comments, categories or tags to a post.
    ///
    /// All keys are validated before any of them is applied, so a failing key
    /// leaves the post unchanged.
    pub fn attach(&mut self, id: u64, fields: &Fields) -> Result<Post, DomainError> {
        let index = self.position(id)?;
        let attachments = Attachment::parse_all(fields)?;

        let post = &mut self.posts[index];
        for attachment in &attachments {
            let existing = match attachment {
                Attachment::Category(value) => Some((&post.categories, value)),
                Attachment::Tag(value) => Some((&post.tags, value)),
                Attachment::Comment(_) => None,
            };
            if let Some((values, value)) = existing {
                if values.contains(value) {
                    return Err(DomainError::AlreadyExists {
                        field: attachment.field().to_string(),
                        value: value.clone(),
                    });
                }
            }
        }

        for attachment in attachments {
            match attachment {
                Attachment::Comment(comment) => post.comments.push(comment),
                Attachment::Category(category) => post.categories.push(category),
                Attachment::Tag(tag) => post.tags.push(tag),
            }
        }
        Ok(post.clone())
    }

    /// Case-insensitive substring search, AND-ed across parameters in order.
    ///
    /// Parameters with an empty value do not filter and unknown field names
    /// match nothing. Without parameters the whole collection is returned;
    /// with any parameter, an empty result is [`DomainError::NoPostsFound`].
    pub fn search(&self, params: &[(String, String)]) -> Result<Vec<Post>, DomainError> {
        let mut result: Vec<&Post> = self.posts.iter().collect();

        for (field, value) in params {
            if !value.is_empty() {
                let needle = value.to_lowercase();
                result.retain(|post| {
                    post.field_text(field)
                        .is_some_and(|text| text.to_lowercase().contains(&needle))
                });
            }
            if result.is_empty() {
                return Err(DomainError::NoPostsFound);
            }
        }

        Ok(result.into_iter().cloned().collect())
    }
}
