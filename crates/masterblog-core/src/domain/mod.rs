//! Domain entities and the field policy that guards them.

mod fields;
mod post;

pub use fields::{
    ALLOWED_FIELDS, Attachment, Fields, NESTED_FIELDS, NewPost, PostChanges, REQUIRED_FIELDS,
};
pub use post::{Comment, DEFAULT_AUTHOR, Post};
