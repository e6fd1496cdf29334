//! Ordering and pagination of post listings.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::domain::Post;
use crate::error::DomainError;

/// Upper bound on the page size of a listing.
pub const MAX_PER_PAGE: usize = 30;

/// Field a listing is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Id,
    Title,
    Content,
    Author,
    Date,
}

impl SortKey {
    fn compare(self, a: &Post, b: &Post) -> Ordering {
        match self {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Content => a.content.cmp(&b.content),
            SortKey::Author => a.author.cmp(&b.author),
            SortKey::Date => a.date.cmp(&b.date),
        }
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortKey::Id),
            "title" => Ok(SortKey::Title),
            "content" => Ok(SortKey::Content),
            "author" => Ok(SortKey::Author),
            "date" => Ok(SortKey::Date),
            other => Err(DomainError::InvalidField(format!("cannot sort by <{other}>"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// `desc` sorts descending; any other value sorts ascending.
    pub fn parse(s: &str) -> Self {
        if s == "desc" { Direction::Desc } else { Direction::Asc }
    }
}

/// Listing parameters after parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub sort: SortKey,
    pub direction: Direction,
    /// One-based page number.
    pub page: usize,
    /// Page size; `None` means the whole collection (still capped).
    pub per_page: Option<usize>,
}

impl ListParams {
    /// Build parameters from raw query values, applying the defaults.
    pub fn parse(
        sort: Option<&str>,
        direction: Option<&str>,
        page: Option<usize>,
        per_page: Option<usize>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            sort: sort.map(str::parse::<SortKey>).transpose()?.unwrap_or_default(),
            direction: direction.map(Direction::parse).unwrap_or_default(),
            page: page.unwrap_or(1).max(1),
            per_page,
        })
    }
}

/// Stable sort, so posts with equal keys keep their stored order either way.
pub fn sort_posts(posts: &mut [Post], key: SortKey, direction: Direction) {
    match direction {
        Direction::Asc => posts.sort_by(|a, b| key.compare(a, b)),
        Direction::Desc => posts.sort_by(|a, b| key.compare(b, a)),
    }
}

/// Half-open slice `[(page-1)*per_page, page*per_page)`; empty when out of range.
pub fn paginate(posts: Vec<Post>, page: usize, per_page: Option<usize>) -> Vec<Post> {
    let per_page = per_page.unwrap_or(posts.len()).min(MAX_PER_PAGE);
    let start = page.saturating_sub(1).saturating_mul(per_page);
    posts.into_iter().skip(start).take(per_page).collect()
}
