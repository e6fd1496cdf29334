//! Data Transfer Objects - request types for the API.

use serde::{Deserialize, Serialize};

/// Query string of `GET /api/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}
