//! Response payloads that are not posts.

use serde::{Deserialize, Serialize};

/// Body of every error response: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new("Not found")
    }

    pub fn invalid_json() -> Self {
        Self::new("Invalid JSON format")
    }

    pub fn internal_error() -> Self {
        Self::new("Internal server error")
    }
}

/// Confirmation body, e.g. after a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_has_single_error_key() {
        let body = serde_json::to_value(ErrorResponse::not_found()).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Not found"}));
    }
}
