//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Location of the JSON document holding every post.
    pub posts_file: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5002),
            posts_file: env::var("POSTS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/posts.json")),
        }
    }
}
