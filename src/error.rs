//! Library error type

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading content, resolving authors or fetching feeds
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid front-matter in {path:?}: {message}")]
    FrontMatter { path: PathBuf, message: String },

    #[error("Post '{post}' references unknown author '{author}'")]
    UnknownAuthor { post: String, author: String },

    #[error("Collection '{0}' does not exist")]
    UnknownCollection(String),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T, E = SiteError> = std::result::Result<T, E>;
