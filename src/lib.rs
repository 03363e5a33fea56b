//! insights: a static site generator for a content-driven marketing blog
//!
//! Markdown posts and author profiles are loaded from the content directory,
//! the latest videos and job postings are pulled from their feeds, and the
//! home page, post pages, blog index and tag pages are rendered with maud.

pub mod authors;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod feeds;
pub mod generator;
pub mod helpers;
pub mod pages;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Configuration file at the site root
pub const CONFIG_FILE: &str = "_config.yml";

/// A site on disk
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Collections, authors and feed snapshots
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Files copied verbatim into the output
    pub static_dir: PathBuf,
}

impl Site {
    /// Open the site in `base_dir`, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Build a site from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
            static_dir,
        }
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self, false).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
