//! Site configuration (_config.yml)

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Result, SiteError};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub headline: String,
    pub language: String,
    pub locale: String,
    pub timezone: String,
    pub twitter: String,
    pub github: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub static_dir: String,

    // Writing
    pub blog_collection: String,
    pub default_author: String,
    pub render_drafts: bool,
    pub date_format: String,

    // Home page
    pub max_blog_posts: usize,

    // Feeds
    #[serde(default)]
    pub videos: VideoFeedConfig,
    #[serde(default)]
    pub jobs: JobFeedConfig,
    pub request_timeout_secs: u64,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Infinite Insights".to_string(),
            description: String::new(),
            headline: "We have infinite insights to share".to_string(),
            language: "en".to_string(),
            locale: "en-US".to_string(),
            timezone: String::new(),
            twitter: String::new(),
            github: String::new(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "data".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            blog_collection: "blog".to_string(),
            default_author: "default".to_string(),
            render_drafts: false,
            date_format: "MMMM D, YYYY".to_string(),

            max_blog_posts: 4,

            videos: VideoFeedConfig::default(),
            jobs: JobFeedConfig::default(),
            request_timeout_secs: 10,

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the generator cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.max_blog_posts == 0 {
            return Err(SiteError::Config(
                "max_blog_posts must be at least 1".to_string(),
            ));
        }
        if self.blog_collection.trim().is_empty() {
            return Err(SiteError::Config(
                "blog_collection must not be empty".to_string(),
            ));
        }
        self.tz()?;
        Ok(())
    }

    /// Timezone used to interpret front-matter dates without an offset
    pub fn tz(&self) -> Result<Tz> {
        if self.timezone.trim().is_empty() {
            return Ok(Tz::UTC);
        }
        self.timezone
            .trim()
            .parse::<Tz>()
            .map_err(|_| SiteError::Config(format!("unknown timezone '{}'", self.timezone)))
    }
}

/// Where a feed gets its records from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedSource {
    /// Feed disabled, always empty
    #[default]
    None,
    /// JSON snapshot inside the content directory
    File,
    /// Remote API
    Api,
}

/// Video carousel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoFeedConfig {
    pub source: FeedSource,
    pub count: usize,
    pub file: String,
    pub api_url: String,
    pub channel_id: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

impl Default for VideoFeedConfig {
    fn default() -> Self {
        Self {
            source: FeedSource::None,
            count: 6,
            file: "videos.json".to_string(),
            api_url: "https://www.googleapis.com/youtube/v3/search".to_string(),
            channel_id: String::new(),
            api_key_env: "YOUTUBE_API_KEY".to_string(),
        }
    }
}

/// Job grid configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobFeedConfig {
    pub source: FeedSource,
    pub count: usize,
    pub file: String,
    pub api_url: String,
}

impl Default for JobFeedConfig {
    fn default() -> Self {
        Self {
            source: FeedSource::None,
            count: 9,
            file: "jobs.json".to_string(),
            api_url: String::new(),
        }
    }
}
