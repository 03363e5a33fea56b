//! Video and job feeds shown on the home page
//!
//! Records are passed through to the carousel and grid components: the
//! fields the markup needs are typed, everything else the source sent is
//! kept in `extra` untouched.

mod jobs;
mod youtube;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::time::Duration;

pub use jobs::JobBoardClient;
pub use youtube::YouTubeClient;

use crate::config::FeedSource;
use crate::error::{Result, SiteError};
use crate::Site;

/// A video from the video platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(
        default,
        rename = "publishedAt",
        alias = "published_at",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Video {
    /// Link to the video page
    pub fn watch_url(&self) -> String {
        self.url
            .clone()
            .unwrap_or_else(|| format!("https://www.youtube.com/watch?v={}", self.id))
    }

    /// Player URL for an iframe
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.id)
    }
}

/// An opening from the jobs board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of a video fetch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoFeed {
    pub videos: Vec<Video>,
}

/// Result of a job fetch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobFeed {
    pub jobs: Vec<Job>,
}

/// Payload shapes accepted from files and APIs: a bare list or `{ "<key>": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum VideoPayload {
    List(Vec<Video>),
    Wrapped { videos: Vec<Video> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JobPayload {
    List(Vec<Job>),
    Wrapped { jobs: Vec<Job> },
}

impl From<VideoPayload> for VideoFeed {
    fn from(payload: VideoPayload) -> Self {
        let videos = match payload {
            VideoPayload::List(videos) | VideoPayload::Wrapped { videos } => videos,
        };
        VideoFeed { videos }
    }
}

impl From<JobPayload> for JobFeed {
    fn from(payload: JobPayload) -> Self {
        let jobs = match payload {
            JobPayload::List(jobs) | JobPayload::Wrapped { jobs } => jobs,
        };
        JobFeed { jobs }
    }
}

/// Fetches the most recent videos
#[async_trait]
pub trait VideoSource: Send + Sync {
    async fn latest_videos(&self, count: usize) -> Result<VideoFeed>;
}

/// Fetches the most recent job postings
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn latest_jobs(&self, count: usize) -> Result<JobFeed>;
}

/// A disabled feed
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyFeed;

#[async_trait]
impl VideoSource for EmptyFeed {
    async fn latest_videos(&self, _count: usize) -> Result<VideoFeed> {
        Ok(VideoFeed::default())
    }
}

#[async_trait]
impl JobSource for EmptyFeed {
    async fn latest_jobs(&self, _count: usize) -> Result<JobFeed> {
        Ok(JobFeed::default())
    }
}

/// A JSON snapshot on disk
#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            SiteError::Feed(format!("cannot read {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl VideoSource for FileFeed {
    async fn latest_videos(&self, count: usize) -> Result<VideoFeed> {
        let payload: VideoPayload = serde_json::from_str(&self.read().await?)?;
        let mut feed = VideoFeed::from(payload);
        feed.videos.truncate(count);
        Ok(feed)
    }
}

#[async_trait]
impl JobSource for FileFeed {
    async fn latest_jobs(&self, count: usize) -> Result<JobFeed> {
        let payload: JobPayload = serde_json::from_str(&self.read().await?)?;
        let mut feed = JobFeed::from(payload);
        feed.jobs.truncate(count);
        Ok(feed)
    }
}

/// Build the video source the site config asks for
pub fn video_source(site: &Site) -> Result<Box<dyn VideoSource>> {
    let config = &site.config.videos;
    Ok(match config.source {
        FeedSource::None => Box::new(EmptyFeed),
        FeedSource::File => Box::new(FileFeed::new(site.content_dir.join(&config.file))),
        FeedSource::Api => {
            let api_key = std::env::var(&config.api_key_env).map_err(|_| {
                SiteError::Config(format!(
                    "video feed needs an API key in ${}",
                    config.api_key_env
                ))
            })?;
            Box::new(YouTubeClient::new(
                &config.api_url,
                &config.channel_id,
                api_key,
                request_timeout(site),
            )?)
        }
    })
}

/// Build the job source the site config asks for
pub fn job_source(site: &Site) -> Result<Box<dyn JobSource>> {
    let config = &site.config.jobs;
    Ok(match config.source {
        FeedSource::None => Box::new(EmptyFeed),
        FeedSource::File => Box::new(FileFeed::new(site.content_dir.join(&config.file))),
        FeedSource::Api => Box::new(JobBoardClient::new(&config.api_url, request_timeout(site))?),
    })
}

fn request_timeout(site: &Site) -> Duration {
    Duration::from_secs(site.config.request_timeout_secs.max(1))
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;

    /// Serve `router` on an ephemeral local port and return its base URL
    pub async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }
}
