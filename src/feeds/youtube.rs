//! YouTube Data API client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

use super::{Video, VideoFeed, VideoSource};
use crate::error::{Result, SiteError};

/// The API caps `maxResults` at 50
const MAX_RESULTS: usize = 50;

/// Lists the newest uploads of a channel through the `search` endpoint
pub struct YouTubeClient {
    client: Client,
    api_url: String,
    channel_id: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(
        api_url: impl Into<String>,
        channel_id: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let channel_id = channel_id.into();
        if channel_id.trim().is_empty() {
            return Err(SiteError::Config(
                "videos.channel_id is required for the API source".to_string(),
            ));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            channel_id,
            api_key: api_key.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct ItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    #[serde(default)]
    thumbnails: Map<String, Value>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl Snippet {
    /// Best available thumbnail
    fn thumbnail(&self) -> Option<String> {
        ["maxres", "high", "medium", "default"]
            .iter()
            .find_map(|size| self.thumbnails.get(*size)?.get("url")?.as_str())
            .map(String::from)
    }
}

impl SearchItem {
    /// Channel and playlist hits carry no video id and are dropped
    fn into_video(self) -> Option<Video> {
        let id = self.id.video_id?;
        let thumbnail = self.snippet.thumbnail();
        Some(Video {
            url: Some(format!("https://www.youtube.com/watch?v={}", id)),
            id,
            title: self.snippet.title,
            thumbnail,
            published_at: self.snippet.published_at,
            extra: self.snippet.rest,
        })
    }
}

#[async_trait]
impl VideoSource for YouTubeClient {
    async fn latest_videos(&self, count: usize) -> Result<VideoFeed> {
        if count == 0 {
            return Ok(VideoFeed::default());
        }

        let max_results = count.min(MAX_RESULTS).to_string();
        tracing::debug!("Fetching {} videos for channel {}", max_results, self.channel_id);

        let response: SearchResponse = self
            .client
            .get(&self.api_url)
            .query(&[
                ("part", "snippet"),
                ("channelId", self.channel_id.as_str()),
                ("order", "date"),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut videos: Vec<Video> = response
            .items
            .into_iter()
            .filter_map(SearchItem::into_video)
            .collect();
        videos.truncate(count);

        Ok(VideoFeed { videos })
    }
}
