//! Jobs board client

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{JobFeed, JobPayload, JobSource};
use crate::error::{Result, SiteError};

/// Reads openings from a JSON endpoint (`GET <api_url>?limit=N`)
pub struct JobBoardClient {
    client: Client,
    api_url: String,
}

impl JobBoardClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_url = api_url.into();
        if api_url.trim().is_empty() {
            return Err(SiteError::Config(
                "jobs.api_url is required for the API source".to_string(),
            ));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_url })
    }
}

#[async_trait]
impl JobSource for JobBoardClient {
    async fn latest_jobs(&self, count: usize) -> Result<JobFeed> {
        if count == 0 {
            return Ok(JobFeed::default());
        }

        tracing::debug!("Fetching {} jobs from {}", count, self.api_url);

        let payload: JobPayload = self
            .client
            .get(&self.api_url)
            .query(&[("limit", count)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut feed = JobFeed::from(payload);
        feed.jobs.truncate(count);
        Ok(feed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::test_support::serve;
    use axum::extract::Query;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::Value;
    use std::collections::HashMap;

    async fn openings(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        let limit: usize = params["limit"].parse().unwrap();
        let jobs: Vec<Value> = (1..=12)
            .map(|n| {
                serde_json::json!({
                    "title": format!("Engineer {}", n),
                    "company": "Acme",
                    "salary": {"min": 100, "max": 150}
                })
            })
            .take(limit + 2)
            .collect();
        Json(serde_json::json!({ "jobs": jobs }))
    }

    #[tokio::test]
    async fn test_latest_jobs_respects_count() {
        let base = serve(Router::new().route("/jobs", get(openings))).await;
        let client = JobBoardClient::new(format!("{}/jobs", base), Duration::from_secs(5)).unwrap();

        let feed = client.latest_jobs(9).await.unwrap();
        assert_eq!(feed.jobs.len(), 9);
        assert_eq!(feed.jobs[0].title, "Engineer 1");
        assert_eq!(feed.jobs[0].extra["salary"]["max"], 150);
    }

    #[tokio::test]
    async fn test_zero_count_skips_request() {
        let client = JobBoardClient::new("http://127.0.0.1:9/never", Duration::from_secs(1)).unwrap();
        assert!(client.latest_jobs(0).await.unwrap().jobs.is_empty());
    }

    #[test]
    fn test_url_required() {
        assert!(JobBoardClient::new("", Duration::from_secs(1)).is_err());
    }
}
