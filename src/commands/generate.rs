//! Generate static files

use anyhow::{Context, Result};
use std::time::Instant;

use crate::authors::AuthorResolver;
use crate::content::loader::ContentLoader;
use crate::error;
use crate::feeds::{job_source, video_source};
use crate::generator::{Generator, SiteData};
use crate::Site;

/// Load everything and write the site.
///
/// With `strict` set, a failing video or job feed aborts the build instead
/// of rendering an empty section.
pub async fn run(site: &Site, strict: bool) -> Result<()> {
    let start = Instant::now();

    let data = load(site, strict).await?;
    tracing::info!(
        "Loaded {} posts, {} authors, {} videos and {} jobs",
        data.posts.len(),
        data.authors.len(),
        data.videos.len(),
        data.jobs.len()
    );

    let pages = Generator::new(site)
        .generate(&data)
        .context("Failed to generate site")?;

    let duration = start.elapsed();
    tracing::info!("Generated {} pages in {:.2}s", pages, duration.as_secs_f64());

    Ok(())
}

/// Gather posts, videos, jobs and authors, one after another
pub async fn load(site: &Site, strict: bool) -> Result<SiteData> {
    let collection = &site.config.blog_collection;
    let posts = ContentLoader::new(site)
        .get_all_files_front_matter(collection)
        .with_context(|| format!("Failed to load collection '{}'", collection))?;

    let videos = match video_source(site) {
        Ok(source) => source.latest_videos(site.config.videos.count).await,
        Err(e) => Err(e),
    };
    let videos = or_empty("video", strict, videos)?.videos;

    let jobs = match job_source(site) {
        Ok(source) => source.latest_jobs(site.config.jobs.count).await,
        Err(e) => Err(e),
    };
    let jobs = or_empty("job", strict, jobs)?.jobs;

    let authors = AuthorResolver::new(site).get_authors(&posts)?;

    Ok(SiteData {
        posts,
        videos,
        jobs,
        authors,
    })
}

/// A feed failure becomes an empty feed unless the build is strict
fn or_empty<T: Default>(feed: &str, strict: bool, result: error::Result<T>) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if strict => Err(e).with_context(|| format!("Failed to fetch {} feed", feed)),
        Err(e) => {
            tracing::warn!("Failed to fetch {} feed, rendering it empty: {}", feed, e);
            Ok(T::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FeedSource, SiteConfig};
    use std::fs;

    fn write(site: &Site, rel: &str, content: &str) {
        let path = site.content_dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site_with_missing_feed(dir: &std::path::Path) -> Site {
        let mut config = SiteConfig::default();
        config.videos.source = FeedSource::File;
        config.videos.file = "missing.json".to_string();
        Site::with_config(dir, config)
    }

    #[tokio::test]
    async fn missing_feed_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let site = site_with_missing_feed(dir.path());
        write(&site, "blog/hello.md", "---\ntitle: Hello\ndate: 2024-01-01\nauthors: [ada]\n---\nBody");
        write(&site, "authors/ada.md", "---\nname: Ada\n---\n");

        let data = load(&site, false).await.unwrap();
        assert_eq!(data.posts.len(), 1);
        assert!(data.videos.is_empty());
        assert_eq!(data.authors.get("ada").map(|a| a.name.as_str()), Some("Ada"));
    }

    #[tokio::test]
    async fn strict_build_fails_on_feed_error() {
        let dir = tempfile::tempdir().unwrap();
        let site = site_with_missing_feed(dir.path());
        assert!(load(&site, true).await.is_err());
    }

    #[tokio::test]
    async fn unknown_author_fails_the_build() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());
        write(&site, "blog/hello.md", "---\ntitle: Hello\ndate: 2024-01-01\nauthors: [ghost]\n---\nBody");

        let err = run(&site, false).await.unwrap_err();
        assert!(err.to_string().contains("ghost"));
        assert!(!site.public_dir.join("index.html").exists());
    }

    #[tokio::test]
    async fn writes_home_from_file_feeds() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.jobs.source = FeedSource::File;
        let site = Site::with_config(dir.path(), config);
        write(&site, "blog/hello.md", "---\ntitle: Hello\ndate: 2024-01-01\n---\nBody");
        write(&site, "authors/default.md", "---\nname: The Team\n---\n");
        write(&site, "jobs.json", r#"{"jobs": [{"title": "Staff Engineer"}]}"#);

        run(&site, true).await.unwrap();
        let home = fs::read_to_string(site.public_dir.join("index.html")).unwrap();
        assert!(home.contains("Staff Engineer"));
        assert!(home.contains("The Team"));
        assert!(home.contains("No videos found."));
    }
}
