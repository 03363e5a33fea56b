//! Create a new post

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Front-matter written into a new post
#[derive(Debug, Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    date: String,
    tags: Vec<String>,
    authors: Vec<String>,
    draft: bool,
}

/// Options for a new post
#[derive(Debug, Default)]
pub struct NewPost<'a> {
    pub title: &'a str,
    /// Author key, the site's default author when absent
    pub author: Option<&'a str>,
    pub tags: Vec<String>,
}

/// Write `<content_dir>/<blog_collection>/<slug>.md` and return its path
pub fn create_post(site: &Site, options: &NewPost) -> Result<PathBuf> {
    let slug = slug::slugify(options.title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", options.title);
    }

    let target_dir = site.content_dir.join(&site.config.blog_collection);
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = Utc::now().with_timezone(&site.config.tz()?);
    let author = options.author.unwrap_or(&site.config.default_author);
    let scaffold = Scaffold {
        title: options.title,
        date: now.format("%Y-%m-%d").to_string(),
        tags: options.tags.clone(),
        authors: vec![author.to_string()],
        draft: false,
    };

    let content = format!("---\n{}---\n\n", serde_yaml::to_string(&scaffold)?);
    fs::write(&file_path, content)?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}

/// Run the new command
pub fn run(site: &Site, title: &str, author: Option<&str>, tags: Vec<String>) -> Result<()> {
    let path = create_post(
        site,
        &NewPost {
            title,
            author,
            tags,
        },
    )?;
    println!("Created: {}", path.display());
    Ok(())
}
