//! Content loader - reads the posts of a front-matter collection

use chrono::{DateTime, FixedOffset, Utc};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path};
use walkdir::WalkDir;

use super::markdown::SUMMARY_CHARS;
use super::{FrontMatter, MarkdownRenderer, Post};
use crate::error::{Result, SiteError};
use crate::Site;

/// Loads posts from `<content_dir>/<collection>/`
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self {
            site,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Load every post of a collection, newest first.
    ///
    /// A missing collection directory yields no posts. Files whose
    /// front-matter cannot be parsed are skipped with a warning, as are
    /// files whose slug an earlier file (in file name order) already took.
    pub fn get_all_files_front_matter(&self, collection: &str) -> Result<Vec<Post>> {
        let collection_dir = self.collection_dir(collection)?;
        if !collection_dir.exists() {
            tracing::debug!("Collection directory {:?} does not exist", collection_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();
        let mut slugs = HashSet::new();

        for entry in WalkDir::new(&collection_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_content_file(path) {
                continue;
            }

            match self.load_post(&collection_dir, path) {
                Ok(post) if post.draft && !self.site.config.render_drafts => {
                    tracing::debug!("Skipping draft {:?}", path);
                }
                Ok(post) if slugs.contains(&post.slug) => {
                    tracing::warn!("Skipping {:?}: slug {:?} is already taken", path, post.slug);
                }
                Ok(post) => {
                    slugs.insert(post.slug.clone());
                    posts.push(post);
                }
                Err(e) => tracing::warn!("Failed to load post {:?}: {}", path, e),
            }
        }

        sort_newest_first(&mut posts);

        Ok(posts)
    }

    /// Resolve and sanity-check a collection name
    fn collection_dir(&self, collection: &str) -> Result<std::path::PathBuf> {
        let name = Path::new(collection);
        let is_plain = !collection.is_empty()
            && name
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !is_plain {
            return Err(SiteError::UnknownCollection(collection.to_string()));
        }
        Ok(self.site.content_dir.join(name))
    }

    /// Load a single post from a file
    fn load_post(&self, collection_dir: &Path, path: &Path) -> Result<Post> {
        let raw = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&raw).map_err(|e| SiteError::FrontMatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let tz = self.site.config.tz()?;
        let date = match fm.parse_date(tz) {
            Some(date) => date,
            None => file_modified(path)?,
        };

        let slug = slug_for(collection_dir, path);

        let title = fm.title.clone().unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        });

        let summary = fm
            .summary
            .clone()
            .unwrap_or_else(|| MarkdownRenderer::summarize(body, SUMMARY_CHARS));

        let authors = if fm.authors.is_empty() {
            vec![self.site.config.default_author.clone()]
        } else {
            fm.authors.clone()
        };

        let mut post = Post::new(slug, title, date)
            .with_tags(fm.tags.iter().cloned())
            .with_authors(authors);
        post.lastmod = fm.parse_lastmod(tz);
        post.summary = summary;
        post.image = fm.cover_image();
        post.canonical_url = fm.canonical_url.clone().filter(|u| !u.trim().is_empty());
        post.draft = fm.draft;
        post.content = self.renderer.render(body);
        post.source = path.to_path_buf();

        Ok(post)
    }
}

/// Newest first; equal dates fall back to slug order so builds are stable
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
}

/// Slug is the path below the collection directory without extension
fn slug_for(collection_dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(collection_dir).unwrap_or(path);
    let without_ext = relative.with_extension("");
    without_ext
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect::<Vec<_>>()
        .join("/")
}

fn file_modified(path: &Path) -> Result<DateTime<FixedOffset>> {
    let modified = fs::metadata(path)?.modified()?;
    Ok(DateTime::<Utc>::from(modified).fixed_offset())
}

/// Check if a file holds markdown content
pub fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e, "md" | "mdx" | "markdown"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    fn site_with(files: &[(&str, &str)], config: SiteConfig) -> (TempDir, Site) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            let path = dir.path().join("data").join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let site = Site::with_config(dir.path(), config);
        (dir, site)
    }

    #[test]
    fn test_loads_newest_first() {
        let (_dir, site) = site_with(
            &[
                ("blog/older.md", "---\ntitle: Older\ndate: 2021-01-01\n---\nOld."),
                ("blog/newer.mdx", "---\ntitle: Newer\ndate: 2022-06-01\n---\nNew."),
                ("blog/notes.txt", "ignored"),
            ],
            SiteConfig::default(),
        );

        let posts = ContentLoader::new(&site)
            .get_all_files_front_matter("blog")
            .unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["newer", "older"]);
        assert_eq!(posts[0].summary, "New.");
        assert_eq!(posts[0].authors, vec!["default"]);
        assert!(posts[0].content.contains("<p>New.</p>"));
    }

    #[test]
    fn test_nested_slug_and_drafts() {
        let files = [
            ("blog/2023/launch.md", "---\ntitle: Launch\ndate: 2023-03-01\n---\nHi"),
            ("blog/wip.md", "---\ntitle: WIP\ndate: 2023-04-01\ndraft: true\n---\n"),
        ];

        let (_dir, site) = site_with(&files, SiteConfig::default());
        let posts = ContentLoader::new(&site)
            .get_all_files_front_matter("blog")
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "2023/launch");

        let config = SiteConfig {
            render_drafts: true,
            ..Default::default()
        };
        let (_dir, site) = site_with(&files, config);
        let posts = ContentLoader::new(&site)
            .get_all_files_front_matter("blog")
            .unwrap();
        assert_eq!(posts.len(), 2);
        assert!(posts[0].draft);
    }

    #[test]
    fn test_bad_front_matter_is_skipped() {
        let (_dir, site) = site_with(
            &[
                ("blog/good.md", "---\ntitle: Good\ndate: 2023-01-01\n---\nok"),
                ("blog/bad.md", "---\ntitle: [oops\n---\nbroken"),
            ],
            SiteConfig::default(),
        );
        let posts = ContentLoader::new(&site)
            .get_all_files_front_matter("blog")
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Good");
    }

    #[test]
    fn test_duplicate_slug_keeps_first_file() {
        let (_dir, site) = site_with(
            &[
                ("blog/hello.mdx", "---\ntitle: Hello MDX\ndate: 2023-02-01\n---\nb"),
                ("blog/hello.md", "---\ntitle: Hello MD\ndate: 2023-01-01\n---\na"),
                ("blog/other.md", "---\ntitle: Other\ndate: 2023-03-01\n---\nc"),
            ],
            SiteConfig::default(),
        );
        let posts = ContentLoader::new(&site)
            .get_all_files_front_matter("blog")
            .unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["other", "hello"]);
        assert_eq!(posts[1].title, "Hello MD");
    }

    #[test]
    fn test_canonical_url_from_front_matter() {
        let (_dir, site) = site_with(
            &[(
                "blog/moved.md",
                "---\ntitle: Moved\ndate: 2023-01-01\ncanonicalUrl: https://origin.example/moved\n---\nx",
            )],
            SiteConfig::default(),
        );
        let posts = ContentLoader::new(&site)
            .get_all_files_front_matter("blog")
            .unwrap();
        assert_eq!(posts[0].canonical_url.as_deref(), Some("https://origin.example/moved"));
    }

    #[test]
    fn test_missing_and_invalid_collections() {
        let (_dir, site) = site_with(&[], SiteConfig::default());
        let loader = ContentLoader::new(&site);
        assert!(loader.get_all_files_front_matter("blog").unwrap().is_empty());
        assert!(matches!(
            loader.get_all_files_front_matter("../etc"),
            Err(SiteError::UnknownCollection(_))
        ));
    }
}
