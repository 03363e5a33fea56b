//! Generator module - writes the rendered pages into the public directory

use maud::Markup;
use std::fs;
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::authors::AuthorMap;
use crate::content::Post;
use crate::error::Result;
use crate::feeds::{Job, Video};
use crate::helpers::{blog_index_path, post_path, tag_path};
use crate::pages::{
    group_by_tag, render_blog_index, render_home, render_post, render_tag_page,
    render_tags_index, HomeProps, PostLayoutProps, STYLESHEET,
};
use crate::Site;

/// Everything a build renders, gathered before any file is written
#[derive(Debug, Default)]
pub struct SiteData {
    /// Blog posts, newest first
    pub posts: Vec<Post>,
    pub videos: Vec<Video>,
    pub jobs: Vec<Job>,
    pub authors: AuthorMap,
}

/// Static site generator
pub struct Generator<'a> {
    site: &'a Site,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Generate the entire site, returning the number of pages written
    pub fn generate(&self, data: &SiteData) -> Result<usize> {
        fs::create_dir_all(&self.site.public_dir)?;

        let mut pages = 0;
        pages += self.generate_home(data)?;
        pages += self.generate_post_pages(&data.posts, &data.authors)?;
        pages += self.generate_blog_index(&data.posts)?;
        pages += self.generate_tag_pages(&data.posts)?;

        self.write_stylesheet()?;
        self.copy_static_assets()?;

        Ok(pages)
    }

    fn generate_home(&self, data: &SiteData) -> Result<usize> {
        let props = HomeProps::new(
            &self.site.config,
            &data.posts,
            &data.videos,
            &data.jobs,
            &data.authors,
        )?;
        self.write_page("/", render_home(&props))?;
        Ok(1)
    }

    fn generate_post_pages(&self, posts: &[Post], authors: &AuthorMap) -> Result<usize> {
        let mut count = 0;
        while let Some(props) = PostLayoutProps::resolve(&self.site.config, posts, count, authors)? {
            self.write_page(&post_path(&props.post.slug), render_post(&props))?;
            count += 1;
        }
        Ok(count)
    }

    fn generate_blog_index(&self, posts: &[Post]) -> Result<usize> {
        self.write_page(&blog_index_path(), render_blog_index(&self.site.config, posts))?;
        Ok(1)
    }

    fn generate_tag_pages(&self, posts: &[Post]) -> Result<usize> {
        let groups = group_by_tag(posts);
        for group in &groups {
            self.write_page(&tag_path(group.name), render_tag_page(&self.site.config, group))?;
        }
        self.write_page("/tags", render_tags_index(&self.site.config, &groups))?;

        tracing::info!("Generated {} tag pages", groups.len());
        Ok(groups.len() + 1)
    }

    /// Write `markup` to `<public_dir>/<route>/index.html`
    fn write_page(&self, route: &str, markup: Markup) -> Result<PathBuf> {
        let route = route.trim_matches('/');
        let output_path = if route.is_empty() {
            self.site.public_dir.join("index.html")
        } else {
            self.site.public_dir.join(route).join("index.html")
        };

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, markup.into_string())?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(output_path)
    }

    fn write_stylesheet(&self) -> Result<()> {
        let css_dir = self.site.public_dir.join("css");
        fs::create_dir_all(&css_dir)?;
        fs::write(css_dir.join("style.css"), STYLESHEET)?;
        Ok(())
    }

    /// Copy `static_dir` into the public directory, keeping its layout
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        let target_root = self.site.public_dir.join("static");
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Ok(relative) = path.strip_prefix(static_dir) else {
                continue;
            };
            if relative
                .components()
                .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
            {
                continue;
            }

            let dest = target_root.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            tracing::debug!("Copied: {:?}", dest);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authors::Author;
    use crate::config::SiteConfig;
    use crate::error::SiteError;
    use chrono::{FixedOffset, TimeZone};
    use tempfile::TempDir;

    fn post(slug: &str, day: u32, tags: &[&str]) -> Post {
        let date = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 6, day, 0, 0, 0)
            .unwrap();
        Post::new(slug, slug, date)
            .with_tags(tags.iter().copied())
            .with_authors(["ada"])
    }

    fn data(posts: Vec<Post>) -> SiteData {
        SiteData {
            posts,
            authors: [Author::new("ada", "Ada")].into_iter().collect(),
            ..Default::default()
        }
    }

    #[test]
    fn writes_every_route() {
        let dir = TempDir::new().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());
        let data = data(vec![post("b", 2, &["Rust"]), post("a", 1, &[])]);

        let pages = Generator::new(&site).generate(&data).unwrap();
        // home + 2 posts + blog index + 1 tag + tags index
        assert_eq!(pages, 6);

        let public = &site.public_dir;
        for route in [
            "index.html",
            "blog/index.html",
            "blog/a/index.html",
            "blog/b/index.html",
            "tags/index.html",
            "tags/rust/index.html",
            "css/style.css",
        ] {
            assert!(public.join(route).is_file(), "missing {}", route);
        }

        let older = fs::read_to_string(public.join("blog/a/index.html")).unwrap();
        assert!(older.contains("Next Article"));
        assert!(!older.contains("Previous Article"));
    }

    #[test]
    fn copies_static_files() {
        let dir = TempDir::new().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());
        fs::create_dir_all(site.static_dir.join("images")).unwrap();
        fs::write(site.static_dir.join("images/logo.svg"), "<svg/>").unwrap();
        fs::write(site.static_dir.join(".DS_Store"), "").unwrap();

        Generator::new(&site).generate(&data(Vec::new())).unwrap();
        assert!(site.public_dir.join("static/images/logo.svg").is_file());
        assert!(!site.public_dir.join("static/.DS_Store").exists());
    }

    #[test]
    fn unknown_author_aborts_build() {
        let dir = TempDir::new().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());
        let mut data = data(vec![post("a", 1, &[])]);
        data.authors = AuthorMap::new();

        let err = Generator::new(&site).generate(&data).unwrap_err();
        assert!(matches!(err, SiteError::UnknownAuthor { ref author, .. } if author == "ada"));
    }
}
