//! Author records and the resolver that maps post author keys to them
//!
//! Authors live next to the collections as `<content_dir>/authors/<key>.md`:
//!
//! ```text
//! ---
//! name: Ada Lovelace
//! avatar: /static/images/ada.png
//! twitter: https://twitter.com/ada
//! github: https://github.com/ada
//! occupation: Analyst
//! company: Analytical Engines
//! ---
//! ```
//!
//! The body below the front-matter is not used.

use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::content::{parse_front_matter, Post};
use crate::error::{Result, SiteError};
use crate::Site;

/// Directory below the content dir holding author files
pub const AUTHORS_DIR: &str = "authors";

/// A post author
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Author {
    pub key: String,
    pub name: String,
    pub avatar: Option<String>,
    pub occupation: Option<String>,
    pub company: Option<String>,
    pub twitter: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
}

impl Author {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AuthorFrontMatter {
    name: Option<String>,
    avatar: Option<String>,
    occupation: Option<String>,
    company: Option<String>,
    twitter: Option<String>,
    github: Option<String>,
    website: Option<String>,
}

/// Author key to author record, in first-referenced order
#[derive(Debug, Clone, Default)]
pub struct AuthorMap {
    authors: IndexMap<String, Author>,
}

impl AuthorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, author: Author) {
        self.authors.insert(author.key.clone(), author);
    }

    pub fn get(&self, key: &str) -> Option<&Author> {
        self.authors.get(key)
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Author> {
        self.authors.values()
    }

    /// Authors of a post in `post.authors` order.
    ///
    /// Every key must resolve; a missing one is an error naming the post.
    pub fn resolve(&self, post: &Post) -> Result<Vec<&Author>> {
        post.authors
            .iter()
            .map(|key| {
                self.get(key).ok_or_else(|| SiteError::UnknownAuthor {
                    post: post.slug.clone(),
                    author: key.clone(),
                })
            })
            .collect()
    }
}

impl FromIterator<Author> for AuthorMap {
    fn from_iter<I: IntoIterator<Item = Author>>(iter: I) -> Self {
        let mut map = AuthorMap::new();
        for author in iter {
            map.insert(author);
        }
        map
    }
}

/// Loads author records from the content directory
pub struct AuthorResolver<'a> {
    site: &'a Site,
}

impl<'a> AuthorResolver<'a> {
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    fn authors_dir(&self) -> PathBuf {
        self.site.content_dir.join(AUTHORS_DIR)
    }

    /// Map every author key referenced by `posts` to its record
    pub fn get_authors(&self, posts: &[Post]) -> Result<AuthorMap> {
        let mut map = AuthorMap::new();

        for post in posts {
            for key in &post.authors {
                if map.get(key).is_some() {
                    continue;
                }
                let author = self.load(key)?.ok_or_else(|| SiteError::UnknownAuthor {
                    post: post.slug.clone(),
                    author: key.clone(),
                })?;
                map.insert(author);
            }
        }

        tracing::debug!("Resolved {} authors", map.len());
        Ok(map)
    }

    /// Every author file, sorted by key
    pub fn load_all(&self) -> Result<AuthorMap> {
        let dir = self.authors_dir();
        if !dir.exists() {
            return Ok(AuthorMap::new());
        }

        let mut keys: Vec<String> = fs::read_dir(&dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| crate::content::loader::is_content_file(p))
            .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(String::from))
            .collect();
        keys.sort();
        keys.dedup();

        let mut map = AuthorMap::new();
        for key in keys {
            if let Some(author) = self.load(&key)? {
                map.insert(author);
            }
        }
        Ok(map)
    }

    /// Load one author, `None` when no file exists for the key
    fn load(&self, key: &str) -> Result<Option<Author>> {
        if key.is_empty() || key.starts_with('.') || key.contains(['/', '\\']) {
            return Ok(None);
        }
        let dir = self.authors_dir();
        let Some(path) = ["md", "mdx", "markdown"]
            .iter()
            .map(|ext| dir.join(format!("{}.{}", key, ext)))
            .find(|p| p.is_file())
        else {
            return Ok(None);
        };

        let raw = fs::read_to_string(&path)?;
        let (fm, _body): (AuthorFrontMatter, &str) =
            parse_front_matter(&raw).map_err(|e| SiteError::FrontMatter {
                path: path.clone(),
                message: e.to_string(),
            })?;

        Ok(Some(Author {
            key: key.to_string(),
            name: fm.name.unwrap_or_else(|| key.to_string()),
            avatar: fm.avatar,
            occupation: fm.occupation,
            company: fm.company,
            twitter: fm.twitter,
            github: fm.github,
            website: fm.website,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use chrono::{FixedOffset, TimeZone};
    use tempfile::TempDir;

    fn post(slug: &str, authors: &[&str]) -> Post {
        let date = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .unwrap();
        Post::new(slug, slug, date).with_authors(authors.iter().copied())
    }

    fn site_with_authors(files: &[(&str, &str)]) -> (TempDir, Site) {
        let dir = TempDir::new().unwrap();
        let authors = dir.path().join("data").join(AUTHORS_DIR);
        fs::create_dir_all(&authors).unwrap();
        for (name, content) in files {
            fs::write(authors.join(name), content).unwrap();
        }
        let site = Site::with_config(dir.path(), SiteConfig::default());
        (dir, site)
    }

    #[test]
    fn test_get_authors_maps_referenced_keys() {
        let (_dir, site) = site_with_authors(&[
            (
                "ada.md",
                "---\nname: Ada Lovelace\ntwitter: https://twitter.com/ada\noccupation: Mathematician\n---\nNotes.",
            ),
            ("bob.mdx", "---\nname: Bob\navatar: /bob.png\n---\n"),
            ("unused.md", "---\nname: Nobody\n---\n"),
        ]);

        let posts = vec![post("one", &["bob", "ada"]), post("two", &["ada"])];
        let map = AuthorResolver::new(&site).get_authors(&posts).unwrap();

        assert_eq!(map.len(), 2);
        let ada = map.get("ada").unwrap();
        assert_eq!(ada.name, "Ada Lovelace");
        assert_eq!(ada.twitter.as_deref(), Some("https://twitter.com/ada"));
        assert_eq!(ada.occupation.as_deref(), Some("Mathematician"));
        assert_eq!(map.get("bob").unwrap().avatar.as_deref(), Some("/bob.png"));
        assert!(map.get("unused").is_none());
    }

    #[test]
    fn test_unknown_author_fails_loudly() {
        let (_dir, site) = site_with_authors(&[("ada.md", "---\nname: Ada\n---\n")]);
        let posts = vec![post("orphan", &["ada", "ghost"])];

        let err = AuthorResolver::new(&site).get_authors(&posts).unwrap_err();
        match err {
            SiteError::UnknownAuthor { post, author } => {
                assert_eq!(post, "orphan");
                assert_eq!(author, "ghost");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_keeps_post_order() {
        let map: AuthorMap = vec![Author::new("a", "Alice"), Author::new("b", "Bob")]
            .into_iter()
            .collect();

        let names: Vec<_> = map
            .resolve(&post("p", &["b", "a"]))
            .unwrap()
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["Bob", "Alice"]);

        assert!(matches!(
            map.resolve(&post("p", &["c"])),
            Err(SiteError::UnknownAuthor { .. })
        ));
    }

    #[test]
    fn test_load_all_and_name_fallback() {
        let (_dir, site) = site_with_authors(&[
            ("zed.md", "Just a bio, no front-matter."),
            ("amy.md", "---\nname: Amy\n---\n"),
        ]);
        let map = AuthorResolver::new(&site).load_all().unwrap();
        let keys: Vec<_> = map.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["amy", "zed"]);
        assert_eq!(map.get("zed").unwrap().name, "zed");
    }
}
