//! Post model

use chrono::{DateTime, FixedOffset};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::helpers::tag_slug;

/// A post of a front-matter collection.
///
/// Posts are immutable once loaded; renderers only borrow them.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// URL-friendly name, taken from the file stem
    pub slug: String,

    /// Publication date
    pub date: DateTime<FixedOffset>,

    /// Last modification date
    pub lastmod: Option<DateTime<FixedOffset>>,

    /// Post title
    pub title: String,

    /// Short description shown on cards and in meta tags
    pub summary: String,

    /// Tags in front-matter order, one per tag slug
    pub tags: Vec<String>,

    /// Cover image
    pub image: Option<String>,

    /// Author keys, in display order
    pub authors: Vec<String>,

    /// Canonical URL overriding the post's own address in meta tags
    pub canonical_url: Option<String>,

    /// Drafts are only rendered when the site asks for them
    pub draft: bool,

    /// Rendered HTML body
    pub content: String,

    /// Source file path
    pub source: PathBuf,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(slug: impl Into<String>, title: impl Into<String>, date: DateTime<FixedOffset>) -> Self {
        Self {
            slug: slug.into(),
            date,
            lastmod: None,
            title: title.into(),
            summary: String::new(),
            tags: Vec::new(),
            image: None,
            authors: Vec::new(),
            canonical_url: None,
            draft: false,
            content: String::new(),
            source: PathBuf::new(),
        }
    }

    /// Set tags, keeping the first spelling of each tag slug
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.clear();
        let mut seen = HashSet::new();
        for tag in tags {
            let tag = tag.into();
            let tag = tag.trim();
            if !tag.is_empty() && seen.insert(tag_slug(tag)) {
                self.tags.push(tag.to_string());
            }
        }
        self
    }

    /// Set author keys
    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post(slug: &str, day: u32) -> Post {
        let date = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, day, 0, 0, 0)
            .unwrap();
        Post::new(slug, slug.to_uppercase(), date)
    }

    #[test]
    fn test_tags_deduplicated_in_order() {
        let p = post("a", 1).with_tags(["rust", "web", "rust", " ", "cli"]);
        assert_eq!(p.tags, vec!["rust", "web", "cli"]);
    }

    #[test]
    fn test_tags_differing_in_case_collapse() {
        let p = post("a", 1).with_tags(["Rust", "rust", "Machine Learning", "machine-learning"]);
        assert_eq!(p.tags, vec!["Rust", "Machine Learning"]);
    }
}
