//! Blog listing and tag pages

use indexmap::IndexMap;
use maud::{html, Markup};

use super::components::{base_document, link, post_date, tag, Seo};
use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{blog_index_path, post_path, tag_path, tag_slug};

/// Posts sharing one tag
#[derive(Debug)]
pub struct TagGroup<'a> {
    /// Display name, as first written in a post
    pub name: &'a str,
    pub slug: String,
    pub posts: Vec<&'a Post>,
}

/// Group posts by tag slug, sorted by slug
///
/// Tags differing only in case or punctuation share a page. Post order
/// inside a group follows the input order.
pub fn group_by_tag(posts: &[Post]) -> Vec<TagGroup<'_>> {
    let mut groups: IndexMap<String, TagGroup> = IndexMap::new();

    for post in posts {
        for name in &post.tags {
            let slug = tag_slug(name);
            if slug.is_empty() {
                continue;
            }
            let group = groups.entry(slug.clone()).or_insert_with(|| TagGroup {
                name,
                slug,
                posts: Vec::new(),
            });
            // A post listing two spellings of one tag joins the group once
            if !group.posts.last().is_some_and(|p| std::ptr::eq(*p, post)) {
                group.posts.push(post);
            }
        }
    }

    groups.sort_keys();
    groups.into_values().collect()
}

fn post_list(site: &SiteConfig, posts: &[&Post]) -> Markup {
    html! {
        ul.post-list {
            @if posts.is_empty() {
                li { "No posts found." }
            }
            @for post in posts {
                li {
                    article.post-item {
                        dl {
                            dt.sr-only { "Published on" }
                            dd.post-date { (post_date(site, post)) }
                        }
                        h2.post-title { (link(site, &post_path(&post.slug), None, html! { (post.title) })) }
                        @if !post.tags.is_empty() {
                            div.tags {
                                @for t in &post.tags {
                                    (tag(site, t))
                                }
                            }
                        }
                        div.post-summary { (post.summary) }
                    }
                }
            }
        }
    }
}

/// Render `/blog`, every post newest first
pub fn render_blog_index(site: &SiteConfig, posts: &[Post]) -> Markup {
    let posts: Vec<&Post> = posts.iter().collect();
    let content = html! {
        section.listing {
            h1 { "All Posts" }
            (post_list(site, &posts))
        }
    };
    let seo = Seo::page(
        format!("Blog - {}", site.title),
        site.description.clone(),
        blog_index_path(),
    );
    base_document(site, &seo, content)
}

/// Render `/tags/<slug>`
pub fn render_tag_page(site: &SiteConfig, group: &TagGroup) -> Markup {
    let content = html! {
        section.listing {
            h1 { (group.name) }
            (post_list(site, &group.posts))
        }
    };
    let seo = Seo::page(
        format!("{} - {}", group.name, site.title),
        format!("{} tagged content", group.name),
        tag_path(group.name),
    );
    base_document(site, &seo, content)
}

/// Render `/tags`, every tag with its post count
pub fn render_tags_index(site: &SiteConfig, groups: &[TagGroup]) -> Markup {
    let content = html! {
        section.listing {
            h1 { "Tags" }
            @if groups.is_empty() {
                p { "No tags found." }
            }
            ul.tag-cloud {
                @for group in groups {
                    li {
                        (tag(site, group.name))
                        " (" (group.posts.len()) ")"
                    }
                }
            }
        }
    };
    let seo = Seo::page(format!("Tags - {}", site.title), site.description.clone(), "/tags");
    base_document(site, &seo, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn post(slug: &str, day: u32, tags: &[&str]) -> Post {
        let date = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2023, 1, day, 0, 0, 0)
            .unwrap();
        Post::new(slug, slug, date).with_tags(tags.iter().copied())
    }

    #[test]
    fn groups_tags_by_slug() {
        let posts = vec![
            post("b", 2, &["Rust", "Web Dev"]),
            post("a", 1, &["rust"]),
        ];
        let groups = group_by_tag(&posts);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].slug, "rust");
        assert_eq!(groups[0].name, "Rust");
        let slugs: Vec<_> = groups[0].posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["b", "a"]);
        assert_eq!(groups[1].slug, "web-dev");
    }

    #[test]
    fn post_with_two_spellings_listed_once() {
        let mut p = post("a", 1, &[]);
        p.tags = vec!["Rust".to_string(), "rust".to_string()];
        let posts = vec![p, post("b", 2, &["Rust", "rust"])];

        let groups = group_by_tag(&posts);
        assert_eq!(groups.len(), 1);
        let slugs: Vec<_> = groups[0].posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["a", "b"]);

        let html = render_tag_page(&SiteConfig::default(), &groups[0]).into_string();
        assert_eq!(html.matches(r#"<article class="post-item">"#).count(), 2);
    }

    #[test]
    fn blog_index_lists_every_post() {
        let site = SiteConfig::default();
        let posts: Vec<_> = (1..=6).rev().map(|d| post(&format!("p{}", d), d, &[])).collect();
        let html = render_blog_index(&site, &posts).into_string();
        assert_eq!(html.matches(r#"<article class="post-item">"#).count(), 6);
        assert!(html.find(r#"href="/blog/p6""#).unwrap() < html.find(r#"href="/blog/p1""#).unwrap());
        assert!(html.contains(r#"href="http://example.com/blog""#));
    }

    #[test]
    fn empty_blog_index() {
        let html = render_blog_index(&SiteConfig::default(), &[]).into_string();
        assert!(html.contains("No posts found."));
    }

    #[test]
    fn tag_page_and_index() {
        let site = SiteConfig::default();
        let posts = vec![post("a", 1, &["rust"]), post("b", 2, &["go"])];
        let groups = group_by_tag(&posts);

        let page = render_tag_page(&site, &groups[1]).into_string();
        assert!(page.contains("<h1>rust</h1>"));
        assert!(page.contains(r#"href="/blog/a""#));
        assert!(!page.contains(r#"href="/blog/b""#));

        let index = render_tags_index(&site, &groups).into_string();
        assert!(index.contains(r#"href="/tags/go""#));
        assert!(index.contains(" (1)"));
    }
}
