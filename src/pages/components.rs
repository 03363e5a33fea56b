//! Shared HTML components
//!
//! Small building blocks used by every page: document shell, SEO tags,
//! links, images, tags, social icons, the hero block, the video carousel
//! and the job grid.

use maud::{html, Markup, DOCTYPE};

use crate::authors::Author;
use crate::config::SiteConfig;
use crate::content::Post;
use crate::feeds::{Job, Video};
use crate::helpers::{date_xml, format_date, full_url_for, is_external, tag_path, url_for};

/// Metadata for the document `<head>`
#[derive(Debug, Clone)]
pub struct Seo {
    pub title: String,
    pub description: String,
    /// Site-relative path of the page
    pub path: String,
    /// Canonical URL when it differs from the page's own address
    pub canonical: Option<String>,
    pub og_type: &'static str,
    pub image: Option<String>,
    pub published_time: Option<String>,
    pub modified_time: Option<String>,
    pub authors: Vec<String>,
    pub tags: Vec<String>,
}

impl Seo {
    /// Plain page metadata
    pub fn page(title: impl Into<String>, description: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            path: path.into(),
            canonical: None,
            og_type: "website",
            image: None,
            published_time: None,
            modified_time: None,
            authors: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Article metadata for a post page
    pub fn blog(post: &Post, authors: &[&Author]) -> Self {
        Self {
            title: post.title.clone(),
            description: post.summary.clone(),
            path: crate::helpers::post_path(&post.slug),
            canonical: post.canonical_url.clone(),
            og_type: "article",
            image: post.image.clone(),
            published_time: Some(date_xml(&post.date)),
            modified_time: post.lastmod.as_ref().map(date_xml),
            authors: authors.iter().map(|a| a.name.clone()).collect(),
            tags: post.tags.clone(),
        }
    }
}

/// Renders the `<head>` metadata tags
pub fn seo_tags(site: &SiteConfig, seo: &Seo) -> Markup {
    let canonical = full_url_for(site, seo.canonical.as_deref().unwrap_or(&seo.path));
    let image = seo.image.as_deref().map(|src| full_url_for(site, src));

    html! {
        title { (seo.title) }
        meta name="description" content=(seo.description);
        link rel="canonical" href=(canonical);
        meta property="og:url" content=(canonical);
        meta property="og:type" content=(seo.og_type);
        meta property="og:site_name" content=(site.title);
        meta property="og:title" content=(seo.title);
        meta property="og:description" content=(seo.description);
        @if let Some(image) = &image {
            meta property="og:image" content=(image);
        }
        meta name="twitter:card" content=(if image.is_some() { "summary_large_image" } else { "summary" });
        @if let Some(published) = &seo.published_time {
            meta property="article:published_time" content=(published);
        }
        @if let Some(modified) = &seo.modified_time {
            meta property="article:modified_time" content=(modified);
        }
        @for author in &seo.authors {
            meta name="author" content=(author);
        }
        @for tag in &seo.tags {
            meta property="article:tag" content=(tag);
        }
    }
}

/// Renders the base HTML document structure
pub fn base_document(site: &SiteConfig, seo: &Seo, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(site.language) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                (seo_tags(site, seo))
                link rel="stylesheet" href=(url_for(site, "/css/style.css"));
            }
            body id="top" {
                (site_header(site))
                main { (content) }
                (site_footer(site))
            }
        }
    }
}

fn site_header(site: &SiteConfig) -> Markup {
    html! {
        header.site-header {
            a.site-title href=(url_for(site, "/")) { (site.title) }
            nav.site-nav {
                a href=(url_for(site, "/blog")) { "Blog" }
                a href=(url_for(site, "/tags")) { "Tags" }
            }
        }
    }
}

fn site_footer(site: &SiteConfig) -> Markup {
    html! {
        footer.site-footer {
            div.social {
                @if !site.twitter.is_empty() {
                    (social_icon("twitter", &site.twitter, html! {}))
                }
                @if !site.github.is_empty() {
                    (social_icon("github", &site.github, html! {}))
                }
            }
            p { (site.title) }
        }
    }
}

/// A link; site-relative targets get the root prefix
pub fn link(site: &SiteConfig, href: &str, class: Option<&str>, content: Markup) -> Markup {
    html! {
        @if is_external(href) {
            a class=[class] href=(href) target="_blank" rel="noopener noreferrer" { (content) }
        } @else {
            a class=[class] href=(url_for(site, href)) { (content) }
        }
    }
}

/// Same as [`link`] with an accessible label
pub fn labelled_link(
    site: &SiteConfig,
    href: &str,
    class: Option<&str>,
    label: &str,
    content: Markup,
) -> Markup {
    html! {
        @if is_external(href) {
            a class=[class] href=(href) aria-label=(label) target="_blank" rel="noopener noreferrer" { (content) }
        } @else {
            a class=[class] href=(url_for(site, href)) aria-label=(label) { (content) }
        }
    }
}

/// A lazily loaded image
pub fn image(site: &SiteConfig, src: &str, alt: &str, size: Option<(u32, u32)>, class: Option<&str>) -> Markup {
    html! {
        img
            src=(url_for(site, src))
            alt=(alt)
            width=[size.map(|s| s.0)]
            height=[size.map(|s| s.1)]
            class=[class]
            loading="lazy";
    }
}

/// A tag chip linking to the tag page
pub fn tag(site: &SiteConfig, text: &str) -> Markup {
    html! {
        a.tag href=(url_for(site, &tag_path(text))) { (text.replace(' ', "-")) }
    }
}

/// An external profile link with an accessible kind label
pub fn social_icon(kind: &str, href: &str, label: Markup) -> Markup {
    let class = format!("social-icon social-{}", kind);
    html! {
        a class=(class) href=(href) target="_blank" rel="noopener noreferrer" {
            span.sr-only { (kind) }
            (label)
        }
    }
}

/// Link back to the top of the page
pub fn scroll_top() -> Markup {
    html! {
        a.scroll-top href="#top" aria-label="Scroll to top" { "↑" }
    }
}

/// A published-on date
pub fn post_date(site: &SiteConfig, post: &Post) -> Markup {
    html! {
        time datetime=(date_xml(&post.date)) { (format_date(&post.date, &site.date_format)) }
    }
}

/// Inputs of the hero block
pub struct HeroProps<'a> {
    /// Link target for the title, `None` on the post page itself
    pub href: Option<String>,
    pub post: &'a Post,
    pub authors: &'a [&'a Author],
}

/// The large featured block at the top of a page
pub fn hero(site: &SiteConfig, props: &HeroProps) -> Markup {
    let post = props.post;
    html! {
        section.hero {
            @if let Some(src) = &post.image {
                (image(site, src, &post.title, Some((1200, 627)), Some("hero-image")))
            }
            div.hero-body {
                dl.hero-date {
                    dt.sr-only { "Published on" }
                    dd { (post_date(site, post)) }
                }
                h1.hero-title {
                    @if let Some(href) = &props.href {
                        (link(site, href, None, html! { (post.title) }))
                    } @else {
                        (post.title)
                    }
                }
                @if !props.authors.is_empty() {
                    ul.hero-authors {
                        @for author in props.authors {
                            li {
                                @if let Some(avatar) = &author.avatar {
                                    (image(site, avatar, "avatar", Some((38, 38)), Some("avatar")))
                                }
                                span.author-name { (author.name) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Horizontal list of the latest videos
pub fn video_carousel(videos: &[Video]) -> Markup {
    html! {
        div.video-carousel {
            @if videos.is_empty() {
                p.empty { "No videos found." }
            }
            @for video in videos {
                a.video-card href=(video.watch_url()) data-embed=(video.embed_url())
                    target="_blank" rel="noopener noreferrer" {
                    @if let Some(thumbnail) = &video.thumbnail {
                        img src=(thumbnail) alt=(video.title) loading="lazy";
                    }
                    span.video-title { (video.title) }
                    @if let Some(published) = &video.published_at {
                        span.video-date { (published.get(..10).unwrap_or(published.as_str())) }
                    }
                }
            }
        }
    }
}

/// Grid of the latest job postings
pub fn job_grid(jobs: &[Job]) -> Markup {
    html! {
        div.job-grid {
            @if jobs.is_empty() {
                p.empty { "No open positions." }
            }
            @for job in jobs {
                article.job-card {
                    h3 {
                        @if let Some(url) = &job.url {
                            a href=(url) target="_blank" rel="noopener noreferrer" { (job.title) }
                        } @else {
                            (job.title)
                        }
                    }
                    @if let Some(company) = &job.company {
                        p.job-company { (company) }
                    }
                    @if let Some(location) = &job.location {
                        p.job-location { (location) }
                    }
                }
            }
        }
    }
}
