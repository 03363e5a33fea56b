//! Post layout: article, author sidebar, tags and prev/next navigation

use maud::{html, Markup, PreEscaped};

use super::components::{base_document, hero, image, link, scroll_top, social_icon, tag, HeroProps, Seo};
use crate::authors::{Author, AuthorMap};
use crate::config::SiteConfig;
use crate::content::Post;
use crate::error::Result;
use crate::helpers::{blog_index_path, post_path};

/// Inputs of the post layout
pub struct PostLayoutProps<'a> {
    pub site: &'a SiteConfig,
    pub post: &'a Post,
    /// Resolved authors, in `post.authors` order
    pub author_details: Vec<&'a Author>,
    /// Newer neighbour
    pub next: Option<&'a Post>,
    /// Older neighbour
    pub prev: Option<&'a Post>,
}

impl<'a> PostLayoutProps<'a> {
    /// Props for `posts[index]` of a newest-first list, `None` past the end
    pub fn resolve(
        site: &'a SiteConfig,
        posts: &'a [Post],
        index: usize,
        authors: &'a AuthorMap,
    ) -> Result<Option<Self>> {
        let Some(post) = posts.get(index) else {
            return Ok(None);
        };
        Ok(Some(Self {
            site,
            post,
            author_details: authors.resolve(post)?,
            next: index.checked_sub(1).and_then(|i| posts.get(i)),
            prev: posts.get(index + 1),
        }))
    }
}

fn twitter_handle(url: &str) -> String {
    url.replace("https://twitter.com/", "@")
}

fn github_handle(url: &str) -> String {
    url.replace("https://github.com/", "")
}

fn author_sidebar(site: &SiteConfig, authors: &[&Author]) -> Markup {
    html! {
        dl.post-authors {
            dt.sr-only { "Authors" }
            dd {
                ul {
                    @for author in authors {
                        li.author {
                            @if let Some(avatar) = &author.avatar {
                                (image(site, avatar, "avatar", Some((100, 100)), Some("avatar")))
                            }
                            dl {
                                dt.sr-only { "Name" }
                                dd.author-name { (author.name) }
                                @if let Some(occupation) = &author.occupation {
                                    dt.sr-only { "Occupation" }
                                    dd.author-occupation { (occupation) }
                                }
                                @if let Some(company) = &author.company {
                                    dt.sr-only { "Company" }
                                    dd.author-company { (company) }
                                }
                                @if let Some(twitter) = &author.twitter {
                                    dt.sr-only { "Twitter" }
                                    dd { (social_icon("twitter", twitter, html! { (twitter_handle(twitter)) })) }
                                }
                                @if let Some(github) = &author.github {
                                    dt.sr-only { "Github" }
                                    dd { (social_icon("github", github, html! { (github_handle(github)) })) }
                                }
                                @if let Some(website) = &author.website {
                                    dt.sr-only { "Website" }
                                    dd { (social_icon("website", website, html! { "Blog" })) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn sibling_link(site: &SiteConfig, heading: &str, post: &Post) -> Markup {
    html! {
        div.sibling {
            h2 { (heading) }
            div { (link(site, &post_path(&post.slug), None, html! { (post.title) })) }
        }
    }
}

/// Render a post page
pub fn render_post(props: &PostLayoutProps) -> Markup {
    let site = props.site;
    let post = props.post;

    let content = html! {
        (scroll_top())
        article.post {
            (hero(site, &HeroProps { href: None, post, authors: &props.author_details }))
            div.post-layout {
                (author_sidebar(site, &props.author_details))
                div.post-body {
                    div.prose { (PreEscaped(&post.content)) }
                }
                footer.post-footer {
                    @if !post.tags.is_empty() {
                        div.post-tags {
                            h2 { "Tags" }
                            div.tags {
                                @for t in &post.tags {
                                    (tag(site, t))
                                }
                            }
                        }
                    }
                    @if props.next.is_some() || props.prev.is_some() {
                        div.post-nav {
                            @if let Some(prev) = props.prev {
                                (sibling_link(site, "Previous Article", prev))
                            }
                            @if let Some(next) = props.next {
                                (sibling_link(site, "Next Article", next))
                            }
                        }
                    }
                    div.back {
                        (link(site, &blog_index_path(), None, html! { "← Back to the blog" }))
                    }
                }
            }
        }
    };

    let seo = Seo::blog(post, &props.author_details);
    base_document(site, &seo, content)
}
