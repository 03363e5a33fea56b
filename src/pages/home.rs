//! Home page: hero post, recent post cards, videos and jobs

use maud::{html, Markup};

use super::components::{
    base_document, hero, image, job_grid, labelled_link, link, post_date, tag, video_carousel,
    HeroProps, Seo,
};
use crate::authors::{Author, AuthorMap};
use crate::config::SiteConfig;
use crate::content::Post;
use crate::error::Result;
use crate::feeds::{Job, Video};
use crate::helpers::{blog_index_path, post_path};

/// A post together with its resolved authors
pub struct PostPreview<'a> {
    pub post: &'a Post,
    pub authors: Vec<&'a Author>,
}

/// Everything the home page shows
pub struct HomeProps<'a> {
    pub site: &'a SiteConfig,
    pub posts: &'a [Post],
    pub videos: &'a [Video],
    pub jobs: &'a [Job],
    /// Previews of `posts[..max_blog_posts]`, authors already resolved
    previews: Vec<PostPreview<'a>>,
}

impl<'a> HomeProps<'a> {
    /// Resolve the authors of every post the page will show
    pub fn new(
        site: &'a SiteConfig,
        posts: &'a [Post],
        videos: &'a [Video],
        jobs: &'a [Job],
        authors: &'a AuthorMap,
    ) -> Result<Self> {
        let previews = posts
            .iter()
            .take(site.max_blog_posts)
            .map(|post| {
                Ok(PostPreview {
                    post,
                    authors: authors.resolve(post)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            site,
            posts,
            videos,
            jobs,
            previews,
        })
    }

    /// The featured post
    pub fn hero(&self) -> Option<&PostPreview<'a>> {
        self.previews.first()
    }

    /// Posts shown as cards below the hero
    pub fn cards(&self) -> &[PostPreview<'a>] {
        self.previews.get(1..).unwrap_or(&[])
    }

    /// Whether more posts exist than the page shows
    pub fn has_more(&self) -> bool {
        self.posts.len() > self.site.max_blog_posts
    }
}

/// Rounded corner for the card image, cycling through three styles
fn card_image_class(index: usize) -> Option<&'static str> {
    match index % 3 {
        0 => Some("rounded-bl-full"),
        1 => Some("rounded-br-full"),
        _ => None,
    }
}

fn post_card(site: &SiteConfig, index: usize, preview: &PostPreview) -> Markup {
    let post = preview.post;
    let href = post_path(&post.slug);

    html! {
        article.post-card {
            dl {
                dt.sr-only { "Published on" }
                dd.post-date { (post_date(site, post)) }
            }
            @if let Some(src) = &post.image {
                div.post-image {
                    (image(site, src, &post.title, Some((1200, 627)), card_image_class(index)))
                }
            }
            div.post-heading {
                div {
                    h2.post-title { (link(site, &href, None, html! { (post.title) })) }
                    @if !post.tags.is_empty() {
                        div.tags {
                            @for t in &post.tags {
                                (tag(site, t))
                            }
                        }
                    }
                }
                div.post-avatars {
                    @for author in &preview.authors {
                        @if let Some(avatar) = &author.avatar {
                            (image(site, avatar, "avatar", Some((50, 50)), Some("avatar")))
                        }
                    }
                }
            }
            div.post-summary { (post.summary) }
            div.read-more {
                (labelled_link(site, &href, None, &format!("Read \"{}\"", post.title), html! { "Read more →" }))
            }
        }
    }
}

/// Render the home page
pub fn render_home(props: &HomeProps) -> Markup {
    let site = props.site;

    let content = html! {
        div.home-banner {
            h1.headline { (site.headline) }
            @if let Some(featured) = props.hero() {
                (hero(site, &HeroProps {
                    href: Some(post_path(&featured.post.slug)),
                    post: featured.post,
                    authors: &featured.authors,
                }))
            }
            section.post-grid {
                @if props.posts.is_empty() {
                    "No posts found."
                }
                @for (index, preview) in props.cards().iter().enumerate() {
                    (post_card(site, index, preview))
                }
            }
        }
        @if props.has_more() {
            div.all-posts {
                (labelled_link(site, &blog_index_path(), None, "all posts", html! { "All Posts →" }))
            }
        }
        section.videos {
            h1 { "Videos" }
            p.section-description { (site.description) }
            (video_carousel(props.videos))
        }
        section.jobs {
            h1 { "Jobs" }
            (job_grid(props.jobs))
        }
    };

    let seo = Seo::page(site.title.clone(), site.description.clone(), "/");
    base_document(site, &seo, content)
}
