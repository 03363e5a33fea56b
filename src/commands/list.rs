//! List site content

use anyhow::Result;
use std::fmt::Write;

use crate::authors::AuthorResolver;
use crate::content::loader::ContentLoader;
use crate::pages::group_by_tag;
use crate::Site;

/// Print site content of one kind
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    print!("{}", render(site, content_type)?);
    Ok(())
}

/// The listing as text
pub fn render(site: &Site, content_type: &str) -> Result<String> {
    let mut out = String::new();

    match content_type {
        "post" | "posts" => {
            let posts = load_posts(site)?;
            writeln!(out, "Posts ({}):", posts.len())?;
            for post in posts {
                writeln!(
                    out,
                    "  {} - {} [{}]{}",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.slug,
                    if post.draft { " (draft)" } else { "" }
                )?;
            }
        }
        "author" | "authors" => {
            let authors = AuthorResolver::new(site).load_all()?;
            writeln!(out, "Authors ({}):", authors.len())?;
            for author in authors.iter() {
                writeln!(out, "  {} - {}", author.key, author.name)?;
            }
        }
        "tag" | "tags" => {
            let posts = load_posts(site)?;
            let mut groups = group_by_tag(&posts);
            groups.sort_by(|a, b| b.posts.len().cmp(&a.posts.len()).then(a.slug.cmp(&b.slug)));
            writeln!(out, "Tags ({}):", groups.len())?;
            for group in groups {
                writeln!(out, "  {} ({})", group.name, group.posts.len())?;
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: posts, authors, tags",
                content_type
            );
        }
    }

    Ok(out)
}

fn load_posts(site: &Site) -> Result<Vec<crate::content::Post>> {
    Ok(ContentLoader::new(site).get_all_files_front_matter(&site.config.blog_collection)?)
}
