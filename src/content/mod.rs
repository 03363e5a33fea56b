//! Content module - handles posts and the markdown pipeline

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::{parse_date_string, parse_front_matter, FrontMatter};
pub use markdown::MarkdownRenderer;
pub use post::Post;
