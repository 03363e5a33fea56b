//! HTML pages rendered with maud
//!
//! Every page is a pure function of already-resolved props, so rendering
//! cannot fail. Lookups that can fail (authors) happen in the props
//! constructors.

pub mod blog;
pub mod components;
pub mod home;
pub mod post;

pub use blog::{group_by_tag, render_blog_index, render_tag_page, render_tags_index, TagGroup};
pub use home::{render_home, HomeProps};
pub use post::{render_post, PostLayoutProps};

/// Site stylesheet, written to `css/style.css`
pub const STYLESHEET: &str = include_str!("style.css");
