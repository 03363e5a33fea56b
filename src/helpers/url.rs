//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/blog/hello") // -> "/insights/blog/hello"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }

    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/blog/") // -> "https://example.com/insights/blog/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Absolute links and protocol-relative links are left alone
pub fn is_external(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
}

/// Path of the blog listing
pub fn blog_index_path() -> String {
    "/blog".to_string()
}

/// Path of a post page
pub fn post_path(slug: &str) -> String {
    format!("/blog/{}", slug.trim_matches('/'))
}

/// Slug used in tag URLs
pub fn tag_slug(tag: &str) -> String {
    slug::slugify(tag)
}

/// Path of a tag page
pub fn tag_path(tag: &str) -> String {
    format!("/tags/{}", tag_slug(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com".to_string(),
            root: "/insights/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/blog/hello"), "/insights/blog/hello");
        assert_eq!(url_for(&config, ""), "/insights/");
        assert_eq!(url_for(&SiteConfig::default(), "/blog"), "/blog");
        assert_eq!(
            url_for(&config, "https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/blog/"),
            "https://example.com/insights/blog/"
        );
    }

    #[test]
    fn test_content_paths() {
        assert_eq!(post_path("2023/launch"), "/blog/2023/launch");
        assert_eq!(tag_path("Machine Learning"), "/tags/machine-learning");
        assert_eq!(blog_index_path(), "/blog");
    }
}
