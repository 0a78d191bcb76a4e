//! URL helper functions

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Site-relative link to a post page
///
/// # Examples
/// ```ignore
/// post_path(&config, "hello-world") // -> "/blog/hello-world.html"
/// ```
pub fn post_path(config: &SiteConfig, slug: &str) -> String {
    format!("{}/{}.html", config.blog_path.trim_end_matches('/'), slug)
}

/// Absolute URL of a post page, used as feed link and guid
pub fn post_url(config: &SiteConfig, slug: &str) -> String {
    format!("{}/{}.html", config.blog_url(), slug)
}

/// Encode a URL query component
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, NON_ALPHANUMERIC).to_string()
}

/// GitHub "new discussion" link for a post
pub fn discussion_url(repo: &str, title: &str, page_url: &str) -> String {
    let discussion_title = format!("Discussion: {}", title);
    let body = format!(
        "Let's discuss the blog post: {}\n\nRead the full post: {}",
        title, page_url
    );
    format!(
        "https://github.com/{}/discussions/new?category=blog&title={}&body={}",
        repo.trim_matches('/'),
        encode_component(&discussion_title),
        encode_component(&body)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com/".to_string();
        config.blog_path = "/blog".to_string();
        config
    }

    #[test]
    fn test_post_links() {
        let config = test_config();
        assert_eq!(post_path(&config, "hello"), "/blog/hello.html");
        assert_eq!(
            post_url(&config, "hello"),
            "https://example.com/blog/hello.html"
        );
    }

    #[test]
    fn test_discussion_url() {
        let url = discussion_url("owner/repo", "A & B", "https://example.com/blog/a.html");
        assert!(url.starts_with("https://github.com/owner/repo/discussions/new?category=blog"));
        assert!(url.contains("title=Discussion%3A%20A%20%26%20B"));
        assert!(!url.contains(' '));
    }
}
