//! Page chrome: the HTML document around a rendered fragment

use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::fs;

use super::RSS_MIME_TYPE;
use crate::Folio;

/// Title and meta tags of one page
#[derive(Debug, Clone, Default)]
pub struct PageMeta {
    pub title: String,
    pub description: Option<String>,
    pub keywords: Vec<String>,
}

impl PageMeta {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Wraps fragments in a full document with the site's header and footer
#[derive(Debug, Clone, Default)]
pub struct Layout {
    language: String,
    feed_href: String,
    header: Option<String>,
    footer: Option<String>,
}

impl Layout {
    /// Read header.html and footer.html from the partials directory
    ///
    /// Missing partials are skipped; the page renders without them.
    pub fn load(folio: &Folio) -> Self {
        let partials = folio.site_dir.join(&folio.config.partials_dir);
        let read = |name: &str| {
            let path = partials.join(name);
            match fs::read_to_string(&path) {
                Ok(html) => Some(html),
                Err(e) => {
                    tracing::debug!("Partial {:?} not loaded: {}", path, e);
                    None
                }
            }
        };

        Self {
            language: language_tag(&folio.config.language),
            feed_href: format!("{}/rss.xml", folio.config.blog_path.trim_end_matches('/')),
            header: read("header.html"),
            footer: read("footer.html"),
        }
    }

    pub fn document(&self, meta: &PageMeta, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang=(self.language) {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (meta.title) }
                    @if let Some(description) = &meta.description {
                        meta name="description" content=(description);
                    }
                    @if !meta.keywords.is_empty() {
                        meta name="keywords" content=(meta.keywords.join(", "));
                    }
                    link rel="alternate" type=(RSS_MIME_TYPE) href=(self.feed_href);
                }
                body {
                    @if let Some(header) = &self.header {
                        (PreEscaped(header))
                    }
                    main { (content) }
                    @if let Some(footer) = &self.footer {
                        (PreEscaped(footer))
                    }
                }
            }
        }
    }
}

/// "en-us" -> "en"
fn language_tag(language: &str) -> String {
    language
        .split(['-', '_'])
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("en")
        .to_string()
}
