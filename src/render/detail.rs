//! Single entry pages

use maud::{html, Markup, PreEscaped};

use super::{error_panel, PageMeta};
use crate::config::SiteConfig;
use crate::content::{frontmatter, Collection, ContentLoader, Entry, MarkdownRenderer};
use crate::error::{FetchError, NotFoundError};
use crate::helpers::{display_date, discussion_url, post_path, post_url};

/// Article body
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Markdown converted to HTML
    Rendered(String),
    /// No body could be fetched; carries the entry description, if any
    Preview(Option<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    pub title: String,
    pub slug: String,
    pub date: Option<String>,
}

impl NavLink {
    fn from_entry(entry: &Entry) -> Self {
        Self {
            title: entry.title.clone(),
            slug: entry.slug(),
            date: entry.date.clone(),
        }
    }
}

/// Everything needed to render one entry page
#[derive(Debug, Clone)]
pub struct DetailView {
    /// The manifest entry with front-matter merged over it
    pub entry: Entry,
    pub slug: String,
    pub body: Body,
    /// Newer neighbour
    pub prev: Option<NavLink>,
    /// Older neighbour
    pub next: Option<NavLink>,
    pub related: Vec<NavLink>,
}

pub struct DetailRenderer<'a> {
    config: &'a SiteConfig,
    loader: &'a ContentLoader,
    markdown: MarkdownRenderer,
}

impl<'a> DetailRenderer<'a> {
    pub fn new(config: &'a SiteConfig, loader: &'a ContentLoader) -> Self {
        Self {
            config,
            loader,
            markdown: MarkdownRenderer::new(),
        }
    }

    /// Resolve `slug` in `collection` and assemble its page
    pub fn render_detail(
        &self,
        collection: &Collection,
        slug: &str,
    ) -> Result<DetailView, NotFoundError> {
        let index = collection
            .position(slug)
            .ok_or_else(|| NotFoundError::new(slug))?;
        let found = &collection.entries[index];
        let canonical = found.slug();
        let mut entry = found.clone();

        let body = match self.fetch_body(&canonical, slug) {
            Ok(text) => {
                let doc = frontmatter::parse(&text);
                entry.merge_frontmatter(&doc.frontmatter);
                Body::Rendered(self.markdown.render(&doc.body))
            }
            Err(e) => {
                tracing::warn!("Showing preview for '{}': {}", canonical, e);
                Body::Preview(entry.summary_text().map(String::from))
            }
        };

        let prev = index
            .checked_sub(1)
            .map(|i| NavLink::from_entry(&collection.entries[i]));
        let next = collection.entries.get(index + 1).map(NavLink::from_entry);

        let related = collection
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, e)| NavLink::from_entry(e))
            .take(self.config.related_count)
            .collect();

        Ok(DetailView {
            entry,
            slug: canonical,
            body,
            prev,
            next,
            related,
        })
    }

    /// Canonical slug first, then the slug as requested
    fn fetch_body(&self, canonical: &str, requested: &str) -> Result<String, FetchError> {
        match self.loader.fetch_body(canonical) {
            Err(e) if e.is_missing() && requested != canonical => {
                self.loader.fetch_body(requested)
            }
            result => result,
        }
    }

    /// Title and meta tags of the page
    pub fn meta(&self, view: &DetailView) -> PageMeta {
        PageMeta {
            title: format!("{} - {}", view.entry.title, self.config.short_author()),
            description: view.entry.summary_text().map(String::from),
            keywords: view.entry.tags.clone(),
        }
    }

    pub fn render_article(&self, view: &DetailView) -> Markup {
        let entry = &view.entry;
        html! {
            article.blog-post {
                header.blog-post-header {
                    h1.blog-post-title { (entry.title) }
                    div.blog-post-meta {
                        @if let Some(date) = &entry.date {
                            span.blog-post-date {
                                i.fas.fa-calendar-alt {}
                                " " (display_date(date, true))
                            }
                        }
                        span.blog-post-read-time {
                            i.fas.fa-clock {}
                            " " (entry.read_time_text())
                        }
                    }
                    @if !entry.tags.is_empty() {
                        div.blog-post-tags {
                            @for tag in &entry.tags {
                                span.blog-tag { (tag) }
                            }
                        }
                    }
                }
                div.blog-post-content {
                    @match &view.body {
                        Body::Rendered(content) => { (PreEscaped(content)) }
                        Body::Preview(description) => {
                            @if let Some(description) = description {
                                p.lead { (description) }
                            }
                            div.alert.alert-info {
                                h4 { "Content Preview" }
                                p { "Full article content is being prepared. Please check back soon!" }
                            }
                        }
                    }
                }
                (self.render_navigation(view))
                @if let Some(repo) = &self.config.discussions_repo {
                    div.blog-post-discussion {
                        a.btn href=(discussion_url(repo, &entry.title, &post_url(self.config, &view.slug)))
                            target="_blank" rel="noopener" {
                            i.fab.fa-github {} " Discuss this post"
                        }
                    }
                }
            }
            @if !view.related.is_empty() {
                aside.recent-posts {
                    h3 { "Recent Posts" }
                    ul {
                        @for link in &view.related {
                            li {
                                a href=(post_path(self.config, &link.slug)) { (link.title) }
                                @if let Some(date) = &link.date {
                                    span.recent-post-date { (display_date(date, false)) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    fn render_navigation(&self, view: &DetailView) -> Markup {
        html! {
            nav.blog-post-nav {
                @if let Some(prev) = &view.prev {
                    a.prev-post href=(post_path(self.config, &prev.slug)) {
                        span.nav-label { i.fas.fa-arrow-left {} " Previous" }
                        span.nav-title { (prev.title) }
                    }
                }
                @if let Some(next) = &view.next {
                    a.next-post href=(post_path(self.config, &next.slug)) {
                        span.nav-label { "Next " i.fas.fa-arrow-right {} }
                        span.nav-title { (next.title) }
                    }
                }
            }
        }
    }
}

/// Terminal state for an unknown slug
pub fn render_not_found(config: &SiteConfig, slug: &str) -> Markup {
    html! {
        (error_panel(
            "Post not found",
            &format!("There is no post called '{}'.", slug),
        ))
        p.text-center {
            a href={ (config.blog_path) "/" } { "Back to Blog" }
        }
    }
}
