//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub author_email: Option<String>,
    pub language: String,

    // URL
    pub url: String,
    pub blog_path: String,

    // Directory
    pub site_dir: String,
    pub public_dir: String,
    pub data_dir: String,
    pub posts_dir: String,
    pub partials_dir: String,

    // Listing
    pub per_page: usize,
    pub related_count: usize,
    pub category_names: IndexMap<String, String>,

    // Feed
    pub feed_categories: Vec<String>,

    // Discussion link on posts, as "owner/repo"
    pub discussions_repo: Option<String>,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Tech Blog".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            author_email: None,
            language: "en-us".to_string(),

            url: "http://example.com".to_string(),
            blog_path: "/blog".to_string(),

            site_dir: ".".to_string(),
            public_dir: "public".to_string(),
            data_dir: "data".to_string(),
            posts_dir: "posts".to_string(),
            partials_dir: "templates/partial".to_string(),

            per_page: 9,
            related_count: 4,
            category_names: default_category_names(),

            feed_categories: Vec::new(),
            discussions_repo: None,
            extra: HashMap::new(),
        }
    }
}

fn default_category_names() -> IndexMap<String, String> {
    [
        ("web", "Web App"),
        ("ml", "Machine Learning"),
        ("api", "API"),
        ("data", "Data Science"),
        ("mobile", "Mobile App"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let mut config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.normalize();
        Ok(config)
    }

    /// Clamp values the pipeline cannot work with
    fn normalize(&mut self) {
        if self.per_page == 0 {
            tracing::warn!("per_page must be at least 1, using 9");
            self.per_page = 9;
        }
        if !self.blog_path.starts_with('/') {
            self.blog_path.insert(0, '/');
        }
        let trimmed = self.blog_path.trim_end_matches('/').len().max(1);
        self.blog_path.truncate(trimmed);
    }

    /// Absolute URL of the blog section, without trailing slash
    pub fn blog_url(&self) -> String {
        let base = self.url.trim_end_matches('/');
        let path = self.blog_path.trim_end_matches('/');
        format!("{}{}", base, path)
    }

    /// Display name for a project category, falling back to the raw value
    pub fn category_name<'a>(&'a self, category: &'a str) -> &'a str {
        self.category_names
            .get(category)
            .map(String::as_str)
            .unwrap_or(category)
    }

    /// First word of the author name, used in page titles
    pub fn short_author(&self) -> &str {
        self.author.split_whitespace().next().unwrap_or(&self.author)
    }
}
