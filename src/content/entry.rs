//! Entry model: one blog post, project or publication

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::frontmatter::{Frontmatter, FrontmatterValue};
use super::slug::slugify;
use crate::helpers::{parse_date, parse_year};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect())
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Years show up both as numbers and as strings in manifests
fn number_or_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct NumberOrString;

    impl<'de> Visitor<'de> for NumberOrString {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number or a string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(NumberOrString)
}

/// Shown when an entry carries no `readTime`
pub const DEFAULT_READ_TIME: &str = "5 min read";

/// A single manifest record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Entry {
    pub title: String,
    pub date: Option<String>,
    #[serde(deserialize_with = "number_or_string")]
    pub year: Option<String>,
    pub description: Option<String>,
    pub excerpt: Option<String>,
    #[serde(rename = "abstract")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    pub slug: Option<String>,
    pub category: Option<String>,
    pub read_time: Option<String>,

    // Projects
    pub tools: Option<String>,
    pub github: Option<String>,
    pub deployment: Option<String>,
    pub demo: Option<String>,

    // Publications
    pub authors: Option<String>,
    pub venue: Option<String>,
    pub pdf: Option<String>,
    pub doi: Option<String>,
    pub code: Option<String>,
    pub dataset: Option<String>,

    /// Fields this model does not name
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Entry {
    /// Create an entry with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Explicit slug, trimmed; blank counts as absent
    fn explicit_slug(&self) -> Option<&str> {
        self.slug.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Explicit slug, or one derived from the title
    pub fn slug(&self) -> String {
        match self.explicit_slug() {
            Some(s) => s.to_string(),
            None => slugify(&self.title),
        }
    }

    /// Whether `slug` addresses this entry, by explicit or derived slug
    pub fn matches_slug(&self, slug: &str) -> bool {
        self.explicit_slug() == Some(slug) || slugify(&self.title) == slug
    }

    pub fn read_time_text(&self) -> &str {
        self.read_time
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_READ_TIME)
    }

    pub fn published_at(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_date)
    }

    pub fn year_number(&self) -> Option<i64> {
        self.year.as_deref().and_then(parse_year)
    }

    /// Description, falling back to the excerpt
    pub fn summary_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .or(self.excerpt.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    /// Overlay front-matter values; front-matter wins on every key it sets
    pub fn merge_frontmatter(&mut self, frontmatter: &Frontmatter) {
        for (key, value) in frontmatter {
            let text = || Some(value.to_text());
            match key.as_str() {
                "title" => self.title = value.to_text(),
                "date" => self.date = text(),
                "year" => self.year = text(),
                "description" => self.description = text(),
                "excerpt" => self.excerpt = text(),
                "abstract" => self.summary = text(),
                "tags" => self.tags = value.to_list(),
                "slug" => self.slug = text(),
                "category" => self.category = text(),
                "readTime" | "read_time" => self.read_time = text(),
                "tools" => self.tools = text(),
                "github" => self.github = text(),
                "deployment" => self.deployment = text(),
                "demo" => self.demo = text(),
                "authors" => self.authors = text(),
                "venue" => self.venue = text(),
                "pdf" => self.pdf = text(),
                "doi" => self.doi = text(),
                "code" => self.code = text(),
                "dataset" => self.dataset = text(),
                _ => {
                    let json = match value {
                        FrontmatterValue::Text(s) => serde_json::Value::String(s.clone()),
                        FrontmatterValue::List(items) => serde_json::Value::from(items.clone()),
                    };
                    self.extra.insert(key.clone(), json);
                }
            }
        }
    }
}
