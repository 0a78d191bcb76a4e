//! Collections: the sorted entries of one manifest

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::Entry;

/// The content types a site lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Blog,
    Projects,
    Publications,
}

/// Which field orders a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Year,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 3] = [
        CollectionKind::Blog,
        CollectionKind::Projects,
        CollectionKind::Publications,
    ];

    /// Manifest file name under the data directory
    pub fn manifest(&self) -> &'static str {
        match self {
            CollectionKind::Blog => "blog.json",
            CollectionKind::Projects => "projects.json",
            CollectionKind::Publications => "research.json",
        }
    }

    pub fn sort_key(&self) -> SortKey {
        match self {
            CollectionKind::Projects => SortKey::Year,
            CollectionKind::Blog | CollectionKind::Publications => SortKey::Date,
        }
    }

    /// URL path segment of the list page
    pub fn route(&self) -> &'static str {
        match self {
            CollectionKind::Blog => "blog",
            CollectionKind::Projects => "projects",
            CollectionKind::Publications => "publications",
        }
    }

    /// Page heading of the list
    pub fn heading(&self) -> &'static str {
        match self {
            CollectionKind::Blog => "Blog",
            CollectionKind::Projects => "Projects",
            CollectionKind::Publications => "Publications",
        }
    }

    /// Human-readable plural, used in headings and error panels
    pub fn label(&self) -> &'static str {
        match self {
            CollectionKind::Blog => "blog posts",
            CollectionKind::Projects => "projects",
            CollectionKind::Publications => "publications",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route())
    }
}

impl FromStr for CollectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blog" | "post" | "posts" => Ok(CollectionKind::Blog),
            "projects" | "project" => Ok(CollectionKind::Projects),
            "publications" | "publication" | "research" => Ok(CollectionKind::Publications),
            other => Err(format!(
                "Unknown collection: {}. Available: blog, projects, publications",
                other
            )),
        }
    }
}

/// Entries of one kind, newest first
#[derive(Debug, Clone, Serialize)]
pub struct Collection {
    pub kind: CollectionKind,
    pub entries: Vec<Entry>,
}

impl Collection {
    /// Build a collection, sorting the entries newest first
    pub fn new(kind: CollectionKind, mut entries: Vec<Entry>) -> Self {
        sort_entries(&mut entries, kind.sort_key());
        let collection = Self { kind, entries };
        collection.warn_on_duplicate_slugs();
        collection
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Index of the first entry addressed by `slug`
    pub fn position(&self, slug: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.matches_slug(slug))
    }

    fn warn_on_duplicate_slugs(&self) {
        let mut seen: HashMap<String, &str> = HashMap::new();
        for entry in &self.entries {
            let slug = entry.slug();
            match seen.get(&slug) {
                Some(first) => tracing::warn!(
                    "Duplicate slug '{}' in {} ('{}' and '{}'), only the first is reachable",
                    slug,
                    self.kind,
                    first,
                    entry.title
                ),
                None => {
                    seen.insert(slug, &entry.title);
                }
            }
        }
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Sort descending by the kind's key; entries without a usable key go last
/// in their original order
pub fn sort_entries(entries: &mut [Entry], key: SortKey) {
    match key {
        SortKey::Date => entries.sort_by(|a, b| newest_first(a.published_at(), b.published_at())),
        SortKey::Year => entries.sort_by(|a, b| newest_first(a.year_number(), b.year_number())),
    }
}

fn newest_first<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
