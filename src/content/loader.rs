//! Content loader - fetches manifests and post bodies from a content source

use std::sync::Arc;

use super::source::{ContentSource, DirSource};
use super::{Collection, CollectionKind, Entry};
use crate::error::FetchError;
use crate::Folio;

/// Loads collections and post bodies
///
/// Nothing is cached: every call goes back to the source.
#[derive(Clone)]
pub struct ContentLoader {
    source: Arc<dyn ContentSource>,
    data_dir: String,
    posts_dir: String,
}

impl ContentLoader {
    /// Create a loader reading from the site directory
    pub fn new(folio: &Folio) -> Self {
        Self::with_source(
            Arc::new(DirSource::new(&folio.site_dir)),
            &folio.config.data_dir,
            &folio.config.posts_dir,
        )
    }

    pub fn with_source(source: Arc<dyn ContentSource>, data_dir: &str, posts_dir: &str) -> Self {
        Self {
            source,
            data_dir: data_dir.trim_matches('/').to_string(),
            posts_dir: posts_dir.trim_matches('/').to_string(),
        }
    }

    /// Fetch and sort the collection of the given kind
    pub fn load(&self, kind: CollectionKind) -> Result<Collection, FetchError> {
        let path = join(&self.data_dir, kind.manifest());
        self.load_manifest(kind, &path)
    }

    /// Fetch and sort a collection from an explicit manifest path
    pub fn load_manifest(&self, kind: CollectionKind, path: &str) -> Result<Collection, FetchError> {
        let text = self.source.fetch(path)?;
        let entries: Vec<Entry> =
            serde_json::from_str(&text).map_err(|e| FetchError::new(path, e))?;
        let entries = entries
            .into_iter()
            .enumerate()
            .filter_map(|(i, entry)| {
                if entry.title.trim().is_empty() {
                    tracing::warn!("Skipping entry {} in {}: missing title", i, path);
                    None
                } else {
                    Some(entry)
                }
            })
            .collect();

        let collection = Collection::new(kind, entries);
        tracing::info!("Loaded {} {} from {}", collection.len(), kind.label(), path);
        Ok(collection)
    }

    /// Fetch the raw markdown paired with a slug
    pub fn fetch_body(&self, slug: &str) -> Result<String, FetchError> {
        let path = join(&self.posts_dir, &format!("{}.md", slug));
        self.source.fetch(&path)
    }
}

fn join(dir: &str, file: &str) -> String {
    if dir.is_empty() || dir == "." {
        file.to_string()
    } else {
        format!("{}/{}", dir, file)
    }
}
