//! Where manifests and post bodies come from

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{FetchError, FetchErrorKind};

/// Produces the text stored at a site-relative path
pub trait ContentSource: Send + Sync {
    fn fetch(&self, path: &str) -> Result<String, FetchError>;
}

/// Reads from a static site directory on disk
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Map a site path onto the root, refusing anything that climbs out of it
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(resolved)
    }
}

impl ContentSource for DirSource {
    fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let full = self
            .resolve(path)
            .ok_or_else(|| FetchError::missing(path))?;
        tracing::debug!("Fetching {:?}", full);

        fs::read_to_string(&full).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => FetchError::missing(path),
            _ => FetchError::new(path, FetchErrorKind::Io(e)),
        })
    }
}
