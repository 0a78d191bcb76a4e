//! Error types shared by the content pipeline

use thiserror::Error;

/// A manifest or body could not be produced by the content source
#[derive(Debug, Error)]
#[error("failed to fetch {path}: {kind}")]
pub struct FetchError {
    /// Site-relative path that was requested
    pub path: String,
    #[source]
    pub kind: FetchErrorKind,
}

#[derive(Debug, Error)]
pub enum FetchErrorKind {
    #[error("not found")]
    Missing,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed manifest: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl FetchError {
    pub fn new(path: impl Into<String>, kind: impl Into<FetchErrorKind>) -> Self {
        Self {
            path: path.into(),
            kind: kind.into(),
        }
    }

    pub fn missing(path: impl Into<String>) -> Self {
        Self::new(path, FetchErrorKind::Missing)
    }

    /// Whether the source reported the path as absent
    pub fn is_missing(&self) -> bool {
        matches!(self.kind, FetchErrorKind::Missing)
    }
}

/// The requested slug is not part of the collection
#[derive(Debug, Error)]
#[error("no entry with slug '{slug}'")]
pub struct NotFoundError {
    pub slug: String,
}

impl NotFoundError {
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::missing("data/blog.json");
        assert!(err.is_missing());
        assert_eq!(err.to_string(), "failed to fetch data/blog.json: not found");
    }

    #[test]
    fn test_malformed_is_not_missing() {
        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = FetchError::new("data/blog.json", json_err);
        assert!(!err.is_missing());
        assert!(err.to_string().contains("malformed manifest"));
    }
}
