//! folio: content pipeline for a personal portfolio site
//!
//! Loads JSON manifests and Markdown posts from a static site directory,
//! renders paginated blog/project/publication listings, single post pages
//! and an RSS feed.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod render;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use error::{FetchError, NotFoundError};

/// The main application: configuration plus resolved directories
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory (where _config.yml lives)
    pub base_dir: PathBuf,
    /// Static site directory holding data/, posts/ and templates/
    pub site_dir: PathBuf,
    /// Output directory for `build`
    pub public_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let site_dir = base_dir.join(&config.site_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            site_dir,
            public_dir,
        }
    }

    /// Content loader reading from the site directory
    pub fn loader(&self) -> content::ContentLoader {
        content::ContentLoader::new(self)
    }

    /// Render every page into the public directory
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Remove the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
