//! Export the RSS feed

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::content::CollectionKind;
use crate::render::FeedExporter;
use crate::Folio;

/// Write the blog feed to `output`, or stdout when no file is given
pub fn run(folio: &Folio, output: Option<&Path>) -> Result<()> {
    let collection = folio.loader().load(CollectionKind::Blog)?;
    let feed = FeedExporter::new(&folio.config).export(&collection);

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, feed).with_context(|| format!("Failed to write {:?}", path))?;
            tracing::info!("Wrote feed with {} items to {:?}", collection.len(), path);
        }
        None => print!("{}", feed),
    }

    Ok(())
}
