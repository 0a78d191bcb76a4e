//! Render a single entry page to stdout

use anyhow::Result;

use crate::content::CollectionKind;
use crate::render::{DetailRenderer, Layout};
use crate::Folio;

pub fn run(folio: &Folio, slug: &str, kind: CollectionKind) -> Result<()> {
    let loader = folio.loader();
    let collection = loader.load(kind)?;
    let renderer = DetailRenderer::new(&folio.config, &loader);
    let view = renderer.render_detail(&collection, slug)?;

    let layout = Layout::load(folio);
    let page = layout.document(&renderer.meta(&view), renderer.render_article(&view));
    println!("{}", page.into_string());

    Ok(())
}
