//! Print one page of a collection

use anyhow::Result;

use crate::content::CollectionKind;
use crate::helpers::display_date;
use crate::render::{Filter, ListRenderer, PageItem};
use crate::Folio;

/// List a page of `kind`, optionally filtered by category or tag
pub fn run(folio: &Folio, kind: CollectionKind, page: usize, filter: Option<&str>) -> Result<()> {
    let collection = folio.loader().load(kind)?;
    let mut renderer = ListRenderer::new(&folio.config);
    renderer.set_filter(&collection, Filter::parse(filter));
    let list = renderer.render_page(&collection, page);

    let total = renderer.filtered(&collection).len();
    println!(
        "{} ({}, page {} of {}):",
        kind.heading(),
        total,
        list.state.current_page,
        list.state.total_pages.max(1)
    );

    for card in &list.cards {
        let entry = card.entry;
        let when = match kind {
            CollectionKind::Projects => entry.year.clone(),
            _ => entry.date.as_deref().map(|d| display_date(d, false)),
        };
        println!(
            "  {} - {} [{}]",
            when.as_deref().unwrap_or("undated"),
            entry.title,
            entry.slug()
        );
    }

    let pages: Vec<String> = list
        .pagination
        .iter()
        .filter_map(|item| match item {
            PageItem::Page(n) => Some(n.to_string()),
            PageItem::Current(n) => Some(format!("[{}]", n)),
            PageItem::Ellipsis => Some("...".to_string()),
            PageItem::Prev(_) | PageItem::Next(_) => None,
        })
        .collect();
    if !pages.is_empty() {
        println!("Pages: {}", pages.join(" "));
    }

    Ok(())
}
