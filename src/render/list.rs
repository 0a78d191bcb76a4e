//! List pages: pagination, filtering and cards for each collection kind

use indexmap::IndexSet;
use maud::{html, Markup};
use std::ops::Range;

use super::error_panel;
use crate::config::SiteConfig;
use crate::content::{Collection, CollectionKind, ContentLoader, Entry};
use crate::error::FetchError;
use crate::helpers::{display_date, encode_component, post_path, truncate};

/// Page numbers shown on each side of the current page
pub const PAGINATION_RADIUS: usize = 2;

const DEFAULT_SUMMARY: &str = "Click to read more about this topic...";
const PROJECT_SUMMARY_LENGTH: usize = 100;

/// Which entries a list shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Value(String),
}

impl Filter {
    /// `None`, empty and `*` all mean "no filter"
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some("*") => Filter::All,
            Some(v) => Filter::Value(v.to_string()),
        }
    }

    /// An entry matches when its category or one of its tags equals the value
    pub fn matches(&self, entry: &Entry) -> bool {
        let Filter::Value(value) = self else {
            return true;
        };
        let wanted = normalize_filter(value);
        entry
            .category
            .iter()
            .chain(entry.tags.iter())
            .any(|candidate| normalize_filter(candidate) == wanted)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Filter::All => None,
            Filter::Value(v) => Some(v),
        }
    }

    /// Whether this filter selects `value`, under the same folding as [`Filter::matches`]
    pub fn selects(&self, value: &str) -> bool {
        self.value()
            .is_some_and(|v| normalize_filter(v) == normalize_filter(value))
    }
}

/// Case-insensitive, ignoring a `filter-` class prefix
fn normalize_filter(value: &str) -> String {
    let value = value.trim().to_lowercase();
    match value.strip_prefix("filter-") {
        Some(rest) => rest.to_string(),
        None => value,
    }
}

/// Query parameter carrying the filter on list URLs
pub fn filter_param(kind: CollectionKind) -> &'static str {
    match kind {
        CollectionKind::Blog => "tag",
        CollectionKind::Projects | CollectionKind::Publications => "category",
    }
}

/// Distinct filter values: categories first, then tags, in first-seen order
pub fn filter_values(collection: &Collection) -> Vec<String> {
    let mut seen = IndexSet::new();
    let mut values = Vec::new();
    let categories = collection.iter().filter_map(|e| e.category.as_ref());
    let tags = collection.iter().flat_map(|e| e.tags.iter());
    for value in categories.chain(tags) {
        if value.trim().is_empty() {
            continue;
        }
        if seen.insert(normalize_filter(value)) {
            values.push(value.clone());
        }
    }
    values
}

/// Pagination state of one list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// 1-indexed
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_pages: 0,
        }
    }

    /// Recompute the page count for `count` entries, keeping the current page in range
    pub fn recompute(&mut self, count: usize) {
        self.total_pages = count.div_ceil(self.page_size);
        self.current_page = self.clamp(self.current_page);
    }

    /// Clamp into `[1, total_pages]`; an empty list still has page 1
    pub fn clamp(&self, page: usize) -> usize {
        page.clamp(1, self.total_pages.max(1))
    }

    pub fn contains(&self, page: usize) -> bool {
        page >= 1 && page <= self.total_pages
    }

    /// Index range of the current page within a list of `len` entries
    pub fn bounds(&self, len: usize) -> Range<usize> {
        let start = ((self.current_page - 1) * self.page_size).min(len);
        let end = (start + self.page_size).min(len);
        start..end
    }
}

/// One control in the pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Prev(usize),
    Page(usize),
    Current(usize),
    Ellipsis,
    Next(usize),
}

/// Build the pagination bar; empty when everything fits on one page
pub fn pagination_items(state: &PageState) -> Vec<PageItem> {
    let total = state.total_pages;
    let current = state.current_page;
    let mut items = Vec::new();
    if total <= 1 {
        return items;
    }

    if current > 1 {
        items.push(PageItem::Prev(current - 1));
    }

    let start = current.saturating_sub(PAGINATION_RADIUS).max(1);
    let end = (current + PAGINATION_RADIUS).min(total);

    if start > 1 {
        items.push(PageItem::Page(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }

    for page in start..=end {
        if page == current {
            items.push(PageItem::Current(page));
        } else {
            items.push(PageItem::Page(page));
        }
    }

    if end < total {
        if end < total - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total));
    }

    if current < total {
        items.push(PageItem::Next(current + 1));
    }

    items
}

/// How pagination links address other pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStyle {
    /// `?page=N`, keeping the filter; served pages
    #[default]
    Query,
    /// `/<route>/page/N/`; prebuilt pages, unfiltered
    Static,
}

/// Result of a page or filter change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageChange {
    Changed,
    /// Out of range or already there
    Unchanged,
    /// A load is still in flight
    Ignored,
}

/// One entry as shown on a list page
#[derive(Debug, Clone)]
pub struct Card<'c> {
    pub entry: &'c Entry,
    /// Position within the (filtered) list
    pub position: usize,
    /// Staggered reveal delay in milliseconds
    pub animation_delay: u32,
}

impl<'c> Card<'c> {
    fn new(entry: &'c Entry, position: usize) -> Self {
        Self {
            entry,
            position,
            animation_delay: (position % 3) as u32 * 100,
        }
    }
}

/// A rendered slice of a collection
#[derive(Debug, Clone)]
pub struct ListPage<'c> {
    pub kind: CollectionKind,
    pub state: PageState,
    pub filter: Filter,
    pub cards: Vec<Card<'c>>,
    pub pagination: Vec<PageItem>,
    pub link_style: LinkStyle,
}

/// Paginates and filters one collection
#[derive(Debug, Clone)]
pub struct ListRenderer<'a> {
    config: &'a SiteConfig,
    state: PageState,
    filter: Filter,
    link_style: LinkStyle,
}

impl<'a> ListRenderer<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            config,
            state: PageState::new(config.per_page),
            filter: Filter::All,
            link_style: LinkStyle::Query,
        }
    }

    pub fn with_link_style(mut self, link_style: LinkStyle) -> Self {
        self.link_style = link_style;
        self
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Entries that pass the active filter, in collection order
    pub fn filtered<'c>(&self, collection: &'c Collection) -> Vec<&'c Entry> {
        collection
            .iter()
            .filter(|e| self.filter.matches(e))
            .collect()
    }

    /// Recompute the page count after the collection changed
    pub fn sync(&mut self, collection: &Collection) {
        let count = self.filtered(collection).len();
        self.state.recompute(count);
    }

    /// Switch filters; always goes back to the first page
    pub fn set_filter(&mut self, collection: &Collection, filter: Filter) -> PageChange {
        if filter == self.filter {
            return PageChange::Unchanged;
        }
        tracing::debug!("Filtering {} by {:?}", collection.kind, filter);
        self.filter = filter;
        self.state.current_page = 1;
        self.sync(collection);
        PageChange::Changed
    }

    /// Move to `page`; out-of-range requests leave the list where it is
    pub fn go_to_page(&mut self, page: usize) -> PageChange {
        if !self.state.contains(page) || page == self.state.current_page {
            return PageChange::Unchanged;
        }
        self.state.current_page = page;
        PageChange::Changed
    }

    /// Slice out `page` (clamped into range) of the filtered collection
    pub fn render_page<'c>(&mut self, collection: &'c Collection, page: usize) -> ListPage<'c> {
        let entries = self.filtered(collection);
        self.state.recompute(entries.len());

        let clamped = self.state.clamp(page);
        if clamped != page {
            tracing::debug!("Page {} out of range, showing page {}", page, clamped);
        }
        self.state.current_page = clamped;

        let range = self.state.bounds(entries.len());
        let cards = entries[range.clone()]
            .iter()
            .zip(range)
            .map(|(entry, position)| Card::new(entry, position))
            .collect();

        ListPage {
            kind: collection.kind,
            state: self.state,
            filter: self.filter.clone(),
            cards,
            pagination: pagination_items(&self.state),
            link_style: self.link_style,
        }
    }

    /// Render the current page, filter bar included
    pub fn render(&mut self, collection: &Collection) -> Markup {
        let current = self.state.current_page;
        self.render_at(collection, current)
    }

    /// Render `page`, clamped into range
    pub fn render_at(&mut self, collection: &Collection, page: usize) -> Markup {
        let page = self.render_page(collection, page);
        let filters = filter_values(collection);
        render_list(self.config, &page, &filters)
    }
}

/// Loading state of a list page scope
#[derive(Debug)]
pub enum LoadState {
    Loading,
    Ready(Collection),
    Failed(FetchError),
}

/// One list page for the lifetime of a page view
///
/// Owns its collection; page and filter requests that arrive while the
/// manifest is still loading are ignored.
#[derive(Debug)]
pub struct ListSession<'a> {
    kind: CollectionKind,
    renderer: ListRenderer<'a>,
    load_state: LoadState,
}

impl<'a> ListSession<'a> {
    pub fn new(config: &'a SiteConfig, kind: CollectionKind) -> Self {
        Self {
            kind,
            renderer: ListRenderer::new(config),
            load_state: LoadState::Loading,
        }
    }

    pub fn with_link_style(mut self, link_style: LinkStyle) -> Self {
        self.renderer = self.renderer.with_link_style(link_style);
        self
    }

    /// Fetch the manifest and settle the session
    pub fn load(&mut self, loader: &ContentLoader) -> &LoadState {
        self.begin_load();
        let result = loader.load(self.kind);
        self.finish_load(result)
    }

    /// Mark a fetch as outstanding
    pub fn begin_load(&mut self) {
        self.load_state = LoadState::Loading;
    }

    pub fn finish_load(&mut self, result: Result<Collection, FetchError>) -> &LoadState {
        self.load_state = match result {
            Ok(collection) => {
                self.renderer.sync(&collection);
                LoadState::Ready(collection)
            }
            Err(e) => {
                tracing::error!("Error loading {}: {}", self.kind.label(), e);
                LoadState::Failed(e)
            }
        };
        &self.load_state
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn renderer(&self) -> &ListRenderer<'a> {
        &self.renderer
    }

    pub fn go_to_page(&mut self, page: usize) -> PageChange {
        match self.load_state {
            LoadState::Ready(_) => self.renderer.go_to_page(page),
            _ => {
                tracing::debug!("Ignoring page change to {} while not ready", page);
                PageChange::Ignored
            }
        }
    }

    pub fn set_filter(&mut self, filter: Filter) -> PageChange {
        match &self.load_state {
            LoadState::Ready(collection) => self.renderer.set_filter(collection, filter),
            _ => {
                tracing::debug!("Ignoring filter {:?} while not ready", filter);
                PageChange::Ignored
            }
        }
    }

    /// Markup for the current state: spinner, error panel or list
    pub fn render(&mut self) -> Markup {
        let current = self.renderer.state().current_page;
        self.render_at(current)
    }

    /// Like `render`, showing `page` (clamped) once the list is ready
    pub fn render_at(&mut self, page: usize) -> Markup {
        let label = self.kind.label();
        match &self.load_state {
            LoadState::Loading => html! {
                div."col-12".loading {
                    i.fas.fa-spinner {}
                    p { "Loading " (label) "..." }
                }
            },
            LoadState::Failed(_) => error_panel(
                &format!("Unable to load {}", label),
                "Please try refreshing the page. If the problem persists, check back later.",
            ),
            LoadState::Ready(collection) => self.renderer.render_at(collection, page),
        }
    }
}

/// Link to a list page
fn page_href(kind: CollectionKind, page: usize, filter: &Filter, style: LinkStyle) -> String {
    if style == LinkStyle::Static {
        return match page {
            1 => format!("/{}/", kind.route()),
            n => format!("/{}/page/{}/", kind.route(), n),
        };
    }
    match filter.value() {
        Some(value) => format!(
            "?page={}&{}={}",
            page,
            filter_param(kind),
            encode_component(value)
        ),
        None => format!("?page={}", page),
    }
}

fn filter_href(kind: CollectionKind, value: &str) -> String {
    format!("?{}={}", filter_param(kind), encode_component(value))
}

/// Section wrapper with the list heading
pub fn list_section(kind: CollectionKind, list: Markup) -> Markup {
    html! {
        section id=(kind.route()) {
            div.container {
                h2.section-title { (kind.heading()) }
                (list)
            }
        }
    }
}

/// Full list markup: filter bar, cards and pagination
pub fn render_list(config: &SiteConfig, page: &ListPage<'_>, filters: &[String]) -> Markup {
    let kind = page.kind;
    html! {
        @if !filters.is_empty() {
            ul.filters id={ (kind.route()) "-filters" } {
                li class=[page.filter.value().is_none().then_some("filter-active")] {
                    a href="?" { "All" }
                }
                @for value in filters {
                    @let active = page.filter.selects(value);
                    li class=[active.then_some("filter-active")] {
                        a href=(filter_href(kind, value)) { (value) }
                    }
                }
            }
        }
        div class={ (kind.route()) "-container row" } {
            @if page.cards.is_empty() {
                div."col-12".empty { p { "Nothing here yet." } }
            }
            @for card in &page.cards {
                @match kind {
                    CollectionKind::Blog => { (blog_card(config, card)) }
                    CollectionKind::Projects => { (project_card(config, card)) }
                    CollectionKind::Publications => { (publication_card(card)) }
                }
            }
        }
        (render_pagination(kind, page))
    }
}

fn render_pagination(kind: CollectionKind, page: &ListPage<'_>) -> Markup {
    html! {
        @if !page.pagination.is_empty() {
            nav.pagination id={ (kind.route()) "-pagination" } {
                @for item in &page.pagination {
                    @match item {
                        PageItem::Prev(n) => {
                            a.prev href=(page_href(kind, *n, &page.filter, page.link_style)) {
                                i.fas.fa-chevron-left {} " Previous"
                            }
                        }
                        PageItem::Page(n) => {
                            a href=(page_href(kind, *n, &page.filter, page.link_style)) { (n) }
                        }
                        PageItem::Current(n) => {
                            span.current { (n) }
                        }
                        PageItem::Ellipsis => {
                            span { "..." }
                        }
                        PageItem::Next(n) => {
                            a.next href=(page_href(kind, *n, &page.filter, page.link_style)) {
                                "Next " i.fas.fa-chevron-right {}
                            }
                        }
                    }
                }
            }
        }
    }
}

fn blog_card(config: &SiteConfig, card: &Card<'_>) -> Markup {
    let entry = card.entry;
    let href = post_path(config, &entry.slug());
    html! {
        div."col-lg-4"."col-md-6" {
            article.blog-item data-aos="fade-up" data-aos-delay=(card.animation_delay) {
                div.blog-item-content {
                    div.blog-item-meta {
                        @if let Some(date) = &entry.date {
                            span.blog-date {
                                i.fas.fa-calendar-alt {}
                                " " (display_date(date, false))
                            }
                        }
                        span.blog-read-time {
                            i.fas.fa-clock {}
                            " " (entry.read_time_text())
                        }
                    }
                    h3.blog-title {
                        a href=(href) { (entry.title) }
                    }
                    p.blog-description {
                        (entry.summary_text().unwrap_or(DEFAULT_SUMMARY))
                    }
                    @if !entry.tags.is_empty() {
                        div.blog-tags {
                            @for tag in &entry.tags {
                                a.blog-tag href=(filter_href(CollectionKind::Blog, tag)) { (tag) }
                            }
                        }
                    }
                    a.blog-read-more href=(href) {
                        "Read More " i.fas.fa-arrow-right {}
                    }
                }
            }
        }
    }
}

fn project_card(config: &SiteConfig, card: &Card<'_>) -> Markup {
    let entry = card.entry;
    let category = entry.category.as_deref().unwrap_or("");
    let description = truncate(entry.summary_text().unwrap_or(""), PROJECT_SUMMARY_LENGTH);
    html! {
        div class={ "col-lg-4 col-md-6 project-item " (category) } {
            div.project-card data-aos="fade-up" data-aos-delay=(card.animation_delay) {
                div.project-card-content {
                    div.project-header {
                        div.project-meta {
                            @if let Some(year) = &entry.year {
                                span.project-year {
                                    i.fas.fa-calendar-alt {}
                                    " " (year)
                                }
                            }
                            @if !category.is_empty() {
                                span.project-category {
                                    i.fas.fa-folder {}
                                    " " (config.category_name(category))
                                }
                            }
                        }
                    }
                    h3.project-title { (entry.title) }
                    p.project-description { (description) }
                    @if let Some(tools) = &entry.tools {
                        div.project-tools {
                            i.fas.fa-tools {}
                            span { (tools) }
                        }
                    }
                    @if !entry.tags.is_empty() {
                        div.project-tags {
                            @for tag in &entry.tags {
                                span.project-tag { (tag) }
                            }
                        }
                    }
                    div.project-links {
                        @if let Some(url) = &entry.github {
                            a.project-link.github href=(url) target="_blank" rel="noopener" title="View Code" {
                                i.fab.fa-github {}
                            }
                        }
                        @if let Some(url) = &entry.deployment {
                            a.project-link.live href=(url) target="_blank" rel="noopener" title="Live Demo" {
                                i.fas.fa-external-link-alt {}
                            }
                        }
                        @if let Some(url) = &entry.demo {
                            a.project-link.demo href=(url) target="_blank" rel="noopener" title="Video Demo" {
                                i.fas.fa-play {}
                            }
                        }
                    }
                }
            }
        }
    }
}

fn publication_card(card: &Card<'_>) -> Markup {
    let entry = card.entry;
    let category = entry.category.as_deref().map(normalize_filter);
    html! {
        div class={ "publication-item filter-" (category.as_deref().unwrap_or("other")) }
            data-aos="fade-up" data-aos-delay=(card.animation_delay) {
            div.publication-header {
                h3.publication-title { (entry.title) }
            }
            div.publication-venue-line {
                @if let Some(venue) = &entry.venue {
                    span.publication-venue { (venue) }
                }
                @if let Some(date) = &entry.date {
                    span.publication-date { (date) }
                }
            }
            @if let Some(authors) = &entry.authors {
                div.publication-authors { (authors) }
            }
            div.publication-tags {
                @if let Some(category) = &category {
                    span.publication-category { (category.to_uppercase()) }
                }
                @if !entry.tags.is_empty() {
                    span.tags-label { "tags:" }
                    div.publication-tech-tags {
                        @for tag in &entry.tags {
                            span.tech-tag { (tag) }
                        }
                    }
                }
            }
            @if let Some(summary) = &entry.summary {
                details.publication-abstract {
                    summary.abstract-toggle { "Show Abstract" }
                    div.abstract-content { (summary) }
                }
            }
            div.publication-links {
                @if let Some(url) = &entry.pdf {
                    a.link-pdf href=(url) target="_blank" rel="noopener" {
                        i.fas.fa-file-pdf {} " PDF"
                    }
                }
                @if let Some(url) = &entry.doi {
                    a.link-doi href=(url) target="_blank" rel="noopener" {
                        i.fas.fa-external-link-alt {} " DOI"
                    }
                }
                @if let Some(url) = &entry.dataset {
                    a.link-dataset href=(url) target="_blank" rel="noopener" {
                        i.fas.fa-database {} " Dataset"
                    }
                }
                @if let Some(url) = &entry.code {
                    a.link-code href=(url) target="_blank" rel="noopener" {
                        i.fab.fa-github {} " Code"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn numbered(n: usize) -> Collection {
        let entries = (0..n)
            .map(|i| {
                let mut e = Entry::new(format!("Post {}", i));
                e.date = Some(format!("2024-01-{:02}", (i % 28) + 1));
                e.year = Some((2000 + i).to_string());
                e
            })
            .collect();
        // Sorting by year keeps construction order reversed and fully distinct
        Collection::new(CollectionKind::Projects, entries)
    }

    fn config(per_page: usize) -> SiteConfig {
        SiteConfig {
            per_page,
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_pages_partition_collection() {
        for (n, per_page) in [(0, 9), (1, 9), (9, 9), (10, 9), (23, 9), (23, 4), (7, 1)] {
            let collection = numbered(n);
            let config = config(per_page);
            let mut renderer = ListRenderer::new(&config);
            renderer.sync(&collection);
            let total = n.div_ceil(per_page);
            assert_eq!(renderer.state().total_pages, total);

            let mut seen = Vec::new();
            for page in 1..=total {
                let list = renderer.render_page(&collection, page);
                assert_eq!(list.state.current_page, page);
                assert!(list.cards.len() <= per_page);
                seen.extend(list.cards.iter().map(|c| c.entry.title.clone()));
            }

            let expected: Vec<_> = collection.iter().map(|e| e.title.clone()).collect();
            assert_eq!(seen, expected, "n={} per_page={}", n, per_page);
            let unique: HashSet<_> = seen.iter().collect();
            assert_eq!(unique.len(), n);
        }
    }

    #[test]
    fn test_out_of_range_pages_clamp() {
        let collection = numbered(20);
        let config = config(9);
        let mut renderer = ListRenderer::new(&config);

        let last = renderer.render_page(&collection, 99);
        assert_eq!(last.state.current_page, 3);
        assert_eq!(last.cards.len(), 2);

        let first = renderer.render_page(&collection, 0);
        assert_eq!(first.state.current_page, 1);
        assert_eq!(first.cards.len(), 9);
    }

    #[test]
    fn test_go_to_page() {
        let collection = numbered(20);
        let config = config(9);
        let mut renderer = ListRenderer::new(&config);
        renderer.sync(&collection);

        assert_eq!(renderer.go_to_page(2), PageChange::Changed);
        assert_eq!(renderer.go_to_page(2), PageChange::Unchanged);
        assert_eq!(renderer.go_to_page(4), PageChange::Unchanged);
        assert_eq!(renderer.go_to_page(0), PageChange::Unchanged);
        assert_eq!(renderer.state().current_page, 2);
    }

    #[test]
    fn test_animation_delay_cycles() {
        let collection = numbered(5);
        let config = config(9);
        let mut renderer = ListRenderer::new(&config);
        let list = renderer.render_page(&collection, 1);
        let delays: Vec<_> = list.cards.iter().map(|c| c.animation_delay).collect();
        assert_eq!(delays, vec![0, 100, 200, 0, 100]);
    }

    #[test]
    fn test_pagination_window() {
        use PageItem::*;
        let state = |current, total| PageState {
            current_page: current,
            page_size: 9,
            total_pages: total,
        };

        assert!(pagination_items(&state(1, 1)).is_empty());
        assert!(pagination_items(&state(1, 0)).is_empty());

        assert_eq!(
            pagination_items(&state(5, 10)),
            vec![
                Prev(4),
                Page(1),
                Ellipsis,
                Page(3),
                Page(4),
                Current(5),
                Page(6),
                Page(7),
                Ellipsis,
                Page(10),
                Next(6)
            ]
        );
        assert_eq!(
            pagination_items(&state(1, 10)),
            vec![Current(1), Page(2), Page(3), Ellipsis, Page(10), Next(2)]
        );
        assert_eq!(
            pagination_items(&state(4, 6)),
            vec![
                Prev(3),
                Page(1),
                Page(2),
                Page(3),
                Current(4),
                Page(5),
                Page(6),
                Next(5)
            ]
        );
        assert_eq!(
            pagination_items(&state(3, 3)),
            vec![Prev(2), Page(1), Page(2), Current(3)]
        );
    }

    fn tagged(title: &str, category: Option<&str>, tags: &[&str]) -> Entry {
        let mut e = Entry::new(title);
        e.category = category.map(String::from);
        e.tags = tags.iter().map(|t| t.to_string()).collect();
        e
    }

    #[test]
    fn test_filter_matches_category_or_tag() {
        let entry = tagged("T", Some("ml"), &["Python", "NLP"]);
        assert!(Filter::All.matches(&entry));
        assert!(Filter::parse(Some("ml")).matches(&entry));
        assert!(Filter::parse(Some("filter-ML")).matches(&entry));
        assert!(Filter::parse(Some("python")).matches(&entry));
        assert!(!Filter::parse(Some("web")).matches(&entry));
        assert_eq!(Filter::parse(Some("*")), Filter::All);
        assert_eq!(Filter::parse(Some("  ")), Filter::All);
    }

    #[test]
    fn test_filter_keeps_pagination_consistent() {
        let mut entries = Vec::new();
        for i in 0..12 {
            let category = if i % 3 == 0 { "web" } else { "ml" };
            let mut e = tagged(&format!("P{}", i), Some(category), &[]);
            e.year = Some((2000 + i).to_string());
            entries.push(e);
        }
        let collection = Collection::new(CollectionKind::Projects, entries);
        let config = config(3);
        let mut renderer = ListRenderer::new(&config);
        renderer.sync(&collection);
        assert_eq!(renderer.state().total_pages, 4);
        assert_eq!(renderer.go_to_page(3), PageChange::Changed);

        let change = renderer.set_filter(&collection, Filter::parse(Some("web")));
        assert_eq!(change, PageChange::Changed);
        assert_eq!(renderer.state().current_page, 1);
        assert_eq!(renderer.state().total_pages, 2);

        let page = renderer.render_page(&collection, 2);
        assert_eq!(page.cards.len(), 1);
        assert!(page
            .cards
            .iter()
            .all(|c| c.entry.category.as_deref() == Some("web")));

        assert_eq!(
            renderer.set_filter(&collection, Filter::parse(Some("web"))),
            PageChange::Unchanged
        );
    }

    #[test]
    fn test_filter_values() {
        let collection = Collection::new(
            CollectionKind::Projects,
            vec![
                tagged("A", Some("web"), &["Rust", "WASM"]),
                tagged("B", Some("ml"), &["rust", "Python"]),
                tagged("C", Some("web"), &[]),
            ],
        );
        assert_eq!(
            filter_values(&collection),
            vec!["web", "ml", "Rust", "WASM", "Python"]
        );
    }

    #[test]
    fn test_session_ignores_requests_while_loading() {
        let config = config(2);
        let mut session = ListSession::new(&config, CollectionKind::Blog);
        assert_eq!(session.go_to_page(2), PageChange::Ignored);
        assert_eq!(session.set_filter(Filter::parse(Some("x"))), PageChange::Ignored);
        assert!(session.render().into_string().contains("Loading blog posts"));

        session.finish_load(Ok(numbered(5)));
        assert!(matches!(session.load_state(), LoadState::Ready(_)));
        assert_eq!(session.go_to_page(2), PageChange::Changed);

        session.begin_load();
        assert_eq!(session.go_to_page(1), PageChange::Ignored);
    }

    #[test]
    fn test_session_failure_renders_error_panel() {
        let config = config(9);
        let mut session = ListSession::new(&config, CollectionKind::Projects);
        session.finish_load(Err(FetchError::missing("data/projects.json")));
        let html = session.render().into_string();
        assert!(html.contains("Unable to load projects"));
        assert_eq!(session.go_to_page(1), PageChange::Ignored);
    }

    #[test]
    fn test_blog_markup_escapes_and_links() {
        let mut entry = tagged("Rust & <Friends>", None, &["rust"]);
        entry.date = Some("2024-01-05".to_string());
        let collection = Collection::new(CollectionKind::Blog, vec![entry]);
        let config = config(9);
        let mut renderer = ListRenderer::new(&config);
        let html = renderer.render(&collection).into_string();

        assert!(html.contains("Rust &amp; &lt;Friends&gt;"));
        assert!(html.contains(r#"href="/blog/rust-friends.html""#));
        assert!(html.contains("Jan 5, 2024"));
        assert!(html.contains("5 min read"));
        assert!(html.contains(DEFAULT_SUMMARY));
        assert!(html.contains(r#"href="?tag=rust""#));
        assert!(!html.contains("pagination"));
    }

    #[test]
    fn test_project_and_publication_markup() {
        let mut project = tagged("Detector", Some("ml"), &["cv"]);
        project.description = Some("x".repeat(150));
        project.github = Some("https://github.com/a/b".to_string());
        let projects = Collection::new(CollectionKind::Projects, vec![project]);
        let config = config(9);
        let html = ListRenderer::new(&config).render(&projects).into_string();
        assert!(html.contains("Machine Learning"));
        assert!(html.contains(&format!("{}...", "x".repeat(100))));
        assert!(html.contains("https://github.com/a/b"));
        assert!(!html.contains("Live Demo"));

        let mut paper = tagged("Paper", Some("filter-vision"), &[]);
        paper.venue = Some("IEEE SIST".to_string());
        paper.summary = Some("We propose...".to_string());
        paper.doi = Some("https://doi.org/10.1109/x".to_string());
        let papers = Collection::new(CollectionKind::Publications, vec![paper]);
        let html = ListRenderer::new(&config).render(&papers).into_string();
        assert!(html.contains("publication-item filter-vision"));
        assert!(html.contains(">VISION<"));
        assert!(html.contains("Show Abstract"));
        assert!(html.contains(" DOI"));
        assert!(!html.contains(" PDF"));
    }

    #[test]
    fn test_static_links() {
        let collection = numbered(5);
        let config = config(2);
        let mut renderer = ListRenderer::new(&config).with_link_style(LinkStyle::Static);
        let html = renderer.render_at(&collection, 2).into_string();
        assert!(html.contains(r#"href="/projects/""#));
        assert!(html.contains(r#"href="/projects/page/3/""#));
        assert!(!html.contains("?page="));
    }

    #[test]
    fn test_pagination_links_keep_filter() {
        let entries = (0..5)
            .map(|i| {
                let mut e = tagged(&format!("P{}", i), None, &["AI & ML"]);
                e.date = Some(format!("2024-02-0{}", i + 1));
                e
            })
            .collect();
        let collection = Collection::new(CollectionKind::Blog, entries);
        let config = config(2);
        let mut renderer = ListRenderer::new(&config);
        renderer.set_filter(&collection, Filter::parse(Some("AI & ML")));
        let html = renderer.render(&collection).into_string();
        assert!(html.contains("?page=2&amp;tag=AI%20%26%20ML"));
        assert!(html.contains(r#"<span class="current">1</span>"#));
    }

    #[test]
    fn test_active_chip_ignores_case() {
        let collection = Collection::new(
            CollectionKind::Blog,
            vec![tagged("A", None, &["rust"]), tagged("B", None, &["web"])],
        );
        let config = config(9);
        let mut renderer = ListRenderer::new(&config);
        renderer.set_filter(&collection, Filter::parse(Some("RUST")));
        let html = renderer.render(&collection).into_string();

        assert!(html.contains(r#"<li class="filter-active"><a href="?tag=rust">rust</a></li>"#));
        assert!(html.contains(r#"<li><a href="?tag=web">web</a></li>"#));
        assert!(html.contains(r#"<li><a href="?">All</a></li>"#));
        assert!(Filter::parse(Some("filter-Rust")).selects("rust"));
        assert!(!Filter::All.selects("rust"));
    }
}
