//! Content module - entries, collections, front-matter and loading

mod collection;
mod entry;
pub mod frontmatter;
pub mod loader;
mod markdown;
mod slug;
pub mod source;

pub use collection::{sort_entries, Collection, CollectionKind, SortKey};
pub use entry::{Entry, DEFAULT_READ_TIME};
pub use frontmatter::{Frontmatter, FrontmatterValue, ParsedDocument};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use slug::slugify;
pub use source::{ContentSource, DirSource};
