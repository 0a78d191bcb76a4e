//! Front-matter parsing
//!
//! Post bodies may start with a header block:
//!
//! ```text
//! ---
//! title: "Hello"
//! tags: [rust, 'web']
//! ---
//! Markdown body...
//! ```
//!
//! Only a flat subset is understood: one `key: value` per line, where a value
//! wrapped in `[...]` is a comma-separated list. Nested mappings, multi-line
//! values and typed scalars are not supported; such lines come through as
//! plain text or are skipped.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref FRONTMATTER: Regex = Regex::new(r"^---\s*\n([\s\S]*?)\n---\s*\n([\s\S]*)$").unwrap();
}

/// A single front-matter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FrontmatterValue {
    Text(String),
    List(Vec<String>),
}

impl FrontmatterValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FrontmatterValue::Text(s) => Some(s),
            FrontmatterValue::List(_) => None,
        }
    }

    /// Flatten to a single string; lists are joined with ", "
    pub fn to_text(&self) -> String {
        match self {
            FrontmatterValue::Text(s) => s.clone(),
            FrontmatterValue::List(items) => items.join(", "),
        }
    }

    /// View as a list; a text value becomes a one-element list
    pub fn to_list(&self) -> Vec<String> {
        match self {
            FrontmatterValue::Text(s) if s.is_empty() => Vec::new(),
            FrontmatterValue::Text(s) => vec![s.clone()],
            FrontmatterValue::List(items) => items.clone(),
        }
    }
}

/// Front-matter keys in declaration order
pub type Frontmatter = IndexMap<String, FrontmatterValue>;

/// A document split into its header block and body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    pub frontmatter: Frontmatter,
    pub body: String,
}

/// Split `text` into front-matter and body
///
/// Text without a leading `---` block comes back unchanged as the body.
pub fn parse(text: &str) -> ParsedDocument {
    let Some(caps) = FRONTMATTER.captures(text) else {
        return ParsedDocument {
            frontmatter: Frontmatter::new(),
            body: text.to_string(),
        };
    };

    let header = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());

    let mut frontmatter = Frontmatter::new();
    for line in header.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        frontmatter.insert(key.to_string(), parse_value(value.trim()));
    }

    ParsedDocument {
        frontmatter,
        body: body.to_string(),
    }
}

fn parse_value(value: &str) -> FrontmatterValue {
    if value.len() >= 2 && value.starts_with('[') && value.ends_with(']') {
        let inner = value[1..value.len() - 1].trim();
        if inner.is_empty() {
            return FrontmatterValue::List(Vec::new());
        }
        let items = inner
            .split(',')
            .map(|item| item.trim().replace(['"', '\''], ""))
            .collect();
        return FrontmatterValue::List(items);
    }

    let value = value.strip_prefix(['"', '\'']).unwrap_or(value);
    let value = value.strip_suffix(['"', '\'']).unwrap_or(value);
    FrontmatterValue::Text(value.to_string())
}
