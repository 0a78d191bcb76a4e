//! Title to URL slug conversion
//!
//! Every link to an entry (cards, navigation, feed items, detail lookups)
//! derives its slug here.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_\s-]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref HYPHENS: Regex = Regex::new(r"-+").unwrap();
}

/// Convert a title into a lowercase, hyphen-separated slug
///
/// # Examples
/// ```
/// assert_eq!(folio::content::slugify("Hello, World!"), "hello-world");
/// assert_eq!(folio::content::slugify("  Rust -- in  2024 "), "rust-in-2024");
/// ```
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let cleaned = NON_SLUG_CHARS.replace_all(&lower, "");
    let hyphenated = WHITESPACE.replace_all(&cleaned, "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_titles() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(
            slugify("Building RAG Systems: A Practical Guide"),
            "building-rag-systems-a-practical-guide"
        );
        assert_eq!(slugify("C++ & Rust"), "c-rust");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn test_edges() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("--Leading and trailing--"), "leading-and-trailing");
        assert_eq!(slugify("tabs\tand\nnewlines"), "tabs-and-newlines");
        assert_eq!(slugify("Café Déjà vu"), "caf-dj-vu");
    }

    #[test]
    fn test_idempotent() {
        let titles = [
            "Hello World",
            "  Multiple   spaces -- and --- hyphens ",
            "Ünïcödé & Symbols!",
            "2024: Year in Review (Part 1)",
            "-x-",
        ];
        for title in titles {
            let once = slugify(title);
            assert_eq!(slugify(&once), once, "not idempotent for {:?}", title);
        }
    }

    #[test]
    fn test_deterministic() {
        let title = "Deep Learning for Brain Tumor Detection";
        let first = slugify(title);
        for _ in 0..10 {
            assert_eq!(slugify(title), first);
        }
    }
}
