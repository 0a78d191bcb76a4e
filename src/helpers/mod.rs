//! Helper functions shared by the renderers
//!
//! Date parsing/formatting, URL building and text escaping live here so
//! every view formats the same value the same way.

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
