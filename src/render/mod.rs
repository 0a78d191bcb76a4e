//! Renderers: list pages, post pages, feeds and page chrome
//!
//! Markup is built with maud, so every interpolated value is escaped unless
//! it is wrapped in `PreEscaped` (rendered Markdown and site partials only).

pub mod detail;
pub mod feed;
pub mod layout;
pub mod list;

use maud::{html, Markup};

pub use detail::{render_not_found, Body, DetailRenderer, DetailView, NavLink};
pub use feed::{FeedExporter, RSS_MIME_TYPE};
pub use layout::{Layout, PageMeta};
pub use list::{
    Filter, LinkStyle, ListPage, ListRenderer, ListSession, LoadState, PageChange, PageItem,
    PageState,
};

/// Blocking error panel shown in place of a component
pub fn error_panel(heading: &str, message: &str) -> Markup {
    html! {
        div."col-12" {
            div.alert.alert-warning.text-center {
                h4 { (heading) }
                p { (message) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_panel_escapes() {
        let html = error_panel("Unable to load <posts>", "Try again").into_string();
        assert!(html.contains("Unable to load &lt;posts&gt;"));
        assert!(html.contains("alert-warning"));
    }
}
