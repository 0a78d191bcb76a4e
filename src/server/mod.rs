//! Development server
//!
//! Every request builds its own page scope on the blocking pool and reads the
//! manifests afresh, so edits to the site directory show up on reload.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use maud::Markup;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::CollectionKind;
use crate::error::{FetchError, NotFoundError};
use crate::render::list::{filter_param, list_section};
use crate::render::{
    error_panel, render_not_found, DetailRenderer, FeedExporter, Filter, Layout, ListSession,
    LoadState, PageMeta, RSS_MIME_TYPE,
};
use crate::Folio;

/// Server state
struct ServerState {
    folio: Folio,
}

/// Query string of list pages
#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    page: Option<String>,
    tag: Option<String>,
    category: Option<String>,
}

impl ListQuery {
    /// Non-numeric pages fall back to the first
    fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }

    fn filter(&self, kind: CollectionKind) -> Filter {
        let value = match filter_param(kind) {
            "tag" => self.tag.as_deref(),
            _ => self.category.as_deref(),
        };
        Filter::parse(value)
    }
}

/// Why a page could not be rendered
#[derive(Debug)]
enum PageError {
    NotFound(NotFoundError),
    Fetch(FetchError),
}

impl From<NotFoundError> for PageError {
    fn from(e: NotFoundError) -> Self {
        PageError::NotFound(e)
    }
}

impl From<FetchError> for PageError {
    fn from(e: FetchError) -> Self {
        PageError::Fetch(e)
    }
}

impl PageError {
    fn status(&self) -> StatusCode {
        match self {
            PageError::NotFound(_) => StatusCode::NOT_FOUND,
            PageError::Fetch(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn panel(&self, folio: &Folio) -> Markup {
        match self {
            PageError::NotFound(e) => render_not_found(&folio.config, &e.slug),
            PageError::Fetch(_) => error_panel(
                "Unable to load blog posts",
                "Please try refreshing the page. If the problem persists, check back later.",
            ),
        }
    }
}

/// Start the server
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    let app = router(folio.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(folio: Folio) -> Router {
    let blog_path = folio.config.blog_path.trim_end_matches('/').to_string();
    let static_files = ServeDir::new(&folio.site_dir).append_index_html_on_directories(true);
    let state = Arc::new(ServerState { folio });

    let mut app = Router::new();
    for kind in CollectionKind::ALL {
        let handler = move |state: State<Arc<ServerState>>, query: Query<ListQuery>| {
            list_handler(kind, state, query)
        };
        app = app
            .route(&format!("/{}", kind.route()), get(handler.clone()))
            .route(&format!("/{}/", kind.route()), get(handler));
    }

    app = app.route("/rss.xml", get(feed_handler));
    if !blog_path.is_empty() {
        app = app.route(&format!("{}/rss.xml", blog_path), get(feed_handler));
    }

    app.route(&format!("{}/:file", blog_path), get(post_handler))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run page rendering on the blocking pool
async fn blocking<F>(render: F) -> Response
where
    F: FnOnce() -> Response + Send + 'static,
{
    match tokio::task::spawn_blocking(render).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Render task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

async fn list_handler(
    kind: CollectionKind,
    State(state): State<Arc<ServerState>>,
    Query(query): Query<ListQuery>,
) -> Response {
    blocking(move || {
        let folio = &state.folio;
        let (status, content) = render_list(folio, kind, &query);
        let meta = PageMeta {
            title: format!("{} - {}", kind.heading(), folio.config.title),
            ..Default::default()
        };
        let page = Layout::load(folio).document(&meta, content);
        (status, Html(page.into_string())).into_response()
    })
    .await
}

fn render_list(folio: &Folio, kind: CollectionKind, query: &ListQuery) -> (StatusCode, Markup) {
    let loader = folio.loader();
    let mut session = ListSession::new(&folio.config, kind);
    let status = match session.load(&loader) {
        LoadState::Failed(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };
    session.set_filter(query.filter(kind));
    (status, list_section(kind, session.render_at(query.page())))
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(file): Path<String>,
    request: Request<Body>,
) -> Response {
    let Some(slug) = file.strip_suffix(".html").map(String::from) else {
        // Images and other assets next to the posts
        let mut service = ServeDir::new(&state.folio.site_dir);
        return match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        };
    };

    blocking(move || {
        let folio = &state.folio;
        let layout = Layout::load(folio);
        match render_post(folio, &slug) {
            Ok((meta, content)) => Html(layout.document(&meta, content).into_string()).into_response(),
            Err(e) => {
                tracing::warn!("Post '{}' not rendered: {:?}", slug, e);
                let page = layout.document(&PageMeta::titled(folio.config.title.clone()), e.panel(folio));
                (e.status(), Html(page.into_string())).into_response()
            }
        }
    })
    .await
}

fn render_post(folio: &Folio, slug: &str) -> Result<(PageMeta, Markup), PageError> {
    let loader = folio.loader();
    let collection = loader.load(CollectionKind::Blog)?;
    let renderer = DetailRenderer::new(&folio.config, &loader);
    let view = renderer.render_detail(&collection, slug)?;
    Ok((renderer.meta(&view), renderer.render_article(&view)))
}

async fn feed_handler(State(state): State<Arc<ServerState>>) -> Response {
    blocking(move || {
        let folio = &state.folio;
        match folio.loader().load(CollectionKind::Blog) {
            Ok(collection) => {
                let feed = FeedExporter::new(&folio.config).export(&collection);
                ([(header::CONTENT_TYPE, RSS_MIME_TYPE)], feed).into_response()
            }
            Err(e) => {
                tracing::error!("Feed not generated: {}", e);
                (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
            }
        }
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;

    fn folio_with_blog() -> (tempfile::TempDir, Folio) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(
            dir.path().join("data/blog.json"),
            r#"[{"title":"Hello World","date":"2024-01-01","tags":["rust"]},
                {"title":"Second","date":"2024-02-01","tags":["web"]}]"#,
        )
        .unwrap();
        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        (dir, folio)
    }

    #[test]
    fn test_query_parsing() {
        let query = ListQuery {
            page: Some("abc".to_string()),
            tag: Some("rust".to_string()),
            category: Some("ml".to_string()),
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.filter(CollectionKind::Blog), Filter::parse(Some("rust")));
        assert_eq!(query.filter(CollectionKind::Projects), Filter::parse(Some("ml")));
        assert_eq!(ListQuery::default().filter(CollectionKind::Blog), Filter::All);
    }

    #[test]
    fn test_render_list_statuses() {
        let (_dir, folio) = folio_with_blog();
        let query = ListQuery {
            tag: Some("web".to_string()),
            ..Default::default()
        };
        let (status, html) = render_list(&folio, CollectionKind::Blog, &query);
        assert_eq!(status, StatusCode::OK);
        let html = html.into_string();
        assert!(html.contains("Second"));
        assert!(!html.contains("Hello World</a>"));

        let (status, html) = render_list(&folio, CollectionKind::Projects, &ListQuery::default());
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(html.into_string().contains("Unable to load projects"));
    }

    #[test]
    fn test_render_post_errors() {
        let (dir, folio) = folio_with_blog();
        assert!(render_post(&folio, "hello-world").is_ok());

        let err = render_post(&folio, "missing").unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.panel(&folio).into_string().contains("Post not found"));

        fs::remove_file(dir.path().join("data/blog.json")).unwrap();
        let err = render_post(&folio, "hello-world").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }
}
