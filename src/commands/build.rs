//! Render the whole site into the public directory

use anyhow::{bail, Context, Result};
use std::cell::Cell;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::content::{Collection, CollectionKind, ContentLoader, Entry};
use crate::render::list::list_section;
use crate::render::{
    DetailRenderer, FeedExporter, Layout, LinkStyle, ListSession, LoadState, PageMeta,
};
use crate::Folio;

/// Writes list pages, post pages and the feed
struct Builder<'a> {
    folio: &'a Folio,
    loader: ContentLoader,
    layout: Layout,
    written: Cell<usize>,
}

pub fn run(folio: &Folio) -> Result<()> {
    fs::create_dir_all(&folio.public_dir)?;

    copy_static_files(folio)?;

    let builder = Builder {
        folio,
        loader: folio.loader(),
        layout: Layout::load(folio),
        written: Cell::new(0),
    };

    for kind in CollectionKind::ALL {
        let collection = builder.build_list(kind)?;
        if let (CollectionKind::Blog, Some(collection)) = (kind, collection) {
            builder.build_feed(&collection)?;
            builder.build_posts(&collection);
        }
    }

    tracing::info!("Generated {} files in {:?}", builder.written.get(), folio.public_dir);
    Ok(())
}

impl Builder<'_> {
    /// Every page of one list; a failed manifest still gets an index with the error panel
    fn build_list(&self, kind: CollectionKind) -> Result<Option<Collection>> {
        let config = &self.folio.config;
        let mut session = ListSession::new(config, kind).with_link_style(LinkStyle::Static);
        session.load(&self.loader);

        let meta = PageMeta {
            title: format!("{} - {}", kind.heading(), config.title),
            description: Some(config.description.clone()).filter(|d| !d.is_empty()),
            keywords: Vec::new(),
        };
        let dir = self.folio.public_dir.join(kind.route());
        let total_pages = session.renderer().state().total_pages.max(1);

        for page in 1..=total_pages {
            let content = list_section(kind, session.render_at(page));
            let path = if page == 1 {
                dir.join("index.html")
            } else {
                dir.join("page").join(page.to_string()).join("index.html")
            };
            let page = self.layout.document(&meta, content);
            self.write(&path, &page.into_string())?;
        }

        match session.load_state() {
            LoadState::Ready(collection) => Ok(Some(collection.clone())),
            _ => Ok(None),
        }
    }

    /// One page per entry; an entry that fails is logged and skipped
    fn build_posts(&self, collection: &Collection) {
        let renderer = DetailRenderer::new(&self.folio.config, &self.loader);
        let dir = self.blog_dir();

        for entry in collection {
            if let Err(e) = self.build_post(&renderer, collection, entry, &dir) {
                tracing::warn!("Skipping post '{}': {:#}", entry.title, e);
            }
        }
    }

    fn build_post(
        &self,
        renderer: &DetailRenderer<'_>,
        collection: &Collection,
        entry: &Entry,
        dir: &Path,
    ) -> Result<()> {
        let view = renderer.render_detail(collection, &entry.slug())?;
        if !is_file_stem(&view.slug) {
            bail!("slug '{}' is not a valid file name", view.slug);
        }
        let page = self
            .layout
            .document(&renderer.meta(&view), renderer.render_article(&view));
        self.write(&dir.join(format!("{}.html", view.slug)), &page.into_string())
    }

    fn build_feed(&self, collection: &Collection) -> Result<()> {
        let feed = FeedExporter::new(&self.folio.config).export(collection);
        let path = self.blog_dir().join("rss.xml");
        self.write(&path, &feed)
    }

    fn blog_dir(&self) -> PathBuf {
        self.folio
            .public_dir
            .join(self.folio.config.blog_path.trim_matches('/'))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::debug!("Generated: {:?}", path);
        self.written.set(self.written.get() + 1);
        Ok(())
    }
}

/// A single plain path component, so the page lands directly in the blog directory
fn is_file_stem(slug: &str) -> bool {
    let mut components = Path::new(slug).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !slug.contains(['/', '\\'])
}

/// Copy the static site (assets, data, partials) into the public directory
///
/// The public directory itself and dot-files are skipped.
fn copy_static_files(folio: &Folio) -> Result<()> {
    let site_dir = &folio.site_dir;
    let public_dir = &folio.public_dir;

    for entry in WalkDir::new(site_dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            e.path() != public_dir.as_path()
                && (e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        })
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || path.file_name().is_some_and(|n| n == "_config.yml") {
            continue;
        }

        let relative = path.strip_prefix(site_dir)?;
        let dest = public_dir.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn site() -> (tempfile::TempDir, Folio) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("data")).unwrap();
        fs::create_dir_all(root.join("posts")).unwrap();
        fs::create_dir_all(root.join("css")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();

        let posts: Vec<String> = (1..=11)
            .map(|i| format!(r#"{{"title":"Post {}","date":"2024-01-{:02}"}}"#, i, i))
            .collect();
        fs::write(root.join("data/blog.json"), format!("[{}]", posts.join(","))).unwrap();
        fs::write(
            root.join("data/research.json"),
            r#"[{"title":"Paper","date":"2023-05-01","category":"nlp"}]"#,
        )
        .unwrap();
        fs::write(root.join("posts/post-11.md"), "# Latest").unwrap();
        fs::write(root.join("css/site.css"), "body {}").unwrap();
        fs::write(root.join(".git/HEAD"), "ref").unwrap();

        let folio = Folio::with_config(root, SiteConfig::default());
        (dir, folio)
    }

    #[test]
    fn test_build_writes_site() {
        let (_dir, folio) = site();
        run(&folio).unwrap();
        let public = &folio.public_dir;

        let index = fs::read_to_string(public.join("blog/index.html")).unwrap();
        assert!(index.contains("Post 11"));
        assert!(index.contains(r#"href="/blog/page/2/""#));
        let second = fs::read_to_string(public.join("blog/page/2/index.html")).unwrap();
        assert!(second.contains("Post 2"));
        assert!(!public.join("blog/page/3").exists());

        let post = fs::read_to_string(public.join("blog/post-11.html")).unwrap();
        assert!(post.contains("<h1>Latest</h1>"));
        let preview = fs::read_to_string(public.join("blog/post-1.html")).unwrap();
        assert!(preview.contains("Content Preview"));

        assert!(public.join("blog/rss.xml").exists());
        assert!(public.join("publications/index.html").exists());
        assert!(public.join("css/site.css").exists());
        assert!(public.join("data/blog.json").exists());
        assert!(!public.join(".git").exists());
    }

    #[test]
    fn test_missing_manifest_renders_error_page() {
        let (_dir, folio) = site();
        run(&folio).unwrap();

        let projects = fs::read_to_string(folio.public_dir.join("projects/index.html")).unwrap();
        assert!(projects.contains("Unable to load projects"));
    }

    #[test]
    fn test_rebuild_does_not_copy_public_into_itself() {
        let (_dir, folio) = site();
        run(&folio).unwrap();
        run(&folio).unwrap();
        assert!(!folio.public_dir.join("public").exists());
    }

    #[test]
    fn test_bad_post_is_skipped() {
        let (dir, folio) = site();
        fs::write(
            dir.path().join("data/blog.json"),
            r#"[
                {"title":"Escape","slug":"../../escape","date":"2024-02-01"},
                {"title":"Good Post","slug":" good ","date":"2024-01-30"}
            ]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("data/projects.json"),
            r#"[{"title":"Tool","year":"2024","category":"web"}]"#,
        )
        .unwrap();
        run(&folio).unwrap();
        let public = &folio.public_dir;

        assert!(public.join("blog/good.html").exists());
        assert!(!dir.path().join("escape.html").exists());
        assert!(!public.join("escape.html").exists());

        let feed = fs::read_to_string(public.join("blog/rss.xml")).unwrap();
        assert!(feed.contains("<title>Good Post</title>"));
        assert!(feed.contains("<title>Escape</title>"));
        assert!(public.join("projects/index.html").exists());
        assert!(public.join("publications/index.html").exists());
    }

    #[test]
    fn test_file_stem() {
        assert!(is_file_stem("post-1"));
        assert!(is_file_stem("good"));
        assert!(!is_file_stem(""));
        assert!(!is_file_stem(".."));
        assert!(!is_file_stem("a/b"));
        assert!(!is_file_stem("../x"));
        assert!(!is_file_stem("a\\b"));
    }
}
