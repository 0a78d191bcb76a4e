//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::{commands, server};
use folio::content::CollectionKind;
use folio::Folio;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Blog, project and publication pages for a static portfolio site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of a collection
    #[command(alias = "ls")]
    List {
        /// blog, projects or publications
        #[arg(default_value = "blog")]
        kind: CollectionKind,

        /// Page number (out-of-range pages are clamped)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Category or tag to filter by ("*" for all)
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Render a single entry page to stdout
    Show {
        /// Slug of the entry
        slug: String,

        /// Collection the entry belongs to
        #[arg(short = 'k', long, default_value = "blog")]
        collection: CollectionKind,
    },

    /// Export the blog RSS feed
    Feed {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render every page into the public directory
    #[command(alias = "g")]
    Build,

    /// Start a local server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Remove the public directory
    Clean,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    let folio = Folio::new(&base_dir)?;

    match cli.command {
        Commands::List { kind, page, filter } => {
            commands::list::run(&folio, kind, page, filter.as_deref())?;
        }

        Commands::Show { slug, collection } => {
            commands::show::run(&folio, &slug, collection)?;
        }

        Commands::Feed { output } => {
            commands::feed::run(&folio, output.as_deref())?;
        }

        Commands::Build => {
            tracing::info!("Building site into {:?}", folio.public_dir);
            folio.build()?;
            println!("Built successfully!");
        }

        Commands::Serve { port, ip } => {
            tracing::info!("Starting server at http://{}:{}", ip, port);
            server::start(&folio, &ip, port).await?;
        }

        Commands::Clean => {
            tracing::info!("Cleaning public folder...");
            folio.clean()?;
            println!("Cleaned successfully!");
        }
    }

    Ok(())
}
