//! CLI entry point for unified-blog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use unified_blog::commands::related::RelatedMode;
use unified_blog::Blog;

#[derive(Parser)]
#[command(name = "unified-blog")]
#[command(author = "Yukang Chen")]
#[command(version = "0.1.0")]
#[command(about = "Blog content core merging CMS and Markdown posts", long_about = None)]
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
    /// List site information
    List {
        /// Type of content to list (post, tag, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Create a new Markdown post
    New {
        /// Title of the new post
        title: String,

        /// Category for the post
        #[arg(long)]
        category: Option<String>,

        /// Tags, repeatable
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Create the post as a draft
        #[arg(long)]
        draft: bool,
    },

    /// Search published posts
    Search {
        /// Search terms
        query: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show posts related to a post
    Related {
        /// Slug of the post
        slug: String,

        /// Ranking strategy
        #[arg(short, long, value_enum, default_value = "default")]
        mode: RelatedMode,
    },

    /// Compare remote and local posts by slug
    Sync {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the JSON API server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "unified_blog=debug,info"
    } else {
        "unified_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List { r#type } => {
            let blog = Blog::new(&base_dir)?;
            unified_blog::commands::list::run(&blog, &r#type).await?;
        }

        Commands::New {
            title,
            category,
            tags,
            draft,
        } => {
            let blog = Blog::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            unified_blog::commands::new::run(&blog, &title, category.as_deref(), &tags, draft)?;
        }

        Commands::Search { query, limit } => {
            let blog = Blog::new(&base_dir)?;
            unified_blog::commands::search::run(&blog, &query, limit).await?;
        }

        Commands::Related { slug, mode } => {
            let blog = Blog::new(&base_dir)?;
            unified_blog::commands::related::run(&blog, &slug, mode).await?;
        }

        Commands::Sync { json } => {
            let blog = Blog::new(&base_dir)?;
            unified_blog::commands::sync::run(&blog, json).await?;
        }

        Commands::Server { port, ip } => {
            let blog = Blog::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            unified_blog::server::start(&blog, &ip, port).await?;
        }

        Commands::Version => {
            println!("unified-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
