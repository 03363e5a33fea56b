//! CLI entry point for insights

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use insights::commands;
use insights::Site;

#[derive(Parser)]
#[command(name = "insights")]
#[command(version)]
#[command(about = "Static site generator for a blog with videos and job listings", long_about = None)]
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
    /// Create a new blog post
    New {
        /// Title of the new post
        title: String,

        /// Author key (defaults to the site's default author)
        #[arg(short, long)]
        author: Option<String>,

        /// Comma separated tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Fail when a video or job feed cannot be fetched
        #[arg(long)]
        strict: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Clean the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (posts, authors, tags)
        #[arg(default_value = "posts")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "insights=debug,info"
    } else {
        "insights=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };

    match cli.command {
        Commands::New {
            title,
            author,
            tags,
        } => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            commands::new::run(&site, &title, author.as_deref(), tags)?;
        }

        Commands::Generate { strict } => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Generating static files...");
            commands::generate::run(&site, strict).await?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip, r#static } => {
            let site = Site::new(&base_dir)?;

            tracing::info!("Generating static files...");
            site.generate().await?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            insights::server::start(&site, &ip, port, !r#static).await?;
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = Site::new(&base_dir)?;
            commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("insights version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
