//! CLI entry point for prismic-blog

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "prismic-blog")]
#[command(version)]
#[command(about = "A small blog served from a Prismic content repository", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Access token for the content repository
    #[arg(long, global = true, env = "PRISMIC_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default _config.yml
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Render the first listing page into the public folder
    #[command(alias = "g")]
    Generate,

    /// Start the blog server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Clean the public folder
    Clean,

    /// List every published post
    List,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "prismic_blog=debug,info"
    } else {
        "prismic_blog=info"
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
        None => std::env::current_dir().context("cannot read current directory")?,
    };

    let load = |base_dir: &PathBuf| -> Result<prismic_blog::Blog> {
        let mut blog = prismic_blog::Blog::new(base_dir)?;
        if cli.access_token.is_some() {
            blog.config.access_token = cli.access_token.clone();
        }
        Ok(blog)
    };

    match cli.command {
        Commands::Init { ref folder } => {
            let target_dir = if folder.is_absolute() {
                folder.clone()
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing blog in {:?}", target_dir);
            prismic_blog::commands::init::init_site(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::Generate => {
            let blog = load(&base_dir)?;
            tracing::info!("Generating index page...");
            blog.generate().await?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ref ip, open } => {
            let blog = load(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            prismic_blog::server::start(&blog, ip, port, open).await?;
        }

        Commands::Clean => {
            let blog = load(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List => {
            let blog = load(&base_dir)?;
            prismic_blog::commands::list::run(&blog).await?;
        }

        Commands::Version => {
            println!("prismic-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
