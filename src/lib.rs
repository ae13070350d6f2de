//! prismic-blog: a small blog rendered from a headless content API
//!
//! Posts are fetched from a Prismic-style repository and rendered with
//! embedded Tera templates, either into a static index page or on demand
//! by the built-in HTTP server.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod server;
pub mod templates;
pub mod views;

use anyhow::Result;
use std::path::Path;

/// The main application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
    /// Directory of extra static files served as-is
    pub static_dir: std::path::PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog from an already built configuration
    pub fn with_config(base_dir: std::path::PathBuf, config: config::SiteConfig) -> Self {
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);
        Self {
            config,
            base_dir,
            public_dir,
            static_dir,
        }
    }

    /// Client for the configured content repository
    pub fn client(&self) -> Result<content::ContentClient> {
        Ok(content::ContentClient::new(&self.config)?)
    }

    /// Fetch the first page of the listing
    pub async fn listing(&self) -> Result<views::ListingView> {
        let client = self.client()?;
        Ok(views::ListingView::load(
            &client,
            self.config.effective_page_size(),
            self.config.merge_strategy,
        )
        .await?)
    }

    /// Generate the static index page
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
