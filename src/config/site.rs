//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub language: String,
    pub timezone: String,
    pub logo: String,

    // Content API
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    pub document_type: String,

    // Listing
    pub page_size: usize,
    pub merge_strategy: MergeStrategy,

    // Directory
    pub public_dir: String,
    pub static_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            language: "pt-BR".to_string(),
            timezone: "America/Sao_Paulo".to_string(),
            logo: "/images/logo.svg".to_string(),

            endpoint: "https://your-repository.cdn.prismic.io/api/v2".to_string(),
            access_token: None,
            document_type: "posts".to_string(),

            page_size: 1,
            merge_strategy: MergeStrategy::Append,

            public_dir: "public".to_string(),
            static_dir: "static".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config file {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Timezone used to display dates; falls back to UTC when unknown
    pub fn tz(&self) -> Tz {
        match self.timezone.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                tracing::warn!("Unknown timezone {:?}, using UTC", self.timezone);
                Tz::UTC
            }
        }
    }

    /// Page size actually sent to the content API (never zero)
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }
}

/// How pages fetched by "load more" join the already listed posts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Append every record as received, duplicates included
    #[default]
    Append,
    /// Skip records whose slug is already listed
    BySlug,
}
