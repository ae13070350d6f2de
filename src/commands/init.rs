//! Initialize a new blog directory

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

/// Write a default `_config.yml` and an empty static directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        bail!("{:?} already exists", config_path);
    }

    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("static"))?;

    let config_content = r#"# Blog configuration

# Site
title: Blog
language: pt-BR
timezone: America/Sao_Paulo
logo: /images/logo.svg

# Content API
## The access token can also be given with PRISMIC_ACCESS_TOKEN
endpoint: https://your-repository.cdn.prismic.io/api/v2
document_type: posts

# Listing
page_size: 1
## append | by_slug
merge_strategy: append

# Directory
public_dir: public
static_dir: static
"#;

    fs::write(&config_path, config_content)?;
    tracing::debug!("Wrote {:?}", config_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MergeStrategy, SiteConfig};
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let config = SiteConfig::load(dir.path().join("_config.yml")).unwrap();
        assert_eq!(config.page_size, 1);
        assert_eq!(config.merge_strategy, MergeStrategy::Append);
        assert!(dir.path().join("static").is_dir());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
