//! Generate static files

use anyhow::Result;
use std::fs;

use crate::templates::{TemplateRenderer, LOGO_SVG};
use crate::Blog;

/// Render the first listing page into `public/index.html`.
///
/// Post pages are not generated; the server renders them on demand. The
/// static page has no "load more" control since only the server can follow
/// listing cursors.
pub async fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let listing = blog.listing().await?;
    tracing::info!(
        "Fetched {} posts (more pages: {})",
        listing.posts().len(),
        listing.has_more()
    );

    let renderer = TemplateRenderer::new(&blog.config)?;
    let html = renderer.render_static_index(&listing)?;

    fs::create_dir_all(&blog.public_dir)?;
    fs::write(blog.public_dir.join("index.html"), html)?;

    let images = blog.public_dir.join("images");
    fs::create_dir_all(&images)?;
    fs::write(images.join("logo.svg"), LOGO_SVG)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
