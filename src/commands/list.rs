//! List published posts

use anyhow::Result;

use crate::views::ListingView;
use crate::Blog;

/// Follow listing cursors until they run out.
///
/// Stops early if the content API hands back the cursor that was just
/// followed, which would otherwise repeat forever.
pub async fn load_all(blog: &Blog) -> Result<ListingView> {
    let client = blog.client()?;
    let mut listing = blog.listing().await?;

    while let Some(cursor) = listing.next_page().cloned() {
        let added = listing.load_more(&client).await?;
        tracing::debug!("Loaded {} more posts", added);
        if listing.next_page() == Some(&cursor) {
            tracing::warn!("Content API repeated cursor {}, stopping", cursor.path());
            break;
        }
    }

    Ok(listing)
}

/// Walk every listing page and print one line per post
pub async fn run(blog: &Blog) -> Result<()> {
    let listing = load_all(blog).await?;

    println!("Posts ({}):", listing.posts().len());
    for post in listing.posts() {
        println!("  {} - {} [{}]", post.published_at, post.title, post.slug);
    }

    Ok(())
}
