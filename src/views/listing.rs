//! Post listing with "load more" pagination

use std::collections::HashSet;
use url::Url;

use crate::config::MergeStrategy;
use crate::content::{ContentClient, PostPage, PostSummary};
use crate::error::ContentError;

/// State of one rendered listing: every post shown so far and the cursor
/// to the next page. Nothing here is shared between listings.
#[derive(Debug, Clone)]
pub struct ListingView {
    posts: Vec<PostSummary>,
    next_page: Option<Url>,
    merge: MergeStrategy,
}

impl ListingView {
    /// Start a listing from an already fetched first page
    pub fn new(first: PostPage, merge: MergeStrategy) -> Self {
        let mut view = Self {
            posts: Vec::new(),
            next_page: None,
            merge,
        };
        view.apply_page(first);
        view
    }

    /// An empty listing positioned at `cursor`, for serving a single
    /// "load more" request when the rest of the listing lives in the browser
    pub fn resume(cursor: Url, merge: MergeStrategy) -> Self {
        Self {
            posts: Vec::new(),
            next_page: Some(cursor),
            merge,
        }
    }

    /// Fetch the first page and start a listing from it
    pub async fn load(
        client: &ContentClient,
        page_size: usize,
        merge: MergeStrategy,
    ) -> Result<Self, ContentError> {
        let first = client.query_posts(page_size).await?;
        Ok(Self::new(first, merge))
    }

    pub fn posts(&self) -> &[PostSummary] {
        &self.posts
    }

    pub fn next_page(&self) -> Option<&Url> {
        self.next_page.as_ref()
    }

    pub fn merge_strategy(&self) -> MergeStrategy {
        self.merge
    }

    /// Whether the "load more" control should be shown
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    /// Fetch the page behind the stored cursor and append it.
    ///
    /// Returns how many posts were appended. Once the cursor is exhausted
    /// this does nothing and returns 0. On failure the listing is left
    /// untouched so the same cursor can be retried.
    pub async fn load_more(&mut self, client: &ContentClient) -> Result<usize, ContentError> {
        let Some(cursor) = self.next_page.as_ref() else {
            return Ok(0);
        };
        let page = client.fetch_page(cursor).await?;
        Ok(self.apply_page(page))
    }

    /// Append a fetched page and take over its cursor
    pub fn apply_page(&mut self, page: PostPage) -> usize {
        let before = self.posts.len();
        match self.merge {
            MergeStrategy::Append => self.posts.extend(page.posts),
            MergeStrategy::BySlug => {
                let mut seen: HashSet<String> =
                    self.posts.iter().map(|p| p.slug.clone()).collect();
                for post in page.posts {
                    if seen.insert(post.slug.clone()) {
                        self.posts.push(post);
                    } else {
                        tracing::debug!("Skipping duplicate post {:?}", post.slug);
                    }
                }
            }
        }
        self.next_page = page.next_page;
        self.posts.len() - before
    }
}
