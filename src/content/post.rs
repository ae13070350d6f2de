//! Post records handed to the views

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

use super::document::{Document, SearchResponse};
use crate::helpers::{parse_timestamp, DateFormatter};

/// A post as shown on the listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    /// Last publication date, already formatted for display
    pub published_at: String,
}

impl PostSummary {
    pub fn from_document(doc: &Document, dates: &DateFormatter) -> Self {
        Self {
            slug: doc.slug(),
            title: doc.data.title.first_text(),
            subtitle: doc.data.subtitle.first_text(),
            author: doc.data.author.first_text(),
            published_at: dates.long_from_api(doc.last_publication_date.as_deref()),
        }
    }
}

/// One page of listing results together with the cursor to the next one
#[derive(Debug, Clone, Default)]
pub struct PostPage {
    pub posts: Vec<PostSummary>,
    pub next_page: Option<Url>,
}

impl PostPage {
    pub fn from_response(response: &SearchResponse, dates: &DateFormatter) -> Self {
        let posts = response
            .results
            .iter()
            .map(|doc| PostSummary::from_document(doc, dates))
            .collect();

        let next_page = response
            .next_page
            .as_deref()
            .and_then(|raw| match Url::parse(raw) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::warn!("Ignoring unparseable next_page {:?}: {}", raw, e);
                    None
                }
            });

        Self { posts, next_page }
    }
}

/// A post as shown on its own page
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub banner: Option<String>,
    pub content: Vec<ContentBlock>,
    /// Last publication date, already formatted for display
    pub updated_at: String,
    #[serde(skip)]
    pub publication_date: Option<DateTime<Utc>>,
}

/// A heading and the text rendered under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentBlock {
    pub heading: String,
    /// First body segment only; later segments are dropped
    pub body: String,
}

impl PostDetail {
    pub fn from_document(doc: &Document, dates: &DateFormatter) -> Self {
        let publication_date = doc
            .last_publication_date
            .as_deref()
            .and_then(parse_timestamp);

        let content = doc
            .data
            .content
            .iter()
            .map(|group| {
                if group.body.len() > 1 {
                    tracing::debug!(
                        "Dropping {} extra body segments under {:?}",
                        group.body.len() - 1,
                        group.heading.first_text()
                    );
                }
                ContentBlock {
                    heading: group.heading.first_text(),
                    body: group.body.first_text(),
                }
            })
            .collect();

        Self {
            slug: doc.slug(),
            title: doc.data.title.first_text(),
            subtitle: doc.data.subtitle.first_text(),
            author: doc.data.author.first_text(),
            banner: doc.data.banner.url.clone().filter(|url| !url.is_empty()),
            content,
            updated_at: publication_date
                .map(|date| dates.short_date(&date))
                .unwrap_or_default(),
            publication_date,
        }
    }
}
