//! HTTP client for the Prismic-style content API

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::document::{ApiInfo, SearchResponse};
use super::post::{PostDetail, PostPage};
use crate::config::SiteConfig;
use crate::error::ContentError;
use crate::helpers::DateFormatter;

/// Talks to one content repository
#[derive(Debug, Clone)]
pub struct ContentClient {
    http: Client,
    endpoint: Url,
    access_token: Option<String>,
    document_type: String,
    dates: DateFormatter,
}

impl ContentClient {
    pub fn new(config: &SiteConfig) -> Result<Self, ContentError> {
        let endpoint = Url::parse(config.endpoint.trim_end_matches('/'))?;
        let http = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self {
            http,
            endpoint,
            access_token: config.access_token.clone().filter(|t| !t.is_empty()),
            document_type: config.document_type.clone(),
            dates: DateFormatter::new(config.tz()),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("prismic-blog/", env!("CARGO_PKG_VERSION"))
    }

    pub fn dates(&self) -> &DateFormatter {
        &self.dates
    }

    /// Ref of the currently published content
    pub async fn master_ref(&self) -> Result<String, ContentError> {
        let mut url = self.endpoint.clone();
        self.authorize(&mut url);
        let info: ApiInfo = self.get_json(url).await?;
        info.master_ref()
            .map(str::to_string)
            .ok_or(ContentError::MissingMasterRef)
    }

    /// First page of posts, newest first as ordered by the repository
    pub async fn query_posts(&self, page_size: usize) -> Result<PostPage, ContentError> {
        let master = self.master_ref().await?;
        let doc_type = &self.document_type;
        let fetch = ["title", "content", "author", "subtitle"]
            .iter()
            .map(|field| format!("{doc_type}.{field}"))
            .collect::<Vec<_>>()
            .join(",");

        let url = self.search_url(
            &master,
            &format!(r#"[[at(document.type,"{doc_type}")]]"#),
            &[("fetch", fetch), ("pageSize", page_size.to_string())],
        )?;

        tracing::debug!("Querying first page of {} (page size {})", doc_type, page_size);
        let response: SearchResponse = self.get_json(url).await?;
        Ok(PostPage::from_response(&response, &self.dates))
    }

    /// Parse a raw cursor and make sure it points back at this repository
    pub fn cursor(&self, raw: &str) -> Result<Url, ContentError> {
        let url = Url::parse(raw)?;
        if url.origin() != self.endpoint.origin() {
            return Err(ContentError::ForeignCursor(raw.to_string()));
        }
        Ok(url)
    }

    /// Follow a `next_page` cursor
    pub async fn fetch_page(&self, cursor: &Url) -> Result<PostPage, ContentError> {
        let mut url = self.cursor(cursor.as_str())?;
        self.authorize(&mut url);
        tracing::debug!("Following cursor {}", url.path());
        let response: SearchResponse = self.get_json(url).await?;
        Ok(PostPage::from_response(&response, &self.dates))
    }

    /// Fetch a single post by its uid; `None` when no document matches
    pub async fn get_by_uid(&self, uid: &str) -> Result<Option<PostDetail>, ContentError> {
        if !is_valid_uid(uid) {
            tracing::debug!("Slug {:?} cannot be a uid", uid);
            return Ok(None);
        }
        let master = self.master_ref().await?;
        let url = self.search_url(
            &master,
            &format!(r#"[[at(my.{}.uid,"{}")]]"#, self.document_type, uid),
            &[("pageSize", "1".to_string())],
        )?;

        let response: SearchResponse = self.get_json(url).await?;
        Ok(response
            .results
            .first()
            .map(|doc| PostDetail::from_document(doc, &self.dates)))
    }

    fn search_url(
        &self,
        master: &str,
        predicate: &str,
        extra: &[(&str, String)],
    ) -> Result<Url, ContentError> {
        let base = self.endpoint.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/documents/search"))?;
        {
            let mut qp = url.query_pairs_mut();
            qp.append_pair("ref", master);
            qp.append_pair("q", predicate);
            for (k, v) in extra {
                qp.append_pair(k, v);
            }
        }
        self.authorize(&mut url);
        Ok(url)
    }

    fn authorize(&self, url: &mut Url) {
        if let Some(token) = &self.access_token {
            let already = url.query_pairs().any(|(k, _)| k == "access_token");
            if !already {
                url.query_pairs_mut().append_pair("access_token", token);
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ContentError> {
        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!("Content API returned {} for {}", status, url.path());
            return Err(ContentError::Status {
                status,
                url: url.path().to_string(),
            });
        }
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Copy of `cursor` without the `access_token` parameter, safe to hand to
/// browsers
pub fn public_cursor(cursor: &Url) -> Url {
    if !cursor.query_pairs().any(|(k, _)| k == "access_token") {
        return cursor.clone();
    }
    let kept: Vec<(String, String)> = cursor
        .query_pairs()
        .filter(|(k, _)| k != "access_token")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut url = cursor.clone();
    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
    url
}

/// Slugs that can be embedded in a search predicate
fn is_valid_uid(uid: &str) -> bool {
    !uid.is_empty()
        && !uid
            .chars()
            .any(|c| c == '"' || c == '\\' || c.is_control())
}
