//! HTTP server rendering pages on request

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::content::{public_cursor, ContentClient};
use crate::error::ContentError;
use crate::templates::{TemplateRenderer, LOGO_SVG};
use crate::views::{DetailView, ListingView};
use crate::Blog;

/// Server state
pub struct ServerState {
    blog: Blog,
    client: ContentClient,
    renderer: TemplateRenderer,
}

impl ServerState {
    pub fn new(blog: &Blog) -> Result<Self> {
        Ok(Self {
            client: blog.client()?,
            renderer: TemplateRenderer::new(&blog.config)?,
            blog: blog.clone(),
        })
    }

    fn page(&self, status: StatusCode, rendered: Result<String>) -> Response {
        match rendered {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Template error: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
            }
        }
    }

    fn content_failure(&self, err: ContentError, retry: &str) -> Response {
        let status = if err.is_bad_request() {
            tracing::warn!("Rejected request: {}", err);
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!("Content API failure: {}", err);
            StatusCode::BAD_GATEWAY
        };
        self.page(status, self.renderer.render_error(retry))
    }
}

/// Build the application router
pub fn router(state: Arc<ServerState>) -> Router {
    let static_files = ServeDir::new(&state.blog.static_dir);

    Router::new()
        .route("/", get(index_handler))
        .route("/post/:slug", get(post_handler))
        .route("/more", get(more_handler))
        .route("/images/logo.svg", get(logo_handler))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(ServerState::new(blog)?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Listing page, fetched at request time
async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    let config = &state.blog.config;
    let listing = ListingView::load(
        &state.client,
        config.effective_page_size(),
        config.merge_strategy,
    )
    .await;

    match listing {
        Ok(listing) => state.page(StatusCode::OK, state.renderer.render_index(&listing)),
        Err(e) => state.content_failure(e, "/"),
    }
}

/// Post page, fetched on demand
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let retry = format!("/post/{}", utf8_percent_encode(&slug, NON_ALPHANUMERIC));

    match state.client.get_by_uid(&slug).await {
        Ok(Some(post)) => {
            let mut view = DetailView::new(post);
            view.mount(Utc::now());
            state.page(StatusCode::OK, state.renderer.render_post(&view))
        }
        Ok(None) => {
            tracing::info!("No post with slug {:?}", slug);
            state.page(StatusCode::NOT_FOUND, state.renderer.render_not_found(&slug))
        }
        Err(e) => state.content_failure(e, &retry),
    }
}

#[derive(Debug, Deserialize)]
struct MoreQuery {
    cursor: String,
}

/// Answer to a "load more" request
#[derive(Debug, Serialize, Deserialize)]
pub struct MoreResponse {
    pub html: String,
    pub next_page: Option<String>,
}

#[derive(Debug, Serialize)]
struct MoreError {
    error: String,
}

/// Follow a listing cursor on behalf of the browser
async fn more_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<MoreQuery>,
) -> Response {
    let failure = |status: StatusCode, err: &ContentError| {
        (status, Json(MoreError { error: err.to_string() })).into_response()
    };

    let cursor = match state.client.cursor(&query.cursor) {
        Ok(cursor) => cursor,
        Err(e) => {
            tracing::warn!("Rejected cursor: {}", e);
            return failure(StatusCode::BAD_REQUEST, &e);
        }
    };

    let mut listing = ListingView::resume(cursor, state.blog.config.merge_strategy);
    if let Err(e) = listing.load_more(&state.client).await {
        tracing::error!("Content API failure: {}", e);
        return failure(StatusCode::BAD_GATEWAY, &e);
    }

    match state.renderer.render_cards(listing.posts()) {
        Ok(html) => Json(MoreResponse {
            html,
            next_page: listing.next_page().map(|url| public_cursor(url).to_string()),
        })
        .into_response(),
        Err(e) => {
            tracing::error!("Template error: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

async fn logo_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], LOGO_SVG)
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
