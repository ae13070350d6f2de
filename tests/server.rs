mod common;

use common::*;
use httpmock::MockServer;
use prismic_blog::config::SiteConfig;
use prismic_blog::server::{router, MoreResponse, ServerState};
use prismic_blog::Blog;
use std::sync::Arc;
use tempfile::TempDir;

/// Serve the blog on an ephemeral port and return its base URL
async fn spawn_blog(config: SiteConfig, site: &TempDir) -> String {
    let blog = Blog::with_config(site.path().to_path_buf(), config);
    let state = Arc::new(ServerState::new(&blog).unwrap());
    let app = router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn fetch_more(base: &str, cursor: &str) -> MoreResponse {
    let resp = reqwest::Client::new()
        .get(format!("{base}/more"))
        .query(&[("cursor", cursor)])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn index_lists_first_page_with_load_more() {
    let api = MockServer::start_async().await;
    mock_refs(&api).await;
    mock_first_page(
        &api,
        search_body(vec![doc("hooks", "Como utilizar Hooks")], Some(page_url(&api, 2))),
    )
    .await;

    let site = TempDir::new().unwrap();
    let base = spawn_blog(config(&api), &site).await;

    let resp = reqwest::get(format!("{base}/")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Como utilizar Hooks"));
    assert!(html.contains("25 de março de 2021"));
    assert!(html.contains("Carregar mais posts"));
}

#[tokio::test]
async fn index_reports_content_failure() {
    let api = MockServer::start_async().await;
    api.mock_async(|when, then| {
        when.method("GET").path("/api/v2");
        then.status(503);
    })
    .await;

    let site = TempDir::new().unwrap();
    let base = spawn_blog(config(&api), &site).await;

    let resp = reqwest::get(format!("{base}/")).await.unwrap();
    assert_eq!(resp.status(), 502);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Tentar novamente"));
}

#[tokio::test]
async fn post_page_renders_blocks_and_time_since() {
    let api = MockServer::start_async().await;
    mock_refs(&api).await;
    mock_uid(&api, "hooks", search_body(vec![doc("hooks", "Como utilizar Hooks")], None)).await;

    let site = TempDir::new().unwrap();
    let base = spawn_blog(config(&api), &site).await;

    let resp = reqwest::get(format!("{base}/post/hooks")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Como utilizar Hooks"));
    assert!(html.contains("25 de mar. de 2021"));
    assert_eq!(html.matches(r#"<div class="block">"#).count(), 2);
    assert!(html.contains("<p>Lorem ipsum</p>"));
    assert!(!html.contains("dolor sit amet"));
    assert!(!html.contains("sapien"));
    // published in 2021, so the chip counts days
    assert!(html.contains(" dias</time>"));
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
    let api = MockServer::start_async().await;
    mock_refs(&api).await;
    mock_uid(&api, "unknown-slug", search_body(vec![], None)).await;

    let site = TempDir::new().unwrap();
    let base = spawn_blog(config(&api), &site).await;

    let resp = reqwest::get(format!("{base}/post/unknown-slug")).await.unwrap();
    assert_eq!(resp.status(), 404);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Post não encontrado"));
}

#[tokio::test]
async fn more_follows_cursor_and_returns_cards() {
    let api = MockServer::start_async().await;
    mock_page(&api, 2, search_body(vec![doc("cra", "Criando um app CRA")], None)).await;

    let site = TempDir::new().unwrap();
    let base = spawn_blog(config(&api), &site).await;

    let resp = reqwest::Client::new()
        .get(format!("{base}/more"))
        .query(&[("cursor", page_url(&api, 2))])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let more: MoreResponse = resp.json().await.unwrap();
    assert!(more.html.contains("Criando um app CRA"));
    assert!(more.html.contains(r#"data-slug="cra""#));
    assert!(more.next_page.is_none());
}

#[tokio::test]
async fn more_rejects_foreign_cursor() {
    let api = MockServer::start_async().await;
    let site = TempDir::new().unwrap();
    let base = spawn_blog(config(&api), &site).await;

    let resp = reqwest::Client::new()
        .get(format!("{base}/more"))
        .query(&[("cursor", "https://evil.example.com/steal?page=2")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn serves_logo_and_static_files() {
    let api = MockServer::start_async().await;
    let site = TempDir::new().unwrap();
    std::fs::create_dir_all(site.path().join("static")).unwrap();
    std::fs::write(site.path().join("static/robots.txt"), "User-agent: *\n").unwrap();
    let base = spawn_blog(config(&api), &site).await;

    let resp = reqwest::get(format!("{base}/images/logo.svg")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["content-type"], "image/svg+xml");

    let resp = reqwest::get(format!("{base}/robots.txt")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "User-agent: *\n");
}

#[tokio::test]
async fn access_token_never_reaches_the_browser() {
    let api = MockServer::start_async().await;
    mock_refs(&api).await;
    let leaky = |n: u32| format!("{}&access_token=s3cr3t", page_url(&api, n));
    mock_first_page(
        &api,
        search_body(vec![doc("hooks", "Hooks")], Some(leaky(2))),
    )
    .await;
    let second = api
        .mock_async(|when, then| {
            when.method("GET")
                .path("/api/v2/documents/search")
                .query_param("page", "2")
                .query_param("access_token", "s3cr3t");
            then.status(200)
                .json_body(search_body(vec![doc("cra", "CRA")], Some(leaky(3))));
        })
        .await;

    let config = SiteConfig {
        access_token: Some("s3cr3t".to_string()),
        ..config(&api)
    };
    let site = TempDir::new().unwrap();
    let base = spawn_blog(config, &site).await;

    let html = reqwest::get(format!("{base}/")).await.unwrap().text().await.unwrap();
    assert!(html.contains("Carregar mais posts"));
    assert!(!html.contains("s3cr3t"));

    // the browser sends back the public cursor; the server re-adds the token
    let resp = reqwest::Client::new()
        .get(format!("{base}/more"))
        .query(&[("cursor", page_url(&api, 2))])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let more: MoreResponse = resp.json().await.unwrap();
    assert!(more.html.contains("CRA"));
    let next = more.next_page.expect("page 3 cursor");
    assert!(next.contains("page=3"));
    assert!(!next.contains("s3cr3t"));
    second.assert_hits_async(1).await;
}

#[tokio::test]
async fn concurrent_more_requests_are_independent() {
    let api = MockServer::start_async().await;
    let second = mock_page(
        &api,
        2,
        search_body(vec![doc("cra", "Criando um app CRA")], None),
    )
    .await;

    let site = TempDir::new().unwrap();
    let base = spawn_blog(config(&api), &site).await;

    let cursor = page_url(&api, 2);
    let (a, b) = tokio::join!(fetch_more(&base, &cursor), fetch_more(&base, &cursor));

    // each answer holds exactly the requested page, nothing accumulated
    assert_eq!(a.html, b.html);
    assert_eq!(a.html.matches(r#"data-slug="cra""#).count(), 1);
    second.assert_hits_async(2).await;
}

#[tokio::test]
async fn slug_with_backslash_is_not_found() {
    let api = MockServer::start_async().await;
    let refs = mock_refs(&api).await;

    let site = TempDir::new().unwrap();
    let base = spawn_blog(config(&api), &site).await;

    let resp = reqwest::get(format!("{base}/post/bad%5C")).await.unwrap();
    assert_eq!(resp.status(), 404);
    assert!(resp.text().await.unwrap().contains("Post não encontrado"));
    refs.assert_hits_async(0).await;
}
