//! Shared fixtures for the integration tests

#![allow(dead_code)]

use httpmock::{Mock, MockServer};
use prismic_blog::config::SiteConfig;
use serde_json::{json, Value};

pub const MASTER_REF: &str = "YF-master";

pub fn config(server: &MockServer) -> SiteConfig {
    SiteConfig {
        endpoint: server.url("/api/v2"),
        timezone: "UTC".to_string(),
        ..SiteConfig::default()
    }
}

pub fn doc(uid: &str, title: &str) -> Value {
    json!({
        "id": format!("id-{uid}"),
        "uid": uid,
        "type": "posts",
        "slugs": [uid],
        "last_publication_date": "2021-03-25T19:25:28+0000",
        "data": {
            "title": [{"type": "heading1", "text": title, "spans": []}],
            "subtitle": [{"type": "paragraph", "text": format!("Sobre {title}"), "spans": []}],
            "author": [{"type": "paragraph", "text": "Joseph Oliveira", "spans": []}],
            "banner": {"url": "https://images.prismic.io/banner.png"},
            "content": [
                {"heading": "Proin et varius", "body": [
                    {"type": "paragraph", "text": "Lorem ipsum", "spans": []},
                    {"type": "paragraph", "text": "dolor sit amet", "spans": []}
                ]},
                {"heading": "Cras laoreet", "body": [
                    {"type": "paragraph", "text": "Nullam dolor", "spans": []},
                    {"type": "paragraph", "text": "sapien", "spans": []}
                ]}
            ]
        }
    })
}

pub fn search_body(results: Vec<Value>, next_page: Option<String>) -> Value {
    json!({
        "page": 1,
        "results_per_page": results.len(),
        "results_size": results.len(),
        "next_page": next_page,
        "prev_page": null,
        "results": results
    })
}

/// URL of listing page `n`, as the content API would hand it out
pub fn page_url(server: &MockServer, n: u32) -> String {
    server.url(format!("/api/v2/documents/search?ref={MASTER_REF}&page={n}"))
}

pub async fn mock_refs(server: &MockServer) -> Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method("GET").path("/api/v2");
            then.status(200).json_body(json!({
                "refs": [
                    {"id": "master", "ref": MASTER_REF, "label": "Master", "isMasterRef": true}
                ]
            }));
        })
        .await
}

pub async fn mock_first_page(server: &MockServer, body: Value) -> Mock<'_> {
    mock_first_page_sized(server, 1, body).await
}

pub async fn mock_first_page_sized(server: &MockServer, page_size: usize, body: Value) -> Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/api/v2/documents/search")
                .query_param("ref", MASTER_REF)
                .query_param("q", r#"[[at(document.type,"posts")]]"#)
                .query_param("fetch", "posts.title,posts.content,posts.author,posts.subtitle")
                .query_param("pageSize", page_size.to_string());
            then.status(200).json_body(body);
        })
        .await
}

pub async fn mock_page(server: &MockServer, n: u32, body: Value) -> Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/api/v2/documents/search")
                .query_param("page", n.to_string());
            then.status(200).json_body(body);
        })
        .await
}

pub async fn mock_uid<'a>(server: &'a MockServer, uid: &str, body: Value) -> Mock<'a> {
    let predicate = format!(r#"[[at(my.posts.uid,"{uid}")]]"#);
    server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/api/v2/documents/search")
                .query_param("q", predicate.as_str())
                .query_param("pageSize", "1");
            then.status(200).json_body(body);
        })
        .await
}
