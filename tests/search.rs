#![cfg(test)]

use std::{sync::Arc, time::Duration};

use httpmock::prelude::*;
use matjip_bot::{
    base::{
        config::{Config, ConfigInner},
        types::SearchQuery,
    },
    service::search::{CrawlingError, GenericSearchClient, naver::NaverSearchClient},
};

fn client_for(server: &MockServer, fetch_timeout_secs: u64) -> NaverSearchClient {
    let config = Config {
        inner: Arc::new(ConfigInner {
            search_url: server.url("/restaurants/list?query="),
            fetch_timeout_secs,
            ..Default::default()
        }),
    };

    NaverSearchClient::new(&config).unwrap()
}

fn query() -> SearchQuery {
    SearchQuery::from_command("강남 맛집", "맛집").unwrap()
}

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<script src="/static/vendor.js"></script>
<script>window.__CONFIG__ = {"locale": "ko"};</script>
<script>window.PLACE_STATE = {"businesses":{"[query:강남 맛집]":{"total":2,"items":[{"id":"1","name":"A"},{"id":"2","name":"B"}]}}};</script>
</head>
<body><div id="app"></div></body>
</html>"#;

#[tokio::test]
async fn test_search_scrapes_records() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/restaurants/list");
            then.status(200).header("content-type", "text/html; charset=utf-8").body(PAGE);
        })
        .await;

    let records = client_for(&server, 10).search(&query()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "1");
    assert_eq!(records[1].name, "B");
}

#[tokio::test]
async fn test_search_http_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/restaurants/list");
            then.status(503);
        })
        .await;

    let err = client_for(&server, 10).search(&query()).await.unwrap_err();

    assert!(matches!(err, CrawlingError::Status(status) if status.as_u16() == 503));
}

#[tokio::test]
async fn test_search_page_without_payload() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/restaurants/list");
            then.status(200).body("<html><body>점검 중입니다</body></html>");
        })
        .await;

    let err = client_for(&server, 10).search(&query()).await.unwrap_err();

    assert!(matches!(err, CrawlingError::MissingScript { index: 2, found: 0 }));
}

#[tokio::test]
async fn test_search_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/restaurants/list");
            then.status(200).delay(Duration::from_secs(3)).body(PAGE);
        })
        .await;

    let err = client_for(&server, 1).search(&query()).await.unwrap_err();

    assert!(matches!(err, CrawlingError::Fetch(ref e) if e.is_timeout()));
}
