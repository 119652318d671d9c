use std::collections::BTreeSet;
use std::time::Duration;

use fider_core::SearchRequest;
use fider_engine::{ClientSettings, FailureKind, ReqwestSearchClient, SearchClient};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, settings: ClientSettings) -> ReqwestSearchClient {
    ReqwestSearchClient::new(ClientSettings {
        base_url: server.uri(),
        ..settings
    })
    .expect("client builds")
}

#[tokio::test]
async fn search_sends_filter_and_decodes_posts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/posts"))
        .and(query_param("query", "dark mode"))
        .and(query_param("view", "trending"))
        .and(query_param("tags", "bug,ux"))
        .and(query_param("limit", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[{"number":1,"title":"Dark mode"},{"number":2,"title":"Darker mode"}]"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, ClientSettings::default());
    let request = SearchRequest {
        query: "dark mode".into(),
        view: "trending".into(),
        limit: Some(40),
        tags: ["bug", "ux"].iter().map(|tag| tag.to_string()).collect::<BTreeSet<_>>(),
    };

    let posts = client.search(&request).await.expect("search ok");
    let titles: Vec<_> = posts.iter().filter_map(|post| post.title()).collect();
    assert_eq!(titles, vec!["Dark mode", "Darker mode"]);
    assert_eq!(posts[1].number(), Some(2));
}

#[tokio::test]
async fn search_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/posts"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server, ClientSettings::default());
    let err = client.search(&SearchRequest::default()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}

#[tokio::test]
async fn search_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/posts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("[]"),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    };
    let client = client_for(&server, settings);
    let err = client.search(&SearchRequest::default()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn search_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/posts"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .set_body_string(r#"[{"number":1},{"number":2}]"#),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        max_bytes: 10,
        ..ClientSettings::default()
    };
    let client = client_for(&server, settings);
    let err = client.search(&SearchRequest::default()).await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::TooLarge { max_bytes: 10, .. }));
}

#[tokio::test]
async fn search_reports_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, ClientSettings::default());
    let err = client.search(&SearchRequest::default()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}
