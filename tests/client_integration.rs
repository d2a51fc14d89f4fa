//! Integration tests against a mock Xtream panel

use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xtream_client::{ClientConfig, XtreamClient, XtreamError, CAMEL_CASE, JSON_API};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xtream_client=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(server.uri(), "user", "pass")
}

#[tokio::test]
async fn test_get_profile() -> anyhow::Result<()> {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/player_api.php"))
        .and(query_param("username", "user"))
        .and(query_param("password", "pass"))
        .and(query_param("action", "get_profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_info": {"username": "user", "status": "Active"},
            "server_info": {"url": "example.com", "port": "8080"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = XtreamClient::new(config(&mock_server))?;
    let profile = client.get_profile().await?;

    assert_eq!(profile["user_info"]["status"], json!("Active"));
    Ok(())
}

#[tokio::test]
async fn test_channels_with_category_and_serializer() -> anyhow::Result<()> {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/player_api.php"))
        .and(query_param("action", "get_live_streams"))
        .and(query_param("category_id", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"stream_id": 123, "name": "NASA TV", "category_id": "5", "tv_archive": 1}
        ])))
        .mount(&mock_server)
        .await;

    let client = XtreamClient::new(config(&mock_server).with_serializer(CAMEL_CASE.clone()))?;
    let channels = client.get_channels(Some(5)).await?;

    assert_eq!(channels[0]["streamId"], json!(123));
    assert_eq!(channels[0]["categoryIds"], json!([]));
    Ok(())
}

#[tokio::test]
async fn test_json_api_channels() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("action", "get_live_streams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"stream_id": 1, "name": "A", "category_id": 0},
            {"stream_id": 2, "name": "B", "category_id": 5}
        ])))
        .mount(&mock_server)
        .await;

    let client = XtreamClient::new(config(&mock_server).with_serializer(JSON_API.clone()))?;
    let doc = client.get_channels(None).await?;

    assert!(doc["data"][0].get("relationships").is_none());
    assert_eq!(doc["data"][1]["relationships"]["category"]["data"]["id"], json!("5"));
    Ok(())
}

#[tokio::test]
async fn test_short_epg_parameters() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("action", "get_short_epg"))
        .and(query_param("stream_id", "42"))
        .and(query_param("limit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"epg_listings": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = XtreamClient::new(config(&mock_server))?;
    let epg = client.get_short_epg(42, Some(3)).await?;

    assert_eq!(epg, json!({"epg_listings": []}));
    Ok(())
}

#[tokio::test]
async fn test_http_404() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>Not Found</html>"))
        .mount(&mock_server)
        .await;

    let client = XtreamClient::new(config(&mock_server))?;
    let err = client.get_movie(456).await.unwrap_err();

    match err {
        XtreamError::HttpStatus { status, reason, .. } => {
            assert_eq!(status, 404);
            assert_eq!(reason, "Not Found");
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_malformed_json() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"broken\": "))
        .mount(&mock_server)
        .await;

    let client = XtreamClient::new(config(&mock_server))?;
    let err = client.get_show(789).await.unwrap_err();

    assert!(matches!(err, XtreamError::Protocol { .. }));
    assert_eq!(err.action(), Some("get_series_info"));
    Ok(())
}

#[tokio::test]
async fn test_timeout_is_not_network_error() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = XtreamClient::new(config(&mock_server).with_timeout_ms(100))?;
    let err = client.get_channel_categories().await.unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {:?}", err);
    assert!(err.to_string().contains("100ms"));
    Ok(())
}

#[tokio::test]
async fn test_connection_refused_is_network_error() -> anyhow::Result<()> {
    // Grab a free port, then release it so nothing is listening there
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?.port()
    };

    let client = XtreamClient::new(ClientConfig::new(
        format!("http://127.0.0.1:{}", port),
        "user",
        "s3cret",
    ))?;
    let err = client.get_profile().await.unwrap_err();

    assert!(matches!(err, XtreamError::Network { .. }), "got {:?}", err);
    assert_eq!(err.action(), Some("get_profile"));
    assert!(!err.to_string().contains("s3cret"), "password leaked: {}", err);
    assert!(!format!("{:?}", err).contains("s3cret"));
    Ok(())
}

#[tokio::test]
async fn test_redirect_loop_is_request_failure() -> anyhow::Result<()> {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", format!("{}/player_api.php", mock_server.uri())),
        )
        .mount(&mock_server)
        .await;

    let client = XtreamClient::new(ClientConfig::new(mock_server.uri(), "user", "corsica"))?;
    let err = client.get_channels(None).await.unwrap_err();

    assert_eq!(err.action(), Some("get_live_streams"));
    assert!(matches!(err, XtreamError::RequestFailed { .. }), "got {:?}", err);
    assert!(!err.to_string().contains("corsica"), "password leaked: {}", err);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("action", "get_vod_categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"category_id": 1}])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("action", "get_series_categories"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = XtreamClient::new(config(&mock_server))?;
    let (movies, shows) =
        futures::join!(client.get_movie_categories(), client.get_show_categories());

    assert_eq!(movies?, json!([{"category_id": 1}]));
    assert_eq!(shows.unwrap_err().status(), Some(500));
    Ok(())
}
