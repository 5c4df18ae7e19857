//! Integration tests for `YouTubeClient` against a local mock server.

use contentai_collect::{CollectConfig, CollectError, ErrorKind, YouTubeClient};
use contentai_core::{Platform, TrendBand};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(api_key: Option<&str>) -> CollectConfig {
    CollectConfig {
        youtube_api_key: api_key.map(str::to_string),
        serp_api_key: None,
        reddit_client_id: None,
        reddit_client_secret: None,
        reddit_user_agent: "contentai-test/0.1".to_string(),
        twitter_bearer_token: None,
        request_timeout_secs: 5,
        user_agent: "contentai-test/0.1".to_string(),
        video_page_size: 10,
        trend_band: TrendBand::default(),
    }
}

fn client(server: &MockServer, api_key: Option<&str>) -> YouTubeClient {
    YouTubeClient::with_base_url(&test_config(api_key), &server.uri())
        .expect("failed to build test YouTubeClient")
}

fn search_body() -> serde_json::Value {
    json!({
        "items": [
            {
                "id": {"kind": "youtube#video", "videoId": "vid1"},
                "snippet": {
                    "title": "Rust &amp; Tokio in 10 minutes",
                    "channelTitle": "Ferris",
                    "publishedAt": "2025-03-14T09:00:00Z"
                }
            },
            {
                "id": {"kind": "youtube#video", "videoId": "vid2"},
                "snippet": {
                    "title": "Why I&#39;m learning Rust",
                    "channelTitle": "Crab Corner",
                    "publishedAt": "2025-02-01T12:30:00Z"
                }
            }
        ]
    })
}

#[tokio::test]
async fn search_videos_merges_statistics_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rust"))
        .and(query_param("order", "viewCount"))
        .and(query_param("maxResults", "10"))
        .and(query_param("key", "yt-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "vid1,vid2"))
        .and(query_param("part", "statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": "vid2", "statistics": {"viewCount": "9876543", "likeCount": "1200"}},
                {"id": "vid1", "statistics": {"viewCount": "150000", "likeCount": "4000"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let videos = client(&server, Some("yt-key"))
        .search_videos("rust", Some(Platform::YouTube))
        .await
        .expect("search should succeed");

    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0].video_id, "vid1");
    assert_eq!(videos[0].title, "Rust & Tokio in 10 minutes");
    assert_eq!(videos[0].view_count, 150_000);
    assert_eq!(videos[0].like_count, 4_000);
    assert_eq!(videos[0].publish_date, "2025-03-14");
    assert_eq!(videos[0].url, "https://youtube.com/watch?v=vid1");
    assert_eq!(videos[1].title, "Why I'm learning Rust");
    assert_eq!(videos[1].view_count, 9_876_543);
}

#[tokio::test]
async fn video_missing_from_statistics_keeps_zero_counts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "vid1", "statistics": {"viewCount": "10"}}]
        })))
        .mount(&server)
        .await;

    let videos = client(&server, Some("yt-key"))
        .search_videos("rust", None)
        .await
        .expect("search should succeed");

    assert_eq!(videos[0].view_count, 10);
    assert_eq!(videos[0].like_count, 0);
    assert_eq!(videos[1].view_count, 0);
}

#[tokio::test]
async fn short_form_platform_restricts_duration() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("videoDuration", "short"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let videos = client(&server, Some("yt-key"))
        .search_videos("rust", Some(Platform::TikTok))
        .await
        .expect("search should succeed");
    assert_eq!(videos.len(), 2);
}

#[tokio::test]
async fn empty_search_is_reported_as_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let err = client(&server, Some("yt-key"))
        .search_videos("nothing here", None)
        .await
        .expect_err("empty search should fail");

    assert_eq!(err.kind(), ErrorKind::UpstreamEmpty);
    assert_eq!(
        err.to_string(),
        "YouTube: no videos found for 'nothing here'"
    );
}

#[tokio::test]
async fn api_error_payload_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {"code": 403, "message": "quotaExceeded"}
        })))
        .mount(&server)
        .await;

    let err = client(&server, Some("yt-key"))
        .search_videos("rust", None)
        .await
        .expect_err("403 should fail");

    assert!(matches!(err, CollectError::Api { .. }), "got {err:?}");
    assert_eq!(err.to_string(), "YouTube API error: quotaExceeded");
}

#[tokio::test]
async fn statistics_failure_fails_the_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server, Some("yt-key"))
        .search_videos("rust", None)
        .await
        .expect_err("stats outage should fail");
    assert!(matches!(
        err,
        CollectError::Unavailable { status: 503, .. }
    ));
}

#[tokio::test]
async fn missing_key_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server, None)
        .search_videos("rust", None)
        .await
        .expect_err("missing key should fail");
    assert_eq!(err.to_string(), "YouTube: YOUTUBE_API_KEY not set");
    assert_eq!(err.kind(), ErrorKind::ConfigurationMissing);
}

#[tokio::test]
async fn channel_report_combines_channel_and_uploads() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("type", "channel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": {"channelId": "UC123"}, "snippet": {"title": "Ferris"}}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("id", "UC123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "UC123",
                "snippet": {"title": "Ferris"},
                "statistics": {"subscriberCount": "250000", "viewCount": "12000000", "videoCount": "340"}
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("channelId", "UC123"))
        .and(query_param("order", "date"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "vid1", "statistics": {"viewCount": "5000", "likeCount": "300"}}]
        })))
        .mount(&server)
        .await;

    let report = client(&server, Some("yt-key"))
        .channel_report("Ferris")
        .await
        .expect("channel report should succeed");

    assert_eq!(report.channel_id, "UC123");
    assert_eq!(report.subscriber_count, 250_000);
    assert_eq!(report.total_views, 12_000_000);
    assert_eq!(report.video_count, 340);
    assert_eq!(report.recent_videos.len(), 2);
    assert_eq!(report.recent_videos[0].view_count, 5_000);
}

#[tokio::test]
async fn unknown_channel_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let err = client(&server, Some("yt-key"))
        .channel_report("nobody")
        .await
        .expect_err("unknown channel should fail");
    assert_eq!(err.to_string(), "YouTube: no channel found for 'nobody'");
}
