//! Integration tests for the `SerpApi`-backed clients: questions, web search,
//! news, and search-interest trends.

use contentai_collect::{
    CollectConfig, CollectError, ErrorKind, SerpClient, TrendDirection, TrendsClient,
};
use contentai_core::TrendBand;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(serp_key: Option<&str>) -> CollectConfig {
    CollectConfig {
        youtube_api_key: None,
        serp_api_key: serp_key.map(str::to_string),
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

fn serp(server: &MockServer) -> SerpClient {
    SerpClient::with_base_url(&test_config(Some("serp-key")), &server.uri())
        .expect("failed to build test SerpClient")
}

fn trends(server: &MockServer) -> TrendsClient {
    TrendsClient::with_base_url(&test_config(Some("serp-key")), &server.uri())
        .expect("failed to build test TrendsClient")
}

fn timeseries(values: &[u32]) -> serde_json::Value {
    let points: Vec<_> = values
        .iter()
        .map(|v| json!({"values": [{"query": "rust", "value": v.to_string(), "extracted_value": v}]}))
        .collect();
    json!({"interest_over_time": {"timeline_data": points}})
}

// ---------------------------------------------------------------------------
// Related questions and web search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn related_questions_are_returned_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("engine", "google"))
        .and(query_param("q", "rust async"))
        .and(query_param("api_key", "serp-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "related_questions": [
                {"question": "Is Rust async fast?"},
                {"question": "What is Tokio?"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let questions = serp(&server)
        .related_questions("rust async")
        .await
        .expect("questions should load");
    assert_eq!(questions, vec!["Is Rust async fast?", "What is Tokio?"]);
}

#[tokio::test]
async fn page_without_questions_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"organic_results": []})))
        .mount(&server)
        .await;

    let err = serp(&server)
        .related_questions("rust")
        .await
        .expect_err("no questions should fail");
    assert_eq!(err.kind(), ErrorKind::UpstreamEmpty);
    assert_eq!(
        err.to_string(),
        "SerpApi: no related questions found for 'rust'"
    );
}

#[tokio::test]
async fn error_field_in_success_body_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "Invalid API key. Your API key should be here: https://serpapi.com/manage-api-key"
        })))
        .mount(&server)
        .await;

    let err = serp(&server)
        .related_questions("rust")
        .await
        .expect_err("error payload should fail");
    assert!(matches!(err, CollectError::Api { .. }), "got {err:?}");
    assert!(err.to_string().starts_with("SerpApi API error: Invalid API key"));
}

#[tokio::test]
async fn rate_limit_is_transient() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = serp(&server)
        .related_questions("rust")
        .await
        .expect_err("429 should fail");
    assert_eq!(err.kind(), ErrorKind::UpstreamTransient);
    assert_eq!(err.to_string(), "SerpApi: rate limited (HTTP 429)");
}

#[tokio::test]
async fn web_search_caps_results_and_related_searches() {
    let server = MockServer::start().await;

    let organic: Vec<_> = (1..=12)
        .map(|i| json!({"title": format!("Result {i}"), "snippet": "s", "link": format!("https://e.com/{i}")}))
        .collect();
    let related: Vec<_> = (1..=7).map(|i| json!({"query": format!("related {i}")})).collect();

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic_results": organic,
            "related_searches": related,
            "related_questions": [{"question": "Why?"}]
        })))
        .mount(&server)
        .await;

    let page = serp(&server)
        .web_search("rust")
        .await
        .expect("web search should succeed");
    assert_eq!(page.results.len(), 10);
    assert_eq!(page.results[0].title, "Result 1");
    assert_eq!(page.related_searches.len(), 5);
    assert_eq!(page.questions, vec!["Why?"]);
}

#[tokio::test]
async fn news_reads_both_source_shapes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("engine", "google_news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "news_results": [
                {"title": "Rust 2.0?", "source": {"name": "The Register"}, "date": "2 days ago", "link": "https://a"},
                {"title": "Ferris turns 10", "source": "Wired", "date": "1 week ago", "link": "https://b"}
            ]
        })))
        .mount(&server)
        .await;

    let items = serp(&server).news("rust").await.expect("news should load");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].source, "The Register");
    assert_eq!(items[1].source, "Wired");
}

#[tokio::test]
async fn trailing_slash_base_url_still_targets_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("engine", "google"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "related_questions": [{"question": "What is Cargo?"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SerpClient::with_base_url(
        &test_config(Some("serp-key")),
        &format!("{}/", server.uri()),
    )
    .expect("trailing slash is accepted");
    let questions = client
        .related_questions("cargo")
        .await
        .expect("questions should load");
    assert_eq!(questions, vec!["What is Cargo?"]);
}

#[test]
fn unparseable_base_url_is_rejected() {
    let config = test_config(Some("serp-key"));
    assert!(matches!(
        SerpClient::with_base_url(&config, "not a url"),
        Err(CollectError::InvalidBaseUrl { provider: "SerpApi", .. })
    ));
    assert!(matches!(
        TrendsClient::with_base_url(&config, "not a url"),
        Err(CollectError::InvalidBaseUrl { provider: "Google Trends", .. })
    ));
}

#[tokio::test]
async fn missing_serp_key_is_configuration_missing() {
    let client = SerpClient::with_base_url(&test_config(None), "http://127.0.0.1:9")
        .expect("client builds without a key");
    let err = client
        .related_questions("rust")
        .await
        .expect_err("missing key should fail");
    assert_eq!(err.to_string(), "SerpApi: SERP_API_KEY not set");
}

// ---------------------------------------------------------------------------
// Trends
// ---------------------------------------------------------------------------

#[tokio::test]
async fn interest_computes_current_average_and_rising_direction() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("engine", "google_trends"))
        .and(query_param("data_type", "TIMESERIES"))
        .and(query_param("date", "today 3-m"))
        .respond_with(ResponseTemplate::new(200).set_body_json(timeseries(&[40, 30, 80])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("data_type", "RELATED_QUERIES"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "related_queries": {"rising": [{"query": "rust 2025"}, {"query": "rust vs go"}]}
        })))
        .mount(&server)
        .await;

    let records = trends(&server)
        .interest(&["rust".to_string()])
        .await
        .expect("trends should load");

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.keyword, "rust");
    assert_eq!(record.current_interest, 80);
    assert!((record.average_interest - 50.0).abs() < f64::EPSILON);
    assert_eq!(record.direction, TrendDirection::Rising);
    assert_eq!(record.rising_queries, vec!["rust 2025", "rust vs go"]);
}

#[tokio::test]
async fn boundary_value_is_stable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("data_type", "TIMESERIES"))
        .respond_with(ResponseTemplate::new(200).set_body_json(timeseries(&[50, 45, 55])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("data_type", "RELATED_QUERIES"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let records = trends(&server)
        .interest(&["rust".to_string()])
        .await
        .expect("trends should load");
    assert_eq!(records[0].current_interest, 55);
    assert_eq!(records[0].direction, TrendDirection::Stable);
    assert!(records[0].rising_queries.is_empty());
}

#[tokio::test]
async fn boundary_against_fractional_average_is_stable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("data_type", "TIMESERIES"))
        .respond_with(ResponseTemplate::new(200).set_body_json(timeseries(&[20, 15, 15])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("data_type", "RELATED_QUERIES"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let records = trends(&server)
        .interest(&["rust".to_string()])
        .await
        .expect("trends should load");
    // 15 is exactly 0.9 of the 50/3 average
    assert_eq!(records[0].current_interest, 15);
    assert_eq!(records[0].direction, TrendDirection::Stable);
}

#[tokio::test]
async fn rising_query_failure_keeps_the_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("data_type", "TIMESERIES"))
        .respond_with(ResponseTemplate::new(200).set_body_json(timeseries(&[60, 20])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("data_type", "RELATED_QUERIES"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let records = trends(&server)
        .interest(&["rust".to_string()])
        .await
        .expect("timeseries alone is enough");
    assert_eq!(records[0].direction, TrendDirection::Declining);
    assert!(records[0].rising_queries.is_empty());
}

#[tokio::test]
async fn timeline_without_points_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "interest_over_time": {"timeline_data": []}
        })))
        .mount(&server)
        .await;

    let err = trends(&server)
        .interest(&["rust".to_string()])
        .await
        .expect_err("no points should fail");
    assert_eq!(
        err.to_string(),
        "Google Trends: no interest data found for 'rust'"
    );
}
