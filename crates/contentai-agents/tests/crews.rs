//! Crew runs against mock providers and a scripted generation backend.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use contentai_agents::{
    AgentError, GenerationBackend, GenerationError, GenerationRequest, PersonaCatalog,
    PipelineRunner, Studio, ToolBox,
};
use contentai_collect::{
    CollectConfig, Collector, ProviderSet, RedditClient, SerpClient, TrendsClient, TwitterClient,
    YouTubeClient,
};
use contentai_core::{HeuristicsConfig, Platform, TrendBand};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Replays canned replies in order and records every request.
#[derive(Default)]
struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedBackend {
    fn replying(replies: Vec<Result<String, GenerationError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().expect("lock").clone()
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.requests.lock().expect("lock").push(request.clone());
        self.replies
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or(Err(GenerationError::EmptyResponse))
    }
}

fn config(serp_key: Option<&str>) -> CollectConfig {
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

fn studio(config: &CollectConfig, server: &MockServer, backend: Arc<ScriptedBackend>) -> Studio {
    let providers = ProviderSet {
        youtube: Arc::new(YouTubeClient::with_base_url(config, &server.uri()).expect("youtube")),
        trends: Arc::new(TrendsClient::with_base_url(config, &server.uri()).expect("trends")),
        serp: Arc::new(SerpClient::with_base_url(config, &server.uri()).expect("serp")),
        reddit: Arc::new(
            RedditClient::with_base_urls(config, &server.uri(), &server.uri()).expect("reddit"),
        ),
        twitter: Arc::new(TwitterClient::with_base_url(config, &server.uri()).expect("twitter")),
    };
    Studio::new(
        Collector::from_providers(&providers),
        ToolBox::new(providers, Arc::new(HeuristicsConfig::default())),
        PersonaCatalog::builtin(),
        PipelineRunner::new(backend, 1024),
    )
}

async fn mount_questions(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("engine", "google"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "related_questions": [
                {"question": "Is Rust hard to learn?"},
                {"question": "Why is Rust so fast?"}
            ]
        })))
        .mount(server)
        .await;
}

fn script_json() -> serde_json::Value {
    json!({
        "topic": "rust",
        "platform": "YouTube",
        "target_audience": "backend developers",
        "content_goal": "educate",
        "script": {
            "hook": "Is Rust hard to learn?",
            "introduction": "intro",
            "main_content": ["ownership"],
            "key_insights": ["borrowing"],
            "cta": "subscribe",
            "closing": "bye"
        },
        "platform_guidelines": {
            "optimal_length": "12-20 minutes",
            "tone": "direct",
            "pacing": "steady",
            "visual_style": "screen capture",
            "key_optimization_tips": ["chapters"]
        }
    })
}

#[tokio::test]
async fn smart_script_refuses_when_nothing_was_collected() {
    let server = MockServer::start().await;
    let backend = ScriptedBackend::replying(vec![]);
    let studio = studio(&config(None), &server, backend.clone());

    let err = studio
        .smart_script("rust", Platform::YouTube)
        .await
        .expect_err("no data must fail");

    match err {
        AgentError::SnapshotUnusable { errors } => {
            assert_eq!(errors.len(), 3);
            assert!(errors[0].contains("YOUTUBE_API_KEY"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn smart_script_grounds_every_step_in_the_snapshot() {
    let server = MockServer::start().await;
    mount_questions(&server).await;

    let reply = format!("Here you go:\n```json\n{}\n```", script_json());
    let backend = ScriptedBackend::replying(vec![Ok("gap: beginners".to_string()), Ok(reply)]);
    let studio = studio(&config(Some("serp-key")), &server, backend.clone());

    let output = studio
        .smart_script("rust", Platform::YouTube)
        .await
        .expect("smart script");

    assert_eq!(output.output.crew, "smart_script");
    assert_eq!(output.output.steps.len(), 2);
    assert_eq!(output.collected.question_count, 2);
    assert!(output.context_preview.contains("Is Rust hard to learn?"));
    let structured = output.output.structured.expect("script conforms");
    assert_eq!(structured["script"]["hook"], "Is Rust hard to learn?");

    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert!(request.prompt.starts_with("## CONTEXT"));
        assert!(request.prompt.contains("Why is Rust so fast?"));
    }
    assert!(requests[1].prompt.contains("## OUTPUT OF STEP 'analysis'"));
    assert!(requests[1].prompt.contains("gap: beginners"));
    assert!(requests[1].prompt.contains("No video data was collected"));
}

#[tokio::test]
async fn auth_failure_keeps_completed_steps() {
    let server = MockServer::start().await;
    mount_questions(&server).await;

    let backend = ScriptedBackend::replying(vec![
        Ok("gap: beginners".to_string()),
        Err(GenerationError::Auth("invalid x-api-key".to_string())),
    ]);
    let studio = studio(&config(Some("serp-key")), &server, backend);

    let err = studio
        .smart_script("rust", Platform::TikTok)
        .await
        .expect_err("auth failure");

    assert!(matches!(err, AgentError::GenerationAuth(_)));
    assert_eq!(err.completed_steps().len(), 1);
    assert_eq!(err.completed_steps()[0].output, "gap: beginners");
}

#[tokio::test]
async fn unavailable_tools_are_reported_to_the_persona() {
    let server = MockServer::start().await;
    let backend = ScriptedBackend::replying(vec![Ok("no research possible".to_string())]);
    let studio = studio(&config(None), &server, backend.clone());

    let output = studio.research("rust").await.expect("research");

    assert_eq!(output.crew, "research");
    assert_eq!(output.result, "no research possible");
    assert!(output.structured.is_none());

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].prompt.contains("## TOOL DATA"));
    assert!(requests[0]
        .prompt
        .contains("### WEB SEARCH: unavailable: SerpApi: SERP_API_KEY not set"));
}

#[tokio::test]
async fn empty_input_fails_before_any_generation() {
    let server = MockServer::start().await;
    let backend = ScriptedBackend::replying(vec![]);
    let studio = studio(&config(None), &server, backend.clone());

    assert!(matches!(
        studio.seo("   ").await,
        Err(AgentError::InvalidInput(_))
    ));
    assert!(matches!(
        studio.analyze_trends(&[String::new()]).await,
        Err(AgentError::InvalidInput(_))
    ));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn full_content_runs_four_steps_in_order() {
    let server = MockServer::start().await;
    let backend = ScriptedBackend::replying(vec![
        Ok("topics".to_string()),
        Ok("research".to_string()),
        Ok("script".to_string()),
        Ok("social".to_string()),
    ]);
    let studio = studio(&config(None), &server, backend.clone());

    let output = studio
        .full_content("developer tools", Some("rust"), Platform::Instagram)
        .await
        .expect("full content");

    let names: Vec<_> = output.steps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["find_topics", "research", "script", "social"]);
    assert_eq!(output.result, "social");

    let last = &backend.requests()[3];
    assert!(last.prompt.contains("## OUTPUT OF STEP 'script'"));
    assert!(last.prompt.contains("### HASHTAGS:"));
}
