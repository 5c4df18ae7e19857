//! Structured outputs the generation steps are asked to produce.
//!
//! Conformance is checked by deserializing the extracted JSON into these
//! types; fields marked `#[serde(default)]` may be omitted by the model.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoAnalytics {
    pub views: String,
    pub likes: String,
    pub comments: String,
    #[serde(default)]
    pub shares: Option<String>,
    #[serde(default)]
    pub engagement_rate: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub title: String,
    pub platform: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub analytics: Option<VideoAnalytics>,
    pub why_it_works: String,
    pub key_angles: Vec<String>,
    #[serde(default)]
    pub estimated_views: Option<String>,
    /// Low, Medium, or High.
    #[serde(default)]
    pub competition_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicFinderOutput {
    pub niche: String,
    pub topics: Vec<TrendingTopic>,
    #[serde(default)]
    pub search_date: Option<String>,
    #[serde(default)]
    pub total_topics_analyzed: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchInsight {
    pub key_points: Vec<String>,
    pub statistics: Vec<String>,
    #[serde(default)]
    pub quotes: Vec<String>,
    pub hooks: Vec<String>,
    pub audience_pain_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentResearchOutput {
    pub topic: String,
    pub insights: ResearchInsight,
    #[serde(default)]
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformGuidelines {
    pub optimal_length: String,
    pub tone: String,
    pub pacing: String,
    pub visual_style: String,
    pub key_optimization_tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptSection {
    pub hook: String,
    pub introduction: String,
    pub main_content: Vec<String>,
    pub key_insights: Vec<String>,
    #[serde(default)]
    pub emotional_elements: Option<Vec<String>>,
    #[serde(default)]
    pub transitions: Option<Vec<String>>,
    pub cta: String,
    pub closing: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptOutput {
    pub topic: String,
    pub platform: String,
    #[serde(default)]
    pub duration: Option<String>,
    pub target_audience: String,
    pub content_goal: String,
    pub script: ScriptSection,
    pub platform_guidelines: PlatformGuidelines,
    #[serde(default)]
    pub visual_suggestions: Vec<String>,
    #[serde(default)]
    pub thumbnail_ideas: Vec<String>,
    #[serde(default)]
    pub formatting_notes: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialMediaOutput {
    pub caption: String,
    pub hashtags: Vec<String>,
    pub visual_description: String,
    pub post_type: String,
    pub best_posting_time: String,
    pub estimated_engagement_rate: String,
}

/// Script plus social packaging, produced by the last step of the full crew.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteContentOutput {
    pub topic: String,
    pub platform: String,
    #[serde(default)]
    pub duration: Option<String>,
    pub script: ScriptSection,
    #[serde(default)]
    pub visual_suggestions: Vec<String>,
    #[serde(default)]
    pub thumbnail_ideas: Vec<String>,
    pub caption: String,
    pub hashtags: Vec<String>,
    pub visual_description: String,
    pub post_type: String,
    pub best_posting_time: String,
    pub estimated_engagement_rate: String,
}

/// Which structured model a step must return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSchema {
    TopicFinder,
    ContentResearch,
    Script,
    SocialMedia,
    CompleteContent,
}

const SCRIPT_SECTION_SHAPE: &str = r#"{
    "hook": "string",
    "introduction": "string",
    "main_content": ["string"],
    "key_insights": ["string"],
    "emotional_elements": ["string"],
    "transitions": ["string"],
    "cta": "string",
    "closing": "string"
  }"#;

impl OutputSchema {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            OutputSchema::TopicFinder => "TopicFinderOutput",
            OutputSchema::ContentResearch => "ContentResearchOutput",
            OutputSchema::Script => "ScriptOutput",
            OutputSchema::SocialMedia => "SocialMediaOutput",
            OutputSchema::CompleteContent => "CompleteContentOutput",
        }
    }

    /// JSON skeleton shown to the model.
    #[must_use]
    pub fn shape(self) -> String {
        match self {
            OutputSchema::TopicFinder => r#"{
  "niche": "string",
  "topics": [{
    "title": "string",
    "platform": "string",
    "url": "string or null",
    "creator": "string or null",
    "analytics": {"views": "string", "likes": "string", "comments": "string", "published_date": "string or null"},
    "why_it_works": "string",
    "key_angles": ["string"],
    "competition_level": "Low | Medium | High"
  }],
  "search_date": "string or null",
  "total_topics_analyzed": 0
}"#
            .to_string(),
            OutputSchema::ContentResearch => r#"{
  "topic": "string",
  "insights": {
    "key_points": ["string"],
    "statistics": ["string"],
    "quotes": ["string"],
    "hooks": ["string"],
    "audience_pain_points": ["string"]
  },
  "sources": ["string"]
}"#
            .to_string(),
            OutputSchema::Script => format!(
                r#"{{
  "topic": "string",
  "platform": "string",
  "duration": "string",
  "target_audience": "string",
  "content_goal": "string",
  "script": {SCRIPT_SECTION_SHAPE},
  "platform_guidelines": {{
    "optimal_length": "string",
    "tone": "string",
    "pacing": "string",
    "visual_style": "string",
    "key_optimization_tips": ["string"]
  }},
  "visual_suggestions": ["string"],
  "thumbnail_ideas": ["string"],
  "formatting_notes": ["string"]
}}"#
            ),
            OutputSchema::SocialMedia => r##"{
  "caption": "string",
  "hashtags": ["#string"],
  "visual_description": "string",
  "post_type": "string",
  "best_posting_time": "string",
  "estimated_engagement_rate": "string"
}"##
            .to_string(),
            OutputSchema::CompleteContent => format!(
                r##"{{
  "topic": "string",
  "platform": "string",
  "duration": "string",
  "script": {SCRIPT_SECTION_SHAPE},
  "visual_suggestions": ["string"],
  "thumbnail_ideas": ["string"],
  "caption": "string",
  "hashtags": ["#string"],
  "visual_description": "string",
  "post_type": "string",
  "best_posting_time": "string",
  "estimated_engagement_rate": "string"
}}"##
            ),
        }
    }

    /// Check `value` against the typed model and return its normalized form.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error when the value does not fit the model.
    pub fn conform(self, value: serde_json::Value) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            OutputSchema::TopicFinder => normalize::<TopicFinderOutput>(value),
            OutputSchema::ContentResearch => normalize::<ContentResearchOutput>(value),
            OutputSchema::Script => normalize::<ScriptOutput>(value),
            OutputSchema::SocialMedia => normalize::<SocialMediaOutput>(value),
            OutputSchema::CompleteContent => normalize::<CompleteContentOutput>(value),
        }
    }
}

fn normalize<T>(value: serde_json::Value) -> Result<serde_json::Value, serde_json::Error>
where
    T: DeserializeOwned + Serialize,
{
    let typed: T = serde_json::from_value(value)?;
    serde_json::to_value(typed)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn script_section() -> serde_json::Value {
        json!({
            "hook": "150,000 people watched this and missed one thing",
            "introduction": "intro",
            "main_content": ["a", "b"],
            "key_insights": ["k"],
            "cta": "subscribe",
            "closing": "bye"
        })
    }

    #[test]
    fn shapes_are_valid_json() {
        for schema in [
            OutputSchema::TopicFinder,
            OutputSchema::ContentResearch,
            OutputSchema::Script,
            OutputSchema::SocialMedia,
            OutputSchema::CompleteContent,
        ] {
            let parsed: Result<serde_json::Value, _> = serde_json::from_str(&schema.shape());
            assert!(parsed.is_ok(), "{} shape is not JSON", schema.name());
        }
    }

    #[test]
    fn script_conforms_with_optional_fields_missing() {
        let value = json!({
            "topic": "async rust",
            "platform": "youtube",
            "target_audience": "backend devs",
            "content_goal": "educate",
            "script": script_section(),
            "platform_guidelines": {
                "optimal_length": "12-20 min",
                "tone": "conversational",
                "pacing": "moderate",
                "visual_style": "screen recording",
                "key_optimization_tips": ["chapters"]
            }
        });
        let normalized = OutputSchema::Script.conform(value).unwrap();
        assert_eq!(normalized["visual_suggestions"], json!([]));
        assert_eq!(normalized["script"]["transitions"], json!(null));
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let value = json!({"caption": "hi", "hashtags": []});
        assert!(OutputSchema::SocialMedia.conform(value).is_err());
    }

    #[test]
    fn complete_content_requires_social_fields() {
        let mut value = json!({
            "topic": "t",
            "platform": "tiktok",
            "script": script_section(),
            "caption": "c",
            "hashtags": ["#a"],
            "visual_description": "v",
            "post_type": "TikTok",
            "best_posting_time": "Tue 7 PM",
        });
        assert!(OutputSchema::CompleteContent.conform(value.clone()).is_err());
        value["estimated_engagement_rate"] = json!("4.5-6.2%");
        assert!(OutputSchema::CompleteContent.conform(value).is_ok());
    }
}
