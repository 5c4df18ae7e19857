use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Tool names a persona may be granted in a personas file.
pub const TOOL_NAMES: &[&str] = &[
    "video_search",
    "trend_interest",
    "related_questions",
    "web_search",
    "news_search",
    "forum_search",
    "microblog_search",
    "channel_report",
    "hashtags",
    "engagement_estimate",
    "posting_time",
];

/// One persona override. Replaces the built-in persona with the same `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaConfig {
    pub id: String,
    pub role: String,
    pub goal: String,
    pub backstory: String,
    #[serde(default)]
    pub tools: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PersonasFile {
    pub personas: Vec<PersonaConfig>,
}

/// Load and validate persona overrides from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_personas(path: &Path) -> Result<PersonasFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let personas_file: PersonasFile = serde_yaml::from_str(&content)?;

    validate_personas(&personas_file)?;

    Ok(personas_file)
}

fn validate_personas(personas_file: &PersonasFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for persona in &personas_file.personas {
        if persona.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "persona id must be non-empty".to_string(),
            ));
        }

        if persona.role.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "persona '{}' must have a non-empty role",
                persona.id
            )));
        }

        if !seen_ids.insert(persona.id.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate persona id: '{}'",
                persona.id
            )));
        }

        if let Some(unknown) = persona
            .tools
            .iter()
            .find(|tool| !TOOL_NAMES.contains(&tool.as_str()))
        {
            return Err(ConfigError::Validation(format!(
                "persona '{}' references unknown tool '{unknown}'",
                persona.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona(id: &str, tools: &[&str]) -> PersonaConfig {
        PersonaConfig {
            id: id.to_string(),
            role: "Trending Topic Specialist".to_string(),
            goal: "Find topics".to_string(),
            backstory: "Knows the niche".to_string(),
            tools: tools.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn parses_yaml_with_optional_tools() {
        let yaml = r"
personas:
  - id: topic_finder
    role: Trending Topic Specialist
    goal: Find what is trending
    backstory: Ten years in growth
    tools: [video_search, related_questions]
  - id: script_writer
    role: Script Writer
    goal: Write scripts
    backstory: Former editor
";
        let file: PersonasFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.personas.len(), 2);
        assert_eq!(file.personas[0].tools.len(), 2);
        assert!(file.personas[1].tools.is_empty());
        assert!(validate_personas(&file).is_ok());
    }

    #[test]
    fn rejects_empty_id() {
        let file = PersonasFile {
            personas: vec![persona("  ", &[])],
        };
        let result = validate_personas(&file);
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("non-empty")),
            "expected Validation error, got: {result:?}"
        );
    }

    #[test]
    fn rejects_duplicate_ids_case_insensitively() {
        let file = PersonasFile {
            personas: vec![persona("writer", &[]), persona("Writer", &[])],
        };
        let result = validate_personas(&file);
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("duplicate")),
            "expected duplicate error, got: {result:?}"
        );
    }

    #[test]
    fn rejects_unknown_tool() {
        let file = PersonasFile {
            personas: vec![persona("writer", &["video_search", "mind_reader"])],
        };
        let result = validate_personas(&file);
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("mind_reader")),
            "expected unknown tool error, got: {result:?}"
        );
    }

    #[test]
    fn load_personas_reports_missing_file() {
        let result = load_personas(Path::new("/nonexistent/personas.yaml"));
        assert!(
            matches!(result, Err(ConfigError::FileIo { ref path, .. }) if path.contains("personas.yaml")),
            "expected FileIo error, got: {result:?}"
        );
    }
}
