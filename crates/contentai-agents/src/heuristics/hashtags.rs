use std::collections::HashSet;
use std::fmt;

use contentai_core::Platform;
use serde::Serialize;

use super::mentions;

pub const MIN_HASHTAGS: usize = 8;
pub const MAX_HASHTAGS: usize = 15;

const BASE_TAG_LIMIT: usize = 5;
const QUERY_TAG_LIMIT: usize = 5;
const STOP_WORDS: &[&str] = &["the", "and", "for", "with", "about"];

const GENERAL_TAGS: &[&str] = &[
    "#ContentCreation",
    "#SocialMedia",
    "#Marketing",
    "#Growth",
    "#Tips",
    "#Tutorial",
    "#HowTo",
    "#Business",
    "#Strategy",
    "#Success",
];

const AI_TAGS: &[&str] = &[
    "#AI",
    "#Automation",
    "#Technology",
    "#Innovation",
    "#DigitalTransformation",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashtagSet {
    pub platform: Platform,
    pub tags: Vec<String>,
    /// How many tags were built from real rising search queries.
    pub from_rising_queries: usize,
}

/// Build a deduplicated set of 8 to 15 hashtags.
///
/// Tags come from the topic and niche words, from `rising_queries` (real
/// queries supplied by the caller, never looked up here), from the platform's
/// usual tags, and finally from a general pool until the minimum is reached.
#[must_use]
pub fn generate_hashtags(
    topic: &str,
    niche: &str,
    platform: Platform,
    rising_queries: &[String],
) -> HashtagSet {
    let query_tags: Vec<String> = rising_queries
        .iter()
        .take(QUERY_TAG_LIMIT)
        .filter_map(|q| {
            let joined: String = q.split_whitespace().collect();
            (!joined.is_empty()).then(|| format!("#{}", capitalize(&joined)))
        })
        .collect();

    let mut candidates = base_tags(topic, niche);
    let earlier: HashSet<String> = candidates.iter().map(|t| t.to_lowercase()).collect();
    let query_keys: HashSet<String> = query_tags
        .iter()
        .map(|t| t.to_lowercase())
        .filter(|t| !earlier.contains(t))
        .collect();
    candidates.extend(query_tags);
    candidates.extend(platform_tags(platform, niche));

    let mut tags = dedup(candidates);
    if tags.len() < MIN_HASHTAGS {
        tags.extend(GENERAL_TAGS.iter().map(ToString::to_string));
        tags = dedup(tags);
    }
    tags.truncate(MAX_HASHTAGS);
    let from_rising_queries = tags
        .iter()
        .filter(|t| query_keys.contains(&t.to_lowercase()))
        .count();

    HashtagSet {
        platform,
        tags,
        from_rising_queries,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn camel(words: &[&str]) -> String {
    words.iter().map(|w| capitalize(w)).collect()
}

fn base_tags(topic: &str, niche: &str) -> Vec<String> {
    let topic = topic.to_lowercase().replace([',', '.'], "");
    let words: Vec<&str> = topic.split_whitespace().collect();
    let mut tags = Vec::new();

    if !words.is_empty() && words.len() <= 3 {
        tags.push(format!("#{}", camel(&words)));
    }
    for word in &words {
        if word.chars().count() > 4 && !STOP_WORDS.contains(word) {
            tags.push(format!("#{}", capitalize(word)));
        }
    }

    let niche = niche.to_lowercase();
    let niche_words: Vec<&str> = niche.split_whitespace().collect();
    if !niche_words.is_empty() {
        tags.push(format!("#{}", camel(&niche_words)));
        for word in &niche_words {
            if word.chars().count() > 4 {
                tags.push(format!("#{}", capitalize(word)));
            }
        }
    }

    tags.truncate(BASE_TAG_LIMIT);
    tags
}

fn platform_tags(platform: Platform, niche: &str) -> Vec<String> {
    let tags: &[&str] = match platform {
        Platform::YouTube | Platform::YouTubeShorts => {
            &["#YouTube", "#YouTuber", "#Subscribe", "#Viral", "#Trending"]
        }
        Platform::Instagram | Platform::InstagramReels => {
            &["#InstaGood", "#Reels", "#Viral", "#Explore", "#Trending"]
        }
        Platform::TikTok => &["#TikTok", "#Viral", "#ForYou", "#FYP", "#Trending"],
        Platform::Twitter => &["#Twitter", "#Trending", "#Viral"],
        Platform::LinkedIn => &[
            "#LinkedIn",
            "#Professional",
            "#Business",
            "#Industry",
            "#CareerTips",
        ],
        Platform::Newsletter | Platform::Facebook => &["#ContentCreator", "#DigitalMarketing"],
    };

    if mentions(niche, "ai") || mentions(niche, "automation") {
        tags.iter().chain(AI_TAGS).map(ToString::to_string).collect()
    } else {
        tags.iter().take(4).map(ToString::to_string).collect()
    }
}

/// Keep the first occurrence of each tag, comparing case-insensitively.
fn dedup(tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.into_iter()
        .filter(|tag| seen.insert(tag.to_lowercase()))
        .collect()
}

impl fmt::Display for HashtagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Recommended Hashtags:")?;
        writeln!(f, "{}\n", self.tags.join(", "))?;
        write!(
            f,
            "Strategy: {} tags from rising search queries, mixed with niche-specific and \
             evergreen tags for {}.",
            self.from_rising_queries, self.platform
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_topic_queries_and_platform() {
        let rising = vec!["rust async runtime".to_string(), "tokio tutorial".to_string()];
        let set = generate_hashtags("Async Rust", "programming", Platform::TikTok, &rising);

        assert_eq!(set.tags[0], "#AsyncRust");
        assert!(set.tags.contains(&"#Rustasyncruntime".to_string()));
        assert!(set.tags.contains(&"#Tokiotutorial".to_string()));
        assert!(set.tags.contains(&"#FYP".to_string()));
        assert_eq!(set.from_rising_queries, 2);
        assert!(set.tags.len() >= MIN_HASHTAGS && set.tags.len() <= MAX_HASHTAGS);
    }

    #[test]
    fn pads_to_minimum_with_general_tags() {
        let set = generate_hashtags("x", "", Platform::Newsletter, &[]);
        assert!(set.tags.len() >= MIN_HASHTAGS);
        assert!(set.tags.contains(&"#ContentCreation".to_string()));
        assert_eq!(set.from_rising_queries, 0);
    }

    #[test]
    fn caps_at_maximum_and_dedups() {
        let rising: Vec<String> = (0..10).map(|i| format!("query {i}")).collect();
        let set = generate_hashtags(
            "automation tools guide",
            "ai automation",
            Platform::YouTube,
            &rising,
        );
        assert_eq!(set.tags.len(), MAX_HASHTAGS);

        let lowered: HashSet<String> = set.tags.iter().map(|t| t.to_lowercase()).collect();
        assert_eq!(lowered.len(), set.tags.len());
    }

    #[test]
    fn query_tags_repeating_topic_tags_are_not_counted() {
        let rising = vec!["Rust".to_string(), "cargo".to_string(), "CARGO".to_string()];
        let set = generate_hashtags("rust", "", Platform::YouTube, &rising);

        assert_eq!(set.tags[0], "#Rust");
        assert_eq!(set.tags.iter().filter(|t| *t == "#Rust").count(), 1);
        assert!(set.tags.contains(&"#Cargo".to_string()));
        assert_eq!(set.from_rising_queries, 1);
    }

    #[test]
    fn stop_words_and_short_words_are_skipped() {
        let tags = base_tags("the best rust for beginners", "");
        assert_eq!(tags, vec!["#Beginners".to_string()]);
    }

    #[test]
    fn display_reports_query_count() {
        let set = generate_hashtags("rust", "", Platform::YouTube, &["cargo".to_string()]);
        let text = set.to_string();
        assert!(text.starts_with("Recommended Hashtags:\n#Rust, "));
        assert!(text.contains("1 tags from rising search queries"));
    }
}
