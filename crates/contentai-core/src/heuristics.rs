//! Tunable constants behind trend classification and the engagement and
//! posting-time heuristics.
//!
//! The default values are empirical. They can be overridden with a YAML file
//! (see [`load_heuristics`]); any section omitted from the file keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::platform::Platform;
use crate::ConfigError;

/// Dead band around the historical average used to classify trend direction.
///
/// A current value strictly above `rising_factor * average` is rising, strictly
/// below `declining_factor * average` is declining, anything else is stable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendBand {
    pub rising_factor: f64,
    pub declining_factor: f64,
}

impl Default for TrendBand {
    fn default() -> Self {
        Self {
            rising_factor: 1.1,
            declining_factor: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicsConfig {
    pub trend_band: TrendBand,
    pub engagement: EngagementConstants,
    pub posting: PostingConstants,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformRate {
    pub platform: Platform,
    pub rate: f64,
}

/// A multiplier applied when any keyword occurs in the niche description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMultiplier {
    pub keywords: Vec<String>,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementConstants {
    /// Baseline engagement rate in percent, per platform.
    pub baselines: Vec<PlatformRate>,
    pub default_baseline: f64,
    /// Checked in order; the first matching group wins.
    pub niche_multipliers: Vec<KeywordMultiplier>,
    pub trend: TrendScoreConstants,
    pub quality: QualityConstants,
    pub min_rate: f64,
    pub max_rate: f64,
    pub range_low_factor: f64,
    pub range_high_factor: f64,
    pub low_rate_threshold: f64,
    pub high_rate_threshold: f64,
}

impl EngagementConstants {
    #[must_use]
    pub fn baseline_for(&self, platform: Platform) -> f64 {
        self.baselines
            .iter()
            .find(|b| b.platform == platform)
            .map_or(self.default_baseline, |b| b.rate)
    }
}

impl Default for EngagementConstants {
    fn default() -> Self {
        let rate = |platform, rate| PlatformRate { platform, rate };
        let group = |keywords: &[&str], multiplier| KeywordMultiplier {
            keywords: keywords.iter().map(ToString::to_string).collect(),
            multiplier,
        };

        Self {
            baselines: vec![
                rate(Platform::YouTube, 3.5),
                rate(Platform::YouTubeShorts, 5.2),
                rate(Platform::Instagram, 2.8),
                rate(Platform::InstagramReels, 3.8),
                rate(Platform::TikTok, 5.5),
                rate(Platform::Twitter, 0.9),
                rate(Platform::LinkedIn, 2.1),
                rate(Platform::Facebook, 1.5),
            ],
            default_baseline: 3.0,
            niche_multipliers: vec![
                group(&["ai", "automation", "technology", "tech"], 1.3),
                group(&["finance", "money", "business", "entrepreneur"], 1.25),
                group(&["fitness", "health", "wellness"], 1.15),
                group(&["entertainment", "comedy", "gaming"], 1.4),
                group(&["education", "tutorial", "how-to", "learning"], 1.2),
                group(&["marketing", "social media", "content"], 1.15),
            ],
            trend: TrendScoreConstants::default(),
            quality: QualityConstants::default(),
            min_rate: 0.5,
            max_rate: 15.0,
            range_low_factor: 0.85,
            range_high_factor: 1.15,
            low_rate_threshold: 3.0,
            high_rate_threshold: 5.0,
        }
    }
}

/// Topic momentum multipliers.
///
/// When the number of recent videos found for the topic is known it decides
/// the score; otherwise keyword matches against the topic and niche do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendScoreConstants {
    pub strong_video_count: usize,
    pub strong: f64,
    pub moderate_video_count: usize,
    pub moderate: f64,
    pub weak: f64,
    pub trending_keywords: Vec<String>,
    pub evergreen_keywords: Vec<String>,
    pub multi_trending: f64,
    pub single_trending: f64,
    pub evergreen: f64,
    pub neutral: f64,
}

impl Default for TrendScoreConstants {
    fn default() -> Self {
        let words = |list: &[&str]| list.iter().map(ToString::to_string).collect();
        Self {
            strong_video_count: 8,
            strong: 1.3,
            moderate_video_count: 5,
            moderate: 1.15,
            weak: 0.95,
            trending_keywords: words(&[
                "ai", "chatgpt", "automation", "2025", "new", "latest", "viral", "trending",
                "secret", "hack", "exposed",
            ]),
            evergreen_keywords: words(&[
                "how to", "tutorial", "guide", "tips", "learn", "beginner", "complete",
                "ultimate", "best",
            ]),
            multi_trending: 1.3,
            single_trending: 1.15,
            evergreen: 1.1,
            neutral: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConstants {
    pub hook: f64,
    pub visuals: f64,
    pub duration_fit: f64,
    pub cap: f64,
    /// Inclusive duration window (seconds) counted as a fit for short-form platforms.
    pub short_form_secs: (u32, u32),
    /// Inclusive duration window (seconds) counted as a fit for long-form video.
    pub long_form_secs: (u32, u32),
}

impl Default for QualityConstants {
    fn default() -> Self {
        Self {
            hook: 1.25,
            visuals: 1.15,
            duration_fit: 1.1,
            cap: 1.6,
            short_form_secs: (15, 60),
            long_form_secs: (480, 900),
        }
    }
}

/// Posting window advice for one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingWindow {
    pub primary: String,
    pub days: Vec<String>,
    pub frequency: String,
    pub secondary: String,
    pub algorithm: String,
    pub avoid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformPosting {
    pub platform: Platform,
    #[serde(flatten)]
    pub window: PostingWindow,
}

/// Replaces the primary window and days when the niche matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NicheSchedule {
    pub keywords: Vec<String>,
    pub primary: String,
    pub days: Vec<String>,
    pub note: String,
    /// Platforms whose own schedule already suits this audience.
    #[serde(default)]
    pub except: Vec<Platform>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceZone {
    pub keywords: Vec<String>,
    pub timezone: String,
    /// Offset of this zone relative to US Eastern time, in hours.
    pub offset_from_eastern_hours: f32,
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostingConstants {
    pub platforms: Vec<PlatformPosting>,
    pub fallback: PostingWindow,
    pub niche_schedules: Vec<NicheSchedule>,
    pub audiences: Vec<AudienceZone>,
    pub default_timezone: String,
    pub default_activity: String,
}

impl PostingConstants {
    #[must_use]
    pub fn window_for(&self, platform: Platform) -> &PostingWindow {
        self.platforms
            .iter()
            .find(|p| p.platform == platform)
            .map_or(&self.fallback, |p| &p.window)
    }
}

#[allow(clippy::too_many_lines)]
impl Default for PostingConstants {
    fn default() -> Self {
        fn window(
            primary: &str,
            days: &[&str],
            frequency: &str,
            secondary: &str,
            algorithm: &str,
            avoid: &str,
        ) -> PostingWindow {
            PostingWindow {
                primary: primary.to_string(),
                days: days.iter().map(ToString::to_string).collect(),
                frequency: frequency.to_string(),
                secondary: secondary.to_string(),
                algorithm: algorithm.to_string(),
                avoid: avoid.to_string(),
            }
        }
        fn niche(keywords: &[&str], primary: &str, days: &[&str], note: &str) -> NicheSchedule {
            NicheSchedule {
                keywords: keywords.iter().map(ToString::to_string).collect(),
                primary: primary.to_string(),
                days: days.iter().map(ToString::to_string).collect(),
                note: note.to_string(),
                except: Vec::new(),
            }
        }
        fn zone(keywords: &[&str], timezone: &str, offset: f32, activity: &str) -> AudienceZone {
            AudienceZone {
                keywords: keywords.iter().map(ToString::to_string).collect(),
                timezone: timezone.to_string(),
                offset_from_eastern_hours: offset,
                activity: activity.to_string(),
            }
        }

        const VIDEO_SECONDARY: &str =
            "Weekday mornings (6-9 AM) for early birds, weekday lunch (12-1 PM)";
        const SCROLL_SECONDARY: &str =
            "Early morning (6-8 AM), late night (9-11 PM) for night scrollers";

        let platforms = vec![
            PlatformPosting {
                platform: Platform::YouTube,
                window: window(
                    "2:00-4:00 PM",
                    &["Friday", "Saturday", "Sunday"],
                    "2-3 times per week",
                    VIDEO_SECONDARY,
                    "Prioritizes watch time and early engagement (first 1-2 hours critical)",
                    "Late night (2-6 AM), early Monday morning",
                ),
            },
            PlatformPosting {
                platform: Platform::YouTubeShorts,
                window: window(
                    "6:00-9:00 PM",
                    &["Friday", "Saturday", "Sunday"],
                    "daily",
                    VIDEO_SECONDARY,
                    "Favors high completion rate; first 30 minutes crucial for distribution",
                    "Late night (2-6 AM), early Monday morning",
                ),
            },
            PlatformPosting {
                platform: Platform::Instagram,
                window: window(
                    "11:00 AM-1:00 PM",
                    &["Tuesday", "Wednesday", "Thursday"],
                    "3-5 times per week",
                    SCROLL_SECONDARY,
                    "Prioritizes recent posts; engagement in first hour determines reach",
                    "Late night (12-6 AM), Sunday evening",
                ),
            },
            PlatformPosting {
                platform: Platform::InstagramReels,
                window: window(
                    "9:00 AM, 12:00 PM, 7:00 PM",
                    &["Wednesday", "Thursday", "Friday"],
                    "daily",
                    SCROLL_SECONDARY,
                    "Focuses on shares and saves; content is tested with a small audience first",
                    "Late night (12-6 AM), Sunday evening",
                ),
            },
            PlatformPosting {
                platform: Platform::TikTok,
                window: window(
                    "7:00-9:00 PM",
                    &["Tuesday", "Thursday", "Friday"],
                    "1-3 times daily",
                    SCROLL_SECONDARY,
                    "Strong early engagement (first 1-2 hours) signals virality",
                    "Very early morning (3-6 AM)",
                ),
            },
            PlatformPosting {
                platform: Platform::Twitter,
                window: window(
                    "8:00-10:00 AM, 6:00-9:00 PM",
                    &["Monday", "Tuesday", "Wednesday"],
                    "3-5 times daily",
                    "Morning (8-9 AM), noon (12 PM), evening (6-8 PM)",
                    "Real-time platform; recency is key",
                    "No strict avoid times (real-time platform)",
                ),
            },
            PlatformPosting {
                platform: Platform::LinkedIn,
                window: window(
                    "8:00-10:00 AM, 12:00 PM",
                    &["Tuesday", "Wednesday", "Thursday"],
                    "2-3 times per week",
                    "Early morning (7-8 AM) before work, lunch hour (12-1 PM)",
                    "Business-hours engagement weighted heavily; B2B audience active 8 AM-5 PM",
                    "Weekends, late evening after 7 PM",
                ),
            },
            PlatformPosting {
                platform: Platform::Facebook,
                window: window(
                    "1:00-3:00 PM",
                    &["Wednesday", "Thursday", "Friday"],
                    "3-5 times per week",
                    "Morning (8-10 AM), afternoon (2-4 PM), evening (7-9 PM)",
                    "Meaningful interactions prioritized; post when the audience is most active",
                    "Late night (11 PM-6 AM)",
                ),
            },
            PlatformPosting {
                platform: Platform::Newsletter,
                window: window(
                    "6:00-10:00 AM",
                    &["Tuesday", "Thursday"],
                    "weekly",
                    "Early afternoon (1-3 PM)",
                    "Inbox placement favors consistent send times and steady open rates",
                    "Weekends, Friday afternoon",
                ),
            },
        ];

        let mut business = niche(
            &["business", "finance", "entrepreneur", "marketing", "b2b"],
            "7:00-9:00 AM, 12:00-1:00 PM",
            &["Monday", "Tuesday", "Wednesday", "Thursday"],
            "Business audience active during work hours and lunch breaks",
        );
        business.except = vec![Platform::LinkedIn];

        Self {
            platforms,
            fallback: window(
                "9:00 AM-12:00 PM, 5:00-7:00 PM",
                &["Tuesday", "Wednesday", "Thursday"],
                "3-4 times per week",
                "Morning (8-10 AM), afternoon (2-4 PM), evening (7-9 PM)",
                "Post when your audience is most active",
                "Late night (12-6 AM) and early Monday mornings",
            ),
            niche_schedules: vec![
                business,
                niche(
                    &["gaming", "entertainment", "comedy", "meme"],
                    "6:00-11:00 PM",
                    &["Friday", "Saturday", "Sunday"],
                    "Entertainment audience peaks during leisure hours and weekends",
                ),
                niche(
                    &["education", "tutorial", "learning", "course"],
                    "6:00-8:00 AM, 7:00-9:00 PM",
                    &["Monday", "Tuesday", "Wednesday", "Sunday"],
                    "Learners active before work and during evening study hours",
                ),
                niche(
                    &["fitness", "health", "workout", "wellness"],
                    "5:00-7:00 AM, 5:00-7:00 PM",
                    &["Monday", "Tuesday", "Wednesday", "Thursday"],
                    "Fitness audience active around morning and evening workouts",
                ),
                niche(
                    &["tech", "ai", "automation", "software", "coding"],
                    "10:00 AM-12:00 PM, 8:00-10:00 PM",
                    &["Tuesday", "Wednesday", "Thursday"],
                    "Tech audience active mid-morning and late evening",
                ),
            ],
            audiences: vec![
                zone(
                    &["eu", "europe"],
                    "CET (Central European Time)",
                    6.0,
                    "European audience peaks during lunch (12-2 PM CET) and evening (8-10 PM CET)",
                ),
                zone(
                    &["uk"],
                    "GMT (UK Time)",
                    5.0,
                    "UK audience peaks at lunch and from 7 PM GMT",
                ),
                zone(
                    &["asia", "india"],
                    "IST (India Time)",
                    10.5,
                    "Indian audience peaks late morning and from 8 PM IST",
                ),
                zone(
                    &["australia"],
                    "AEST (Australian Eastern Time)",
                    15.0,
                    "Australian audience peaks at breakfast and from 7 PM AEST",
                ),
                zone(
                    &["global"],
                    "UTC (Universal Time)",
                    5.0,
                    "Global audience: 12-2 PM UTC reaches US mornings and EU afternoons",
                ),
            ],
            default_timezone: "EST (US Eastern Time)".to_string(),
            default_activity:
                "US audience most active during lunch (12-1 PM EST) and evening (7-9 PM EST)"
                    .to_string(),
        }
    }
}

/// Load heuristic constants from a YAML file and validate them.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_heuristics(path: &Path) -> Result<HeuristicsConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: HeuristicsConfig = serde_yaml::from_str(&content)?;
    validate_heuristics(&config)?;
    Ok(config)
}

fn validate_heuristics(config: &HeuristicsConfig) -> Result<(), ConfigError> {
    let band = config.trend_band;
    if band.declining_factor <= 0.0 || band.declining_factor > band.rising_factor {
        return Err(ConfigError::Validation(format!(
            "trend band must satisfy 0 < declining_factor <= rising_factor (got {} / {})",
            band.declining_factor, band.rising_factor
        )));
    }

    let engagement = &config.engagement;
    if engagement.min_rate <= 0.0 || engagement.min_rate > engagement.max_rate {
        return Err(ConfigError::Validation(format!(
            "engagement rate bounds must satisfy 0 < min_rate <= max_rate (got {} / {})",
            engagement.min_rate, engagement.max_rate
        )));
    }

    if engagement.range_low_factor > 1.0 || engagement.range_high_factor < 1.0 {
        return Err(ConfigError::Validation(
            "engagement range factors must bracket 1.0".to_string(),
        ));
    }

    if engagement.quality.cap < 1.0 {
        return Err(ConfigError::Validation(
            "quality multiplier cap must be at least 1.0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_band_matches_ten_percent_dead_band() {
        let band = TrendBand::default();
        assert!((band.rising_factor - 1.1).abs() < f64::EPSILON);
        assert!((band.declining_factor - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn baseline_lookup_falls_back_to_default() {
        let engagement = EngagementConstants::default();
        assert!((engagement.baseline_for(Platform::TikTok) - 5.5).abs() < f64::EPSILON);
        assert!((engagement.baseline_for(Platform::Newsletter) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn every_platform_has_a_posting_window() {
        let posting = PostingConstants::default();
        for platform in Platform::ALL {
            assert!(
                posting.platforms.iter().any(|p| p.platform == platform),
                "missing posting window for {platform}"
            );
        }
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let yaml = "trend_band:\n  rising_factor: 1.2\n";
        let config: HeuristicsConfig = serde_yaml::from_str(yaml).unwrap();
        assert!((config.trend_band.rising_factor - 1.2).abs() < f64::EPSILON);
        assert!((config.trend_band.declining_factor - 0.9).abs() < f64::EPSILON);
        assert_eq!(config.engagement, EngagementConstants::default());
    }

    #[test]
    fn inverted_band_fails_validation() {
        let config = HeuristicsConfig {
            trend_band: TrendBand {
                rising_factor: 0.8,
                declining_factor: 1.2,
            },
            ..HeuristicsConfig::default()
        };
        let result = validate_heuristics(&config);
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("trend band")),
            "expected Validation error, got: {result:?}"
        );
    }

    #[test]
    fn defaults_pass_validation() {
        assert!(validate_heuristics(&HeuristicsConfig::default()).is_ok());
    }

    #[test]
    fn load_heuristics_reports_missing_file() {
        let result = load_heuristics(Path::new("/nonexistent/heuristics.yaml"));
        assert!(
            matches!(result, Err(ConfigError::FileIo { .. })),
            "expected FileIo error, got: {result:?}"
        );
    }
}
