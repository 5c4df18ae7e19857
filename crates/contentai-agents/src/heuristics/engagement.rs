use std::fmt;

use contentai_core::heuristics::EngagementConstants;
use contentai_core::Platform;
use serde::Serialize;

use super::mentions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngagementInput {
    pub topic: String,
    pub niche: String,
    pub platform: Platform,
    pub has_hook: bool,
    pub has_visuals: bool,
    pub duration_secs: Option<u32>,
    /// Recent videos found for the topic, when a video search was run.
    pub recent_video_count: Option<usize>,
}

impl EngagementInput {
    #[must_use]
    pub fn new(topic: impl Into<String>, platform: Platform) -> Self {
        Self {
            topic: topic.into(),
            niche: String::new(),
            platform,
            has_hook: true,
            has_visuals: true,
            duration_secs: None,
            recent_video_count: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementTier {
    NeedsWork,
    Good,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementEstimate {
    pub platform: Platform,
    pub niche: String,
    pub baseline: f64,
    pub niche_multiplier: f64,
    pub trend_score: f64,
    pub quality_score: f64,
    /// Point estimate in percent, clamped to the configured bounds.
    pub rate: f64,
    pub low: f64,
    pub high: f64,
    pub tier: EngagementTier,
    pub has_hook: bool,
    pub has_visuals: bool,
}

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Estimate an engagement rate range for a piece of content.
#[must_use]
pub fn estimate_engagement(
    input: &EngagementInput,
    constants: &EngagementConstants,
) -> EngagementEstimate {
    let baseline = constants.baseline_for(input.platform);
    let niche_multiplier = niche_multiplier(&input.niche, constants);
    let trend_score = trend_score(input, constants);
    let quality_score = quality_score(input, constants);

    let rate = (baseline * niche_multiplier * trend_score * quality_score)
        .clamp(constants.min_rate, constants.max_rate);

    let tier = if rate < constants.low_rate_threshold {
        EngagementTier::NeedsWork
    } else if rate < constants.high_rate_threshold {
        EngagementTier::Good
    } else {
        EngagementTier::High
    };

    EngagementEstimate {
        platform: input.platform,
        niche: input.niche.clone(),
        baseline,
        niche_multiplier,
        trend_score,
        quality_score,
        rate,
        low: one_decimal(rate * constants.range_low_factor),
        high: one_decimal(rate * constants.range_high_factor),
        tier,
        has_hook: input.has_hook,
        has_visuals: input.has_visuals,
    }
}

fn niche_multiplier(niche: &str, constants: &EngagementConstants) -> f64 {
    constants
        .niche_multipliers
        .iter()
        .find(|group| group.keywords.iter().any(|k| mentions(niche, k)))
        .map_or(1.0, |group| group.multiplier)
}

fn trend_score(input: &EngagementInput, constants: &EngagementConstants) -> f64 {
    let trend = &constants.trend;

    if let Some(count) = input.recent_video_count {
        return if count >= trend.strong_video_count {
            trend.strong
        } else if count >= trend.moderate_video_count {
            trend.moderate
        } else {
            trend.weak
        };
    }

    let trending = trend
        .trending_keywords
        .iter()
        .filter(|k| mentions(&input.topic, k) || mentions(&input.niche, k))
        .count();
    let evergreen = trend
        .evergreen_keywords
        .iter()
        .any(|k| mentions(&input.topic, k));

    match trending {
        0 if evergreen => trend.evergreen,
        0 => trend.neutral,
        1 => trend.single_trending,
        _ => trend.multi_trending,
    }
}

fn quality_score(input: &EngagementInput, constants: &EngagementConstants) -> f64 {
    let quality = &constants.quality;
    let mut score = 1.0;

    if input.has_hook {
        score *= quality.hook;
    }
    if input.has_visuals {
        score *= quality.visuals;
    }
    if let Some(secs) = input.duration_secs {
        let window = if input.platform.is_short_form() {
            Some(quality.short_form_secs)
        } else if input.platform == Platform::YouTube {
            Some(quality.long_form_secs)
        } else {
            None
        };
        if window.is_some_and(|(min, max)| (min..=max).contains(&secs)) {
            score *= quality.duration_fit;
        }
    }

    f64::min(score, quality.cap)
}

impl fmt::Display for EngagementEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let niche = if self.niche.is_empty() {
            "general content"
        } else {
            &self.niche
        };

        writeln!(
            f,
            "Estimated Engagement Rate: {:.1}% - {:.1}%\n",
            self.low, self.high
        )?;
        writeln!(f, "Breakdown:")?;
        writeln!(
            f,
            "- Platform baseline ({}): {}%",
            self.platform, self.baseline
        )?;
        writeln!(f, "- Niche multiplier ({niche}): {}x", self.niche_multiplier)?;
        writeln!(f, "- Topic trend score: {}x", self.trend_score)?;
        writeln!(f, "- Content quality score: {}x", self.quality_score)?;

        if self.has_hook {
            writeln!(f, "- Strong hook present")?;
        }
        if self.has_visuals {
            writeln!(f, "- Quality visuals included")?;
        }

        #[allow(clippy::cast_possible_truncation)]
        let delta = ((self.rate / self.baseline - 1.0) * 100.0) as i64;
        let side = if self.rate > self.baseline {
            "above"
        } else {
            "below"
        };
        writeln!(
            f,
            "\nBenchmark: {} average for {niche} is {}%; this content scores {}% {side} it.",
            self.platform,
            self.baseline,
            delta.abs()
        )?;

        let advice = match self.tier {
            EngagementTier::NeedsWork => {
                "Needs work: strengthen the hook, add trending elements, and optimize posting time."
            }
            EngagementTier::Good => {
                "Good potential: A/B test thumbnails and work in trending sounds or topics."
            }
            EngagementTier::High => {
                "High potential: post consistently, reply to comments, and cross-promote."
            }
        };
        write!(f, "{advice}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn multiplies_factors_and_reports_range() {
        let constants = EngagementConstants::default();
        let mut input = EngagementInput::new("rust tips", Platform::YouTube);
        input.niche = "education".to_string();

        let estimate = estimate_engagement(&input, &constants);
        // 3.5 baseline, 1.2 education, 1.1 evergreen ("tips"), 1.25 * 1.15 quality
        assert!(approx(estimate.niche_multiplier, 1.2));
        assert!(approx(estimate.trend_score, 1.1));
        assert!(approx(estimate.quality_score, 1.25 * 1.15));
        let rate = 3.5 * 1.2 * 1.1 * 1.25 * 1.15;
        assert!(approx(estimate.rate, rate));
        assert!(approx(estimate.low, one_decimal(rate * 0.85)));
        assert!(approx(estimate.high, one_decimal(rate * 1.15)));
        assert_eq!(estimate.tier, EngagementTier::High);
    }

    #[test]
    fn video_count_overrides_keyword_trend_score() {
        let constants = EngagementConstants::default();
        let mut input = EngagementInput::new("new ai hack", Platform::TikTok);
        assert!(approx(trend_score(&input, &constants), 1.3));

        input.recent_video_count = Some(8);
        assert!(approx(trend_score(&input, &constants), 1.3));
        input.recent_video_count = Some(5);
        assert!(approx(trend_score(&input, &constants), 1.15));
        input.recent_video_count = Some(2);
        assert!(approx(trend_score(&input, &constants), 0.95));
    }

    #[test]
    fn rate_is_clamped() {
        let mut constants = EngagementConstants::default();
        constants.max_rate = 4.0;
        let mut input = EngagementInput::new("comedy", Platform::TikTok);
        input.niche = "comedy".to_string();
        let estimate = estimate_engagement(&input, &constants);
        assert!(approx(estimate.rate, 4.0));

        let mut quiet = EngagementInput::new("x", Platform::Twitter);
        quiet.has_hook = false;
        quiet.has_visuals = false;
        let estimate = estimate_engagement(&quiet, &EngagementConstants::default());
        assert!(approx(estimate.rate, 0.9));
        assert_eq!(estimate.tier, EngagementTier::NeedsWork);
    }

    #[test]
    fn duration_fit_depends_on_platform() {
        let constants = EngagementConstants::default();
        let mut short = EngagementInput::new("x", Platform::TikTok);
        short.has_hook = false;
        short.has_visuals = false;
        short.duration_secs = Some(30);
        assert!(approx(quality_score(&short, &constants), 1.1));

        short.duration_secs = Some(600);
        assert!(approx(quality_score(&short, &constants), 1.0));

        let mut long = short.clone();
        long.platform = Platform::YouTube;
        assert!(approx(quality_score(&long, &constants), 1.1));

        long.platform = Platform::LinkedIn;
        assert!(approx(quality_score(&long, &constants), 1.0));
    }

    #[test]
    fn quality_is_capped() {
        let mut constants = EngagementConstants::default();
        constants.quality.cap = 1.3;
        let input = EngagementInput::new("x", Platform::YouTube);
        assert!(approx(quality_score(&input, &constants), 1.3));
    }

    #[test]
    fn display_shows_range_and_benchmark() {
        let input = EngagementInput::new("x", Platform::LinkedIn);
        let text = estimate_engagement(&input, &EngagementConstants::default()).to_string();
        assert!(text.starts_with("Estimated Engagement Rate: "));
        assert!(text.contains("Platform baseline (LinkedIn): 2.1%"));
        assert!(text.contains("above it."));
    }
}
