use std::fmt;

use contentai_core::heuristics::PostingConstants;
use contentai_core::Platform;
use serde::Serialize;

use super::mentions;

/// When to publish on one platform for one niche and audience.
///
/// Times are the platform windows as published for a US Eastern audience;
/// `timezone` names the audience's zone and `offset_from_eastern_hours` says
/// how far it sits from Eastern, so nothing is silently shifted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostingPlan {
    pub platform: Platform,
    pub primary: String,
    pub days: Vec<String>,
    pub secondary: String,
    pub frequency: String,
    pub algorithm: String,
    pub audience_activity: String,
    pub niche_pattern: String,
    pub avoid: String,
    pub timezone: String,
    pub offset_from_eastern_hours: f32,
}

#[must_use]
pub fn recommend_posting_time(
    platform: Platform,
    niche: &str,
    audience: &str,
    constants: &PostingConstants,
) -> PostingPlan {
    let window = constants.window_for(platform);
    let mut primary = window.primary.clone();
    let mut days = window.days.clone();

    let schedule = constants
        .niche_schedules
        .iter()
        .find(|s| s.keywords.iter().any(|k| mentions(niche, k)));

    let niche_pattern = match schedule {
        Some(schedule) if !schedule.except.contains(&platform) => {
            primary.clone_from(&schedule.primary);
            days.clone_from(&schedule.days);
            schedule.note.clone()
        }
        Some(schedule) => format!("{} ({platform} schedule already fits)", schedule.note),
        None => "No niche-specific pattern; using platform defaults".to_string(),
    };

    let zone = constants
        .audiences
        .iter()
        .find(|z| z.keywords.iter().any(|k| mentions(audience, k)));

    let (timezone, offset, audience_activity) = match zone {
        Some(zone) => (
            zone.timezone.clone(),
            zone.offset_from_eastern_hours,
            zone.activity.clone(),
        ),
        None => (
            constants.default_timezone.clone(),
            0.0,
            constants.default_activity.clone(),
        ),
    };

    PostingPlan {
        platform,
        primary,
        days,
        secondary: window.secondary.clone(),
        frequency: window.frequency.clone(),
        algorithm: window.algorithm.clone(),
        audience_activity,
        niche_pattern,
        avoid: window.avoid.clone(),
        timezone,
        offset_from_eastern_hours: offset,
    }
}

impl fmt::Display for PostingPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Optimal Posting Time for {}:\n", self.platform)?;
        writeln!(f, "BEST TIMES (US Eastern): {}", self.primary)?;
        writeln!(f, "BEST DAYS: {}", self.days.join(", "))?;
        writeln!(f, "SECONDARY TIMES: {}\n", self.secondary)?;
        writeln!(f, "Analysis:")?;
        writeln!(f, "- Platform algorithm: {}", self.algorithm)?;
        writeln!(f, "- Audience activity: {}", self.audience_activity)?;
        writeln!(f, "- Niche pattern: {}\n", self.niche_pattern)?;
        writeln!(f, "Recommendations:")?;
        writeln!(f, "- Avoid: {}", self.avoid)?;
        writeln!(f, "- Consistency: post at the same time, {}", self.frequency)?;
        if self.offset_from_eastern_hours.abs() < f32::EPSILON {
            write!(f, "\nAudience timezone: {}", self.timezone)
        } else {
            write!(
                f,
                "\nAudience timezone: {} ({:+} hours from US Eastern)",
                self.timezone, self.offset_from_eastern_hours
            )
        }
    }
}
