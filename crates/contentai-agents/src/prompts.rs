//! Instructions and expected-output text for each crew step.
//!
//! Everything here is plain string assembly. Numbers that reach a prompt come
//! from collected records and are written with their literal values.

use std::fmt::Write as _;

use contentai_collect::{thousands, CollectedSnapshot};
use contentai_core::Platform;

/// Instructions plus the description of what a step must hand back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepBrief {
    pub instructions: String,
    pub expected_output: String,
}

impl StepBrief {
    fn new(instructions: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            expected_output: expected_output.into(),
        }
    }
}

/// Format conventions a script must follow on one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
    /// Heading naming the format, e.g. "YOUTUBE (long-form)".
    pub heading: &'static str,
    pub duration: &'static str,
    /// Where the hook lives and how long it has.
    pub hook_window: &'static str,
    pub tone: &'static str,
    pub pacing: &'static str,
    pub structure: &'static [&'static str],
}

const YOUTUBE: PlatformProfile = PlatformProfile {
    heading: "YOUTUBE (long-form)",
    duration: "12-20 minutes",
    hook_window: "first 5-10 seconds",
    tone: "Conversational authority, like explaining to a smart friend",
    pacing: "Change energy every 2-3 minutes and use pattern interrupts",
    structure: &[
        "0:00-0:30 hook with a real metric and a promise",
        "0:30-2:00 introduction and why this matters now (use the trend data)",
        "2:00-6:00 problem deep-dive, naming what the top videos miss",
        "6:00-12:00 solution with a step-by-step breakdown",
        "12:00-16:00 real examples or case studies",
        "16:00-18:00 common mistakes to avoid",
        "18:00-20:00 action steps and call to action",
    ],
};

const YOUTUBE_SHORTS: PlatformProfile = PlatformProfile {
    heading: "YOUTUBE SHORTS",
    duration: "30-60 seconds",
    hook_window: "first 2 seconds",
    tone: "Direct and energetic",
    pacing: "One idea per beat, no pauses",
    structure: &[
        "0-2 sec: the real metric as a pattern interrupt",
        "2-10 sec: the problem or opportunity",
        "10-50 sec: three quick insights",
        "50-60 sec: loop back to the hook or a call to action",
    ],
};

const REELS: PlatformProfile = PlatformProfile {
    heading: "INSTAGRAM REELS",
    duration: "30-60 seconds",
    hook_window: "first 2 seconds",
    tone: "Fast and punchy, like texting a friend something exciting",
    pacing: "Rapid cuts with bold text overlays for key stats",
    structure: &[
        "0-2 sec: pattern interrupt with a real stat",
        "2-10 sec: the problem or opportunity",
        "10-40 sec: three rapid-fire insights",
        "40-60 sec: call to action with urgency",
    ],
};

const TIKTOK: PlatformProfile = PlatformProfile {
    heading: "TIKTOK",
    duration: "21-45 seconds",
    hook_window: "first 2 seconds",
    tone: "Unfiltered and authentic with slightly chaotic energy",
    pacing: "Extremely fast; 3-5 seconds per point",
    structure: &[
        "0-2 sec: shocking stat or question",
        "2-5 sec: \"here's what I found\"",
        "5-35 sec: 3-5 rapid points",
        "35-45 sec: loop back to the hook or call to action",
    ],
};

const NEWSLETTER: PlatformProfile = PlatformProfile {
    heading: "NEWSLETTER",
    duration: "500-800 words (3-5 minute read)",
    hook_window: "subject line and opening paragraph",
    tone: "Professional but personal, data-informed storytelling",
    pacing: "Scannable with subheadings, bullets, and bold key figures",
    structure: &[
        "Subject: curiosity plus a real number",
        "Opening: personal hook with a data point",
        "Section 1: the insight from the research",
        "Section 2: why it matters (trend context)",
        "Section 3: actionable takeaways",
        "Close: personal sign-off and call to action",
    ],
};

const LINKEDIN: PlatformProfile = PlatformProfile {
    heading: "LINKEDIN",
    duration: "150-300 words",
    hook_window: "first two lines, before the \"see more\" cut",
    tone: "Professional and first-person, with a clear point of view",
    pacing: "Short paragraphs of one or two sentences",
    structure: &[
        "Hook line with a real figure",
        "Context: what the data shows",
        "Three lessons or observations",
        "Question that invites comments",
    ],
};

const TWITTER: PlatformProfile = PlatformProfile {
    heading: "TWITTER/X THREAD",
    duration: "5-8 posts, each under 280 characters",
    hook_window: "first post",
    tone: "Sharp and opinionated",
    pacing: "One claim per post",
    structure: &[
        "Post 1: hook with a real number",
        "Posts 2-6: one insight each, citing the data",
        "Final post: summary and call to action",
    ],
};

const FACEBOOK: PlatformProfile = PlatformProfile {
    heading: "FACEBOOK",
    duration: "60-120 seconds of video or 100-250 words",
    hook_window: "first 3 seconds or first line",
    tone: "Warm and community-minded",
    pacing: "Relaxed, with room for a story",
    structure: &[
        "Hook with a real figure",
        "Short story or example",
        "Key takeaway",
        "Question that invites shares and comments",
    ],
};

impl PlatformProfile {
    #[must_use]
    pub fn for_platform(platform: Platform) -> PlatformProfile {
        match platform {
            Platform::YouTube => YOUTUBE,
            Platform::YouTubeShorts => YOUTUBE_SHORTS,
            Platform::Instagram | Platform::InstagramReels => REELS,
            Platform::TikTok => TIKTOK,
            Platform::Newsletter => NEWSLETTER,
            Platform::LinkedIn => LINKEDIN,
            Platform::Twitter => TWITTER,
            Platform::Facebook => FACEBOOK,
        }
    }

    fn render(&self) -> String {
        let mut out = format!(
            "FOR {}:\nLENGTH: {} (mandatory)\nHOOK: {}\nTONE: {}\nPACING: {}\nSTRUCTURE:\n",
            self.heading, self.duration, self.hook_window, self.tone, self.pacing
        );
        for beat in self.structure {
            let _ = writeln!(out, "- {beat}");
        }
        out
    }
}

/// Literal figures from the snapshot the hook must draw on.
///
/// When a source is missing the block says so, so the writer has nothing to
/// invent a number from.
#[must_use]
pub fn real_metrics(snapshot: &CollectedSnapshot) -> String {
    let mut out = String::from("REAL METRICS TO USE IN THE HOOK:\n");

    match snapshot.videos().first() {
        Some(video) => {
            let _ = writeln!(
                out,
                "- Top video \"{}\" has {} views\n- Channel: {}",
                video.title,
                thousands(video.view_count),
                video.channel_name
            );
        }
        None => out.push_str("- No video data was collected. Do not cite a view count.\n"),
    }

    match snapshot.trends().first() {
        Some(trend) => {
            let _ = writeln!(
                out,
                "- Search interest: {}/100 ({})",
                trend.current_interest, trend.direction
            );
            if trend.rising_queries.is_empty() {
                out.push_str("- Rising queries: none reported\n");
            } else {
                let top: Vec<&str> = trend
                    .rising_queries
                    .iter()
                    .take(3)
                    .map(String::as_str)
                    .collect();
                let _ = writeln!(out, "- Rising queries: {}", top.join(", "));
            }
        }
        None => out.push_str(
            "- No search-interest data was collected. Do not cite an interest score.\n",
        ),
    }

    out
}

const HUMAN_VOICE: &str = "Write like a person talking: use contractions, vary sentence \
length, use \"you\" language, and end with a call to action that feels like a natural next step.";

/// Gap analysis over a grounded snapshot. The snapshot itself arrives as
/// the pipeline's initial context.
#[must_use]
pub fn gap_analysis() -> StepBrief {
    StepBrief::new(
        "Analyze the collected data above and find content opportunities.\n\n\
         1. Look at the top videos: what they cover, their view counts, and the \
         patterns in their titles.\n\
         2. Identify gaps: which \"People Also Ask\" questions go unanswered, which \
         angles are missing, and what could differentiate new content.\n\
         3. Check the trends: whether interest is rising or declining and which \
         related queries are growing.\n\n\
         Cite exact figures from the data. If a section says \"No data\", say the \
         data is unavailable instead of estimating it.",
        "A structured analysis with:\n\
         - The top 3 competitor videos and what they cover\n\
         - The top 3 specific content gaps\n\
         - A recommended angle for the script\n\
         - Key talking points grounded in the trends and questions",
    )
}

/// Platform script informed by the gap analysis and the snapshot's real metrics.
#[must_use]
pub fn smart_script(platform: Platform, snapshot: &CollectedSnapshot) -> StepBrief {
    let profile = PlatformProfile::for_platform(platform);
    let instructions = format!(
        "Using the analysis above, write a {platform} script about \"{topic}\".\n\n\
         {profile}\n{metrics}\n\
         REQUIREMENTS:\n\
         1. The hook must contain one real number from the metrics above. No generic hooks.\n\
         2. Name at least one top video and say what it misses.\n\
         3. Answer at least one \"People Also Ask\" question from the data.\n\
         4. State whether interest is rising, declining, or stable, and use the rising \
         queries where relevant.\n\
         5. {HUMAN_VOICE}\n\n\
         Every figure in the script must appear in the collected data.",
        topic = snapshot.topic(),
        profile = profile.render(),
        metrics = real_metrics(snapshot),
    );
    let expected = format!(
        "A complete {platform} script with:\n\
         - A hook containing a real metric from the data\n\
         - A {duration} structure\n\
         - Main content addressing the gaps from the analysis\n\
         - Specific differentiation from the top videos\n\
         - Platform guidelines, visual suggestions, and thumbnail ideas",
        duration = profile.duration,
    );
    StepBrief::new(instructions, expected)
}

#[must_use]
pub fn find_topics(niche: &str, topic: Option<&str>) -> StepBrief {
    let instructions = match topic {
        Some(topic) => format!(
            "Using the video and question data provided, find the best-performing content \
             about \"{topic}\" in the {niche} niche. Propose 5 content ideas built on it."
        ),
        None => format!(
            "Using the video and question data provided, find 5 trending topics in the \
             {niche} niche with viral potential."
        ),
    };
    StepBrief::new(
        format!(
            "{instructions}\nCopy view, like, and comment figures exactly as they appear in \
             the data; leave them out when the data has none."
        ),
        "Five content ideas, each with a title, why it works, key angles to cover, and \
         the real analytics behind it",
    )
}

#[must_use]
pub fn research(topic: &str) -> StepBrief {
    StepBrief::new(
        format!(
            "Research \"{topic}\" using the search results provided. Gather key facts, \
             statistics, expert opinions, and audience pain points. Attribute each statistic \
             to the result it came from and list those links as sources."
        ),
        "A research document with key points, statistics, quotes, hooks, and audience pain points",
    )
}

#[must_use]
pub fn write_script(topic: &str, platform: Platform, research_context: Option<&str>) -> StepBrief {
    let profile = PlatformProfile::for_platform(platform);
    let research = research_context.map_or_else(
        || "No research context was supplied; keep claims general and avoid statistics.".to_string(),
        |ctx| format!("Research context:\n{ctx}"),
    );
    StepBrief::new(
        format!(
            "Write an engaging {platform} script about \"{topic}\".\n\n{research}\n\n{profile}\n{HUMAN_VOICE}",
            profile = profile.render(),
        ),
        format!(
            "A ready-to-use {platform} script with a hook for the {window}, an introduction, \
             main content, key insights, transitions, a call to action, and a closing, plus \
             platform guidelines, visual suggestions, thumbnail ideas, and formatting notes",
            window = profile.hook_window,
        ),
    )
}

/// Final packaging step of the full crew.
#[must_use]
pub fn social_package(topic: &str, platform: Platform) -> StepBrief {
    StepBrief::new(
        format!(
            "Package the script above for {platform}. Keep the script, then add a caption, \
             hashtags, a visual description, the post type, the best posting time, and the \
             estimated engagement rate for \"{topic}\". Take hashtags, posting time, and \
             engagement figures from the tool data provided instead of inventing them."
        ),
        "The complete script plus caption, hashtags, visual description, post type, best \
         posting time, and estimated engagement rate",
    )
}

#[must_use]
pub fn seo(topic: &str) -> StepBrief {
    StepBrief::new(
        format!(
            "Create an SEO package for content about \"{topic}\" from the search, interest, \
             and hashtag data provided.\n\n\
             1. Keywords: a primary keyword, 5-10 secondary keywords, and long-tail keywords \
             drawn from related searches and questions.\n\
             2. Titles: 5 options under 60 characters that include the primary keyword.\n\
             3. Description: a template with keyword placement and a call to action.\n\
             4. Hashtags: use the generated set.\n\
             5. Competition: what the top results cover and where the gaps are.\n\n\
             Quote search interest only as reported; do not estimate search volumes."
        ),
        "An SEO package with keywords, 5 ranked title options, a description template, \
         hashtags, and a competition summary",
    )
}

#[must_use]
pub fn trend_analysis(keywords: &[String]) -> StepBrief {
    StepBrief::new(
        format!(
            "Analyze trends for: {}.\n\n\
             Use the search-interest, forum, short-post, and news data provided. Identify \
             rising keywords, recurring pain points and questions, and recent news worth \
             covering. Where a source is marked unavailable, say so and rely on the others.",
            keywords.join(", ")
        ),
        "A trend report with the top trending topics and the data behind each, rising \
         keywords, community pain points, news worth covering, and prioritized content ideas",
    )
}

#[must_use]
pub fn competitor_analysis(channels: &[String]) -> StepBrief {
    StepBrief::new(
        format!(
            "Compare these channels: {}.\n\n\
             Use the channel statistics and recent uploads provided. Identify each channel's \
             best-performing recent content, patterns in titles and formats, gaps none of them \
             cover, and ways to differentiate.",
            channels.join(", ")
        ),
        "A competitor report with per-channel strategy notes backed by the statistics, \
         content gaps, differentiation strategies, and specific content ideas",
    )
}

#[must_use]
pub fn prediction(keywords: &[String]) -> StepBrief {
    StepBrief::new(
        format!(
            "Forecast where interest in {} is heading.\n\n\
             Base every prediction on the direction of current search interest and the \
             recent news provided. Give near-term (1-3 months) and medium-term (3-6 months) \
             predictions with a confidence level and the signal each rests on.",
            keywords.join(", ")
        ),
        "A prediction report with predicted trends, confidence levels, timing, early \
         content opportunities, and keywords to target",
    )
}
