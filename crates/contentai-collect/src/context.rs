//! Text rendering of collected data for prompt injection.
//!
//! Every number written here is the literal value held in a record. Counts get
//! thousands separators; nothing is rounded, estimated, or numbered.

use std::fmt::Write as _;

use crate::snapshot::CollectedSnapshot;
use crate::types::{
    ChannelReport, ForumPost, MicroPost, NewsItem, SearchPage, TrendRecord, VideoRecord,
};

pub const MAX_CONTEXT_VIDEOS: usize = 10;
pub const MAX_CONTEXT_RISING_QUERIES: usize = 5;
pub const MAX_CONTEXT_QUESTIONS: usize = 10;

/// Render a snapshot as the grounding block handed to generation steps.
///
/// Sections appear in a fixed order: header, videos, trends, questions, and
/// the collection issues (only when there are any). Empty sections render a
/// "No data" marker line instead of being dropped.
#[must_use]
pub fn to_context(snapshot: &CollectedSnapshot) -> String {
    let mut ctx = String::new();

    let _ = writeln!(ctx, "=== REAL DATA COLLECTED ===");
    let _ = writeln!(ctx, "Topic: {}", snapshot.topic());
    let _ = writeln!(ctx, "Platform: {}", snapshot.platform());
    let _ = writeln!(
        ctx,
        "Collected: {}",
        snapshot.collected_at().format("%Y-%m-%d %H:%M:%S UTC")
    );
    ctx.push('\n');

    if snapshot.videos().is_empty() {
        ctx.push_str("### TOP VIDEOS: No data (see collection issues)\n");
    } else {
        ctx.push_str("### TOP VIDEOS (REAL):\n");
        for video in snapshot.videos().iter().take(MAX_CONTEXT_VIDEOS) {
            write_video(&mut ctx, video);
        }
    }

    ctx.push('\n');
    if snapshot.trends().is_empty() {
        ctx.push_str("### SEARCH TRENDS: No data\n");
    } else {
        ctx.push_str("### SEARCH TRENDS (REAL):\n");
        for trend in snapshot.trends() {
            write_trend(&mut ctx, trend);
        }
    }

    ctx.push('\n');
    if snapshot.questions().is_empty() {
        ctx.push_str("### PEOPLE ALSO ASK: No data\n");
    } else {
        ctx.push_str("### PEOPLE ALSO ASK (REAL):\n");
        for question in snapshot.questions().iter().take(MAX_CONTEXT_QUESTIONS) {
            let _ = writeln!(ctx, "- {question}");
        }
    }

    if !snapshot.errors().is_empty() {
        ctx.push_str("\n### DATA COLLECTION ISSUES:\n");
        for error in snapshot.errors() {
            let _ = writeln!(ctx, "- {error}");
        }
    }

    ctx
}

impl CollectedSnapshot {
    /// See [`to_context`].
    #[must_use]
    pub fn to_context(&self) -> String {
        to_context(self)
    }
}

/// Format a count with comma thousands separators (`150000` -> `150,000`).
#[must_use]
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn write_trend(ctx: &mut String, trend: &TrendRecord) {
    let _ = writeln!(ctx, "Keyword: \"{}\"", trend.keyword);
    let _ = writeln!(ctx, "- Current interest: {}", trend.current_interest);
    let _ = writeln!(ctx, "- Average interest: {}", trend.average_interest);
    let _ = writeln!(ctx, "- Direction: {}", trend.direction);
    let rising = if trend.rising_queries.is_empty() {
        "None".to_string()
    } else {
        trend
            .rising_queries
            .iter()
            .take(MAX_CONTEXT_RISING_QUERIES)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let _ = writeln!(ctx, "- Rising queries: {rising}");
}

fn write_video(ctx: &mut String, video: &VideoRecord) {
    let _ = writeln!(ctx, "- \"{}\"", video.title);
    let _ = writeln!(ctx, "  Channel: {}", video.channel_name);
    let _ = writeln!(
        ctx,
        "  Views: {} | Likes: {}",
        thousands(video.view_count),
        thousands(video.like_count)
    );
    let _ = writeln!(ctx, "  Published: {}", video.publish_date);
    let _ = writeln!(ctx, "  URL: {}", video.url);
}

#[must_use]
pub fn render_videos(heading: &str, videos: &[VideoRecord]) -> String {
    let mut out = String::new();
    if videos.is_empty() {
        let _ = writeln!(out, "### {heading}: No data");
        return out;
    }
    let _ = writeln!(out, "### {heading} (REAL):");
    for video in videos.iter().take(MAX_CONTEXT_VIDEOS) {
        write_video(&mut out, video);
    }
    out
}

#[must_use]
pub fn render_trends(trends: &[TrendRecord]) -> String {
    let mut out = String::new();
    if trends.is_empty() {
        out.push_str("### SEARCH TRENDS: No data\n");
        return out;
    }
    out.push_str("### SEARCH TRENDS (REAL):\n");
    for trend in trends {
        write_trend(&mut out, trend);
    }
    out
}

#[must_use]
pub fn render_search_page(page: &SearchPage) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "### WEB SEARCH: \"{}\"", page.query);
    if page.is_empty() {
        out.push_str("No data\n");
        return out;
    }
    for result in &page.results {
        let _ = writeln!(out, "- {}", result.title);
        if !result.snippet.is_empty() {
            let _ = writeln!(out, "  {}", result.snippet);
        }
        let _ = writeln!(out, "  Source: {}", result.link);
    }
    if !page.related_searches.is_empty() {
        let _ = writeln!(
            out,
            "Related searches: {}",
            page.related_searches.join(", ")
        );
    }
    if !page.questions.is_empty() {
        out.push_str("People also ask:\n");
        for question in page.questions.iter().take(MAX_CONTEXT_QUESTIONS) {
            let _ = writeln!(out, "- {question}");
        }
    }
    out
}

#[must_use]
pub fn render_news(query: &str, items: &[NewsItem]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "### NEWS: \"{query}\"");
    if items.is_empty() {
        out.push_str("No data\n");
        return out;
    }
    for item in items {
        let _ = writeln!(out, "- {} ({}, {})", item.title, item.source, item.date);
        if !item.snippet.is_empty() {
            let _ = writeln!(out, "  {}", item.snippet);
        }
        let _ = writeln!(out, "  Link: {}", item.link);
    }
    out
}

#[must_use]
pub fn render_forum_posts(query: &str, posts: &[ForumPost]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "### FORUM DISCUSSIONS: \"{query}\"");
    if posts.is_empty() {
        out.push_str("No data\n");
        return out;
    }
    for post in posts {
        let _ = writeln!(out, "- {} (r/{})", post.title, post.community);
        let _ = writeln!(
            out,
            "  Score: {} | Comments: {}",
            thousands(post.score),
            thousands(post.comment_count)
        );
        let _ = writeln!(out, "  URL: {}", post.url);
    }
    out
}

#[must_use]
pub fn render_micro_posts(query: &str, posts: &[MicroPost]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "### SOCIAL POSTS: \"{query}\"");
    if posts.is_empty() {
        out.push_str("No data\n");
        return out;
    }
    for post in posts {
        let _ = writeln!(out, "- @{}: {}", post.author, post.text.replace('\n', " "));
        let _ = writeln!(
            out,
            "  Likes: {} | Reposts: {} | Replies: {}",
            thousands(post.like_count),
            thousands(post.repost_count),
            thousands(post.reply_count)
        );
        let _ = writeln!(out, "  URL: {}", post.url);
    }
    out
}

#[must_use]
pub fn render_channel_report(report: &ChannelReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "### CHANNEL: {}", report.title);
    let _ = writeln!(out, "- Subscribers: {}", thousands(report.subscriber_count));
    let _ = writeln!(out, "- Total views: {}", thousands(report.total_views));
    let _ = writeln!(out, "- Videos published: {}", thousands(report.video_count));
    out.push_str(&render_videos("RECENT UPLOADS", &report.recent_videos));
    out
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
