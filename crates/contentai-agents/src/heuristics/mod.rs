//! Rule-based scorers that need no network: engagement estimates, posting
//! windows, and hashtag sets. All tunable numbers come from
//! [`contentai_core::HeuristicsConfig`].

pub mod engagement;
pub mod hashtags;
pub mod posting;

pub use engagement::{estimate_engagement, EngagementEstimate, EngagementInput, EngagementTier};
pub use hashtags::{generate_hashtags, HashtagSet, MAX_HASHTAGS, MIN_HASHTAGS};
pub use posting::{recommend_posting_time, PostingPlan};

/// Whether `text` mentions `keyword`.
///
/// Single-word keywords must match a whole word so that "ai" does not match
/// "email"; phrases match as substrings.
pub(crate) fn mentions(text: &str, keyword: &str) -> bool {
    let text = text.to_lowercase();
    let keyword = keyword.to_lowercase();
    if keyword.contains(|c: char| !c.is_alphanumeric()) {
        return text.contains(&keyword);
    }
    text.split(|c: char| !c.is_alphanumeric())
        .any(|word| word == keyword)
}

#[cfg(test)]
mod tests {
    use super::mentions;

    #[test]
    fn single_words_match_whole_words_only() {
        assert!(mentions("AI automation", "ai"));
        assert!(mentions("gen-ai tools", "ai"));
        assert!(!mentions("email marketing", "ai"));
    }

    #[test]
    fn phrases_match_as_substrings() {
        assert!(mentions("How to learn Rust", "how to"));
        assert!(mentions("social media growth", "social media"));
        assert!(mentions("a how-to for beginners", "how-to"));
    }
}
