use serde::{Deserialize, Serialize};

/// Publishing target a piece of content is shaped for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[serde(rename = "youtube")]
    YouTube,
    #[serde(rename = "youtube_shorts")]
    YouTubeShorts,
    Instagram,
    InstagramReels,
    #[serde(rename = "tiktok")]
    TikTok,
    Newsletter,
    Twitter,
    #[serde(rename = "linkedin")]
    LinkedIn,
    Facebook,
}

impl Platform {
    pub const ALL: [Platform; 9] = [
        Platform::YouTube,
        Platform::YouTubeShorts,
        Platform::Instagram,
        Platform::InstagramReels,
        Platform::TikTok,
        Platform::Newsletter,
        Platform::Twitter,
        Platform::LinkedIn,
        Platform::Facebook,
    ];

    /// Parse a user-supplied platform label.
    ///
    /// Case, surrounding whitespace, and `-`/`_`/space separators are ignored.
    /// Returns `None` for labels that name no known platform.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Platform> {
        let normalized: String = label
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();

        match normalized.as_str() {
            "youtube" | "yt" => Some(Platform::YouTube),
            "youtubeshorts" | "shorts" | "ytshorts" => Some(Platform::YouTubeShorts),
            "instagram" | "ig" => Some(Platform::Instagram),
            "instagramreels" | "reels" | "igreels" => Some(Platform::InstagramReels),
            "tiktok" => Some(Platform::TikTok),
            "newsletter" | "email" => Some(Platform::Newsletter),
            "twitter" | "x" => Some(Platform::Twitter),
            "linkedin" => Some(Platform::LinkedIn),
            "facebook" | "fb" => Some(Platform::Facebook),
            _ => None,
        }
    }

    /// Like [`Platform::from_label`], falling back to `YouTube` for unknown labels.
    #[must_use]
    pub fn resolve(label: &str) -> Platform {
        Platform::from_label(label).unwrap_or(Platform::YouTube)
    }

    /// Stable machine tag, matching the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::YouTube => "youtube",
            Platform::YouTubeShorts => "youtube_shorts",
            Platform::Instagram => "instagram",
            Platform::InstagramReels => "instagram_reels",
            Platform::TikTok => "tiktok",
            Platform::Newsletter => "newsletter",
            Platform::Twitter => "twitter",
            Platform::LinkedIn => "linkedin",
            Platform::Facebook => "facebook",
        }
    }

    /// Short vertical video formats, where video search is restricted to short uploads.
    #[must_use]
    pub fn is_short_form(self) -> bool {
        matches!(
            self,
            Platform::YouTubeShorts
                | Platform::Instagram
                | Platform::InstagramReels
                | Platform::TikTok
        )
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Platform::YouTube => "YouTube",
            Platform::YouTubeShorts => "YouTube Shorts",
            Platform::Instagram => "Instagram",
            Platform::InstagramReels => "Instagram Reels",
            Platform::TikTok => "TikTok",
            Platform::Newsletter => "Newsletter",
            Platform::Twitter => "Twitter/X",
            Platform::LinkedIn => "LinkedIn",
            Platform::Facebook => "Facebook",
        };
        f.write_str(label)
    }
}
