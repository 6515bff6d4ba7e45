//! YouTube embed URL normalization
//!
//! Turns any recognized YouTube link into a player-loadable embed URL.
//! Anything else is passed through untouched.

use once_cell::sync::Lazy;
use regex::Regex;

/// Base of every generated embed URL
pub const EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Query parameters shared by every embed profile
const BASE_PARAMS: &str = "autoplay=1&rel=0";

/// Matches watch, embed, `/v/`, `/e/`, short and channel-style links.
/// The capture is the 11-character video id.
static YOUTUBE_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .expect("static YouTube pattern is valid")
});

/// Which screen the embed URL is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbedProfile {
    /// Trailer modal: base parameters only
    #[default]
    Trailer,
    /// Full watch screen, with or without the native YouTube controls
    Watch { controls: bool },
}

impl EmbedProfile {
    /// Extra query parameters appended after the base ones
    pub fn suffix(&self) -> &'static str {
        match self {
            EmbedProfile::Trailer => "",
            EmbedProfile::Watch { controls: false } => "&controls=0&showinfo=0&modestbranding=1",
            EmbedProfile::Watch { controls: true } => "&controls=1&showinfo=0&modestbranding=1",
        }
    }
}

/// Extract the 11-character video id from a YouTube URL
pub fn extract_video_id(input: &str) -> Option<&str> {
    YOUTUBE_ID
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Build the embed URL for `input`, or return `input` unchanged when it is
/// not a recognized YouTube link
pub fn embed_url(input: &str, profile: EmbedProfile) -> String {
    match extract_video_id(input) {
        Some(id) => format!("{}{}?{}{}", EMBED_BASE, id, BASE_PARAMS, profile.suffix()),
        None => input.to_string(),
    }
}
