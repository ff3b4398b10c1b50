//! YouTube adapter: captions, Data API search, channel resolution.

mod feed;
mod insights;
mod models;
mod transcript;

pub use feed::{fetch_recent_videos, parse_feed};
pub use insights::VideoInsights;
pub use models::{ChannelSummary, RecentVideo, VideoCard};
pub use transcript::TranscriptFetcher;

use crate::error::{Result, TittError};
use regex::Regex;
use std::sync::OnceLock;

static VIDEO_ID_REGEX: OnceLock<Regex> = OnceLock::new();

/// Extract an 11-character video ID from a YouTube URL.
///
/// Matches the ID following `v=` or the last `/` segment, permissive about
/// trailing content (`&t=42s`, playlist params). One routine shared by the
/// transcript and channel tools so the two cannot drift apart.
pub fn extract_video_id(url: &str) -> Result<String> {
    let re = VIDEO_ID_REGEX.get_or_init(|| {
        Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("invalid video ID regex")
    });
    re.captures(url.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| TittError::InvalidInput(format!("Invalid YouTube URL: {}", url)))
}
