//! Value records returned by the YouTube tools.
//!
//! Field names follow the wire shape agents already consume, hence the
//! explicit camelCase renames.

use serde::Serialize;

/// A search result merged with its statistics.
#[derive(Debug, Clone, Serialize)]
pub struct VideoCard {
    pub title: String,
    #[serde(rename = "publishedDate")]
    pub published_date: String,
    #[serde(rename = "channelName")]
    pub channel_name: String,
    #[serde(rename = "channelId")]
    pub channel_id: String,
    #[serde(rename = "thumbnailUrl")]
    pub thumbnail_url: String,
    /// None when the upstream payload omits the count. Never defaulted to 0.
    #[serde(rename = "viewCount")]
    pub view_count: Option<i64>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<i64>,
    pub url: String,
}

/// Channel identity and statistics plus the newest uploads.
///
/// Count fields stay strings as the Data API returns them; `"0"` when absent.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelSummary {
    #[serde(rename = "channelTitle")]
    pub channel_title: String,
    #[serde(rename = "channelUrl")]
    pub channel_url: String,
    #[serde(rename = "subscriberCount")]
    pub subscriber_count: String,
    #[serde(rename = "viewCount")]
    pub view_count: String,
    #[serde(rename = "videoCount")]
    pub video_count: String,
    pub videos: Vec<RecentVideo>,
}

/// One entry from a channel's Atom feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentVideo {
    pub title: String,
    pub link: String,
    pub published: String,
    /// Wall-clock time of the fetch, not feed data.
    #[serde(rename = "updatedDate")]
    pub updated_date: String,
}
