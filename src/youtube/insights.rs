//! YouTube Data API v3 adapter: search and channel resolution.

use crate::error::{Result, TittError};
use crate::youtube::models::{ChannelSummary, VideoCard};
use crate::youtube::{extract_video_id, fetch_recent_videos};
use serde_json::Value;
use tracing::{debug, warn};

/// Search page size; one batched details call covers the whole page.
const SEARCH_PAGE_SIZE: u32 = 20;

/// Stateless adapter over the YouTube Data API.
pub struct VideoInsights {
    http: reqwest::Client,
    api_url: String,
    feed_url: String,
    api_key: String,
}

impl VideoInsights {
    pub fn new(api_url: String, feed_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url,
            feed_url,
            api_key,
        }
    }

    /// Search videos by keyword and enrich each hit with statistics.
    ///
    /// Never fails: upstream errors of any kind degrade to an empty list.
    /// `try_search` stays callable when the caller needs to distinguish
    /// "no hits" from "search broke".
    pub async fn search_videos(&self, query: &str) -> Vec<VideoCard> {
        match self.try_search(query).await {
            Ok(cards) => cards,
            Err(e) => {
                warn!("Video search for '{}' failed: {}", query, e);
                Vec::new()
            }
        }
    }

    /// Fallible search: one `search` call, then one batched `videos` call
    /// for snippet + statistics.
    pub async fn try_search(&self, query: &str) -> Result<Vec<VideoCard>> {
        debug!("Searching videos for '{}'", query);

        let page_size = SEARCH_PAGE_SIZE.to_string();
        let search_data: Value = self
            .http
            .get(format!("{}/search", self.api_url))
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", page_size.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let video_ids = collect_video_ids(&search_data);
        if video_ids.is_empty() {
            debug!("No videos found for '{}'", query);
            return Ok(Vec::new());
        }

        let details_data: Value = self
            .http
            .get(format!("{}/videos", self.api_url))
            .query(&[
                ("part", "snippet,statistics"),
                ("id", video_ids.join(",").as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(build_cards(&details_data))
    }

    /// Resolve a video URL to its channel's identity, statistics, and
    /// newest uploads.
    ///
    /// Fails with `InvalidInput` on an unextractable ID and `NotFound` when
    /// the video lookup returns no items. The upload-feed sub-fetch degrades
    /// to an empty list without failing the call.
    pub async fn channel_info(&self, video_url: &str) -> Result<ChannelSummary> {
        let video_id = extract_video_id(video_url)?;
        debug!("Resolving channel for video {}", video_id);

        let video_data: Value = self
            .http
            .get(format!("{}/videos", self.api_url))
            .query(&[
                ("part", "snippet,statistics"),
                ("id", video_id.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;

        let channel_id = video_data["items"][0]["snippet"]["channelId"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| TittError::NotFound(format!("No video found for ID '{}'", video_id)))?;

        let channel_data: Value = self
            .http
            .get(format!("{}/channels", self.api_url))
            .query(&[
                ("part", "snippet,statistics"),
                ("id", channel_id.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;

        let channel = &channel_data["items"][0];
        if channel.is_null() {
            // A channel lookup can return zero items even after the video
            // resolved, e.g. for terminated channels.
            return Err(TittError::Upstream(format!(
                "Channel lookup for '{}' returned no items",
                channel_id
            )));
        }

        let videos = fetch_recent_videos(&self.http, &self.feed_url, &channel_id).await;

        Ok(ChannelSummary {
            channel_title: channel["snippet"]["title"].as_str().unwrap_or("").to_string(),
            channel_url: format!("https://www.youtube.com/channel/{}", channel_id),
            subscriber_count: stat_string(channel, "subscriberCount"),
            view_count: stat_string(channel, "viewCount"),
            video_count: stat_string(channel, "videoCount"),
            videos,
        })
    }
}

/// Pull the video IDs out of a `search` response.
fn collect_video_ids(search_data: &Value) -> Vec<String> {
    search_data["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["id"]["videoId"].as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Flatten a `videos` details response into cards.
///
/// Absent fields get explicit defaults: `"N/A"` for text, `""` for URLs,
/// null for counts. Counts are never substituted with zero.
fn build_cards(details_data: &Value) -> Vec<VideoCard> {
    let Some(items) = details_data["items"].as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .map(|item| {
            let snippet = &item["snippet"];
            let statistics = &item["statistics"];
            VideoCard {
                title: snippet["title"].as_str().unwrap_or("N/A").to_string(),
                published_date: snippet["publishedAt"].as_str().unwrap_or("").to_string(),
                channel_name: snippet["channelTitle"].as_str().unwrap_or("N/A").to_string(),
                channel_id: snippet["channelId"].as_str().unwrap_or("").to_string(),
                thumbnail_url: snippet["thumbnails"]["high"]["url"]
                    .as_str()
                    .unwrap_or("")
                    .to_string(),
                view_count: count_field(statistics, "viewCount"),
                like_count: count_field(statistics, "likeCount"),
                url: format!(
                    "https://www.youtube.com/watch?v={}",
                    item["id"].as_str().unwrap_or("")
                ),
            }
        })
        .collect()
}

/// Statistics counts arrive as decimal strings; absent means null.
fn count_field(statistics: &Value, key: &str) -> Option<i64> {
    statistics[key].as_str().and_then(|s| s.parse().ok())
}

/// Channel statistics stay strings, defaulting to "0" when absent.
fn stat_string(channel: &Value, key: &str) -> String {
    channel["statistics"][key].as_str().unwrap_or("0").to_string()
}
