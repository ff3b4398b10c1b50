//! Caption fetching and flattening.

use crate::error::{Result, TittError};
use crate::youtube::extract_video_id;
use tracing::debug;
use yt_transcript_rs::api::YouTubeTranscriptApi;

/// Fetches a video's captions and flattens them to one string.
pub struct TranscriptFetcher {
    /// Language priority; the first track available in this order wins.
    languages: Vec<String>,
}

impl TranscriptFetcher {
    pub fn new(languages: Vec<String>) -> Self {
        Self { languages }
    }

    /// Fetch the transcript for a video URL.
    ///
    /// Fails with `InvalidInput` when no video ID can be extracted and
    /// `Upstream` when no caption track exists or the fetch fails. One
    /// outbound call, no retries.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let video_id = extract_video_id(url)?;
        debug!("Fetching transcript for video {}", video_id);

        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| TittError::Upstream(format!("Failed to create caption client: {}", e)))?;

        let languages: Vec<&str> = self.languages.iter().map(|s| s.as_str()).collect();

        let transcript = api
            .fetch_transcript(&video_id, &languages, false)
            .await
            .map_err(|e| {
                TittError::Upstream(format!(
                    "No transcript available for video '{}': {}",
                    video_id, e
                ))
            })?;

        let texts: Vec<String> = transcript.into_iter().map(|entry| entry.text).collect();
        Ok(join_segments(&texts))
    }
}

/// Join caption segment texts with single spaces, preserving order.
///
/// No punctuation or whitespace normalization beyond the join.
fn join_segments(texts: &[String]) -> String {
    texts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_segments_preserves_order() {
        let segments = vec![
            "never gonna".to_string(),
            "give you".to_string(),
            "up".to_string(),
        ];
        assert_eq!(join_segments(&segments), "never gonna give you up");
    }

    #[test]
    fn test_join_segments_no_normalization() {
        let segments = vec!["  leading".to_string(), "trailing  ".to_string()];
        assert_eq!(join_segments(&segments), "  leading trailing  ");
        assert_eq!(join_segments(&[]), "");
    }

    #[tokio::test]
    async fn test_fetch_rejects_invalid_url() {
        let fetcher = TranscriptFetcher::new(vec!["en".to_string()]);
        let err = fetcher.fetch("https://example.com/page").await.unwrap_err();
        assert!(matches!(err, TittError::InvalidInput(_)));
    }
}
