//! Channel upload feed (Atom) fetching and parsing.

use crate::error::{Result, TittError};
use crate::youtube::models::RecentVideo;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::warn;

/// Maximum number of feed entries carried into a channel summary.
const MAX_RECENT_VIDEOS: usize = 5;

/// Fetch a channel's newest uploads from its public Atom feed.
///
/// Degrades to an empty list on a non-200 response or any parse failure;
/// channel identity is more essential than the upload list, so the caller
/// never fails on this path.
pub async fn fetch_recent_videos(
    client: &reqwest::Client,
    feed_base_url: &str,
    channel_id: &str,
) -> Vec<RecentVideo> {
    let feed_url = format!("{}?channel_id={}", feed_base_url, channel_id);

    let body = match client.get(&feed_url).send().await {
        Ok(response) if response.status().is_success() => match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read upload feed for {}: {}", channel_id, e);
                return Vec::new();
            }
        },
        Ok(response) => {
            warn!(
                "Upload feed for {} returned status {}",
                channel_id,
                response.status()
            );
            return Vec::new();
        }
        Err(e) => {
            warn!("Failed to fetch upload feed for {}: {}", channel_id, e);
            return Vec::new();
        }
    };

    match parse_feed(&body) {
        Ok(videos) => videos,
        Err(e) => {
            warn!("Failed to parse upload feed for {}: {}", channel_id, e);
            Vec::new()
        }
    }
}

/// Parse an Atom upload feed into at most five `RecentVideo`s.
///
/// Entries are taken in document order, which the feed delivers
/// reverse-chronologically; no sort is applied. `updatedDate` is stamped
/// with the wall-clock parse time, not feed data.
pub fn parse_feed(xml: &str) -> Result<Vec<RecentVideo>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let fetched_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let mut videos = Vec::new();
    let mut buf = Vec::new();
    let mut in_entry = false;
    let mut current_element = String::new();
    let mut title = String::new();
    let mut link = String::new();
    let mut published = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == "entry" {
                    in_entry = true;
                    title.clear();
                    link.clear();
                    published.clear();
                }
                current_element = name;
            }
            Ok(Event::Empty(ref e)) => {
                // <link rel="alternate" href="..."/> is self-closing
                if in_entry && e.name().as_ref() == b"link" {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"href" {
                            link = String::from_utf8_lossy(&attr.value).to_string();
                        }
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if in_entry {
                    let text = e
                        .xml_content()
                        .map_err(|err| TittError::Upstream(format!("Feed decode error: {}", err)))?;
                    match current_element.as_str() {
                        "title" => title = text.to_string(),
                        "published" => published = text.to_string(),
                        _ => {}
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"entry" {
                    in_entry = false;
                    videos.push(RecentVideo {
                        title: std::mem::take(&mut title),
                        link: std::mem::take(&mut link),
                        published: std::mem::take(&mut published),
                        updated_date: fetched_at.clone(),
                    });
                    if videos.len() >= MAX_RECENT_VIDEOS {
                        break;
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(TittError::Upstream(format!("Feed parse error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(videos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> String {
        format!(
            r#"<entry>
                <id>yt:video:video{n:07}</id>
                <title>Video {n}</title>
                <link rel="alternate" href="https://www.youtube.com/watch?v=video{n:07}"/>
                <published>2026-01-0{n}T00:00:00+00:00</published>
                <updated>2026-01-0{n}T12:00:00+00:00</updated>
            </entry>"#
        )
    }

    fn feed(entries: usize) -> String {
        let body: String = (1..=entries).map(entry).collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <feed xmlns="http://www.w3.org/2005/Atom">
                <title>Some Channel</title>
                <link rel="alternate" href="https://www.youtube.com/channel/UC123"/>
                {body}
            </feed>"#
        )
    }

    #[test]
    fn test_parse_feed_document_order() {
        let videos = parse_feed(&feed(3)).unwrap();
        assert_eq!(videos.len(), 3);
        assert_eq!(videos[0].title, "Video 1");
        assert_eq!(videos[2].title, "Video 3");
        assert_eq!(videos[0].link, "https://www.youtube.com/watch?v=video0000001");
        assert_eq!(videos[0].published, "2026-01-01T00:00:00+00:00");
        assert!(!videos[0].updated_date.is_empty());
    }

    #[test]
    fn test_parse_feed_caps_at_five() {
        let videos = parse_feed(&feed(8)).unwrap();
        assert_eq!(videos.len(), 5);
        assert_eq!(videos[4].title, "Video 5");
    }

    #[test]
    fn test_parse_feed_empty_and_malformed() {
        assert!(parse_feed(&feed(0)).unwrap().is_empty());
        assert!(parse_feed("<feed><entry><title>x</wrong></entry></feed>").is_err());
    }
}
