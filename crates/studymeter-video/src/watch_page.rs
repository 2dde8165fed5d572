//! Duration lookup by reading the public watch page

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use reqwest::blocking::Client;
use studymeter_core::{DurationLookup, LookupError, VideoMetadata, VideoReference};

static LENGTH_RE: OnceLock<Regex> = OnceLock::new();
static TITLE_RE: OnceLock<Regex> = OnceLock::new();

/// Scrapes `lengthSeconds` and `<title>` from the watch page HTML
pub struct WatchPage {
    client: Client,
}

impl WatchPage {
    pub fn new(timeout: Duration) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Http(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl DurationLookup for WatchPage {
    fn lookup(&mut self, reference: &VideoReference) -> Result<VideoMetadata, LookupError> {
        let html = self
            .client
            .get(reference.canonical_url())
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|e| LookupError::Http(e.to_string()))?;

        parse_page(&html)
    }
}

fn parse_page(html: &str) -> Result<VideoMetadata, LookupError> {
    let length_re = LENGTH_RE.get_or_init(|| Regex::new(r#""lengthSeconds":"(\d+)""#).unwrap());
    let title_re = TITLE_RE.get_or_init(|| Regex::new(r"<title>([^<]*)</title>").unwrap());

    let duration_seconds = length_re
        .captures(html)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .ok_or(LookupError::MissingDuration)?;

    let title = title_re
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| {
            let title = m.as_str().trim();
            decode_entities(title.strip_suffix(" - YouTube").unwrap_or(title))
        })
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    Ok(VideoMetadata {
        duration_seconds,
        title,
    })
}

fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
