//! Video reference normalization

use std::fmt;

use serde::{Deserialize, Serialize};

const SHORT_MARKER: &str = "youtu.be/";
const LONG_MARKER: &str = "youtube.com/watch";

/// Canonical video identifier, never empty
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceShape {
    /// `https://youtu.be/<id>?...`
    Short,
    /// `https://www.youtube.com/watch?v=<id>&...`
    Long,
}

/// A recognized video locator together with the text it was parsed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoReference {
    pub shape: ReferenceShape,
    pub id: VideoId,
    pub original: String,
}

impl VideoReference {
    /// Classify `input`, returning `None` for unrecognized shapes or an empty id
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();

        let (shape, id) = if let Some((_, rest)) = input.split_once(SHORT_MARKER) {
            let id = rest.split('?').next().unwrap_or_default();
            (ReferenceShape::Short, id)
        } else if input.contains(LONG_MARKER) {
            (ReferenceShape::Long, query_param(input, "v")?)
        } else {
            return None;
        };

        if id.is_empty() {
            return None;
        }

        Some(Self {
            shape,
            id: VideoId(id.to_string()),
            original: input.to_string(),
        })
    }

    pub fn canonical_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }
}

impl fmt::Display for VideoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

fn query_param<'a>(url: &'a str, key: &str) -> Option<&'a str> {
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key).then_some(v)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_form() {
        let r = VideoReference::parse("https://youtu.be/abc123?si=xyz").unwrap();
        assert_eq!(r.shape, ReferenceShape::Short);
        assert_eq!(r.id.as_str(), "abc123");
    }

    #[test]
    fn test_short_form_without_query() {
        let r = VideoReference::parse("https://youtu.be/zqtQDWmuoz4").unwrap();
        assert_eq!(r.id.as_str(), "zqtQDWmuoz4");
    }

    #[test]
    fn test_long_form() {
        let r = VideoReference::parse("https://www.youtube.com/watch?v=abc123&t=5").unwrap();
        assert_eq!(r.shape, ReferenceShape::Long);
        assert_eq!(r.id.as_str(), "abc123");
    }

    #[test]
    fn test_long_form_v_not_first() {
        let r = VideoReference::parse("https://m.youtube.com/watch?feature=share&v=YVvJL3ib_HY")
            .unwrap();
        assert_eq!(r.id.as_str(), "YVvJL3ib_HY");
    }

    #[test]
    fn test_long_form_without_v() {
        assert!(VideoReference::parse("https://www.youtube.com/watch?list=PL123").is_none());
    }

    #[test]
    fn test_unrecognized() {
        assert!(VideoReference::parse("https://example.com/x").is_none());
        assert!(VideoReference::parse("").is_none());
    }

    #[test]
    fn test_empty_id_rejected() {
        assert!(VideoReference::parse("https://youtu.be/").is_none());
        assert!(VideoReference::parse("https://youtu.be/?si=abc").is_none());
        assert!(VideoReference::parse("https://www.youtube.com/watch?v=&t=5").is_none());
    }

    #[test]
    fn test_whitespace_trimmed() {
        let r = VideoReference::parse("  https://youtu.be/abc123\n").unwrap();
        assert_eq!(r.original, "https://youtu.be/abc123");
        assert_eq!(r.canonical_url(), "https://www.youtube.com/watch?v=abc123");
    }
}
