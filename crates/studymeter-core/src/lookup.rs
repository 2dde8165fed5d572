//! Duration lookup seam between the aggregator and metadata providers

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::video::VideoReference;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub duration_seconds: u64,
    pub title: String,
}

/// Why a single lookup failed. Never aborts a batch.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program's own error line, or its exit status when it printed none
    #[error("{}", exit_reason(.program, .status, .stderr))]
    Exit {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("request failed: {0}")]
    Http(String),

    #[error("malformed metadata: {0}")]
    Malformed(String),

    #[error("no duration reported")]
    MissingDuration,
}

fn exit_reason(program: &str, status: &str, stderr: &str) -> String {
    if stderr.is_empty() {
        format!("{} exited with {}", program, status)
    } else {
        stderr.to_string()
    }
}

/// A synchronous source of video durations
pub trait DurationLookup {
    fn lookup(&mut self, reference: &VideoReference) -> Result<VideoMetadata, LookupError>;
}

impl<T: DurationLookup + ?Sized> DurationLookup for &mut T {
    fn lookup(&mut self, reference: &VideoReference) -> Result<VideoMetadata, LookupError> {
        (**self).lookup(reference)
    }
}

impl<T: DurationLookup + ?Sized> DurationLookup for Box<T> {
    fn lookup(&mut self, reference: &VideoReference) -> Result<VideoMetadata, LookupError> {
        (**self).lookup(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_error_shows_program_message() {
        let err = LookupError::Exit {
            program: "yt-dlp".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "ERROR: [youtube] abc: Private video".to_string(),
        };
        assert_eq!(err.to_string(), "ERROR: [youtube] abc: Private video");
    }

    #[test]
    fn test_exit_error_without_stderr_shows_status() {
        let err = LookupError::Exit {
            program: "yt-dlp".to_string(),
            status: "exit status: 2".to_string(),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "yt-dlp exited with exit status: 2");
    }
}
