//! Duration lookup through the `yt-dlp` command line tool

use std::path::PathBuf;
use std::process::Command;

use serde::Deserialize;
use studymeter_core::{DurationLookup, LookupError, VideoMetadata, VideoReference};

/// Subset of `yt-dlp --dump-single-json` output
#[derive(Debug, Deserialize)]
struct InfoJson {
    duration: Option<f64>,
    title: Option<String>,
}

#[derive(Debug, Clone)]
pub struct YtDlp {
    program: PathBuf,
}

impl YtDlp {
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl DurationLookup for YtDlp {
    fn lookup(&mut self, reference: &VideoReference) -> Result<VideoMetadata, LookupError> {
        let output = Command::new(&self.program)
            .args([
                "--dump-single-json",
                "--skip-download",
                "--no-playlist",
                "--no-warnings",
            ])
            .arg(reference.canonical_url())
            .output()
            .map_err(|source| LookupError::Spawn {
                program: self.program_name(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LookupError::Exit {
                program: self.program_name(),
                status: output.status.to_string(),
                stderr: last_line(&stderr).to_string(),
            });
        }

        parse_info(&output.stdout)
    }
}

fn parse_info(stdout: &[u8]) -> Result<VideoMetadata, LookupError> {
    let info: InfoJson =
        serde_json::from_slice(stdout).map_err(|e| LookupError::Malformed(e.to_string()))?;
    let duration = info.duration.ok_or(LookupError::MissingDuration)?;

    Ok(VideoMetadata {
        duration_seconds: duration.max(0.0).round() as u64,
        title: info.title.unwrap_or_else(|| "Unknown".to_string()),
    })
}

/// yt-dlp puts the actual error on its last stderr line
fn last_line(text: &str) -> &str {
    text.lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("")
}
