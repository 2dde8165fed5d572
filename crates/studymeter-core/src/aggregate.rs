//! Fault-tolerant watch-time aggregation

use std::fmt;

use crate::lookup::{DurationLookup, VideoMetadata};
use crate::video::VideoReference;

const TITLE_DISPLAY_CHARS: usize = 50;
const REASON_DISPLAY_CHARS: usize = 50;

/// Running counters for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationTotals {
    pub total_seconds: u64,
    pub attempted: usize,
    pub succeeded: usize,
    /// Inputs that were not a recognized video reference
    pub skipped: usize,
}

impl AggregationTotals {
    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }

    pub fn total_hours(&self) -> f64 {
        self.total_seconds as f64 / 3600.0
    }
}

/// What happened to one input, in input order
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    Fetched {
        reference: VideoReference,
        metadata: VideoMetadata,
    },
    Failed {
        reference: VideoReference,
        reason: String,
    },
    Skipped {
        input: String,
    },
}

impl ItemOutcome {
    pub fn input(&self) -> &str {
        match self {
            ItemOutcome::Fetched { reference, .. } | ItemOutcome::Failed { reference, .. } => {
                &reference.original
            }
            ItemOutcome::Skipped { input } => input,
        }
    }
}

impl fmt::Display for ItemOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemOutcome::Fetched { metadata, .. } => write!(
                f,
                "  ✓ {} - {}",
                truncate_display(&metadata.title, TITLE_DISPLAY_CHARS),
                format_duration(metadata.duration_seconds)
            ),
            ItemOutcome::Failed { reference, reason } => write!(
                f,
                "  ✗ Error fetching {}: {}",
                reference.original,
                reason.chars().take(REASON_DISPLAY_CHARS).collect::<String>()
            ),
            ItemOutcome::Skipped { input } => {
                write!(f, "  - Skipped unrecognized reference {}", input)
            }
        }
    }
}

/// Receives progress while a batch runs
pub trait AggregationObserver {
    fn started(&mut self, _index: usize, _total: usize, _input: &str) {}
    fn finished(&mut self, _index: usize, _outcome: &ItemOutcome) {}
}

impl AggregationObserver for () {}

#[derive(Debug, Clone, Default)]
pub struct AggregationReport {
    pub totals: AggregationTotals,
    pub outcomes: Vec<ItemOutcome>,
}

impl AggregationReport {
    pub fn summary(&self) -> String {
        let t = &self.totals;
        if t.attempted == 0 && t.skipped == 0 {
            return "No video references found.".to_string();
        }

        let mut lines = vec![
            "Summary:".to_string(),
            format!("  • Videos processed: {}", t.attempted),
            format!("  • Successfully fetched: {}", t.succeeded),
            format!("  • Failed: {}", t.failed()),
        ];
        if t.skipped > 0 {
            lines.push(format!("  • Skipped (unrecognized): {}", t.skipped));
        }
        lines.push(String::new());
        lines.push(format!("Total Duration: {}", format_duration(t.total_seconds)));
        lines.push(format!("Total Hours: {:.2} hours", t.total_hours()));
        lines.join("\n")
    }
}

/// Sums durations over a list of references, one lookup at a time
pub struct DurationAggregator<L> {
    lookup: L,
}

impl<L: DurationLookup> DurationAggregator<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    pub fn run<S: AsRef<str>>(
        &mut self,
        inputs: &[S],
        observer: &mut impl AggregationObserver,
    ) -> AggregationReport {
        let mut report = AggregationReport::default();
        let total = inputs.len();

        for (index, input) in inputs.iter().enumerate() {
            let input = input.as_ref();
            observer.started(index, total, input);

            let outcome = match VideoReference::parse(input) {
                None => {
                    tracing::debug!(input, "skipping unrecognized video reference");
                    report.totals.skipped += 1;
                    ItemOutcome::Skipped {
                        input: input.trim().to_string(),
                    }
                }
                Some(reference) => {
                    report.totals.attempted += 1;
                    match self.lookup.lookup(&reference) {
                        Ok(metadata) => {
                            tracing::debug!(
                                id = %reference.id,
                                seconds = metadata.duration_seconds,
                                "fetched duration"
                            );
                            report.totals.total_seconds += metadata.duration_seconds;
                            report.totals.succeeded += 1;
                            ItemOutcome::Fetched {
                                reference,
                                metadata,
                            }
                        }
                        Err(e) => {
                            tracing::warn!(id = %reference.id, error = %e, "duration lookup failed");
                            ItemOutcome::Failed {
                                reference,
                                reason: e.to_string(),
                            }
                        }
                    }
                }
            };

            observer.finished(index, &outcome);
            report.outcomes.push(outcome);
        }

        report
    }

    pub fn into_inner(self) -> L {
        self.lookup
    }
}

/// `1h 2m 3s`, `2m 3s` or `3s`
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Cut `text` to `max` characters, marking the cut with `...`
pub fn truncate_display(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((at, _)) => format!("{}...", &text[..at]),
        None => text.to_string(),
    }
}
