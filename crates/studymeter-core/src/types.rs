//! Records read from the review datastore

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One logged review, identified only by its millisecond epoch timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub timestamp_ms: i64,
}

impl ActivityEvent {
    pub fn new(timestamp_ms: i64) -> Self {
        Self { timestamp_ms }
    }

    /// Calendar date of the event under the given day boundary.
    /// `None` when the timestamp is outside chrono's representable range.
    pub fn date(&self, boundary: DayBoundary) -> Option<NaiveDate> {
        let utc = DateTime::<Utc>::from_timestamp_millis(self.timestamp_ms)?;
        Some(match boundary {
            DayBoundary::Local => utc.with_timezone(&Local).date_naive(),
            DayBoundary::Utc => utc.date_naive(),
        })
    }
}

/// A spaced-repetition card reduced to its repetition counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub card_id: i64,
    pub reps: u32,
}

impl CardRecord {
    pub fn is_seen(&self) -> bool {
        self.reps > 0
    }
}

/// Time zone used to cut timestamps into calendar days.
///
/// Event dates and "today" are always computed with the same boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    #[default]
    Local,
    Utc,
}

impl DayBoundary {
    pub fn today(&self) -> NaiveDate {
        match self {
            DayBoundary::Local => Local::now().date_naive(),
            DayBoundary::Utc => Utc::now().date_naive(),
        }
    }
}
