//! Learning-progress metrics: review streaks, seen-card counts, badge
//! rendering and watch-time aggregation

mod aggregate;
mod badge;
mod lookup;
mod seen;
mod streak;
mod types;
mod video;

pub use aggregate::{
    format_duration, truncate_display, AggregationObserver, AggregationReport, AggregationTotals,
    DurationAggregator, ItemOutcome,
};
pub use badge::{render_badges, Badge, BadgeDocument, BadgeKind, Upsert};
pub use lookup::{DurationLookup, LookupError, VideoMetadata};
pub use seen::seen_count;
pub use streak::{activity_dates, current_streak};
pub use types::{ActivityEvent, CardRecord, DayBoundary};
pub use video::{ReferenceShape, VideoId, VideoReference};
