//! Consecutive-day review streaks

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};

use crate::types::{ActivityEvent, DayBoundary};

/// Distinct calendar dates with at least one event, newest first
pub fn activity_dates(events: &[ActivityEvent], boundary: DayBoundary) -> Vec<NaiveDate> {
    let dates: BTreeSet<NaiveDate> = events.iter().filter_map(|e| e.date(boundary)).collect();
    dates.into_iter().rev().collect()
}

/// Number of consecutive days ending at `today` that have activity.
///
/// The walk compares the i-th newest date against `today - i` and stops at
/// the first mismatch, so a day without activity at `today` yields 0.
pub fn current_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    // Same-day duplicates would shift the walk by one position.
    let distinct: BTreeSet<NaiveDate> = dates.iter().copied().collect();

    let mut streak = 0u32;
    let mut expected = Some(today);
    for date in distinct.into_iter().rev() {
        match expected {
            Some(day) if day == date => {
                streak += 1;
                expected = day.checked_sub_days(Days::new(1));
            }
            _ => break,
        }
    }
    streak
}
