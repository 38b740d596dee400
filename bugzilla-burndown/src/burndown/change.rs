//! Per-day bucketing of bug events.

use crate::bugs::BugRecord;
use crate::story_points::days_from_hours;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Bugs opened and closed on one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyChange<'a> {
    pub date: NaiveDate,
    pub bugs_opened: Vec<&'a BugRecord>,
    pub bugs_closed: Vec<&'a BugRecord>,
}

impl<'a> DailyChange<'a> {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            bugs_opened: Vec::new(),
            bugs_closed: Vec::new(),
        }
    }

    /// Change in the open-bug count over the day.
    #[must_use]
    pub fn open_delta(&self) -> i64 {
        self.bugs_opened.len() as i64 - self.bugs_closed.len() as i64
    }

    /// Number of bugs closed during the day.
    #[must_use]
    pub fn closed_delta(&self) -> i64 {
        self.bugs_closed.len() as i64
    }

    /// Work-days opened, rounded up from the summed hours.
    #[must_use]
    pub fn days_opened(&self) -> i64 {
        days_from_hours(total_hours(&self.bugs_opened))
    }

    /// Work-days closed, rounded up from the summed hours.
    #[must_use]
    pub fn days_closed(&self) -> i64 {
        days_from_hours(total_hours(&self.bugs_closed))
    }
}

fn total_hours(bugs: &[&BugRecord]) -> f64 {
    bugs.iter().map(|bug| bug.current_estimate_hours()).sum()
}

/// Buckets records into daily changes, ordered by date.
///
/// A bug opens on the day it was reported. A closed bug also closes on the
/// day of its last modification.
#[must_use]
pub fn bucket_by_day(records: &[BugRecord]) -> Vec<DailyChange<'_>> {
    let mut changes: BTreeMap<NaiveDate, DailyChange<'_>> = BTreeMap::new();

    for record in records {
        let day = record.reported_on();
        changes
            .entry(day)
            .or_insert_with(|| DailyChange::new(day))
            .bugs_opened
            .push(record);

        if let Some(day) = record.closed_on() {
            changes
                .entry(day)
                .or_insert_with(|| DailyChange::new(day))
                .bugs_closed
                .push(record);
        }
    }

    changes.into_values().collect()
}
