//! Canonical bug records.

use super::person::Person;
use crate::flags::FlagMap;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Effort tracking attached to a bug.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeTracking {
    /// Hours estimated when the bug was sized.
    pub original_estimate_hours: f64,
    /// Hours worked plus hours left.
    pub current_estimate_hours: f64,
    /// Hours left.
    pub remaining_hours: f64,
    /// Coarse sizing derived from the original estimate.
    pub story_points: f64,
}

/// A normalized bug. Built once by [`normalize`](super::normalize), never mutated.
///
/// `reported_at <= last_modified_at` always holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BugRecord {
    pub id: u64,
    pub summary: String,
    pub open: bool,
    pub reported_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
    pub time_tracking: Option<TimeTracking>,

    pub status: Option<String>,
    pub resolution: Option<String>,
    pub product: Option<String>,
    pub component: Option<String>,
    pub whiteboard: Option<String>,
    pub keywords: Vec<String>,
    pub blocks: Vec<u64>,
    pub depends_on: Vec<u64>,
    pub assigned_to: Option<Person>,
    pub reporter: Option<Person>,
    pub status_flags: FlagMap,
    pub tracking_flags: FlagMap,
    pub blocking_flags: FlagMap,
}

impl BugRecord {
    /// UTC calendar day the bug was reported.
    #[must_use]
    pub fn reported_on(&self) -> NaiveDate {
        self.reported_at.date_naive()
    }

    /// UTC calendar day the bug counts as closed, if it is closed.
    ///
    /// Bugzilla search results carry no resolution timestamp, so the last
    /// modification stands in for it. Any change made after the bug was
    /// resolved moves its closing day later.
    #[must_use]
    pub fn closed_on(&self) -> Option<NaiveDate> {
        (!self.open).then(|| self.last_modified_at.date_naive())
    }

    /// Current estimate in hours, zero without time tracking.
    #[must_use]
    pub fn current_estimate_hours(&self) -> f64 {
        self.time_tracking
            .map_or(0.0, |tracking| tracking.current_estimate_hours)
    }
}
