//! Burndown output series.

use chrono::NaiveDate;
use serde::Serialize;

/// One day of a burndown series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurndownPoint {
    pub date: NaiveDate,
    pub open: i64,
    pub closed: i64,
    /// Work-days remaining; `None` when the series has no time tracking.
    pub remaining_days: Option<i64>,
}

/// Daily open/closed counts and optional remaining work, as aligned columns.
///
/// All columns have the same length and `dates` is strictly increasing.
/// `remaining_days` is `None` when no bug carried time tracking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BurndownSeries {
    pub dates: Vec<NaiveDate>,
    pub open_counts: Vec<i64>,
    pub closed_counts: Vec<i64>,
    pub remaining_days: Option<Vec<i64>>,
}

impl BurndownSeries {
    /// Creates an empty series, with or without a remaining-days column.
    #[must_use]
    pub fn new(has_time_tracking: bool) -> Self {
        Self {
            remaining_days: has_time_tracking.then(Vec::new),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Returns true if the series carries a remaining-days column.
    #[must_use]
    pub fn has_time_tracking(&self) -> bool {
        self.remaining_days.is_some()
    }

    /// Returns the entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<BurndownPoint> {
        Some(BurndownPoint {
            date: *self.dates.get(index)?,
            open: *self.open_counts.get(index)?,
            closed: *self.closed_counts.get(index)?,
            remaining_days: self
                .remaining_days
                .as_ref()
                .and_then(|days| days.get(index).copied()),
        })
    }

    #[must_use]
    pub fn first(&self) -> Option<BurndownPoint> {
        self.get(0)
    }

    #[must_use]
    pub fn last(&self) -> Option<BurndownPoint> {
        self.len().checked_sub(1).and_then(|index| self.get(index))
    }

    /// Iterates over the entries in date order.
    pub fn points(&self) -> impl Iterator<Item = BurndownPoint> + '_ {
        (0..self.len()).filter_map(|index| self.get(index))
    }

    /// Appends an entry. `remaining_days` is ignored without time tracking.
    pub fn push(&mut self, point: BurndownPoint) {
        self.dates.push(point.date);
        self.open_counts.push(point.open);
        self.closed_counts.push(point.closed);
        if let Some(days) = self.remaining_days.as_mut() {
            days.push(point.remaining_days.unwrap_or(0));
        }
    }

    /// Inserts an entry before all others.
    pub fn push_front(&mut self, point: BurndownPoint) {
        self.dates.insert(0, point.date);
        self.open_counts.insert(0, point.open);
        self.closed_counts.insert(0, point.closed);
        if let Some(days) = self.remaining_days.as_mut() {
            days.insert(0, point.remaining_days.unwrap_or(0));
        }
    }
}

/// Result of aggregating a set of bugs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BurndownOutcome {
    /// There were no bugs to chart.
    Empty,
    /// A padded daily series.
    Series(BurndownSeries),
}

impl BurndownOutcome {
    /// Returns the series, if there is one.
    #[must_use]
    pub fn series(&self) -> Option<&BurndownSeries> {
        match self {
            Self::Empty => None,
            Self::Series(series) => Some(series),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
