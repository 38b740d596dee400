//! Burndown aggregation.
//!
//! Buckets normalized bugs by calendar day, keeps running open/closed totals
//! (and remaining work when bugs carry time tracking), then pads the series to
//! the chart window.

mod change;
mod series;

pub use change::{bucket_by_day, DailyChange};
pub use series::{BurndownOutcome, BurndownPoint, BurndownSeries};

use crate::bugs::BugRecord;
use chrono::NaiveDate;
use tracing::debug;

/// Aggregates bugs into a daily burndown series.
///
/// Days before `window_start` still feed the running totals but are not
/// emitted. The series is held flat from `window_start` up to the first
/// emitted day and from the last emitted day up to `today`.
///
/// Closed bugs count as closed on the day they were last modified; see
/// [`BugRecord::closed_on`].
///
/// Returns [`BurndownOutcome::Empty`] when `records` is empty.
#[must_use]
pub fn aggregate(records: &[BugRecord], window_start: NaiveDate, today: NaiveDate) -> BurndownOutcome {
    if records.is_empty() {
        return BurndownOutcome::Empty;
    }

    let has_time_tracking = records.iter().any(|bug| bug.time_tracking.is_some());
    let changes = bucket_by_day(records);
    debug!(
        bugs = records.len(),
        days = changes.len(),
        has_time_tracking,
        "Aggregating burndown"
    );

    let mut series = BurndownSeries::new(has_time_tracking);
    let mut open = 0;
    let mut closed = 0;
    let mut remaining_days = 0;

    for change in &changes {
        open += change.open_delta();
        closed += change.closed_delta();
        remaining_days += change.days_opened() - change.days_closed();

        if change.date >= window_start {
            series.push(BurndownPoint {
                date: change.date,
                open,
                closed,
                remaining_days: Some(remaining_days),
            });
        }
    }

    match series.first() {
        // Every event predates the window: hold the final totals across it.
        None => series.push(BurndownPoint {
            date: window_start,
            open,
            closed,
            remaining_days: Some(remaining_days),
        }),
        Some(first) if first.date > window_start => series.push_front(BurndownPoint {
            date: window_start,
            ..first
        }),
        Some(_) => {}
    }

    if let Some(last) = series.last() {
        if last.date < today {
            series.push(BurndownPoint {
                date: today,
                ..last
            });
        }
    }

    BurndownOutcome::Series(series)
}
