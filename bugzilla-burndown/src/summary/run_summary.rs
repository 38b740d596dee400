//! Run summary types.

use crate::bugs::NormalizedBatch;

/// Summary of a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of bugs returned by the search.
    pub bugs_fetched: usize,

    /// Number of bugs that normalized cleanly.
    pub bugs_normalized: usize,

    /// Number of malformed bugs that were skipped.
    pub bugs_rejected: usize,

    /// Number of normalized bugs still open.
    pub open_bugs: usize,

    /// Number of normalized bugs already closed.
    pub closed_bugs: usize,

    /// Whether any normalized bug carried time tracking.
    pub has_time_tracking: bool,
}

impl RunSummary {
    /// Creates a summary for a search that returned `bugs_fetched` bugs.
    #[must_use]
    pub fn new(bugs_fetched: usize) -> Self {
        Self {
            bugs_fetched,
            ..Default::default()
        }
    }

    /// Updates the summary with a normalized batch.
    pub fn record_batch(&mut self, batch: &NormalizedBatch) {
        self.bugs_normalized += batch.records.len();
        self.bugs_rejected += batch.rejected.len();
        for record in &batch.records {
            if record.open {
                self.open_bugs += 1;
            } else {
                self.closed_bugs += 1;
            }
            self.has_time_tracking |= record.time_tracking.is_some();
        }
    }

    /// Returns true if there were no bugs to chart.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bugs_normalized == 0
    }

    /// Returns true if any bug was rejected.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.bugs_rejected > 0
    }

    /// Returns true if every fetched bug made it into the chart.
    #[must_use]
    pub fn all_success(&self) -> bool {
        self.bugs_rejected == 0 && self.bugs_normalized == self.bugs_fetched
    }
}
