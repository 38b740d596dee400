//! Burndown reports.
//!
//! A [`BurndownReport`] gathers everything a run produced. The
//! [`ReportRenderer`] turns it into text, and [`chart_json`] exports the
//! series for charting tools.

mod error;
mod renderer;

pub use error::ReportError;
pub use renderer::{create_handlebars_registry, ReportRenderer, DEFAULT_BUG_LIST_TEMPLATE};

use crate::bugs::{BugRecord, NormalizeError};
use crate::bugzilla::{BugLinks, SearchQuery};
use crate::burndown::{BurndownOutcome, BurndownSeries};
use crate::summary::RunSummary;
use chrono::NaiveDate;
use serde::Serialize;

/// An open bug as listed in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenBug {
    pub id: u64,
    pub summary: String,
    pub url: String,
    pub status: Option<String>,
    /// Assignee nickname, or real name when no nickname is given.
    pub assignee: Option<String>,
    /// Story points, formatted for display.
    pub story_points: Option<String>,
}

impl OpenBug {
    /// Builds the listing entry for a bug.
    #[must_use]
    pub fn from_record(record: &BugRecord, links: &BugLinks) -> Self {
        Self {
            id: record.id,
            summary: record.summary.clone(),
            url: links.bug_url(record.id),
            status: record.status.clone(),
            assignee: record.assigned_to.as_ref().and_then(|person| {
                person
                    .nick
                    .clone()
                    .or_else(|| (!person.name.is_empty()).then(|| person.name.clone()))
            }),
            story_points: record
                .time_tracking
                .map(|tracking| tracking.story_points.to_string()),
        }
    }
}

/// Everything produced by one burndown run.
#[derive(Debug, Clone)]
pub struct BurndownReport {
    pub title: String,
    pub summary: RunSummary,
    pub outcome: BurndownOutcome,
    /// Open bugs in ascending id order.
    pub open_bugs: Vec<OpenBug>,
    /// Bulk link to the open bugs; `None` when nothing is open.
    pub bug_list_url: Option<String>,
    /// Malformed bugs skipped during normalization.
    pub rejected: Vec<NormalizeError>,
    pub window_start: NaiveDate,
    /// Entries dated after this day are projections.
    pub today: NaiveDate,
}

impl BurndownReport {
    /// Returns the series, if there were bugs to chart.
    #[must_use]
    pub fn series(&self) -> Option<&BurndownSeries> {
        self.outcome.series()
    }
}

/// Generates the report title for a search.
///
/// Format: "Burndown: {field:value, ...}"
#[must_use]
pub fn generate_title(query: &SearchQuery) -> String {
    if query.is_empty() {
        "Burndown: all bugs".to_string()
    } else {
        format!("Burndown: {}", query.describe())
    }
}

/// Serializes a series as pretty JSON with aligned columns.
///
/// # Errors
///
/// Returns [`ReportError::JsonError`] if serialization fails.
pub fn chart_json(series: &BurndownSeries) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(series)?)
}
