//! Orchestrates a burndown run: fetch, normalize, aggregate, forecast.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::bugs::normalize_batch;
use crate::bugzilla::{BugSource, BugzillaClient};
use crate::burndown::{aggregate, BurndownOutcome};
use crate::report::{generate_title, BurndownReport, OpenBug, ReportRenderer};
use crate::summary::RunSummary;
use tracing::{info, warn};
use url::Url;

/// Runs burndown reports against a [`BugSource`].
pub struct Runner<S> {
    source: S,
    config: RunnerConfig,
    renderer: ReportRenderer,
}

impl Runner<BugzillaClient> {
    /// Builds a runner that searches the Bugzilla instance at `web_url`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Client`] if the HTTP client cannot be created.
    pub fn for_bugzilla(web_url: &Url, config: RunnerConfig) -> Result<Self, RunnerError> {
        let client = BugzillaClient::new(web_url).map_err(RunnerError::Client)?;
        Ok(Self::new(client, config))
    }
}

impl<S: BugSource> Runner<S> {
    /// Builds a runner from a bug source and configuration.
    pub fn new(source: S, config: RunnerConfig) -> Self {
        Self {
            source,
            config,
            renderer: ReportRenderer::new(),
        }
    }

    /// Replaces the report renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: ReportRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Executes the full flow and returns the report.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::FetchFailed`] if the search fails, and
    /// [`RunnerError::Malformed`] if a malformed bug aborts the batch.
    pub async fn run(&self) -> Result<BurndownReport, RunnerError> {
        let config = &self.config;
        info!(query = %config.query().describe(), "Searching bugs");

        let raws = self
            .source
            .search_bugs(config.query())
            .await
            .map_err(RunnerError::FetchFailed)?;
        let mut summary = RunSummary::new(raws.len());

        let batch = normalize_batch(&raws, config.batch_policy())?;
        summary.record_batch(&batch);
        if !batch.is_clean() {
            warn!(count = batch.rejected.len(), "Skipped malformed bugs");
        }

        if summary.is_empty() {
            info!("No bugs matched the query");
        }

        let aggregated = aggregate(&batch.records, config.window_start(), config.today());
        let outcome = match (aggregated, config.forecast()) {
            (BurndownOutcome::Series(series), Some(forecast)) => {
                BurndownOutcome::Series(forecast.project(&series))
            }
            (outcome, _) => outcome,
        };

        let mut open: Vec<_> = batch.records.iter().filter(|bug| bug.open).collect();
        open.sort_by_key(|bug| bug.id);
        let open_ids: Vec<u64> = open.iter().map(|bug| bug.id).collect();
        let open_bugs = open
            .into_iter()
            .map(|bug| OpenBug::from_record(bug, config.links()))
            .collect();

        info!(
            fetched = summary.bugs_fetched,
            open = summary.open_bugs,
            closed = summary.closed_bugs,
            rejected = summary.bugs_rejected,
            "Burndown complete"
        );

        Ok(BurndownReport {
            title: generate_title(config.query()),
            summary,
            outcome,
            open_bugs,
            bug_list_url: (!open_ids.is_empty()).then(|| config.links().bug_list_url(&open_ids)),
            rejected: batch.rejected,
            window_start: config.window_start(),
            today: config.today(),
        })
    }

    /// Renders a report produced by [`Runner::run`].
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Report`] if rendering fails.
    pub fn render(&self, report: &BurndownReport) -> Result<String, RunnerError> {
        Ok(self.renderer.render_report(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bugs::BatchPolicy;
    use crate::bugzilla::{BugLinks, FetchError, SearchQuery};
    use crate::forecast::{Forecast, Velocity};
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    /// Serves a fixed search result.
    struct StaticSource {
        bugs: Option<Vec<Value>>,
    }

    impl BugSource for StaticSource {
        async fn search_bugs(&self, _query: &SearchQuery) -> Result<Vec<Value>, FetchError> {
            self.bugs.clone().ok_or(FetchError::Status { status: 503 })
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn raw_bugs() -> Vec<Value> {
        serde_json::from_value(json!([
            {
                "id": 12,
                "summary": "Closed bug",
                "is_open": false,
                "creation_time": "2024-01-02T09:00:00Z",
                "last_change_time": "2024-01-04T09:00:00Z"
            },
            {
                "id": 11,
                "summary": "Open bug",
                "is_open": true,
                "creation_time": "2024-01-02T09:00:00Z",
                "last_change_time": "2024-01-03T09:00:00Z"
            },
            {
                "id": 13,
                "summary": "Missing creation time",
                "is_open": true,
                "last_change_time": "2024-01-03T09:00:00Z"
            }
        ]))
        .unwrap()
    }

    fn config() -> RunnerConfig {
        let mut query = SearchQuery::new();
        query.push("component", "Graphics");
        let links = BugLinks::new(&Url::parse("https://bugzilla.mozilla.org/").unwrap());
        RunnerConfig::new(query, links, day(1), day(10))
    }

    #[tokio::test]
    async fn builds_report_and_skips_malformed_bugs() {
        let runner = Runner::new(StaticSource { bugs: Some(raw_bugs()) }, config());

        let report = runner.run().await.unwrap();

        assert_eq!(report.title, "Burndown: component:Graphics");
        assert_eq!(report.summary.bugs_fetched, 3);
        assert_eq!(report.summary.bugs_normalized, 2);
        assert_eq!(report.summary.bugs_rejected, 1);
        assert_eq!(report.rejected[0].bug_id(), Some(13));

        let series = report.series().unwrap();
        assert_eq!(series.dates, vec![day(1), day(2), day(4), day(10)]);
        assert_eq!(series.open_counts, vec![2, 2, 1, 1]);
        assert_eq!(series.closed_counts, vec![0, 0, 1, 1]);

        assert_eq!(report.open_bugs.len(), 1);
        assert_eq!(report.open_bugs[0].id, 11);
        assert_eq!(
            report.bug_list_url.as_deref(),
            Some("https://bugzilla.mozilla.org/buglist.cgi?bug_id=11")
        );
    }

    #[tokio::test]
    async fn abort_policy_fails_run() {
        let runner = Runner::new(
            StaticSource { bugs: Some(raw_bugs()) },
            config().with_batch_policy(BatchPolicy::Abort),
        );

        let result = runner.run().await;

        assert!(matches!(result, Err(RunnerError::Malformed(_))));
    }

    #[tokio::test]
    async fn fetch_failure_is_reported() {
        let runner = Runner::new(StaticSource { bugs: None }, config());

        let result = runner.run().await;

        assert!(matches!(result, Err(RunnerError::FetchFailed(_))));
    }

    #[tokio::test]
    async fn no_bugs_is_empty_outcome() {
        let runner = Runner::new(StaticSource { bugs: Some(Vec::new()) }, config());

        let report = runner.run().await.unwrap();

        assert!(report.outcome.is_empty());
        assert!(report.summary.is_empty());
        assert!(report.summary.all_success());
        assert!(report.bug_list_url.is_none());
        assert!(runner.render(&report).unwrap().contains("Zarro boogs found."));
    }

    #[tokio::test]
    async fn forecast_extends_series() {
        let forecast = Forecast {
            velocity: Velocity::Fixed(1.0),
            ..Forecast::default()
        };
        let runner = Runner::new(
            StaticSource { bugs: Some(raw_bugs()) },
            config().with_forecast(forecast),
        );

        let report = runner.run().await.unwrap();

        let last = report.series().unwrap().last().unwrap();
        assert_eq!(last.date, day(11));
        assert_eq!(last.open, 0);
        assert_eq!(last.closed, 2);
    }

    #[tokio::test]
    async fn custom_renderer_is_used() {
        let runner = Runner::new(StaticSource { bugs: Some(raw_bugs()) }, config())
            .with_renderer(
                ReportRenderer::new().with_bug_list_template("{{#each bugs}}#{{id}}{{/each}}"),
            );

        let report = runner.run().await.unwrap();
        let text = runner.render(&report).unwrap();

        assert!(text.ends_with("#11"));
    }
}
