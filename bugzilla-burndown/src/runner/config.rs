//! Runner configuration.

use crate::bugs::BatchPolicy;
use crate::bugzilla::{BugLinks, SearchQuery};
use crate::config::BurndownConfig;
use crate::forecast::Forecast;
use chrono::{Duration, NaiveDate};

/// Configuration for a single burndown run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Search selecting the bugs to chart.
    query: SearchQuery,
    /// First day shown on the chart.
    window_start: NaiveDate,
    /// Day the chart is padded up to.
    today: NaiveDate,
    /// How malformed bugs are handled.
    batch_policy: BatchPolicy,
    /// Optional forecast stage.
    forecast: Option<Forecast>,
    /// Links back into Bugzilla for the report.
    links: BugLinks,
}

impl RunnerConfig {
    /// Creates a new configuration for a run. Malformed bugs are skipped and
    /// no forecast is made.
    pub fn new(
        query: SearchQuery,
        links: BugLinks,
        window_start: NaiveDate,
        today: NaiveDate,
    ) -> Self {
        Self {
            query,
            window_start,
            today,
            batch_policy: BatchPolicy::Skip,
            forecast: None,
            links,
        }
    }

    /// Creates a run configuration from loaded settings. The window ends on
    /// `today` and spans the configured number of days, or reaches back to
    /// the earliest representable date if that would overflow.
    pub fn from_config(config: &BurndownConfig, today: NaiveDate) -> Self {
        Self {
            query: config.query.clone(),
            window_start: Duration::try_days(config.window_days)
                .and_then(|window| today.checked_sub_signed(window))
                .unwrap_or(NaiveDate::MIN),
            today,
            batch_policy: config.batch_policy,
            forecast: config.forecast.clone(),
            links: BugLinks::new(&config.web_url),
        }
    }

    /// Sets the search query.
    pub fn with_query(mut self, query: SearchQuery) -> Self {
        self.query = query;
        self
    }

    /// Sets the first day shown on the chart.
    pub fn with_window_start(mut self, window_start: NaiveDate) -> Self {
        self.window_start = window_start;
        self
    }

    /// Sets the batch policy.
    pub fn with_batch_policy(mut self, batch_policy: BatchPolicy) -> Self {
        self.batch_policy = batch_policy;
        self
    }

    /// Enables a forecast stage.
    pub fn with_forecast(mut self, forecast: Forecast) -> Self {
        self.forecast = Some(forecast);
        self
    }

    /// Returns the search query.
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Returns the first day shown on the chart.
    pub fn window_start(&self) -> NaiveDate {
        self.window_start
    }

    /// Returns the day the chart is padded up to.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Returns the batch policy.
    pub fn batch_policy(&self) -> BatchPolicy {
        self.batch_policy
    }

    /// Returns the forecast stage, if enabled.
    pub fn forecast(&self) -> Option<&Forecast> {
        self.forecast.as_ref()
    }

    /// Returns the Bugzilla link builder.
    pub fn links(&self) -> &BugLinks {
        &self.links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BUGZILLA_URL_ENV;

    fn settings() -> BurndownConfig {
        temp_env::with_var_unset(BUGZILLA_URL_ENV, || {
            BurndownConfig::load_or_default(None).unwrap()
        })
    }

    #[test]
    fn window_ends_today() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let config = RunnerConfig::from_config(&settings(), today);

        assert_eq!(config.window_start(), NaiveDate::from_ymd_opt(2023, 12, 22).unwrap());
        assert_eq!(config.today(), today);
        assert_eq!(config.batch_policy(), BatchPolicy::Skip);
        assert!(config.forecast().is_none());
    }

    #[test]
    fn oversized_window_starts_at_earliest_date() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        for window_days in [i64::MAX, 1_000_000_000] {
            let mut settings = settings();
            settings.window_days = window_days;

            let config = RunnerConfig::from_config(&settings, today);

            assert_eq!(config.window_start(), NaiveDate::MIN);
        }
    }
}
