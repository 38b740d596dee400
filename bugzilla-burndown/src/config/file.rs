//! Config file deserialization.

use crate::bugs::BatchPolicy;
use crate::bugzilla::DEFAULT_BUGZILLA_URL;
use crate::forecast::{DEFAULT_FIT_PERIOD_DAYS, DEFAULT_HORIZON_DAYS};
use serde::Deserialize;
use std::path::PathBuf;

/// Default chart window: three four-week months.
pub const DEFAULT_WINDOW_DAYS: i64 = 84;

/// Contents of a `burndown.toml` file, before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    /// Bugzilla web root (defaults to Mozilla's Bugzilla).
    #[serde(default = "default_bugzilla_url")]
    pub bugzilla_url: String,

    /// Days of history shown before today.
    #[serde(default = "default_window_days")]
    pub window_days: i64,

    /// How malformed bugs are handled.
    #[serde(default)]
    pub batch_policy: BatchPolicy,

    /// Search terms, in order.
    #[serde(default, rename = "filter")]
    pub filters: Vec<FilterTerm>,

    #[serde(default)]
    pub forecast: ForecastSection,

    #[serde(default)]
    pub report: ReportSection,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            bugzilla_url: default_bugzilla_url(),
            window_days: default_window_days(),
            batch_policy: BatchPolicy::default(),
            filters: Vec::new(),
            forecast: ForecastSection::default(),
            report: ReportSection::default(),
        }
    }
}

/// One `[[filter]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterTerm {
    pub field: String,
    pub value: String,
}

/// The `[forecast]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ForecastSection {
    #[serde(default)]
    pub enabled: bool,

    /// Fixed bugs closed per day; measured from the series when absent.
    #[serde(default)]
    pub velocity: Option<f64>,

    #[serde(default = "default_fit_period_days")]
    pub fit_period_days: i64,

    #[serde(default = "default_horizon_days")]
    pub horizon_days: i64,
}

impl Default for ForecastSection {
    fn default() -> Self {
        Self {
            enabled: false,
            velocity: None,
            fit_period_days: default_fit_period_days(),
            horizon_days: default_horizon_days(),
        }
    }
}

/// The `[report]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ReportSection {
    /// Handlebars template for the open-bug list, relative to the config file.
    #[serde(default)]
    pub bug_list_template: Option<PathBuf>,
}

fn default_bugzilla_url() -> String {
    DEFAULT_BUGZILLA_URL.to_string()
}

fn default_window_days() -> i64 {
    DEFAULT_WINDOW_DAYS
}

fn default_fit_period_days() -> i64 {
    DEFAULT_FIT_PERIOD_DAYS
}

fn default_horizon_days() -> i64 {
    DEFAULT_HORIZON_DAYS
}
