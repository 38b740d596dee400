//! Validated burndown configuration.

use super::file::ConfigFile;
use super::ConfigError;
use crate::bugs::BatchPolicy;
use crate::bugzilla::{with_trailing_slash, SearchQuery};
use crate::forecast::{Forecast, Velocity};
use std::path::Path;
use tracing::debug;
use url::Url;

/// Environment variable overriding `bugzilla-url`.
pub const BUGZILLA_URL_ENV: &str = "BURNDOWN_BUGZILLA_URL";

/// Upper bound for any day-count setting (about a century).
pub const MAX_DAYS: i64 = 36_500;

/// Validated settings for a burndown run.
#[derive(Debug, Clone)]
pub struct BurndownConfig {
    /// Bugzilla web root, always ending in `/`.
    pub web_url: Url,

    /// Days of history shown before today.
    pub window_days: i64,

    pub batch_policy: BatchPolicy,

    /// Search terms from the `[[filter]]` entries.
    pub query: SearchQuery,

    /// Forecast stage, when enabled.
    pub forecast: Option<Forecast>,

    /// Contents of the custom bug-list template, if one is configured.
    pub bug_list_template: Option<String>,
}

impl BurndownConfig {
    /// Loads and validates a config file.
    ///
    /// Relative template paths resolve against the config file's directory.
    /// [`BUGZILLA_URL_ENV`] overrides the file's `bugzilla-url`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file or a referenced template cannot be
    /// read, the TOML is invalid, or a setting fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading config");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let file: ConfigFile = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_file(file, path)
    }

    /// Loads `path` if given, otherwise starts from the defaults.
    ///
    /// # Errors
    ///
    /// See [`BurndownConfig::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::from_file(ConfigFile::default(), Path::new("<defaults>")),
        }
    }

    /// Validates parsed file contents. `path` is used for error messages and
    /// to resolve relative template paths.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for unusable values and
    /// [`ConfigError::IoError`] if a template cannot be read.
    pub fn from_file(mut file: ConfigFile, path: &Path) -> Result<Self, ConfigError> {
        if let Ok(url) = std::env::var(BUGZILLA_URL_ENV) {
            debug!(url = %url, "Using Bugzilla URL from environment");
            file.bugzilla_url = url;
        }

        let path_str = path.display().to_string();
        let invalid = |message: String| ConfigError::ValidationError {
            path: path_str.clone(),
            message,
        };

        let web_url = Url::parse(&file.bugzilla_url).map_err(|e| {
            invalid(format!(
                "bugzilla-url is not a valid URL: {} ({e})",
                file.bugzilla_url
            ))
        })?;
        if !matches!(web_url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "bugzilla-url must be http or https: {}",
                file.bugzilla_url
            )));
        }

        if !(1..=MAX_DAYS).contains(&file.window_days) {
            return Err(invalid(format!("window-days must be between 1 and {MAX_DAYS}")));
        }

        for filter in &file.filters {
            if filter.field.trim().is_empty() {
                return Err(invalid("filter field must not be empty".to_string()));
            }
        }

        let forecast = &file.forecast;
        for days in [forecast.fit_period_days, forecast.horizon_days] {
            if !(1..=MAX_DAYS).contains(&days) {
                return Err(invalid(format!(
                    "forecast fit-period-days and horizon-days must be between 1 and {MAX_DAYS}"
                )));
            }
        }
        if let Some(velocity) = forecast.velocity {
            if !(velocity.is_finite() && velocity > 0.0) {
                return Err(invalid(format!(
                    "forecast velocity must be a positive number: {velocity}"
                )));
            }
        }

        let bug_list_template = match &file.report.bug_list_template {
            Some(template) => {
                let template_path = path.parent().unwrap_or(Path::new(".")).join(template);
                let content = std::fs::read_to_string(&template_path).map_err(|e| {
                    ConfigError::IoError {
                        path: template_path.display().to_string(),
                        source: e,
                    }
                })?;
                if content.trim().is_empty() {
                    return Err(invalid(format!(
                        "bug-list-template is empty: {}",
                        template_path.display()
                    )));
                }
                Some(content)
            }
            None => None,
        };

        Ok(Self {
            web_url: with_trailing_slash(&web_url),
            window_days: file.window_days,
            batch_policy: file.batch_policy,
            query: file
                .filters
                .iter()
                .map(|filter| (filter.field.as_str(), filter.value.as_str()))
                .collect(),
            forecast: forecast.enabled.then(|| Forecast {
                velocity: forecast.velocity.map_or(Velocity::Measured, Velocity::Fixed),
                fit_period_days: forecast.fit_period_days,
                horizon_days: forecast.horizon_days,
            }),
            bug_list_template,
        })
    }
}
