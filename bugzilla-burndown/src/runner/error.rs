//! Runner error types.

use crate::bugzilla::FetchError;

/// Errors that stop a burndown run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// The Bugzilla client could not be created.
    #[error("Failed to create Bugzilla client: {0}")]
    Client(#[source] FetchError),

    /// The bug search failed.
    #[error("Failed to fetch bugs: {0}")]
    FetchFailed(#[source] FetchError),

    /// A malformed bug aborted the batch.
    #[error(transparent)]
    Malformed(#[from] crate::bugs::NormalizeError),

    /// The report could not be rendered.
    #[error(transparent)]
    Report(#[from] crate::report::ReportError),
}
