//! Report rendering error types.

/// Report rendering error.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Handlebars rendering error.
    #[error("Template rendering error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    /// Chart data could not be serialized.
    #[error("Chart serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}
