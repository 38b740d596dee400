//! Record normalization error types.

use thiserror::Error;

/// Errors that can occur while normalizing a raw bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// A required field is missing or unusable.
    #[error("Malformed bug {}: {field} {reason}", display_id(.id))]
    MalformedRecord {
        /// Bug id, when the raw record carries one.
        id: Option<u64>,
        /// Raw field name that failed.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

fn display_id(id: &Option<u64>) -> String {
    id.map_or_else(|| "<unknown>".to_string(), |id| id.to_string())
}

impl NormalizeError {
    pub(crate) fn missing(id: Option<u64>, field: &'static str) -> Self {
        Self::MalformedRecord {
            id,
            field,
            reason: "is missing".to_string(),
        }
    }

    /// Returns the bug id of the failing record, if known.
    #[must_use]
    pub fn bug_id(&self) -> Option<u64> {
        match self {
            Self::MalformedRecord { id, .. } => *id,
        }
    }
}
