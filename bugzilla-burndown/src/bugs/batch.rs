//! Normalizing a whole fetch result.

use super::{normalize, BugRecord, NormalizeError, RawBug};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// What to do when a record in a batch fails to normalize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Keep going and report the failures alongside the good records.
    #[default]
    Skip,
    /// Fail the whole batch on the first malformed record.
    Abort,
}

/// Outcome of normalizing a batch under [`BatchPolicy::Skip`].
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    /// Records that normalized cleanly, in input order.
    pub records: Vec<BugRecord>,
    /// Records that failed, in input order.
    pub rejected: Vec<NormalizeError>,
}

impl NormalizedBatch {
    /// Returns true if every input record normalized.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Decodes and normalizes every search-result entry under the given policy.
///
/// An entry that cannot be decoded into a [`RawBug`] is treated like any
/// other malformed record.
///
/// # Errors
///
/// With [`BatchPolicy::Abort`], returns the first [`NormalizeError`]
/// encountered. With [`BatchPolicy::Skip`] this never fails; failures are
/// collected in [`NormalizedBatch::rejected`].
pub fn normalize_batch(
    entries: &[Value],
    policy: BatchPolicy,
) -> Result<NormalizedBatch, NormalizeError> {
    let mut batch = NormalizedBatch {
        records: Vec::with_capacity(entries.len()),
        rejected: Vec::new(),
    };

    for entry in entries {
        match RawBug::from_value(entry).and_then(|raw| normalize(&raw)) {
            Ok(record) => batch.records.push(record),
            Err(e) => match policy {
                BatchPolicy::Abort => return Err(e),
                BatchPolicy::Skip => {
                    warn!(error = %e, "Skipping malformed bug");
                    batch.rejected.push(e);
                }
            },
        }
    }

    Ok(batch)
}
