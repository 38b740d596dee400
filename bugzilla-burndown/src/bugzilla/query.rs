//! Bug search queries.

use std::fmt;

/// Commonly used Bugzilla search fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BugField {
    Assignee,
    Blocks,
    Component,
    DependsOn,
    HoursLeft,
    HoursWorked,
    Id,
    Keywords,
    OriginalEstimate,
    Product,
    Reported,
    Reporter,
    Resolution,
    Status,
    Summary,
    Whiteboard,
}

impl BugField {
    /// Field name as Bugzilla expects it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assignee => "assigned_to",
            Self::Blocks => "blocks",
            Self::Component => "component",
            Self::DependsOn => "depends_on",
            Self::HoursLeft => "remaining_time",
            Self::HoursWorked => "actual_time",
            Self::Id => "id",
            Self::Keywords => "keywords",
            Self::OriginalEstimate => "estimated_time",
            Self::Product => "product",
            Self::Reported => "creation_time",
            Self::Reporter => "creator",
            Self::Resolution => "resolution",
            Self::Status => "status",
            Self::Summary => "summary",
            Self::Whiteboard => "whiteboard",
        }
    }
}

impl fmt::Display for BugField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered list of `field = value` search terms.
///
/// Repeating a field ORs its values on the Bugzilla side, e.g. two
/// `component` terms match bugs in either component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    terms: Vec<(String, String)>,
}

impl SearchQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches for the given bug ids.
    #[must_use]
    pub fn ids(ids: &[u64]) -> Self {
        let mut query = Self::new();
        for id in ids {
            query.push(BugField::Id.as_str(), id.to_string());
        }
        query
    }

    /// Adds one term.
    pub fn push(&mut self, field: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.terms.push((field.into(), value.into()));
        self
    }

    /// Adds one term per comma-separated value, skipping blanks.
    pub fn push_split(&mut self, field: &str, values: &str) -> &mut Self {
        for value in values.split(',').map(str::trim).filter(|v| !v.is_empty()) {
            self.push(field, value);
        }
        self
    }

    /// Returns the terms in insertion order.
    #[must_use]
    pub fn terms(&self) -> &[(String, String)] {
        &self.terms
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Human-readable summary, e.g. `component:Graphics, whiteboard:[e10s]`.
    #[must_use]
    pub fn describe(&self) -> String {
        self.terms
            .iter()
            .map(|(field, value)| format!("{field}:{value}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchQuery {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            terms: iter
                .into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_comma_separated_values() {
        let mut query = SearchQuery::new();
        query.push_split(BugField::Component.as_str(), "Graphics, Layout,,");

        assert_eq!(
            query.terms(),
            [
                ("component".to_string(), "Graphics".to_string()),
                ("component".to_string(), "Layout".to_string()),
            ]
        );
    }

    #[test]
    fn describes_terms_in_order() {
        let query: SearchQuery = [("whiteboard", "[e10s]"), ("cf_tracking_e10s", "m3")]
            .into_iter()
            .collect();

        assert_eq!(query.describe(), "whiteboard:[e10s], cf_tracking_e10s:m3");
    }

    #[test]
    fn builds_id_query() {
        let query = SearchQuery::ids(&[1037568, 1037580]);

        assert_eq!(query.describe(), "id:1037568, id:1037580");
    }
}
