//! Raw bug records as returned by the Bugzilla REST API.

use super::NormalizeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A user sub-record, e.g. `assigned_to_detail`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PersonDetail {
    /// Display name, conventionally `"Joe Cool (:joe)"`.
    #[serde(default)]
    pub real_name: Option<String>,

    /// Login name.
    #[serde(default)]
    pub name: Option<String>,

    /// Email address (only visible to logged-in users).
    #[serde(default)]
    pub email: Option<String>,
}

/// A bug exactly as the tracker returned it.
///
/// Every field is optional here; [`normalize`](super::normalize) decides
/// which ones are required. Custom fields such as `cf_status_firefox31` land in
/// [`extra`](Self::extra).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawBug {
    pub id: Option<u64>,
    pub summary: Option<String>,
    pub is_open: Option<bool>,
    pub creation_time: Option<String>,
    pub last_change_time: Option<String>,

    /// Original estimate in hours. Time tracking is only reported when set.
    pub estimated_time: Option<f64>,
    pub actual_time: Option<f64>,
    pub remaining_time: Option<f64>,

    pub status: Option<String>,
    pub resolution: Option<String>,
    pub product: Option<String>,
    pub component: Option<String>,
    pub whiteboard: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub blocks: Vec<u64>,
    #[serde(default)]
    pub depends_on: Vec<u64>,

    pub assigned_to_detail: Option<PersonDetail>,
    pub creator_detail: Option<PersonDetail>,

    /// Every attribute without a dedicated field above.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl RawBug {
    /// Returns the string- and boolean-valued extra attributes as text.
    ///
    /// Other JSON values (numbers, arrays, objects, null) are not flags and
    /// are left out.
    #[must_use]
    pub fn attributes(&self) -> HashMap<String, String> {
        self.extra
            .iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((key.clone(), text))
            })
            .collect()
    }
}

/// Attributes [`RawBug`] decodes into typed fields.
const TYPED_FIELDS: [&str; 18] = [
    "id",
    "summary",
    "is_open",
    "creation_time",
    "last_change_time",
    "estimated_time",
    "actual_time",
    "remaining_time",
    "status",
    "resolution",
    "product",
    "component",
    "whiteboard",
    "keywords",
    "blocks",
    "depends_on",
    "assigned_to_detail",
    "creator_detail",
];

impl RawBug {
    /// Decodes one entry of a search result.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::MalformedRecord`] naming the first typed
    /// field holding the wrong kind of JSON value. The bug id is filled in
    /// whenever the entry carries a numeric `id`.
    pub fn from_value(value: &Value) -> Result<Self, NormalizeError> {
        let Some(object) = value.as_object() else {
            return Err(NormalizeError::MalformedRecord {
                id: None,
                field: "bug",
                reason: "is not a JSON object".to_string(),
            });
        };

        let error = match Self::deserialize(value) {
            Ok(raw) => return Ok(raw),
            Err(e) => e,
        };

        // Retry without each typed field in turn to find the culprit.
        let field = TYPED_FIELDS
            .into_iter()
            .filter(|field| object.contains_key(*field))
            .find(|field| {
                let mut trimmed = object.clone();
                trimmed.remove(*field);
                Self::deserialize(Value::Object(trimmed)).is_ok()
            })
            .unwrap_or("bug");

        Err(NormalizeError::MalformedRecord {
            id: object.get("id").and_then(Value::as_u64),
            field,
            reason: format!("cannot be decoded ({error})"),
        })
    }
}

/// Top-level body of a `GET /rest/bug` response.
///
/// Entries stay as JSON so a single mistyped bug is rejected on its own by
/// [`RawBug::from_value`] instead of failing the whole response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BugSearchResponse {
    #[serde(default)]
    pub bugs: Vec<Value>,
}
