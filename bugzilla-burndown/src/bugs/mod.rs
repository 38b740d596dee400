//! Bug records and their normalization.
//!
//! Raw tracker records ([`RawBug`]) are turned into canonical
//! [`BugRecord`]s: timestamps are parsed, time tracking is derived, and the
//! three flag families are extracted.

mod batch;
mod error;
mod person;
mod raw;
mod record;

pub use batch::{normalize_batch, BatchPolicy, NormalizedBatch};
pub use error::NormalizeError;
pub use person::{parse_display_name, DisplayName, Person};
pub use raw::{BugSearchResponse, PersonDetail, RawBug};
pub use record::{BugRecord, TimeTracking};

use crate::flags::FlagFamily;
use crate::story_points::estimate_story_points;
use chrono::{DateTime, Utc};

/// Normalizes one raw bug.
///
/// Requires `id`, `summary`, `is_open`, `creation_time` and
/// `last_change_time`; timestamps must be RFC 3339. Time tracking is
/// populated only when `estimated_time` is present.
///
/// # Errors
///
/// Returns [`NormalizeError::MalformedRecord`] if a required field is missing,
/// a timestamp does not parse, or the bug was modified before it was created.
pub fn normalize(raw: &RawBug) -> Result<BugRecord, NormalizeError> {
    let id = raw.id.ok_or_else(|| NormalizeError::missing(None, "id"))?;
    let summary = raw
        .summary
        .clone()
        .ok_or_else(|| NormalizeError::missing(Some(id), "summary"))?;
    let open = raw
        .is_open
        .ok_or_else(|| NormalizeError::missing(Some(id), "is_open"))?;
    let reported_at = parse_timestamp(id, "creation_time", raw.creation_time.as_deref())?;
    let last_modified_at =
        parse_timestamp(id, "last_change_time", raw.last_change_time.as_deref())?;

    if last_modified_at < reported_at {
        return Err(NormalizeError::MalformedRecord {
            id: Some(id),
            field: "last_change_time",
            reason: format!("{last_modified_at} is before creation_time {reported_at}"),
        });
    }

    let attrs = raw.attributes();

    Ok(BugRecord {
        id,
        summary,
        open,
        reported_at,
        last_modified_at,
        time_tracking: time_tracking(raw),
        status: raw.status.clone(),
        resolution: raw.resolution.clone(),
        product: raw.product.clone(),
        component: raw.component.clone(),
        whiteboard: raw.whiteboard.clone(),
        keywords: raw.keywords.clone(),
        blocks: raw.blocks.clone(),
        depends_on: raw.depends_on.clone(),
        assigned_to: raw.assigned_to_detail.as_ref().map(Person::from_detail),
        reporter: raw.creator_detail.as_ref().map(Person::from_detail),
        status_flags: FlagFamily::Status.extract(&attrs),
        tracking_flags: FlagFamily::Tracking.extract(&attrs),
        blocking_flags: FlagFamily::Blocking.extract(&attrs),
    })
}

fn parse_timestamp(
    id: u64,
    field: &'static str,
    value: Option<&str>,
) -> Result<DateTime<Utc>, NormalizeError> {
    let value = value.ok_or_else(|| NormalizeError::missing(Some(id), field))?;
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|e| NormalizeError::MalformedRecord {
            id: Some(id),
            field,
            reason: format!("is not a timestamp ({value:?}: {e})"),
        })
}

fn time_tracking(raw: &RawBug) -> Option<TimeTracking> {
    let original_estimate_hours = raw.estimated_time?;
    let remaining_hours = raw.remaining_time.unwrap_or(0.0);
    Some(TimeTracking {
        original_estimate_hours,
        current_estimate_hours: raw.actual_time.unwrap_or(0.0) + remaining_hours,
        remaining_hours,
        story_points: estimate_story_points(original_estimate_hours),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawBug {
        serde_json::from_value(value).unwrap()
    }

    fn complete() -> serde_json::Value {
        json!({
            "id": 1044759,
            "summary": "Shumway M2",
            "is_open": false,
            "creation_time": "2014-09-11T17:00:00Z",
            "last_change_time": "2014-10-02T08:30:00Z",
            "status": "RESOLVED",
            "resolution": "FIXED",
            "component": "General",
            "keywords": ["meta"],
            "blocks": [1038057],
            "cf_status_firefox32": "fixed",
            "cf_status_firefox33": "---",
            "cf_tracking_e10s": "m2",
            "cf_blocking_fx": "---",
            "assigned_to_detail": { "real_name": "Joe Cool (:joe)", "email": "joe@example.com" }
        })
    }

    #[test]
    fn normalizes_required_fields() {
        let record = normalize(&raw(complete())).unwrap();

        assert_eq!(record.id, 1044759);
        assert_eq!(record.summary, "Shumway M2");
        assert!(!record.open);
        assert_eq!(
            record.reported_at,
            Utc.with_ymd_and_hms(2014, 9, 11, 17, 0, 0).unwrap()
        );
        assert_eq!(
            record.last_modified_at,
            Utc.with_ymd_and_hms(2014, 10, 2, 8, 30, 0).unwrap()
        );
        assert_eq!(record.time_tracking, None);
        assert_eq!(record.resolution.as_deref(), Some("FIXED"));
        assert_eq!(record.blocks, vec![1038057]);
    }

    #[test]
    fn extracts_flag_families() {
        let record = normalize(&raw(complete())).unwrap();

        assert_eq!(record.status_flags.len(), 1);
        assert_eq!(record.status_flags["firefox32"], "fixed");
        assert_eq!(record.tracking_flags["e10s"], "m2");
        assert!(record.blocking_flags.is_empty());
    }

    #[test]
    fn decomposes_assignee() {
        let record = normalize(&raw(complete())).unwrap();
        let assignee = record.assigned_to.unwrap();

        assert_eq!(assignee.name, "Joe Cool");
        assert_eq!(assignee.nick.as_deref(), Some("joe"));
        assert!(record.reporter.is_none());
    }

    #[test]
    fn builds_time_tracking_from_estimate() {
        let mut value = complete();
        value["estimated_time"] = json!(20.0);
        value["actual_time"] = json!(6.0);
        value["remaining_time"] = json!(10.0);

        let tracking = normalize(&raw(value)).unwrap().time_tracking.unwrap();

        assert_eq!(tracking.original_estimate_hours, 20.0);
        assert_eq!(tracking.current_estimate_hours, 16.0);
        assert_eq!(tracking.remaining_hours, 10.0);
        assert_eq!(tracking.story_points, 3.0);
    }

    #[test]
    fn hours_without_estimate_are_not_time_tracking() {
        let mut value = complete();
        value["actual_time"] = json!(6.0);
        value["remaining_time"] = json!(10.0);

        assert_eq!(normalize(&raw(value)).unwrap().time_tracking, None);
    }

    #[test]
    fn rejects_missing_creation_time() {
        let mut value = complete();
        value.as_object_mut().unwrap().remove("creation_time");

        let error = normalize(&raw(value)).unwrap_err();

        assert_eq!(
            error,
            NormalizeError::MalformedRecord {
                id: Some(1044759),
                field: "creation_time",
                reason: "is missing".to_string(),
            }
        );
    }

    #[test]
    fn rejects_missing_id() {
        let mut value = complete();
        value.as_object_mut().unwrap().remove("id");

        let error = normalize(&raw(value)).unwrap_err();

        assert_eq!(error.bug_id(), None);
        assert!(error.to_string().contains("<unknown>"));
    }

    #[test]
    fn rejects_unparsable_timestamp() {
        let mut value = complete();
        value["last_change_time"] = json!("yesterday");

        let error = normalize(&raw(value)).unwrap_err();

        assert!(matches!(
            error,
            NormalizeError::MalformedRecord {
                field: "last_change_time",
                ..
            }
        ));
    }

    #[test]
    fn rejects_modification_before_creation() {
        let mut value = complete();
        value["last_change_time"] = json!("2014-09-01T00:00:00Z");

        assert!(normalize(&raw(value)).is_err());
    }

    #[test]
    fn skip_policy_reports_rejected_records() {
        let mut broken = complete();
        broken["id"] = json!(2);
        broken.as_object_mut().unwrap().remove("creation_time");
        let entries = vec![complete(), broken];

        let batch = normalize_batch(&entries, BatchPolicy::Skip).unwrap();

        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(batch.rejected[0].bug_id(), Some(2));
        assert!(!batch.is_clean());
    }

    #[test]
    fn mistyped_entry_is_rejected_alone() {
        let mut mistyped = complete();
        mistyped["id"] = json!(3);
        mistyped["creation_time"] = json!(1704067200);
        let entries = vec![mistyped, complete()];

        let batch = normalize_batch(&entries, BatchPolicy::Skip).unwrap();

        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].id, 1044759);
        assert_eq!(batch.rejected.len(), 1);
        let NormalizeError::MalformedRecord { id, field, .. } = &batch.rejected[0];
        assert_eq!(*id, Some(3));
        assert_eq!(*field, "creation_time");
    }

    #[test]
    fn abort_policy_fails_whole_batch() {
        let mut broken = complete();
        broken["id"] = json!(2);
        broken.as_object_mut().unwrap().remove("creation_time");
        let entries = vec![complete(), broken];

        let error = normalize_batch(&entries, BatchPolicy::Abort).unwrap_err();

        assert_eq!(error.bug_id(), Some(2));
    }
}
