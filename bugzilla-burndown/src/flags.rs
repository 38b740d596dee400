//! Prefix-keyed flag extraction.
//!
//! Bugzilla encodes per-release metadata as custom fields sharing a naming
//! prefix, e.g. `cf_status_firefox31 = "affected"` or
//! `cf_tracking_e10s = "later"`. A single rule pulls any such family out of a
//! bug's attribute bag.

use std::collections::{BTreeMap, HashMap};

/// Value Bugzilla uses for "not applicable".
pub const UNSET_FLAG: &str = "---";

/// Flag short name (prefix stripped) to flag value.
pub type FlagMap = BTreeMap<String, String>;

/// The flag families tracked on a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagFamily {
    /// `cf_status_*`, e.g. `firefox32 = "fixed"`.
    Status,
    /// `cf_tracking_*`, e.g. `firefox30 = "+"`.
    Tracking,
    /// `cf_blocking_*`, e.g. `fennec10 = "+"`.
    Blocking,
}

impl FlagFamily {
    /// Attribute name prefix shared by the family.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Status => "cf_status_",
            Self::Tracking => "cf_tracking_",
            Self::Blocking => "cf_blocking_",
        }
    }

    /// Extracts this family's flags from an attribute bag.
    #[must_use]
    pub fn extract(self, attrs: &HashMap<String, String>) -> FlagMap {
        extract_flags(attrs, self.prefix())
    }
}

/// Extracts every attribute whose key starts with `prefix`.
///
/// The prefix is stripped from the output key and entries set to
/// [`UNSET_FLAG`] are left out. Keys that collide after stripping are
/// last-write-wins in the map's iteration order.
#[must_use]
pub fn extract_flags(attrs: &HashMap<String, String>, prefix: &str) -> FlagMap {
    attrs
        .iter()
        .filter(|(_, value)| value.as_str() != UNSET_FLAG)
        .filter_map(|(key, value)| {
            key.strip_prefix(prefix)
                .map(|name| (name.to_string(), value.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn strips_prefix_and_skips_unset() {
        let bag = attrs(&[
            ("cf_status_b2g_2_1", "---"),
            ("cf_status_firefox30", "unaffected"),
            ("cf_status_firefox31", "affected"),
            ("cf_status_firefox32", "fixed"),
            ("cf_tracking_e10s", "later"),
            ("summary", "Crash on startup"),
        ]);

        let flags = extract_flags(&bag, "cf_status_");

        assert_eq!(flags.len(), 3);
        assert_eq!(flags["firefox30"], "unaffected");
        assert_eq!(flags["firefox31"], "affected");
        assert_eq!(flags["firefox32"], "fixed");
        assert!(!flags.contains_key("b2g_2_1"));
    }

    #[test]
    fn strips_prefix_only_once() {
        let bag = attrs(&[("cf_blocking_cf_blocking_x", "+")]);

        let flags = FlagFamily::Blocking.extract(&bag);

        assert_eq!(flags["cf_blocking_x"], "+");
    }

    #[test]
    fn families_are_independent() {
        let bag = attrs(&[
            ("cf_blocking_fennec10", "+"),
            ("cf_blocking_fx", "---"),
            ("cf_tracking_firefox30", "+"),
            ("cf_tracking_b2g_v1_3", "---"),
            ("cf_status_firefox31", "affected"),
        ]);

        let blocking = FlagFamily::Blocking.extract(&bag);
        let tracking = FlagFamily::Tracking.extract(&bag);
        let status = FlagFamily::Status.extract(&bag);

        assert_eq!(blocking.keys().collect::<Vec<_>>(), ["fennec10"]);
        assert_eq!(tracking.keys().collect::<Vec<_>>(), ["firefox30"]);
        assert_eq!(status.keys().collect::<Vec<_>>(), ["firefox31"]);
    }

    #[test]
    fn empty_prefix_matches_everything_set() {
        let bag = attrs(&[("a", "1"), ("b", "---")]);

        let flags = extract_flags(&bag, "");

        assert_eq!(flags.len(), 1);
        assert_eq!(flags["a"], "1");
    }
}
