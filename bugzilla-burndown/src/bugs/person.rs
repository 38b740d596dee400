//! People attached to a bug and display-name decomposition.

use super::raw::PersonDetail;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

// "Joe Cool (:joe :joecool)", "Jane Doe [:jdoe]" or "Joe Cool (:joe) PTO"
static DISPLAY_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(.+)\s+[(\[]:([^\s)\]]+).*[)\]]").expect("invalid regex")
});

/// A display name split into its human-readable part and nickname.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayName {
    /// Free text before the parenthesized nick; empty when the pattern did not match.
    pub name: String,
    /// Token after the `:` marker.
    pub nick: Option<String>,
}

/// Splits a Bugzilla display name into name and nickname.
///
/// Names that do not follow the `"Name (:nick ...)"` convention are common,
/// so a non-match yields an empty name and no nick rather than an error.
#[must_use]
pub fn parse_display_name(real_name: &str) -> DisplayName {
    DISPLAY_NAME_REGEX
        .captures(real_name)
        .map(|captures| DisplayName {
            name: captures
                .get(1)
                .map_or("", |m| m.as_str())
                .trim()
                .to_string(),
            nick: captures.get(2).map(|m| m.as_str().to_string()),
        })
        .unwrap_or_default()
}

/// A person attached to a bug (assignee, reporter).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Person {
    pub name: String,
    pub nick: Option<String>,
    pub email: Option<String>,
}

impl Person {
    /// Builds a person from a raw user sub-record.
    #[must_use]
    pub fn from_detail(detail: &PersonDetail) -> Self {
        let DisplayName { name, nick } =
            parse_display_name(detail.real_name.as_deref().unwrap_or_default());
        Self {
            name,
            nick,
            email: detail.email.clone().or_else(|| detail.name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_first_nick() {
        let parsed = parse_display_name("Joe Cool (:joe :joecool)");
        assert_eq!(parsed.name, "Joe Cool");
        assert_eq!(parsed.nick.as_deref(), Some("joe"));
    }

    #[test]
    fn allows_text_after_the_nick() {
        let parsed = parse_display_name("Joe Cool (:joe) away until May");
        assert_eq!(parsed.name, "Joe Cool");
        assert_eq!(parsed.nick.as_deref(), Some("joe"));
    }

    #[test]
    fn accepts_square_brackets_and_padding() {
        let parsed = parse_display_name("  Jane Doe   [:jdoe]  ");
        assert_eq!(parsed.name, "Jane Doe");
        assert_eq!(parsed.nick.as_deref(), Some("jdoe"));
    }

    #[test]
    fn nick_stops_at_closing_bracket() {
        let parsed = parse_display_name("Chris (:cpeterson)");
        assert_eq!(parsed.nick.as_deref(), Some("cpeterson"));
    }

    #[test]
    fn falls_back_on_non_matching_names() {
        for name in ["", "Nobody", "Bob (not a nick)", "(:orphan)"] {
            let parsed = parse_display_name(name);
            assert_eq!(parsed, DisplayName::default(), "name = {name:?}");
        }
    }

    #[test]
    fn person_prefers_email_over_login() {
        let person = Person::from_detail(&PersonDetail {
            real_name: Some("Joe Cool (:joe)".to_string()),
            name: Some("joe@example.com".to_string()),
            email: None,
        });

        assert_eq!(person.name, "Joe Cool");
        assert_eq!(person.nick.as_deref(), Some("joe"));
        assert_eq!(person.email.as_deref(), Some("joe@example.com"));
    }
}
