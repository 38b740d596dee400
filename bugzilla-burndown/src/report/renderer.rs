//! Report renderer.

use super::{BurndownReport, OpenBug, ReportError};
use crate::burndown::BurndownSeries;
use chrono::NaiveDate;
use handlebars::{no_escape, Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde_json::{json, Value};
use std::fmt::Write as _;

/// Markdown list of open bugs followed by a link opening all of them.
pub const DEFAULT_BUG_LIST_TEMPLATE: &str = "{{#each bugs}}
- [Bug {{id}}]({{url}}) {{summary}}{{#if assignee}} ({{assignee}}){{/if}}{{#if story_points}} [{{story_points}} pts]{{/if}}
{{/each}}
{{#if bug_list_url}}
[Open bug list in Bugzilla]({{bug_list_url}})
{{/if}}";

/// Creates a configured Handlebars registry with custom helpers.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches missing variables)
/// - `eq` helper for equality comparisons
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs.register_helper("eq", Box::new(eq_helper));
    hbs
}

/// Usage: `{{#if (eq status "NEW")}}...{{/if}}`
fn eq_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param1 = h.param(0).and_then(|v| v.value().as_str());
    let param2 = h.param(1).and_then(|v| v.value().as_str());

    let result = match (param1, param2) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };

    out.write(if result { "true" } else { "" })?;
    Ok(())
}

/// Renders burndown reports as plain text and markdown.
pub struct ReportRenderer {
    handlebars: Handlebars<'static>,
    bug_list_template: String,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer {
    /// Creates a renderer using [`DEFAULT_BUG_LIST_TEMPLATE`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
            bug_list_template: DEFAULT_BUG_LIST_TEMPLATE.to_string(),
        }
    }

    /// Replaces the bug-list template.
    ///
    /// The template sees `bugs` (each with `id`, `summary`, `url`, `status`,
    /// `assignee` and `story_points`) and `bug_list_url`.
    #[must_use]
    pub fn with_bug_list_template(mut self, template: impl Into<String>) -> Self {
        self.bug_list_template = template.into();
        self
    }

    /// Renders the open-bug list.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_bug_list(
        &self,
        bugs: &[OpenBug],
        bug_list_url: Option<&str>,
    ) -> Result<String, ReportError> {
        let data = json!({
            "bugs": bugs,
            "bug_list_url": bug_list_url,
        });

        self.render_template(&self.bug_list_template, &data)
    }

    /// Renders a series as a fixed-width table.
    ///
    /// Rows dated after `today` are marked as forecast.
    #[must_use]
    pub fn render_series_table(&self, series: &BurndownSeries, today: NaiveDate) -> String {
        let mut table = String::new();
        let _ = write!(table, "{:<10}  {:>6}  {:>6}", "Date", "Open", "Closed");
        if series.has_time_tracking() {
            let _ = write!(table, "  {:>9}", "Days left");
        }
        table.push('\n');

        for point in series.points() {
            let _ = write!(
                table,
                "{:<10}  {:>6}  {:>6}",
                point.date.format("%Y-%m-%d"),
                point.open,
                point.closed
            );
            if let Some(days) = point.remaining_days {
                let _ = write!(table, "  {days:>9}");
            }
            if point.date > today {
                table.push_str("  (forecast)");
            }
            table.push('\n');
        }

        table
    }

    /// Renders a complete report: title, totals, series table, skipped bugs
    /// and the open-bug list.
    ///
    /// # Errors
    ///
    /// Returns an error if the bug-list template fails to render.
    pub fn render_report(&self, report: &BurndownReport) -> Result<String, ReportError> {
        let summary = &report.summary;
        let mut out = format!("# {}\n\n", report.title);

        let Some(series) = report.series() else {
            out.push_str("Zarro boogs found.\n");
            return Ok(out);
        };

        let _ = writeln!(
            out,
            "{} open, {} closed since {}\n",
            summary.open_bugs,
            summary.closed_bugs,
            report.window_start.format("%Y-%m-%d")
        );
        out.push_str(&self.render_series_table(series, report.today));

        if !report.rejected.is_empty() {
            let _ = writeln!(out, "\nSkipped {} malformed bug(s):", report.rejected.len());
            for error in &report.rejected {
                let _ = writeln!(out, "- {error}");
            }
        }

        if !report.open_bugs.is_empty() {
            out.push('\n');
            out.push_str(&self.render_bug_list(&report.open_bugs, report.bug_list_url.as_deref())?);
        }

        Ok(out)
    }

    fn render_template(&self, template: &str, data: &Value) -> Result<String, ReportError> {
        Ok(self.handlebars.render_template(template, data)?)
    }
}
