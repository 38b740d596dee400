//! Configuration loading.
//!
//! Settings come from an optional `burndown.toml`:
//!
//! ```toml
//! bugzilla-url = "https://bugzilla.mozilla.org/"
//! window-days = 84
//! batch-policy = "skip"
//!
//! [[filter]]
//! field = "component"
//! value = "Graphics"
//!
//! [forecast]
//! enabled = true
//! velocity = 1.0
//!
//! [report]
//! bug-list-template = "templates/bugs.md.hbs"
//! ```

mod error;
mod file;
mod settings;

pub use error::ConfigError;
pub use file::{ConfigFile, FilterTerm, ForecastSection, ReportSection, DEFAULT_WINDOW_DAYS};
pub use settings::{BurndownConfig, BUGZILLA_URL_ENV, MAX_DAYS};
