#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod bugs;
pub mod bugzilla;
pub mod burndown;
pub mod config;
pub mod flags;
pub mod forecast;
pub mod report;
pub mod runner;
pub mod story_points;
pub mod summary;

pub use bugs::{
    normalize, normalize_batch, BatchPolicy, BugRecord, NormalizeError, NormalizedBatch, Person,
    RawBug, TimeTracking,
};
pub use bugzilla::{BugLinks, BugSource, BugzillaClient, FetchError, SearchQuery};
pub use burndown::{aggregate, BurndownOutcome, BurndownPoint, BurndownSeries};
pub use config::{BurndownConfig, ConfigError};
pub use flags::{extract_flags, FlagFamily, FlagMap};
pub use forecast::{Forecast, Velocity};
pub use report::{chart_json, BurndownReport, OpenBug, ReportError, ReportRenderer};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use story_points::estimate_story_points;
pub use summary::RunSummary;
