//! CLI for Bugzilla burndown charts.
//!
//! Searches Bugzilla, prints the daily burndown table and the open-bug list,
//! and optionally writes the series as JSON for charting.

use bugzilla_burndown::bugzilla::with_trailing_slash;
use bugzilla_burndown::config::MAX_DAYS;
use bugzilla_burndown::{
    chart_json, BatchPolicy, BurndownConfig, BurndownReport, Forecast, ReportRenderer, Runner,
    RunnerConfig, RunnerError, SearchQuery,
};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

/// Bugzilla Burndown - Chart open and closed bugs for a Bugzilla search.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a burndown.toml config file.
    #[arg(long, env = "BURNDOWN_CONFIG")]
    config: Option<PathBuf>,

    /// Bugzilla web root.
    #[arg(long)]
    bugzilla_url: Option<Url>,

    /// Components to search, comma-separated.
    #[arg(long)]
    component: Option<String>,

    /// Status whiteboard substring.
    #[arg(long)]
    whiteboard: Option<String>,

    /// Bugs blocking these bug ids, comma-separated.
    #[arg(long)]
    blocks: Option<String>,

    /// Extra search term, e.g. `product=Core`. May be repeated.
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    /// First day of the chart (YYYY-MM-DD). Defaults to today minus the window.
    #[arg(long)]
    since: Option<NaiveDate>,

    /// Days of history to chart.
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..=MAX_DAYS))]
    window_days: Option<i64>,

    /// Fail instead of skipping malformed bugs.
    #[arg(long)]
    abort_on_malformed: bool,

    /// Project when open bugs and remaining work reach zero.
    #[arg(long)]
    forecast: bool,

    /// Write the burndown series as JSON to this file.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(&args).await {
        Ok(report) => {
            if let Some(path) = &args.output {
                if let Err(e) = write_chart(path, &report) {
                    error!(path = %path.display(), error = %e, "Failed to write chart data");
                    return ExitCode::from(2);
                }
            }

            if report.summary.all_success() {
                ExitCode::from(0)
            } else if report.summary.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Sets up the global tracing subscriber with compact single-line output and
/// `RUST_LOG` filtering (defaults to "info").
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: &Args) -> Result<BurndownReport, RunnerError> {
    let mut settings = BurndownConfig::load_or_default(args.config.as_deref())?;
    if let Some(url) = &args.bugzilla_url {
        settings.web_url = with_trailing_slash(url);
    }
    if let Some(window_days) = args.window_days {
        settings.window_days = window_days;
    }

    let today = Utc::now().date_naive();
    let mut config = RunnerConfig::from_config(&settings, today);

    let query = build_query(args, config.query());
    config = config.with_query(query);
    if let Some(since) = args.since {
        config = config.with_window_start(since);
    }
    if args.abort_on_malformed {
        config = config.with_batch_policy(BatchPolicy::Abort);
    }
    if args.forecast && config.forecast().is_none() {
        config = config.with_forecast(Forecast::default());
    }

    let mut renderer = ReportRenderer::new();
    if let Some(template) = &settings.bug_list_template {
        renderer = renderer.with_bug_list_template(template.clone());
    }

    let runner = Runner::for_bugzilla(&settings.web_url, config)?.with_renderer(renderer);
    let report = runner.run().await?;
    println!("{}", runner.render(&report)?);

    Ok(report)
}

/// Writes the series as JSON. Nothing is written when there were no bugs.
fn write_chart(path: &Path, report: &BurndownReport) -> Result<(), Box<dyn std::error::Error>> {
    let Some(series) = report.series() else {
        info!("No bugs to chart, skipping chart data");
        return Ok(());
    };
    std::fs::write(path, chart_json(series)?)?;
    info!(path = %path.display(), "Wrote chart data");
    Ok(())
}

/// Appends command-line search terms to the configured ones.
fn build_query(args: &Args, base: &SearchQuery) -> SearchQuery {
    let mut query = base.clone();
    if let Some(components) = &args.component {
        query.push_split("component", components);
    }
    if let Some(whiteboard) = &args.whiteboard {
        query.push("whiteboard", whiteboard.as_str());
    }
    if let Some(blocks) = &args.blocks {
        query.push_split("blocks", blocks);
    }
    for (field, value) in &args.filters {
        query.push(field.as_str(), value.as_str());
    }
    query
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}
