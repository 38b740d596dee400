//! Burndown forecasting.
//!
//! A [`Forecast`] is a post-processing stage over a finished
//! [`BurndownSeries`]: it only appends future-dated entries, so it can be
//! switched on or off without touching aggregation.

mod linear;

pub use linear::LinearFit;

use crate::burndown::{BurndownPoint, BurndownSeries};
use chrono::{Duration, NaiveDate};
use tracing::debug;

/// Default number of trailing days used to measure trends (four weeks).
pub const DEFAULT_FIT_PERIOD_DAYS: i64 = 28;

/// Default number of days a forecast may reach past the last entry.
pub const DEFAULT_HORIZON_DAYS: i64 = 84;

/// Where the bug-closing rate comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Velocity {
    /// A fixed number of bugs closed per day.
    Fixed(f64),
    /// Measured from the closed counts inside the fit period.
    Measured,
}

/// Extrapolates a burndown series into the future.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub velocity: Velocity,
    pub fit_period_days: i64,
    pub horizon_days: i64,
}

impl Default for Forecast {
    fn default() -> Self {
        Self {
            velocity: Velocity::Measured,
            fit_period_days: DEFAULT_FIT_PERIOD_DAYS,
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

impl Forecast {
    /// Returns a copy of `series` with projected entries appended.
    ///
    /// At most two entries are added after the last date:
    /// - the day the open count reaches zero at the current velocity;
    /// - with time tracking, the day the fitted remaining-days trend reaches
    ///   zero, if later still.
    ///
    /// Neither is added if it falls beyond the horizon.
    #[must_use]
    pub fn project(&self, series: &BurndownSeries) -> BurndownSeries {
        let mut projected = series.clone();
        let Some(last) = series.last() else {
            return projected;
        };

        let total = last.open + last.closed;
        let origin = last.date;
        let trend = remaining_days_trend(series, self.fit_start(origin), origin);
        let predicted_remaining = |offset: i64| trend.map(|fit| fit.predict_count(offset as f64));

        // Day offsets from `origin`; dates that overflow the calendar are beyond the horizon.
        let mut cursor = 0;

        if let Some(velocity) = self.velocity(series, origin).filter(|v| *v > 0.0) {
            let days = ((last.open as f64) / velocity).ceil().max(1.0);
            let within_horizon = days <= self.horizon_days as f64;
            let offset = days as i64;
            if let Some(date) = add_days(origin, offset).filter(|_| within_horizon) {
                debug!(velocity, %date, "Projected open bugs reaching zero");
                projected.push(BurndownPoint {
                    date,
                    open: 0,
                    closed: total,
                    remaining_days: predicted_remaining(offset).or(last.remaining_days),
                });
                cursor = offset;
            }
        }

        let work_done = trend
            .and_then(|fit| first_zero_offset(&fit, cursor.saturating_add(1), self.horizon_days))
            .and_then(|offset| add_days(origin, offset));
        if let Some(date) = work_done {
            debug!(%date, "Projected remaining work reaching zero");
            projected.push(BurndownPoint {
                date,
                open: 0,
                closed: total,
                remaining_days: Some(0),
            });
        }

        projected
    }

    fn fit_start(&self, last: NaiveDate) -> NaiveDate {
        Duration::try_days(self.fit_period_days)
            .and_then(|period| last.checked_sub_signed(period))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Bugs closed per day, fixed or measured over the fit period.
    fn velocity(&self, series: &BurndownSeries, last: NaiveDate) -> Option<f64> {
        match self.velocity {
            Velocity::Fixed(rate) => Some(rate),
            Velocity::Measured => measured_velocity(series, self.fit_start(last)),
        }
    }
}

/// Closed-count slope between the first and last entries on or after `since`.
#[must_use]
pub fn measured_velocity(series: &BurndownSeries, since: NaiveDate) -> Option<f64> {
    let mut window = series.points().filter(|point| point.date >= since);
    let first = window.next()?;
    let last = window.last()?;
    let elapsed = (last.date - first.date).num_days();
    if elapsed <= 0 {
        return None;
    }
    Some((last.closed - first.closed) as f64 / elapsed as f64)
}

/// Fits remaining days against day offsets from `origin`.
fn remaining_days_trend(
    series: &BurndownSeries,
    since: NaiveDate,
    origin: NaiveDate,
) -> Option<LinearFit> {
    let points: Vec<(f64, f64)> = series
        .points()
        .filter(|point| point.date >= since)
        .filter_map(|point| {
            Some((days_since(origin, point.date), point.remaining_days? as f64))
        })
        .collect();
    LinearFit::fit(&points)
}

// Small offsets keep the fitted intercept near the data.
fn days_since(origin: NaiveDate, date: NaiveDate) -> f64 {
    (date - origin).num_days() as f64
}

fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(days)?)
}

/// First offset in `from..=to` where `fit` predicts zero.
fn first_zero_offset(fit: &LinearFit, from: i64, to: i64) -> Option<i64> {
    if from > to {
        return None;
    }
    if fit.predict_count(from as f64) == 0 {
        return Some(from);
    }
    if fit.slope >= 0.0 {
        return None;
    }

    let crossing = (-fit.intercept / fit.slope).ceil();
    if !crossing.is_finite() || crossing > to as f64 {
        return None;
    }
    // Check around the crossing for rounding error.
    let crossing = (crossing as i64).max(from);
    (crossing.saturating_sub(1).max(from)..=crossing.saturating_add(1).min(to))
        .find(|&offset| fit.predict_count(offset as f64) == 0)
}
