//! Story-point sizing derived from effort-hour estimates.

/// Working hours in one day of effort.
pub const HOURS_PER_DAY: f64 = 8.0;

/// Smallest sizing unit (half a day).
const MIN_STORY_POINTS: f64 = 0.5;

/// Estimates up to this many hours get the smallest sizing.
const SMALL_TASK_HOURS: f64 = 0.5;

/// Estimates story points from an hours estimate.
///
/// Anything up to [`SMALL_TASK_HOURS`] is sized as [`MIN_STORY_POINTS`]. Larger
/// estimates are converted to work-days and rounded up to the nearest
/// Fibonacci number (1, 1, 2, 3, 5, 8, ...).
///
/// The result is meant for display; nothing downstream does arithmetic on it.
#[must_use]
pub fn estimate_story_points(estimated_hours: f64) -> f64 {
    if estimated_hours <= SMALL_TASK_HOURS {
        return MIN_STORY_POINTS;
    }

    let days = estimated_hours / HOURS_PER_DAY;
    let (mut current, mut next) = (1.0_f64, 1.0_f64);
    while current < days {
        let sum = current + next;
        current = next;
        next = sum;
    }
    current
}

/// Converts effort hours to whole work-days, rounding up.
#[must_use]
pub fn days_from_hours(hours: f64) -> i64 {
    (hours / HOURS_PER_DAY).ceil() as i64
}
