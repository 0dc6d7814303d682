//! `HH:MM` clock arithmetic.
//!
//! Listings carry wall-clock strings rather than datetimes; all comparisons in
//! the optimizer are done on minute offsets from midnight. Parsing is lenient:
//! a malformed component counts as zero and hours beyond 23 are passed through
//! unchanged, so a single bad row never aborts an optimization. Arithmetic on
//! parsed values saturates instead of overflowing.

/// Minutes in one day, used both as the default end-of-day bound and for
/// midnight rollover.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Convert an `HH:MM` string to minutes since midnight.
///
/// Never fails. Only the first two `:`-separated components are read, so a
/// trailing seconds field is ignored (`"10:30:00"` yields 630). A missing or
/// non-numeric hour/minute contributes 0, and no range check is applied
/// (`"25:10"` yields 1510).
pub fn time_to_minutes(time: &str) -> i64 {
    let mut parts = time.split(':');
    let hours = parse_component(parts.next());
    let minutes = parse_component(parts.next());
    hours.saturating_mul(60).saturating_add(minutes)
}

fn parse_component(part: Option<&str>) -> i64 {
    part.and_then(|p| p.trim().parse::<i64>().ok()).unwrap_or(0)
}

/// Duration in minutes between two `HH:MM` times.
///
/// When `end` is earlier than `start` the screening is assumed to cross
/// midnight and a full day is added.
pub fn calculate_duration(start: &str, end: &str) -> i64 {
    let start_minutes = time_to_minutes(start);
    let mut end_minutes = time_to_minutes(end);

    if end_minutes < start_minutes {
        end_minutes = end_minutes.saturating_add(MINUTES_PER_DAY);
    }

    end_minutes.saturating_sub(start_minutes)
}

/// Format a minute offset as `HH:MM`, wrapping at 24 hours.
pub fn minutes_to_time(minutes: i64) -> String {
    let wrapped = minutes.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", wrapped / 60, wrapped % 60)
}

