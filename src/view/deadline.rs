//! Deadline clock: remaining time, overdue detection and countdown labels.
//!
//! Everything here is a pure function of its inputs. The caller polls once per
//! second and keeps the previous overdue flag itself (see
//! [`crate::app::OverdueTracker`]).

use chrono::{DateTime, Duration, Utc};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Below this many minutes the countdown also shows seconds.
const SECONDS_SHOWN_BELOW_MINUTES: i64 = 5;

/// Signed time left until `deadline`. Negative once the deadline has passed.
#[must_use]
pub fn remaining(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    deadline - now
}

/// Formats a remaining duration as a short countdown label.
///
/// The label gets coarser as the deadline gets further away so that a
/// once-per-second refresh does not churn the UI:
///
/// - negative: `"Overdue"`
/// - at least a day: `"2d 3h"`
/// - at least an hour: `"3h 15m"`
/// - at least five minutes: `"12m"`
/// - one to four minutes: `"4m 10s"`
/// - under a minute: `"42s"`
///
/// # Examples
///
/// ```
/// use boostfocus::view::deadline::format_countdown;
/// use chrono::Duration;
///
/// assert_eq!(format_countdown(Duration::seconds(-1)), "Overdue");
/// assert_eq!(format_countdown(Duration::hours(27)), "1d 3h");
/// assert_eq!(format_countdown(Duration::seconds(250)), "4m 10s");
/// ```
#[must_use]
pub fn format_countdown(remaining: Duration) -> String {
    if remaining < Duration::zero() {
        return "Overdue".to_string();
    }

    let total = remaining.num_seconds();
    let days = total / SECONDS_PER_DAY;
    let hours = (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total % SECONDS_PER_MINUTE;

    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes >= SECONDS_SHOWN_BELOW_MINUTES {
        format!("{minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Returns `true` exactly on the not-overdue to overdue edge.
///
/// Used to fire an at-most-once notification per crossing. Re-arming after a
/// deadline edit is the caller's job: it resets `previous` to `false` when the
/// deadline value changes.
#[must_use]
pub const fn just_became_overdue(previous: bool, current: bool) -> bool {
    !previous && current
}

/// Whether a todo counts as overdue at `now`.
///
/// Completed todos and todos without a deadline are never overdue.
#[must_use]
pub fn is_overdue(deadline: Option<DateTime<Utc>>, now: DateTime<Utc>, completed: bool) -> bool {
    if completed {
        return false;
    }
    deadline.is_some_and(|deadline| now > deadline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, h, m, s).unwrap()
    }

    #[test]
    fn remaining_is_negative_after_deadline() {
        assert_eq!(remaining(at(10, 0, 0), at(9, 0, 0)), Duration::hours(1));
        assert_eq!(remaining(at(9, 0, 0), at(10, 0, 0)), Duration::hours(-1));
    }

    #[test]
    fn countdown_granularity_follows_distance() {
        assert_eq!(format_countdown(Duration::days(2) + Duration::hours(3) + Duration::minutes(9)), "2d 3h");
        assert_eq!(format_countdown(Duration::hours(3) + Duration::minutes(15) + Duration::seconds(7)), "3h 15m");
        assert_eq!(format_countdown(Duration::minutes(12) + Duration::seconds(30)), "12m");
        assert_eq!(format_countdown(Duration::minutes(5)), "5m");
        assert_eq!(format_countdown(Duration::minutes(4) + Duration::seconds(59)), "4m 59s");
        assert_eq!(format_countdown(Duration::minutes(1)), "1m 0s");
        assert_eq!(format_countdown(Duration::seconds(59)), "59s");
        assert_eq!(format_countdown(Duration::zero()), "0s");
    }

    #[test]
    fn countdown_reports_overdue_for_any_negative_duration() {
        assert_eq!(format_countdown(Duration::milliseconds(-1)), "Overdue");
        assert_eq!(format_countdown(Duration::days(-3)), "Overdue");
    }

    #[test]
    fn overdue_edge_fires_only_on_rising_edge() {
        assert!(just_became_overdue(false, true));
        assert!(!just_became_overdue(true, true));
        assert!(!just_became_overdue(true, false));
        assert!(!just_became_overdue(false, false));
    }

    #[test]
    fn completed_or_undated_todos_are_never_overdue() {
        let deadline = Some(at(9, 0, 0));
        assert!(is_overdue(deadline, at(9, 0, 1), false));
        assert!(!is_overdue(deadline, at(9, 0, 0), false));
        assert!(!is_overdue(deadline, at(12, 0, 0), true));
        assert!(!is_overdue(None, at(12, 0, 0), false));
    }
}
