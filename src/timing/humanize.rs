//! Human-readable durations.

use std::time::Duration;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const YEAR: u64 = 365 * DAY;

/// Describe a duration the way a person would say it.
///
/// Sub-second durations are "a moment"; larger ones are rounded down to the
/// largest whole unit ("a minute", "3 hours", "2 months", "2 years"). A
/// month is 30.5 days. Between one and two years the remainder is spelled
/// out ("1 year, 3 months").
pub fn natural_delta(delta: Duration) -> String {
    let secs = delta.as_secs();
    match secs {
        0 => "a moment".to_string(),
        1 => "a second".to_string(),
        s if s < MINUTE => format!("{s} seconds"),
        s if s < HOUR => plural(s / MINUTE, "a minute", "minutes"),
        s if s < DAY => plural(s / HOUR, "an hour", "hours"),
        s if s < YEAR => days_or_months(s / DAY),
        s if s < 2 * YEAR => {
            let days = (s - YEAR) / DAY;
            match months(days) {
                _ if days == 0 => "a year".to_string(),
                0 => format!("1 year, {}", plural(days, "1 day", "days")),
                1 => "1 year, 1 month".to_string(),
                n => format!("1 year, {n} months"),
            }
        }
        s => plural(s / YEAR, "a year", "years"),
    }
}

fn days_or_months(days: u64) -> String {
    match months(days) {
        0 => plural(days, "a day", "days"),
        n => plural(n, "a month", "months"),
    }
}

// Whole 30.5-day months in `days`.
fn months(days: u64) -> u64 {
    days * 2 / 61
}

fn plural(count: u64, one: &str, many: &str) -> String {
    if count == 1 {
        one.to_string()
    } else {
        format!("{count} {many}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_sub_second() {
        assert_eq!(natural_delta(Duration::from_millis(250)), "a moment");
    }

    #[test]
    fn test_seconds() {
        assert_eq!(natural_delta(secs(1)), "a second");
        assert_eq!(natural_delta(secs(12)), "12 seconds");
    }

    #[test]
    fn test_minutes_and_hours() {
        assert_eq!(natural_delta(secs(60)), "a minute");
        assert_eq!(natural_delta(secs(119)), "a minute");
        assert_eq!(natural_delta(secs(5 * 60)), "5 minutes");
        assert_eq!(natural_delta(secs(3600)), "an hour");
        assert_eq!(natural_delta(secs(3 * 3600 + 59)), "3 hours");
    }

    #[test]
    fn test_days_and_years() {
        assert_eq!(natural_delta(secs(DAY)), "a day");
        assert_eq!(natural_delta(secs(5 * DAY)), "5 days");
        assert_eq!(natural_delta(secs(30 * DAY)), "30 days");
        assert_eq!(natural_delta(secs(YEAR)), "a year");
        assert_eq!(natural_delta(secs(2 * YEAR + DAY)), "2 years");
    }

    #[test]
    fn test_months() {
        assert_eq!(natural_delta(secs(31 * DAY)), "a month");
        assert_eq!(natural_delta(secs(45 * DAY)), "a month");
        assert_eq!(natural_delta(secs(100 * DAY)), "3 months");
        assert_eq!(natural_delta(secs(364 * DAY)), "11 months");
    }

    #[test]
    fn test_year_with_remainder() {
        assert_eq!(natural_delta(secs(YEAR + DAY)), "1 year, 1 day");
        assert_eq!(natural_delta(secs(YEAR + 20 * DAY)), "1 year, 20 days");
        assert_eq!(natural_delta(secs(YEAR + 40 * DAY)), "1 year, 1 month");
        assert_eq!(natural_delta(secs(YEAR + 100 * DAY)), "1 year, 3 months");
    }
}
