//! Arabic relative-time humanization ("منذ 3 ساعات", "بعد 2 يومان").

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use std::fmt;

use super::plural::counted_phrase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Past,
    Future,
}

impl Direction {
    pub fn prefix(&self) -> &'static str {
        match self {
            Direction::Past => "منذ",
            Direction::Future => "بعد",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl TimeUnit {
    /// Length of one unit in seconds. Months are 30 days, years 360.
    pub fn seconds(&self) -> u64 {
        match self {
            TimeUnit::Second => 1,
            TimeUnit::Minute => 60,
            TimeUnit::Hour => 3_600,
            TimeUnit::Day => 86_400,
            TimeUnit::Month => 2_592_000,
            TimeUnit::Year => 31_104_000,
        }
    }

    pub fn stem(&self) -> &'static str {
        match self {
            TimeUnit::Second => "ثانية",
            TimeUnit::Minute => "دقيقة",
            TimeUnit::Hour => "ساعة",
            TimeUnit::Day => "يوم",
            TimeUnit::Month => "شهر",
            TimeUnit::Year => "سنة",
        }
    }

    /// Smallest unit whose next-larger unit does not fit into `seconds`.
    pub fn for_duration(seconds: u64) -> TimeUnit {
        const BUCKETS: [TimeUnit; 5] = [
            TimeUnit::Second,
            TimeUnit::Minute,
            TimeUnit::Hour,
            TimeUnit::Day,
            TimeUnit::Month,
        ];

        BUCKETS
            .windows(2)
            .find(|pair| seconds < pair[1].seconds())
            .map(|pair| pair[0])
            .unwrap_or_else(|| {
                if seconds < TimeUnit::Year.seconds() {
                    TimeUnit::Month
                } else {
                    TimeUnit::Year
                }
            })
    }
}

/// A duration resolved to a unit, a whole count and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeMagnitude {
    pub unit: TimeUnit,
    pub count: u64,
    pub direction: Direction,
}

impl TimeMagnitude {
    /// Resolves `now - timestamp`. A negative delta, however small, means the
    /// timestamp lies in the future.
    pub fn from_delta(diff: TimeDelta) -> Self {
        let direction = if diff < TimeDelta::zero() {
            Direction::Future
        } else {
            Direction::Past
        };
        let seconds = diff.num_seconds().unsigned_abs();
        let unit = TimeUnit::for_duration(seconds);

        Self {
            unit,
            count: seconds / unit.seconds(),
            direction,
        }
    }

    pub fn between(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self::from_delta(now - timestamp)
    }

    /// The counted phrase without the direction prefix.
    pub fn phrase(&self) -> String {
        match self.unit {
            // Seconds always use the literal count.
            TimeUnit::Second => format!("{} {}", self.count, self.unit.stem()),
            unit => counted_phrase(self.count, unit.stem()),
        }
    }
}

impl fmt::Display for TimeMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.direction.prefix(), self.phrase())
    }
}

/// Humanizes `timestamp` relative to `now`.
pub fn relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    TimeMagnitude::between(timestamp, now).to_string()
}

/// Like [`relative`] for an RFC 3339 string; anything that is not a
/// timestamp is returned unchanged.
pub fn relative_or_passthrough(value: &str, now: DateTime<Utc>) -> String {
    match DateTime::parse_from_rfc3339(value.trim()) {
        Ok(timestamp) => relative(timestamp.with_timezone(&Utc), now),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_one_second_ago() {
        assert_eq!(relative(now() - Duration::seconds(1), now()), "منذ 1 ثانية");
    }

    #[test]
    fn test_zero_seconds_is_past() {
        assert_eq!(relative(now(), now()), "منذ 0 ثانية");
    }

    #[test]
    fn test_seconds_never_pluralize() {
        assert_eq!(relative(now() - Duration::seconds(2), now()), "منذ 2 ثانية");
        assert_eq!(relative(now() - Duration::seconds(59), now()), "منذ 59 ثانية");
    }

    #[test]
    fn test_ninety_seconds_is_one_minute() {
        let magnitude = TimeMagnitude::between(now() - Duration::seconds(90), now());
        assert_eq!(magnitude.unit, TimeUnit::Minute);
        assert_eq!(magnitude.count, 1);
        assert_eq!(magnitude.to_string(), "منذ 1 دقيقة");
    }

    #[test]
    fn test_two_days_ago_dual() {
        assert_eq!(relative(now() - Duration::days(2), now()), "منذ 2 يومان");
    }

    #[test]
    fn test_five_days_ahead_plural() {
        let magnitude = TimeMagnitude::between(now() + Duration::days(5), now());
        assert_eq!(magnitude.direction, Direction::Future);
        assert_eq!(magnitude.to_string(), "بعد 5 يومات");
    }

    #[test]
    fn test_four_hundred_days_is_one_year() {
        let magnitude = TimeMagnitude::between(now() - Duration::days(400), now());
        assert_eq!(magnitude.unit, TimeUnit::Year);
        assert_eq!(magnitude.count, 1);
        assert_eq!(magnitude.to_string(), "منذ 1 سنة");
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(TimeUnit::for_duration(59), TimeUnit::Second);
        assert_eq!(TimeUnit::for_duration(60), TimeUnit::Minute);
        assert_eq!(TimeUnit::for_duration(3_599), TimeUnit::Minute);
        assert_eq!(TimeUnit::for_duration(3_600), TimeUnit::Hour);
        assert_eq!(TimeUnit::for_duration(86_399), TimeUnit::Hour);
        assert_eq!(TimeUnit::for_duration(86_400), TimeUnit::Day);
        assert_eq!(TimeUnit::for_duration(2_591_999), TimeUnit::Day);
        assert_eq!(TimeUnit::for_duration(2_592_000), TimeUnit::Month);
        assert_eq!(TimeUnit::for_duration(31_103_999), TimeUnit::Month);
        assert_eq!(TimeUnit::for_duration(31_104_000), TimeUnit::Year);
    }

    #[test]
    fn test_many_form_above_ten() {
        assert_eq!(relative(now() - Duration::hours(11), now()), "منذ 11 ساعة");
        assert_eq!(relative(now() + Duration::minutes(45), now()), "بعد 45 دقيقة");
    }

    #[test]
    fn test_months() {
        assert_eq!(relative(now() - Duration::days(95), now()), "منذ 3 شهرات");
    }

    #[test]
    fn test_sub_second_future_is_future() {
        let magnitude = TimeMagnitude::from_delta(TimeDelta::milliseconds(-400));
        assert_eq!(magnitude.direction, Direction::Future);
        assert_eq!(magnitude.to_string(), "بعد 0 ثانية");
    }

    #[test]
    fn test_sub_millisecond_future_is_future() {
        assert_eq!(
            relative(now() + Duration::microseconds(500), now()),
            "بعد 0 ثانية"
        );
        assert_eq!(
            relative(now() - Duration::microseconds(500), now()),
            "منذ 0 ثانية"
        );
    }

    #[test]
    fn test_fractional_seconds_truncate() {
        assert_eq!(
            relative(now() + Duration::milliseconds(61_900), now()),
            "بعد 1 دقيقة"
        );
    }

    #[test]
    fn test_passthrough_for_non_timestamps() {
        assert_eq!(relative_or_passthrough("yesterday", now()), "yesterday");
        assert_eq!(relative_or_passthrough("", now()), "");
    }

    #[test]
    fn test_parses_rfc3339_with_offset() {
        // 14:00+03:00 is 11:00 UTC, one hour before now
        assert_eq!(
            relative_or_passthrough("2025-03-01T14:00:00+03:00", now()),
            "منذ 1 ساعة"
        );
    }
}
