//! Pure datetime and duration arithmetic.
//!
//! Nothing here touches the store, the clock port, or I/O. Every function
//! is a straight value transform so the cascade algorithm in
//! [`crate::engine::reschedule`] can reason about intervals without
//! worrying about timezones or wall-clock drift beyond what callers pass in.

use chrono::{Duration, Local, NaiveDate, NaiveTime, TimeZone, Timelike};

/// A specific moment on a specific local day.
///
/// Tasks are anchored to a single local day (spec non-goal: no timezone
/// conversion, no multi-day horizons), so `Local` is the only timezone this
/// crate ever constructs.
pub type Instant = chrono::DateTime<Local>;

/// Parse an "HH:MM" 24-hour string into minutes-of-day (0..=1439).
pub fn parse_hhmm(s: &str) -> Option<u32> {
    let (h, m) = s.split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

/// Format minutes-of-day (0..=1439) as "HH:MM" 24-hour.
pub fn format_hhmm(minutes_of_day: u32) -> String {
    format!("{:02}:{:02}", minutes_of_day / 60, minutes_of_day % 60)
}

/// Format a duration in minutes as "Nh Mm", omitting zero parts.
/// Only ever prints "0m" when the total is exactly zero.
pub fn format_duration_human(total_minutes: i64) -> String {
    if total_minutes == 0 {
        return "0m".to_string();
    }
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    match (hours, minutes) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Convert a 12-hour `(hour, minute, is_pm)` triple to minutes-of-day.
///
/// `12:xx AM` is midnight (`00:xx`); `12:xx PM` is noon (`12:xx`).
pub fn from_12h(hour12: u32, minute: u32, is_pm: bool) -> Option<u32> {
    if !(1..=12).contains(&hour12) || minute > 59 {
        return None;
    }
    let hour24 = match (hour12, is_pm) {
        (12, false) => 0,  // 12:xx AM -> midnight
        (12, true) => 12,  // 12:xx PM -> noon
        (h, false) => h,
        (h, true) => h + 12,
    };
    Some(hour24 * 60 + minute)
}

/// Convert minutes-of-day to a `(hour12, minute, is_pm)` triple.
pub fn to_12h(minutes_of_day: u32) -> (u32, u32, bool) {
    let hour24 = minutes_of_day / 60;
    let minute = minutes_of_day % 60;
    let is_pm = hour24 >= 12;
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    (hour12, minute, is_pm)
}

/// Add a duration of whole minutes to an instant, minute precision.
pub fn add_minutes(instant: Instant, minutes: i64) -> Instant {
    instant + Duration::minutes(minutes)
}

/// Extract the "HH:MM" 24-hour string for an instant's local wall-clock time.
pub fn extract_hhmm(instant: Instant) -> String {
    instant.format("%H:%M").to_string()
}

/// Extract the "YYYY-MM-DD" local date for an instant.
pub fn extract_date(instant: Instant) -> String {
    instant.format("%Y-%m-%d").to_string()
}

/// Construct an instant from a "YYYY-MM-DD" date and an "HH:MM" time,
/// interpreted in the local timezone.
pub fn from_date_and_hhmm(date: &str, hhmm: &str) -> Option<Instant> {
    let naive_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let minutes = parse_hhmm(hhmm)?;
    let naive_time = NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)?;
    let naive = naive_date.and_time(naive_time);
    match Local.from_local_datetime(&naive).single() {
        Some(instant) => Some(instant),
        None => Local.from_local_datetime(&naive).earliest(),
    }
}

/// Round an instant up to the next 5-minute mark.
///
/// If rounding up would produce minute 60, carries into the next hour.
/// Seconds and sub-second parts are always cleared.
pub fn round_up_to_next_5_minutes(instant: Instant) -> Instant {
    let minute = instant.minute();
    let remainder = minute % 5;
    let bumped = if remainder == 0 && instant.second() == 0 && instant.nanosecond() == 0 {
        minute
    } else {
        minute - remainder + 5
    };
    let base = instant
        .date_naive()
        .and_hms_opt(instant.hour(), 0, 0)
        .expect("hour in range")
        .and_local_timezone(Local)
        .single()
        .unwrap_or(instant);
    add_minutes(base, i64::from(bumped))
}

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: Instant,
    pub end: Instant,
}

impl Interval {
    pub fn new(start: Instant, end: Instant) -> Self {
        Self { start, end }
    }

    /// Half-open overlap: `a.start < b.end && b.start < a.end`.
    /// Back-to-back intervals (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(date: &str, hhmm: &str) -> Instant {
        from_date_and_hhmm(date, hhmm).unwrap()
    }

    #[test]
    fn parse_and_format_hhmm_roundtrip() {
        assert_eq!(parse_hhmm("09:05"), Some(9 * 60 + 5));
        assert_eq!(parse_hhmm("23:59"), Some(23 * 60 + 59));
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("12:60"), None);
        assert_eq!(format_hhmm(9 * 60 + 5), "09:05");
        assert_eq!(format_hhmm(0), "00:00");
    }

    #[test]
    fn format_duration_human_omits_zero_parts() {
        assert_eq!(format_duration_human(0), "0m");
        assert_eq!(format_duration_human(5), "5m");
        assert_eq!(format_duration_human(60), "1h");
        assert_eq!(format_duration_human(90), "1h 30m");
        assert_eq!(format_duration_human(125), "2h 5m");
    }

    #[test]
    fn twelve_hour_conversion_handles_noon_and_midnight() {
        assert_eq!(from_12h(12, 0, false), Some(0)); // 12:00 AM -> midnight
        assert_eq!(from_12h(12, 0, true), Some(12 * 60)); // 12:00 PM -> noon
        assert_eq!(from_12h(1, 30, true), Some(13 * 60 + 30));
        assert_eq!(to_12h(0), (12, 0, false));
        assert_eq!(to_12h(12 * 60), (12, 0, true));
        assert_eq!(to_12h(13 * 60 + 30), (1, 30, true));
    }

    #[test]
    fn round_up_to_next_5_carries_the_hour() {
        let t = instant("2025-01-15", "09:55");
        let rounded = round_up_to_next_5_minutes(t);
        assert_eq!(extract_hhmm(rounded), "10:00");
    }

    #[test]
    fn round_up_to_next_5_is_identity_on_exact_mark() {
        let t = instant("2025-01-15", "09:50");
        let rounded = round_up_to_next_5_minutes(t);
        assert_eq!(extract_hhmm(rounded), "09:50");
    }

    #[test]
    fn round_up_to_next_5_bumps_mid_interval() {
        let t = instant("2025-01-15", "09:52");
        let rounded = round_up_to_next_5_minutes(t);
        assert_eq!(extract_hhmm(rounded), "09:55");
    }

    #[test]
    fn back_to_back_intervals_do_not_overlap() {
        let a = Interval::new(instant("2025-01-15", "09:00"), instant("2025-01-15", "10:00"));
        let b = Interval::new(instant("2025-01-15", "10:00"), instant("2025-01-15", "11:00"));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn identical_intervals_overlap() {
        let a = Interval::new(instant("2025-01-15", "09:00"), instant("2025-01-15", "10:00"));
        let b = a;
        assert!(a.overlaps(&b));
    }

    #[test]
    fn add_minutes_and_extract_roundtrip() {
        let t = instant("2025-01-15", "09:00");
        let shifted = add_minutes(t, 90);
        assert_eq!(extract_hhmm(shifted), "10:30");
        assert_eq!(extract_date(shifted), "2025-01-15");
    }
}
