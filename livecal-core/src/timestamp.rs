//! Timestamp helpers.
//!
//! Providers spell UTC either as `Z` or `+00:00`. Both are parsed into a
//! `DateTime<Utc>` and compared as instants, never as strings.

use chrono::{DateTime, DurationRound, NaiveTime, TimeDelta, Utc};

use crate::error::{LiveCalError, LiveCalResult};

/// Parse an RFC 3339 / ISO-8601 timestamp into UTC.
pub fn parse_utc(s: &str) -> LiveCalResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| LiveCalError::InvalidTimestamp(format!("'{s}': {e}")))
}

/// Drop everything below whole seconds.
pub fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    // duration_trunc only fails for out-of-range timestamps
    dt.duration_trunc(TimeDelta::seconds(1)).unwrap_or(dt)
}

/// Whether two instants are equal at whole-second resolution.
pub fn same_instant(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    truncate_to_seconds(a) == truncate_to_seconds(b)
}

/// Start of the UTC day containing `now`.
pub fn midnight_utc(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Format a signed delta as `+1h 30m` / `-10m`.
pub fn format_delta(delta: TimeDelta) -> String {
    let sign = if delta < TimeDelta::zero() { "-" } else { "+" };
    let secs = delta.num_seconds().unsigned_abs();
    if secs == 0 {
        return "0s".to_string();
    }
    let span = humantime::format_duration(std::time::Duration::from_secs(secs));
    format!("{sign}{span}")
}
