//! When an event should end, given the state of its match.
//!
//! End times only ever move forward. A match whose start moves earlier keeps
//! its previously stored end; retracting it would fight the live extension
//! on the next poll.

use chrono::{DateTime, TimeDelta, Utc};

use crate::constants::{DEFAULT_DURATION_MINUTES, EXTEND_MINUTES, MAX_POLICY_MINUTES};
use crate::error::{LiveCalError, LiveCalResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndTimePolicy {
    /// Expected length of a match.
    pub default_duration: TimeDelta,
    /// How far past "now" a live match that overran gets pushed.
    pub extend_by: TimeDelta,
}

impl Default for EndTimePolicy {
    fn default() -> Self {
        EndTimePolicy {
            default_duration: TimeDelta::minutes(DEFAULT_DURATION_MINUTES),
            extend_by: TimeDelta::minutes(EXTEND_MINUTES),
        }
    }
}

impl EndTimePolicy {
    /// Build a policy from configured minutes.
    ///
    /// The default duration must be positive so a created event never ends
    /// before it starts; the extension may be zero.
    pub fn new(default_duration_minutes: i64, extend_minutes: i64) -> LiveCalResult<Self> {
        if default_duration_minutes <= 0 {
            return Err(LiveCalError::Config(format!(
                "default_duration_minutes must be positive, got {default_duration_minutes}"
            )));
        }
        if extend_minutes < 0 {
            return Err(LiveCalError::Config(format!(
                "extend_minutes must not be negative, got {extend_minutes}"
            )));
        }

        Ok(EndTimePolicy {
            default_duration: policy_minutes("default_duration_minutes", default_duration_minutes)?,
            extend_by: policy_minutes("extend_minutes", extend_minutes)?,
        })
    }

    pub fn baseline(&self, scheduled_start: DateTime<Utc>) -> DateTime<Utc> {
        scheduled_start + self.default_duration
    }

    /// Compute the end time for an event.
    ///
    /// Without `existing_end` this is the creation path: the baseline, pushed
    /// past `now` if the match is live and already overran it. With
    /// `existing_end` the stored value is raised to the baseline when the
    /// match was rescheduled later, then pushed past `now` the same way.
    pub fn compute_end_time(
        &self,
        scheduled_start: DateTime<Utc>,
        is_live: bool,
        existing_end: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> DateTime<Utc> {
        let baseline = self.baseline(scheduled_start);

        let mut end = match existing_end {
            Some(existing) => existing.max(baseline),
            None => baseline,
        };

        if is_live && end < now {
            end = now + self.extend_by;
        }

        end
    }
}

fn policy_minutes(key: &str, minutes: i64) -> LiveCalResult<TimeDelta> {
    TimeDelta::try_minutes(minutes)
        .filter(|_| minutes <= MAX_POLICY_MINUTES)
        .ok_or_else(|| {
            LiveCalError::Config(format!(
                "{key} must be at most {MAX_POLICY_MINUTES} minutes, got {minutes}"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn hm(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, h, m, 0).unwrap()
    }

    #[test]
    fn not_live_creation_uses_default_duration() {
        let policy = EndTimePolicy::default();
        assert_eq!(policy.compute_end_time(hm(14, 0), false, None, hm(13, 0)), hm(15, 30));
    }

    #[test]
    fn not_live_creation_never_extends_past_now() {
        let policy = EndTimePolicy::default();
        assert_eq!(policy.compute_end_time(hm(14, 0), false, None, hm(16, 0)), hm(15, 30));
    }

    #[test]
    fn live_creation_after_default_duration_extends_past_now() {
        let policy = EndTimePolicy::default();
        assert_eq!(policy.compute_end_time(hm(14, 0), true, None, hm(15, 40)), hm(16, 0));
    }

    #[test]
    fn live_creation_within_default_duration_keeps_baseline() {
        let policy = EndTimePolicy::default();
        assert_eq!(policy.compute_end_time(hm(14, 0), true, None, hm(15, 0)), hm(15, 30));
    }

    #[test]
    fn existing_end_is_raised_when_match_moves_later() {
        let policy = EndTimePolicy::default();
        // moved from 14:00 to 14:45
        let end = policy.compute_end_time(hm(14, 45), false, Some(hm(15, 30)), hm(14, 0));
        assert_eq!(end, hm(16, 15));
    }

    #[test]
    fn existing_end_is_kept_when_match_moves_earlier() {
        let policy = EndTimePolicy::default();
        // moved from 14:00 to 13:30; end stays at 15:30
        let end = policy.compute_end_time(hm(13, 30), false, Some(hm(15, 30)), hm(13, 0));
        assert_eq!(end, hm(15, 30));
    }

    #[test]
    fn live_update_past_end_extends() {
        let policy = EndTimePolicy::default();
        let end = policy.compute_end_time(hm(14, 0), true, Some(hm(15, 30)), hm(15, 40));
        assert_eq!(end, hm(16, 0));
    }

    #[test]
    fn live_update_before_end_is_unchanged() {
        let policy = EndTimePolicy::default();
        let end = policy.compute_end_time(hm(14, 0), true, Some(hm(16, 0)), hm(15, 50));
        assert_eq!(end, hm(16, 0));
    }

    #[test]
    fn live_end_is_monotonic_over_time() {
        let policy = EndTimePolicy::default();
        let start = hm(14, 0);
        let mut previous = policy.compute_end_time(start, true, None, start);
        let mut now = start;
        for _ in 0..60 {
            now += TimeDelta::minutes(7);
            let next = policy.compute_end_time(start, true, Some(previous), now);
            assert!(next >= previous, "{next} < {previous} at {now}");
            assert!(next >= now, "live end {next} sits in the past at {now}");
            previous = next;
        }
    }

    #[test]
    fn custom_durations() {
        let policy = EndTimePolicy::new(120, 10).unwrap();
        assert_eq!(policy.compute_end_time(hm(14, 0), false, None, hm(14, 0)), hm(16, 0));
        assert_eq!(policy.compute_end_time(hm(14, 0), true, None, hm(16, 5)), hm(16, 15));
    }

    #[test]
    fn zero_extension_is_allowed() {
        let policy = EndTimePolicy::new(90, 0).unwrap();
        assert_eq!(policy.compute_end_time(hm(14, 0), true, None, hm(15, 40)), hm(15, 40));
    }

    #[test]
    fn non_positive_duration_is_rejected() {
        assert!(matches!(EndTimePolicy::new(0, 20), Err(LiveCalError::Config(_))));
        assert!(matches!(EndTimePolicy::new(-30, 20), Err(LiveCalError::Config(_))));
    }

    #[test]
    fn negative_extension_is_rejected() {
        assert!(matches!(EndTimePolicy::new(90, -1), Err(LiveCalError::Config(_))));
    }

    #[test]
    fn huge_minutes_are_rejected_not_panicking() {
        assert!(matches!(EndTimePolicy::new(90, i64::MAX), Err(LiveCalError::Config(_))));
        assert!(matches!(EndTimePolicy::new(i64::MAX, 20), Err(LiveCalError::Config(_))));
        assert!(matches!(
            EndTimePolicy::new(MAX_POLICY_MINUTES + 1, 20),
            Err(LiveCalError::Config(_))
        ));
        assert!(EndTimePolicy::new(MAX_POLICY_MINUTES, MAX_POLICY_MINUTES).is_ok());
    }
}
