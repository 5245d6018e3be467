/// Length of a calendar event when nothing says otherwise.
pub const DEFAULT_DURATION_MINUTES: i64 = 90;

/// Buffer added past "now" when a live match outruns its event.
pub const EXTEND_MINUTES: i64 = 20;

/// Upper bound for either policy duration, keeping date arithmetic in range.
pub const MAX_POLICY_MINUTES: i64 = 7 * 24 * 60;

/// Seconds between two poll cycles in `livecal watch`.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Page size when listing a calendar's events for the day.
pub const DEFAULT_MAX_EVENTS: usize = 100;

/// Attendee cap stamped on every created event.
pub const MAX_ATTENDEES: u32 = 100;
