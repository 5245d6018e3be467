//! Calendar-side event types.
//!
//! `CalendarEvent` is what the provider stores. `NewEvent` and `EventUpdate`
//! are immutable field sets handed to the provider; the event the provider
//! returns is the authoritative post-state.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_ATTENDEES;
use crate::error::{LiveCalError, LiveCalResult};
use crate::match_state::ColorCode;

/// An event as stored by the calendar provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Assigned by the provider, never changes.
    pub id: String,
    /// Set from the match name at creation and never rewritten.
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Empty for events created without a colour, e.g. by hand.
    #[serde(default)]
    pub color: ColorCode,
}

impl CalendarEvent {
    /// The event as it would read after `update` is stored.
    pub fn with_update(&self, update: &EventUpdate) -> CalendarEvent {
        CalendarEvent {
            id: self.id.clone(),
            title: self.title.clone(),
            start: update.start,
            end: update.end,
            color: update.color.clone(),
        }
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Sharing settings stamped on every created event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestSettings {
    pub max_attendees: u32,
    pub guests_can_invite_others: bool,
    pub guests_can_see_other_guests: bool,
    pub anyone_can_add_self: bool,
}

impl Default for GuestSettings {
    fn default() -> Self {
        GuestSettings {
            max_attendees: MAX_ATTENDEES,
            guests_can_invite_others: true,
            guests_can_see_other_guests: true,
            anyone_can_add_self: true,
        }
    }
}

/// Fields for an event that doesn't exist yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub color: ColorCode,
    #[serde(flatten)]
    pub guests: GuestSettings,
}

impl NewEvent {
    /// The event as it would read once stored under `id`.
    pub fn into_event(self, id: impl Into<String>) -> CalendarEvent {
        CalendarEvent {
            id: id.into(),
            title: self.title,
            start: self.start,
            end: self.end,
            color: self.color,
        }
    }

    pub fn validate(&self) -> LiveCalResult<()> {
        check_ordering(self.start, self.end)
    }
}

/// Replacement time and colour fields for an existing event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventUpdate {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub color: ColorCode,
}

impl EventUpdate {
    pub fn validate(&self) -> LiveCalResult<()> {
        check_ordering(self.start, self.end)
    }
}

fn check_ordering(start: DateTime<Utc>, end: DateTime<Utc>) -> LiveCalResult<()> {
    if end < start {
        return Err(LiveCalError::InvalidTimeOrdering { start, end });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn end_before_start_is_rejected() {
        let update = EventUpdate {
            start: Utc.with_ymd_and_hms(2024, 5, 1, 14, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 5, 1, 13, 59, 0).unwrap(),
            color: ColorCode::new("3"),
        };
        assert!(matches!(
            update.validate(),
            Err(LiveCalError::InvalidTimeOrdering { .. })
        ));
    }

    #[test]
    fn zero_length_event_is_allowed() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 14, 0, 0).unwrap();
        let update = EventUpdate {
            start: at,
            end: at,
            color: ColorCode::new("3"),
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn event_accepts_both_utc_spellings() {
        let json = r#"{"id":"abc","title":"A vs B","start":"2024-05-01T14:00:00Z","end":"2024-05-01T15:30:00+00:00","color":"2"}"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.start, Utc.with_ymd_and_hms(2024, 5, 1, 14, 0, 0).unwrap());
        assert_eq!(event.end, Utc.with_ymd_and_hms(2024, 5, 1, 15, 30, 0).unwrap());
    }

    #[test]
    fn event_without_colour_decodes_with_empty_code() {
        let json = r#"[
            {"id":"x","title":"Lunch","start":"2024-05-01T12:00:00Z","end":"2024-05-01T13:00:00Z"},
            {"id":"y","title":"A vs B","start":"2024-05-01T14:00:00Z","end":"2024-05-01T15:30:00Z","color":"10"}
        ]"#;
        let events: Vec<CalendarEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].color, ColorCode::default());
        assert_eq!(events[1].color, ColorCode::new("10"));
    }

    #[test]
    fn new_event_carries_guest_settings_flat() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 14, 0, 0).unwrap();
        let new = NewEvent {
            title: "A vs B".into(),
            start: at,
            end: at,
            color: ColorCode::new("2"),
            guests: GuestSettings::default(),
        };
        let value = serde_json::to_value(&new).unwrap();
        assert_eq!(value["max_attendees"], 100);
        assert_eq!(value["anyone_can_add_self"], true);
    }
}
