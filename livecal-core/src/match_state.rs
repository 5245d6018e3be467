//! Per-poll snapshot of live matches.
//!
//! A `MatchState` is produced fresh by the score feed on every poll and is
//! read-only from then on. The match name is the only key used to find the
//! calendar event that mirrors it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provider colour id stored on a calendar event.
///
/// Kept as the raw provider string so events carrying colours this crate
/// doesn't know about still compare and round-trip unchanged.
///
/// Events without a colour carry the empty code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorCode(pub String);

impl ColorCode {
    pub fn new(code: impl Into<String>) -> Self {
        ColorCode(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human label for the status this colour encodes.
    pub fn status_label(&self) -> String {
        match MatchStatus::from_color(self) {
            Some(status) => status.to_string(),
            None => format!("unknown ({})", self.0),
        }
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a match is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    NotStarted,
    Live,
    Finished,
    Interrupted,
    Cancelled,
}

impl MatchStatus {
    const ALL: [MatchStatus; 5] = [
        MatchStatus::NotStarted,
        MatchStatus::Live,
        MatchStatus::Finished,
        MatchStatus::Interrupted,
        MatchStatus::Cancelled,
    ];

    /// Google Calendar colour id for this status.
    ///
    /// Sage for not started, Basil for live, Grape for finished, Lavender
    /// for interrupted and Graphite for cancelled.
    pub fn color_id(&self) -> &'static str {
        match self {
            MatchStatus::NotStarted => "2",
            MatchStatus::Live => "10",
            MatchStatus::Finished => "3",
            MatchStatus::Interrupted => "1",
            MatchStatus::Cancelled => "8",
        }
    }

    pub fn color(&self) -> ColorCode {
        ColorCode::new(self.color_id())
    }

    pub fn from_color(color: &ColorCode) -> Option<MatchStatus> {
        Self::ALL
            .into_iter()
            .find(|status| status.color_id() == color.as_str())
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchStatus::NotStarted => "not started",
            MatchStatus::Live => "live",
            MatchStatus::Finished => "finished",
            MatchStatus::Interrupted => "interrupted",
            MatchStatus::Cancelled => "cancelled",
        };
        write!(f, "{label}")
    }
}

/// One match as reported by the score feed for the current poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    /// Unique within a tournament; equals the title of the mirrored event.
    pub name: String,
    #[serde(rename = "start")]
    pub scheduled_start: DateTime<Utc>,
    pub status: MatchStatus,
}

impl MatchState {
    pub fn new(name: impl Into<String>, scheduled_start: DateTime<Utc>, status: MatchStatus) -> Self {
        MatchState {
            name: name.into(),
            scheduled_start,
            status,
        }
    }

    /// Still being played, including while play is suspended.
    pub fn is_live(&self) -> bool {
        matches!(self.status, MatchStatus::Live | MatchStatus::Interrupted)
    }

    /// Over for good, whether played out or called off.
    pub fn is_finished(&self) -> bool {
        matches!(self.status, MatchStatus::Finished | MatchStatus::Cancelled)
    }

    pub fn status_color(&self) -> ColorCode {
        self.status.color()
    }
}

/// All matches of one tournament; each tournament gets its own calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub name: String,
    #[serde(default)]
    pub matches: Vec<MatchState>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(status: MatchStatus) -> MatchState {
        MatchState::new(
            "Nadal R. - Federer R.",
            Utc.with_ymd_and_hms(2024, 5, 1, 14, 0, 0).unwrap(),
            status,
        )
    }

    #[test]
    fn live_and_finished_are_exclusive() {
        for status in MatchStatus::ALL {
            let m = at(status);
            assert!(!(m.is_live() && m.is_finished()), "{status} is both");
        }
    }

    #[test]
    fn interrupted_match_is_still_live() {
        assert!(at(MatchStatus::Interrupted).is_live());
        assert!(!at(MatchStatus::NotStarted).is_live());
    }

    #[test]
    fn cancelled_match_is_finished() {
        assert!(at(MatchStatus::Cancelled).is_finished());
        assert!(at(MatchStatus::Finished).is_finished());
    }

    #[test]
    fn colour_maps_back_to_status() {
        for status in MatchStatus::ALL {
            assert_eq!(MatchStatus::from_color(&status.color()), Some(status));
        }
        assert_eq!(MatchStatus::from_color(&ColorCode::new("11")), None);
    }

    #[test]
    fn status_label_for_unknown_colour() {
        assert_eq!(ColorCode::new("3").status_label(), "finished");
        assert_eq!(ColorCode::new("11").status_label(), "unknown (11)");
        assert_eq!(ColorCode::default().status_label(), "unknown ()");
    }

    #[test]
    fn deserializes_feed_entry() {
        let json = r#"{"name":"A vs B","start":"2024-05-01T14:00:00+00:00","status":"live"}"#;
        let m: MatchState = serde_json::from_str(json).unwrap();
        assert_eq!(m.scheduled_start, Utc.with_ymd_and_hms(2024, 5, 1, 14, 0, 0).unwrap());
        assert!(m.is_live());
        assert_eq!(m.status_color(), ColorCode::new("10"));
    }
}
