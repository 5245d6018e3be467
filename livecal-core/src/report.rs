//! Human-readable description of what an update changed.
//!
//! Pure formatting: the caller decides where the lines go. New values are
//! taken from the event the provider returned when one is available, since
//! that is what actually got stored.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::event::CalendarEvent;
use crate::reconcile::{ChangeSet, FieldChange};
use crate::timestamp::{format_delta, same_instant};

/// One line of a change report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    Old { field: &'static str, value: String },
    New { field: &'static str, value: String },
    Delta(String),
}

impl std::fmt::Display for ReportLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportLine::Old { field, value } => write!(f, "old {field}: {value}"),
            ReportLine::New { field, value } => write!(f, "new {field}: {value}"),
            ReportLine::Delta(delta) => write!(f, "diff: {delta}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeReporter;

impl ChangeReporter {
    /// Lines describing `changes`, using `stored` for the new values if given.
    pub fn report(&self, changes: &ChangeSet, stored: Option<&CalendarEvent>) -> Vec<ReportLine> {
        let mut lines = Vec::new();

        if let Some(change) = &changes.start {
            let new = stored.map_or(change.new, |e| e.start);
            push_time(&mut lines, "start", change.old, new);
        }

        if let Some(change) = &changes.end {
            let new = stored.map_or(change.new, |e| e.end);
            push_time(&mut lines, "end", change.old, new);
        }

        if let Some(FieldChange { old, new }) = &changes.color {
            let new = stored.map_or(new, |e| &e.color);
            if old != new {
                lines.push(ReportLine::Old {
                    field: "status",
                    value: old.status_label(),
                });
                lines.push(ReportLine::New {
                    field: "status",
                    value: new.status_label(),
                });
            }
        }

        lines
    }
}

fn push_time(lines: &mut Vec<ReportLine>, field: &'static str, old: DateTime<Utc>, new: DateTime<Utc>) {
    if same_instant(old, new) {
        return;
    }
    lines.push(ReportLine::Old {
        field,
        value: old.to_rfc3339_opts(SecondsFormat::Secs, true),
    });
    lines.push(ReportLine::New {
        field,
        value: new.to_rfc3339_opts(SecondsFormat::Secs, true),
    });
    lines.push(ReportLine::Delta(format_delta(new - old)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_state::ColorCode;
    use chrono::TimeZone;

    fn hm(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, h, m, 0).unwrap()
    }

    fn text(lines: &[ReportLine]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn end_extension_reports_delta() {
        let changes = ChangeSet {
            end: Some(FieldChange { old: hm(15, 30), new: hm(16, 0) }),
            ..Default::default()
        };
        assert_eq!(
            text(&ChangeReporter.report(&changes, None)),
            vec![
                "old end: 2024-05-01T15:30:00Z",
                "new end: 2024-05-01T16:00:00Z",
                "diff: +30m",
            ]
        );
    }

    #[test]
    fn status_change_uses_labels() {
        let changes = ChangeSet {
            color: Some(FieldChange { old: ColorCode::new("10"), new: ColorCode::new("3") }),
            ..Default::default()
        };
        assert_eq!(
            text(&ChangeReporter.report(&changes, None)),
            vec!["old status: live", "new status: finished"]
        );
    }

    #[test]
    fn provider_values_win_over_local_ones() {
        let changes = ChangeSet {
            end: Some(FieldChange { old: hm(15, 30), new: hm(15, 10) }),
            ..Default::default()
        };
        // provider stored a different end than requested
        let stored = CalendarEvent {
            id: "evt-1".into(),
            title: "A vs B".into(),
            start: hm(14, 0),
            end: hm(15, 5),
            color: ColorCode::new("3"),
        };
        let lines = text(&ChangeReporter.report(&changes, Some(&stored)));
        assert_eq!(lines[1], "new end: 2024-05-01T15:05:00Z");
        assert_eq!(lines[2], "diff: -25m");
    }

    #[test]
    fn nothing_reported_when_provider_kept_old_value() {
        let changes = ChangeSet {
            start: Some(FieldChange { old: hm(14, 0), new: hm(14, 30) }),
            ..Default::default()
        };
        let stored = CalendarEvent {
            id: "evt-1".into(),
            title: "A vs B".into(),
            start: hm(14, 0),
            end: hm(15, 30),
            color: ColorCode::new("2"),
        };
        assert!(ChangeReporter.report(&changes, Some(&stored)).is_empty());
    }

    #[test]
    fn empty_changes_produce_no_lines() {
        assert!(ChangeReporter.report(&ChangeSet::default(), None).is_empty());
    }
}
