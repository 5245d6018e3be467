use chrono::{DateTime, Utc};
use tracing::debug;

use crate::end_time::EndTimePolicy;
use crate::error::{LiveCalError, LiveCalResult};
use crate::event::{CalendarEvent, EventUpdate, GuestSettings, NewEvent};
use crate::match_state::MatchState;
use crate::reconcile::{Action, ChangeSet, FieldChange};
use crate::timestamp::{same_instant, truncate_to_seconds};

/// Find the event mirroring a match, by exact title.
///
/// More than one event with the same title means the calendar can't be
/// trusted for this match, so nothing is written for it.
pub fn correlate<'a>(
    events: &'a [CalendarEvent],
    title: &str,
) -> LiveCalResult<Option<&'a CalendarEvent>> {
    let mut found = events.iter().filter(|e| e.title == title);
    let first = found.next();
    let extra = found.count();
    if extra > 0 {
        return Err(LiveCalError::CorrelationConflict {
            title: title.to_string(),
            count: extra + 1,
        });
    }
    Ok(first)
}

/// Decides, per match, whether its event is created, updated or left alone.
///
/// Holds no state between calls; every decision is a function of the match,
/// the event snapshot and `now`.
#[derive(Debug, Clone, Default)]
pub struct EventReconciler {
    pub policy: EndTimePolicy,
    pub guests: GuestSettings,
}

impl EventReconciler {
    pub fn new(policy: EndTimePolicy) -> Self {
        EventReconciler {
            policy,
            guests: GuestSettings::default(),
        }
    }

    /// Correlate the match against the calendar snapshot, then reconcile.
    pub fn decide(
        &self,
        m: &MatchState,
        events: &[CalendarEvent],
        now: DateTime<Utc>,
    ) -> LiveCalResult<Action> {
        let existing = correlate(events, &m.name)?;
        Ok(self.reconcile(m, existing, now))
    }

    pub fn reconcile(
        &self,
        m: &MatchState,
        existing: Option<&CalendarEvent>,
        now: DateTime<Utc>,
    ) -> Action {
        let now = truncate_to_seconds(now);

        match existing {
            None => self.create(m, now),
            Some(event) if m.is_finished() => self.reconcile_finished(m, event, now),
            Some(event) => self.reconcile_ongoing(m, event, now),
        }
    }

    fn create(&self, m: &MatchState, now: DateTime<Utc>) -> Action {
        let start = truncate_to_seconds(m.scheduled_start);
        let end = self.policy.compute_end_time(start, m.is_live(), None, now);

        Action::Create(NewEvent {
            title: m.name.clone(),
            start,
            end,
            color: m.status_color(),
            guests: self.guests.clone(),
        })
    }

    fn reconcile_ongoing(&self, m: &MatchState, event: &CalendarEvent, now: DateTime<Utc>) -> Action {
        let new_start = truncate_to_seconds(m.scheduled_start);
        let new_end = self
            .policy
            .compute_end_time(new_start, m.is_live(), Some(event.end), now);
        let new_color = m.status_color();

        let changes = ChangeSet {
            start: time_change(event.start, new_start),
            end: time_change(event.end, new_end),
            color: (event.color != new_color).then(|| FieldChange {
                old: event.color.clone(),
                new: new_color.clone(),
            }),
        };

        if changes.is_empty() {
            debug!(title = %m.name, "event already up to date");
            return Action::NoOp;
        }

        Action::Update {
            event_id: event.id.clone(),
            update: EventUpdate {
                start: new_start,
                end: new_end,
                color: new_color,
            },
            changes,
        }
    }

    /// A finished match stops extending: an end still in the future is cut
    /// to now, as long as the event has actually begun.
    fn reconcile_finished(&self, m: &MatchState, event: &CalendarEvent, now: DateTime<Utc>) -> Action {
        let new_color = m.status_color();
        let color = (event.color != new_color).then(|| FieldChange {
            old: event.color.clone(),
            new: new_color.clone(),
        });

        if event.end > now && now > event.start {
            return Action::Update {
                event_id: event.id.clone(),
                update: EventUpdate {
                    start: event.start,
                    end: now,
                    color: new_color,
                },
                changes: ChangeSet {
                    start: None,
                    end: Some(FieldChange {
                        old: event.end,
                        new: now,
                    }),
                    color,
                },
            };
        }

        if color.is_some() {
            return Action::Update {
                event_id: event.id.clone(),
                update: EventUpdate {
                    start: event.start,
                    end: event.end,
                    color: new_color,
                },
                changes: ChangeSet {
                    start: None,
                    end: None,
                    color,
                },
            };
        }

        debug!(title = %m.name, "finished event already up to date");
        Action::NoOp
    }
}

fn time_change(old: DateTime<Utc>, new: DateTime<Utc>) -> Option<FieldChange<DateTime<Utc>>> {
    if same_instant(old, new) {
        None
    } else {
        Some(FieldChange { old, new })
    }
}
