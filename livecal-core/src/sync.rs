//! One poll cycle for one tournament's calendar.
//!
//! The calendar's events are listed once and held as a read-only snapshot
//! while every match is reconciled against it, one at a time. Each match
//! produces at most one create or update call.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::{LiveCalError, LiveCalResult};
use crate::event::CalendarEvent;
use crate::gateway::{CalendarGateway, CalendarInfo};
use crate::match_state::{MatchState, Tournament};
use crate::reconcile::{Action, ActionKind, ChangeSet, EventReconciler};
use crate::timestamp::midnight_utc;

/// What happened to one match's event.
#[derive(Debug)]
pub enum Applied {
    Created(CalendarEvent),
    /// `event` is what the provider returned after the update.
    Updated {
        event: CalendarEvent,
        changes: ChangeSet,
    },
    Unchanged,
}

impl Applied {
    pub fn kind(&self) -> ActionKind {
        match self {
            Applied::Created(_) => ActionKind::Create,
            Applied::Updated { .. } => ActionKind::Update,
            Applied::Unchanged => ActionKind::NoOp,
        }
    }
}

#[derive(Debug)]
pub struct MatchOutcome {
    pub name: String,
    pub result: Result<Applied, LiveCalError>,
}

/// Result of reconciling every match of a tournament into its calendar.
#[derive(Debug)]
pub struct CalendarSync {
    pub calendar: CalendarInfo,
    /// Whether the calendar was created during this cycle.
    pub created: bool,
    pub outcomes: Vec<MatchOutcome>,
}

/// Find the tournament's calendar by title, creating it if missing.
pub async fn resolve_calendar<G: CalendarGateway>(
    gateway: &G,
    calendars: &[CalendarInfo],
    title: &str,
) -> LiveCalResult<(CalendarInfo, bool)> {
    if let Some(existing) = calendars.iter().find(|c| c.title == title) {
        return Ok((existing.clone(), false));
    }

    info!(calendar = %title, "calendar not found, creating it");
    let id = gateway.create_calendar(title).await?;
    Ok((
        CalendarInfo {
            id,
            title: title.to_string(),
        },
        true,
    ))
}

/// Reconcile all matches of `tournament` into its calendar.
///
/// A correlation conflict only skips the match it concerns. Provider
/// failures abort the calendar and are returned to the caller.
pub async fn sync_tournament<G: CalendarGateway>(
    gateway: &G,
    reconciler: &EventReconciler,
    calendars: &[CalendarInfo],
    tournament: &Tournament,
    now: DateTime<Utc>,
    max_events: usize,
) -> LiveCalResult<CalendarSync> {
    let (calendar, created) = resolve_calendar(gateway, calendars, &tournament.name).await?;
    let outcomes = sync_calendar(
        gateway,
        reconciler,
        &calendar.id,
        &tournament.matches,
        now,
        max_events,
    )
    .await?;

    Ok(CalendarSync {
        calendar,
        created,
        outcomes,
    })
}

pub async fn sync_calendar<G: CalendarGateway>(
    gateway: &G,
    reconciler: &EventReconciler,
    calendar_id: &str,
    matches: &[MatchState],
    now: DateTime<Utc>,
    max_events: usize,
) -> LiveCalResult<Vec<MatchOutcome>> {
    let events = gateway
        .list_events(calendar_id, midnight_utc(now), max_events)
        .await?;

    let mut outcomes = Vec::with_capacity(matches.len());

    for m in matches {
        let result = apply_match(gateway, reconciler, calendar_id, m, &events, now).await;

        match result {
            Err(e) if e.is_calendar_fatal() => return Err(e),
            Err(ref e) => warn!(calendar = %calendar_id, title = %m.name, "skipping match: {e}"),
            Ok(_) => {}
        }

        outcomes.push(MatchOutcome {
            name: m.name.clone(),
            result,
        });
    }

    Ok(outcomes)
}

async fn apply_match<G: CalendarGateway>(
    gateway: &G,
    reconciler: &EventReconciler,
    calendar_id: &str,
    m: &MatchState,
    events: &[CalendarEvent],
    now: DateTime<Utc>,
) -> LiveCalResult<Applied> {
    match reconciler.decide(m, events, now)? {
        Action::Create(new) => {
            new.validate()?;
            let created = gateway.create_event(calendar_id, &new).await?;
            info!(title = %m.name, end = %created.end, "created event");
            Ok(Applied::Created(created))
        }
        Action::Update {
            event_id,
            update,
            changes,
        } => {
            update.validate()?;
            let stored = gateway.update_event(calendar_id, &event_id, &update).await?;
            info!(title = %m.name, end = %stored.end, "updated event");
            Ok(Applied::Updated {
                event: stored,
                changes,
            })
        }
        Action::NoOp => Ok(Applied::Unchanged),
    }
}

/// Per-cycle totals across calendars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleCounts {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl CycleCounts {
    pub fn add(&mut self, outcomes: &[MatchOutcome]) {
        for outcome in outcomes {
            match &outcome.result {
                Ok(applied) => match applied.kind() {
                    ActionKind::Create => self.created += 1,
                    ActionKind::Update => self.updated += 1,
                    ActionKind::NoOp => self.unchanged += 1,
                },
                Err(_) => self.failed += 1,
            }
        }
    }
}
