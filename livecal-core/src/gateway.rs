//! What livecal needs from a calendar provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LiveCalResult;
use crate::event::{CalendarEvent, EventUpdate, NewEvent};

/// A calendar as listed by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarInfo {
    pub id: String,
    pub title: String,
}

/// Calendar operations the sync driver calls.
///
/// Every failure is a `ProviderError` from the core's point of view and ends
/// the cycle for that calendar. Retrying is up to the implementation.
#[allow(async_fn_in_trait)]
pub trait CalendarGateway {
    async fn list_calendars(&self) -> LiveCalResult<Vec<CalendarInfo>>;

    /// Create a publicly readable calendar and return its id.
    async fn create_calendar(&self, title: &str) -> LiveCalResult<String>;

    /// Events starting from `since`, at most `limit` of them.
    async fn list_events(
        &self,
        calendar_id: &str,
        since: DateTime<Utc>,
        limit: usize,
    ) -> LiveCalResult<Vec<CalendarEvent>>;

    async fn create_event(&self, calendar_id: &str, event: &NewEvent) -> LiveCalResult<CalendarEvent>;

    /// Returns the event as the provider stored it.
    async fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        update: &EventUpdate,
    ) -> LiveCalResult<CalendarEvent>;
}
