//! Defines the JSON protocol used for communication between livecal
//! and provider binaries over stdin/stdout.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::event::{CalendarEvent, EventUpdate, NewEvent};
use crate::gateway::CalendarInfo;

pub type RemoteParams = serde_json::Map<String, serde_json::Value>;

pub trait ProviderCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ListCalendars,
    CreateCalendar,
    ListEvents,
    CreateEvent,
    UpdateEvent,
}

/// Request sent from livecal to provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent from provider to livecal.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

/// List every calendar of the configured account.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListCalendars {
    #[serde(flatten)]
    pub remote_config: RemoteParams,
}

impl ProviderCommand for ListCalendars {
    type Response = Vec<CalendarInfo>;
    fn command() -> Command {
        Command::ListCalendars
    }
}

/// Create a calendar. `public` asks for world-readable access.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCalendar {
    #[serde(flatten)]
    pub remote_config: RemoteParams,
    pub title: String,
    pub public: bool,
}

impl ProviderCommand for CreateCalendar {
    type Response = CalendarInfo;
    fn command() -> Command {
        Command::CreateCalendar
    }
}

/// List events of one calendar starting from `since`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListEvents {
    #[serde(flatten)]
    pub remote_config: RemoteParams,
    pub calendar_id: String,
    pub since: String,
    pub max_results: usize,
}

impl ProviderCommand for ListEvents {
    type Response = Vec<CalendarEvent>;
    fn command() -> Command {
        Command::ListEvents
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEvent {
    #[serde(flatten)]
    pub remote_config: RemoteParams,
    pub calendar_id: String,
    pub event: NewEvent,
}

impl ProviderCommand for CreateEvent {
    type Response = CalendarEvent;
    fn command() -> Command {
        Command::CreateEvent
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateEvent {
    #[serde(flatten)]
    pub remote_config: RemoteParams,
    pub calendar_id: String,
    pub event_id: String,
    pub update: EventUpdate,
}

impl ProviderCommand for UpdateEvent {
    type Response = CalendarEvent;
    fn command() -> Command {
        Command::UpdateEvent
    }
}
