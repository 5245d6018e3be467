//! Calendar gateway backed by an external provider binary.

pub mod protocol;
pub mod provider;

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LiveCalResult;
use crate::event::{CalendarEvent, EventUpdate, NewEvent};
use crate::gateway::{CalendarGateway, CalendarInfo};
use crate::remote::protocol::{
    CreateCalendar, CreateEvent, ListCalendars, ListEvents, RemoteParams, UpdateEvent,
};
use crate::remote::provider::Provider;

/// Provider-specific parameters, forwarded untouched with every request.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RemoteConfig(pub HashMap<String, toml::Value>);

impl From<&RemoteConfig> for RemoteParams {
    fn from(config: &RemoteConfig) -> Self {
        config
            .0
            .iter()
            .filter_map(|(k, v)| serde_json::to_value(v).ok().map(|v| (k.clone(), v)))
            .collect()
    }
}

/// A calendar provider reached through its `livecal-provider-*` binary.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Remote {
    pub provider: Provider,
    #[serde(flatten)]
    pub config: RemoteConfig,
}

impl Remote {
    pub fn new(provider: Provider, config: RemoteConfig) -> Self {
        Remote { provider, config }
    }

    fn remote_config(&self) -> RemoteParams {
        RemoteParams::from(&self.config)
    }
}

impl CalendarGateway for Remote {
    async fn list_calendars(&self) -> LiveCalResult<Vec<CalendarInfo>> {
        self.provider
            .call(ListCalendars {
                remote_config: self.remote_config(),
            })
            .await
    }

    async fn create_calendar(&self, title: &str) -> LiveCalResult<String> {
        let created = self
            .provider
            .call(CreateCalendar {
                remote_config: self.remote_config(),
                title: title.to_string(),
                public: true,
            })
            .await?;
        Ok(created.id)
    }

    async fn list_events(
        &self,
        calendar_id: &str,
        since: DateTime<Utc>,
        limit: usize,
    ) -> LiveCalResult<Vec<CalendarEvent>> {
        self.provider
            .call(ListEvents {
                remote_config: self.remote_config(),
                calendar_id: calendar_id.to_string(),
                since: since.to_rfc3339_opts(SecondsFormat::Secs, true),
                max_results: limit,
            })
            .await
    }

    async fn create_event(&self, calendar_id: &str, event: &NewEvent) -> LiveCalResult<CalendarEvent> {
        self.provider
            .call(CreateEvent {
                remote_config: self.remote_config(),
                calendar_id: calendar_id.to_string(),
                event: event.clone(),
            })
            .await
    }

    async fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        update: &EventUpdate,
    ) -> LiveCalResult<CalendarEvent> {
        self.provider
            .call(UpdateEvent {
                remote_config: self.remote_config(),
                calendar_id: calendar_id.to_string(),
                event_id: event_id.to_string(),
                update: update.clone(),
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::protocol::{Command, ProviderCommand, Request};

    #[test]
    fn remote_config_is_flattened_into_requests() {
        let mut table = HashMap::new();
        table.insert("google_account".to_string(), toml::Value::String("me@example.com".into()));
        let remote = Remote::new(Provider::from_name("google"), RemoteConfig(table));

        let cmd = ListEvents {
            remote_config: remote.remote_config(),
            calendar_id: "c1".into(),
            since: "2024-05-01T00:00:00Z".into(),
            max_results: 100,
        };
        let request = Request {
            command: ListEvents::command(),
            params: serde_json::to_value(cmd).unwrap(),
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["command"], "list_events");
        assert_eq!(json["params"]["google_account"], "me@example.com");
        assert_eq!(json["params"]["calendar_id"], "c1");
        assert_eq!(request.command, Command::ListEvents);
    }
}
