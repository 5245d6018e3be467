use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::{EventUpdate, NewEvent};
use crate::match_state::ColorCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Create,
    Update,
    NoOp,
}

impl ActionKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            ActionKind::Create => "+",
            ActionKind::Update => "~",
            ActionKind::NoOp => "=",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange<T> {
    pub old: T,
    pub new: T,
}

/// Which fields an update touches, with their before and after values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub start: Option<FieldChange<DateTime<Utc>>>,
    pub end: Option<FieldChange<DateTime<Utc>>>,
    pub color: Option<FieldChange<ColorCode>>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.color.is_none()
    }
}

/// What to do with one match's event this cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Create(NewEvent),
    Update {
        event_id: String,
        update: EventUpdate,
        changes: ChangeSet,
    },
    NoOp,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Create(_) => ActionKind::Create,
            Action::Update { .. } => ActionKind::Update,
            Action::NoOp => ActionKind::NoOp,
        }
    }
}
