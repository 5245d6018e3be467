//! Score snapshot written by the scraper and re-read every cycle.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LiveCalError, LiveCalResult};
use crate::match_state::Tournament;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    #[serde(default)]
    pub tournaments: Vec<Tournament>,
}

impl ScoreSnapshot {
    pub fn load(path: &Path) -> LiveCalResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| LiveCalError::Feed(format!("Could not read {}: {e}", path.display())))?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> LiveCalResult<Self> {
        serde_json::from_str(contents).map_err(|e| LiveCalError::Feed(e.to_string()))
    }

    /// Tournaments to process this cycle, honouring an optional limit.
    pub fn limited(&self, limit: Option<usize>) -> &[Tournament] {
        match limit {
            Some(n) => &self.tournaments[..n.min(self.tournaments.len())],
            None => &self.tournaments,
        }
    }
}
