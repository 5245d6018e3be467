pub mod calendars;
pub mod sync;
pub mod watch;

use std::path::PathBuf;

use anyhow::Result;
use livecal_core::config::LivecalConfig;
use livecal_core::reconcile::EventReconciler;
use livecal_core::remote::Remote;

/// Everything one poll cycle needs, resolved from config and flags.
pub struct CycleContext {
    pub remote: Remote,
    pub reconciler: EventReconciler,
    pub feed: PathBuf,
    pub tournament_limit: Option<usize>,
    pub max_events: usize,
}

impl CycleContext {
    pub fn from_config(config: &LivecalConfig) -> Result<Self> {
        let Some(feed) = config.feed_path() else {
            anyhow::bail!(
                "No score feed configured.\n\n\
                Pass one with:\n  \
                livecal sync --feed <scores.json>\n\n\
                or set `feed` in {}",
                LivecalConfig::config_path()?.display()
            );
        };

        Ok(CycleContext {
            remote: config.remote()?,
            reconciler: EventReconciler::new(config.policy()?),
            feed,
            tournament_limit: config.tournament_limit,
            max_events: config.max_events,
        })
    }
}
