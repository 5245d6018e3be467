use std::pin::pin;
use std::time::Duration;

use anyhow::Result;
use owo_colors::OwoColorize;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info};

use crate::commands::{CycleContext, sync};

/// Run one cycle per tick until Ctrl-C.
///
/// A cycle always runs to completion; the interrupt is only honoured while
/// waiting for the next tick.
pub async fn run(ctx: &CycleContext, every_secs: u64) -> Result<()> {
    let mut ticker = interval(Duration::from_secs(every_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut shutdown = pin!(tokio::signal::ctrl_c());

    info!("polling every {every_secs}s");

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut shutdown => {
                println!("{}", "Stopped.".dimmed());
                return Ok(());
            }
        }

        if let Err(e) = sync::run(ctx).await {
            // keep polling, the next cycle re-reads feed and calendars
            error!("cycle failed: {e:#}");
            println!("{}", format!("Cycle failed: {e:#}").red());
        }
    }
}
