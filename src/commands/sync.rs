use anyhow::Result;
use chrono::Utc;
use livecal_core::feed::ScoreSnapshot;
use livecal_core::gateway::CalendarGateway;
use livecal_core::sync::{CycleCounts, sync_tournament};
use owo_colors::OwoColorize;
use tracing::error;

use crate::commands::CycleContext;
use crate::render::{CalendarSyncRender, Render};
use crate::utils::tui;

pub async fn run(ctx: &CycleContext) -> Result<CycleCounts> {
    let snapshot = ScoreSnapshot::load(&ctx.feed)?;
    let tournaments = snapshot.limited(ctx.tournament_limit);

    let spinner = tui::create_spinner("Fetching calendars".to_string());
    let result = ctx.remote.list_calendars().await;
    spinner.finish_and_clear();
    let mut calendars = result?;

    let mut counts = CycleCounts::default();
    let mut failed_calendars = 0;

    for (i, tournament) in tournaments.iter().enumerate() {
        let spinner = tui::create_spinner(tournament.render());
        let now = Utc::now();
        let result = sync_tournament(
            &ctx.remote,
            &ctx.reconciler,
            &calendars,
            tournament,
            now,
            ctx.max_events,
        )
        .await;
        spinner.finish_and_clear();

        println!("{}", tournament.render());

        match result {
            Ok(synced) => {
                println!("{}", synced.render_outcomes());
                counts.add(&synced.outcomes);
                if synced.created {
                    calendars.push(synced.calendar);
                }
            }
            Err(e) => {
                error!(tournament = %tournament.name, "calendar sync failed: {e}");
                println!("   {}", e.to_string().red());
                failed_calendars += 1;
            }
        }

        if i < tournaments.len() - 1 {
            println!();
        }
    }

    println!("\n{}", counts.render());
    if failed_calendars > 0 {
        println!(
            "{}",
            format!("{failed_calendars} calendar(s) could not be synced").red()
        );
    }

    Ok(counts)
}
