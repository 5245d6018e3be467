use anyhow::Result;
use livecal_core::gateway::CalendarGateway;
use livecal_core::remote::Remote;
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::utils::tui;

pub async fn run(remote: &Remote) -> Result<()> {
    let spinner = tui::create_spinner("Fetching calendars".to_string());
    let result = remote.list_calendars().await;
    spinner.finish_and_clear();

    let calendars = result?;
    if calendars.is_empty() {
        println!("{}", "No calendars".dimmed());
        return Ok(());
    }

    for calendar in &calendars {
        println!("{} {}", calendar.render(), calendar.id.dimmed());
    }

    Ok(())
}
