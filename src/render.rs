//! TUI rendering traits for livecal types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to livecal-core types using owo_colors.

use chrono::{DateTime, Utc};
use livecal_core::event::CalendarEvent;
use livecal_core::gateway::CalendarInfo;
use livecal_core::match_state::Tournament;
use livecal_core::reconcile::ActionKind;
use livecal_core::report::{ChangeReporter, ReportLine};
use livecal_core::sync::{Applied, CalendarSync, CycleCounts, MatchOutcome};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for ActionKind {
    fn render(&self) -> String {
        let symbol = self.symbol();
        match self {
            ActionKind::Create => symbol.green().to_string(),
            ActionKind::Update => symbol.yellow().to_string(),
            ActionKind::NoOp => symbol.dimmed().to_string(),
        }
    }
}

impl Render for Tournament {
    fn render(&self) -> String {
        format!("📅 {}", self.name)
    }
}

impl Render for CalendarInfo {
    fn render(&self) -> String {
        format!("📅 {}", self.title)
    }
}

impl Render for CalendarEvent {
    fn render(&self) -> String {
        format!("{} → {}", short_time(self.start), short_time(self.end))
    }
}

impl Render for ReportLine {
    fn render(&self) -> String {
        match self {
            ReportLine::Old { .. } => self.to_string().red().to_string(),
            ReportLine::New { .. } => self.to_string().green().to_string(),
            ReportLine::Delta(_) => self.to_string().dimmed().to_string(),
        }
    }
}

impl Render for MatchOutcome {
    fn render(&self) -> String {
        match &self.result {
            Ok(Applied::Created(event)) => format!(
                "{} {} {}",
                ActionKind::Create.render(),
                self.name.green(),
                event.render().dimmed()
            ),
            Ok(Applied::Updated { event, changes }) => {
                let mut lines = vec![format!(
                    "{} {} {}",
                    ActionKind::Update.render(),
                    self.name.yellow(),
                    event.render().dimmed()
                )];
                lines.extend(
                    ChangeReporter
                        .report(changes, Some(event))
                        .iter()
                        .map(|line| format!("      {}", line.render())),
                );
                lines.join("\n")
            }
            Ok(Applied::Unchanged) => format!("{} {}", ActionKind::NoOp.render(), self.name.dimmed()),
            Err(e) => format!("{} {}: {}", "!".red(), self.name, e.to_string().red()),
        }
    }
}

impl Render for CycleCounts {
    fn render(&self) -> String {
        format!(
            "Created {}, updated {}, unchanged {}, failed {}",
            self.created, self.updated, self.unchanged, self.failed
        )
    }
}

/// Threshold for compact view (collapse unchanged matches into a count)
const COMPACT_THRESHOLD: usize = 5;

pub trait CalendarSyncRender {
    fn render_outcomes(&self) -> String;
}

impl CalendarSyncRender for CalendarSync {
    fn render_outcomes(&self) -> String {
        let mut lines = Vec::new();

        if self.created {
            lines.push(format!("   {}", "New calendar".green()));
        }

        if self.outcomes.is_empty() {
            lines.push(format!("   {}", "No matches".dimmed()));
            return lines.join("\n");
        }

        let unchanged = self
            .outcomes
            .iter()
            .filter(|o| matches!(o.result, Ok(Applied::Unchanged)))
            .count();
        let compact = unchanged > COMPACT_THRESHOLD;

        for outcome in &self.outcomes {
            if compact && matches!(outcome.result, Ok(Applied::Unchanged)) {
                continue;
            }
            lines.push(format!("   {}", outcome.render()));
        }

        if compact {
            let noun = if unchanged == 1 { "match" } else { "matches" };
            let label = format!("({unchanged} unchanged {noun})");
            lines.push(format!("   {} {}", ActionKind::NoOp.render(), label.dimmed()));
        }

        lines.join("\n")
    }
}

fn short_time(dt: DateTime<Utc>) -> String {
    dt.format("%H:%M").to_string()
}
