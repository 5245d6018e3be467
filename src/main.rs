mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use livecal_core::config::LivecalConfig;
use tracing_subscriber::{EnvFilter, fmt};

use crate::commands::CycleContext;

#[derive(Parser)]
#[command(name = "livecal")]
#[command(about = "Mirror live sports scores into calendars, one calendar per tournament")]
struct Cli {
    /// Log the decision taken for every match
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single reconciliation cycle
    Sync {
        #[command(flatten)]
        cycle: CycleArgs,
    },
    /// Run a cycle every interval until interrupted
    Watch {
        #[command(flatten)]
        cycle: CycleArgs,

        /// Seconds between cycles
        #[arg(long)]
        interval: Option<u64>,
    },
    /// List the provider's calendars
    Calendars,
}

#[derive(Args)]
struct CycleArgs {
    /// Score snapshot to read (overrides `feed` in config.toml)
    #[arg(long)]
    feed: Option<PathBuf>,

    /// Process at most this many tournaments per cycle
    #[arg(long, conflicts_with = "no_limit")]
    limit: Option<usize>,

    /// Process every tournament, ignoring `tournament_limit`
    #[arg(long)]
    no_limit: bool,
}

impl CycleArgs {
    fn apply(self, config: &mut LivecalConfig) {
        if let Some(feed) = self.feed {
            config.feed = Some(feed);
        }
        if self.no_limit {
            config.tournament_limit = None;
        } else if let Some(limit) = self.limit {
            config.tournament_limit = Some(limit);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = LivecalConfig::load()?;

    match cli.command {
        Commands::Sync { cycle } => {
            cycle.apply(&mut config);
            let ctx = CycleContext::from_config(&config)?;
            commands::sync::run(&ctx).await.map(|_| ())
        }
        Commands::Watch { cycle, interval } => {
            cycle.apply(&mut config);
            if let Some(secs) = interval {
                config.poll_interval_secs = secs;
            }
            if config.poll_interval_secs == 0 {
                anyhow::bail!("Poll interval must be at least one second");
            }
            let ctx = CycleContext::from_config(&config)?;
            commands::watch::run(&ctx, config.poll_interval_secs).await
        }
        Commands::Calendars => commands::calendars::run(&config.remote()?).await,
    }
}
