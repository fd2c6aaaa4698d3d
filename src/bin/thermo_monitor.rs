//! thermo-monitor - live day/night temperature dashboard.
//!
//! Configuration precedence, lowest first: built-in defaults, the YAML file,
//! environment variables, command-line flags.

use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use log::info;

use thermo_monitor::monitor::App;
use thermo_monitor::{ChannelSelector, Config, RefreshScheduler};

/// Live temperature monitor with day and night channels.
#[derive(Parser, Debug)]
#[command(name = "thermo-monitor")]
#[command(version)]
#[command(about = "Live day/night temperature dashboard", long_about = None)]
struct Cli {
    /// Config file path (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Channel shown at startup: day or night
    #[arg(short, long)]
    mode: Option<String>,

    /// Refresh interval in seconds
    #[arg(short, long)]
    interval: Option<u64>,

    /// Readings kept per channel
    #[arg(long)]
    capacity: Option<usize>,

    /// Seed for reproducible readings
    #[arg(long)]
    seed: Option<u64>,
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|p| p.join("thermo-monitor/config.yaml"))
        .unwrap_or_default()
}

fn build_config(cli: &Cli) -> thermo_monitor::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(default_config_path()),
    };
    config.apply_env()?;

    if let Some(mode) = &cli.mode {
        config.global.mode = ChannelSelector::select(mode)?.as_str().to_string();
    }
    if let Some(interval) = cli.interval {
        config.global.update_interval_secs = interval;
    }
    if let Some(capacity) = cli.capacity {
        config.global.deque_size = capacity;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    info!(
        "starting with interval {}s, {} readings per channel",
        config.global.update_interval_secs, config.global.deque_size
    );

    let mut app = match cli.seed {
        Some(seed) => {
            let scheduler = RefreshScheduler::seeded(&config, seed)?;
            App::with_scheduler(config, scheduler)?
        }
        None => App::new(config)?,
    };
    app.run()?;

    Ok(())
}
