#![forbid(unsafe_code)]

mod cli;
mod color;
mod config;
mod constants;
mod error;
mod gui;
mod logo;
mod render;
mod session;
mod types;

use anyhow::Result;
use clap::Parser;
use tracing::{Level as TraceLevel, info, warn};
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Command};
use config::AppSettings;

fn parse_level(level: &str) -> TraceLevel {
    match level.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Settings are read before logging so their level can act as the fallback
    let loaded = AppSettings::load();
    let settings = loaded.as_ref().cloned().unwrap_or_default();

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("LOG_LEVEL").ok())
        .unwrap_or_else(|| settings.log_level.clone());

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&log_level))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Err(err) = &loaded {
        warn!(error = ?err, "Using default settings");
    }

    match cli.command.unwrap_or(Command::Gui) {
        Command::Gui => gui::run_gui(settings),
        Command::Render(args) => cli::run_render(&args).map(|_| ()),
        Command::Presets => {
            cli::print_presets();
            Ok(())
        }
        Command::Script(args) => {
            let summary = cli::run_script(&args, &settings)?;
            info!(applied = summary.applied, rejected = summary.rejected, "Script finished");
            Ok(())
        }
    }
}
