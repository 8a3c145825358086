//! Command-line surface
//!
//! `gui` is the default. `render` is a one-shot export, `presets` lists the
//! built-in styles and `script` applies JSON-lines edits from stdin while a
//! debounced live render is mirrored into a file.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::{Instant as TokioInstant, sleep_until};
use tracing::{info, warn};

use crate::config::presets::{self, PRESETS};
use crate::config::settings::AppSettings;
use crate::config::store::{ConfigStore, Edit};
use crate::constants::limits;
use crate::error::ConfigError;
use crate::logo;
use crate::render::engine::{DownloadRequest, RenderEngine};
use crate::render::raster::RasterEngine;
use crate::render::snapshot::normalize;
use crate::session::Session;
use crate::types::{ErrorCorrection, ExportFormat};

#[derive(Debug, Parser)]
#[command(name = "qr-studio", version, about = "Styled QR code configurator")]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error); overrides LOG_LEVEL
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the configurator window (default)
    Gui,
    /// Render a single QR code to a file
    Render(RenderArgs),
    /// List built-in presets
    Presets,
    /// Apply JSON-lines edits from stdin with a live render
    Script(ScriptArgs),
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Payload to encode
    #[arg(long)]
    pub data: Option<String>,

    /// Preset name (see `presets`)
    #[arg(long)]
    pub preset: Option<String>,

    /// Output size in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(limits::SIZE_MIN as i64..=limits::SIZE_MAX as i64))]
    pub size: Option<u32>,

    /// Quiet-zone margin in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=limits::MARGIN_MAX as i64))]
    pub margin: Option<u32>,

    /// Error correction level; applied after the logo, so it overrides the forced H
    #[arg(long, value_enum)]
    pub ec: Option<ErrorCorrection>,

    /// Logo image embedded in the center
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// Output format; inferred from `--out` when omitted
    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Output file
    #[arg(long, short)]
    pub out: PathBuf,
}

#[derive(Debug, Args)]
pub struct ScriptArgs {
    /// File that mirrors the live render
    #[arg(long, short)]
    pub out: PathBuf,

    /// Output format; inferred from `--out` when omitted
    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Quiet interval override in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,
}

fn resolve_format(explicit: Option<ExportFormat>, out: &Path) -> ExportFormat {
    explicit
        .or_else(|| {
            out.extension()
                .and_then(|ext| ext.to_str())
                .and_then(ExportFormat::from_extension)
        })
        .unwrap_or(ExportFormat::Png)
}

fn download_request(out: &Path, format: ExportFormat) -> DownloadRequest {
    let name = out
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(crate::constants::export::FILE_NAME);
    let directory = out
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    DownloadRequest::new(name, format, directory)
}

/// Build the configuration described by the flags
pub fn build_store(args: &RenderArgs) -> Result<ConfigStore> {
    let mut store = ConfigStore::new();

    if let Some(data) = &args.data {
        store.set_content(data);
    }
    if let Some(name) = &args.preset {
        if presets::find(name).is_none() {
            return Err(ConfigError::UnknownPreset(name.clone()).into());
        }
        store.apply_preset(name);
    }
    if let Some(size) = args.size {
        store.set_size(size);
    }
    if let Some(margin) = args.margin {
        store.set_margin(margin);
    }
    if let Some(path) = &args.logo {
        store.attach_logo(logo::load_data_url(path)?);
    }
    if let Some(level) = args.ec {
        store.set_error_correction(level);
    }
    Ok(store)
}

pub fn run_render(args: &RenderArgs) -> Result<PathBuf> {
    let store = build_store(args)?;
    let mut engine = RasterEngine::create(&normalize(store.config()))?;

    let format = resolve_format(args.format, &args.out);
    let path = engine.download(&download_request(&args.out, format))?;
    info!(path = %path.display(), preset = ?store.active_preset(), "Rendered QR code");
    Ok(path)
}

pub fn print_presets() {
    for preset in PRESETS {
        println!(
            "{:<10} {:<10} dots={:<15} corners={}/{}",
            preset.name,
            preset.label,
            preset.dots.shape.as_str(),
            preset.corner_square.shape.as_str(),
            preset.corner_dot.shape.as_str()
        );
    }
}

/// Counters reported when a script run finishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    pub applied: usize,
    pub rejected: usize,
}

fn now() -> std::time::Instant {
    TokioInstant::now().into_std()
}

fn handle_line<E: RenderEngine>(session: &mut Session<E>, line: &str, summary: &mut ScriptSummary) {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return;
    }

    let edit = match serde_json::from_str::<Edit>(line) {
        Ok(edit) => edit,
        Err(err) => {
            warn!(error = %err, line, "Skipping malformed edit");
            summary.rejected += 1;
            return;
        }
    };

    match edit.check_range().and_then(|()| session.apply(edit, now())) {
        Ok(_) => summary.applied += 1,
        Err(err) => {
            warn!(error = %err, "Edit rejected");
            summary.rejected += 1;
        }
    }
}

/// Drive a session from JSON-lines input until EOF, then flush
///
/// Timing comes from the tokio clock so paused-time tests stay deterministic.
pub async fn drive_script<R, E>(reader: R, session: &mut Session<E>) -> Result<ScriptSummary>
where
    R: AsyncBufRead + Unpin,
    E: RenderEngine,
{
    let mut lines = reader.lines();
    let mut summary = ScriptSummary::default();

    loop {
        let wake = session.deadline().map(TokioInstant::from_std);
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read script input")? {
                    Some(line) => handle_line(session, &line, &mut summary),
                    None => break,
                }
            }
            _ = sleep_until(wake.unwrap_or_else(TokioInstant::now)), if wake.is_some() => {
                session.tick(now());
            }
        }
    }

    session.flush();
    info!(applied = summary.applied, rejected = summary.rejected, "Script input finished");
    Ok(summary)
}

pub fn run_script(args: &ScriptArgs, settings: &AppSettings) -> Result<ScriptSummary> {
    let store = ConfigStore::new();
    let format = resolve_format(args.format, &args.out);

    let mut engine = RasterEngine::create(&normalize(store.config()))?;
    engine.attach_to(&args.out, format)?;

    let quiet = args
        .debounce_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| settings.debounce());
    let mut session = Session::new(store, engine, quiet);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start script runtime")?;

    runtime.block_on(drive_script(BufReader::new(tokio::io::stdin()), &mut session))
}
