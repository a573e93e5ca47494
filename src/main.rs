#![forbid(unsafe_code)]

mod clipboard;
mod constants;
mod directive;
mod geometry;
mod hypr;
mod monitor;
mod persistence;
mod picker;
mod scale;
mod session;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::error::ErrorKind;
use clap::Parser;
use tracing::{error, info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

/// Interactively attach a newly-enabled monitor to the active layout.
#[derive(Debug, Parser)]
#[command(name = "monitor-picker", version)]
struct Args {
    /// Connector name of the monitor to place (e.g. HDMI-A-1)
    name: String,

    /// Config file to merge the layout into
    /// (default: ~/.config/hypr/monitors.conf)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    // stdout is reserved for the two directive lines
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Returns false when the user cancelled the session.
fn run(args: Args) -> Result<bool> {
    let monitors = hypr::query_monitors()?;
    let Some(new_mon) = monitor::find_monitor(&monitors, &args.name) else {
        bail!("Unknown monitor: {}", args.name);
    };
    let Some(current) = monitor::find_anchor(&monitors, &args.name) else {
        bail!("No active monitor found to attach '{}' to", args.name);
    };
    info!(current = %current.name, new = %new_mon.name, "Loaded monitor snapshot");

    let Some(decision) = picker::run_picker(current.clone(), new_mon.clone())? else {
        return Ok(false);
    };

    // Print before persisting so the directives survive a failed write
    println!("{}", decision.current_line);
    println!("{}", decision.new_line);

    let path = args.config.unwrap_or_else(persistence::default_config_path);
    persistence::save_merged(&path, &decision.updates)?;
    Ok(true)
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let is_help = matches!(
                err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            );
            let _ = err.print();
            return if is_help {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
    };

    if let Err(err) = init_logging() {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
