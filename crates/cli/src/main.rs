//! wgmesh CLI - Main Entry Point
//!
//! Drives report cycles against a WireGuard mesh: queries the live device,
//! joins it with the mesh configuration and persists the resulting health
//! report, or renders the last persisted report.

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wgmesh_report::{MeshReport, ReportStore, Thresholds};

mod config;
mod output;
mod wg;

/// wgmesh - peer health reporting for WireGuard meshes
#[derive(Parser)]
#[command(name = "wgmesh")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Mesh configuration file
    #[arg(long, default_value = "/etc/wgmesh.json", global = true)]
    config: PathBuf,

    /// Persisted report file
    #[arg(long, default_value = "/var/lib/wgmesh/report.json", global = true)]
    report_file: PathBuf,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a fresh report from the live device and persist it
    Report,

    /// Show the last persisted report
    Status,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Report => run_report(&cli),
        Commands::Status => run_status(&cli),
        Commands::Version => {
            println!("wgmesh {}", wgmesh_report::VERSION);
            Ok(())
        }
    }
}

fn run_report(cli: &Cli) -> anyhow::Result<()> {
    let config = config::load(&cli.config)?;
    let snapshot = wg::snapshot(&config.interface_name)?;

    let report = MeshReport::generate(&config, &snapshot, Utc::now(), &Thresholds::default());
    info!(
        online = report.peers_online,
        total = report.peers_total,
        "report generated"
    );

    let store = ReportStore::new(&cli.report_file);
    store
        .save(&report)
        .with_context(|| format!("failed to save report to {}", store.path().display()))?;

    output::print_report(&report, cli.format);
    Ok(())
}

fn run_status(cli: &Cli) -> anyhow::Result<()> {
    let store = ReportStore::new(&cli.report_file);
    match store.load()? {
        Some(report) => {
            output::print_report(&report, cli.format);
            Ok(())
        }
        None => {
            bail!(
                "no report found at {}; run `wgmesh report` first",
                store.path().display()
            );
        }
    }
}
