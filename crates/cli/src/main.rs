//! Command Line Interface for the realized-loss engine.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clmm_loss_domain::Snapshot;
use clmm_loss_simulation::prelude::*;
use dotenv::dotenv;
use prettytable::{Table, row};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clmm-loss")]
#[command(about = "Realized-loss accounting for dual-range CLMM strategies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the per-block loss series
    Losses {
        /// Snapshot file (JSON array)
        #[arg(short, long)]
        snapshots: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Override the withdrawal tolerance (non-negative)
        #[arg(long)]
        tolerance: Option<u64>,
    },
    /// Print summary metrics for a snapshot file
    Summary {
        /// Snapshot file (JSON array)
        #[arg(short, long)]
        snapshots: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn load_snapshots(path: &Path) -> Result<Vec<Snapshot>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot file {}", path.display()))?;
    let snapshots: Vec<Snapshot> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing snapshot file {}", path.display()))?;
    info!(count = snapshots.len(), path = %path.display(), "Snapshots loaded");
    Ok(snapshots)
}

fn print_losses(series: &LossSeries) -> Result<()> {
    let mut table = Table::new();
    table.add_row(row!["Block", "Lower", "Upper", "Loss", "Shift"]);
    for outcome in series.outcomes() {
        let shift = match (outcome.shift, outcome.terminal) {
            (_, true) => "liquidation".to_string(),
            (Some(kind), false) => format!("{kind:?}"),
            (None, false) => String::new(),
        };
        let total = outcome.total_loss()?;
        table.add_row(row![
            outcome.block_number,
            outcome.lower_loss,
            outcome.upper_loss,
            total,
            shift
        ]);
    }
    table.printstd();
    println!("Total realized loss: {}", series.total_loss()?);
    Ok(())
}

fn print_summary(summary: &LossSummary) {
    println!("\n📊 Loss Summary");
    println!("════════════════════════════════════");
    println!("Snapshots:       {}", summary.snapshot_count);
    println!(
        "Blocks:          {} → {}",
        summary.first_block, summary.last_block
    );
    println!("Total loss:      {}", summary.total_loss);
    if let Some((block, loss)) = summary.worst_step {
        println!("Worst step:      {loss} at block {block}");
    }
    println!(
        "Window shifts:   {} ({} resets)",
        summary.shift_count, summary.reset_count
    );
    match summary.annualized_loss_pct {
        Some(pct) => println!("Annualized loss: {:.4}%", pct.round_dp(4)),
        None => println!("Annualized loss: n/a"),
    }
    println!("════════════════════════════════════");
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = LossConfig::from_env()?;

    match cli.command {
        Commands::Losses {
            snapshots,
            json,
            tolerance,
        } => {
            let config = match tolerance {
                Some(t) => config.with_loss_tolerance(i128::from(t)),
                None => config,
            };
            let snapshots = load_snapshots(&snapshots)?;
            let series = LossSeriesBuilder::new(config).build(&snapshots)?;

            if json {
                println!("{}", serde_json::to_string_pretty(series.as_map())?);
            } else {
                print_losses(&series)?;
            }
        }
        Commands::Summary { snapshots, json } => {
            let snapshots = load_snapshots(&snapshots)?;
            let series = LossSeriesBuilder::new(config.clone()).build(&snapshots)?;
            let summary = LossSummary::new(&snapshots, &series, &config)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }
    }

    Ok(())
}
