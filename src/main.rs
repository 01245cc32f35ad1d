//! Interactive route planner: edit a terrain map and search routes on it from the terminal.
//!
//! Usage:
//!   terrain_pathfinding                        # 5x5 open map
//!   terrain_pathfinding --width 8 --height 6   # Custom size
//!   RUST_LOG=debug terrain_pathfinding         # Show search statistics
use std::io;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::info;
use terrain_pathfinding::session::Session;
use terrain_pathfinding::TerrainGrid;
use tracing_subscriber::EnvFilter;

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "terrain_pathfinding")]
#[command(about = "Find minimum-cost routes on a grid of open ground, water, forest and walls")]
pub struct Args {
    /// Number of columns
    #[arg(long, default_value = "5")]
    width: usize,

    /// Number of rows
    #[arg(long, default_value = "5")]
    height: usize,
}

fn main() -> Result<()> {
    // Also installs a bridge so records from the `log` facade reach the subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    ensure!(
        args.width > 0 && args.height > 0,
        "the map must have at least one cell, got {}x{}",
        args.width,
        args.height
    );
    info!("Starting session on a {}x{} map", args.width, args.height);

    let grid = TerrainGrid::new(args.width, args.height);
    let stdin = io::stdin();
    let mut session = Session::new(grid, stdin.lock(), io::stdout());
    session.run().context("terminal IO failed")?;
    Ok(())
}
