//! Grid world trainer
//!
//! Runs the TD agent with the reference defaults (50 rounds, learning rate
//! 0.3, exploration rate 0.2, seed 42) and prints every round and the value
//! tables to stdout. Set `RUST_LOG=gridworld=debug` to see each greedy
//! candidate on stderr.

use anyhow::Result;
use clap::Parser;
use gridworld::cli::commands::train::{TrainArgs, execute};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = TrainArgs::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    execute(args)
}
