//! CLI argument parsing for the courier-copilot binary.

use chrono::NaiveTime;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "courier-copilot", about = "Delivery route timeline and shortcut finder")]
pub struct Cli {
    /// TOML configuration file; built-in defaults when omitted
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print predicted arrival times for a route file
    Timeline {
        #[arg(long)]
        route: PathBuf,
        /// Start of the shift (HH:MM), defaults to now
        #[arg(long, value_parser = parse_start)]
        start: Option<NaiveTime>,
    },
    /// Look for a shortcut over the next few stops
    Suggest {
        #[arg(long)]
        route: PathBuf,
        #[arg(long, value_parser = parse_start)]
        start: Option<NaiveTime>,
        /// Write the proposal back to the route file
        #[arg(long)]
        apply: bool,
    },
    /// Simulate a shift on the sample route or a random one
    Demo {
        /// Generate a random route with this many stops
        #[arg(long)]
        random: Option<usize>,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, value_parser = parse_start)]
        start: Option<NaiveTime>,
    },
}

fn parse_start(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("expected HH:MM, {}", e))
}
