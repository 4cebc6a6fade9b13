// src/cli/mod.rs
// Command line: launches the viewer, or dumps a table to stdout

pub mod dump;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::locations::ColumnKey;

#[derive(Parser, Debug)]
#[command(name = "location-table")]
#[command(about = "Location Table - fetch, sort and search a batch of person locations", long_about = None)]
pub struct Cli {
    /// Endpoint to fetch from (overrides the settings file for this run)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Number of records per batch (overrides the settings file for this run)
    #[arg(long, global = true, value_parser = clap::value_parser!(u16).range(1..=5000))]
    pub results: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the table to stdout instead of opening the viewer
    Dump(DumpArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct DumpArgs {
    /// Read a saved `{ "results": [...] }` payload instead of fetching
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Header click to replay, in order (repeat to cycle: once ascending, twice descending)
    #[arg(long = "click", value_enum)]
    pub clicks: Vec<ColumnKey>,

    /// Search text; matching rows are marked with '*'
    #[arg(long, default_value = "")]
    pub query: String,

    /// Print only the matching rows (when there is at least one)
    #[arg(long)]
    pub matches_only: bool,
}
