use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for flagtable-cli
#[derive(Debug, Parser)]
#[command(
    name = "flagtable",
    version,
    about = "Fetch the flagcdn country directory and flags and print them as a table"
)]
pub struct CliArgs {
    /// JSON config file; any field left out keeps its default
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Directory language, article host and header language (e.g. pl, en)
    #[arg(short = 'l', long = "locale", global = true)]
    pub locale: Option<String>,

    /// Number of concurrent flag downloads (1 = one after another)
    #[arg(short = 'w', long = "workers", global = true)]
    pub workers: Option<usize>,

    /// Stop fetching flags at the first failure instead of skipping it
    #[arg(long = "abort-on-flag-error", global = true)]
    pub abort_on_flag_error: bool,

    /// Do not download flags at all
    #[arg(long = "no-flags", global = true)]
    pub no_flags: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print every row: code, flag size, name and article link
    Table,

    /// List the directory only (no flag downloads)
    Countries,

    /// Print the article link a click on the row with this code would open
    Link {
        /// Country code (e.g. pl, us)
        code: String,
    },

    /// Search rows by name (accent- and case-insensitive) or exact code
    Search {
        /// Substring of the name, or a code
        query: String,
    },

    /// Show row count and flag coverage
    Stats,
}
