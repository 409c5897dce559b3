//! flagtable: terminal shell for flagtable-core
//!
//! Loads the country directory, attaches flags and prints the resulting
//! table. Row activation is mimicked by `link`, which prints the URL a
//! click on the link column would open.
//!
//! Usage examples
//! --------------
//!
//! - Whole table (Polish directory by default)
//!   $ flagtable table
//!
//! - English names, eight parallel flag downloads
//!   $ flagtable --locale en --workers 8 table
//!
//! - Directory only, no images
//!   $ flagtable countries
//!
//! - Link for a row
//!   $ flagtable link pl
//!
//! Logging goes to stderr; raise it with `-v` or `RUST_LOG`.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use flagtable_core::table::{FLAG_COLUMN, LINK_COLUMN, NAME_COLUMN};
use flagtable_core::{CountryTable, FailurePolicy, HttpFetcher, Pipeline, PipelineConfig};
use log::debug;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let config = build_config(&args)?;
    debug!("Effective config: {config:?}");

    let fetcher = HttpFetcher::with_connect_timeout(config.connect_timeout())
        .context("could not set up the HTTP client")?;
    let report = Pipeline::new(fetcher, config).run();
    let table = &report.table;

    match args.command {
        Commands::Table => {
            if let Some(err) = &report.flag_error {
                eprintln!("Flag downloads stopped early: {err}");
            }
            print_header(table);
            for row in 0..table.row_count() {
                print_row(table, row);
            }
        }

        Commands::Countries => {
            for c in table.rows() {
                println!("{} ({})", c.name(), c.code());
            }
        }

        Commands::Link { code } => match table.find_by_code(&code) {
            Some(row) => match table.activate(row, LINK_COLUMN) {
                Some(url) => println!("{url}"),
                None => eprintln!("Row {row} has no link"),
            },
            None => eprintln!("No country found for: {code}"),
        },

        Commands::Search { query } => {
            let rows = table.search(&query);
            if rows.is_empty() {
                println!("No countries found matching: {query}");
            } else {
                for row in rows {
                    print_row(table, row);
                }
            }
        }

        Commands::Stats => {
            let stats = table.stats();
            println!("Table statistics:");
            println!("  Rows: {}", stats.rows);
            println!("  With flag: {}", stats.with_flag);
            println!("  Without flag: {}", stats.without_flag);
            println!("  Flags downloaded this run: {}", report.flags.loaded);
            println!("  Flag failures: {}", report.flags.failed);
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Defaults, then the config file, then command-line flags.
fn build_config(args: &CliArgs) -> anyhow::Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_path(path)
            .with_context(|| format!("could not load config from {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    if let Some(locale) = &args.locale {
        config.locale = locale.trim().to_ascii_lowercase();
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if args.abort_on_flag_error {
        config.on_flag_failure = FailurePolicy::AbortBatch;
    }
    // The directory listing never shows images.
    if args.no_flags || matches!(args.command, Commands::Countries) {
        config.fetch_flags = false;
    }

    config.validate()?;
    Ok(config)
}

fn print_header(table: &CountryTable) {
    println!(
        "{:<6} {:<9} {:<40} {}",
        "Code",
        table.column_name(FLAG_COLUMN).unwrap_or_default(),
        table.column_name(NAME_COLUMN).unwrap_or_default(),
        table.column_name(LINK_COLUMN).unwrap_or_default()
    );
}

fn print_row(table: &CountryTable, row: usize) {
    let Some(country) = table.country_at(row) else {
        return;
    };
    let flag = match country.flag() {
        Some(f) => format!("{}x{}", f.width(), f.height()),
        None => "-".to_string(),
    };
    println!(
        "{:<6} {:<9} {:<40} {}",
        country.code(),
        flag,
        country.name(),
        table.link_at(row).unwrap_or_default()
    );
}
