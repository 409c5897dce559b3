//! Fetch table demo for flagtable-rs
//!
//! This demo shows how to:
//! - Run the pipeline against the public flagcdn endpoints
//! - Walk the table through its typed cells
//! - Resolve the link a click on a row would open

use flagtable_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== flagtable-rs Fetch Table Demo ===\n");

    let config = PipelineConfig {
        workers: 8,
        ..PipelineConfig::default()
    };
    let fetcher = HttpFetcher::shared()?;

    println!("Loading directory and flags...");
    let report = Pipeline::new(fetcher, config).run();
    let table = &report.table;
    println!(
        "✓ {} rows, {} flags loaded, {} failed\n",
        table.row_count(),
        report.flags.loaded,
        report.flags.failed
    );

    // Example 1: Walk the first rows cell by cell
    println!("--- Example 1: First five rows ---");
    for row in 0..table.row_count().min(5) {
        let cells: Vec<String> = (0..table.column_count())
            .filter_map(|col| table.value_at(row, col))
            .map(|cell| match cell {
                CellValue::Image(Some(flag)) => format!("[{}x{}]", flag.width(), flag.height()),
                CellValue::Image(None) => "[ ]".to_string(),
                CellValue::Text(text) => text.to_string(),
                CellValue::Link(url) => url,
            })
            .collect();
        println!("{}", cells.join(" | "));
    }
    println!();

    // Example 2: Activate the link cell of a row
    println!("--- Example 2: Link activation ---");
    match table.find_by_code("pl") {
        Some(row) => println!("Clicking row {row} opens {:?}", table.activate(row, LINK_COLUMN)),
        None => println!("'pl' is not in the directory"),
    }

    Ok(())
}
