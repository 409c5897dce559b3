// crates/flagtable-core/src/lib.rs

//! # flagtable-core
//!
//! Fetches a country code → name directory, attaches a decoded flag to each
//! country and exposes the result as a three-column table model
//! (flag, name, article link) for a display widget.
//!
//! ```no_run
//! use flagtable_core::{HttpFetcher, Pipeline, PipelineConfig};
//!
//! let fetcher = HttpFetcher::new()?;
//! let report = Pipeline::new(fetcher, PipelineConfig::default()).run();
//! for row in 0..report.table.row_count() {
//!     println!("{:?} {:?}", report.table.name_at(row), report.table.link_at(row));
//! }
//! # Ok::<(), flagtable_core::FlagTableError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod config;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod table;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::common::{FlagSummary, TableStats};
pub use crate::config::PipelineConfig;
pub use crate::error::{
    DirectoryLoadError, FlagBatchError, FlagError, FlagTableError, NetworkError, NetworkErrorKind,
    Result,
};
pub use crate::fetch::{FetchRequest, FetchResponse};
#[cfg(feature = "http")]
pub use crate::fetch::HttpFetcher;
pub use crate::loader::{FailurePolicy, FlagLoadPolicy};
pub use crate::model::{Country, Directory, Flag};
pub use crate::pipeline::{Pipeline, PipelineReport};
pub use crate::table::{CellType, CellValue, ColumnKind, CountryTable};
pub use crate::traits::{Fetch, NameMatch};
