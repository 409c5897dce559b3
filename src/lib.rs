//! flagtable-rs: umbrella crate re-exporting `flagtable-core` for the demos.

pub use flagtable_core::*;

/// Everything a demo needs in one import.
pub mod prelude {
    pub use flagtable_core::loader::{FailurePolicy, FlagLoadPolicy};
    pub use flagtable_core::table::{CellType, CellValue, ColumnKind, LINK_COLUMN, NAME_COLUMN};
    pub use flagtable_core::{
        Country, CountryTable, Fetch, Flag, FlagTableError, HttpFetcher, Pipeline,
        PipelineConfig, Result,
    };
}
