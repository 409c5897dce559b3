// crates/flagtable-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for a table.
///
/// Returned by [`CountryTable::stats`](crate::CountryTable::stats); the counts
/// reflect the rows as they are at the moment of the call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStats {
    pub rows: usize,
    pub with_flag: usize,
    pub without_flag: usize,
}

/// Outcome counts of one [`attach_flags`](crate::loader::attach_flags) call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSummary {
    /// Flags fetched and attached by this call.
    pub loaded: usize,
    /// Countries that already had a flag and were not fetched.
    pub skipped: usize,
    /// Countries left without a flag because of a failure.
    pub failed: usize,
}
