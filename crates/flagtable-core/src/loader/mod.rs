// crates/flagtable-core/src/loader/mod.rs

//! # Data Loaders
//!
//! The two network stages of the pipeline:
//! - [`directory`]: code → name JSON into an ordered [`Directory`](crate::Directory)
//! - [`flags`]: one PNG per country, decoded and attached in place
//!
//! Both are generic over [`Fetch`](crate::traits::Fetch) so they never
//! care which transport sits underneath.

pub mod directory;
pub mod flags;

pub use directory::{load_directory, parse_directory, DirectorySource};
pub use flags::{attach_flags, fetch_flag, FailurePolicy, FlagLoadPolicy, FlagSource};
