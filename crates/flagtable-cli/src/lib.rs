//! Terminal shell for the `flagtable-core` country table.
//!
//! The binary (`flagtable`) is the deliverable; this target only gives
//! docs.rs a landing page. Library users want
//! [flagtable-core](https://docs.rs/flagtable-core).
