//! Domain module - benchmark records and listing shapes
//!
//! Modern Rust module organization: each module is its own file in the
//! domain/ directory, public exports are defined here for convenience.

pub mod listing;
pub mod record;

pub use listing::{ListingMode, ListingUrl};
pub use record::{
    BenchmarkRecord, Column, CpuDetails, CpuRecord, GpuRecord, RecordFamily, SchemaTag,
    CPU_COLUMNS, GPU_COLUMNS,
};
