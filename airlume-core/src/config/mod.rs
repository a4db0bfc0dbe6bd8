//! Configuration types
//!
//! The two shipped monitor variants differ only in cadence, window size and
//! screen layout, so both are expressed as one [`MonitorConfig`]. Configs are
//! written as TOML and can be stored as compact postcard binary.

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;
