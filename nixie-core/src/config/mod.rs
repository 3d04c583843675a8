//! Configuration types
//!
//! Board-agnostic runtime parameters. The firmware bakes a validated
//! instance into the binary at build time.

pub mod types;

pub use types::*;
