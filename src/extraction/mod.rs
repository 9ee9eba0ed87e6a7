//! Report extraction module.
//!
//! Turns an inbound request body into a typed usage report.

pub mod report;

pub use report::*;
