//! Pipeline orchestration module.
//!
//! Per-request ingestion flow:
//! - Request context capture
//! - Report decoding
//! - Row persistence

pub mod context;
pub mod ingestion;

pub use context::*;
pub use ingestion::*;
