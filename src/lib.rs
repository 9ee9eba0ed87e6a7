//! Panopticon - homeserver usage report sink
//!
//! Remote homeservers periodically POST a JSON usage report. Each report is
//! stored as one row in a SQL table and acknowledged with `{}`.
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `api` - HTTP routes (`/push`, `/test`)
//! - `pipeline` - Per-request ingestion: context capture, decode, save
//! - `extraction` - Report decoding with per-field presence tracking
//! - `storage` - Backend dialects, SQL builders, row models, recorder
//! - `config` - Command-line / environment configuration
//! - `logging` - Structured logging with request context

pub mod api;
pub mod config;
pub mod extraction;
pub mod logging;
pub mod pipeline;
pub mod storage;

pub use config::Config;
pub use extraction::report::{decode_report, DecodeError, StatsReport};
pub use pipeline::ingestion::{ingest, IngestError};
pub use storage::recorder::{PersistError, ProvisionError, Recorder};

/// Initialize the process-wide logger.
///
/// Defaults to `info`; `RUST_LOG` overrides it. Safe to call more than once.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
