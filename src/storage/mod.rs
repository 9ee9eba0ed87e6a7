//! Storage module.
//!
//! Backend dialects, SQL query builders, row models and the recorder that
//! executes them against the configured database.

pub mod dialect;
pub mod models;
pub mod queries;
pub mod recorder;

pub use dialect::*;
pub use models::*;
pub use queries::*;
pub use recorder::*;
