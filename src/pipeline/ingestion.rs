//! Report ingestion pipeline.
//!
//! Coordinates one report from body to row:
//! 1. Decode the body into a report
//! 2. Attach receipt time, caller address and headers
//! 3. Insert one row
//!
//! Failures are logged here with their cause. Callers only get the error
//! kind, which maps onto an HTTP status.

use thiserror::Error;

use crate::extraction::report::{decode_report, DecodeError};
use crate::storage::recorder::{PersistError, Recorder};
use crate::logging::structured::error_chain;
use crate::{log_debug, log_error, log_info, log_warn};

use super::context::RequestContext;

/// Why a report was not stored.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

impl IngestError {
    /// HTTP status for this failure: client fault or server fault.
    pub fn status_code(&self) -> u16 {
        match self {
            IngestError::Decode(_) => 400,
            IngestError::Persist(_) => 500,
        }
    }
}

/// Decode `body` and store it as one row.
pub async fn ingest(
    recorder: &Recorder,
    ctx: &RequestContext,
    body: &[u8],
) -> Result<(), IngestError> {
    let log_ctx = ctx.log_context();

    log_debug!(log_ctx, "REPORT_RECEIVED", bytes = body.len());

    let report = decode_report(body).map_err(|e| {
        log_warn!(
            log_ctx,
            "REPORT_DECODE_FAILED",
            description = "Error decoding JSON",
            error = error_chain(&e),
        );
        e
    })?;

    let homeserver = report.homeserver.clone();
    let record = ctx.record(report);

    recorder.save(&record).await.map_err(|e| {
        log_error!(
            log_ctx,
            "REPORT_SAVE_FAILED",
            description = "Error saving to DB",
            homeserver = homeserver,
            error = error_chain(&e),
        );
        e
    })?;

    log_info!(
        log_ctx,
        "REPORT_SAVED",
        homeserver = homeserver,
        columns = record.bindings().len(),
    );
    Ok(())
}
