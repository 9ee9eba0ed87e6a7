//! Request context management.
//!
//! Captures what the server knows about an inbound report besides its body:
//! when it arrived, who sent it, and the two optional headers we record.

use chrono::Utc;
use uuid::Uuid;

use crate::extraction::report::StatsReport;
use crate::logging::structured::LogContext;
use crate::storage::models::StatsRecord;

/// Context for one inbound report.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    /// Receipt time, seconds since epoch, UTC.
    pub local_timestamp: i64,
    pub remote_addr: String,
    pub forwarded_for: Option<String>,
    pub user_agent: Option<String>,
}

impl RequestContext {
    pub fn new(remote_addr: &str, forwarded_for: Option<&str>, user_agent: Option<&str>) -> Self {
        let short_id: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();
        let request_id = format!("req-{}", short_id);

        Self {
            request_id,
            local_timestamp: Utc::now().timestamp(),
            remote_addr: remote_addr.to_string(),
            forwarded_for: non_empty(forwarded_for),
            user_agent: non_empty(user_agent),
        }
    }

    /// Attach the server-side fields to a decoded report.
    pub fn record(&self, report: StatsReport) -> StatsRecord {
        StatsRecord {
            report,
            local_timestamp: self.local_timestamp,
            remote_addr: self.remote_addr.clone(),
            forwarded_for: self.forwarded_for.clone(),
            user_agent: self.user_agent.clone(),
        }
    }

    pub fn log_context(&self) -> LogContext {
        LogContext::new(&self.request_id).with_remote(&self.remote_addr)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(|v| v.to_string())
}
