//! Structured logging utilities.
//!
//! Every event is one line: the request prefix, an UPPER_SNAKE event name,
//! then `key=value` pairs, e.g.
//! `[request=req-1a2b3c4d] [remote=192.0.2.1:5000] REPORT_SAVED homeserver="example.org" columns=4`.

use std::error::Error;
use std::fmt;

/// Logging context for one inbound report.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub request_id: String,
    pub remote_addr: Option<String>,
}

impl LogContext {
    pub fn new(request_id: &str) -> Self {
        Self {
            request_id: request_id.to_string(),
            remote_addr: None,
        }
    }

    pub fn with_remote(&self, remote_addr: &str) -> Self {
        Self {
            request_id: self.request_id.clone(),
            remote_addr: Some(remote_addr.to_string()),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.remote_addr {
            Some(addr) => write!(f, "[request={}] [remote={}]", self.request_id, addr),
            None => write!(f, "[request={}]", self.request_id),
        }
    }
}

/// An error and all of its causes, outermost first, joined by `": "`.
pub fn error_chain(err: &dyn Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

/// Log one event at `$level` with context and `key=value` pairs.
#[macro_export]
macro_rules! log_event {
    ($level:expr, $ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        log::log!(
            $level,
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        )
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => { $crate::log_event!(log::Level::Debug, $($arg)+) };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => { $crate::log_event!(log::Level::Info, $($arg)+) };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)+) => { $crate::log_event!(log::Level::Warn, $($arg)+) };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => { $crate::log_event!(log::Level::Error, $($arg)+) };
}

#[cfg(test)]
mod tests {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("outer")]
    struct Outer(#[source] Inner);

    #[derive(Debug, Error)]
    #[error("inner")]
    struct Inner;

    #[test]
    fn test_log_context_display() {
        let ctx = LogContext::new("req-123");
        assert_eq!(format!("{}", ctx), "[request=req-123]");

        let ctx_with_remote = ctx.with_remote("10.0.0.1:4000");
        assert_eq!(
            format!("{}", ctx_with_remote),
            "[request=req-123] [remote=10.0.0.1:4000]"
        );
    }

    #[test]
    fn test_error_chain_lists_each_cause_once() {
        assert_eq!(error_chain(&Outer(Inner)), "outer: inner");
        assert_eq!(error_chain(&Inner), "inner");
    }

    #[test]
    fn test_log_macros_accept_context() {
        let ctx = LogContext::new("req-123");
        crate::log_debug!(ctx, "TEST_EVENT");
        crate::log_info!(ctx, "TEST_EVENT", count = 1);
        crate::log_warn!(ctx, "TEST_EVENT", reason = "none",);
        crate::log_error!(ctx, "TEST_EVENT", code = 500, detail = "x");
    }
}
