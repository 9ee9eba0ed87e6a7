//! Usage report decoding.
//!
//! A report is a loosely structured JSON object. Every usage counter is
//! optional, and an absent counter must stay distinguishable from a counter
//! reported as zero, so each one decodes into an `Option<i64>`.

use std::fmt;
use std::io::Read;

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use thiserror::Error;

/// The body could not be decoded into a [`StatsReport`].
#[derive(Debug, Error)]
#[error("malformed report")]
pub struct DecodeError(#[from] serde_json::Error);

/// One usage report as sent by a remote homeserver.
///
/// Keys match case-insensitively and a repeated key keeps its last value.
/// Unknown keys are ignored. Values are accepted as-is, so negative counters
/// are stored just like positive ones. A `null` homeserver leaves it unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsReport {
    pub homeserver: String,
    /// Seconds since epoch, UTC, as reported by the caller (`timestamp`).
    pub remote_timestamp: Option<i64>,
    pub uptime_seconds: Option<i64>,
    pub total_users: Option<i64>,
    pub total_nonbridged_users: Option<i64>,
    pub total_room_count: Option<i64>,
    pub daily_active_users: Option<i64>,
    pub daily_active_rooms: Option<i64>,
    pub daily_messages: Option<i64>,
    pub daily_sent_messages: Option<i64>,
}

impl StatsReport {
    /// Counter slot for a lower-cased JSON key.
    fn counter_mut(&mut self, key: &str) -> Option<&mut Option<i64>> {
        let slot = match key {
            "timestamp" => &mut self.remote_timestamp,
            "uptime_seconds" => &mut self.uptime_seconds,
            "total_users" => &mut self.total_users,
            "total_nonbridged_users" => &mut self.total_nonbridged_users,
            "total_room_count" => &mut self.total_room_count,
            "daily_active_users" => &mut self.daily_active_users,
            "daily_active_rooms" => &mut self.daily_active_rooms,
            "daily_messages" => &mut self.daily_messages,
            "daily_sent_messages" => &mut self.daily_sent_messages,
            _ => return None,
        };
        Some(slot)
    }
}

struct ReportVisitor;

impl<'de> Visitor<'de> for ReportVisitor {
    type Value = StatsReport;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a usage report object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<StatsReport, A::Error> {
        let mut report = StatsReport::default();

        while let Some(key) = map.next_key::<String>()? {
            let key = key.to_lowercase();
            if key == "homeserver" {
                if let Some(homeserver) = map.next_value::<Option<String>>()? {
                    report.homeserver = homeserver;
                }
            } else if let Some(slot) = report.counter_mut(&key) {
                *slot = map.next_value()?;
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        Ok(report)
    }
}

impl<'de> Deserialize<'de> for StatsReport {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ReportVisitor)
    }
}

/// Decode a report from a complete request body.
pub fn decode_report(body: &[u8]) -> Result<StatsReport, DecodeError> {
    Ok(serde_json::from_slice(body)?)
}

/// Decode a report from a byte stream.
pub fn decode_report_from_reader<R: Read>(reader: R) -> Result<StatsReport, DecodeError> {
    Ok(serde_json::from_reader(reader)?)
}
