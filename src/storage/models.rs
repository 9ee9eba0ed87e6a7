//! Database models for report storage.
//!
//! These models describe the `stats` table and the row written for each
//! accepted report.

use crate::extraction::report::StatsReport;

/// Name of the table every report lands in.
pub const STATS_TABLE: &str = "stats";

/// Every storable column of the `stats` table, apart from the identity key.
///
/// Column names reach SQL text only through [`Column::as_str`], so statement
/// text is always built from this fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Homeserver,
    LocalTimestamp,
    RemoteTimestamp,
    RemoteAddr,
    ForwardedFor,
    UptimeSeconds,
    TotalUsers,
    TotalNonBridgedUsers,
    TotalRoomCount,
    DailyActiveUsers,
    DailyActiveRooms,
    DailyMessages,
    DailySentMessages,
    UserAgent,
}

impl Column {
    /// The full column superset, in table definition order.
    pub const SUPERSET: [Column; 14] = [
        Column::Homeserver,
        Column::LocalTimestamp,
        Column::RemoteTimestamp,
        Column::RemoteAddr,
        Column::ForwardedFor,
        Column::UptimeSeconds,
        Column::TotalUsers,
        Column::TotalNonBridgedUsers,
        Column::TotalRoomCount,
        Column::DailyActiveUsers,
        Column::DailyActiveRooms,
        Column::DailyMessages,
        Column::DailySentMessages,
        Column::UserAgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Homeserver => "homeserver",
            Column::LocalTimestamp => "local_timestamp",
            Column::RemoteTimestamp => "remote_timestamp",
            Column::RemoteAddr => "remote_addr",
            Column::ForwardedFor => "forwarded_for",
            Column::UptimeSeconds => "uptime_seconds",
            Column::TotalUsers => "total_users",
            Column::TotalNonBridgedUsers => "total_nonbridged_users",
            Column::TotalRoomCount => "total_room_count",
            Column::DailyActiveUsers => "daily_active_users",
            Column::DailyActiveRooms => "daily_active_rooms",
            Column::DailyMessages => "daily_messages",
            Column::DailySentMessages => "daily_sent_messages",
            Column::UserAgent => "user_agent",
        }
    }

    /// Column type. The same spelling is accepted by every supported backend.
    pub fn sql_type(&self) -> &'static str {
        match self {
            Column::Homeserver => "VARCHAR(256)",
            Column::RemoteAddr | Column::ForwardedFor | Column::UserAgent => "TEXT",
            _ => "BIGINT",
        }
    }
}

/// A value bound to one insert parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Int(i64),
    Text(String),
}

/// A report ready for storage: the decoded report plus the fields the
/// server fills in itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRecord {
    pub report: StatsReport,
    /// Receipt time, seconds since epoch, UTC.
    pub local_timestamp: i64,
    pub remote_addr: String,
    pub forwarded_for: Option<String>,
    pub user_agent: Option<String>,
}

impl StatsRecord {
    /// Columns to write for this record, paired with their values.
    ///
    /// The three always-present columns come first, then each optional
    /// column that carries a value, in a fixed order. Absent fields produce
    /// no entry at all.
    pub fn bindings(&self) -> Vec<(Column, SqlValue)> {
        let report = &self.report;
        let mut bindings = vec![
            (Column::Homeserver, SqlValue::Text(report.homeserver.clone())),
            (Column::LocalTimestamp, SqlValue::Int(self.local_timestamp)),
            (Column::RemoteAddr, SqlValue::Text(self.remote_addr.clone())),
        ];

        let counters = [
            (Column::RemoteTimestamp, report.remote_timestamp),
            (Column::UptimeSeconds, report.uptime_seconds),
            (Column::TotalUsers, report.total_users),
            (Column::TotalNonBridgedUsers, report.total_nonbridged_users),
            (Column::TotalRoomCount, report.total_room_count),
            (Column::DailyActiveUsers, report.daily_active_users),
            (Column::DailyActiveRooms, report.daily_active_rooms),
            (Column::DailyMessages, report.daily_messages),
            (Column::DailySentMessages, report.daily_sent_messages),
        ];
        bindings.extend(
            counters
                .into_iter()
                .filter_map(|(column, value)| value.map(|v| (column, SqlValue::Int(v)))),
        );

        let headers = [
            (Column::ForwardedFor, &self.forwarded_for),
            (Column::UserAgent, &self.user_agent),
        ];
        bindings.extend(headers.into_iter().filter_map(|(column, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (column, SqlValue::Text(v.to_string())))
        }));

        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(report: StatsReport) -> StatsRecord {
        StatsRecord {
            report,
            local_timestamp: 1_700_000_000,
            remote_addr: "192.0.2.1:5000".to_string(),
            forwarded_for: None,
            user_agent: None,
        }
    }

    fn columns(record: &StatsRecord) -> Vec<&'static str> {
        record.bindings().iter().map(|(c, _)| c.as_str()).collect()
    }

    #[test]
    fn test_homeserver_only_binds_three_columns() {
        let rec = record(StatsReport { homeserver: "example.org".into(), ..Default::default() });
        assert_eq!(columns(&rec), vec!["homeserver", "local_timestamp", "remote_addr"]);
        assert_eq!(
            rec.bindings()[1],
            (Column::LocalTimestamp, SqlValue::Int(1_700_000_000))
        );
    }

    #[test]
    fn test_zero_counter_is_bound() {
        let rec = record(StatsReport {
            homeserver: "a".into(),
            total_users: Some(0),
            ..Default::default()
        });
        assert_eq!(rec.bindings()[3], (Column::TotalUsers, SqlValue::Int(0)));
        assert_eq!(rec.bindings().len(), 4);
    }

    #[test]
    fn test_canonical_order() {
        let mut rec = record(StatsReport {
            homeserver: "a".into(),
            remote_timestamp: Some(1),
            uptime_seconds: Some(2),
            total_users: Some(3),
            total_nonbridged_users: Some(4),
            total_room_count: Some(5),
            daily_active_users: Some(6),
            daily_active_rooms: Some(7),
            daily_messages: Some(8),
            daily_sent_messages: Some(9),
        });
        rec.forwarded_for = Some("203.0.113.9".into());
        rec.user_agent = Some("Synapse/1.0".into());

        assert_eq!(
            columns(&rec),
            vec![
                "homeserver",
                "local_timestamp",
                "remote_addr",
                "remote_timestamp",
                "uptime_seconds",
                "total_users",
                "total_nonbridged_users",
                "total_room_count",
                "daily_active_users",
                "daily_active_rooms",
                "daily_messages",
                "daily_sent_messages",
                "forwarded_for",
                "user_agent",
            ]
        );
    }

    #[test]
    fn test_empty_headers_are_skipped() {
        let mut rec = record(StatsReport::default());
        rec.forwarded_for = Some(String::new());
        rec.user_agent = Some("curl/8".into());
        assert_eq!(columns(&rec), vec!["homeserver", "local_timestamp", "remote_addr", "user_agent"]);
    }

    #[test]
    fn test_superset_covers_every_binding() {
        let mut rec = record(StatsReport {
            homeserver: "a".into(),
            remote_timestamp: Some(1),
            daily_sent_messages: Some(9),
            ..Default::default()
        });
        rec.user_agent = Some("ua".into());
        for (column, _) in rec.bindings() {
            assert!(Column::SUPERSET.contains(&column));
        }
    }
}
