//! Insert statement synthesis throughput.
//!
//! Measures building the per-report INSERT for a sparse and a fully populated
//! report on each placeholder dialect.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use panopticon::extraction::report::StatsReport;
use panopticon::storage::dialect::Backend;
use panopticon::storage::models::StatsRecord;
use panopticon::storage::queries::build_stats_insert;

fn record(report: StatsReport) -> StatsRecord {
    StatsRecord {
        report,
        local_timestamp: 1_700_000_000,
        remote_addr: "192.0.2.1:5000".to_string(),
        forwarded_for: Some("203.0.113.9".to_string()),
        user_agent: Some("Synapse/1.99".to_string()),
    }
}

fn bench_insert(c: &mut Criterion) {
    let sparse = record(StatsReport {
        homeserver: "example.org".to_string(),
        ..Default::default()
    });
    let full = record(StatsReport {
        homeserver: "example.org".to_string(),
        remote_timestamp: Some(1_699_999_990),
        uptime_seconds: Some(86_400),
        total_users: Some(1_000),
        total_nonbridged_users: Some(900),
        total_room_count: Some(250),
        daily_active_users: Some(120),
        daily_active_rooms: Some(40),
        daily_messages: Some(5_000),
        daily_sent_messages: Some(800),
    });

    for backend in [Backend::Sqlite, Backend::MySql] {
        c.bench_function(&format!("insert_sparse_{}", backend), |b| {
            b.iter(|| build_stats_insert(backend, black_box(&sparse)))
        });
        c.bench_function(&format!("insert_full_{}", backend), |b| {
            b.iter(|| build_stats_insert(backend, black_box(&full)))
        });
    }
}

criterion_group!(benches, bench_insert);
criterion_main!(benches);
