//! Aggregate server counters and the admin-facing snapshot.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::Serialize;

/// Monotonic counters, bumped from event handlers. Reads are relaxed; the
/// snapshot is informational, not a synchronization point.
#[derive(Debug)]
pub struct ServerCounters {
    pub rooms_created: AtomicU64,
    pub games_started: AtomicU64,
    pub games_completed: AtomicU64,
    pub started_at: Instant,
}

impl ServerCounters {
    pub fn new() -> Self {
        Self {
            rooms_created: AtomicU64::new(0),
            games_started: AtomicU64::new(0),
            games_completed: AtomicU64::new(0),
            started_at: Instant::now(),
        }
    }

    pub fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn read(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::Relaxed)
    }
}

impl Default for ServerCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time aggregate view, served to admin connections and logged by
/// the statistics sweep.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub active_rooms: usize,
    pub max_rooms: usize,
    pub seated_players: usize,
    pub open_connections: usize,
    pub rooms_created: u64,
    pub games_started: u64,
    pub games_completed: u64,
    pub uptime_secs: u64,
}
