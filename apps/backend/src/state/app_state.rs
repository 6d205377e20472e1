//! Application state containing shared resources.

use crate::config::GameConfig;
use crate::services::rooms::RoomRegistry;
use crate::state::stats::{ServerCounters, StatsSnapshot};
use crate::ws::hub::ConnectionHub;

/// Shared state for every handler and background task. Cheap to share via
/// `Arc`; all interior mutability lives in the registry/hub/counters.
pub struct AppState {
    pub config: GameConfig,
    /// Token gating the server-stats intent; None disables it.
    pub admin_token: Option<String>,
    pub rooms: RoomRegistry,
    pub hub: ConnectionHub,
    pub stats: ServerCounters,
}

impl AppState {
    pub fn new(config: GameConfig, admin_token: Option<String>) -> Self {
        let rooms = RoomRegistry::new(config.max_rooms);
        Self {
            config,
            admin_token,
            rooms,
            hub: ConnectionHub::new(),
            stats: ServerCounters::new(),
        }
    }

    /// State with test settings (see `GameConfig::for_tests`).
    pub fn for_tests() -> Self {
        Self::new(GameConfig::for_tests(), None)
    }

    pub fn stats_snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            active_rooms: self.rooms.room_count(),
            max_rooms: self.config.max_rooms,
            seated_players: self.rooms.seated_count(),
            open_connections: self.hub.connection_count(),
            rooms_created: ServerCounters::read(&self.stats.rooms_created),
            games_started: ServerCounters::read(&self.stats.games_started),
            games_completed: ServerCounters::read(&self.stats.games_completed),
            uptime_secs: self.stats.started_at.elapsed().as_secs(),
        }
    }
}
