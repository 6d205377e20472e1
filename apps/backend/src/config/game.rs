//! Game/session tunables.
//!
//! Everything here is read from the environment with a sensible default, so
//! a bare `omi-backend` starts with playable settings. Durations are
//! expressed in the unit named by the variable suffix.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::domain::rules::DEFAULT_TARGET_SCORE;

#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Maximum concurrent rooms; joins creating more are rejected.
    pub max_rooms: usize,
    /// Accumulated team score that ends a match.
    pub target_score: u8,
    /// How long a disconnected seat is held before eviction.
    pub disconnect_timeout: Duration,
    /// How long a room with zero connected seats survives.
    pub empty_room_grace: Duration,
    /// Health/cleanup sweep period.
    pub cleanup_interval: Duration,
    /// Read-only statistics sweep period.
    pub stats_interval: Duration,
    /// Pause between a resolved trick and the next trick's turn prompt.
    pub next_trick_delay: Duration,
    /// Pause between a completed deal and the next selection deal.
    pub next_deal_delay: Duration,
    /// How long a completed match's room lingers for result display.
    pub room_close_delay: Duration,
    /// Grace between shutdown notices and hard stop.
    pub shutdown_grace: Duration,
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self {
            max_rooms: env_parse("OMI_MAX_ROOMS", 500),
            target_score: env_parse("OMI_TARGET_SCORE", DEFAULT_TARGET_SCORE),
            disconnect_timeout: Duration::from_secs(env_parse(
                "OMI_DISCONNECT_TIMEOUT_SECS",
                120,
            )),
            empty_room_grace: Duration::from_secs(env_parse("OMI_EMPTY_ROOM_GRACE_SECS", 60)),
            cleanup_interval: Duration::from_secs(env_parse("OMI_CLEANUP_INTERVAL_SECS", 30)),
            stats_interval: Duration::from_secs(env_parse("OMI_STATS_INTERVAL_SECS", 300)),
            next_trick_delay: Duration::from_millis(env_parse("OMI_NEXT_TRICK_DELAY_MS", 2000)),
            next_deal_delay: Duration::from_millis(env_parse("OMI_NEXT_DEAL_DELAY_MS", 4000)),
            room_close_delay: Duration::from_secs(env_parse("OMI_ROOM_CLOSE_DELAY_SECS", 30)),
            shutdown_grace: Duration::from_secs(env_parse("OMI_SHUTDOWN_GRACE_SECS", 5)),
        }
    }

    /// Settings for tests: tiny eviction/grace windows so sweeps can be
    /// exercised quickly, and long pacing delays so deferred continuations
    /// never fire mid-test (tests invoke them directly instead).
    pub fn for_tests() -> Self {
        Self {
            max_rooms: 8,
            target_score: DEFAULT_TARGET_SCORE,
            disconnect_timeout: Duration::from_millis(50),
            empty_room_grace: Duration::from_millis(50),
            cleanup_interval: Duration::from_secs(3600),
            stats_interval: Duration::from_secs(3600),
            next_trick_delay: Duration::from_secs(600),
            next_deal_delay: Duration::from_secs(600),
            room_close_delay: Duration::from_secs(600),
            shutdown_grace: Duration::ZERO,
        }
    }
}

fn env_parse<T: FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}
