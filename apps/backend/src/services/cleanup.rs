//! Registry sweeps and shutdown notices.
//!
//! Two independent loops run against the whole registry: a health sweep
//! (evict stale disconnected seats, reap rooms with nobody connected) and a
//! lower-frequency, read-only statistics sweep. Both only touch per-room
//! state under each room's own mutex, so they are safe alongside live event
//! handling.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::domain::state::{InterruptedPhase, Phase};
use crate::services::game_flow::{push_to_all, Outbound};
use crate::state::app_state::AppState;
use crate::ws::protocol::ServerMsg;

/// One pass of the health sweep. Returns the roster notifications owed to
/// rooms that lost seats.
pub fn run_health_sweep(state: &AppState) -> Vec<Outbound> {
    let now = Instant::now();
    let mut out = Vec::new();
    let mut expired = Vec::new();

    for (room_id, room_arc) in state.rooms.snapshot_rooms() {
        let mut room = room_arc.lock();

        let evicted = room.evict_stale(state.config.disconnect_timeout, now);
        if !evicted.is_empty() {
            for (seat, name) in &evicted {
                info!(room_id = %room.id, seat = *seat, name = %name, "evicted stale seat");
            }
            // A paused deal cannot survive losing a hand: abandon it and
            // retarget the pause at trump selection, so resume re-deals.
            if matches!(room.game.phase, Phase::Paused { .. }) {
                room.game.reset_deal();
                room.game.phase = Phase::Paused {
                    interrupted: InterruptedPhase::TrumpSelection,
                };
                room.game.current_seat = room.game.trump_selector;
            }
            push_to_all(
                &mut out,
                &room.connected_conns(),
                &ServerMsg::RoomCleaned {
                    players: room.public_seats(),
                },
            );
        }

        if room.connected_count() == 0
            && now.duration_since(room.last_activity) >= state.config.empty_room_grace
        {
            expired.push(room_id);
        }
    }

    for room_id in expired {
        info!(room_id = %room_id, "reaping empty room");
        state.rooms.remove(&room_id);
    }
    out
}

/// Spawn the periodic health and statistics sweeps.
pub fn spawn_sweeps(state: Arc<AppState>) {
    let health_state = Arc::clone(&state);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(health_state.config.cleanup_interval);
        ticker.tick().await; // immediate first tick
        loop {
            ticker.tick().await;
            let out = run_health_sweep(&health_state);
            health_state.hub.deliver_all(out);
        }
    });

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(state.config.stats_interval);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let stats = state.stats_snapshot();
            info!(
                active_rooms = stats.active_rooms,
                seated_players = stats.seated_players,
                open_connections = stats.open_connections,
                rooms_created = stats.rooms_created,
                games_started = stats.games_started,
                games_completed = stats.games_completed,
                uptime_secs = stats.uptime_secs,
                "server stats"
            );
        }
    });
}

/// Shutdown notices for every connected seat in every room.
pub fn shutdown_notices(state: &AppState) -> Vec<Outbound> {
    let mut out = Vec::new();
    for (_, room_arc) in state.rooms.snapshot_rooms() {
        let room = room_arc.lock();
        push_to_all(&mut out, &room.connected_conns(), &ServerMsg::ServerShutdown);
    }
    out
}
