//! Seating, reconnection matching, and the pause/resume policy.

use tracing::{info, warn};

use crate::domain::rules::PLAYERS;
use crate::domain::state::{team_for_seat, Phase, Seat, Team};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::services::game_flow::round_lifecycle::{deal_selection, resume_interrupted};
use crate::services::game_flow::{push_to_all, Outbound};
use crate::services::room::Room;
use crate::state::app_state::AppState;
use crate::state::stats::ServerCounters;
use crate::ws::hub::ConnId;
use crate::ws::protocol::ServerMsg;

/// Handle a join intent: reconnection by name first, then ordinary seating
/// with team preference. Also the trigger point for game start and for
/// resuming a paused game, since both fire on "all four seats connected".
pub fn handle_join(
    state: &AppState,
    conn: ConnId,
    room_id: &str,
    name: &str,
    team: Team,
    is_reconnect: bool,
) -> Result<Vec<Outbound>, DomainError> {
    let name = name.trim();
    if name.is_empty() || name.len() > 32 {
        return Err(DomainError::validation_other(
            "Display name must be 1-32 characters",
        ));
    }
    if state.rooms.room_of(conn).is_some() {
        return Err(DomainError::conflict(
            ConflictKind::AlreadySeated,
            "This connection is already seated in a room",
        ));
    }

    let (room_arc, created) = state.rooms.get_or_create(room_id)?;
    if created {
        ServerCounters::incr(&state.stats.rooms_created);
        info!(room_id, "room created");
    }

    let mut room = room_arc.lock();
    room.touch();
    let mut out = Vec::new();

    // Reconnection matching: an occupied-but-disconnected seat holding this
    // name is re-bound; a connected one is a duplicate; otherwise fall
    // through to ordinary seating.
    if is_reconnect {
        if let Some(seat) = room.seat_by_name(name) {
            rejoin_seat(state, &mut room, seat, conn, room_id, name, &mut out)?;
            return Ok(out);
        }
    }

    if let Some(existing) = room.seat_by_name(name) {
        if room.seats[existing as usize]
            .as_ref()
            .is_some_and(|p| p.connected)
        {
            return Err(duplicate_name(name));
        }
        // A non-reconnect join never steals a held seat.
        warn!(room_id, name, "joining alongside a disconnected namesake");
    }

    let seat = room.assign_seat(team, name, conn)?;
    state.rooms.bind(conn, room_id);
    info!(room_id, seat, name, "player joined");

    push_to_all(
        &mut out,
        &room.connected_conns(),
        &ServerMsg::PlayerJoined {
            position: seat,
            name: name.to_string(),
            team: team_for_seat(seat),
            player_count: room.occupied_count() as u8,
        },
    );

    // A late joiner into an in-progress (paused) room needs the full state
    // to render anything, same as a reconnector.
    if room.game.phase != Phase::Waiting {
        out.push(Outbound::new(
            conn,
            ServerMsg::GameInProgress {
                snapshot: room.snapshot_for(seat),
            },
        ));
    }

    maybe_start_or_resume(state, &mut room, &mut out);
    Ok(out)
}

fn rejoin_seat(
    state: &AppState,
    room: &mut Room,
    seat: Seat,
    conn: ConnId,
    room_id: &str,
    name: &str,
    out: &mut Vec<Outbound>,
) -> Result<(), DomainError> {
    if room.seats[seat as usize]
        .as_ref()
        .is_some_and(|p| p.connected)
    {
        return Err(duplicate_name(name));
    }

    room.rebind_seat(seat, conn);
    state.rooms.bind(conn, room_id);
    info!(room_id, seat, name, "player reconnected");

    out.push(Outbound::new(
        conn,
        ServerMsg::GameInProgress {
            snapshot: room.snapshot_for(seat),
        },
    ));
    push_to_all(
        out,
        &room.connected_conns_except(seat),
        &ServerMsg::PlayerRejoined {
            position: seat,
            name: name.to_string(),
        },
    );

    maybe_start_or_resume(state, room, out);
    Ok(())
}

fn duplicate_name(name: &str) -> DomainError {
    DomainError::conflict(
        ConflictKind::DuplicateName,
        format!("The name {name} is already taken in this room"),
    )
}

/// Both game start and pause exit trigger on the same condition: all four
/// seats simultaneously connected.
fn maybe_start_or_resume(state: &AppState, room: &mut Room, out: &mut Vec<Outbound>) {
    if room.connected_count() < PLAYERS {
        return;
    }
    match room.game.phase {
        Phase::Waiting => {
            ServerCounters::incr(&state.stats.games_started);
            info!(room_id = %room.id, "all seats connected, game starting");
            deal_selection(room, out);
        }
        Phase::Paused { interrupted } => resume_interrupted(room, interrupted, out),
        _ => {}
    }
}

/// Transport-originated disconnect: release the binding, hold the seat for
/// reconnection, and pause any deal in progress. A connection that was
/// never seated produces no notifications.
pub fn handle_disconnect(state: &AppState, conn: ConnId) -> Vec<Outbound> {
    let mut out = Vec::new();
    let Some(room_id) = state.rooms.unbind(conn) else {
        return out;
    };
    let Some(room_arc) = state.rooms.get(&room_id) else {
        return out;
    };

    let mut room = room_arc.lock();
    let Some(seat) = room.seat_of_conn(conn) else {
        return out;
    };

    room.mark_disconnected(seat);
    room.touch();
    let name = room.name_at(seat);
    info!(room_id = %room.id, seat, name = %name, "player disconnected");

    push_to_all(
        &mut out,
        &room.connected_conns(),
        &ServerMsg::PlayerLeft {
            position: seat,
            name: name.clone(),
        },
    );

    // Even a single disconnection pauses a deal in progress.
    if let Some(interrupted) = room.game.phase.pausable() {
        room.game.phase = Phase::Paused { interrupted };
        info!(room_id = %room.id, "game paused");
        push_to_all(
            &mut out,
            &room.connected_conns(),
            &ServerMsg::GameInterrupted {
                position: seat,
                name,
            },
        );
    }

    out
}
