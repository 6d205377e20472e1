//! Deal lifecycle: selection deals, pause/resume, and the timed
//! continuations that pace tricks, deals, and room teardown.
//!
//! Continuations are fire-and-forget tasks keyed by room id. There is no
//! cancellation: each one re-resolves the room and re-checks the expected
//! phase when it fires, and no-ops if a pause, eviction, or teardown got
//! there first.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::domain::dealing;
use crate::domain::state::{InterruptedPhase, Phase};
use crate::domain::tricks::{lead_suit, legal_play_indices};
use crate::services::game_flow::{push_to_all, Outbound};
use crate::services::room::Room;
use crate::state::app_state::AppState;
use crate::ws::protocol::ServerMsg;

/// Shuffle a fresh deck and deal the selector's four-card selection hand,
/// queueing the trump prompts.
pub(crate) fn deal_selection(room: &mut Room, out: &mut Vec<Outbound>) {
    let mut rng = rand::rng();
    let deck = dealing::shuffled_deck(&mut rng);
    if let Err(err) = dealing::begin_selection_deal(&mut room.game, deck) {
        // Unreachable with a fresh deck; log and leave the room intact.
        tracing::error!(room_id = %room.id, error = %err, "selection deal failed");
        return;
    }

    let selector = room.game.trump_selector;
    info!(room_id = %room.id, seat = selector, "selection hand dealt");
    emit_trump_prompts(room, out);
}

/// Queue `can_select_trump` to the selector and `waiting_for_trump` to the
/// other seats, from the current selection hand.
pub(crate) fn emit_trump_prompts(room: &Room, out: &mut Vec<Outbound>) {
    let selector = room.game.trump_selector;
    let hand: Vec<_> = room.game.hands[selector as usize]
        .iter()
        .flatten()
        .copied()
        .collect();
    if let Some(conn) = room.conn_at(selector) {
        out.push(Outbound::new(conn, ServerMsg::CanSelectTrump { hand }));
    }
    push_to_all(
        out,
        &room.connected_conns_except(selector),
        &ServerMsg::WaitingForTrump {
            position: selector,
            name: room.name_at(selector),
        },
    );
}

/// Queue `your_turn` to the seat expected to act and `turn_update` to the
/// rest of the room.
pub(crate) fn emit_turn(room: &Room, out: &mut Vec<Outbound>) {
    let seat = room.game.current_seat;
    let hand = &room.game.hands[seat as usize];
    let legal_indices = legal_play_indices(hand, lead_suit(&room.game.current_trick));
    if let Some(conn) = room.conn_at(seat) {
        out.push(Outbound::new(conn, ServerMsg::YourTurn { legal_indices }));
    }
    push_to_all(
        out,
        &room.connected_conns_except(seat),
        &ServerMsg::TurnUpdate {
            position: seat,
            name: room.name_at(seat),
        },
    );
}

/// Leave the pause overlay for the interrupted phase. If the selection hand
/// was lost while paused (evicted seat, abandoned deal), a fresh selection
/// deal is issued; otherwise the pending prompt is re-delivered so the
/// interrupted seat's turn is not swallowed.
pub(crate) fn resume_interrupted(
    room: &mut Room,
    interrupted: InterruptedPhase,
    out: &mut Vec<Outbound>,
) {
    room.game.phase = interrupted.into();
    info!(room_id = %room.id, phase = ?room.game.phase, "game resumed");
    push_to_all(out, &room.connected_conns(), &ServerMsg::GameResumed);

    match interrupted {
        InterruptedPhase::TrumpSelection => {
            let selector = room.game.trump_selector as usize;
            if room.game.hands[selector].is_empty() {
                deal_selection(room, out);
            } else {
                emit_trump_prompts(room, out);
            }
        }
        InterruptedPhase::Playing => emit_turn(room, out),
    }
}

/// Deferred continuation: prompt the next trick's leader. No-ops unless the
/// room still exists, is actively playing, and the trick has not started.
pub fn open_next_trick(state: &AppState, room_id: &str) -> Vec<Outbound> {
    let mut out = Vec::new();
    let Some(room_arc) = state.rooms.get(room_id) else {
        return out;
    };
    let room = room_arc.lock();
    if room.game.phase != Phase::Playing
        || !room.game.current_trick.is_empty()
        || room.game.deal_complete()
    {
        debug!(room_id, "next-trick continuation no-op");
        return out;
    }
    emit_turn(&room, &mut out);
    out
}

/// Deferred continuation: deal the next deal's selection hand. No-ops
/// unless the room is in trump selection with no hand dealt yet (a pause
/// hands the job to `resume_interrupted` instead).
pub fn start_next_deal(state: &AppState, room_id: &str) -> Vec<Outbound> {
    let mut out = Vec::new();
    let Some(room_arc) = state.rooms.get(room_id) else {
        return out;
    };
    let mut room = room_arc.lock();
    let selector = room.game.trump_selector as usize;
    if room.game.phase != Phase::TrumpSelection || !room.game.hands[selector].is_empty() {
        debug!(room_id, "next-deal continuation no-op");
        return out;
    }
    deal_selection(&mut room, &mut out);
    out
}

/// Deferred continuation: tear down a finished room after the result-display
/// grace. No-ops unless the room still exists and is completed.
pub fn close_finished_room(state: &AppState, room_id: &str) -> Vec<Outbound> {
    let mut out = Vec::new();
    let Some(room_arc) = state.rooms.get(room_id) else {
        return out;
    };
    {
        let room = room_arc.lock();
        if room.game.phase != Phase::Completed {
            debug!(room_id, "room-close continuation no-op");
            return out;
        }
        push_to_all(&mut out, &room.connected_conns(), &ServerMsg::RoomClosed);
    }
    state.rooms.remove(room_id);
    out
}

/// Schedule a continuation for `room_id` after `delay`, delivering whatever
/// it produces when it fires.
pub(crate) fn schedule_after(
    state: &Arc<AppState>,
    delay: Duration,
    room_id: &str,
    continuation: fn(&AppState, &str) -> Vec<Outbound>,
) {
    let state = Arc::clone(state);
    let room_id = room_id.to_string();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let out = continuation(&state, &room_id);
        state.hub.deliver_all(out);
    });
}
