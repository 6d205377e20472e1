#![allow(dead_code)]

//! Shared helpers for the service-layer integration tests.
//!
//! These tests drive the game-flow handlers directly (no sockets): every
//! handler returns the addressed notifications it would deliver, so tests
//! assert on those and on registry/room state.

use std::sync::Arc;

use omi_backend::domain::cards_types::Suit;
use omi_backend::domain::state::{Seat, Team};
use omi_backend::services::game_flow::{self, Outbound};
use omi_backend::services::room::Room;
use omi_backend::state::app_state::AppState;
use omi_backend::ws::hub::ConnId;
use omi_backend::ws::protocol::ServerMsg;
use parking_lot::Mutex;
use uuid::Uuid;

pub const NAMES: [&str; 4] = ["Asha", "Bimal", "Chamari", "Dinesh"];

pub fn test_state() -> Arc<AppState> {
    Arc::new(AppState::for_tests())
}

pub fn conn() -> ConnId {
    Uuid::new_v4()
}

pub fn room_arc(state: &AppState, room_id: &str) -> Arc<Mutex<Room>> {
    state.rooms.get(room_id).expect("room should exist")
}

/// Join the four standard players in seat order (teams A,B,A,B → seats
/// 0..=3). Returns their connection ids and the final join's notifications
/// (the ones that carry the game start).
pub fn join_four(state: &Arc<AppState>, room_id: &str) -> ([ConnId; 4], Vec<Outbound>) {
    let conns: [ConnId; 4] = std::array::from_fn(|_| conn());
    let teams = [Team::A, Team::B, Team::A, Team::B];
    let mut last = Vec::new();
    for i in 0..4 {
        last = game_flow::handle_join(state, conns[i], room_id, NAMES[i], teams[i], false)
            .expect("join should succeed");
    }
    (conns, last)
}

/// The selector's trump choice; returns its notifications.
pub fn select_trump(state: &Arc<AppState>, room_id: &str, trump: Suit) -> Vec<Outbound> {
    let (selector_conn, _) = {
        let arc = room_arc(state, room_id);
        let room = arc.lock();
        let selector = room.game.trump_selector;
        (room.conn_at(selector).expect("selector connected"), selector)
    };
    game_flow::handle_select_trump(state, selector_conn, room_id, trump)
        .expect("trump selection should succeed")
}

/// Play the current seat's first legal card; returns the notifications.
pub fn play_one(state: &Arc<AppState>, room_id: &str) -> Vec<Outbound> {
    let (conn, index) = {
        let arc = room_arc(state, room_id);
        let room = arc.lock();
        let seat = room.game.current_seat;
        let hand = &room.game.hands[seat as usize];
        let lead = omi_backend::domain::tricks::lead_suit(&room.game.current_trick);
        let legal = omi_backend::domain::tricks::legal_play_indices(hand, lead);
        (
            room.conn_at(seat).expect("current seat connected"),
            *legal.first().expect("a legal card must exist"),
        )
    };
    game_flow::handle_play_card(state, conn, room_id, index).expect("legal play should succeed")
}

pub fn current_seat(state: &AppState, room_id: &str) -> Seat {
    room_arc(state, room_id).lock().game.current_seat
}

/// Messages addressed to one connection.
pub fn msgs_for<'a>(outs: &'a [Outbound], to: ConnId) -> Vec<&'a ServerMsg> {
    outs.iter().filter(|o| o.to == to).map(|o| &o.msg).collect()
}

/// Count of messages matching a predicate, across all recipients.
pub fn count_matching(outs: &[Outbound], pred: impl Fn(&ServerMsg) -> bool) -> usize {
    outs.iter().filter(|o| pred(&o.msg)).count()
}
