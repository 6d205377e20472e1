//! Game flow orchestration: maps inbound intents to room mutations and
//! collects the notifications they owe each connection.
//!
//! Handlers lock exactly one room, mutate it through the domain layer, and
//! return addressed [`Outbound`] messages; delivery happens after the lock
//! is released (see `ws::hub`). Timed continuations re-validate room and
//! phase when they fire.

pub mod player_actions;
pub mod round_lifecycle;
pub mod seats;

pub use player_actions::{handle_play_card, handle_select_trump};
pub use seats::{handle_disconnect, handle_join};

use crate::ws::hub::ConnId;
use crate::ws::protocol::ServerMsg;

/// One notification addressed to one connection.
#[derive(Debug, Clone)]
pub struct Outbound {
    pub to: ConnId,
    pub msg: ServerMsg,
}

impl Outbound {
    pub fn new(to: ConnId, msg: ServerMsg) -> Self {
        Self { to, msg }
    }
}

/// Queue `msg` for every listed connection.
pub(crate) fn push_to_all(out: &mut Vec<Outbound>, conns: &[ConnId], msg: &ServerMsg) {
    for &conn in conns {
        out.push(Outbound::new(conn, msg.clone()));
    }
}
