//! WebSocket transport: protocol types, connection hub, session actor.

pub mod hub;
pub mod protocol;
pub mod session;
