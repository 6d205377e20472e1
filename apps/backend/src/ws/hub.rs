//! Connection hub: maps live connection ids to session actor recipients.
//!
//! Handlers never talk to sockets; they return addressed notifications and
//! the hub fans them out with non-blocking `do_send`, so no room lock is
//! ever held across delivery.

use actix::prelude::*;
use dashmap::DashMap;
use uuid::Uuid;

use crate::services::game_flow::Outbound;
use crate::ws::protocol::ServerMsg;

pub type ConnId = Uuid;

#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Deliver(pub ServerMsg);

#[derive(Default)]
pub struct ConnectionHub {
    sessions: DashMap<ConnId, Recipient<Deliver>>,
}

impl ConnectionHub {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn register(&self, conn: ConnId, recipient: Recipient<Deliver>) {
        self.sessions.insert(conn, recipient);
    }

    pub fn unregister(&self, conn: ConnId) {
        self.sessions.remove(&conn);
    }

    pub fn connection_count(&self) -> usize {
        self.sessions.len()
    }

    /// Best-effort send; a vanished session just drops the message.
    pub fn send(&self, conn: ConnId, msg: ServerMsg) {
        if let Some(recipient) = self.sessions.get(&conn) {
            let _ = recipient.value().do_send(Deliver(msg));
        }
    }

    pub fn deliver_all(&self, outs: Vec<Outbound>) {
        for out in outs {
            self.send(out.to, out.msg);
        }
    }
}
