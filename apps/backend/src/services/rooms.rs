//! Room registry: lazy room creation under a cap, connection bindings, and
//! lookups for the sweeps.
//!
//! Rooms are independent: the registry maps are lock-free concurrent maps
//! and each room carries its own mutex, so operations on distinct rooms
//! never contend.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::info;

use crate::errors::domain::{CapacityKind, DomainError};
use crate::services::room::Room;
use crate::ws::hub::ConnId;

#[derive(Debug)]
pub struct RoomRegistry {
    rooms: DashMap<String, Arc<Mutex<Room>>>,
    /// Which room each connection is seated in (at most one).
    connections: DashMap<ConnId, String>,
    max_rooms: usize,
}

impl RoomRegistry {
    pub fn new(max_rooms: usize) -> Self {
        Self {
            rooms: DashMap::new(),
            connections: DashMap::new(),
            max_rooms,
        }
    }

    pub fn get(&self, room_id: &str) -> Option<Arc<Mutex<Room>>> {
        self.rooms.get(room_id).map(|r| r.value().clone())
    }

    /// Fetch a room, creating it lazily on first join. Returns whether this
    /// call created it. Creation is rejected at the concurrent-room cap.
    pub fn get_or_create(&self, room_id: &str) -> Result<(Arc<Mutex<Room>>, bool), DomainError> {
        if let Some(existing) = self.get(room_id) {
            return Ok((existing, false));
        }
        if self.rooms.len() >= self.max_rooms {
            return Err(DomainError::capacity(
                CapacityKind::ServerFull,
                "Server is at its room limit, try again later",
            ));
        }
        // The cap check above happens outside the shard lock; a concurrent
        // join may have inserted the same id in between, so re-check here.
        match self.rooms.entry(room_id.to_string()) {
            Entry::Occupied(e) => Ok((e.get().clone(), false)),
            Entry::Vacant(v) => {
                let room = Arc::new(Mutex::new(Room::new(room_id.to_string())));
                v.insert(room.clone());
                Ok((room, true))
            }
        }
    }

    pub fn bind(&self, conn: ConnId, room_id: &str) {
        self.connections.insert(conn, room_id.to_string());
    }

    pub fn unbind(&self, conn: ConnId) -> Option<String> {
        self.connections.remove(&conn).map(|(_, room_id)| room_id)
    }

    pub fn room_of(&self, conn: ConnId) -> Option<String> {
        self.connections.get(&conn).map(|r| r.value().clone())
    }

    /// Drop a room and every connection binding into it.
    pub fn remove(&self, room_id: &str) {
        if self.rooms.remove(room_id).is_some() {
            info!(room_id, "room removed");
        }
        self.connections.retain(|_, bound| bound != room_id);
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn seated_count(&self) -> usize {
        self.connections.len()
    }

    /// Stable snapshot of the current rooms, for sweeps to iterate without
    /// holding any registry shard lock.
    pub fn snapshot_rooms(&self) -> Vec<(String, Arc<Mutex<Room>>)> {
        self.rooms
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect()
    }
}
