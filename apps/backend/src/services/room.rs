//! The Room aggregate: four seats plus the pure game state.
//!
//! A room is always accessed under its registry mutex; every method here is
//! a plain synchronous mutation or read, so an inbound event is one atomic
//! step against the room.

use std::time::{Duration, Instant};

use crate::domain::rules::PLAYERS;
use crate::domain::snapshot::{GameSnapshot, SeatPublic};
use crate::domain::state::{team_for_seat, GameState, Seat, Team};
use crate::errors::domain::{CapacityKind, DomainError};
use crate::ws::hub::ConnId;

/// One occupied seat. `conn` is present iff the player is connected; a
/// disconnected seat is held (for reconnection by name) until evicted.
#[derive(Debug, Clone)]
pub struct PlayerSeat {
    pub conn: Option<ConnId>,
    pub name: String,
    pub connected: bool,
    pub last_seen: Instant,
}

#[derive(Debug)]
pub struct Room {
    pub id: String,
    pub seats: [Option<PlayerSeat>; PLAYERS],
    pub game: GameState,
    pub created_at: Instant,
    pub last_activity: Instant,
}

impl Room {
    pub fn new(id: String) -> Self {
        let now = Instant::now();
        Self {
            id,
            seats: [None, None, None, None],
            game: GameState::new(),
            created_at: now,
            last_activity: now,
        }
    }

    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    pub fn seat_of_conn(&self, conn: ConnId) -> Option<Seat> {
        self.seats.iter().enumerate().find_map(|(i, seat)| {
            seat.as_ref()
                .filter(|p| p.conn == Some(conn))
                .map(|_| i as Seat)
        })
    }

    pub fn seat_by_name(&self, name: &str) -> Option<Seat> {
        self.seats.iter().enumerate().find_map(|(i, seat)| {
            seat.as_ref().filter(|p| p.name == name).map(|_| i as Seat)
        })
    }

    pub fn name_at(&self, seat: Seat) -> String {
        self.seats[seat as usize]
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }

    pub fn conn_at(&self, seat: Seat) -> Option<ConnId> {
        self.seats[seat as usize].as_ref().and_then(|p| p.conn)
    }

    pub fn occupied_count(&self) -> usize {
        self.seats.iter().flatten().count()
    }

    pub fn connected_count(&self) -> usize {
        self.seats.iter().flatten().filter(|p| p.connected).count()
    }

    pub fn connected_conns(&self) -> Vec<ConnId> {
        self.seats.iter().flatten().filter_map(|p| p.conn).collect()
    }

    pub fn connected_conns_except(&self, seat: Seat) -> Vec<ConnId> {
        self.seats
            .iter()
            .enumerate()
            .filter(|&(i, _)| i as Seat != seat)
            .filter_map(|(_, s)| s.as_ref().and_then(|p| p.conn))
            .collect()
    }

    /// Seat a new player with team preference: first empty seat among the
    /// preferred team's pair, then the other team's, else the room is full.
    /// Occupied-but-disconnected seats are reserved and never reassigned.
    pub fn assign_seat(
        &mut self,
        preferred: Team,
        name: &str,
        conn: ConnId,
    ) -> Result<Seat, DomainError> {
        let order: [Seat; PLAYERS] = match preferred {
            Team::A => [0, 2, 1, 3],
            Team::B => [1, 3, 0, 2],
        };
        let seat = order
            .into_iter()
            .find(|&s| self.seats[s as usize].is_none())
            .ok_or_else(|| DomainError::capacity(CapacityKind::RoomFull, "Room is full"))?;

        self.seats[seat as usize] = Some(PlayerSeat {
            conn: Some(conn),
            name: name.to_string(),
            connected: true,
            last_seen: Instant::now(),
        });
        Ok(seat)
    }

    /// Re-bind a reconnecting player to the seat that held their name.
    pub fn rebind_seat(&mut self, seat: Seat, conn: ConnId) {
        if let Some(player) = self.seats[seat as usize].as_mut() {
            player.conn = Some(conn);
            player.connected = true;
            player.last_seen = Instant::now();
        }
    }

    /// Mark a seat disconnected but keep it occupied for reconnection.
    pub fn mark_disconnected(&mut self, seat: Seat) {
        if let Some(player) = self.seats[seat as usize].as_mut() {
            player.conn = None;
            player.connected = false;
            player.last_seen = Instant::now();
        }
    }

    /// Clear seats disconnected for longer than `timeout`, returning the
    /// evicted (seat, name) pairs.
    pub fn evict_stale(&mut self, timeout: Duration, now: Instant) -> Vec<(Seat, String)> {
        let mut evicted = Vec::new();
        for (i, slot) in self.seats.iter_mut().enumerate() {
            let stale = matches!(
                slot,
                Some(p) if !p.connected && now.duration_since(p.last_seen) >= timeout
            );
            if stale {
                if let Some(p) = slot.take() {
                    evicted.push((i as Seat, p.name));
                }
            }
        }
        evicted
    }

    pub fn public_seats(&self) -> Vec<SeatPublic> {
        self.seats
            .iter()
            .enumerate()
            .map(|(i, slot)| SeatPublic {
                position: i as Seat,
                name: slot.as_ref().map(|p| p.name.clone()),
                team: team_for_seat(i as Seat),
                connected: slot.as_ref().is_some_and(|p| p.connected),
            })
            .collect()
    }

    pub fn snapshot_for(&self, seat: Seat) -> GameSnapshot {
        GameSnapshot::for_seat(&self.game, self.public_seats(), seat)
    }
}
