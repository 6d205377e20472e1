//! Wire protocol: inbound intents and outbound notifications.
//!
//! Both directions are internally tagged JSON (`"type"` discriminator).
//! Cards travel as compact tokens ("AS", "7H"), suits as SCREAMING tokens.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{Card, Suit};
use crate::domain::rules::PLAYERS;
use crate::domain::scoring::RoundOutcome;
use crate::domain::snapshot::{GameSnapshot, SeatPublic};
use crate::domain::state::{Hand, Seat, Team, TeamScores};
use crate::state::stats::StatsSnapshot;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    JoinRoom {
        room_id: String,
        name: String,
        team: Team,
        #[serde(default)]
        is_reconnect: bool,
    },
    SelectTrump {
        room_id: String,
        trump: Suit,
    },
    PlayCard {
        room_id: String,
        card_index: usize,
    },
    GetServerStats,
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    PlayerJoined {
        position: Seat,
        name: String,
        team: Team,
        player_count: u8,
    },
    /// Full per-seat state, sent to a reconnecting (or late-joining)
    /// connection.
    GameInProgress {
        snapshot: GameSnapshot,
    },
    PlayerRejoined {
        position: Seat,
        name: String,
    },
    /// Sent to the trump selector with their four-card selection hand.
    CanSelectTrump {
        hand: Vec<Card>,
    },
    WaitingForTrump {
        position: Seat,
        name: String,
    },
    TrumpSelected {
        trump: Suit,
        position: Seat,
        name: String,
    },
    /// A seat's complete dealt hand for the new deal.
    FullHand {
        hand: Hand,
        position: Seat,
        trump: Suit,
    },
    YourTurn {
        legal_indices: Vec<usize>,
    },
    TurnUpdate {
        position: Seat,
        name: String,
    },
    CardPlayed {
        position: Seat,
        name: String,
        card: Card,
    },
    TrickComplete {
        winner_position: Seat,
        winner_name: String,
        tricks_won: [u8; PLAYERS],
        scores: TeamScores,
    },
    RoundComplete {
        result: RoundOutcome,
        scores: TeamScores,
    },
    GameOver {
        winner: Team,
        final_scores: TeamScores,
    },
    PlayerLeft {
        position: Seat,
        name: String,
    },
    /// The game paused because a seat disconnected mid-deal.
    GameInterrupted {
        position: Seat,
        name: String,
    },
    GameResumed,
    /// Roster after stale disconnected seats were evicted.
    RoomCleaned {
        players: Vec<SeatPublic>,
    },
    RoomClosed,
    ServerShutdown,
    Error {
        message: String,
    },
    ServerStats {
        stats: StatsSnapshot,
    },
}
