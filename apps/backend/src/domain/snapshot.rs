//! Viewer-scoped game snapshot, delivered on reconnection (and to late
//! joiners of an in-progress room) so a client can render the whole table.

use serde::Serialize;

use crate::domain::cards_types::Suit;
use crate::domain::rules::PLAYERS;
use crate::domain::state::{Hand, Phase, Seat, Team, TeamScores, TrickPlay};
use crate::domain::tricks::{lead_suit, legal_play_indices};

/// Public information about one seat.
#[derive(Debug, Clone, Serialize)]
pub struct SeatPublic {
    pub position: Seat,
    /// None while the seat has never been occupied.
    pub name: Option<String>,
    pub team: Team,
    pub connected: bool,
}

/// Everything one seat is owed about the current game.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub trump: Option<Suit>,
    pub trump_selector: Seat,
    pub position: Seat,
    pub team: Team,
    /// Own hand with stable slot indices; played cards are null.
    pub hand: Hand,
    pub your_turn: bool,
    /// Legal slot indices, non-empty only when it is this seat's turn to
    /// play a card.
    pub legal_indices: Vec<usize>,
    pub current_trick: Vec<TrickPlay>,
    pub scores: TeamScores,
    pub tricks_won: [u8; PLAYERS],
    pub seats: Vec<SeatPublic>,
}

impl GameSnapshot {
    pub fn for_seat(
        game: &crate::domain::state::GameState,
        seats: Vec<SeatPublic>,
        position: Seat,
    ) -> Self {
        let your_turn = match game.phase {
            Phase::TrumpSelection => position == game.trump_selector,
            Phase::Playing => position == game.current_seat,
            _ => false,
        };
        let hand = game.hands[position as usize].clone();
        let legal_indices = if your_turn && game.phase == Phase::Playing {
            legal_play_indices(&hand, lead_suit(&game.current_trick))
        } else {
            Vec::new()
        };

        Self {
            phase: game.phase,
            trump: game.trump,
            trump_selector: game.trump_selector,
            position,
            team: crate::domain::state::team_for_seat(position),
            hand,
            your_turn,
            legal_indices,
            current_trick: game.current_trick.clone(),
            scores: game.scores,
            tricks_won: game.tricks_won,
            seats,
        }
    }
}
