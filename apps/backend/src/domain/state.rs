//! Game phase machine, seat math, and the pure per-room game state.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{Card, Suit};
use crate::domain::rules::{PLAYERS, TRICKS_PER_DEAL};

/// Seat index, 0..=3. Turn order is clockwise by increasing index.
pub type Seat = u8;

/// A hand is a fixed sequence of card slots; a played card leaves a `None`
/// in its slot so indices stay stable for the life of a deal (clients
/// address cards by slot index).
pub type Hand = Vec<Option<Card>>;

/// Returns the next seat clockwise (0 → 1 → 2 → 3 → 0).
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    (seat + 1) % PLAYERS as Seat
}

/// Team is a pure function of seat index: seats {0,2} are Team A,
/// seats {1,3} are Team B. It is never stored.
#[inline]
pub fn team_for_seat(seat: Seat) -> Team {
    if seat % 2 == 0 {
        Team::A
    } else {
        Team::B
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn other(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}

impl Display for Team {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Team::A => write!(f, "Team A"),
            Team::B => write!(f, "Team B"),
        }
    }
}

/// Accumulated match scores per team; non-decreasing across deals.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize)]
pub struct TeamScores {
    pub team_a: u8,
    pub team_b: u8,
}

impl TeamScores {
    pub fn get(self, team: Team) -> u8 {
        match team {
            Team::A => self.team_a,
            Team::B => self.team_b,
        }
    }

    pub fn add(&mut self, team: Team, points: u8) {
        match team {
            Team::A => self.team_a += points,
            Team::B => self.team_b += points,
        }
    }
}

/// One card played into the current trick.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct TrickPlay {
    pub seat: Seat,
    pub card: Card,
}

/// The phase a paused room will return to once all four seats reconnect.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterruptedPhase {
    TrumpSelection,
    Playing,
}

/// Room phase machine.
///
/// `Paused` is an overlay entered from `TrumpSelection` or `Playing`
/// whenever fewer than four seats are connected, and exited back to the
/// interrupted phase only when all four are simultaneously connected again.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Waiting,
    TrumpSelection,
    Playing,
    Paused { interrupted: InterruptedPhase },
    Completed,
}

impl Phase {
    /// True for the phases a disconnection must pause.
    pub fn pausable(self) -> Option<InterruptedPhase> {
        match self {
            Phase::TrumpSelection => Some(InterruptedPhase::TrumpSelection),
            Phase::Playing => Some(InterruptedPhase::Playing),
            _ => None,
        }
    }
}

impl From<InterruptedPhase> for Phase {
    fn from(interrupted: InterruptedPhase) -> Self {
        match interrupted {
            InterruptedPhase::TrumpSelection => Phase::TrumpSelection,
            InterruptedPhase::Playing => Phase::Playing,
        }
    }
}

/// Pure game state of one room, sufficient for all domain operations.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub phase: Phase,
    /// Remaining undealt cards of the current deal.
    pub deck: Vec<Card>,
    /// Set exactly while a deal is being played (or paused from playing).
    pub trump: Option<Suit>,
    /// Seat that chooses trump this deal; fixes which team is defending.
    pub trump_selector: Seat,
    /// Seat expected to act next (play a card, or select trump).
    pub current_seat: Seat,
    pub hands: [Hand; PLAYERS],
    pub current_trick: Vec<TrickPlay>,
    pub tricks_won: [u8; PLAYERS],
    pub scores: TeamScores,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Waiting,
            deck: Vec::new(),
            trump: None,
            trump_selector: 0,
            current_seat: 0,
            hands: [Vec::new(), Vec::new(), Vec::new(), Vec::new()],
            current_trick: Vec::with_capacity(PLAYERS),
            tricks_won: [0; PLAYERS],
            scores: TeamScores::default(),
        }
    }

    pub fn tricks_total(&self) -> u8 {
        self.tricks_won.iter().sum()
    }

    /// A deal is complete exactly when all eight tricks are resolved.
    pub fn deal_complete(&self) -> bool {
        self.tricks_total() == TRICKS_PER_DEAL
    }

    /// Clears all per-deal state (hands, deck, trick, tally, trump).
    /// Phase, selector, and scores are left for the caller to steer.
    pub fn reset_deal(&mut self) {
        self.deck.clear();
        self.trump = None;
        for hand in &mut self.hands {
            hand.clear();
        }
        self.current_trick.clear();
        self.tricks_won = [0; PLAYERS];
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
