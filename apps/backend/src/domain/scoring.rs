//! Round scoring and match progression.
//!
//! Omi awards: strict majority of the eight tricks wins the deal for one
//! point; the defending team (the one that did not choose trump) sweeping
//! all eight earns two; a 4-4 split awards nothing. Scores accumulate until
//! a team reaches the match target.

use serde::Serialize;

use crate::domain::rules::{PLAYERS, TRICKS_PER_DEAL};
use crate::domain::state::{next_seat, team_for_seat, GameState, Phase, Seat, Team, TeamScores};
use crate::errors::domain::DomainError;

/// Tricks taken by each team in a completed deal.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct TeamTricks {
    pub team_a: u8,
    pub team_b: u8,
}

impl TeamTricks {
    pub fn get(self, team: Team) -> u8 {
        match team {
            Team::A => self.team_a,
            Team::B => self.team_b,
        }
    }
}

/// Outcome of one completed deal.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct RoundOutcome {
    /// Team of the trump selector.
    pub trump_team: Team,
    /// Majority winner, or None on a 4-4 split.
    pub winning_team: Option<Team>,
    /// Points awarded to the winning team (0, 1, or 2).
    pub points: u8,
    pub team_tricks: TeamTricks,
}

/// Score a completed deal from the per-seat trick tally.
pub fn score_round(
    tricks_won: &[u8; PLAYERS],
    trump_selector: Seat,
) -> Result<RoundOutcome, DomainError> {
    let total: u8 = tricks_won.iter().sum();
    if total != TRICKS_PER_DEAL {
        return Err(DomainError::validation_other(format!(
            "Invariant violated: a deal scores at exactly {TRICKS_PER_DEAL} tricks, got {total}"
        )));
    }

    let team_tricks = TeamTricks {
        team_a: tricks_won[0] + tricks_won[2],
        team_b: tricks_won[1] + tricks_won[3],
    };
    let trump_team = team_for_seat(trump_selector);
    let defending_team = trump_team.other();

    let winning_team = if team_tricks.team_a > TRICKS_PER_DEAL / 2 {
        Some(Team::A)
    } else if team_tricks.team_b > TRICKS_PER_DEAL / 2 {
        Some(Team::B)
    } else {
        None
    };

    let points = match winning_team {
        None => 0,
        Some(team) if team == defending_team && team_tricks.get(team) == TRICKS_PER_DEAL => 2,
        Some(_) => 1,
    };

    Ok(RoundOutcome {
        trump_team,
        winning_team,
        points,
        team_tricks,
    })
}

/// Apply a deal's points to the accumulated match scores.
pub fn apply_round(state: &mut GameState, outcome: &RoundOutcome) {
    if let Some(team) = outcome.winning_team {
        state.scores.add(team, outcome.points);
    }
}

/// Whether the deal that produced `outcome` ended the match.
///
/// Only one team can score in a given deal, so the match winner is the team
/// whose deal-ending score reached the target in that deal; no later score
/// comparison is consulted.
pub fn match_winner(scores: TeamScores, outcome: &RoundOutcome, target: u8) -> Option<Team> {
    outcome.winning_team.filter(|&team| scores.get(team) >= target)
}

/// Rotate into the next deal: per-deal state clears, trump selection passes
/// to the next seat clockwise, and that seat is first to act.
pub fn advance_to_next_deal(state: &mut GameState) {
    state.reset_deal();
    state.trump_selector = next_seat(state.trump_selector);
    state.current_seat = state.trump_selector;
    state.phase = Phase::TrumpSelection;
}
