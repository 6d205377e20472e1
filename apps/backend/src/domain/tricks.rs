//! Trick play: follow-suit legality, turn enforcement, and trick resolution.

use crate::domain::cards_logic::{card_beats, hand_has_suit};
use crate::domain::cards_types::{Card, Suit};
use crate::domain::rules::PLAYERS;
use crate::domain::state::{next_seat, GameState, Phase, Seat, TrickPlay};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardResult {
    /// The card that was played (looked up from the slot index).
    pub card: Card,
    /// Whether this play completed a trick (4 cards down).
    pub trick_completed: bool,
    /// Winner of the completed trick, if one was completed.
    pub trick_winner: Option<Seat>,
    /// Whether this play completed the deal (all 8 tricks resolved).
    pub deal_completed: bool,
}

/// Lead suit of a trick: the suit of its first card. Derived, never stored.
pub fn lead_suit(trick: &[TrickPlay]) -> Option<Suit> {
    trick.first().map(|p| p.card.suit)
}

/// Hand-slot indices that are legal to play against the given lead.
///
/// Leading (no lead suit) makes every remaining card legal. Against a lead,
/// a hand holding the lead suit may play only those cards (trump may not be
/// substituted); a hand void in the lead suit may play anything, including
/// cutting with trump.
pub fn legal_play_indices(hand: &[Option<Card>], lead: Option<Suit>) -> Vec<usize> {
    let follows_lead: Option<Suit> = lead.filter(|&suit| hand_has_suit(hand, suit));
    hand.iter()
        .enumerate()
        .filter_map(|(idx, slot)| {
            let card = (*slot)?;
            match follows_lead {
                Some(suit) if card.suit != suit => None,
                _ => Some(idx),
            }
        })
        .collect()
}

/// Whether the card at `card_index` may be played against the given lead.
pub fn is_legal_play(hand: &[Option<Card>], card_index: usize, lead: Option<Suit>) -> bool {
    legal_play_indices(hand, lead).contains(&card_index)
}

/// Winner of a complete 4-card trick. Any trump present wins over everything
/// else; otherwise the highest lead-suit card takes it.
pub fn resolve_trick(trick: &[TrickPlay], trump: Suit) -> Result<Seat, DomainError> {
    if trick.len() != PLAYERS {
        return Err(DomainError::validation_other(
            "Invariant violated: trick must hold exactly four cards to resolve",
        ));
    }
    let lead = trick[0].card.suit;
    let mut best = &trick[0];
    for play in &trick[1..] {
        if card_beats(play.card, best.card, lead, trump) {
            best = play;
        }
    }
    Ok(best.seat)
}

/// Play the card at `card_index` from `seat`'s hand into the current trick,
/// enforcing phase, turn, and follow-suit rules. On the fourth card the
/// trick resolves: the winner's tally increments, the trick clears, and the
/// winner becomes the seat to lead next.
pub fn play_card(
    state: &mut GameState,
    seat: Seat,
    card_index: usize,
) -> Result<PlayCardResult, DomainError> {
    match state.phase {
        Phase::Playing => {}
        Phase::Paused { .. } => {
            return Err(DomainError::validation(
                ValidationKind::GamePaused,
                "Game is paused until all players reconnect",
            ))
        }
        _ => {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "No trick is in progress",
            ))
        }
    }

    if state.current_seat != seat {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "Not your turn",
        ));
    }

    let trump = state.trump.ok_or_else(|| {
        DomainError::validation_other("Invariant violated: trump must be set while playing")
    })?;

    let hand = &state.hands[seat as usize];
    let Some(card) = hand.get(card_index).copied().flatten() else {
        return Err(DomainError::not_found(
            NotFoundKind::Card,
            "No card at that position",
        ));
    };

    let lead = lead_suit(&state.current_trick);
    if !is_legal_play(hand, card_index, lead) {
        // Reaching here means a lead suit exists and the hand provably
        // holds it, so the message can name the required suit.
        let suit = lead.ok_or_else(|| {
            DomainError::validation_other("Invariant violated: illegal lead with no lead suit")
        })?;
        return Err(DomainError::validation(
            ValidationKind::MustFollowSuit,
            format!("Must follow {suit}"),
        ));
    }

    state.hands[seat as usize][card_index] = None;
    state.current_trick.push(TrickPlay { seat, card });

    if state.current_trick.len() < PLAYERS {
        state.current_seat = next_seat(seat);
        return Ok(PlayCardResult {
            card,
            trick_completed: false,
            trick_winner: None,
            deal_completed: false,
        });
    }

    let winner = resolve_trick(&state.current_trick, trump)?;
    state.tricks_won[winner as usize] += 1;
    state.current_trick.clear();
    state.current_seat = winner;

    Ok(PlayCardResult {
        card,
        trick_completed: true,
        trick_winner: Some(winner),
        deal_completed: state.deal_complete(),
    })
}
