//! Deck construction and the two-phase Omi deal.
//!
//! Each deal shuffles a fresh 32-card deck and hands the trump selector four
//! cards; the other four selector cards and the remaining three hands are
//! dealt only after trump is chosen, so trump is picked seeing only half of
//! one's own hand.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::cards_types::{Card, RANKS, SUITS};
use crate::domain::rules::{DECK_SIZE, HAND_SIZE, SELECTION_HAND_SIZE};
use crate::domain::state::{GameState, Phase};
use crate::errors::domain::DomainError;

/// The full 32-card deck in stable order.
pub fn build_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in SUITS {
        for rank in RANKS {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// A freshly shuffled deck (uniform Fisher-Yates via `SliceRandom`).
pub fn shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut deck = build_deck();
    deck.shuffle(rng);
    deck
}

fn draw_sorted(deck: &mut Vec<Card>, n: usize) -> Vec<Card> {
    let mut drawn: Vec<Card> = deck.drain(..n).collect();
    drawn.sort();
    drawn
}

/// Start a deal from a full shuffled deck: the trump selector receives
/// `SELECTION_HAND_SIZE` cards, every other hand is emptied, the trick and
/// tally reset, and the room enters trump selection with the selector to act.
pub fn begin_selection_deal(state: &mut GameState, deck: Vec<Card>) -> Result<(), DomainError> {
    if deck.len() != DECK_SIZE {
        return Err(DomainError::validation_other(format!(
            "Invariant violated: selection deal requires a full deck, got {}",
            deck.len()
        )));
    }

    state.deck = deck;
    state.trump = None;
    state.current_trick.clear();
    state.tricks_won = [0; crate::domain::rules::PLAYERS];
    for hand in &mut state.hands {
        hand.clear();
    }

    let selector = state.trump_selector as usize;
    let cards = draw_sorted(&mut state.deck, SELECTION_HAND_SIZE);
    state.hands[selector] = cards.into_iter().map(Some).collect();

    state.phase = Phase::TrumpSelection;
    state.current_seat = state.trump_selector;
    Ok(())
}

/// Finish the deal once trump is chosen: the selector's remaining four cards
/// are appended (slots 0..=3 already shown to them keep their indices) and
/// every other seat receives a full eight-card hand from the remainder.
pub fn complete_deal(state: &mut GameState) -> Result<(), DomainError> {
    if state.trump.is_none() {
        return Err(DomainError::validation_other(
            "Invariant violated: cannot complete a deal before trump is chosen",
        ));
    }
    let selector = state.trump_selector as usize;
    if state.hands[selector].len() != SELECTION_HAND_SIZE {
        return Err(DomainError::validation_other(
            "Invariant violated: selector must hold exactly the selection hand",
        ));
    }
    if state.deck.len() != DECK_SIZE - SELECTION_HAND_SIZE {
        return Err(DomainError::validation_other(
            "Invariant violated: deck must hold the undealt remainder",
        ));
    }

    let rest = draw_sorted(&mut state.deck, HAND_SIZE - SELECTION_HAND_SIZE);
    state.hands[selector].extend(rest.into_iter().map(Some));

    for seat in 0..state.hands.len() {
        if seat == selector {
            continue;
        }
        let cards = draw_sorted(&mut state.deck, HAND_SIZE);
        state.hands[seat] = cards.into_iter().map(Some).collect();
    }

    debug_assert!(state.deck.is_empty());
    Ok(())
}
