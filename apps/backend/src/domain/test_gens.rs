// Proptest generators for domain types. Hands are generated as unique card
// sets drawn from the 32-card deck, optionally with played-out (None) slots.

use proptest::prelude::*;
use rand::Rng;

use crate::domain::cards_types::{Card, Rank, Suit, RANKS, SUITS};
use crate::domain::dealing::build_deck;
use crate::domain::state::Seat;

pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Clubs),
        Just(Suit::Diamonds),
        Just(Suit::Hearts),
        Just(Suit::Spades),
    ]
}

pub fn rank() -> impl Strategy<Value = Rank> {
    proptest::sample::select(RANKS.to_vec())
}

pub fn card() -> impl Strategy<Value = Card> {
    (suit(), rank()).prop_map(|(suit, rank)| Card { suit, rank })
}

pub fn seat() -> impl Strategy<Value = Seat> {
    0u8..=3u8
}

/// A shuffled subset of `count` unique cards from the full deck.
pub fn unique_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    Just(()).prop_perturb(move |_, mut rng| {
        let mut deck = build_deck();
        for i in 0..count.min(deck.len()) {
            let j = rng.random_range(i..deck.len());
            deck.swap(i, j);
        }
        deck.truncate(count);
        deck
    })
}

pub fn unique_cards_up_to(max_count: usize) -> impl Strategy<Value = Vec<Card>> {
    (1..=max_count).prop_flat_map(unique_cards)
}

/// A hand of 1..=8 unique cards, every slot still unplayed.
pub fn hand() -> impl Strategy<Value = Vec<Option<Card>>> {
    unique_cards_up_to(8).prop_map(|cards| cards.into_iter().map(Some).collect())
}

/// A hand with 1..=8 unique cards and randomly interspersed played-out slots.
pub fn hand_with_gaps() -> impl Strategy<Value = Vec<Option<Card>>> {
    (unique_cards_up_to(8), proptest::collection::vec(any::<bool>(), 0..=4)).prop_map(
        |(cards, gaps)| {
            let mut hand: Vec<Option<Card>> = cards.into_iter().map(Some).collect();
            for (i, gap) in gaps.into_iter().enumerate() {
                if gap {
                    hand.insert(i.min(hand.len()), None);
                }
            }
            hand
        },
    )
}

/// A hand containing no cards of the given suit.
pub fn hand_without_suit(excluded: Suit) -> impl Strategy<Value = Vec<Option<Card>>> {
    Just(()).prop_perturb(move |_, mut rng| {
        let mut cards: Vec<Card> = Vec::new();
        for suit in SUITS.into_iter().filter(|&s| s != excluded) {
            for rank in RANKS {
                cards.push(Card { suit, rank });
            }
        }
        let count = rng.random_range(1..=8usize);
        for i in 0..count {
            let j = rng.random_range(i..cards.len());
            cards.swap(i, j);
        }
        cards.truncate(count);
        cards.into_iter().map(Some).collect()
    })
}
