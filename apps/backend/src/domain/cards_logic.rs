//! Card strength under a trump suit: rank values and pairwise comparison.

use super::cards_types::{Card, Suit};

/// Offset added to a trump card's rank value. Rank values without the offset
/// span 0..=7, so any trump card outranks any non-trump card.
pub const TRUMP_OFFSET: u8 = 10;

/// Strength of a card under the given trump suit. Ties are impossible among
/// comparable cards since a deck holds no duplicates.
pub fn rank_value(card: Card, trump: Suit) -> u8 {
    let base = card.rank as u8;
    if card.suit == trump {
        base + TRUMP_OFFSET
    } else {
        base
    }
}

pub fn hand_has_suit(hand: &[Option<Card>], suit: Suit) -> bool {
    hand.iter().flatten().any(|c| c.suit == suit)
}

/// Whether `a` beats `b` in a trick with the given lead and trump suits.
/// Off-lead, off-trump cards never beat anything.
pub fn card_beats(a: Card, b: Card, lead: Suit, trump: Suit) -> bool {
    let a_trump = a.suit == trump;
    let b_trump = b.suit == trump;
    if a_trump != b_trump {
        return a_trump;
    }
    if a_trump {
        return a.rank > b.rank;
    }
    let a_follows = a.suit == lead;
    let b_follows = b.suit == lead;
    if a_follows != b_follows {
        return a_follows;
    }
    a_follows && a.rank > b.rank
}
