// Property-based tests for trick resolution and rank values.

use proptest::prelude::*;

use crate::domain::cards_logic::rank_value;
use crate::domain::state::TrickPlay;
use crate::domain::test_gens;
use crate::domain::tricks::resolve_trick;

fn trick_from(cards: Vec<crate::domain::cards_types::Card>) -> Vec<TrickPlay> {
    cards
        .into_iter()
        .enumerate()
        .map(|(i, card)| TrickPlay {
            seat: i as u8,
            card,
        })
        .collect()
}

proptest! {
    /// Any trump in the trick wins it, and specifically the highest trump.
    #[test]
    fn highest_trump_always_wins(
        cards in test_gens::unique_cards(4),
        trump in test_gens::suit(),
    ) {
        let trick = trick_from(cards);
        let winner = resolve_trick(&trick, trump).unwrap();
        let winning = trick.iter().find(|p| p.seat == winner).unwrap();

        let trumps: Vec<&TrickPlay> =
            trick.iter().filter(|p| p.card.suit == trump).collect();
        if !trumps.is_empty() {
            prop_assert_eq!(winning.card.suit, trump);
            for p in trumps {
                prop_assert!(winning.card.rank >= p.card.rank);
            }
        }
    }

    /// Without trump involvement the best lead-suit card wins.
    #[test]
    fn best_lead_card_wins_otherwise(
        cards in test_gens::unique_cards(4),
        trump in test_gens::suit(),
    ) {
        let trick = trick_from(cards);
        prop_assume!(trick.iter().all(|p| p.card.suit != trump));

        let lead = trick[0].card.suit;
        let winner = resolve_trick(&trick, trump).unwrap();
        let winning = trick.iter().find(|p| p.seat == winner).unwrap();

        prop_assert_eq!(winning.card.suit, lead);
        for p in trick.iter().filter(|p| p.card.suit == lead) {
            prop_assert!(winning.card.rank >= p.card.rank);
        }
    }

    /// The trump offset totally orders trump above every non-trump card.
    #[test]
    fn trump_offset_orders_suits(
        (a, b) in test_gens::unique_cards(2).prop_map(|c| (c[0], c[1])),
        trump in test_gens::suit(),
    ) {
        if a.suit == trump && b.suit != trump {
            prop_assert!(rank_value(a, trump) > rank_value(b, trump));
        }
        if a.suit == b.suit {
            prop_assert_eq!(
                rank_value(a, trump) > rank_value(b, trump),
                a.rank > b.rank
            );
        }
    }
}
