use crate::domain::cards_types::{Card, Suit};
use crate::domain::state::{GameState, InterruptedPhase, Phase, Seat, TrickPlay};
use crate::domain::tricks::{lead_suit, legal_play_indices, play_card, resolve_trick};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

fn card(tok: &str) -> Card {
    tok.parse().unwrap()
}

fn hand(toks: &[&str]) -> Vec<Option<Card>> {
    toks.iter().map(|t| Some(card(t))).collect()
}

fn trick(plays: &[(Seat, &str)]) -> Vec<TrickPlay> {
    plays
        .iter()
        .map(|&(seat, tok)| TrickPlay {
            seat,
            card: card(tok),
        })
        .collect()
}

/// A playing-phase state where seat 0 leads with the given hands.
fn playing_state(hands: [&[&str]; 4], trump: Suit) -> GameState {
    let mut state = GameState::new();
    state.phase = Phase::Playing;
    state.trump = Some(trump);
    state.trump_selector = 0;
    state.current_seat = 0;
    for (i, toks) in hands.iter().enumerate() {
        state.hands[i] = hand(toks);
    }
    state
}

#[test]
fn leading_allows_every_remaining_card() {
    let h = hand(&["7H", "AS", "TD"]);
    assert_eq!(legal_play_indices(&h, None), vec![0, 1, 2]);
}

#[test]
fn must_follow_lead_suit_when_held() {
    let h = hand(&["7H", "AS", "TH", "9C"]);
    assert_eq!(legal_play_indices(&h, Some(Suit::Hearts)), vec![0, 2]);
}

#[test]
fn void_in_lead_suit_frees_the_hand() {
    let h = hand(&["7H", "AS", "9C"]);
    assert_eq!(legal_play_indices(&h, Some(Suit::Diamonds)), vec![0, 1, 2]);
}

#[test]
fn played_slots_are_never_legal() {
    let mut h = hand(&["7H", "AH", "9H"]);
    h[1] = None;
    assert_eq!(legal_play_indices(&h, Some(Suit::Hearts)), vec![0, 2]);
}

#[test]
fn trump_may_not_be_substituted_while_lead_is_held() {
    // Spades trump, hearts led, hand holds both: only hearts are legal.
    let h = hand(&["AS", "7H"]);
    assert_eq!(legal_play_indices(&h, Some(Suit::Hearts)), vec![1]);
}

#[test]
fn highest_lead_card_wins_without_trump() {
    let t = trick(&[(0, "9H"), (1, "AH"), (2, "7D"), (3, "KH")]);
    assert_eq!(resolve_trick(&t, Suit::Clubs).unwrap(), 1);
}

#[test]
fn lowest_trump_beats_highest_lead() {
    let t = trick(&[(2, "AH"), (3, "7S"), (0, "KH"), (1, "QH")]);
    assert_eq!(resolve_trick(&t, Suit::Spades).unwrap(), 3);
}

#[test]
fn highest_trump_wins_among_several() {
    let t = trick(&[(0, "9S"), (1, "AH"), (2, "JS"), (3, "7S")]);
    assert_eq!(resolve_trick(&t, Suit::Spades).unwrap(), 2);
}

#[test]
fn resolve_requires_four_cards() {
    let t = trick(&[(0, "9S"), (1, "AH")]);
    assert!(resolve_trick(&t, Suit::Spades).is_err());
}

#[test]
fn play_card_enforces_turn_order() {
    let mut state = playing_state([&["7H"], &["8H"], &["9H"], &["TH"]], Suit::Spades);
    let err = play_card(&mut state, 2, 0).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation {
            kind: ValidationKind::OutOfTurn,
            ..
        }
    ));
    // The illegal attempt left nothing behind.
    assert!(state.current_trick.is_empty());
    assert_eq!(state.hands[2][0], Some(card("9H")));
}

#[test]
fn play_card_rejects_empty_slot_and_bad_index() {
    let mut state = playing_state([&["7H", "8H"], &[], &[], &[]], Suit::Spades);
    state.hands[0][1] = None;
    for idx in [1usize, 5] {
        let err = play_card(&mut state, 0, idx).unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound {
                kind: NotFoundKind::Card,
                ..
            }
        ));
    }
}

#[test]
fn play_card_names_the_required_suit() {
    let mut state = playing_state(
        [&["7H", "AS"], &["8H", "KD"], &["9H"], &["TH"]],
        Suit::Spades,
    );
    play_card(&mut state, 0, 0).unwrap();
    // Seat 1 holds hearts but tries the diamond.
    let err = play_card(&mut state, 1, 1).unwrap_err();
    assert_eq!(err.to_string(), "Must follow Hearts");
}

#[test]
fn play_card_rejected_while_paused() {
    let mut state = playing_state([&["7H"], &["8H"], &["9H"], &["TH"]], Suit::Spades);
    state.phase = Phase::Paused {
        interrupted: InterruptedPhase::Playing,
    };
    let err = play_card(&mut state, 0, 0).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation {
            kind: ValidationKind::GamePaused,
            ..
        }
    ));
}

#[test]
fn full_trick_resolves_and_winner_leads_next() {
    let mut state = playing_state(
        [&["7H", "7C"], &["AH", "8C"], &["9H", "9C"], &["TH", "TC"]],
        Suit::Spades,
    );

    for seat in 0..3u8 {
        let res = play_card(&mut state, seat, 0).unwrap();
        assert!(!res.trick_completed);
        assert_eq!(state.current_seat, seat + 1);
    }
    let res = play_card(&mut state, 3, 0).unwrap();
    assert!(res.trick_completed);
    assert_eq!(res.trick_winner, Some(1));
    assert!(!res.deal_completed);

    // Trick cleared, tally updated, winner to lead, slots nulled.
    assert!(state.current_trick.is_empty());
    assert_eq!(state.tricks_won, [0, 1, 0, 0]);
    assert_eq!(state.current_seat, 1);
    assert_eq!(lead_suit(&state.current_trick), None);
    for seat in 0..4 {
        assert_eq!(state.hands[seat][0], None);
        assert!(state.hands[seat][1].is_some());
    }
}

#[test]
fn deal_completes_on_the_eighth_trick() {
    let mut state = playing_state([&["7H"], &["8H"], &["9H"], &["AH"]], Suit::Spades);
    state.tricks_won = [3, 2, 2, 0];
    for seat in 0..4u8 {
        let res = play_card(&mut state, seat, 0).unwrap();
        if seat == 3 {
            assert!(res.trick_completed);
            assert_eq!(res.trick_winner, Some(3));
            assert!(res.deal_completed);
        }
    }
    assert_eq!(state.tricks_total(), 8);
}
