use crate::domain::scoring::{
    advance_to_next_deal, apply_round, match_winner, score_round,
};
use crate::domain::state::{GameState, Phase, Team, TeamScores};

#[test]
fn majority_win_awards_one_point() {
    // Selector seat 0 (Team A); A takes 5 tricks.
    let outcome = score_round(&[3, 1, 2, 2], 0).unwrap();
    assert_eq!(outcome.trump_team, Team::A);
    assert_eq!(outcome.winning_team, Some(Team::A));
    assert_eq!(outcome.points, 1);
    assert_eq!(outcome.team_tricks.team_a, 5);
    assert_eq!(outcome.team_tricks.team_b, 3);
}

#[test]
fn defending_sweep_awards_two_points() {
    // Selector seat 1 (Team B), so Team A defends; A sweeps 8-0.
    let outcome = score_round(&[5, 0, 3, 0], 1).unwrap();
    assert_eq!(outcome.trump_team, Team::B);
    assert_eq!(outcome.winning_team, Some(Team::A));
    assert_eq!(outcome.points, 2);
}

#[test]
fn trump_team_sweep_is_worth_only_one() {
    // Selector seat 0 (Team A); A sweeps, but it chose trump.
    let outcome = score_round(&[4, 0, 4, 0], 0).unwrap();
    assert_eq!(outcome.winning_team, Some(Team::A));
    assert_eq!(outcome.points, 1);
}

#[test]
fn four_four_split_awards_nothing() {
    let outcome = score_round(&[2, 2, 2, 2], 3).unwrap();
    assert_eq!(outcome.winning_team, None);
    assert_eq!(outcome.points, 0);

    let mut state = GameState::new();
    apply_round(&mut state, &outcome);
    assert_eq!(state.scores, TeamScores::default());
}

#[test]
fn score_round_rejects_incomplete_deals() {
    assert!(score_round(&[2, 2, 2, 1], 0).is_err());
    assert!(score_round(&[4, 4, 1, 0], 0).is_err());
}

#[test]
fn match_ends_only_when_the_scoring_team_reaches_target() {
    let outcome = score_round(&[3, 1, 2, 2], 0).unwrap();

    let scores = TeamScores {
        team_a: 9,
        team_b: 9,
    };
    assert_eq!(match_winner(scores, &outcome, 10), None);

    let scores = TeamScores {
        team_a: 10,
        team_b: 9,
    };
    assert_eq!(match_winner(scores, &outcome, 10), Some(Team::A));

    // The non-scoring team's total is never consulted.
    let scores = TeamScores {
        team_a: 9,
        team_b: 10,
    };
    assert_eq!(match_winner(scores, &outcome, 10), None);
}

#[test]
fn advance_rotates_selector_and_resets_the_deal() {
    let mut state = GameState::new();
    state.phase = Phase::Playing;
    state.trump = Some(crate::domain::cards_types::Suit::Hearts);
    state.trump_selector = 3;
    state.tricks_won = [2, 3, 1, 2];
    state.scores = TeamScores {
        team_a: 3,
        team_b: 5,
    };

    advance_to_next_deal(&mut state);

    assert_eq!(state.phase, Phase::TrumpSelection);
    assert_eq!(state.trump_selector, 0);
    assert_eq!(state.current_seat, 0);
    assert_eq!(state.trump, None);
    assert_eq!(state.tricks_won, [0; 4]);
    // Scores survive the rotation.
    assert_eq!(state.scores.team_a, 3);
    assert_eq!(state.scores.team_b, 5);
}

/// Four deals: Team A wins three by majority, then an 8-0 sweep while
/// defending. Final score 5, match still open at a target of 10.
#[test]
fn four_deal_sequence_accumulates_to_five() {
    let mut state = GameState::new();

    for _ in 0..3 {
        // Selector on Team A each time; plain majority, 1 point.
        let outcome = score_round(&[3, 1, 2, 2], state.trump_selector).unwrap();
        assert_eq!(outcome.winning_team, Some(Team::A));
        apply_round(&mut state, &outcome);
        assert_eq!(match_winner(state.scores, &outcome, 10), None);
        advance_to_next_deal(&mut state);
        advance_to_next_deal(&mut state); // skip Team B seats to keep A selecting
    }
    assert_eq!(state.scores.team_a, 3);

    // Deal 4: Team B selects trump, Team A defends and sweeps.
    state.trump_selector = 1;
    let outcome = score_round(&[4, 0, 4, 0], state.trump_selector).unwrap();
    assert_eq!(outcome.points, 2);
    apply_round(&mut state, &outcome);

    assert_eq!(state.scores.team_a, 5);
    assert_eq!(state.scores.team_b, 0);
    assert_eq!(match_winner(state.scores, &outcome, 10), None);

    advance_to_next_deal(&mut state);
    assert_eq!(state.phase, Phase::TrumpSelection);
}
