//! In-game player actions: trump selection and card play.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use crate::domain::cards_types::Suit;
use crate::domain::state::{Phase, Seat};
use crate::domain::tricks::PlayCardResult;
use crate::domain::{dealing, scoring, tricks};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::services::game_flow::round_lifecycle::{
    close_finished_room, emit_turn, open_next_trick, schedule_after, start_next_deal,
};
use crate::services::game_flow::{push_to_all, Outbound};
use crate::services::room::Room;
use crate::state::app_state::AppState;
use crate::state::stats::ServerCounters;
use crate::ws::hub::ConnId;
use crate::ws::protocol::ServerMsg;

fn resolve_seated(
    state: &AppState,
    conn: ConnId,
    room_id: &str,
) -> Result<(Arc<Mutex<Room>>, Seat), DomainError> {
    let room_arc = state
        .rooms
        .get(room_id)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Room, "No such room"))?;
    let seat = {
        let room = room_arc.lock();
        room.seat_of_conn(conn).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Seat, "You are not seated in this room")
        })?
    };
    Ok((room_arc, seat))
}

/// Handle the trump choice: only valid in trump selection, only from the
/// designated selector. Completes the deal (4 more to the selector, 8 to
/// everyone else) and opens play with the selector to lead.
pub fn handle_select_trump(
    state: &AppState,
    conn: ConnId,
    room_id: &str,
    trump: Suit,
) -> Result<Vec<Outbound>, DomainError> {
    let (room_arc, seat) = resolve_seated(state, conn, room_id)?;
    let mut room = room_arc.lock();
    room.touch();

    match room.game.phase {
        Phase::TrumpSelection => {}
        Phase::Paused { .. } => {
            return Err(DomainError::validation(
                ValidationKind::GamePaused,
                "Game is paused until all players reconnect",
            ))
        }
        _ => {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Trump selection is not open",
            ))
        }
    }
    if seat != room.game.trump_selector {
        let selector = room.name_at(room.game.trump_selector);
        return Err(DomainError::validation(
            ValidationKind::NotTrumpSelector,
            format!("Waiting for {selector} to select trump"),
        ));
    }

    room.game.trump = Some(trump);
    dealing::complete_deal(&mut room.game)?;
    room.game.phase = Phase::Playing;
    room.game.current_seat = room.game.trump_selector;
    info!(room_id, seat, trump = %trump, "trump selected");

    let mut out = Vec::new();
    push_to_all(
        &mut out,
        &room.connected_conns(),
        &ServerMsg::TrumpSelected {
            trump,
            position: seat,
            name: room.name_at(seat),
        },
    );
    for position in 0..room.game.hands.len() as Seat {
        if let Some(conn) = room.conn_at(position) {
            out.push(Outbound::new(
                conn,
                ServerMsg::FullHand {
                    hand: room.game.hands[position as usize].clone(),
                    position,
                    trump,
                },
            ));
        }
    }
    emit_turn(&room, &mut out);
    Ok(out)
}

/// Handle a card play. On the fourth card the trick resolves and the next
/// trick (or the scoring of the deal) follows after a paced delay.
pub fn handle_play_card(
    state: &Arc<AppState>,
    conn: ConnId,
    room_id: &str,
    card_index: usize,
) -> Result<Vec<Outbound>, DomainError> {
    let (room_arc, seat) = resolve_seated(state, conn, room_id)?;
    let mut room = room_arc.lock();
    room.touch();

    let result = tricks::play_card(&mut room.game, seat, card_index)?;

    let mut out = Vec::new();
    push_to_all(
        &mut out,
        &room.connected_conns(),
        &ServerMsg::CardPlayed {
            position: seat,
            name: room.name_at(seat),
            card: result.card,
        },
    );

    if !result.trick_completed {
        emit_turn(&room, &mut out);
        return Ok(out);
    }
    finish_trick(state, &mut room, room_id, &result, &mut out)?;
    Ok(out)
}

fn finish_trick(
    state: &Arc<AppState>,
    room: &mut Room,
    room_id: &str,
    result: &PlayCardResult,
    out: &mut Vec<Outbound>,
) -> Result<(), DomainError> {
    let winner = result.trick_winner.ok_or_else(|| {
        DomainError::validation_other("Invariant violated: completed trick must have a winner")
    })?;
    push_to_all(
        out,
        &room.connected_conns(),
        &ServerMsg::TrickComplete {
            winner_position: winner,
            winner_name: room.name_at(winner),
            tricks_won: room.game.tricks_won,
            scores: room.game.scores,
        },
    );

    if !result.deal_completed {
        // The winner's turn prompt is deferred so clients can show the
        // completed trick before it clears.
        schedule_after(
            state,
            state.config.next_trick_delay,
            room_id,
            open_next_trick,
        );
        return Ok(());
    }

    let outcome = scoring::score_round(&room.game.tricks_won, room.game.trump_selector)?;
    scoring::apply_round(&mut room.game, &outcome);
    info!(
        room_id,
        points = outcome.points,
        winner = ?outcome.winning_team,
        "deal complete"
    );
    push_to_all(
        out,
        &room.connected_conns(),
        &ServerMsg::RoundComplete {
            result: outcome,
            scores: room.game.scores,
        },
    );

    if let Some(winner_team) =
        scoring::match_winner(room.game.scores, &outcome, state.config.target_score)
    {
        room.game.phase = Phase::Completed;
        room.game.trump = None;
        ServerCounters::incr(&state.stats.games_completed);
        info!(room_id, winner = %winner_team, "match complete");
        push_to_all(
            out,
            &room.connected_conns(),
            &ServerMsg::GameOver {
                winner: winner_team,
                final_scores: room.game.scores,
            },
        );
        schedule_after(
            state,
            state.config.room_close_delay,
            room_id,
            close_finished_room,
        );
    } else {
        scoring::advance_to_next_deal(&mut room.game);
        schedule_after(state, state.config.next_deal_delay, room_id, start_next_deal);
    }
    Ok(())
}
