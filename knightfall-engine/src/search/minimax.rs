//! Minimax with Alpha-Beta pruning, with explicit maxing and minning players.
//!
//! White is always the maxing player and Black the minning player, and every
//! score is absolute. Should choose the same move and score as negamax.

use std::cmp;
use std::time::Instant;

use crate::coretypes::{Color, Cp, Move, PlyKind};
use crate::evaluation::evaluate_abs;
use crate::gamestate::GameState;
use crate::search::SearchResult;

const WHITE: u8 = Color::White as u8;
const BLACK: u8 = Color::Black as u8;

/// Base minimax call. Returns the best move and absolute score for the player to move.
/// Returns None if there are no moves to search.
pub fn minimax(
    state: &mut GameState,
    legal_moves: &[Move],
    ply: PlyKind,
    positional: bool,
) -> Option<SearchResult> {
    debug_assert_ne!(ply, 0);

    let instant = Instant::now();
    let player = state.side_to_move();
    let mut nodes = 1;
    let (score, best_move) = minimax_root(state, legal_moves, ply, &mut nodes, positional)?;

    Some(SearchResult {
        best_move,
        score,
        player,
        depth: ply,
        nodes,
        elapsed: instant.elapsed(),
    })
}

/// Alpha Beta cannot prune any of its depth 1 children directly because
/// only one of Alpha and Beta can be updated from a node's children.
/// The root links the best score to the move that produced it.
fn minimax_root(
    state: &mut GameState,
    legal_moves: &[Move],
    ply: PlyKind,
    nodes: &mut u64,
    positional: bool,
) -> Option<(Cp, Move)> {
    let mut alpha = Cp::MIN;
    let mut beta = Cp::MAX;
    let mut best_move = None;

    match state.side_to_move() {
        Color::White => {
            for &legal_move in legal_moves {
                state.make_move(legal_move);
                let move_cp = minimax_impl::<BLACK>(state, ply - 1, nodes, alpha, beta, positional);
                state.undo_move();

                if best_move.is_none() || move_cp > alpha {
                    alpha = move_cp;
                    best_move = Some(legal_move);
                }
            }
            best_move.map(|best_move| (alpha, best_move))
        }
        Color::Black => {
            for &legal_move in legal_moves {
                state.make_move(legal_move);
                let move_cp = minimax_impl::<WHITE>(state, ply - 1, nodes, alpha, beta, positional);
                state.undo_move();

                if best_move.is_none() || move_cp < beta {
                    beta = move_cp;
                    best_move = Some(legal_move);
                }
            }
            best_move.map(|best_move| (beta, best_move))
        }
    }
}

fn minimax_impl<const COLOR: u8>(
    state: &mut GameState,
    ply: PlyKind,
    nodes: &mut u64,
    mut alpha: Cp,
    mut beta: Cp,
    positional: bool,
) -> Cp {
    *nodes += 1;
    let legal_moves = state.legal_moves();

    // Stop at terminal node: Checkmate/Stalemate/last depth.
    if ply == 0 || legal_moves.is_empty() {
        return evaluate_abs(state, positional);
    }

    if COLOR == WHITE {
        let mut best_cp = Cp::MIN;
        for legal_move in legal_moves {
            state.make_move(legal_move);
            let move_cp = minimax_impl::<BLACK>(state, ply - 1, nodes, alpha, beta, positional);
            state.undo_move();

            best_cp = cmp::max(best_cp, move_cp);
            alpha = cmp::max(alpha, best_cp);
            if alpha >= beta {
                break;
            }
        }
        best_cp
    } else {
        let mut best_cp = Cp::MAX;
        for legal_move in legal_moves {
            state.make_move(legal_move);
            let move_cp = minimax_impl::<WHITE>(state, ply - 1, nodes, alpha, beta, positional);
            state.undo_move();

            best_cp = cmp::min(best_cp, move_cp);
            beta = cmp::min(beta, best_cp);
            if alpha >= beta {
                break;
            }
        }
        best_cp
    }
}
