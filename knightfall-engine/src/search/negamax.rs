//! Negamax implementation of Minimax with Alpha-Beta pruning.

use std::cmp;
use std::time::Instant;

use crate::coretypes::{Cp, Move, PlyKind};
use crate::evaluation::evaluate;
use crate::gamestate::GameState;
use crate::search::SearchResult;

/// Negamax implementation of Minimax with alpha-beta pruning.
/// Negamax searches to a given depth and returns the best move found.
/// Internally, Negamax treats the active player as the maxing player,
/// however the final centipawn score of the position returned is
/// absolute with White as maxing and Black as minning.
///
/// Root moves are searched in the order given, and the first move reaching
/// the best score is kept. Returns None if there are no moves to search.
pub fn negamax(
    state: &mut GameState,
    legal_moves: &[Move],
    ply: PlyKind,
    positional: bool,
) -> Option<SearchResult> {
    debug_assert_ne!(ply, 0);

    let active_player = state.side_to_move();
    let instant = Instant::now();
    let mut nodes = 1;

    let mut alpha = Cp::MIN;
    let beta = Cp::MAX;
    let mut best: Option<(Cp, Move)> = None;

    for &legal_move in legal_moves {
        state.make_move(legal_move);
        let move_score = -negamax_impl(state, &mut nodes, ply - 1, -beta, -alpha, positional);
        state.undo_move();

        if best.map_or(true, |(best_score, _)| move_score > best_score) {
            best = Some((move_score, legal_move));
        }
        alpha = cmp::max(alpha, move_score);
    }

    best.map(|(best_score, best_move)| SearchResult {
        best_move,
        score: best_score * active_player.sign(),
        player: active_player,
        depth: ply,
        nodes,
        elapsed: instant.elapsed(),
    })
}

/// The player whose turn it is to move for a position is always treated as the maxing player.
/// negamax_impl returns the max possible score of the current maxing player.
/// Therefore, when interpreting the score of a child node, the score needs to be negated.
///
/// Parameters:
///
/// state: current position to search.
/// nodes: Counter for number of nodes visited in search.
/// ply: remaining depth to search to.
/// alpha: Best (greatest) guaranteed value for current player.
/// beta: Best (lowest) guaranteed value for opposite player.
fn negamax_impl(
    state: &mut GameState,
    nodes: &mut u64,
    ply: PlyKind,
    mut alpha: Cp,
    beta: Cp,
    positional: bool,
) -> Cp {
    *nodes += 1;
    let legal_moves = state.legal_moves();

    // Stop search at terminal nodes, Checkmates/Stalemates/last depth.
    // `evaluate` reads the terminal flags set by `legal_moves` above.
    if ply == 0 || legal_moves.is_empty() {
        return evaluate(state, positional);
    }

    let mut best_score = Cp::MIN;

    for legal_move in legal_moves {
        state.make_move(legal_move);
        let move_score = -negamax_impl(state, nodes, ply - 1, -beta, -alpha, positional);
        state.undo_move();

        best_score = cmp::max(best_score, move_score);
        alpha = cmp::max(alpha, best_score);

        // Cut-off has occurred, no further children of this position need to be searched.
        if alpha >= beta {
            break;
        }
    }
    best_score
}
