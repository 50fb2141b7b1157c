//! Two ply greedy search.
//!
//! Every root move is answered by each of the opponent's replies, and the root
//! move whose best reply is worst for the opponent is chosen.

use std::time::Instant;

use crate::coretypes::{Cp, Move};
use crate::evaluation::evaluate;
use crate::gamestate::GameState;
use crate::search::SearchResult;

/// Returns None if there are no moves to search.
pub fn greedy(
    state: &mut GameState,
    legal_moves: &[Move],
    positional: bool,
) -> Option<SearchResult> {
    let instant = Instant::now();
    let player = state.side_to_move();
    let mut nodes = 1;
    let mut best: Option<(Cp, Move)> = None;

    for &legal_move in legal_moves {
        state.make_move(legal_move);
        nodes += 1;
        let replies = state.legal_moves();

        // Scores are relative to the opponent, who moves next.
        let opponent_best = if replies.is_empty() {
            evaluate(state, positional)
        } else {
            let mut opponent_best = Cp::MIN;
            for reply in replies {
                state.make_move(reply);
                nodes += 1;
                state.legal_moves();
                opponent_best = opponent_best.max(-evaluate(state, positional));
                state.undo_move();
            }
            opponent_best
        };
        state.undo_move();

        if best.map_or(true, |(best_score, _)| opponent_best < best_score) {
            best = Some((opponent_best, legal_move));
        }
    }

    best.map(|(opponent_best, best_move)| SearchResult {
        best_move,
        score: -opponent_best * player.sign(),
        player,
        depth: 2,
        nodes,
        elapsed: instant.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::squares::*;
    use crate::evaluation::CHECKMATE;
    use crate::fen::Fen;

    #[test]
    fn greedy_takes_mate() {
        let mut state = GameState::parse_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();
        let moves = state.legal_moves();
        let result = greedy(&mut state, &moves, false).unwrap();
        assert_eq!(result.best_move.end(), A8);
        assert_eq!(result.score, CHECKMATE);
    }

    #[test]
    fn greedy_avoids_hanging_queen() {
        // Qxd5 is defended by the e6 pawn, the safe capture is Qxa4.
        let mut state = GameState::parse_fen("4k3/8/4p3/3p4/p7/8/7P/3QK3 w - - 0 1").unwrap();
        let before = state.clone();
        let moves = state.legal_moves();
        let result = greedy(&mut state, &moves, false).unwrap();
        assert_eq!(result.best_move.start(), D1);
        assert_eq!(result.best_move.end(), A4);
        assert_eq!(state, before);
    }
}
