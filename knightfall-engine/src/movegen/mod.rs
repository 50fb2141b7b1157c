//! Legal move generation.
//!
//! Legal moves are assembled from pin-aware piece generators, then filtered
//! according to how many pieces give check to the side to move.

use arrayvec::ArrayVec;

use crate::coretypes::{Castling, Color, Direction, Move, Piece, PieceKind, Square};
use crate::gamestate::GameState;
use crate::movelist::MoveList;

pub mod attacks;
mod pieces;
pub mod tables;

pub use attacks::{CheckRecord, Checks, PinRecord, Pins, PinsAndChecks};

/// Most pieces a side may have and still be treated as drawn by material.
pub const INSUFFICIENT_MATERIAL: usize = 2;

/// Check situation of the side to move.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CheckState {
    /// Every piece may move, and castling is possible.
    NotInCheck,
    /// Only king moves, captures of the checker, or blocks of its ray.
    SingleCheck(CheckRecord),
    /// Only king moves.
    DoubleCheck,
}

impl CheckState {
    pub fn from_checks(checks: &Checks) -> Self {
        match checks.as_slice() {
            [] => CheckState::NotInCheck,
            [check] => CheckState::SingleCheck(*check),
            _ => CheckState::DoubleCheck,
        }
    }
}

/// Generate all legal moves for the side to move of `state`.
///
/// Refreshes the check and pin caches of `state` and sets its terminal flags.
/// When moves exist, `stale_mate` is also set if the opponent is down to
/// a bare king or a king and one piece.
pub(crate) fn legal_moves(state: &mut GameState) -> MoveList {
    let us = state.side_to_move;
    let king = state.king_square(us);

    let found = attacks::pins_and_checks(&state.board, king, us);
    state.in_check = found.in_check;
    state.pins = found.pins;
    state.checks = found.checks;

    let mut moves = MoveList::new();
    match CheckState::from_checks(&state.checks) {
        CheckState::NotInCheck => {
            all_piece_moves(state, us, &mut moves);
            castling_moves(state, us, &mut moves);
        }
        CheckState::SingleCheck(check) => {
            all_piece_moves(state, us, &mut moves);
            let blocks = block_squares(state, king, &check);
            moves.retain(|move_| {
                move_.piece_moved.piece_kind == PieceKind::King
                    || blocks.contains(&move_.end)
                    || (move_.is_en_passant
                        && Square::new(move_.start.row(), move_.end.col()) == Some(check.square))
            });
        }
        CheckState::DoubleCheck => {
            let piece = Piece::new(us, PieceKind::King);
            pieces::piece_moves(state, king, piece, &mut moves);
        }
    }

    if moves.is_empty() {
        state.check_mate = state.in_check;
        state.stale_mate = !state.in_check;
    } else {
        state.check_mate = false;
        state.stale_mate = state.board.count(!us) <= INSUFFICIENT_MATERIAL;
    }

    moves
}

fn all_piece_moves(state: &GameState, us: Color, moves: &mut MoveList) {
    for (square, piece) in state.board.pieces() {
        if piece.color == us {
            pieces::piece_moves(state, square, piece, moves);
        }
    }
}

/// Squares a non-king piece may move to in order to resolve a single check.
/// A knight check can only be resolved by capturing the knight. A slider,
/// pawn or king check can also be blocked anywhere between it and our king.
fn block_squares(state: &GameState, king: Square, check: &CheckRecord) -> ArrayVec<Square, 7> {
    let mut blocks = ArrayVec::new();

    if matches!(state.board[check.square], Some(piece) if piece.piece_kind == PieceKind::Knight) {
        blocks.push(check.square);
        return blocks;
    }

    for distance in 1..=tables::MAX_DISTANCE {
        let Some(square) = king.offset(check.direction, distance) else {
            break;
        };
        blocks.push(square);
        if square == check.square {
            break;
        }
    }
    blocks
}

/// Castling moves for a side not in check.
/// Squares between king and rook must be empty, and the squares the king
/// crosses and lands on must not be attacked.
fn castling_moves(state: &GameState, us: Color, moves: &mut MoveList) {
    let king = state.king_square(us);
    let piece = Piece::new(us, PieceKind::King);

    if state.castling.has(Castling::king_side(us))
        && castle_path_clear(state, king, us, (0, 1), 2, 2)
    {
        if let Some(end) = king.offset((0, 1), 2) {
            moves.push(Move::castle(king, end, piece));
        }
    }

    if state.castling.has(Castling::queen_side(us))
        && castle_path_clear(state, king, us, (0, -1), 3, 2)
    {
        if let Some(end) = king.offset((0, -1), 2) {
            moves.push(Move::castle(king, end, piece));
        }
    }
}

/// Checks the `empty` squares beside the king are vacant, the first `safe` of
/// them are not attacked, and a friendly rook stands just past the empty squares.
fn castle_path_clear(
    state: &GameState,
    king: Square,
    us: Color,
    direction: Direction,
    empty: i8,
    safe: i8,
) -> bool {
    let rook = Piece::new(us, PieceKind::Rook);
    let rook_home = king.offset(direction, empty + 1);
    if rook_home.map(|square| state.board[square]) != Some(Some(rook)) {
        return false;
    }

    (1..=empty).all(|distance| match king.offset(direction, distance) {
        Some(square) => {
            state.board[square].is_none()
                && (distance > safe || !attacks::is_attacked(&state.board, square, us))
        }
        None => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::squares::*;
    use crate::fen::Fen;

    fn legal(fen: &str) -> (GameState, MoveList) {
        let mut state = GameState::parse_fen(fen).unwrap();
        let moves = state.legal_moves();
        (state, moves)
    }

    #[test]
    fn start_position_has_twenty_moves() {
        let (state, moves) = legal("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(moves.len(), 20);
        assert!(!state.in_check());
        assert!(!state.is_checkmate());
        assert!(!state.is_stalemate());
    }

    #[test]
    fn single_check_allows_block_capture_or_king_move() {
        // Rook on e8 checks the e1 king. The d2 bishop may block on e3,
        // the a4 queen may block on e4 or capture on e8.
        let (state, moves) = legal("4r2k/8/8/8/Q7/8/3B4/4K3 w - - 0 1");
        assert!(state.in_check());
        assert_eq!(
            CheckState::from_checks(state.checks()),
            CheckState::SingleCheck(state.checks()[0])
        );
        for move_ in &moves {
            let kind = move_.piece_moved().piece_kind();
            assert!(kind == PieceKind::King || move_.end().col() == E1.col());
        }
        assert!(moves.iter().any(|m| m.start() == D2 && m.end() == E3));
        assert!(moves.iter().any(|m| m.start() == A4 && m.end() == E4));
        assert!(moves.iter().any(|m| m.start() == A4 && m.end() == E8));
    }

    #[test]
    fn knight_check_must_capture_knight() {
        // Knight on d3 checks e1. Only a capture of the knight or a king move helps.
        let (state, moves) = legal("7k/3R4/8/8/8/3n4/8/4K3 w - - 0 1");
        assert!(state.in_check());
        assert!(moves.iter().any(|m| m.start() == D7 && m.end() == D3));
        for move_ in &moves {
            if move_.piece_moved().piece_kind() != PieceKind::King {
                assert_eq!(move_.end(), D3);
            }
        }
    }

    #[test]
    fn double_check_only_king_moves() {
        let (state, moves) = legal("4r2k/8/8/8/8/3n4/8/R3K3 w Q - 0 1");
        assert_eq!(CheckState::from_checks(state.checks()), CheckState::DoubleCheck);
        assert!(!moves.is_empty());
        assert!(moves
            .iter()
            .all(|m| m.piece_moved().piece_kind() == PieceKind::King && !m.is_castle()));
    }

    #[test]
    fn castling_blocked_by_attacked_transit_square() {
        // The f8 rook attacks f1, so only queen side castling is available.
        let (_, moves) = legal("5r1k/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let castles: Vec<_> = moves.iter().filter(|m| m.is_castle()).collect();
        assert_eq!(castles.len(), 1);
        assert_eq!(castles[0].end(), C1);
    }

    #[test]
    fn queen_side_castling_ignores_attacked_b_file() {
        let (_, moves) = legal("1r5k/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(moves.iter().any(|m| m.is_castle() && m.end() == C1));

        let (_, moves) = legal("k7/8/8/8/8/8/8/RN2K3 w Q - 0 1");
        assert!(!moves.iter().any(|m| m.is_castle()));
    }

    #[test]
    fn no_castling_out_of_check() {
        let (state, moves) = legal("4r2k/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(state.in_check());
        assert!(!moves.iter().any(|m| m.is_castle()));
    }

    #[test]
    fn checkmate_and_stalemate_flags() {
        let (state, moves) = legal("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(moves.is_empty());
        assert!(state.is_checkmate());
        assert!(!state.is_stalemate());

        let (state, moves) = legal("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(moves.is_empty());
        assert!(state.is_stalemate());
        assert!(!state.is_checkmate());
    }

    #[test]
    fn bare_opponent_sets_stalemate_flag() {
        let (state, moves) = legal("7k/8/8/8/8/8/8/K2Q4 w - - 0 1");
        assert!(!moves.is_empty());
        assert!(state.is_stalemate());

        let (state, _) = legal("7k/6p1/8/8/8/8/8/K2Q4 w - - 0 1");
        assert!(state.is_stalemate());

        let (state, _) = legal("7k/5pp1/8/8/8/8/8/K2Q4 w - - 0 1");
        assert!(!state.is_stalemate());
    }

    #[test]
    fn en_passant_may_capture_checking_pawn() {
        // d7d5 gave check to the e4 king; exd6 removes the checker.
        let (state, moves) = legal("7k/8/8/3pP3/4K3/8/8/8 w - d6 0 1");
        assert!(state.in_check());
        assert!(moves.iter().any(|m| m.is_en_passant() && m.end() == D6));
    }
}
