//! Pin-aware move generators for each kind of piece.
//!
//! Generators here respect pins and king safety for the king itself,
//! but know nothing of checks against the king. Check evasion is applied
//! afterward by the legal move assembler.

use crate::coretypes::{Color, Direction, Move, Piece, PieceKind, Square};
use crate::gamestate::GameState;
use crate::movegen::attacks;
use crate::movegen::tables::{reverse, slides, COMPASS, KNIGHT_OFFSETS, MAX_DISTANCE};
use crate::movelist::MoveList;

/// Generate pseudo-legal moves for the piece on `square`, dispatching on its kind.
pub(crate) fn piece_moves(state: &GameState, square: Square, piece: Piece, moves: &mut MoveList) {
    match piece.piece_kind {
        PieceKind::Pawn => pawn_moves(state, square, piece, moves),
        PieceKind::Knight => knight_moves(state, square, piece, moves),
        PieceKind::King => king_moves(state, square, piece, moves),
        piece_kind => {
            debug_assert!(piece_kind.is_sliding());
            slider_moves(state, square, piece, moves)
        }
    }
}

/// Pin direction of the piece on `square`, if it is pinned.
fn pin_direction(state: &GameState, square: Square) -> Option<Direction> {
    state
        .pins
        .iter()
        .find(|pin| pin.square == square)
        .map(|pin| pin.direction)
}

/// A pinned piece may only move toward the pinner or back toward its king.
fn along_pin(pin: Option<Direction>, direction: Direction) -> bool {
    match pin {
        Some(pinned) => direction == pinned || direction == reverse(pinned),
        None => true,
    }
}

fn is_enemy(state: &GameState, square: Square, us: Color) -> bool {
    matches!(state.board[square], Some(piece) if piece.color != us)
}

fn slider_moves(state: &GameState, square: Square, piece: Piece, moves: &mut MoveList) {
    let pin = pin_direction(state, square);

    for &direction in slides(piece.piece_kind) {
        if !along_pin(pin, direction) {
            continue;
        }
        for distance in 1..=MAX_DISTANCE {
            let Some(end) = square.offset(direction, distance) else {
                break;
            };
            match state.board[end] {
                None => moves.push(Move::new(square, end, piece, None)),
                Some(target) => {
                    if target.color != piece.color {
                        moves.push(Move::new(square, end, piece, Some(target)));
                    }
                    break;
                }
            }
        }
    }
}

fn knight_moves(state: &GameState, square: Square, piece: Piece, moves: &mut MoveList) {
    // A pinned knight can never stay on its pin ray.
    if pin_direction(state, square).is_some() {
        return;
    }
    for jump in KNIGHT_OFFSETS {
        let Some(end) = square.offset(jump, 1) else {
            continue;
        };
        match state.board[end] {
            Some(target) if target.color == piece.color => (),
            target => moves.push(Move::new(square, end, piece, target)),
        }
    }
}

/// King steps are tried one at a time. A step is kept only if the destination
/// is not attacked with the king standing on it.
fn king_moves(state: &GameState, square: Square, piece: Piece, moves: &mut MoveList) {
    for direction in COMPASS {
        let Some(end) = square.offset(direction, 1) else {
            continue;
        };
        let target = state.board[end];
        if matches!(target, Some(occupant) if occupant.color == piece.color) {
            continue;
        }
        if !attacks::is_attacked(&state.board, end, piece.color) {
            moves.push(Move::new(square, end, piece, target));
        }
    }
}

fn pawn_moves(state: &GameState, square: Square, piece: Piece, moves: &mut MoveList) {
    let us = piece.color;
    let step = us.pawn_step();
    let pin = pin_direction(state, square);
    let promotes = |end: Square| end.row() == us.promotion_row();

    let forward = (step, 0);
    if along_pin(pin, forward) {
        if let Some(end) = square.offset(forward, 1) {
            if state.board[end].is_none() {
                let push = Move::new(square, end, piece, None);
                moves.push(match promotes(end) {
                    true => push.with_pawn_promotion(),
                    false => push,
                });

                if square.row() == us.pawn_start_row() {
                    if let Some(double) = square.offset(forward, 2) {
                        if state.board[double].is_none() {
                            moves.push(Move::new(square, double, piece, None));
                        }
                    }
                }
            }
        }
    }

    for side in [-1, 1] {
        let diagonal = (step, side);
        if !along_pin(pin, diagonal) {
            continue;
        }
        let Some(end) = square.offset(diagonal, 1) else {
            continue;
        };

        if is_enemy(state, end, us) {
            let capture = Move::new(square, end, piece, state.board[end]);
            moves.push(match promotes(end) {
                true => capture.with_pawn_promotion(),
                false => capture,
            });
        } else if state.en_passant == Some(end) && state.board[end].is_none() {
            let capture = Move::en_passant(square, end, piece);
            if en_passant_is_safe(state, &capture) {
                moves.push(capture);
            }
        }
    }
}

/// En passant removes two pawns from the capturing rank at once, which can
/// expose the king along that rank in a way the pin scan cannot see.
/// The capture is tried on a copy of the board and the king square re-checked.
fn en_passant_is_safe(state: &GameState, capture: &Move) -> bool {
    let us = capture.piece_moved.color;
    let Some(captured_square) = Square::new(capture.start.row(), capture.end.col()) else {
        return false;
    };

    let mut board = state.board.clone();
    board[capture.start] = None;
    board[captured_square] = None;
    board[capture.end] = Some(capture.piece_moved);

    !attacks::is_attacked(&board, state.king_square(us), us)
}
