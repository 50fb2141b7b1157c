//! Static Evaluation Functions.
//!
//! An absolute score treats White as a maxing player and Black as a minning player,
//! so a centipawn score of +10 is winning for White, while -10 is winning for Black.
//! A relative score treats the player to move as the maxing player, so if it is
//! Black to move, +10 is winning for Black.
//!
//! Terminal flags are read from the GameState, so a position must have had
//! its legal moves generated before it is evaluated.

use crate::boardrepr::Mailbox;
use crate::coretypes::{Color, Cp, CpKind, PieceKind, NUM_COLS, NUM_ROWS};
use crate::gamestate::GameState;

/// Score of a side that has been checkmated, in absolute terms for the winner.
pub const CHECKMATE: Cp = Cp(100_000);
pub const STALEMATE: Cp = Cp(0);

/// Centipawns added per positional table point, one tenth of a pawn.
const POSITIONAL_CP: CpKind = 10;

impl PieceKind {
    /// Default, independent value per piece.
    pub const fn centipawns(&self) -> Cp {
        Cp(match self {
            PieceKind::Pawn => 100, // 100 Centipawn == 1 Pawn
            PieceKind::Knight => 300,
            PieceKind::Bishop => 300,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        })
    }
}

// Relative Evaluation Functions

/// Primary evaluate function, with return relative to player to move.
pub fn evaluate(state: &GameState, positional: bool) -> Cp {
    evaluate_abs(state, positional) * state.side_to_move().sign()
}

// Absolute Evaluation Functions

/// Given a terminal node, return a score representing a checkmate
/// for white/black, or a draw.
pub fn terminal_abs(state: &GameState) -> Cp {
    if state.is_checkmate() {
        match state.side_to_move() {
            Color::White => -CHECKMATE,
            Color::Black => CHECKMATE,
        }
    } else {
        STALEMATE
    }
}

/// Primary absolute evaluate function.
/// Checkmate and stalemate flags take precedence over the board.
pub fn evaluate_abs(state: &GameState, positional: bool) -> Cp {
    if state.is_checkmate() || state.is_stalemate() {
        return terminal_abs(state);
    }

    let mut score = material(state.board());
    if positional {
        score += piece_square_lookup(state.board());
    }
    score
}

/// Returns Cp difference between White and Black material.
pub fn material(board: &Mailbox) -> Cp {
    board.pieces().fold(Cp(0), |score, (_, piece)| {
        score + piece.piece_kind().centipawns() * piece.color().sign()
    })
}

/// Returns value from looking up each piece square in the positional tables.
/// Tables are written from White's side of the board and mirrored for Black.
pub fn piece_square_lookup(board: &Mailbox) -> Cp {
    board.pieces().fold(Cp(0), |score, (square, piece)| {
        let row = match piece.color() {
            Color::White => square.row() as usize,
            Color::Black => NUM_ROWS - 1 - square.row() as usize,
        };
        let points = table(piece.piece_kind())[row][square.col() as usize];
        score + Cp(points * POSITIONAL_CP) * piece.color().sign()
    })
}

type Table = [[CpKind; NUM_COLS]; NUM_ROWS];

const fn table(piece_kind: PieceKind) -> &'static Table {
    match piece_kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => &KING_TABLE,
    }
}

// Row 0 is the far rank from White.

/// Pawns gain value as they advance, most of all in the center.
#[rustfmt::skip]
const PAWN_TABLE: Table = [
    [8, 8, 8, 8, 8, 8, 8, 8],
    [8, 8, 8, 8, 8, 8, 8, 8],
    [5, 6, 6, 7, 7, 6, 6, 5],
    [2, 3, 3, 5, 5, 3, 3, 2],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 1, 2, 3, 3, 2, 1, 1],
    [1, 1, 1, 0, 0, 1, 1, 1],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

/// Encourage central squares, penalize edge squares.
#[rustfmt::skip]
const KNIGHT_TABLE: Table = [
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 2, 2, 2, 2, 2, 2, 1],
    [1, 2, 3, 3, 3, 3, 2, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 2, 3, 3, 3, 3, 2, 1],
    [1, 2, 2, 2, 2, 2, 2, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
];

/// Long diagonals.
#[rustfmt::skip]
const BISHOP_TABLE: Table = [
    [4, 3, 2, 1, 1, 2, 3, 4],
    [3, 4, 3, 2, 2, 3, 4, 3],
    [2, 3, 4, 3, 3, 4, 3, 2],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [2, 3, 4, 3, 3, 4, 3, 2],
    [3, 4, 3, 2, 2, 3, 4, 3],
    [4, 3, 2, 1, 1, 2, 3, 4],
];

/// Open files in the center and the seventh rank.
#[rustfmt::skip]
const ROOK_TABLE: Table = [
    [2, 2, 2, 2, 2, 2, 2, 2],
    [4, 4, 4, 4, 4, 4, 4, 4],
    [1, 1, 2, 3, 3, 2, 1, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 1, 2, 3, 3, 2, 1, 1],
    [0, 0, 1, 1, 1, 1, 0, 0],
    [0, 0, 1, 2, 2, 1, 0, 0],
];

#[rustfmt::skip]
const QUEEN_TABLE: Table = [
    [1, 1, 1, 3, 1, 1, 1, 1],
    [1, 2, 3, 3, 3, 1, 1, 1],
    [1, 4, 3, 3, 3, 4, 2, 1],
    [1, 2, 3, 3, 3, 2, 2, 1],
    [1, 2, 3, 3, 3, 2, 2, 1],
    [1, 4, 3, 3, 3, 4, 2, 1],
    [1, 1, 2, 3, 3, 1, 1, 1],
    [1, 1, 1, 3, 1, 1, 1, 1],
];

/// The king stays home, preferably tucked into a corner.
#[rustfmt::skip]
const KING_TABLE: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [1, 1, 0, 0, 0, 0, 1, 1],
    [2, 3, 2, 0, 0, 1, 3, 2],
];
