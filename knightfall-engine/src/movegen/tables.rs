//! Direction and offset lookup tables used for move generation.
//!
//! Directions are (row, col) steps. Row decreases toward rank 8.

use crate::coretypes::{Color, Direction, PieceKind};

/// Rook directions: up, left, down, right.
pub const ORTHOGONALS: [Direction; 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// Bishop directions: up-left, up-right, down-left, down-right.
pub const DIAGONALS: [Direction; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// All eight compass directions, orthogonals first.
pub const COMPASS: [Direction; 8] = [
    ORTHOGONALS[0],
    ORTHOGONALS[1],
    ORTHOGONALS[2],
    ORTHOGONALS[3],
    DIAGONALS[0],
    DIAGONALS[1],
    DIAGONALS[2],
    DIAGONALS[3],
];

/// Knight jumps.
pub const KNIGHT_OFFSETS: [Direction; 8] = [
    (-2, -1),
    (-2, 1),
    (-1, 2),
    (1, 2),
    (2, -1),
    (2, 1),
    (-1, -2),
    (1, -2),
];

/// Longest possible ray on an 8x8 board.
pub const MAX_DISTANCE: i8 = 7;

/// Returns true if direction is one of the four orthogonals.
pub const fn is_orthogonal(direction: Direction) -> bool {
    direction.0 == 0 || direction.1 == 0
}

/// Returns the opposite direction.
pub const fn reverse(direction: Direction) -> Direction {
    (-direction.0, -direction.1)
}

/// Sliding directions of a piece kind. Non-sliders have none.
pub const fn slides(piece_kind: PieceKind) -> &'static [Direction] {
    match piece_kind {
        PieceKind::Rook => &ORTHOGONALS,
        PieceKind::Bishop => &DIAGONALS,
        PieceKind::Queen => &COMPASS,
        _ => &[],
    }
}

/// Directions from a king toward a pawn of color `pawn_color` that attacks it.
/// White pawns attack toward row 0, so they sit below the king they attack.
pub const fn pawn_attacker_directions(pawn_color: Color) -> [Direction; 2] {
    match pawn_color {
        Color::White => [DIAGONALS[2], DIAGONALS[3]],
        Color::Black => [DIAGONALS[0], DIAGONALS[1]],
    }
}
