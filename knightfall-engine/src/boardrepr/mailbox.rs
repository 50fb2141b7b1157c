//! A [mailbox](https://www.chessprogramming.org/Mailbox) is a square-centric
//! representation of a chess board.
//!
//! A Mailbox is an array of size Rows x Cols where each index holds a
//! chess piece or `None` for an empty square.

use std::fmt::{self, Display};
use std::ops::{Index, IndexMut};

use crate::coretypes::{Color, Piece, PieceKind, Square, NUM_COLS, NUM_ROWS};

/// Classic 8x8 square board representation of Chess board.
/// Mailbox is Square-Centric, meaning it indexes by square to get a piece.
/// Row 0 holds Black's back rank in the starting position.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Mailbox {
    board: [[Option<Piece>; NUM_COLS]; NUM_ROWS],
}

impl Mailbox {
    pub const ROWS: usize = NUM_ROWS;

    const BACK_RANK: [PieceKind; NUM_COLS] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    /// Creates an empty Mailbox, where all squares are None.
    pub fn new() -> Self {
        Mailbox {
            board: [[None; NUM_COLS]; NUM_ROWS],
        }
    }

    /// Create Mailbox with pieces arranged in starting chess position.
    pub fn start_position() -> Self {
        let mut mb = Self::new();

        for (col, piece_kind) in Self::BACK_RANK.into_iter().enumerate() {
            mb.board[0][col] = Some(Piece::new(Color::Black, piece_kind));
            mb.board[1][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            mb.board[6][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
            mb.board[7][col] = Some(Piece::new(Color::White, piece_kind));
        }

        mb
    }

    pub fn board(&self) -> &[[Option<Piece>; NUM_COLS]; NUM_ROWS] {
        &self.board
    }

    /// Iterates every occupied square with its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(move |square| self[square].map(|piece| (square, piece)))
    }

    /// Number of pieces of a color on the board, kings included.
    pub fn count(&self, color: Color) -> usize {
        self.pieces()
            .filter(|(_, piece)| piece.color() == color)
            .count()
    }

    /// Returns pretty-printed chess board representation of Self.
    /// The chess board has borders and file/rank indicators.
    pub fn pretty(&self) -> String {
        const RANK_SEP: &str = "+---+---+---+---+---+---+---+---+\n";
        let mut pretty = String::with_capacity(626);

        pretty.push_str(RANK_SEP);
        for (row, cells) in self.board.iter().enumerate() {
            pretty.push_str("| ");

            for cell in cells {
                pretty.push(match cell {
                    Some(piece) => char::from(*piece),
                    None => ' ',
                });
                pretty.push_str(" | ");
            }
            pretty.push_str(&(Self::ROWS - row).to_string());
            pretty.push('\n');
            pretty.push_str(RANK_SEP);
        }
        pretty.push_str("  a   b   c   d   e   f   g   h\n");

        pretty
    }
}

impl Index<Square> for Mailbox {
    type Output = Option<Piece>;
    fn index(&self, square: Square) -> &Self::Output {
        &self.board[square.row() as usize][square.col() as usize]
    }
}

impl IndexMut<Square> for Mailbox {
    fn index_mut(&mut self, square: Square) -> &mut Self::Output {
        &mut self.board[square.row() as usize][square.col() as usize]
    }
}

/// Default value is that of a standard starting chess position.
impl Default for Mailbox {
    fn default() -> Self {
        Mailbox::start_position()
    }
}

impl Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::squares::*;

    #[test]
    fn start_position_layout() {
        let mb = Mailbox::start_position();
        assert_eq!(mb[E1], Some(Piece::new(Color::White, PieceKind::King)));
        assert_eq!(mb[D8], Some(Piece::new(Color::Black, PieceKind::Queen)));
        assert_eq!(mb[A2], Some(Piece::new(Color::White, PieceKind::Pawn)));
        assert_eq!(mb[H7], Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(mb[E4], None);
        assert_eq!(mb.count(Color::White), 16);
        assert_eq!(mb.count(Color::Black), 16);
    }

    #[test]
    fn display_start_position_mailbox() {
        let mb = Mailbox::start_position();
        let pretty = mb.pretty();
        let first_row = pretty.lines().nth(1).unwrap();
        assert_eq!(first_row, "| r | n | b | q | k | b | n | r | 8");
        assert!(pretty.ends_with("  a   b   c   d   e   f   g   h\n"));
    }
}
