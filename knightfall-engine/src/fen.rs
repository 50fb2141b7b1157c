//! Forsyth-Edwards Notation, a standard notation for describing a chess position.
//! <https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation>
//!
//! Example:
//! Starting Chess FEN = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
//!
//! Move clocks are accepted on input but not tracked by GameState.
//! They are written back out as "0" and a full move number derived from the move log.

use std::convert::TryFrom;
use std::str::FromStr;

use crate::boardrepr::Mailbox;
use crate::coretypes::{Castling, Color, Piece, PieceKind, Square, NUM_COLS};
use crate::error::{self, ErrorKind};
use crate::gamestate::GameState;

/// Allows converting data to and from a Fen string.
pub trait Fen: Sized {
    /// Attempt to parse a Fen string into implementing type.
    fn parse_fen(fen: &str) -> error::Result<Self>;

    /// Returns string representation of implementing type in Fen format.
    fn to_fen(&self) -> String;
}

impl Fen for GameState {
    fn parse_fen(fen: &str) -> error::Result<Self> {
        let mut fields = fen.split_whitespace();
        let mut next_field = |name: &str| {
            fields
                .next()
                .ok_or_else(|| error::Error::from((ErrorKind::Fen, format!("missing {name}"))))
        };

        let board = parse_placement(next_field("placement")?)?;
        let side_to_move = parse_side_to_move(next_field("side to move")?)?;
        let castling = Castling::from_str(next_field("castling")?)?;
        let en_passant = parse_en_passant(next_field("en passant")?)?;

        let white_king = find_king(&board, Color::White)?;
        let black_king = find_king(&board, Color::Black)?;

        Ok(GameState::from_parts(
            board,
            side_to_move,
            castling,
            en_passant,
            white_king,
            black_king,
        ))
    }

    fn to_fen(&self) -> String {
        let en_passant = self
            .en_passant
            .map_or_else(|| "-".to_string(), |square| square.to_string());
        let fullmove_number = 1 + self.move_log.len() / 2;

        format!(
            "{} {} {} {} 0 {}",
            placement_to_fen(&self.board),
            self.side_to_move,
            self.castling,
            en_passant,
            fullmove_number
        )
    }
}

/// Placement ::= <row 0> '/' <row 1> ... '/' <row 7>
/// Each row is a sequence of piece chars and digits 1-8 counting empty squares.
fn parse_placement(placement: &str) -> error::Result<Mailbox> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != Mailbox::ROWS {
        return Err((ErrorKind::Fen, "placement must have 8 ranks").into());
    }

    let mut board = Mailbox::new();
    for (row, rank) in rows.into_iter().enumerate() {
        let mut col = 0usize;
        for ch in rank.chars() {
            if let Some(empty) = ch.to_digit(10) {
                if !(1..=8).contains(&empty) {
                    return Err((ErrorKind::Fen, "empty count not of 12345678").into());
                }
                col += empty as usize;
            } else {
                let piece = Piece::try_from(ch)?;
                let square = Square::new(row as u8, col as u8)
                    .ok_or((ErrorKind::Fen, "rank overflows 8 files"))?;
                board[square] = Some(piece);
                col += 1;
            }
            if col > NUM_COLS {
                return Err((ErrorKind::Fen, "rank overflows 8 files").into());
            }
        }
        if col != NUM_COLS {
            return Err((ErrorKind::Fen, "rank does not cover 8 files").into());
        }
    }

    Ok(board)
}

fn placement_to_fen(board: &Mailbox) -> String {
    let mut placement = String::with_capacity(71);
    for (row, cells) in board.board().iter().enumerate() {
        if row > 0 {
            placement.push('/');
        }
        let mut empty = 0;
        for cell in cells {
            match cell {
                Some(piece) => {
                    if empty > 0 {
                        placement.push_str(&empty.to_string());
                        empty = 0;
                    }
                    placement.push(char::from(*piece));
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            placement.push_str(&empty.to_string());
        }
    }
    placement
}

fn parse_side_to_move(field: &str) -> error::Result<Color> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Color::try_from(ch),
        _ => Err((ErrorKind::ParseColorMalformed, "expected w|b").into()),
    }
}

fn parse_en_passant(field: &str) -> error::Result<Option<Square>> {
    match field {
        "-" => Ok(None),
        square => Square::from_str(square).map(Some),
    }
}

/// Exactly one king of each color is required for a playable position.
fn find_king(board: &Mailbox, color: Color) -> error::Result<Square> {
    let king = Piece::new(color, PieceKind::King);
    let mut kings = board
        .pieces()
        .filter(|&(_, piece)| piece == king)
        .map(|(square, _)| square);

    match (kings.next(), kings.next()) {
        (Some(square), None) => Ok(square),
        _ => Err((ErrorKind::Fen, format!("expected one {} king", color.name())).into()),
    }
}
