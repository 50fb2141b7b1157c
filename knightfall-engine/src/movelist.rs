//! MoveList types used in Knightfall engine.
//!
//! The underlying type of MoveList may change at any time during
//! pre-1.0 development, so a MoveList type alias makes changes easy.

use std::convert::TryFrom;
use std::fmt::{self, Display, Write};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use arrayvec::ArrayVec;

use crate::coretypes::{Move, PieceKind, Square, MAX_MOVES};
use crate::error::{self, ErrorKind};

/// MoveList is a container that can hold at most `MAX_MOVES`, the most number of moves per any chess position.
pub type MoveList = ArrayVec<Move, MAX_MOVES>;

/// A move detached from the board it was played on.
///
/// Records are what a move log is saved as and what a user types in.
/// They resolve back into a full Move against a position with
/// `GameState::move_from_record`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveRecord {
    pub start: Square,
    pub end: Square,
    #[cfg_attr(feature = "serde", serde(default))]
    pub promotion: Option<PieceKind>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_en_passant: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_castle: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_pawn_promotion: bool,
}

impl MoveRecord {
    pub fn new(start: Square, end: Square) -> Self {
        Self {
            start,
            end,
            promotion: None,
            is_en_passant: false,
            is_castle: false,
            is_pawn_promotion: false,
        }
    }
}

impl From<&Move> for MoveRecord {
    fn from(move_: &Move) -> Self {
        Self {
            start: move_.start,
            end: move_.end,
            promotion: move_.promotion.filter(|_| move_.is_pawn_promotion),
            is_en_passant: move_.is_en_passant,
            is_castle: move_.is_castle,
            is_pawn_promotion: move_.is_pawn_promotion,
        }
    }
}

impl From<Move> for MoveRecord {
    fn from(move_: Move) -> Self {
        Self::from(&move_)
    }
}

/// Pure coordinate notation, "e2e4" or "e7e8q".
impl FromStr for MoveRecord {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        let s = s.trim();
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err((ErrorKind::ParseMoveMalformed, "expected <from><to>[qrbn]").into());
        }

        let mut record = Self::new(s[0..2].parse()?, s[2..4].parse()?);
        if let Some(ch) = s[4..].chars().next() {
            record.promotion = match PieceKind::try_from(ch)? {
                piece_kind @ (PieceKind::Queen
                | PieceKind::Rook
                | PieceKind::Bishop
                | PieceKind::Knight) => Some(piece_kind),
                _ => return Err((ErrorKind::ParseMoveMalformed, "promotion not of qrbn").into()),
            };
            record.is_pawn_promotion = true;
        }
        Ok(record)
    }
}

impl Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.start, self.end)?;
        if let Some(piece_kind) = self.promotion {
            f.write_char(piece_kind.to_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// Space separated coordinate notation of a sequence of moves.
pub fn line_to_string(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|move_| move_.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::squares::*;
    use crate::coretypes::{Color, Piece};

    #[test]
    fn parse_coordinate_notation() {
        let record: MoveRecord = "e2e4".parse().unwrap();
        assert_eq!(record, MoveRecord::new(E2, E4));

        let record: MoveRecord = "a7a8n".parse().unwrap();
        assert_eq!(record.promotion, Some(PieceKind::Knight));
        assert!(record.is_pawn_promotion);
        assert_eq!(record.to_string(), "a7a8n");

        for bad in ["", "e2", "e2e", "e2e9", "e7e8k", "e7e8qq", "i2e4"] {
            assert!(bad.parse::<MoveRecord>().is_err(), "{bad}");
        }
    }

    #[test]
    fn record_from_move_keeps_flags() {
        let king = Piece::new(Color::White, PieceKind::King);
        let record = MoveRecord::from(Move::castle(E1, G1, king));
        assert!(record.is_castle);
        assert!(!record.is_en_passant);
        assert_eq!(record.to_string(), "e1g1");
    }

    #[test]
    fn record_from_unresolved_promotion_keeps_flag() {
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        let record = MoveRecord::from(Move::new(E7, E8, pawn, None).with_pawn_promotion());
        assert!(record.is_pawn_promotion);
        assert_eq!(record.promotion, None);
        assert_ne!(record, "e7e8".parse::<MoveRecord>().unwrap());
    }

    #[test]
    fn line_is_space_separated() {
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        let knight = Piece::new(Color::Black, PieceKind::Knight);
        let line = [Move::new(E2, E4, pawn, None), Move::new(G8, F6, knight, None)];
        assert_eq!(line_to_string(&line), "e2e4 g8f6");
    }
}
