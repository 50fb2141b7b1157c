//! The fundamental and simple types of `knightfall_engine`.

use std::convert::TryFrom;
use std::fmt::{self, Display, Write};
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Mul, Neg, Not, Sub};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{self, ErrorKind};

///////////////
// Constants //
///////////////
pub const NUM_ROWS: usize = 8; // Row 0 is rank 8, row 7 is rank 1.
pub const NUM_COLS: usize = 8; // Col 0 is the 'a' file, col 7 is the 'h' file.
pub const NUM_SQUARES: usize = NUM_ROWS * NUM_COLS;

// Upper bound on moves generated for a single position, including the
// pin-filtered candidates considered before check evasion filtering.
pub const MAX_MOVES: usize = 256;

/////////////////////////
// Data and Structures //
/////////////////////////

/// Type alias for search depth.
pub type PlyKind = u8;

/// A (row, col) step used to walk the board.
pub type Direction = (i8, i8);

// Type alias to make changing Cp inner type easy if needed.
pub type CpKind = i32;

/// Centipawn, a common unit of measurement in chess, where 100 Centipawn == 1 Pawn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Cp(pub CpKind);

/// Color can represent the color of a piece, or a player.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Piece {
    pub(crate) color: Color,
    pub(crate) piece_kind: PieceKind,
}

/// Observe Castling rights for a position.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Castling(u8);

/// Castling Enum constants.
impl Castling {
    pub const W_KING: Castling = Castling(0b00000001);
    pub const W_QUEEN: Castling = Castling(0b00000010);
    pub const B_KING: Castling = Castling(0b00000100);
    pub const B_QUEEN: Castling = Castling(0b00001000);
    pub const W_SIDE: Castling = Castling(Self::W_KING.0 | Self::W_QUEEN.0);
    pub const B_SIDE: Castling = Castling(Self::B_KING.0 | Self::B_QUEEN.0);
    pub const ALL: Castling = Castling(Self::W_SIDE.0 | Self::B_SIDE.0);
    pub const NONE: Castling = Castling(0u8);
}

/// A square on the board, addressed as (row, col).
/// Row 0 is the far rank from White (rank 8), col 0 is the 'a' file.
/// A Square can only be constructed in bounds.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Square {
    row: u8,
    col: u8,
}

/// A single ply, created from the board it is played on.
///
/// Two moves are equal when their start, end and special move flags match.
/// The moved piece, the captured piece and the promotion kind are derived
/// from the board and the promotion choice, and do not take part in equality.
#[derive(Debug, Copy, Clone)]
pub struct Move {
    pub(crate) start: Square,
    pub(crate) end: Square,
    pub(crate) piece_moved: Piece,
    pub(crate) piece_captured: Option<Piece>,
    pub(crate) is_en_passant: bool,
    pub(crate) is_pawn_promotion: bool,
    pub(crate) is_castle: bool,
    pub(crate) promotion: Option<PieceKind>,
}

//////////////////////
/// Implementations //
//////////////////////

impl Cp {
    pub const MIN: Cp = Self(CpKind::MIN + 1); // + 1 to avoid overflow error on negate.
    pub const MAX: Cp = Self(CpKind::MAX);

    /// Returns the sign of Centipawn value, either 1, -1, or 0.
    pub const fn signum(&self) -> CpKind {
        self.0.signum()
    }

    /// Returns the color this absolute score favors, or None if even.
    pub const fn leading(&self) -> Option<Color> {
        match self.signum() {
            1 => Some(Color::White),
            -1 => Some(Color::Black),
            _ => None,
        }
    }
}

impl Add for Cp {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}
impl AddAssign for Cp {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}
impl Sub for Cp {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}
impl Mul for Cp {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}
impl Mul<CpKind> for Cp {
    type Output = Cp;
    fn mul(self, rhs: CpKind) -> Self::Output {
        Self(self.0 * rhs)
    }
}
impl Neg for Cp {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}
impl Display for Cp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

impl Color {
    /// FEN compliant conversion.
    pub const fn to_char(&self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }

    /// Returns the absolute sign of a Color in Cp.
    /// A positive value is good for white and a negative value is good for Black.
    pub const fn sign(&self) -> Cp {
        match self {
            Color::White => Cp(1),
            Color::Black => Cp(-1),
        }
    }

    /// Row step of a pawn advance for this color.
    pub const fn pawn_step(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row pawns of this color start on and may double advance from.
    pub const fn pawn_start_row(&self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row where pawns of this color promote.
    pub const fn promotion_row(&self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Row holding this color's king and rooks at the start of a game.
    pub const fn home_row(&self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl TryFrom<char> for Color {
    type Error = error::Error;
    fn try_from(ch: char) -> error::Result<Self> {
        match ch {
            'w' => Ok(Color::White),
            'b' => Ok(Color::Black),
            _ => Err((ErrorKind::ParseColorMalformed, "char is not w|b").into()),
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.to_char())
    }
}

impl PieceKind {
    /// FEN compliant conversion, defaults as white pieces.
    pub const fn to_char(&self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }

    /// Returns true if PieceKind can slide, false otherwise.
    /// Sliding piece_kinds are Rooks, Bishops, and Queens.
    pub const fn is_sliding(&self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen)
    }
}

/// Parses a promotion letter in either case, "q" or "Q".
impl TryFrom<char> for PieceKind {
    type Error = error::Error;
    fn try_from(ch: char) -> error::Result<Self> {
        match ch.to_ascii_uppercase() {
            'P' => Ok(PieceKind::Pawn),
            'N' => Ok(PieceKind::Knight),
            'B' => Ok(PieceKind::Bishop),
            'R' => Ok(PieceKind::Rook),
            'Q' => Ok(PieceKind::Queen),
            'K' => Ok(PieceKind::King),
            _ => Err((ErrorKind::ParsePieceMalformed, "char is not in PNBRQKpnbrqk").into()),
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Piece {
    pub const fn new(color: Color, piece_kind: PieceKind) -> Self {
        Piece { color, piece_kind }
    }
    /// Immutable Getters.
    pub const fn color(&self) -> Color {
        self.color
    }
    pub const fn piece_kind(&self) -> PieceKind {
        self.piece_kind
    }

    pub const fn to_char(&self) -> char {
        match self.color {
            Color::White => self.piece_kind.to_char(),
            Color::Black => self.piece_kind.to_char().to_ascii_lowercase(),
        }
    }
}

impl From<Piece> for char {
    fn from(piece: Piece) -> Self {
        piece.to_char()
    }
}

impl TryFrom<char> for Piece {
    type Error = error::Error;
    fn try_from(value: char) -> error::Result<Self> {
        let color = match value.is_ascii_uppercase() {
            true => Color::White,
            false => Color::Black,
        };
        let piece_kind = PieceKind::try_from(value)?;
        Ok(Piece { color, piece_kind })
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(char::from(*self))
    }
}

impl Castling {
    /// Make new Castling with all rights of initial chess position.
    pub const fn start_position() -> Self {
        Self::ALL
    }

    /// Returns true if there are no castling rights.
    pub const fn is_none(&self) -> bool {
        self.0 == 0u8
    }

    /// Returns true if Castling mask has all of provided bits.
    pub fn has(&self, rights: Castling) -> bool {
        self.0 & rights.0 == rights.0
    }

    /// Set given bits to '1' on Castling mask.
    pub fn set(&mut self, rights: Castling) {
        self.0 |= rights.0;
    }

    /// Set given bits to '0' on Castling mask.
    pub fn clear(&mut self, rights: Castling) {
        self.0 &= !rights.0;
    }

    /// Removes all castling rights for a color.
    pub fn clear_color(&mut self, color: Color) {
        match color {
            Color::White => self.clear(Self::W_SIDE),
            Color::Black => self.clear(Self::B_SIDE),
        }
    }

    /// King side right of a color.
    pub const fn king_side(color: Color) -> Self {
        match color {
            Color::White => Self::W_KING,
            Color::Black => Self::B_KING,
        }
    }

    /// Queen side right of a color.
    pub const fn queen_side(color: Color) -> Self {
        match color {
            Color::White => Self::W_QUEEN,
            Color::Black => Self::B_QUEEN,
        }
    }
}

/// Defaults to Castling rights for starting chess position, ALL.
impl Default for Castling {
    fn default() -> Self {
        Self::start_position()
    }
}

/// Displays in FEN-component format.
impl Display for Castling {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_none() {
            return f.write_char('-');
        }
        for (rights, ch) in [
            (Self::W_KING, 'K'),
            (Self::W_QUEEN, 'Q'),
            (Self::B_KING, 'k'),
            (Self::B_QUEEN, 'q'),
        ] {
            if self.has(rights) {
                f.write_char(ch)?;
            }
        }
        Ok(())
    }
}

/// Castling ::= '-' | ['K'] ['Q'] ['k'] ['q']
impl FromStr for Castling {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        let mut castling_rights = Castling::NONE;
        if s == "-" {
            return Ok(castling_rights);
        }
        if s.is_empty() {
            return Err((ErrorKind::ParseCastlingMalformed, "No characters").into());
        }
        for ch in s.chars() {
            match ch {
                'K' => castling_rights.set(Self::W_KING),
                'Q' => castling_rights.set(Self::W_QUEEN),
                'k' => castling_rights.set(Self::B_KING),
                'q' => castling_rights.set(Self::B_QUEEN),
                _ => return Err((ErrorKind::ParseCastlingMalformed, "char not of -KQkq").into()),
            };
        }
        Ok(castling_rights)
    }
}

impl Square {
    /// Creates a square if row and col are both within 0-7.
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < NUM_ROWS && (col as usize) < NUM_COLS {
            Some(Self { row, col })
        } else {
            None
        }
    }

    // Only for use with literal in-bounds coordinates.
    const fn at(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub const fn row(&self) -> u8 {
        self.row
    }

    pub const fn col(&self) -> u8 {
        self.col
    }

    /// Returns the square `distance` steps away in `direction`, or None if off board.
    pub fn offset(&self, direction: Direction, distance: i8) -> Option<Self> {
        let row = self.row as i8 + direction.0 * distance;
        let col = self.col as i8 + direction.1 * distance;
        if (0..NUM_ROWS as i8).contains(&row) && (0..NUM_COLS as i8).contains(&col) {
            Some(Self::at(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Lowercase file letter, 'a' through 'h'.
    pub const fn file_char(&self) -> char {
        (b'a' + self.col) as char
    }

    /// Rank digit, '1' through '8'.
    pub const fn rank_char(&self) -> char {
        (b'8' - self.row) as char
    }

    /// Iterates all 64 squares, row by row starting from A8.
    pub fn iter() -> impl Iterator<Item = Square> {
        (0..NUM_ROWS as u8).flat_map(|row| (0..NUM_COLS as u8).map(move |col| Self::at(row, col)))
    }
}

/// Square::= <fileLetter><rankNumber>
impl FromStr for Square {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        let mut chars = s.chars();
        let file = chars.next().ok_or(ErrorKind::ParseSquareMalformed)?;
        let rank = chars.next().ok_or(ErrorKind::ParseSquareMalformed)?;
        if chars.next().is_some() {
            return Err((ErrorKind::ParseSquareMalformed, "trailing characters").into());
        }
        if !('a'..='h').contains(&file) {
            return Err((ErrorKind::ParseFileMalformed, "file char not of abcdefgh").into());
        }
        if !('1'..='8').contains(&rank) {
            return Err((ErrorKind::ParseRankMalformed, "rank char not of 12345678").into());
        }
        Ok(Square::at(b'8' - rank as u8, file as u8 - b'a'))
    }
}

impl TryFrom<String> for Square {
    type Error = error::Error;
    fn try_from(s: String) -> error::Result<Self> {
        s.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.file_char())?;
        f.write_char(self.rank_char())
    }
}

/// Named constants for every square.
#[rustfmt::skip]
pub mod squares {
    use super::Square;

    pub const A8: Square = Square::at(0, 0); pub const B8: Square = Square::at(0, 1); pub const C8: Square = Square::at(0, 2); pub const D8: Square = Square::at(0, 3); pub const E8: Square = Square::at(0, 4); pub const F8: Square = Square::at(0, 5); pub const G8: Square = Square::at(0, 6); pub const H8: Square = Square::at(0, 7);
    pub const A7: Square = Square::at(1, 0); pub const B7: Square = Square::at(1, 1); pub const C7: Square = Square::at(1, 2); pub const D7: Square = Square::at(1, 3); pub const E7: Square = Square::at(1, 4); pub const F7: Square = Square::at(1, 5); pub const G7: Square = Square::at(1, 6); pub const H7: Square = Square::at(1, 7);
    pub const A6: Square = Square::at(2, 0); pub const B6: Square = Square::at(2, 1); pub const C6: Square = Square::at(2, 2); pub const D6: Square = Square::at(2, 3); pub const E6: Square = Square::at(2, 4); pub const F6: Square = Square::at(2, 5); pub const G6: Square = Square::at(2, 6); pub const H6: Square = Square::at(2, 7);
    pub const A5: Square = Square::at(3, 0); pub const B5: Square = Square::at(3, 1); pub const C5: Square = Square::at(3, 2); pub const D5: Square = Square::at(3, 3); pub const E5: Square = Square::at(3, 4); pub const F5: Square = Square::at(3, 5); pub const G5: Square = Square::at(3, 6); pub const H5: Square = Square::at(3, 7);
    pub const A4: Square = Square::at(4, 0); pub const B4: Square = Square::at(4, 1); pub const C4: Square = Square::at(4, 2); pub const D4: Square = Square::at(4, 3); pub const E4: Square = Square::at(4, 4); pub const F4: Square = Square::at(4, 5); pub const G4: Square = Square::at(4, 6); pub const H4: Square = Square::at(4, 7);
    pub const A3: Square = Square::at(5, 0); pub const B3: Square = Square::at(5, 1); pub const C3: Square = Square::at(5, 2); pub const D3: Square = Square::at(5, 3); pub const E3: Square = Square::at(5, 4); pub const F3: Square = Square::at(5, 5); pub const G3: Square = Square::at(5, 6); pub const H3: Square = Square::at(5, 7);
    pub const A2: Square = Square::at(6, 0); pub const B2: Square = Square::at(6, 1); pub const C2: Square = Square::at(6, 2); pub const D2: Square = Square::at(6, 3); pub const E2: Square = Square::at(6, 4); pub const F2: Square = Square::at(6, 5); pub const G2: Square = Square::at(6, 6); pub const H2: Square = Square::at(6, 7);
    pub const A1: Square = Square::at(7, 0); pub const B1: Square = Square::at(7, 1); pub const C1: Square = Square::at(7, 2); pub const D1: Square = Square::at(7, 3); pub const E1: Square = Square::at(7, 4); pub const F1: Square = Square::at(7, 5); pub const G1: Square = Square::at(7, 6); pub const H1: Square = Square::at(7, 7);
}

impl Move {
    /// A plain move or capture.
    pub const fn new(
        start: Square,
        end: Square,
        piece_moved: Piece,
        piece_captured: Option<Piece>,
    ) -> Self {
        Self {
            start,
            end,
            piece_moved,
            piece_captured,
            is_en_passant: false,
            is_pawn_promotion: false,
            is_castle: false,
            promotion: None,
        }
    }

    /// An en passant capture. The captured pawn is beside `start`, not on `end`.
    pub const fn en_passant(start: Square, end: Square, piece_moved: Piece) -> Self {
        let captured = Piece::new(
            match piece_moved.color {
                Color::White => Color::Black,
                Color::Black => Color::White,
            },
            PieceKind::Pawn,
        );
        let mut move_ = Self::new(start, end, piece_moved, Some(captured));
        move_.is_en_passant = true;
        move_
    }

    /// A castling king move. The rook relocation is implied by the direction.
    pub const fn castle(start: Square, end: Square, piece_moved: Piece) -> Self {
        let mut move_ = Self::new(start, end, piece_moved, None);
        move_.is_castle = true;
        move_
    }

    /// Marks this move as a pawn reaching its promotion row.
    pub const fn with_pawn_promotion(mut self) -> Self {
        self.is_pawn_promotion = true;
        self
    }

    /// Selects the promotion piece kind, overriding the game's promotion choice.
    pub const fn with_promotion(mut self, piece_kind: PieceKind) -> Self {
        self.promotion = Some(piece_kind);
        self
    }

    // Immutable Getters
    pub const fn start(&self) -> Square {
        self.start
    }
    pub const fn end(&self) -> Square {
        self.end
    }
    pub const fn piece_moved(&self) -> Piece {
        self.piece_moved
    }
    pub const fn piece_captured(&self) -> Option<Piece> {
        self.piece_captured
    }
    pub const fn is_en_passant(&self) -> bool {
        self.is_en_passant
    }
    pub const fn is_pawn_promotion(&self) -> bool {
        self.is_pawn_promotion
    }
    pub const fn is_castle(&self) -> bool {
        self.is_castle
    }
    pub const fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    pub const fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    /// Human readable description, "White Knight -> b1c3".
    pub fn notation(&self) -> String {
        format!(
            "{} {} -> {}{}",
            self.piece_moved.color.name(),
            self.piece_moved.piece_kind.name(),
            self.start,
            self.end
        )
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.is_en_passant == other.is_en_passant
            && self.is_pawn_promotion == other.is_pawn_promotion
            && self.is_castle == other.is_castle
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
        self.is_en_passant.hash(state);
        self.is_pawn_promotion.hash(state);
        self.is_castle.hash(state);
    }
}

/// Pure coordinate notation.
/// # Example
/// A White pawn from e7 to e8 that promoted to a Queen -> `e7e8q`.
impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.start, self.end)?;
        if let (true, Some(piece_kind)) = (self.is_pawn_promotion, self.promotion) {
            f.write_char(piece_kind.to_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::squares::*;
    use super::*;

    #[test]
    fn logical_not_color() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!Color::Black, Color::White);
    }

    #[test]
    fn sliding_piece_kinds() {
        assert!(PieceKind::Queen.is_sliding());
        assert!(PieceKind::Rook.is_sliding());
        assert!(PieceKind::Bishop.is_sliding());
        assert!(!PieceKind::Knight.is_sliding());
        assert!(!PieceKind::King.is_sliding());
        assert!(!PieceKind::Pawn.is_sliding());
    }

    #[test]
    fn castling_logical_ops() {
        let mut cr = Castling::default();
        assert!(cr.has(Castling::ALL));
        assert!(cr.has(Castling::W_SIDE));
        assert!(cr.has(Castling::B_SIDE));

        cr.clear(Castling::W_KING);
        assert!(!cr.has(Castling::ALL));
        assert!(!cr.has(Castling::W_KING));
        assert!(cr.has(Castling::W_QUEEN));
        assert!(!cr.has(Castling::W_SIDE));
        assert!(cr.has(Castling::B_SIDE));

        cr.clear_color(Color::Black);
        assert!(!cr.has(Castling::B_KING));
        assert!(!cr.has(Castling::B_QUEEN));
        assert!(cr.has(Castling::W_QUEEN));

        cr.clear(Castling::queen_side(Color::White));
        assert!(cr.is_none());
    }

    #[test]
    fn castling_to_from_string() {
        assert_eq!("-".parse::<Castling>().unwrap(), Castling::NONE);
        assert_eq!("K".parse::<Castling>().unwrap(), Castling::W_KING);
        assert_eq!("KQkq".parse::<Castling>().unwrap(), Castling::ALL);
        assert!("".parse::<Castling>().is_err());
        assert!("x".parse::<Castling>().is_err());
        assert_eq!(Castling::ALL.to_string(), "KQkq");
        assert_eq!(Castling::NONE.to_string(), "-");
        assert_eq!(Castling::B_QUEEN.to_string(), "q");
    }

    #[test]
    fn square_rows_and_cols() {
        assert_eq!((A8.row(), A8.col()), (0, 0));
        assert_eq!((H1.row(), H1.col()), (7, 7));
        assert_eq!((E2.row(), E2.col()), (6, 4));
        assert_eq!(Square::new(6, 4), Some(E2));
        assert_eq!(Square::new(8, 0), None);
        assert_eq!(Square::new(0, 8), None);
        assert_eq!(Square::iter().count(), NUM_SQUARES);
        assert_eq!(Square::iter().next(), Some(A8));
        assert_eq!(Square::iter().last(), Some(H1));
    }

    #[test]
    fn square_to_from_string() {
        assert_eq!("a1".parse::<Square>().unwrap(), A1);
        assert_eq!("h8".parse::<Square>().unwrap(), H8);
        assert_eq!("e4".parse::<Square>().unwrap(), E4);
        assert!("A1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("g".parse::<Square>().is_err());
        assert!("e44".parse::<Square>().is_err());
        assert_eq!(B7.to_string(), "b7");
        assert_eq!(C3.to_string(), "c3");
    }

    #[test]
    fn square_offset_stays_on_board() {
        assert_eq!(E2.offset((-1, 0), 2), Some(E4));
        assert_eq!(A1.offset((1, 0), 1), None);
        assert_eq!(H8.offset((0, 1), 1), None);
        assert_eq!(D4.offset((-1, 1), 3), Some(G7));
        assert_eq!(D4.offset((-1, 1), 5), None);
    }

    #[test]
    fn move_equality_ignores_promotion_kind() {
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        let queen = Move::new(E7, E8, pawn, None).with_pawn_promotion();
        let knight = queen.with_promotion(PieceKind::Knight);
        assert_eq!(queen, knight);

        let plain = Move::new(E7, E8, pawn, None);
        assert_ne!(queen, plain);
    }

    #[test]
    fn move_display_and_notation() {
        let knight = Piece::new(Color::White, PieceKind::Knight);
        let move_ = Move::new(B1, C3, knight, None);
        assert_eq!(move_.to_string(), "b1c3");
        assert_eq!(move_.notation(), "White Knight -> b1c3");

        let pawn = Piece::new(Color::Black, PieceKind::Pawn);
        let promotion = Move::new(A2, A1, pawn, None)
            .with_pawn_promotion()
            .with_promotion(PieceKind::Queen);
        assert_eq!(promotion.to_string(), "a2a1q");
        assert_eq!(promotion.notation(), "Black Pawn -> a2a1");
    }

    #[test]
    fn en_passant_captures_opposite_pawn() {
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        let move_ = Move::en_passant(E5, D6, pawn);
        assert!(move_.is_en_passant());
        assert_eq!(
            move_.piece_captured(),
            Some(Piece::new(Color::Black, PieceKind::Pawn))
        );
    }

    #[test]
    fn cp_leading() {
        assert_eq!(Cp(40).leading(), Some(Color::White));
        assert_eq!(Cp(-1).leading(), Some(Color::Black));
        assert_eq!(Cp(0).leading(), None);
        assert_eq!(Cp(40) * Color::Black.sign(), Cp(-40));
    }
}
