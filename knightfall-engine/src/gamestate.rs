//! Holds GameState, the most important data structure for the engine.
//! GameState owns the board and every piece of history needed to undo moves.

use std::fmt::{self, Display};

use tracing::debug;

use crate::boardrepr::Mailbox;
use crate::coretypes::{Castling, Color, Move, Piece, PieceKind, Square};
use crate::error::{self, ErrorKind};
use crate::movegen::{self, Checks, Pins};
use crate::movelist::{MoveList, MoveRecord};

/// struct GameState
/// A chess game in progress, mutated in place by `make_move` and `undo_move`.
/// # Members:
/// * board - square-centric piece placement.
/// * side_to_move - Color of player whose turn it is.
/// * move_log - every applied move, in order.
/// * white_king, black_king - king locations, kept in sync with the board.
/// * castling, castling_log - current castling rights and their per-ply history.
/// * en_passant, en_passant_log - current en passant target and its per-ply history.
/// * in_check, pins, checks - computed by the last legal move generation.
/// * check_mate, stale_mate - terminal flags set by the last legal move generation.
/// * promotion_choice - piece a pawn promotes to when the move does not name one.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) board: Mailbox,
    pub(crate) side_to_move: Color,
    pub(crate) move_log: Vec<Move>,
    pub(crate) white_king: Square,
    pub(crate) black_king: Square,
    pub(crate) castling: Castling,
    pub(crate) castling_log: Vec<Castling>,
    pub(crate) en_passant: Option<Square>,
    pub(crate) en_passant_log: Vec<Option<Square>>,
    pub(crate) in_check: bool,
    pub(crate) pins: Pins,
    pub(crate) checks: Checks,
    pub(crate) check_mate: bool,
    pub(crate) stale_mate: bool,
    pub promotion_choice: PieceKind,
}

impl GameState {
    /// Standard chess start position, White to move.
    pub fn start_position() -> Self {
        use crate::coretypes::squares::{E1, E8};
        Self::from_parts(
            Mailbox::start_position(),
            Color::White,
            Castling::start_position(),
            None,
            E1,
            E8,
        )
    }

    /// Assembles a game from a position with no move history.
    pub(crate) fn from_parts(
        board: Mailbox,
        side_to_move: Color,
        castling: Castling,
        en_passant: Option<Square>,
        white_king: Square,
        black_king: Square,
    ) -> Self {
        Self {
            board,
            side_to_move,
            move_log: Vec::new(),
            white_king,
            black_king,
            castling,
            castling_log: vec![castling],
            en_passant,
            en_passant_log: vec![en_passant],
            in_check: false,
            pins: Pins::new(),
            checks: Checks::new(),
            check_mate: false,
            stale_mate: false,
            promotion_choice: PieceKind::Queen,
        }
    }

    /// Const getters.
    pub fn board(&self) -> &Mailbox {
        &self.board
    }
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }
    pub fn castling(&self) -> Castling {
        self.castling
    }
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }
    pub fn in_check(&self) -> bool {
        self.in_check
    }
    pub fn pins(&self) -> &Pins {
        &self.pins
    }
    pub fn checks(&self) -> &Checks {
        &self.checks
    }
    pub fn is_checkmate(&self) -> bool {
        self.check_mate
    }
    pub fn is_stalemate(&self) -> bool {
        self.stale_mate
    }

    pub fn king_square(&self, color: Color) -> Square {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    fn set_king_square(&mut self, color: Color, square: Square) {
        match color {
            Color::White => self.white_king = square,
            Color::Black => self.black_king = square,
        }
    }

    /// Returns the full legal move set for the side to move.
    /// Updates the in_check, pins, checks, check_mate and stale_mate fields.
    pub fn legal_moves(&mut self) -> MoveList {
        movegen::legal_moves(self)
    }

    /// Apply a move to self, in place.
    /// `make_move` does not check if the move is legal or not,
    /// it simply executes it while assuming legality.
    pub fn make_move(&mut self, move_: Move) {
        let mover = move_.piece_moved;
        let mut logged = move_;

        self.board[move_.start] = None;
        if move_.is_pawn_promotion {
            let piece_kind = move_.promotion.unwrap_or(self.promotion_choice);
            logged = move_.with_promotion(piece_kind);
            self.board[move_.end] = Some(Piece::new(mover.color, piece_kind));
        } else {
            self.board[move_.end] = Some(mover);
        }

        if mover.piece_kind == PieceKind::King {
            self.set_king_square(mover.color, move_.end);
        }

        if move_.is_en_passant {
            if let Some(captured_square) = en_passant_capture_square(&move_) {
                self.board[captured_square] = None;
            }
        }

        if move_.is_castle {
            if let Some((rook_from, rook_to)) = castle_rook_squares(&move_) {
                self.board[rook_to] = self.board[rook_from].take();
            }
        }

        // A double pawn advance leaves the skipped square as the target.
        self.en_passant = match mover.piece_kind {
            PieceKind::Pawn if move_.start.row().abs_diff(move_.end.row()) == 2 => {
                Square::new((move_.start.row() + move_.end.row()) / 2, move_.start.col())
            }
            _ => None,
        };
        self.en_passant_log.push(self.en_passant);

        self.update_castling(&move_);
        self.castling_log.push(self.castling);

        self.move_log.push(logged);
        self.side_to_move = !self.side_to_move;
    }

    /// Undo the last applied move, in place.
    /// Returns the undone move, or None if no move has been played.
    pub fn undo_move(&mut self) -> Option<Move> {
        let move_ = self.move_log.pop()?;
        let mover = move_.piece_moved;
        self.side_to_move = !self.side_to_move;

        self.board[move_.start] = Some(mover);
        self.board[move_.end] = move_.piece_captured;

        if mover.piece_kind == PieceKind::King {
            self.set_king_square(mover.color, move_.start);
        }

        if move_.is_en_passant {
            self.board[move_.end] = None;
            if let Some(captured_square) = en_passant_capture_square(&move_) {
                self.board[captured_square] = move_.piece_captured;
            }
        }

        if move_.is_castle {
            if let Some((rook_from, rook_to)) = castle_rook_squares(&move_) {
                self.board[rook_from] = self.board[rook_to].take();
            }
        }

        self.en_passant_log.pop();
        self.en_passant = self.en_passant_log.last().copied().flatten();

        self.castling_log.pop();
        if let Some(&castling) = self.castling_log.last() {
            self.castling = castling;
        }

        self.check_mate = false;
        self.stale_mate = false;

        Some(move_)
    }

    /// Castling rights are lost once a king or rook leaves its home square,
    /// or a rook is captured on its home square.
    fn update_castling(&mut self, move_: &Move) {
        if let Some(captured) = move_.piece_captured {
            if captured.piece_kind == PieceKind::Rook {
                self.clear_rook_rights(captured.color, move_.end);
            }
        }

        let mover = move_.piece_moved;
        match mover.piece_kind {
            PieceKind::King => self.castling.clear_color(mover.color),
            PieceKind::Rook => self.clear_rook_rights(mover.color, move_.start),
            _ => (),
        }
    }

    fn clear_rook_rights(&mut self, color: Color, square: Square) {
        if square.row() != color.home_row() {
            return;
        }
        match square.col() {
            0 => self.castling.clear(Castling::queen_side(color)),
            7 => self.castling.clear(Castling::king_side(color)),
            _ => (),
        }
    }

    /// Checks if move is legal before applying it.
    /// A move that is not in the legal move set is rejected without mutating self.
    /// A promotion kind carried by `move_` overrides `promotion_choice`.
    pub fn do_legal_move(&mut self, move_: Move) -> error::Result<Move> {
        let legal_moves = self.legal_moves();
        match legal_moves.iter().find(|legal| **legal == move_) {
            Some(&legal) => {
                let chosen = match (legal.is_pawn_promotion, move_.promotion) {
                    (true, Some(piece_kind)) => legal.with_promotion(piece_kind),
                    _ => legal,
                };
                self.make_move(chosen);
                Ok(chosen)
            }
            None => {
                debug!(%move_, "rejected illegal move");
                Err((ErrorKind::IllegalMove, move_).into())
            }
        }
    }

    /// Finds the legal move described by a record in the current position.
    /// Moved and captured pieces and the special move flags come from the board.
    pub fn move_from_record(&mut self, record: &MoveRecord) -> error::Result<Move> {
        let legal_moves = self.legal_moves();
        let legal = legal_moves
            .iter()
            .find(|legal| legal.start == record.start && legal.end == record.end)
            .copied()
            .ok_or_else(|| error::Error::from((ErrorKind::IllegalMove, record)))?;

        Ok(match (legal.is_pawn_promotion, record.promotion) {
            (true, Some(piece_kind)) => legal.with_promotion(piece_kind),
            _ => legal,
        })
    }
}

/// Square of the pawn removed by an en passant capture.
fn en_passant_capture_square(move_: &Move) -> Option<Square> {
    Square::new(move_.start.row(), move_.end.col())
}

/// Rook (from, to) squares implied by a castling king move.
fn castle_rook_squares(move_: &Move) -> Option<(Square, Square)> {
    let (end, king_side) = (move_.end, move_.end.col() > move_.start.col());
    if king_side {
        Some((end.offset((0, 1), 1)?, end.offset((0, -1), 1)?))
    } else {
        Some((end.offset((0, -1), 2)?, end.offset((0, 1), 1)?))
    }
}

/// Defaults to standard chess start position.
impl Default for GameState {
    fn default() -> Self {
        Self::start_position()
    }
}

/// Two games are equal when their positions and histories match.
/// Values cached by legal move generation are ignored.
impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.side_to_move == other.side_to_move
            && self.white_king == other.white_king
            && self.black_king == other.black_king
            && self.castling == other.castling
            && self.en_passant == other.en_passant
            && self.move_log == other.move_log
            && self.castling_log == other.castling_log
            && self.en_passant_log == other.en_passant_log
    }
}

impl Eq for GameState {}

/// Displays pretty-printed chess board and Fen string representing GameState.
impl Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use crate::fen::Fen;
        write!(f, "{}\n Fen: {}\n", self.board, self.to_fen())
    }
}
