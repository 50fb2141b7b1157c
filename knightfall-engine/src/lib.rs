//! Knightfall Engine is a chess rules engine with a depth-limited move search.
//!
//! A [`GameState`] is created once per game and mutated in place by applying and
//! undoing moves. Legal move generation detects pins and checks from the king
//! outward, and flags checkmate and stalemate on the state as a side effect.
//! An [`Engine`] searches the live state with negamax and alpha-beta pruning.
//!
//! ```
//! use knightfall_engine as kf;
//!
//! let mut state = kf::new_game();
//! let moves = kf::legal_moves(&mut state);
//! assert_eq!(moves.len(), 20);
//!
//! let reply = kf::best_move(&mut state, &moves).unwrap();
//! kf::apply_move(&mut state, reply).unwrap();
//! assert_eq!(kf::undo_move(&mut state).unwrap(), reply);
//! ```

pub mod boardrepr;
pub mod coretypes;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod fen;
pub mod gamestate;
pub mod movegen;
pub mod movelist;
pub mod perft;
pub mod search;

pub use boardrepr::Mailbox;
pub use coretypes::{Castling, Color, Cp, Move, Piece, PieceKind, Square};
pub use engine::{Algorithm, Engine, EngineBuilder};
pub use error::{Error, ErrorKind, Result};
pub use fen::Fen;
pub use gamestate::GameState;
pub use movelist::{MoveList, MoveRecord};
pub use perft::{perft, PerftInfo};
pub use search::SearchResult;

/// Standard start position, White to move, all castling rights, no en passant target.
pub fn new_game() -> GameState {
    GameState::start_position()
}

/// Full legal move set of the side to move.
/// Also refreshes `in_check`, `is_checkmate` and `is_stalemate` of the state.
pub fn legal_moves(state: &mut GameState) -> MoveList {
    state.legal_moves()
}

/// Applies `move_` if it is legal, returning Err and leaving `state` unchanged otherwise.
pub fn apply_move(state: &mut GameState, move_: Move) -> Result<()> {
    state.do_legal_move(move_).map(|_| ())
}

/// Undoes the last move, returning it. Returns Err if no move has been played.
pub fn undo_move(state: &mut GameState) -> Result<Move> {
    state.undo_move().ok_or_else(|| ErrorKind::EmptyMoveLog.into())
}

/// Searches for the best of `legal_moves` with a default engine.
/// Returns Err if `legal_moves` is empty.
pub fn best_move(state: &mut GameState, legal_moves: &[Move]) -> Result<Move> {
    Engine::new().best_move(state, legal_moves)
}

/// Human readable rendering of a move, "White Knight -> b1c3".
pub fn notation(move_: &Move) -> String {
    move_.notation()
}
