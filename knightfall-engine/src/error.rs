//! Knightfall Engine error type.

use std::error;
use std::fmt::{self, Display};
use std::result;

/// Knightfall Engine generic result type.
pub type Result<T> = result::Result<T, Error>;

/// A list specifying general errors for Knightfall engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Square parse string malformed.
    ParseSquareMalformed,
    /// File parse string malformed.
    ParseFileMalformed,
    /// Rank parse string malformed.
    ParseRankMalformed,
    /// Color parse string malformed.
    ParseColorMalformed,
    /// Piece parse string malformed.
    ParsePieceMalformed,
    /// Castling parse string malformed.
    ParseCastlingMalformed,
    /// Move record or coordinate notation malformed.
    ParseMoveMalformed,
    /// Search algorithm name malformed.
    ParseAlgorithmMalformed,
    /// Fen string malformed.
    Fen,

    /// A move was submitted that is not in the legal move set of the position.
    IllegalMove,
    /// A move was undone with no moves in the move log.
    EmptyMoveLog,
    /// A best move was requested for a position with no legal moves.
    NoLegalMoves,

    /// A background search was requested while another is still running.
    EngineAlreadySearching,
    /// The background search ended without delivering a result.
    SearchDisconnected,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ParseSquareMalformed => "parse square malformed",
            ErrorKind::ParseFileMalformed => "parse file malformed",
            ErrorKind::ParseRankMalformed => "parse rank malformed",
            ErrorKind::ParseColorMalformed => "parse color malformed",
            ErrorKind::ParsePieceMalformed => "parse piece malformed",
            ErrorKind::ParseCastlingMalformed => "parse castling malformed",
            ErrorKind::ParseMoveMalformed => "parse move malformed",
            ErrorKind::ParseAlgorithmMalformed => "parse algorithm malformed",
            ErrorKind::Fen => "fen",

            ErrorKind::IllegalMove => "illegal move",
            ErrorKind::EmptyMoveLog => "empty move log",
            ErrorKind::NoLegalMoves => "no legal moves",

            ErrorKind::EngineAlreadySearching => "engine already searching",
            ErrorKind::SearchDisconnected => "search disconnected",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The primary and general error type for the Knightfall Engine.
#[derive(Debug)]
pub enum Error {
    Simple(ErrorKind),
    Message(ErrorKind, String),
    Custom(ErrorKind, Box<dyn error::Error + Send + Sync>),
}

impl Error {
    pub fn new<E>(error_kind: ErrorKind, inner_error: E) -> Self
    where
        E: Into<Box<dyn error::Error + Send + Sync>>,
    {
        Self::Custom(error_kind, inner_error.into())
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Simple(error_kind)
            | Error::Message(error_kind, _)
            | Error::Custom(error_kind, _) => *error_kind,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Simple(error_kind) => {
                write!(f, "{error_kind}")
            }
            Error::Message(error_kind, string) => {
                write!(f, "{error_kind}: {string}")
            }
            Error::Custom(error_kind, ref box_error) => {
                write!(f, "{error_kind}, error: {}", *box_error)
            }
        }
    }
}

impl error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(error_kind: ErrorKind) -> Self {
        Self::Simple(error_kind)
    }
}

impl<S: ToString> From<(ErrorKind, S)> for Error {
    fn from((error_kind, stringable): (ErrorKind, S)) -> Self {
        Self::Message(error_kind, stringable.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_and_kind() {
        let simple = Error::from(ErrorKind::IllegalMove);
        assert_eq!(simple.to_string(), "illegal move");
        assert_eq!(simple.kind(), ErrorKind::IllegalMove);

        let message = Error::from((ErrorKind::Fen, "missing side to move"));
        assert_eq!(message.to_string(), "fen: missing side to move");
        assert_eq!(message.kind(), ErrorKind::Fen);

        let custom = Error::new(ErrorKind::ParseMoveMalformed, "bad square");
        assert_eq!(custom.to_string(), "parse move malformed, error: bad square");
    }
}
