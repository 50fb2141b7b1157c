//! Pin and check detection by ray casting out from a square.
//!
//! Used on the king square for legal move generation, and on candidate squares
//! to test whether a king could stand there.

use arrayvec::ArrayVec;

use crate::boardrepr::Mailbox;
use crate::coretypes::{Color, Direction, PieceKind, Square};
use crate::movegen::tables::{
    is_orthogonal, pawn_attacker_directions, COMPASS, KNIGHT_OFFSETS, MAX_DISTANCE,
};

/// A friendly piece that may only move along `direction` or its reverse.
/// `direction` points from the king toward the pinned piece.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PinRecord {
    pub square: Square,
    pub direction: Direction,
}

/// An enemy piece attacking the origin square.
/// `direction` points from the origin toward the checker, or is the knight jump for knights.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CheckRecord {
    pub square: Square,
    pub direction: Direction,
}

/// At most one pin per compass ray.
pub type Pins = ArrayVec<PinRecord, 8>;
/// At most one checker per compass ray and one per knight jump.
pub type Checks = ArrayVec<CheckRecord, 16>;

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct PinsAndChecks {
    pub in_check: bool,
    pub pins: Pins,
    pub checks: Checks,
}

/// Returns true if a piece standing `distance` steps away in `direction`
/// from the origin attacks the origin.
fn attacks_along(piece_kind: PieceKind, color: Color, direction: Direction, distance: i8) -> bool {
    match piece_kind {
        PieceKind::Rook => is_orthogonal(direction),
        PieceKind::Bishop => !is_orthogonal(direction),
        PieceKind::Queen => true,
        PieceKind::King => distance == 1,
        PieceKind::Pawn => distance == 1 && pawn_attacker_directions(color).contains(&direction),
        PieceKind::Knight => false,
    }
}

/// Finds every pin against and check on `origin`, from the point of view of `us`.
///
/// Rays are cast in all eight directions. The first friendly piece on a ray is a
/// candidate pin and a second friendly piece ends the ray. Our own king is
/// transparent so that a king stepping back along a checking ray is still seen
/// as attacked. The first enemy piece ends the ray: if it attacks along that ray
/// it is a check, or a pin when a friendly piece stands between.
/// Knight jumps are probed separately.
pub fn pins_and_checks(board: &Mailbox, origin: Square, us: Color) -> PinsAndChecks {
    let mut found = PinsAndChecks::default();

    for direction in COMPASS {
        let mut possible_pin: Option<Square> = None;

        for distance in 1..=MAX_DISTANCE {
            let Some(square) = origin.offset(direction, distance) else {
                break;
            };
            let Some(piece) = board[square] else {
                continue;
            };

            if piece.color == us {
                if piece.piece_kind == PieceKind::King {
                    continue;
                }
                if possible_pin.is_some() {
                    break;
                }
                possible_pin = Some(square);
                continue;
            }

            if attacks_along(piece.piece_kind, piece.color, direction, distance) {
                match possible_pin {
                    None => {
                        found.in_check = true;
                        found.checks.push(CheckRecord { square, direction });
                    }
                    Some(pinned) => found.pins.push(PinRecord {
                        square: pinned,
                        direction,
                    }),
                }
            }
            break;
        }
    }

    for jump in KNIGHT_OFFSETS {
        let Some(square) = origin.offset(jump, 1) else {
            continue;
        };
        if let Some(piece) = board[square] {
            if piece.color != us && piece.piece_kind == PieceKind::Knight {
                found.in_check = true;
                found.checks.push(CheckRecord {
                    square,
                    direction: jump,
                });
            }
        }
    }

    found
}

/// Returns true if any enemy of `us` attacks `square`.
pub fn is_attacked(board: &Mailbox, square: Square, us: Color) -> bool {
    pins_and_checks(board, square, us).in_check
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::squares::*;
    use crate::coretypes::Piece;

    fn board_with(pieces: &[(Square, Color, PieceKind)]) -> Mailbox {
        let mut board = Mailbox::new();
        for &(square, color, piece_kind) in pieces {
            board[square] = Some(Piece::new(color, piece_kind));
        }
        board
    }

    #[test]
    fn start_position_has_no_pins_or_checks() {
        let board = Mailbox::start_position();
        let found = pins_and_checks(&board, E1, Color::White);
        assert_eq!(found, PinsAndChecks::default());
    }

    #[test]
    fn rook_check_and_bishop_pin() {
        use Color::*;
        use PieceKind::*;
        let board = board_with(&[
            (E1, White, King),
            (E8, Black, Rook),
            (D2, White, Knight),
            (B4, Black, Bishop),
        ]);
        let found = pins_and_checks(&board, E1, White);
        assert!(found.in_check);
        assert_eq!(
            found.checks.as_slice(),
            &[CheckRecord {
                square: E8,
                direction: (-1, 0)
            }]
        );
        assert_eq!(
            found.pins.as_slice(),
            &[PinRecord {
                square: D2,
                direction: (-1, -1)
            }]
        );
    }

    #[test]
    fn two_friendly_blockers_break_the_ray() {
        use Color::*;
        use PieceKind::*;
        let board = board_with(&[
            (E1, White, King),
            (E2, White, Pawn),
            (E3, White, Knight),
            (E8, Black, Queen),
        ]);
        let found = pins_and_checks(&board, E1, White);
        assert!(!found.in_check);
        assert!(found.pins.is_empty());
    }

    #[test]
    fn wrong_slider_does_not_attack() {
        use Color::*;
        use PieceKind::*;
        let board = board_with(&[(E1, White, King), (E5, Black, Bishop), (A5, Black, Rook)]);
        assert!(!is_attacked(&board, E1, White));
    }

    #[test]
    fn pawn_attacks_only_forward_diagonally() {
        use Color::*;
        use PieceKind::*;
        let board = board_with(&[(E4, White, King), (D5, Black, Pawn), (F3, Black, Pawn)]);
        let found = pins_and_checks(&board, E4, White);
        assert_eq!(
            found.checks.as_slice(),
            &[CheckRecord {
                square: D5,
                direction: (-1, -1)
            }]
        );

        let board = board_with(&[(E5, Black, King), (D4, White, Pawn), (E4, White, Pawn)]);
        assert!(is_attacked(&board, E5, Black));
        let board = board_with(&[(E5, Black, King), (E4, White, Pawn)]);
        assert!(!is_attacked(&board, E5, Black));
    }

    #[test]
    fn knights_and_kings_attack_adjacent() {
        use Color::*;
        use PieceKind::*;
        let board = board_with(&[(E1, White, King), (F3, Black, Knight)]);
        let found = pins_and_checks(&board, E1, White);
        assert_eq!(found.checks.len(), 1);
        assert_eq!(found.checks[0].square, F3);

        let board = board_with(&[(E1, White, King), (E3, Black, King)]);
        assert!(is_attacked(&board, E2, White));
        assert!(!is_attacked(&board, E1, White));
    }

    #[test]
    fn own_king_is_transparent() {
        use Color::*;
        use PieceKind::*;
        // The king on e1 stepping to f1 would still be on the a1-h1 rook ray.
        let board = board_with(&[(E1, White, King), (A1, Black, Rook)]);
        assert!(is_attacked(&board, F1, White));
    }

    #[test]
    fn double_check() {
        use Color::*;
        use PieceKind::*;
        let board = board_with(&[(E1, White, King), (E8, Black, Rook), (D3, Black, Knight)]);
        let found = pins_and_checks(&board, E1, White);
        assert!(found.in_check);
        assert_eq!(found.checks.len(), 2);
    }
}
