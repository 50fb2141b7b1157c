//! Performance Test
//!
//! [Perft](https://www.chessprogramming.org/Perft)
//!
//! A simple debugging and testing function used to count
//! the number of nodes at a specific depth.

use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::panic;
use std::sync::{Mutex, PoisonError};
use std::thread;

use tracing::debug;

use crate::coretypes::{Move, PieceKind, PlyKind};
use crate::gamestate::GameState;
use crate::movelist::MoveList;

/// Debugging information about results of perft test.
/// nodes: Number of nodes at lowest depth of perft.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PerftInfo {
    pub nodes: u64,
}

impl PerftInfo {
    fn new(nodes: u64) -> Self {
        PerftInfo { nodes }
    }
}

impl Add for PerftInfo {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        PerftInfo {
            nodes: self.nodes + rhs.nodes,
        }
    }
}

impl AddAssign for PerftInfo {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
    }
}

impl Sum for PerftInfo {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(PerftInfo::default(), Add::add)
    }
}

// Count the number of nodes at a certain depth.
// This ignores higher terminal nodes.
// In other words, it counts the number of paths to the given depth.
// Each promotion choice counts as its own move, matching published perft results.
//
// Each thread owns its own copy of the game, so the caller's state is never shared.
pub fn perft(state: &GameState, ply: PlyKind, threads: usize) -> PerftInfo {
    let mut state = state.clone();

    // Guard easy to calculate inputs.
    if ply == 0 {
        // Ever only 1 position at 0 ply.
        return PerftInfo::new(1);
    } else if ply <= 2 || threads <= 1 {
        // Simple enough to not require threads, or single threaded.
        return perft_recurse(&mut state, ply);
    }
    debug_assert!(ply > 2);
    debug_assert!(threads > 1);

    let legal_moves = state.legal_moves();
    debug!(
        "[PERFT] depth {ply} over {} root moves on {threads} threads",
        legal_moves.len()
    );
    let legal_moves = Mutex::new(legal_moves);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let state = state.clone();
                let legal_moves = &legal_moves;
                scope.spawn(move || perft_executor(state, ply, legal_moves))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|err| panic::resume_unwind(err)))
            .sum()
    })
}

/// perft_executor works by stealing one move at a time from given moves list and running perft on that move.
/// When there are no moves left to steal, this function returns the count it has collected.
/// params:
/// state - game to evaluate moves on.
/// ply - ply of provided position. Must be greater than 1.
/// moves - synchronous access to list of moves to steal from. Moves must be valid for given position.
fn perft_executor(mut state: GameState, ply: PlyKind, moves: &Mutex<MoveList>) -> PerftInfo {
    debug_assert!(ply > 1);
    let steal = || moves.lock().unwrap_or_else(PoisonError::into_inner).pop();
    let mut perft_info = PerftInfo::new(0);

    while let Some(move_) = steal() {
        for choice in promotion_choices(move_) {
            state.make_move(choice);
            perft_info += perft_recurse(&mut state, ply - 1);
            state.undo_move();
        }
    }

    perft_info
}

/// Ply must be non-zero.
fn perft_recurse(state: &mut GameState, ply: PlyKind) -> PerftInfo {
    debug_assert_ne!(ply, 0);
    let legal_moves = state.legal_moves();
    if ply == 1 {
        // If we reach the depth before the end,
        // return the count of legal moves.
        let nodes = legal_moves
            .iter()
            .map(|&legal_move| promotion_choices(legal_move).count() as u64)
            .sum();
        PerftInfo::new(nodes)
    } else {
        let mut perft_info = PerftInfo::new(0);
        for legal_move in legal_moves {
            for choice in promotion_choices(legal_move) {
                state.make_move(choice);
                perft_info += perft_recurse(state, ply - 1);
                state.undo_move();
            }
        }
        perft_info
    }
}

/// A promoting move stands for one move per promotion piece.
fn promotion_choices(move_: Move) -> impl Iterator<Item = Move> {
    static CHOICES: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];
    let promotes = move_.is_pawn_promotion();
    let count = if promotes { CHOICES.len() } else { 1 };
    CHOICES[..count].iter().map(move |&piece_kind| match promotes {
        true => move_.with_promotion(piece_kind),
        false => move_,
    })
}
