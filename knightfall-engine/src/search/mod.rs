//! Search functions.
//!
//! Every search borrows the live GameState exclusively, applying and undoing
//! candidate moves in place. The state is left exactly as it was found.
//! Root move order is taken as given; shuffling is the caller's job.

mod greedy;
mod minimax;
mod negamax;

pub use greedy::*;
pub use minimax::*;
pub use negamax::*;

use std::fmt::{self, Display};
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::coretypes::{Color, Cp, Move, PlyKind};

/// The results found from running a search on some root position.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SearchResult {
    /// The best move to make for a position discovered from search.
    pub best_move: Move,
    /// The centipawn score of making the best move, with absolute Cp (+White, -Black).
    pub score: Cp,
    /// The player to move for the root position that was searched.
    pub player: Color,
    /// Depth (aka ply, half move) in plies that was searched.
    pub depth: PlyKind,
    /// Total number of nodes visited in a search.
    pub nodes: u64,
    /// Total time elapsed from the start to the end of a search.
    pub elapsed: Duration,
}

impl SearchResult {
    /// Get average nodes per second of search.
    pub fn nps(&self) -> f64 {
        (self.nodes as f64 / self.elapsed.as_secs_f64()).round()
    }

    /// Converts the score of the search into one that is relative to search's root player.
    pub fn relative_score(&self) -> Cp {
        self.score * self.player.sign()
    }

    /// Converts the score of the search into one that is absolute, with White as + and Black as -.
    pub fn absolute_score(&self) -> Cp {
        self.score
    }

    /// Returns the color who is leading in the search of the root position, or None if drawn.
    pub fn leading(&self) -> Option<Color> {
        self.absolute_score().leading()
    }
}

impl Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "SearchResult {{")?;
        writeln!(f, "    best_move: {}", self.best_move)?;
        writeln!(f, "    abs_score: {}", self.absolute_score())?;
        writeln!(f, "    player   : {}", self.player)?;
        writeln!(f, "    depth    : {}", self.depth)?;
        writeln!(f, "    nodes    : {}", self.nodes)?;
        writeln!(f, "    nps      : {}", self.nps())?;
        writeln!(
            f,
            "    elapsed  : {}.{:03}s",
            self.elapsed.as_secs(),
            self.elapsed.subsec_millis()
        )?;
        write!(f, "}}")
    }
}

/// Uniformly random choice of a legal move.
pub fn find_random_move<R: Rng + ?Sized>(legal_moves: &[Move], rng: &mut R) -> Option<Move> {
    legal_moves.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamestate::GameState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_move_is_legal_and_seeded() {
        let mut state = GameState::start_position();
        let moves = state.legal_moves();

        let first = find_random_move(&moves, &mut StdRng::seed_from_u64(7)).unwrap();
        let second = find_random_move(&moves, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(first, second);
        assert!(moves.contains(&first));

        assert_eq!(find_random_move(&[], &mut StdRng::seed_from_u64(7)), None);
    }
}
