//! Engine struct acts as a simplified API for the search parts of the Knightfall engine.

use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::coretypes::{Move, PlyKind};
use crate::error::{self, ErrorKind};
use crate::evaluation;
use crate::gamestate::GameState;
use crate::movelist::MoveList;
use crate::search::{self, SearchResult};

/// Search depth of a default engine.
pub const DEFAULT_DEPTH: PlyKind = 3;

/// The move selection strategy of an Engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Algorithm {
    /// Negamax with alpha-beta pruning.
    #[default]
    Negamax,
    /// Minimax with alpha-beta pruning and explicit maxing and minning players.
    Minimax,
    /// Best move against the opponent's best reply, ignoring depth.
    Greedy,
    /// Any legal move.
    Random,
}

impl Algorithm {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Negamax => "negamax",
            Algorithm::Minimax => "minimax",
            Algorithm::Greedy => "greedy",
            Algorithm::Random => "random",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        match s {
            "negamax" => Ok(Algorithm::Negamax),
            "minimax" => Ok(Algorithm::Minimax),
            "greedy" => Ok(Algorithm::Greedy),
            "random" => Ok(Algorithm::Random),
            _ => Err((
                ErrorKind::ParseAlgorithmMalformed,
                "expected negamax|minimax|greedy|random",
            )
                .into()),
        }
    }
}

/// EngineBuilder allows for parameters of an Engine to be set and built once.
///
/// Default values:
///
/// * `depth`: 3
/// * `seed`: None, seeded from entropy
/// * `positional`: true
/// * `algorithm`: Negamax
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EngineBuilder {
    depth: PlyKind,
    seed: Option<u64>,
    positional: bool,
    algorithm: Algorithm,
}

impl EngineBuilder {
    /// Create a new default EngineBuilder.
    pub fn new() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            seed: None,
            positional: true,
            algorithm: Algorithm::default(),
        }
    }

    /// Create and return a new Engine.
    pub fn build(&self) -> Engine {
        Engine {
            depth: self.depth,
            positional: self.positional,
            algorithm: self.algorithm,
            rng: make_rng(self.seed),
            search_handle: None,
        }
    }

    /// Set the engine's search depth in plies. A depth of 0 is raised to 1.
    pub fn depth(mut self, depth: PlyKind) -> Self {
        self.depth = depth.max(1);
        self
    }

    /// Seed the engine's move shuffling for reproducible play.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set whether evaluation adds the positional table term.
    pub fn positional(mut self, positional: bool) -> Self {
        self.positional = positional;
        self
    }

    /// Set the move selection strategy.
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Engine wraps up all parameters required for choosing a move.
///
/// Root moves are shuffled before every search so that equally good moves
/// are not always chosen in the same order.
#[derive(Debug)]
pub struct Engine {
    depth: PlyKind,
    positional: bool,
    algorithm: Algorithm,
    rng: StdRng,

    search_handle: Option<JoinHandle<()>>,
}

impl Engine {
    pub fn new() -> Self {
        EngineBuilder::new().build()
    }

    /// Const getters.
    pub fn depth(&self) -> PlyKind {
        self.depth
    }
    pub fn positional(&self) -> bool {
        self.positional
    }
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Update the search depth. A depth of 0 is raised to 1.
    pub fn set_depth(&mut self, depth: PlyKind) {
        self.depth = depth.max(1);
    }

    /// Reseed the move shuffling.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn set_positional(&mut self, positional: bool) {
        self.positional = positional;
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    /// Run a blocking search on the live game state.
    ///
    /// `legal_moves` must be the legal moves of `state`. The state is mutated
    /// during search and restored before returning, with its check and
    /// terminal caches regenerated for the root position.
    /// Returns Err if there are no legal moves to choose from.
    pub fn search(
        &mut self,
        state: &mut GameState,
        legal_moves: &[Move],
    ) -> error::Result<SearchResult> {
        if legal_moves.is_empty() {
            return Err((ErrorKind::NoLegalMoves, "check for checkmate or stalemate first").into());
        }

        let mut moves: MoveList = legal_moves.iter().copied().collect();
        moves.shuffle(&mut self.rng);

        debug!(
            "[SEARCH] {} to move, {} moves, {} at depth {}",
            state.side_to_move().name(),
            moves.len(),
            self.algorithm,
            self.depth
        );

        let found = match self.algorithm {
            Algorithm::Negamax => search::negamax(state, &moves, self.depth, self.positional),
            Algorithm::Minimax => search::minimax(state, &moves, self.depth, self.positional),
            Algorithm::Greedy => search::greedy(state, &moves, self.positional),
            Algorithm::Random => None,
        };

        let result = match found {
            Some(result) => result,
            None => self.random_result(state, &moves)?,
        };
        state.legal_moves();

        info!(
            "[SEARCH] {} chose {} with score {} after {} nodes in {:?}",
            result.player.name(),
            result.best_move,
            result.score,
            result.nodes,
            result.elapsed
        );
        Ok(result)
    }

    /// Returns the best move of a blocking search.
    pub fn best_move(&mut self, state: &mut GameState, legal_moves: &[Move]) -> error::Result<Move> {
        self.search(state, legal_moves)
            .map(|result| result.best_move)
    }

    fn random_result(&mut self, state: &GameState, moves: &[Move]) -> error::Result<SearchResult> {
        let instant = Instant::now();
        let best_move =
            search::find_random_move(moves, &mut self.rng).ok_or(ErrorKind::NoLegalMoves)?;

        Ok(SearchResult {
            best_move,
            score: evaluation::evaluate_abs(state, self.positional),
            player: state.side_to_move(),
            depth: 0,
            nodes: 1,
            elapsed: instant.elapsed(),
        })
    }

    /// Run a non-blocking search on a private copy of `state`.
    ///
    /// The result is sent over `sender` once the search thread finishes.
    /// Only one background search runs at a time.
    pub fn search_nonblocking(
        &mut self,
        state: &GameState,
        sender: Sender<error::Result<SearchResult>>,
    ) -> error::Result<()> {
        if !self.ready() {
            return Err((ErrorKind::EngineAlreadySearching, "failed to begin search").into());
        }
        self.wait();

        let mut worker = Engine {
            depth: self.depth,
            positional: self.positional,
            algorithm: self.algorithm,
            rng: StdRng::seed_from_u64(self.rng.gen()),
            search_handle: None,
        };
        let mut state = state.clone();

        let handle = thread::spawn(move || {
            let legal_moves = state.legal_moves();
            let result = worker.search(&mut state, &legal_moves);
            if sender.send(result).is_err() {
                debug!("[SEARCH] receiver dropped before result was sent");
            }
        });
        self.search_handle = Some(handle);

        Ok(())
    }

    /// Run a search on a background thread and block until it is done.
    pub fn search_sync(&mut self, state: &GameState) -> error::Result<SearchResult> {
        let (sender, receiver) = mpsc::channel();
        self.search_nonblocking(state, sender)?;
        self.wait();

        receiver
            .recv()
            .map_err(|_| error::Error::from(ErrorKind::SearchDisconnected))?
    }

    /// Engine blocks thread until search is completed.
    pub fn wait(&mut self) {
        if let Some(handle) = self.search_handle.take() {
            if handle.join().is_err() {
                warn!("[SEARCH] search thread panicked");
            }
        }
    }

    /// Returns true if the engine is ready to start a search.
    /// Only one search may run at a time, so if a search is in progress, engine is not ready.
    pub fn ready(&self) -> bool {
        self.search_handle
            .as_ref()
            .map_or(true, |handle| handle.is_finished())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    #[test]
    fn builder_defaults_and_overrides() {
        let engine = Engine::new();
        assert_eq!(engine.depth(), DEFAULT_DEPTH);
        assert!(engine.positional());
        assert_eq!(engine.algorithm(), Algorithm::Negamax);

        let engine = EngineBuilder::new()
            .depth(0)
            .positional(false)
            .algorithm(Algorithm::Greedy)
            .build();
        assert_eq!(engine.depth(), 1);
        assert!(!engine.positional());
        assert_eq!(engine.algorithm(), Algorithm::Greedy);
    }

    #[test]
    fn algorithm_to_from_string() {
        for algorithm in [
            Algorithm::Negamax,
            Algorithm::Minimax,
            Algorithm::Greedy,
            Algorithm::Random,
        ] {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
        }
        assert!("alphazero".parse::<Algorithm>().is_err());
    }

    #[test]
    fn empty_move_list_is_an_error() {
        let mut state =
            GameState::parse_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        let moves = state.legal_moves();
        let err = Engine::new().best_move(&mut state, &moves).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoLegalMoves);
    }

    #[test]
    fn random_algorithm_plays_legal_moves() {
        let mut engine = EngineBuilder::new()
            .algorithm(Algorithm::Random)
            .seed(3)
            .build();
        let mut state = GameState::start_position();
        let moves = state.legal_moves();
        let result = engine.search(&mut state, &moves).unwrap();
        assert!(moves.contains(&result.best_move));
        assert_eq!(result.depth, 0);
    }

    #[test]
    fn search_sync_runs_on_a_copy() {
        let mut engine = EngineBuilder::new().depth(2).seed(11).build();
        let state = GameState::start_position();
        let result = engine.search_sync(&state).unwrap();
        assert_eq!(state, GameState::start_position());
        assert!(GameState::start_position()
            .legal_moves()
            .contains(&result.best_move));
        assert!(engine.ready());
    }
}
