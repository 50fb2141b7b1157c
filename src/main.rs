//! Main CLI interface to Knightfall engine.
//!
//! The human plays White against the engine in the terminal.
//! Set `RUST_LOG=knightfall_engine=debug` to see search logs on stderr.

use std::convert::TryFrom;
use std::io::{self, Write};

use knightfall_engine as kf;
use knightfall_engine::evaluation::evaluate_abs;
use knightfall_engine::{Algorithm, Engine, GameState, MoveRecord, PieceKind};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

enum InputKind {
    Exit,
    Newgame,
    Help,
    Error,
    Undo,
    Moves,
    Depth(u8),
    Seed(u64),
    Promote(PieceKind),
    Algorithm(Algorithm),
    GameMove(MoveRecord),
}

impl From<&str> for InputKind {
    fn from(s: &str) -> Self {
        if let Ok(record) = s.parse::<MoveRecord>() {
            return Self::GameMove(record);
        }

        let mut words = s.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some("exit" | "quit"), None, None) => Self::Exit,
            (Some("newgame" | "ng"), None, None) => Self::Newgame,
            (Some("help"), None, None) => Self::Help,
            (Some("undo"), None, None) => Self::Undo,
            (Some("moves"), None, None) => Self::Moves,
            (Some("depth"), Some(depth), None) => depth.parse().map_or(Self::Error, Self::Depth),
            (Some("seed"), Some(seed), None) => seed.parse().map_or(Self::Error, Self::Seed),
            (Some("algorithm"), Some(name), None) => {
                name.parse().map_or(Self::Error, Self::Algorithm)
            }
            (Some("promote"), Some(kind), None) => parse_promotion(kind),
            _ => Self::Error,
        }
    }
}

fn parse_promotion(s: &str) -> InputKind {
    let mut chars = s.chars();
    match (chars.next().map(PieceKind::try_from), chars.next()) {
        (
            Some(Ok(
                kind @ (PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight),
            )),
            None,
        ) => InputKind::Promote(kind),
        _ => InputKind::Error,
    }
}

fn print_help() {
    println!("Commands:");
    println!("newgame | ng => Begin a new game.");
    println!("undo => Undo the position to return to your last move.");
    println!("moves => List your legal moves.");
    println!("depth N => Set engine search depth in plies.");
    println!("seed N => Seed the engine for reproducible play.");
    println!("algorithm negamax|minimax|greedy|random => Set engine move selection.");
    println!("promote q|r|b|n => Choose the piece your pawns promote to.");
    println!("help => Print this help text.");
    println!("exit => end CLI.");
    println!("\nTo make a move, enter a move in coordinate form.");
    println!("Examples: d2d4 -> Move piece on D2 to D4. e7e8n -> Promote to a knight.");
}

/// Prints the result and returns true if the side to move has no game left to play.
fn game_over(state: &mut GameState) -> bool {
    state.legal_moves();
    if state.is_checkmate() {
        match state.side_to_move() {
            kf::Color::Black => println!("Congrats!! You won by CHECKMATE."),
            kf::Color::White => println!("Oh no!! Knightfall engine won by CHECKMATE."),
        }
    } else if state.is_stalemate() {
        println!("The game is DRAWN via STALEMATE.");
    } else {
        return false;
    }
    println!("{}", state);
    true
}

fn wait_for_newgame(state: &mut GameState, input: &mut String) -> io::Result<()> {
    println!("Press Enter to start a new game.");
    io::stdin().read_line(input)?;
    *state = kf::new_game();
    Ok(())
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    println!("Knightfall CLI 0.1.0\n");
    let mut engine = Engine::new();
    let mut input = String::new();
    let mut state = kf::new_game();

    loop {
        println!("Current Static cp  : {}", evaluate_abs(&state, engine.positional()));
        println!("{}", state);
        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        let record = match InputKind::from(input.trim()) {
            InputKind::Exit => break,
            InputKind::Newgame => {
                state = kf::new_game();
                println!("Starting new game...");
                continue;
            }
            InputKind::Help => {
                print_help();
                continue;
            }
            InputKind::Undo => {
                // Undo both computer's move and player's last move.
                for _ in 0..2 {
                    if let Ok(move_) = kf::undo_move(&mut state) {
                        println!("Undo move {}.", kf::notation(&move_));
                    }
                }
                continue;
            }
            InputKind::Moves => {
                let moves = kf::legal_moves(&mut state);
                println!("{}", kf::movelist::line_to_string(&moves));
                continue;
            }
            InputKind::Depth(depth) => {
                engine.set_depth(depth);
                println!("Engine depth set to {}.", engine.depth());
                continue;
            }
            InputKind::Seed(seed) => {
                engine.set_seed(seed);
                println!("Engine seeded with {}.", seed);
                continue;
            }
            InputKind::Algorithm(algorithm) => {
                engine.set_algorithm(algorithm);
                println!("Engine plays with {}.", algorithm);
                continue;
            }
            InputKind::Promote(kind) => {
                state.promotion_choice = kind;
                println!("Pawns promote to {}.", kind);
                continue;
            }
            InputKind::Error => {
                println!("Invalid command: {}", input.trim());
                continue;
            }
            InputKind::GameMove(record) => record,
        };

        // Process a player move, then process an engine move.
        let applied = state
            .move_from_record(&record)
            .and_then(|move_| state.do_legal_move(move_));
        match applied {
            Ok(move_) => debug!("[GAME] player {}", kf::notation(&move_)),
            Err(err) => {
                println!("That move was illegal! No action taken. ({})", err);
                continue;
            }
        }

        if game_over(&mut state) {
            wait_for_newgame(&mut state, &mut input)?;
            continue;
        }

        // Have computer play its response on a copy of the game.
        println!("{}\nthinking...", state);
        let reply = engine
            .search_sync(&state)
            .and_then(|result| state.do_legal_move(result.best_move));
        match reply {
            Ok(move_) => println!("Engine plays {}.", kf::notation(&move_)),
            Err(err) => {
                warn!("[GAME] engine failed to move: {}", err);
                continue;
            }
        }

        if game_over(&mut state) {
            wait_for_newgame(&mut state, &mut input)?;
        }
    }

    Ok(())
}
