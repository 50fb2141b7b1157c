//! Search
//!
//! Tests engine configuration and the behavior shared by all search algorithms.

use std::sync::mpsc;

use knightfall_engine::coretypes::squares::*;
use knightfall_engine::evaluation::{evaluate_abs, CHECKMATE};
use knightfall_engine::fen::Fen;
use knightfall_engine::search::{greedy, minimax, negamax};
use knightfall_engine::*;

const MIDDLEGAME: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

#[test]
fn seeded_engines_choose_the_same_move() {
    let mut state = GameState::parse_fen(MIDDLEGAME).unwrap();
    let moves = state.legal_moves();

    let mut first = EngineBuilder::new().depth(2).seed(42).build();
    let mut second = EngineBuilder::new().depth(2).seed(42).build();
    let a = first.search(&mut state, &moves).unwrap();
    let b = second.search(&mut state, &moves).unwrap();
    assert_eq!(a.best_move, b.best_move);
    assert_eq!(a.score, b.score);
}

#[test]
fn search_restores_the_state() {
    let mut state = GameState::parse_fen(MIDDLEGAME).unwrap();
    let before = state.clone();
    let moves = state.legal_moves();

    for algorithm in [
        Algorithm::Negamax,
        Algorithm::Minimax,
        Algorithm::Greedy,
        Algorithm::Random,
    ] {
        let mut engine = EngineBuilder::new()
            .depth(2)
            .seed(7)
            .algorithm(algorithm)
            .build();
        let result = engine.search(&mut state, &moves).unwrap();
        assert!(moves.contains(&result.best_move), "{algorithm}");
        assert_eq!(state, before, "{algorithm}");
        assert_eq!(state.to_fen(), before.to_fen());
        assert_eq!(state.legal_moves(), moves);
    }
}

#[test]
fn minimax_and_negamax_agree() {
    let fens = [
        MIDDLEGAME,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 0 1",
    ];
    for fen in fens {
        let mut state = GameState::parse_fen(fen).unwrap();
        let moves = state.legal_moves();
        for ply in 1..=3 {
            let nega = negamax(&mut state, &moves, ply, true).unwrap();
            let mini = minimax(&mut state, &moves, ply, true).unwrap();
            assert_eq!(nega.score, mini.score, "{fen} at {ply}");
            assert_eq!(nega.best_move, mini.best_move, "{fen} at {ply}");
        }
    }
}

#[test]
fn depth_one_takes_the_free_queen() {
    let mut state = GameState::parse_fen("q3k3/8/8/8/8/8/6PP/R3K3 w - - 0 1").unwrap();
    let moves = state.legal_moves();
    let result = negamax(&mut state, &moves, 1, false).unwrap();
    assert_eq!(result.best_move.start(), A1);
    assert_eq!(result.best_move.end(), A8);
    assert!(result.score > evaluate_abs(&state, false));
}

#[test]
fn greedy_sees_the_recapture() {
    // Rxd5 wins a pawn but loses the rook to the c6 pawn.
    let mut state = GameState::parse_fen("4k3/6pp/2p5/3p4/8/8/7P/3RK3 w - - 0 1").unwrap();
    let moves = state.legal_moves();
    let result = greedy(&mut state, &moves, false).unwrap();
    assert!(!(result.best_move.start() == D1 && result.best_move.end() == D5));
}

#[test]
fn mate_scores_are_absolute() {
    let mut white = GameState::parse_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();
    let moves = white.legal_moves();
    let result = negamax(&mut white, &moves, 1, false).unwrap();
    assert_eq!(result.absolute_score(), CHECKMATE);
    assert_eq!(result.relative_score(), CHECKMATE);

    let mut black = GameState::parse_fen("r5k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
    let moves = black.legal_moves();
    let result = negamax(&mut black, &moves, 1, false).unwrap();
    assert_eq!(result.absolute_score(), -CHECKMATE);
    assert_eq!(result.relative_score(), CHECKMATE);
    assert_eq!(result.leading(), Some(Color::Black));
}

#[test]
fn nonblocking_search_sends_its_result() {
    let mut engine = EngineBuilder::new().depth(2).seed(5).build();
    let state = GameState::parse_fen(MIDDLEGAME).unwrap();
    let (sender, receiver) = mpsc::channel();

    engine.search_nonblocking(&state, sender).unwrap();
    let result = receiver.recv().unwrap().unwrap();
    engine.wait();

    assert!(engine.ready());
    assert!(GameState::parse_fen(MIDDLEGAME)
        .unwrap()
        .legal_moves()
        .contains(&result.best_move));
    assert_eq!(result.depth, 2);
}

#[test]
fn nonblocking_search_reports_no_moves() {
    let mut engine = Engine::new();
    let state = GameState::parse_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    let (sender, receiver) = mpsc::channel();

    engine.search_nonblocking(&state, sender).unwrap();
    let err = receiver.recv().unwrap().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoLegalMoves);
}

#[test]
fn lib_best_move_is_legal() {
    let mut state = knightfall_engine::new_game();
    let moves = legal_moves(&mut state);
    let chosen = best_move(&mut state, &moves).unwrap();
    assert!(moves.contains(&chosen));
    assert_eq!(state, knightfall_engine::new_game());
}
