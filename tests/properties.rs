//! Property checks over seeded random games.
//!
//! Games are generated by proposing random SAN tokens against a live board
//! and keeping only the ones the resolver accepts, so every generated game
//! replays without a skipped half-move.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use openingscope::board::{BoardState, Color, Square};
use openingscope::features::{
    extract, material_difference, unique_pieces_moved, when_castled, Horizons,
};
use openingscope::notation::tokenize;
use openingscope::record::{GameRecord, Outcome};
use openingscope::resolve::{apply, replay};

const PIECE_LETTERS: [&str; 5] = ["N", "B", "R", "Q", "K"];

fn random_token(rng: &mut SmallRng) -> String {
    if rng.gen_ratio(1, 20) {
        return if rng.gen_bool(0.5) { "O-O" } else { "O-O-O" }.to_string();
    }
    let to = Square::from_index(rng.gen_range(0..64)).unwrap();
    if rng.gen_bool(0.5) {
        let promo = if to.rank() == 0 || to.rank() == 7 { "=Q" } else { "" };
        if rng.gen_bool(0.7) {
            format!("{}{}", to, promo)
        } else {
            let df: i8 = if rng.gen_bool(0.5) { -1 } else { 1 };
            match to.offset(df, 0) {
                Some(from) => format!("{}x{}{}", (b'a' + from.file()) as char, to, promo),
                None => format!("{}{}", to, promo),
            }
        }
    } else {
        let letter = PIECE_LETTERS[rng.gen_range(0..PIECE_LETTERS.len())];
        let capture = if rng.gen_bool(0.3) { "x" } else { "" };
        format!("{}{}{}", letter, capture, to)
    }
}

/// Plays up to `turns` full turns of accepted random tokens.
fn random_game(seed: u64, turns: usize) -> (String, Vec<String>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = BoardState::initial();
    let mut played = Vec::new();
    'game: for _ in 0..turns * 2 {
        for _ in 0..400 {
            let token = random_token(&mut rng);
            if apply(&mut board, &token).is_ok() {
                played.push(token);
                continue 'game;
            }
        }
        break;
    }

    let mut text = String::new();
    for (i, pair) in played.chunks(2).enumerate() {
        if i > 0 {
            text.push(' ');
        }
        text.push_str(&format!("{}. {}", i + 1, pair.join(" ")));
    }
    (text, played)
}

#[test]
fn generated_games_tokenize_to_consecutive_turns() {
    for seed in 0..50 {
        let (text, played) = random_game(seed, 12);
        if played.is_empty() {
            continue;
        }
        let turns = tokenize(&text).unwrap();
        assert_eq!(turns.len(), (played.len() + 1) / 2, "{}", text);
        for (i, turn) in turns.turns().iter().enumerate() {
            assert_eq!(turn.index, i + 1, "{}", text);
            assert_eq!(turn.white.as_str(), played[2 * i]);
        }
    }
}

#[test]
fn generated_games_replay_without_skips() {
    for seed in 0..50 {
        let (text, _) = random_game(seed, 12);
        let Ok(turns) = tokenize(&text) else { continue };
        let r = replay(&turns, turns.len());
        assert_eq!(r.skipped, 0, "{}", text);
    }
}

#[test]
fn unique_pieces_bounded_by_twice_the_horizon() {
    for seed in 100..160 {
        let (text, _) = random_game(seed, 15);
        let Ok(turns) = tokenize(&text) else { continue };
        for horizon in 0..=10 {
            for color in [Color::White, Color::Black] {
                let n = unique_pieces_moved(&turns, color, horizon);
                assert!(n >= 0 && n as usize <= 2 * horizon, "{} h={} n={}", text, horizon, n);
            }
        }
    }
}

#[test]
fn castling_turn_within_game_length() {
    for seed in 200..260 {
        let (text, played) = random_game(seed, 20);
        let Ok(turns) = tokenize(&text) else { continue };
        for color in [Color::White, Color::Black] {
            let at = when_castled(&turns, color) as usize;
            assert!(at >= 1 && at <= turns.len(), "{}", text);
            let side_castled = played
                .iter()
                .skip(if color == Color::White { 0 } else { 1 })
                .step_by(2)
                .any(|t| t.contains("O-O"));
            if !side_castled {
                assert_eq!(at, turns.len(), "{}", text);
            }
        }
    }
}

#[test]
fn zero_horizon_material_is_balanced() {
    for seed in 300..330 {
        let (text, _) = random_game(seed, 10);
        let Ok(turns) = tokenize(&text) else { continue };
        assert_eq!(material_difference(&turns, 0), 0);
    }
}

#[test]
fn extraction_is_deterministic() {
    let h = Horizons::default();
    for seed in 400..440 {
        let (text, _) = random_game(seed, 10);
        let record = GameRecord::new(text, Outcome::BlackWin);
        let a = extract(&record, &h);
        let b = extract(&record, &h);
        assert_eq!(a, b);
        assert_eq!(a.black.win, 1);
        assert_eq!(a.white.win, 0);
    }
}
