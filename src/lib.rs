//! bingo-poker-rs: game-outcome engine for video poker and bingo
//!
//! Goals:
//! - Fair, injectable randomness; seeded sources make every round reproducible
//! - Explicit round state machines owned by the caller
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: one video poker round
//! ```
//! use bingo_poker::paytable::{Bet, BetLimits, PayTable};
//! use bingo_poker::rng::RngSource;
//! use bingo_poker::video_poker::{Phase, VideoPokerRound};
//! use std::sync::Arc;
//!
//! let mut rng = RngSource::seeded(42);
//! let bet = Bet::new(5, &BetLimits::default()).unwrap();
//! let mut round = VideoPokerRound::new(Arc::new(PayTable::standard()));
//!
//! round.deal(bet, &mut rng).unwrap();
//! round.toggle_hold(0).unwrap();
//! let result = round.draw().unwrap();
//! assert_eq!(round.phase(), Phase::Resolved);
//! assert_eq!(result.payout % 5, 0);
//! ```
//!
//! ## Quick start: a bingo round
//! ```
//! use bingo_poker::bingo::round::{BingoRound, DrawOutcome};
//! use bingo_poker::bingo::BingoUniverse;
//! use bingo_poker::paytable::PayTable;
//! use bingo_poker::rng::RngSource;
//! use std::sync::Arc;
//!
//! let mut rng = RngSource::seeded(7);
//! let universe = BingoUniverse::standard();
//! let mut round = BingoRound::new(universe, Arc::new(PayTable::standard_lines()), 2).unwrap();
//! round.start(BingoRound::deal_cards(universe, 1, &mut rng).unwrap(), &mut rng).unwrap();
//! let outcome = round.draw_next(&mut rng).unwrap();
//! assert!(matches!(outcome, DrawOutcome::Drawn(_)));
//! ```
//!
//! ## Simulator
//! Play many rounds headless and report return-to-player:
//! ```sh
//! cargo run --bin simulate -- --game poker --rounds 100000 --seed 1
//! ```

pub mod bingo;
pub mod cards;
pub mod config;
pub mod deck;
pub mod evaluator;
pub mod hand;
pub mod paytable;
pub mod rng;
pub mod video_poker;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
