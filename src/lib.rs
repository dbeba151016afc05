//! caravan-rs: rules engine and terminal front end for the card game Caravan.
//!
//! Two players each build three caravans of numeral cards, steering them with
//! face cards, and race to sell two of the three facing pairs (a bid of 21 to
//! 26 that beats the opposite caravan).
//!
//! - Rules live in [`caravan`], [`table`] and [`game`]; every move is checked
//!   before any state changes, so a rejected move can simply be retried.
//! - Errors are split into recoverable rule violations and fatal misuse, see
//!   [`error::Error`].
//! - Randomness is injected: decks are built from a seeded RNG.
//!
//! ## Quick start
//! ```
//! use caravan_rs::command::Command;
//! use caravan_rs::config::GameConfig;
//! use caravan_rs::game::Game;
//! use caravan_rs::player::PlayerName;
//!
//! let mut game = Game::new(&GameConfig::default().with_seed(42)).unwrap();
//! let hand = game.player(PlayerName::Bottom).unwrap().hand().to_vec();
//! let pos = hand.iter().position(|c| c.is_numeral()).unwrap() + 1;
//! let cmd: Command = format!("P{pos}A").parse().unwrap();
//! game.play_move(cmd).unwrap();
//! assert_eq!(game.to_move().unwrap(), PlayerName::Top);
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin caravan-rs -- --seed 7 --log-file caravan.log
//! ```

pub mod agents;
pub mod caravan;
pub mod cards;
pub mod command;
pub mod config;
pub mod deck;
pub mod engine;
pub mod error;
pub mod game;
pub mod player;
pub mod table;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
