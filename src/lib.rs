//! # Connect Four
//!
//! Rules engine and turn-by-turn state machine for Connect Four, with a thin
//! terminal front end built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player identities, state machine
//! - [`ui`] — Terminal UI adapter: key events in, board rendering out
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;

pub use error::{ConfigError, MoveError, SetupError};
pub use game::{new_game, GameState, GameStatus, Identity, MoveOutcome, Player};
