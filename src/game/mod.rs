//! Core Connect Four game logic: board representation, player identities,
//! and the turn/outcome state machine.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, Dimensions, CONNECT, DEFAULT_HEIGHT, DEFAULT_WIDTH, RAY_DIRECTIONS};
pub use player::{Identity, Player};
pub use state::{GameState, GameStatus, MoveOutcome, Placement, WinningLine};

use crate::error::SetupError;

/// Start a game between two players on a `height` x `width` board.
pub fn new_game(
    first: impl Into<Identity>,
    second: impl Into<Identity>,
    height: usize,
    width: usize,
) -> Result<GameState, SetupError> {
    let dims = Dimensions::new(height, width)?;
    GameState::new(first.into(), second.into(), dims)
}
