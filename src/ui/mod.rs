//! Terminal UI: translates key presses into moves and draws the game state.
//! Depends on [`crate::game`]; nothing in the game depends on it.

mod app;
pub mod board_widget;
mod game_view;

pub use app::App;
