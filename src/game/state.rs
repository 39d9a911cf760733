use tracing::{debug, info, instrument};

use super::board::CONNECT;
use super::{Board, Dimensions, Identity, Player};
use crate::error::{MoveError, SetupError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Tied,
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The game goes on and `next` is now to move.
    Continuing { next: Player },
    Won(Player),
    Tied,
}

/// An accepted placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub player: Player,
}

/// The four `(row, col)` cells that decided a won game.
pub type WinningLine = [(usize, usize); CONNECT];

/// Turn order and outcome state machine for one game. Owns its board; a new
/// game always gets a new `GameState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    players: [Identity; 2],
    current_player: Player,
    status: GameStatus,
    moves: Vec<Placement>,
    winning_line: Option<WinningLine>,
}

impl GameState {
    /// Start a game between two distinct identities. `first` moves first.
    #[instrument(
        skip_all,
        fields(first = %first, second = %second, height = dims.height, width = dims.width)
    )]
    pub fn new(first: Identity, second: Identity, dims: Dimensions) -> Result<Self, SetupError> {
        let dims = Dimensions::new(dims.height, dims.width)?;
        if first.as_str().is_empty() || second.as_str().is_empty() {
            return Err(SetupError::EmptyIdentity);
        }
        if first.same_as(&second) {
            return Err(SetupError::DuplicateIdentity(first.to_string()));
        }

        info!("new game");
        Ok(GameState {
            board: Board::new(dims),
            players: [first, second],
            current_player: Player::First,
            status: GameStatus::InProgress,
            moves: Vec::new(),
            winning_line: None,
        })
    }

    /// Start a game on the default 6x7 board
    pub fn with_default_board(first: Identity, second: Identity) -> Result<Self, SetupError> {
        Self::new(first, second, Dimensions::default())
    }

    /// A fresh game with the same players and board size.
    pub fn restarted(&self) -> Self {
        info!("game restarted");
        GameState {
            board: Board::new(self.board.dimensions()),
            players: self.players.clone(),
            current_player: Player::First,
            status: GameStatus::InProgress,
            moves: Vec::new(),
            winning_line: None,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Identity registered for a seat
    pub fn identity(&self, player: Player) -> &Identity {
        &self.players[player.index()]
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Who occupies `(row, col)`, if anyone.
    pub fn occupant_at(&self, row: usize, col: usize) -> Option<&Identity> {
        self.board
            .occupant_at(row, col)
            .map(|player| self.identity(player))
    }

    /// Get list of legal columns (not full)
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..self.board.width())
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Accepted placements in order
    pub fn moves(&self) -> &[Placement] {
        &self.moves
    }

    pub fn last_move(&self) -> Option<Placement> {
        self.moves.last().copied()
    }

    /// Cells of the line that won the game, if it was won.
    pub fn winning_line(&self) -> Option<WinningLine> {
        self.winning_line
    }

    /// Drop the current player's piece into `column`.
    ///
    /// A rejected move leaves the board, the turn, and the history untouched.
    /// A move that completes a line and fills the board is a win.
    #[instrument(skip(self), fields(player = ?self.current_player))]
    pub fn attempt_move(&mut self, column: isize) -> Result<MoveOutcome, MoveError> {
        if self.is_terminal() {
            debug!("move rejected: game over");
            return Err(MoveError::GameOver);
        }

        let row = match self.board.find_landing_row(column) {
            Ok(Some(row)) => row,
            Ok(None) => {
                debug!("move rejected: column full");
                return Err(MoveError::ColumnFull {
                    column: column as usize,
                });
            }
            Err(e) => {
                debug!(error = %e, "move rejected");
                return Err(e);
            }
        };
        let col = column as usize;
        let player = self.current_player;

        self.board.place(row, col, player);
        self.moves.push(Placement { row, col, player });
        debug!(row, col, "piece placed");

        if let Some(line) = self.board.find_line(player) {
            self.status = GameStatus::Won(player);
            self.winning_line = Some(line);
            info!(winner = %self.identity(player), moves = self.moves.len(), "game won");
            return Ok(MoveOutcome::Won(player));
        }

        if self.board.is_full() {
            self.status = GameStatus::Tied;
            info!(moves = self.moves.len(), "game tied");
            return Ok(MoveOutcome::Tied);
        }

        self.current_player = player.other();
        Ok(MoveOutcome::Continuing {
            next: self.current_player,
        })
    }

    /// End-of-game announcement, or `None` while the game is in progress.
    pub fn summary(&self) -> Option<String> {
        match self.status {
            GameStatus::InProgress => None,
            GameStatus::Won(player) => Some(format!("The {} player won!", self.identity(player))),
            GameStatus::Tied => Some("Tie!".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_game() -> GameState {
        GameState::with_default_board("red".into(), "yellow".into()).unwrap()
    }

    fn play(state: &mut GameState, columns: &[isize]) -> MoveOutcome {
        let mut outcome = None;
        for &col in columns {
            outcome = Some(state.attempt_move(col).unwrap());
        }
        outcome.expect("at least one move")
    }

    #[test]
    fn test_initial_state() {
        let state = new_game();
        assert_eq!(state.current_player(), Player::First);
        assert_eq!(state.status(), GameStatus::InProgress);
        assert!(!state.is_terminal());
        assert_eq!(state.legal_columns().len(), 7);
        assert_eq!(state.identity(Player::Second).as_str(), "yellow");
        assert!(state.moves().is_empty());
        assert_eq!(state.summary(), None);
    }

    #[test]
    fn test_rejects_duplicate_identities() {
        assert_eq!(
            GameState::with_default_board("Red".into(), "red".into()),
            Err(SetupError::DuplicateIdentity("Red".to_string()))
        );
    }

    #[test]
    fn test_rejects_empty_identity() {
        assert_eq!(
            GameState::with_default_board("   ".into(), "red".into()),
            Err(SetupError::EmptyIdentity)
        );
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let dims = Dimensions {
            height: 0,
            width: 7,
        };
        assert!(matches!(
            GameState::new("red".into(), "yellow".into(), dims),
            Err(SetupError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_attempt_move() {
        let mut state = new_game();
        let outcome = state.attempt_move(3).unwrap();

        assert_eq!(outcome, MoveOutcome::Continuing { next: Player::Second });
        assert_eq!(state.current_player(), Player::Second);
        assert_eq!(state.occupant_at(5, 3).map(Identity::as_str), Some("red"));
        assert_eq!(
            state.last_move(),
            Some(Placement { row: 5, col: 3, player: Player::First })
        );
    }

    #[test]
    fn test_full_column_keeps_turn() {
        let mut state = new_game();
        play(&mut state, &[0, 0, 0, 0, 0, 0]);
        let before = state.clone();

        assert_eq!(state.attempt_move(0), Err(MoveError::ColumnFull { column: 0 }));
        assert_eq!(state, before);
        assert!(!state.legal_columns().contains(&0));
    }

    #[test]
    fn test_invalid_column_keeps_state() {
        let mut state = new_game();
        let before = state.clone();

        assert_eq!(
            state.attempt_move(-1),
            Err(MoveError::InvalidColumn { column: -1, width: 7 })
        );
        assert_eq!(
            state.attempt_move(7),
            Err(MoveError::InvalidColumn { column: 7, width: 7 })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_win_detection() {
        let mut state = new_game();

        // First player builds a horizontal line, second stacks on top
        let outcome = play(&mut state, &[0, 0, 1, 1, 2, 2, 3]);

        assert_eq!(outcome, MoveOutcome::Won(Player::First));
        assert_eq!(state.status(), GameStatus::Won(Player::First));
        assert_eq!(state.winning_line(), Some([(5, 0), (5, 1), (5, 2), (5, 3)]));
        assert_eq!(state.summary().as_deref(), Some("The red player won!"));
        // The winner keeps the turn marker
        assert_eq!(state.current_player(), Player::First);
    }

    #[test]
    fn test_moves_after_win_are_rejected() {
        let mut state = new_game();
        play(&mut state, &[0, 0, 1, 1, 2, 2, 3]);
        let before = state.clone();

        assert_eq!(state.attempt_move(4), Err(MoveError::GameOver));
        assert_eq!(state, before);
        assert!(state.legal_columns().is_empty());
    }

    #[test]
    fn test_win_on_last_cell_beats_tie() {
        // On a 1x7 board the first player's fourth piece is also the last cell
        let dims = Dimensions::new(1, 7).unwrap();
        let mut state = GameState::new("red".into(), "yellow".into(), dims).unwrap();

        let outcome = play(&mut state, &[0, 4, 1, 5, 2, 6, 3]);
        assert!(state.board().is_full());
        assert_eq!(outcome, MoveOutcome::Won(Player::First));
        assert_eq!(state.status(), GameStatus::Won(Player::First));
    }

    #[test]
    fn test_full_board_without_line_is_tie() {
        let dims = Dimensions::new(1, 7).unwrap();
        let mut state = GameState::new("red".into(), "yellow".into(), dims).unwrap();

        let outcome = play(&mut state, &[0, 2, 1, 3, 4, 6, 5]);
        assert_eq!(outcome, MoveOutcome::Tied);
        assert_eq!(state.winning_line(), None);
    }

    #[test]
    fn test_tie_on_tiny_board() {
        let dims = Dimensions::new(1, 1).unwrap();
        let mut state = GameState::new("red".into(), "yellow".into(), dims).unwrap();

        assert_eq!(state.attempt_move(0), Ok(MoveOutcome::Tied));
        assert_eq!(state.summary().as_deref(), Some("Tie!"));
        assert_eq!(state.attempt_move(0), Err(MoveError::GameOver));
    }

    #[test]
    fn test_restarted_keeps_players_and_size() {
        let dims = Dimensions::new(5, 5).unwrap();
        let mut state = GameState::new("red".into(), "yellow".into(), dims).unwrap();
        play(&mut state, &[0, 1, 2]);

        let fresh = state.restarted();
        assert_eq!(fresh.board().dimensions(), dims);
        assert_eq!(fresh.identity(Player::First).as_str(), "red");
        assert_eq!(fresh.current_player(), Player::First);
        assert_eq!(fresh.board().filled(), 0);
        assert!(fresh.moves().is_empty());
    }
}
