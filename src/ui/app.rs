use crate::error::MoveError;
use crate::game::{GameState, MoveOutcome};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

pub struct App {
    game_state: GameState,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(game_state: GameState) -> Self {
        let selected_column = game_state.board().width() / 2; // Start in middle
        App {
            game_state,
            selected_column,
            should_quit: false,
            message: None,
        }
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right if self.selected_column + 1 < self.game_state.board().width() => {
                self.selected_column += 1;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(self.selected_column as isize);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let column = c as isize - '1' as isize;
                self.drop_piece(column);
            }
            KeyCode::Char('r' | 'R') => {
                self.game_state = self.game_state.restarted();
                self.selected_column = self.game_state.board().width() / 2;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Forward a column choice to the game and turn the result into a message
    fn drop_piece(&mut self, column: isize) {
        match self.game_state.attempt_move(column) {
            Ok(MoveOutcome::Continuing { .. }) => {
                if let Ok(col) = usize::try_from(column) {
                    self.selected_column = col;
                }
            }
            Ok(MoveOutcome::Won(_)) | Ok(MoveOutcome::Tied) => {
                self.message = self.game_state.summary();
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
            // Columns are numbered from 1 on screen
            Err(MoveError::ColumnFull { column }) => {
                self.message = Some(format!("Column {} is full!", column + 1));
            }
            Err(MoveError::InvalidColumn { column, .. }) => {
                self.message = Some(format!("There is no column {}!", column + 1));
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.game_state, self.selected_column, &self.message);
    }
}
