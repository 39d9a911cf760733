use super::board_widget::{board_lines, player_color};
use crate::game::GameState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    game_state: &GameState,
    selected_column: usize,
    message: &Option<String>,
) {
    // Column labels, two borders and the selection marker around the rows
    let board_height = u16::try_from(game_state.board().height())
        .unwrap_or(u16::MAX)
        .saturating_add(4);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),         // Header
            Constraint::Min(board_height), // Board
            Constraint::Length(3),         // Message
            Constraint::Length(3),         // Controls
        ])
        .split(frame.area());

    render_header(frame, game_state, chunks[0]);
    render_board(frame, game_state, selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, game_state: &GameState, area: Rect) {
    let current = game_state.current_player();
    let status = match game_state.summary() {
        Some(summary) => format!("Game Over  |  {summary}"),
        None => format!("Current Player: {}", game_state.identity(current)),
    };

    let header = Paragraph::new(status)
        .style(
            Style::default()
                .fg(player_color(game_state, current))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, game_state: &GameState, selected_column: usize, area: Rect) {
    let selected = (!game_state.is_terminal()).then_some(selected_column);
    let board_widget =
        Paragraph::new(board_lines(game_state, selected)).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from(
        "←/→: Move  |  Enter: Drop  |  1-9: Drop in column  |  R: Restart  |  Q: Quit",
    );

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
