use crate::game::{GameState, Player};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Colour used for a player's pieces. Identities that name a terminal colour
/// ("red", "blue", "#ff8800") are drawn in it.
pub fn player_color(state: &GameState, player: Player) -> Color {
    state
        .identity(player)
        .as_str()
        .parse::<Color>()
        .unwrap_or(match player {
            Player::First => Color::Red,
            Player::Second => Color::Yellow,
        })
}

/// Board lines, top row first, with the given column marked and any winning
/// line highlighted.
pub fn board_lines(state: &GameState, selected_column: Option<usize>) -> Vec<Line<'static>> {
    let board = state.board();
    let winning = state.winning_line();
    let mut lines = Vec::with_capacity(board.height() + 4);

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")];
    for col in 0..board.width() {
        let label = format!("{:^3}", col + 1);
        if Some(col) == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    let rule = "═".repeat(board.width() * 3 + 1);
    lines.push(Line::from(format!("  ╔{rule}╗")));

    for row in 0..board.height() {
        let mut row_spans = vec![Span::raw("  ║")];
        for col in 0..board.width() {
            let span = match board.occupant_at(row, col) {
                None => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
                Some(player) => {
                    let mut style = Style::default().fg(player_color(state, player));
                    if winning.is_some_and(|cells| cells.contains(&(row, col))) {
                        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                    }
                    Span::styled(" ● ", style)
                }
            };
            row_spans.push(span);
        }
        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{rule}╝")));

    if let Some(selected) = selected_column {
        let mut indicator_line = vec![Span::raw("   ")];
        for col in 0..board.width() {
            if col == selected {
                indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
            } else {
                indicator_line.push(Span::raw("   "));
            }
        }
        indicator_line.push(Span::raw("  "));
        lines.push(Line::from(indicator_line));
    }

    lines
}
