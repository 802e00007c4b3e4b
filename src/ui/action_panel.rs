use crate::display::SurfaceState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draws the four action buttons side by side, keyed 1-4.
pub fn draw_action_buttons(frame: &mut Frame, area: Rect, state: &SurfaceState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (index, (label, chunk)) in state.labels.iter().zip(chunks.iter()).enumerate() {
        let style = button_style(state.buttons_enabled, state.cursor == index);

        let button = Paragraph::new(format!("[{}] {}", index + 1, label))
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(style));

        frame.render_widget(button, *chunk);
    }
}

fn button_style(enabled: bool, under_cursor: bool) -> Style {
    match (enabled, under_cursor) {
        (false, _) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        (true, false) => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    }
}
