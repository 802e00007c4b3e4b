use crate::display::SurfaceState;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draws the inventory list. The first entry is the one "Use Item" consumes.
pub fn draw_inventory(frame: &mut Frame, area: Rect, state: &SurfaceState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Inventory ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = if state.inventory.is_empty() {
        vec![Line::from(Span::styled(
            "(empty)",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))]
    } else {
        state
            .inventory
            .iter()
            .enumerate()
            .take(inner.height as usize)
            .map(|(i, item)| {
                let style = if i == 0 {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Line::from(vec![
                    Span::raw(format!("{} ", item.icon)),
                    Span::styled(item.name.clone(), style),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Draws the last few messages, oldest dimmest, newest bold.
pub fn draw_message_panel(frame: &mut Frame, area: Rect, state: &SurfaceState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Battle Log ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let count = state.messages.len();
    let lines: Vec<Line> = state
        .messages
        .iter()
        .enumerate()
        .map(|(i, message)| {
            let age = count - 1 - i;
            Line::from(Span::styled(message.clone(), message_style(age)))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Style by age: 0 is the newest message.
fn message_style(age: usize) -> Style {
    match age {
        0 => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        1 => Style::default().fg(Color::Gray),
        _ => Style::default().fg(Color::DarkGray),
    }
}
