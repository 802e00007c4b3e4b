pub mod action_panel;
pub mod combat_scene;
pub mod info_panel;

use crate::display::SurfaceState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Main UI drawing function. `finished` swaps the key hints for an exit prompt.
pub fn draw_battle_ui(frame: &mut Frame, state: &SurfaceState, finished: bool) {
    let size = frame.size();

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(9),    // Monsters + inventory
            Constraint::Length(3), // Player HP
            Constraint::Length(3), // Action buttons
            Constraint::Length(5), // Messages (3 lines + borders)
            Constraint::Length(1), // Footer
        ])
        .split(size);

    let top_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(75), // Monsters
            Constraint::Percentage(25), // Inventory
        ])
        .split(v_chunks[0]);

    combat_scene::draw_monster_panel(frame, top_chunks[0], state);
    info_panel::draw_inventory(frame, top_chunks[1], state);
    combat_scene::draw_player_hp(frame, v_chunks[1], state);
    action_panel::draw_action_buttons(frame, v_chunks[2], state);
    info_panel::draw_message_panel(frame, v_chunks[3], state);
    draw_footer(frame, v_chunks[4], finished);
}

fn draw_footer(frame: &mut Frame, area: Rect, finished: bool) {
    let text = if finished {
        "Battle over. Press any key to exit."
    } else {
        "1-4 choose action | ←/→ + Enter select | q quit"
    };

    let footer = Paragraph::new(Line::from(text))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
