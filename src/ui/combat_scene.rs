use crate::combat::MonsterView;
use crate::core::constants::MONSTER_HEALTH_MAX;
use crate::display::SurfaceState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Draws one tile per monster, dead ones included so indices stay put.
pub fn draw_monster_panel(frame: &mut Frame, area: Rect, state: &SurfaceState) {
    let block = Block::default().borders(Borders::ALL).title(" Monsters ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.monsters.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No monsters in sight...",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let count = state.monsters.len() as u32;
    let constraints: Vec<Constraint> = (0..count).map(|_| Constraint::Ratio(1, count)).collect();
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    for (index, (monster, tile)) in state.monsters.iter().zip(tiles.iter()).enumerate() {
        draw_monster_tile(frame, *tile, index, monster, state.highlight == Some(index));
    }
}

fn draw_monster_tile(
    frame: &mut Frame,
    area: Rect,
    index: usize,
    monster: &MonsterView,
    highlighted: bool,
) {
    let border_style = if highlighted {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if monster.alive {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" #{} ", index + 1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),    // Stats
            Constraint::Length(1), // HP bar
        ])
        .split(inner);

    let sprite = if monster.alive { "👹" } else { "💀" };
    let name_style = if monster.alive {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    };

    let mut lines = vec![
        Line::from(sprite),
        Line::from(Span::styled(monster.name.clone(), name_style)),
        Line::from(format!("HP: {}", monster.health)),
        Line::from(Span::styled(
            format!("DMG: {:.2}", monster.damage),
            Style::default().fg(Color::LightRed),
        )),
        Line::from(Span::styled(
            format!("SPD: {}", monster.speed),
            Style::default().fg(Color::Cyan),
        )),
    ];
    if let Some(special) = &monster.special {
        lines.push(Line::from(Span::styled(
            format!("★ {}", special),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        chunks[0],
    );

    let ratio = health_ratio(monster.health, MONSTER_HEALTH_MAX);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(health_color(ratio)))
        .label("")
        .ratio(ratio);
    frame.render_widget(gauge, chunks[1]);
}

/// Draws the player HP bar
pub fn draw_player_hp(frame: &mut Frame, area: Rect, state: &SurfaceState) {
    let hp_ratio = health_ratio(state.health, state.max_health);

    let label = format!("{} / {} HP", state.health, state.max_health);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Player "))
        .gauge_style(
            Style::default()
                .fg(health_color(hp_ratio))
                .add_modifier(Modifier::BOLD),
        )
        .label(label)
        .ratio(hp_ratio);

    frame.render_widget(gauge, area);
}

/// `current / max`, clamped into `[0, 1]` for gauges.
pub fn health_ratio(current: i32, max: i32) -> f64 {
    if max <= 0 {
        return 0.0;
    }
    (current as f64 / max as f64).clamp(0.0, 1.0)
}

pub fn health_color(ratio: f64) -> Color {
    if ratio > 0.5 {
        Color::Green
    } else if ratio > 0.25 {
        Color::Yellow
    } else {
        Color::Red
    }
}
