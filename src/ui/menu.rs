use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::game::DeathReason;

/// Draws the title card shown before the first game.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, high_score: u32) {
    let lines = vec![
        Line::from(format!("High score: {high_score}")),
        Line::from(""),
        Line::from("[Enter]/[Space] Start"),
        Line::from("[Q]/[Esc] Quit"),
        Line::from(""),
        Line::from("Arrows or WASD to steer"),
    ];

    render_popup(frame, area, " SNAKE ", Color::Green, lines);
}

/// Draws the game-over card.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    previous_high_score: u32,
    death_reason: Option<DeathReason>,
) {
    let is_new_high = score > previous_high_score;
    let lines = vec![
        Line::from(format!("Score: {score}")),
        Line::from(match death_reason {
            Some(DeathReason::WallCollision) => "Hit the wall",
            Some(DeathReason::SelfCollision) => "Bit yourself",
            None => "",
        }),
        Line::from(if is_new_high { "New high score!" } else { "" }),
        Line::from(""),
        Line::from("[Enter]/[Space] Play Again"),
        Line::from("[Q]/[Esc] Quit"),
    ];

    render_popup(frame, area, " GAME OVER ", Color::Red, lines);
}

/// Draws the card for a completely filled board.
pub fn render_won_menu(frame: &mut Frame<'_>, area: Rect, score: u32) {
    let lines = vec![
        Line::from("The board is full."),
        Line::from(format!("Score: {score}")),
        Line::from(""),
        Line::from("[Enter]/[Space] Play Again"),
        Line::from("[Q]/[Esc] Quit"),
    ];

    render_popup(frame, area, " YOU WIN ", Color::Yellow, lines);
}

fn render_popup(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    accent: Color,
    lines: Vec<Line<'_>>,
) {
    let popup = centered_popup(area, 80, 50);
    frame.render_widget(Clear, popup);

    let block = Block::bordered()
        .title(Line::from(title).alignment(Alignment::Center))
        .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .border_style(Style::default().fg(accent));
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, popup);
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
