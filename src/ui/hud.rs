use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::snapshot::Snapshot;

/// Renders the score row and returns the play area below it.
///
/// The high score is highlighted once the running score beats
/// `high_score_at_start`, the record the current game set out to break.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &Snapshot,
    high_score_at_start: u32,
) -> Rect {
    let [score_area, play_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    let high_style = if is_new_high(snapshot.score, high_score_at_start) {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };

    let (left, right) = score_labels(
        snapshot.score,
        snapshot.high_score,
        usize::from(score_area.width),
    );
    let gap = usize::from(score_area.width)
        .saturating_sub(left.width() + right.width())
        .max(1);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(left, Style::default().fg(Color::Green)),
            Span::raw(" ".repeat(gap)),
            Span::styled(right, high_style),
        ])),
        score_area,
    );

    play_area
}

/// Tying the previous record is not a new high score.
fn is_new_high(score: u32, high_score_at_start: u32) -> bool {
    score > high_score_at_start
}

/// Left and right HUD labels, falling back to short labels on narrow rows.
fn score_labels(score: u32, high_score: u32, available_width: usize) -> (String, String) {
    let left = format!("SCORE {}", padded(score));
    let right = format!("HIGH SCORE {}", padded(high_score));
    if left.width() + right.width() < available_width {
        return (left, right);
    }

    (
        format!("S {}", padded(score)),
        format!("HI {}", padded(high_score)),
    )
}

fn padded(value: u32) -> String {
    format!("{value:04}")
}
