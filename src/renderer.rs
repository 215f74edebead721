use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{CELL_COLUMNS, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, GridSize};
use crate::game::GameStatus;
use crate::snake::Position;
use crate::snapshot::Snapshot;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_start_menu, render_won_menu};

/// Values the frame needs beyond the engine snapshot.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FrameInfo {
    /// High score as it stood when the current game began.
    pub high_score_at_start: u32,
}

/// Renders the full game frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, info: FrameInfo) {
    let board_area = board_rect(frame.area(), snapshot.grid);
    let play_area = render_hud(frame, board_area, snapshot, info.high_score_at_start);

    let block = Block::bordered().border_style(Style::new().fg(Color::Green));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    if let Some(food) = snapshot.food {
        let food_style = Style::new().fg(Color::Red);
        draw_cell(frame, inner, snapshot.grid, food, GLYPH_FOOD, food_style);
    }
    render_snake(frame, inner, snapshot);

    match snapshot.status {
        GameStatus::Idle => render_start_menu(frame, play_area, snapshot.high_score),
        GameStatus::GameOver => render_game_over_menu(
            frame,
            play_area,
            snapshot.score,
            info.high_score_at_start,
            snapshot.death_reason,
        ),
        GameStatus::Won => render_won_menu(frame, play_area, snapshot.score),
        GameStatus::Playing => {}
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot) {
    let body_style = Style::new().fg(Color::Green);
    // Tail first so the head is painted last.
    for segment in snapshot.snake.iter().skip(1).rev() {
        draw_cell(
            frame,
            inner,
            snapshot.grid,
            *segment,
            GLYPH_SNAKE_BODY,
            body_style,
        );
    }

    if let Some(head) = snapshot.head() {
        let head_style = Style::new()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD);
        draw_cell(
            frame,
            inner,
            snapshot.grid,
            head,
            GLYPH_SNAKE_HEAD,
            head_style,
        );
    }
}

fn draw_cell(
    frame: &mut Frame<'_>,
    inner: Rect,
    grid: GridSize,
    position: Position,
    glyph: &str,
    style: Style,
) {
    let Some((x, y)) = logical_to_terminal(inner, grid, position) else {
        return;
    };

    frame.buffer_mut().set_string(x, y, glyph, style);
}

/// Centres the board (plus border and HUD row) in the terminal.
fn board_rect(area: Rect, grid: GridSize) -> Rect {
    let width = grid.width.saturating_mul(CELL_COLUMNS).saturating_add(2);
    let height = grid.height.saturating_add(3);

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    board
}

fn logical_to_terminal(inner: Rect, grid: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(grid) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use super::{FrameInfo, logical_to_terminal, render};
    use crate::config::GridSize;
    use crate::game::Engine;
    use crate::snake::Position;

    #[test]
    fn cells_are_two_columns_wide() {
        let inner = Rect::new(1, 2, 40, 20);

        assert_eq!(
            logical_to_terminal(inner, GridSize::DEFAULT, Position { x: 3, y: 4 }),
            Some((7, 6))
        );
        assert_eq!(
            logical_to_terminal(inner, GridSize::DEFAULT, Position { x: 20, y: 0 }),
            None
        );
    }

    #[test]
    fn clipped_cells_are_skipped() {
        let inner = Rect::new(0, 0, 5, 5);

        assert_eq!(
            logical_to_terminal(inner, GridSize::DEFAULT, Position { x: 2, y: 0 }),
            None
        );
    }

    #[test]
    fn idle_frame_shows_start_card() {
        let engine = Engine::new_with_seed(GridSize::DEFAULT, 12, 1);
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).expect("test terminal");

        terminal
            .draw(|frame| {
                render(
                    frame,
                    &engine.snapshot(),
                    FrameInfo {
                        high_score_at_start: 12,
                    },
                );
            })
            .expect("draw should succeed");

        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("SNAKE"));
        assert!(rendered.contains("High score: 12"));
        assert!(rendered.contains("HIGH SCORE 0012"));
    }
}
