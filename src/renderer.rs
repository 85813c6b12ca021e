use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    BORDER_HALF_BLOCK, BORDER_PORTAL, CELL_COLUMNS, GLYPH_FRUIT, GLYPH_SNAKE_BODY,
    GLYPH_SNAKE_HEAD, GridSize, THEME_CLASSIC, Theme,
};
use crate::game::{EndReport, GameSession};
use crate::grid::{Cell, Position};
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_end_menu, render_start_menu};

/// Popup drawn over the board, if any.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Overlay {
    None,
    Start,
    End(EndReport),
}

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, session: &GameSession, overlay: &Overlay) {
    let theme = &THEME_CLASSIC;
    let area = frame.area();
    let play_area = render_hud(frame, area, session, theme);
    let board_area = centered_board(play_area, session.bounds());

    let border_style = if session.config().teleport_walls {
        Style::new().fg(theme.portal_fg).bg(theme.play_bg)
    } else {
        Style::new().fg(theme.wall_fg).bg(theme.wall_bg)
    };
    let border_set = if session.config().teleport_walls {
        BORDER_PORTAL
    } else {
        BORDER_HALF_BLOCK
    };
    let block = Block::bordered()
        .border_set(border_set)
        .border_style(border_style)
        .style(Style::new().bg(theme.play_bg));

    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);
    render_cells(frame, inner, session, theme);

    match overlay {
        Overlay::None => {}
        Overlay::Start => render_start_menu(frame, play_area, session.config(), theme),
        Overlay::End(report) => render_end_menu(frame, play_area, report, theme),
    }
}

fn render_cells(frame: &mut Frame<'_>, inner: Rect, session: &GameSession, theme: &Theme) {
    let bounds = session.bounds();
    let buffer = frame.buffer_mut();

    for (position, cell) in session.grid().interior_cells() {
        let (glyph, style) = match cell {
            Cell::Empty => continue,
            Cell::Head => (
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            ),
            Cell::Body => (GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body)),
            Cell::Fruit => (GLYPH_FRUIT, Style::new().fg(theme.fruit)),
        };

        let Some((x, y)) = logical_to_terminal(inner, bounds, position) else {
            continue;
        };
        buffer.set_string(x, y, glyph, style);
    }
}

/// Outer rectangle of the bordered board, centred in `area`.
fn centered_board(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds.interior_width().saturating_mul(CELL_COLUMNS) + 2;
    let height = bounds.interior_height() + 2;

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);

    board
}

/// Maps an interior cell to its terminal origin. Higher `y` is drawn nearer the top.
fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_interior(bounds) {
        return None;
    }

    let column = u16::try_from(position.x - 1).ok()?;
    let row = u16::try_from(i32::from(bounds.interior_height()) - position.y).ok()?;

    let x = inner.x.saturating_add(column.saturating_mul(CELL_COLUMNS));
    let y = inner.y.saturating_add(row);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
