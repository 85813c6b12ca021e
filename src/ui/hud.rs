use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::game::{GameSession, StatusReadout};
use crate::grid::Position;

const HUD_MARGIN_X: u16 = 2;
const SEPARATOR: &str = " │ ";

/// Renders the two-line status readout and returns the play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, session: &GameSession, theme: &Theme) -> Rect {
    let [play_area, readout_area, board_info_area, _bottom_margin] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let readout_area = inset_horizontal(readout_area, HUD_MARGIN_X);
    let board_info_area = inset_horizontal(board_info_area, HUD_MARGIN_X);

    frame.render_widget(
        Paragraph::new(readout_line(
            session.status_readout(),
            usize::from(readout_area.width),
            theme,
        ))
        .alignment(Alignment::Center),
        readout_area,
    );

    let bounds = session.bounds();
    let walls = if session.config().teleport_walls {
        "teleport"
    } else {
        "solid"
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{}x{}", bounds.width, bounds.height),
                Style::default().fg(theme.hud_value),
            ),
            Span::raw(SEPARATOR),
            Span::raw("Walls: "),
            Span::styled(walls, Style::default().fg(theme.hud_value)),
            Span::raw(SEPARATOR),
            Span::raw("Tick: "),
            Span::styled(
                session.tick_count.to_string(),
                Style::default().fg(theme.hud_value),
            ),
        ]))
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.hud_label)),
        board_info_area,
    );

    play_area
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}

fn readout_line(readout: StatusReadout, available_width: usize, theme: &Theme) -> Line<'static> {
    let compact = readout_fields(readout, false)
        .iter()
        .map(|(label, value)| label.width() + 2 + value.width())
        .sum::<usize>()
        + SEPARATOR.width() * 2
        > available_width;

    let label_style = Style::default().fg(theme.hud_label);
    let value_style = Style::default().fg(theme.hud_value);

    let mut spans = Vec::new();
    for (idx, (label, value)) in readout_fields(readout, compact).into_iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(SEPARATOR, label_style));
        }
        spans.push(Span::styled(format!("{label}: "), label_style));
        spans.push(Span::styled(value, value_style));
    }

    Line::from(spans)
}

fn readout_fields(readout: StatusReadout, compact: bool) -> [(&'static str, String); 3] {
    let (head_label, length_label, fruit_label) = if compact {
        ("H", "L", "F")
    } else {
        ("Head", "Length", "Fruit")
    };

    [
        (head_label, format_position(Some(readout.head))),
        (length_label, readout.length.to_string()),
        (fruit_label, format_position(readout.fruit)),
    ]
}

fn format_position(position: Option<Position>) -> String {
    match position {
        Some(Position { x, y }) => format!("{x}, {y}"),
        None => "-".to_owned(),
    }
}
