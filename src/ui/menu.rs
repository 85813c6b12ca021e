use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::{GameConfig, Theme};
use crate::game::{DeathReason, EndReport};

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, config: GameConfig, theme: &Theme) {
    let popup = centered_popup(area, 70, 60);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(2),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let walls = if config.teleport_walls {
        "Walls teleport to the opposite edge"
    } else {
        "Walls are solid"
    };
    let body = vec![
        Line::from(format!(
            "Board {}x{}, start at ({}, {})",
            config.size.width, config.size.height, config.start.x, config.start.y
        )),
        Line::from(walls),
        Line::from(""),
        Line::from("[Enter]/[Space] Play"),
        Line::from("[Q]/[Esc] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(vec![
            Line::from("Use arrows or WASD to move"),
            Line::from("A remake of the classic console Snake"),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.menu_footer)),
        footer_row,
    );
}

/// Draws the win or game-over screen as a centered popup.
pub fn render_end_menu(frame: &mut Frame<'_>, area: Rect, report: &EndReport, theme: &Theme) {
    let popup = centered_popup(area, 70, 40);
    frame.render_widget(Clear, popup);

    let (heading, title) = if report.won {
        ("YOU WIN", " victory ")
    } else {
        ("GAME OVER", " game over ")
    };

    let lines = vec![
        Line::from(heading).style(
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Length: {}", report.final_length)),
        Line::from(cause_text(report)),
        Line::from(""),
        Line::from("[Enter]/[Space] Play Again"),
        Line::from("[Q]/[Esc] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title)),
        popup,
    );
}

fn cause_text(report: &EndReport) -> &'static str {
    match report.death_reason {
        Some(DeathReason::WallCollision) => "Cause: hit wall",
        Some(DeathReason::SelfCollision) => "Cause: hit yourself",
        None if report.won => "The board is full",
        None => "",
    }
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
