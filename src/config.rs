use ratatui::style::Color;
use ratatui::symbols::border;

use crate::grid::Position;

/// Smallest accepted grid edge, border included.
pub const MIN_GRID_EDGE: u16 = 5;

/// Largest accepted grid edge, border included.
pub const MAX_GRID_EDGE: u16 = 40;

pub const DEFAULT_GRID_WIDTH: u16 = 20;
pub const DEFAULT_GRID_HEIGHT: u16 = 20;
pub const DEFAULT_START_X: i32 = 10;
pub const DEFAULT_START_Y: i32 = 10;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 40;

/// Frame pacing for the render/input loop.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Logical grid dimensions, one-cell wall border included.
///
/// The playable interior spans `1..width - 1` by `1..height - 1`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid, border included.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Number of playable columns per row.
    #[must_use]
    pub fn interior_width(self) -> u16 {
        self.width.saturating_sub(2)
    }

    /// Number of playable rows.
    #[must_use]
    pub fn interior_height(self) -> u16 {
        self.height.saturating_sub(2)
    }

    /// Returns the playable-area size `(W-2) * (H-2)`.
    #[must_use]
    pub fn playable_cells(self) -> usize {
        usize::from(self.interior_width()) * usize::from(self.interior_height())
    }
}

/// Session configuration handed to the core. Always holds clamped values.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub size: GridSize,
    pub start: Position,
    pub teleport_walls: bool,
}

impl GameConfig {
    /// Builds a configuration from raw, possibly out-of-range values.
    ///
    /// Width and height are clamped to `[MIN_GRID_EDGE, MAX_GRID_EDGE]`.
    /// A start coordinate below the first interior cell falls back to `1`;
    /// one past the last interior cell is pulled back onto it.
    #[must_use]
    pub fn clamped(
        width: i64,
        height: i64,
        start_x: i64,
        start_y: i64,
        teleport_walls: bool,
    ) -> Self {
        let size = GridSize {
            width: clamp_edge(width),
            height: clamp_edge(height),
        };
        let start = Position {
            x: clamp_start(start_x, size.width),
            y: clamp_start(start_y, size.height),
        };

        Self {
            size,
            start,
            teleport_walls,
        }
    }

    #[must_use]
    pub fn playable_cells(&self) -> usize {
        self.size.playable_cells()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::clamped(
            i64::from(DEFAULT_GRID_WIDTH),
            i64::from(DEFAULT_GRID_HEIGHT),
            i64::from(DEFAULT_START_X),
            i64::from(DEFAULT_START_Y),
            true,
        )
    }
}

fn clamp_edge(value: i64) -> u16 {
    let clamped = value.clamp(i64::from(MIN_GRID_EDGE), i64::from(MAX_GRID_EDGE));
    u16::try_from(clamped).unwrap_or(DEFAULT_GRID_WIDTH)
}

fn clamp_start(value: i64, edge: u16) -> i32 {
    let last_interior = i64::from(edge) - 2;
    if value < 1 {
        return 1;
    }

    i32::try_from(value.min(last_interior)).unwrap_or(1)
}

/// Clamps a requested tick interval to the supported minimum.
#[must_use]
pub fn clamp_tick_interval_ms(requested: u64) -> u64 {
    requested.max(MIN_TICK_INTERVAL_MS)
}

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub fruit: Color,
    pub play_bg: Color,
    pub wall_fg: Color,
    pub wall_bg: Color,
    pub portal_fg: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::White,
    snake_body: Color::Green,
    fruit: Color::Red,
    play_bg: Color::Black,
    wall_fg: Color::White,
    wall_bg: Color::DarkGray,
    portal_fg: Color::Cyan,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Dotted border used when walls teleport instead of kill.
pub const BORDER_PORTAL: border::Set = border::Set {
    top_left: "┌",
    top_right: "┐",
    bottom_left: "└",
    bottom_right: "┘",
    vertical_left: "┊",
    vertical_right: "┊",
    horizontal_top: "┈",
    horizontal_bottom: "┈",
};

/// Every cell is drawn two terminal columns wide to keep it roughly square.
pub const CELL_COLUMNS: u16 = 2;

pub const GLYPH_SNAKE_HEAD: &str = "██";
pub const GLYPH_SNAKE_BODY: &str = "▓▓";
pub const GLYPH_FRUIT: &str = "()";

#[cfg(test)]
mod tests {
    use super::{GameConfig, GridSize, clamp_tick_interval_ms, MIN_TICK_INTERVAL_MS};
    use crate::grid::Position;

    #[test]
    fn default_config_matches_classic_board() {
        let config = GameConfig::default();

        assert_eq!(
            config.size,
            GridSize {
                width: 20,
                height: 20
            }
        );
        assert_eq!(config.start, Position { x: 10, y: 10 });
        assert!(config.teleport_walls);
        assert_eq!(config.playable_cells(), 324);
    }

    #[test]
    fn degenerate_dimensions_are_clamped() {
        let tiny = GameConfig::clamped(0, -3, 1, 1, false);
        assert_eq!(tiny.size.width, 5);
        assert_eq!(tiny.size.height, 5);

        let huge = GameConfig::clamped(400, 41, 1, 1, false);
        assert_eq!(huge.size.width, 40);
        assert_eq!(huge.size.height, 40);
    }

    #[test]
    fn start_position_is_pulled_into_interior() {
        let config = GameConfig::clamped(10, 10, -4, 99, true);

        assert_eq!(config.start, Position { x: 1, y: 8 });
    }

    #[test]
    fn tick_interval_has_a_floor() {
        assert_eq!(clamp_tick_interval_ms(0), MIN_TICK_INTERVAL_MS);
        assert_eq!(clamp_tick_interval_ms(500), 500);
    }
}
