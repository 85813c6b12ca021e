use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{GameConfig, GridSize};
use crate::fruit::spawn_fruit;
use crate::grid::{Cell, Grid, Position};
use crate::input::Direction;
use crate::snake::Snake;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
    Victory,
}

/// Why a session was lost.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Values shown in the status readout under the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct StatusReadout {
    pub head: Position,
    pub length: usize,
    pub fruit: Option<Position>,
}

/// Summary handed to the end screen.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EndReport {
    pub won: bool,
    pub death_reason: Option<DeathReason>,
    pub final_length: usize,
    /// Cells to vacate for the exit animation, tail first, head last.
    pub shrink_sequence: Vec<Position>,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    fruit: Option<Position>,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    pub tick_count: u64,
    head_vacated: bool,
    rng: StdRng,
}

impl GameSession {
    /// Creates a session seeded from OS entropy.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let mut grid = Grid::new(config.size);
        let snake = Snake::new(config.start);
        grid.set(snake.head(), Cell::Head);
        let fruit = spawn_fruit(&mut rng, &mut grid);

        log::info!(
            "session started: {}x{} board, head at ({}, {}), teleport walls {}",
            config.size.width,
            config.size.height,
            config.start.x,
            config.start.y,
            config.teleport_walls
        );

        Self {
            config,
            grid,
            snake,
            fruit,
            status: GameStatus::Playing,
            death_reason: None,
            tick_count: 0,
            head_vacated: false,
            rng,
        }
    }

    /// Advances the session by one tick using this tick's key, if any.
    ///
    /// Order: spawn fruit if none is active, move the head, advance the body,
    /// then resolve walls, fruit, victory and self-collision before the head
    /// is written. Does nothing once the session has ended.
    pub fn tick(&mut self, requested: Option<Direction>) {
        if self.is_over() {
            return;
        }

        self.tick_count += 1;
        if self.fruit.is_none() {
            self.fruit = spawn_fruit(&mut self.rng, &mut self.grid);
        }

        let Some(previous) = self.snake.move_head(requested) else {
            return;
        };

        self.advance_body(previous);

        let mut head = self.snake.head();
        if !head.is_within_interior(self.bounds()) {
            if !self.config.teleport_walls {
                self.end(GameStatus::GameOver, Some(DeathReason::WallCollision));
                return;
            }
            head = head.wrapped_into_interior(self.bounds());
            self.snake.relocate_head(head);
        }

        if self.fruit == Some(head) {
            self.snake.grow();
            self.fruit = None;
            self.grid.clear(head);
        }

        if self.snake.length() >= self.config.playable_cells() {
            self.grid.set(head, Cell::Head);
            self.end(GameStatus::Victory, None);
            return;
        }

        if self.grid.cell(head) == Cell::Body {
            self.end(GameStatus::GameOver, Some(DeathReason::SelfCollision));
            return;
        }

        self.grid.set(head, Cell::Head);
    }

    fn advance_body(&mut self, previous: Position) {
        if self.snake.length() > 1 {
            self.grid.set(previous, Cell::Body);
        }

        if let Some(freed) = self.snake.advance_body(previous) {
            self.grid.clear(freed);
        }
    }

    fn end(&mut self, status: GameStatus, death_reason: Option<DeathReason>) {
        self.status = status;
        self.death_reason = death_reason;
        log::info!(
            "session ended after {} ticks: {:?} ({:?}), length {}",
            self.tick_count,
            status,
            death_reason,
            self.snake.length()
        );
    }

    /// Replaces the snake and rebuilds the grid tags around it.
    ///
    /// Segments outside the interior are kept on the snake but not tagged.
    /// An active fruit under the new snake is dropped.
    pub fn replace_snake(&mut self, snake: Snake) {
        self.snake = snake;
        self.head_vacated = false;
        self.rebuild_grid();
    }

    /// Replaces the active fruit. A fruit on the snake or off the interior is ignored.
    pub fn replace_fruit(&mut self, fruit: Option<Position>) {
        self.fruit = fruit;
        self.rebuild_grid();
    }

    fn rebuild_grid(&mut self) {
        let bounds = self.bounds();
        self.grid.reset();

        for segment in self.snake.body() {
            if segment.is_within_interior(bounds) {
                self.grid.set(*segment, Cell::Body);
            }
        }

        let head = self.snake.head();
        if head.is_within_interior(bounds) {
            self.grid.set(head, Cell::Head);
        }

        self.fruit = self
            .fruit
            .filter(|fruit| fruit.is_within_interior(bounds) && !self.snake.occupies(*fruit));
        if let Some(fruit) = self.fruit {
            self.grid.set(fruit, Cell::Fruit);
        }
    }

    /// Vacates one more cell of the exit animation, tail first.
    ///
    /// The head is vacated last, and only if it was written to the board
    /// (a head that crashed off the board or into the body is skipped).
    ///
    /// Returns the freed cell, or `None` once nothing is left or while the
    /// session is still running.
    pub fn shrink_step(&mut self) -> Option<Position> {
        if !self.is_over() {
            return None;
        }

        if let Some(tail) = self.snake.pop_tail() {
            self.grid.clear(tail);
            return Some(tail);
        }

        if self.head_vacated {
            return None;
        }
        self.head_vacated = true;

        let head = self.snake.head();
        if self.grid.cell(head) != Cell::Head {
            return None;
        }
        self.grid.clear(head);
        Some(head)
    }

    /// Returns the end-of-game summary, or `None` while still playing.
    #[must_use]
    pub fn end_report(&self) -> Option<EndReport> {
        if !self.is_over() {
            return None;
        }

        let mut shrink_sequence: Vec<Position> = self.snake.body().rev().copied().collect();
        let head = self.snake.head();
        if !self.head_vacated && self.grid.cell(head) == Cell::Head {
            shrink_sequence.push(head);
        }

        Some(EndReport {
            won: self.status == GameStatus::Victory,
            death_reason: self.death_reason,
            final_length: self.snake.length(),
            shrink_sequence,
        })
    }

    #[must_use]
    pub fn status_readout(&self) -> StatusReadout {
        StatusReadout {
            head: self.snake.head(),
            length: self.snake.length(),
            fruit: self.fruit,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver | GameStatus::Victory)
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.status == GameStatus::Victory
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.size
    }

    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn fruit(&self) -> Option<Position> {
        self.fruit
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::grid::{Cell, Position};
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{DeathReason, GameSession, GameStatus};

    fn session(width: i64, height: i64, teleport_walls: bool) -> GameSession {
        GameSession::new_with_seed(GameConfig::clamped(width, height, 5, 5, teleport_walls), 1)
    }

    #[test]
    fn new_session_has_one_head_and_one_fruit() {
        let state = session(10, 10, true);

        assert_eq!(state.grid().count(Cell::Head), 1);
        assert_eq!(state.grid().count(Cell::Fruit), 1);
        assert_eq!(state.grid().count(Cell::Body), 0);
        assert_eq!(state.status, GameStatus::Playing);
    }

    #[test]
    fn snake_waits_for_first_direction() {
        let mut state = session(10, 10, true);

        state.tick(None);
        state.tick(None);

        assert_eq!(state.snake().head(), Position { x: 5, y: 5 });
        assert_eq!(state.grid().cell(Position { x: 5, y: 5 }), Cell::Head);
    }

    #[test]
    fn snake_grows_after_eating_fruit() {
        let mut state = session(10, 10, true);
        state.replace_fruit(Some(Position { x: 6, y: 5 }));

        state.tick(Some(Direction::Right));
        assert_eq!(state.snake().length(), 2);
        assert_eq!(state.fruit(), None);
        assert_eq!(state.snake().body_len(), 0);

        state.replace_fruit(Some(Position { x: 1, y: 8 }));
        state.tick(None);
        assert_eq!(state.snake().length(), 2);
        assert_eq!(state.snake().body_len(), 1);
        assert_eq!(state.grid().cell(Position { x: 6, y: 5 }), Cell::Body);
        assert_eq!(state.grid().cell(Position { x: 7, y: 5 }), Cell::Head);
    }

    #[test]
    fn fruit_respawns_on_the_tick_after_eating() {
        let mut state = session(10, 10, true);
        state.replace_fruit(Some(Position { x: 6, y: 5 }));

        state.tick(Some(Direction::Right));
        assert_eq!(state.grid().count(Cell::Fruit), 0);

        state.tick(None);
        match state.fruit() {
            Some(fruit) => {
                assert_eq!(state.grid().cell(fruit), Cell::Fruit);
                assert!(!state.snake().occupies(fruit));
            }
            // Respawned straight into the head's path and eaten again.
            None => assert_eq!(state.snake().length(), 3),
        }
    }

    #[test]
    fn wall_collision_ends_the_game_without_teleport() {
        let mut state = session(10, 10, false);
        state.replace_snake(Snake::from_segments(
            Position { x: 8, y: 5 },
            Vec::new(),
            1,
            Some(Direction::Right),
        ));
        state.replace_fruit(Some(Position { x: 1, y: 1 }));

        state.tick(None);

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.death_reason, Some(DeathReason::WallCollision));
        assert_eq!(state.grid().count(Cell::Head), 0);

        let tick_count = state.tick_count;
        state.tick(Some(Direction::Up));
        assert_eq!(state.tick_count, tick_count);
    }

    #[test]
    fn teleport_wraps_to_opposite_edge() {
        let mut state = session(20, 20, true);
        state.replace_snake(Snake::from_segments(
            Position { x: 18, y: 7 },
            Vec::new(),
            1,
            Some(Direction::Right),
        ));
        state.replace_fruit(Some(Position { x: 10, y: 1 }));

        state.tick(None);

        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.snake().head(), Position { x: 1, y: 7 });
        assert_eq!(state.grid().cell(Position { x: 1, y: 7 }), Cell::Head);
        assert_eq!(state.grid().cell(Position { x: 18, y: 7 }), Cell::Empty);
    }

    #[test]
    fn teleport_wraps_downward_exit_to_top_row() {
        let mut state = session(10, 10, true);
        state.replace_snake(Snake::from_segments(
            Position { x: 4, y: 1 },
            Vec::new(),
            1,
            Some(Direction::Down),
        ));
        state.replace_fruit(Some(Position { x: 1, y: 1 }));

        state.tick(None);

        assert_eq!(state.snake().head(), Position { x: 4, y: 8 });
    }

    #[test]
    fn entering_the_vacating_tail_cell_is_safe() {
        let mut state = session(10, 10, false);
        // Length-4 loop: tail sits directly above the head.
        state.replace_snake(Snake::from_segments(
            Position { x: 2, y: 2 },
            vec![
                Position { x: 3, y: 2 },
                Position { x: 3, y: 3 },
                Position { x: 2, y: 3 },
            ],
            4,
            Some(Direction::Left),
        ));
        state.replace_fruit(Some(Position { x: 8, y: 8 }));

        state.tick(Some(Direction::Up));

        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.snake().head(), Position { x: 2, y: 3 });
        assert_eq!(state.grid().count(Cell::Body), 3);
    }

    #[test]
    fn growing_snake_hits_its_own_tail() {
        let mut state = session(10, 10, false);
        // Same loop, but still growing, so the tail stays put this tick.
        state.replace_snake(Snake::from_segments(
            Position { x: 2, y: 2 },
            vec![
                Position { x: 3, y: 2 },
                Position { x: 3, y: 3 },
                Position { x: 2, y: 3 },
            ],
            5,
            Some(Direction::Left),
        ));
        state.replace_fruit(Some(Position { x: 8, y: 8 }));

        state.tick(Some(Direction::Up));

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.death_reason, Some(DeathReason::SelfCollision));
        assert_eq!(state.tick_count, 1);
    }

    #[test]
    fn looping_into_the_body_ends_the_game() {
        let mut state = session(10, 10, true);
        state.replace_snake(Snake::from_segments(
            Position { x: 4, y: 4 },
            vec![
                Position { x: 5, y: 4 },
                Position { x: 5, y: 5 },
                Position { x: 4, y: 5 },
                Position { x: 3, y: 5 },
            ],
            5,
            Some(Direction::Left),
        ));
        state.replace_fruit(Some(Position { x: 8, y: 8 }));

        state.tick(Some(Direction::Up));

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.death_reason, Some(DeathReason::SelfCollision));
    }

    #[test]
    fn filling_the_board_is_a_victory() {
        let mut state = GameSession::new_with_seed(GameConfig::clamped(5, 5, 1, 1, false), 9);
        // Serpentine over a 3x3 interior with one free cell left at (3, 3).
        state.replace_snake(Snake::from_segments(
            Position { x: 2, y: 3 },
            vec![
                Position { x: 1, y: 3 },
                Position { x: 1, y: 2 },
                Position { x: 2, y: 2 },
                Position { x: 3, y: 2 },
                Position { x: 3, y: 1 },
                Position { x: 2, y: 1 },
                Position { x: 1, y: 1 },
            ],
            8,
            Some(Direction::Right),
        ));
        state.replace_fruit(Some(Position { x: 3, y: 3 }));

        state.tick(None);

        assert_eq!(state.status, GameStatus::Victory);
        assert!(state.is_won());
        assert_eq!(state.snake().length(), 9);

        let report = state.end_report().expect("game has ended");
        assert!(report.won);
        assert_eq!(report.final_length, 9);
    }

    #[test]
    fn shrink_steps_follow_the_end_report() {
        let mut state = session(10, 10, false);
        state.replace_snake(Snake::from_segments(
            Position { x: 8, y: 4 },
            vec![Position { x: 7, y: 4 }, Position { x: 6, y: 4 }],
            3,
            Some(Direction::Right),
        ));
        state.replace_fruit(Some(Position { x: 1, y: 1 }));
        assert!(state.end_report().is_none());
        assert_eq!(state.shrink_step(), None);

        state.tick(None);
        let report = state.end_report().expect("game has ended");
        assert_eq!(report.death_reason, Some(DeathReason::WallCollision));
        // The head left the board, so only body cells remain to vacate.
        assert_eq!(
            report.shrink_sequence,
            vec![Position { x: 7, y: 4 }, Position { x: 8, y: 4 }]
        );

        let mut vacated = Vec::new();
        while let Some(position) = state.shrink_step() {
            vacated.push(position);
        }
        assert_eq!(vacated, report.shrink_sequence);
        assert_eq!(state.grid().count(Cell::Body), 0);
    }

    #[test]
    fn status_readout_reports_head_length_and_fruit() {
        let mut state = session(10, 10, true);
        state.replace_fruit(Some(Position { x: 2, y: 2 }));

        let readout = state.status_readout();

        assert_eq!(readout.head, Position { x: 5, y: 5 });
        assert_eq!(readout.length, 1);
        assert_eq!(readout.fruit, Some(Position { x: 2, y: 2 }));
    }
}
