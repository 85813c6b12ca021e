use std::collections::VecDeque;

use crate::grid::Position;
use crate::input::{Direction, resolve_direction};

/// Mutable snake state: head, trailing body and committed direction.
///
/// `body` is ordered by recency: the front is the cell the head vacated most
/// recently, the back is the tail. It never holds more than `length - 1`
/// segments.
#[derive(Debug, Clone)]
pub struct Snake {
    head: Position,
    body: VecDeque<Position>,
    length: usize,
    direction: Option<Direction>,
}

impl Snake {
    /// Creates a stationary one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        Self {
            head: start,
            body: VecDeque::new(),
            length: 1,
            direction: None,
        }
    }

    /// Creates a snake from explicit parts; `body` is listed front (next to
    /// the head) to tail.
    ///
    /// `length` is raised to cover the given segments and surplus segments
    /// beyond `length - 1` are dropped. A `length` larger than the segment
    /// count describes a snake that is still growing.
    #[must_use]
    pub fn from_segments(
        head: Position,
        body: Vec<Position>,
        length: usize,
        direction: Option<Direction>,
    ) -> Self {
        let length = length.max(1);
        let mut body = VecDeque::from(body);
        body.truncate(length - 1);

        Self {
            head,
            body,
            length,
            direction,
        }
    }

    /// Resolves this tick's direction and moves the head one cell.
    ///
    /// Returns the previous head position, or `None` when the snake has no
    /// direction yet and stays put.
    pub fn move_head(&mut self, requested: Option<Direction>) -> Option<Position> {
        let direction = resolve_direction(self.direction, requested)?;
        if requested.is_some_and(|wanted| wanted != direction) {
            log::debug!("rejected reversal towards {requested:?}, keeping {direction:?}");
        }

        let previous = self.head;
        let (dx, dy) = direction.delta();
        self.head = Position {
            x: previous.x + dx,
            y: previous.y + dy,
        };
        self.direction = Some(direction);

        Some(previous)
    }

    /// Pushes the vacated head cell onto the body and drops the tail once the
    /// body reaches the snake length. Returns the cell that became free.
    pub fn advance_body(&mut self, vacated: Position) -> Option<Position> {
        self.body.push_front(vacated);
        if self.body.len() >= self.length {
            return self.body.pop_back();
        }

        None
    }

    /// Moves the head without touching the body (wall teleport).
    pub fn relocate_head(&mut self, position: Position) {
        self.head = position;
    }

    /// Adds one to the length; the tail stays put on the next advance.
    pub fn grow(&mut self) {
        self.length += 1;
    }

    /// Removes and returns the tail segment.
    pub fn pop_tail(&mut self) -> Option<Position> {
        self.body.pop_back()
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.head
    }

    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns the committed direction, `None` before the first move.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Iterates body segments from the one behind the head to the tail.
    pub fn body(&self) -> impl DoubleEndedIterator<Item = &Position> {
        self.body.iter()
    }

    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Returns true if the head or any body segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.head == position || self.body.contains(&position)
    }
}
