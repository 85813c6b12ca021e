use crate::config::GridSize;

/// Grid position in logical cell coordinates. `y` grows upward.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the playable interior.
    #[must_use]
    pub fn is_within_interior(self, bounds: GridSize) -> bool {
        self.x >= 1
            && self.y >= 1
            && self.x < i32::from(bounds.width) - 1
            && self.y < i32::from(bounds.height) - 1
    }

    /// Returns this position with any out-of-interior axis moved to the
    /// opposite interior edge.
    #[must_use]
    pub fn wrapped_into_interior(self, bounds: GridSize) -> Self {
        Self {
            x: wrap_axis(self.x, i32::from(bounds.width)),
            y: wrap_axis(self.y, i32::from(bounds.height)),
        }
    }
}

fn wrap_axis(value: i32, edge: i32) -> i32 {
    let last_interior = edge - 2;
    if value < 1 {
        last_interior
    } else if value > last_interior {
        1
    } else {
        value
    }
}

/// Occupancy tag of a single cell.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Head,
    Body,
    Fruit,
}

/// Dense cell matrix with per-row occupancy counters.
///
/// A row's counter is the number of non-empty cells in it, so "is this row
/// full" is a single comparison against the interior width.
#[derive(Debug, Clone)]
pub struct Grid {
    size: GridSize,
    cells: Vec<Cell>,
    row_occupancy: Vec<u16>,
}

impl Grid {
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size.total_cells()],
            row_occupancy: vec![0; usize::from(size.height)],
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Returns the tag at `position`, or `Empty` for anything off the grid.
    #[must_use]
    pub fn cell(&self, position: Position) -> Cell {
        self.index_of(position)
            .map_or(Cell::Empty, |index| self.cells[index])
    }

    /// Writes a tag and keeps the row counter in step. Off-grid writes are ignored.
    pub fn set(&mut self, position: Position, cell: Cell) {
        let Some(index) = self.index_of(position) else {
            return;
        };

        let previous = std::mem::replace(&mut self.cells[index], cell);
        let row = &mut self.row_occupancy[position.y as usize];
        match (previous == Cell::Empty, cell == Cell::Empty) {
            (true, false) => *row += 1,
            (false, true) => *row -= 1,
            _ => {}
        }
    }

    pub fn clear(&mut self, position: Position) {
        self.set(position, Cell::Empty);
    }

    /// Resets every cell to `Empty`.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
        self.row_occupancy.fill(0);
    }

    /// Number of non-empty cells in row `y`.
    #[must_use]
    pub fn row_occupancy(&self, y: i32) -> u16 {
        usize::try_from(y)
            .ok()
            .and_then(|row| self.row_occupancy.get(row).copied())
            .unwrap_or(0)
    }

    #[must_use]
    pub fn is_row_full(&self, y: i32) -> bool {
        self.row_occupancy(y) >= self.size.interior_width()
    }

    /// Counts cells carrying `tag`.
    #[must_use]
    pub fn count(&self, tag: Cell) -> usize {
        self.cells.iter().filter(|cell| **cell == tag).count()
    }

    /// Iterates interior cells row by row, top row (highest `y`) first.
    pub fn interior_cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let width = i32::from(self.size.width);
        let height = i32::from(self.size.height);

        (1..height - 1).rev().flat_map(move |y| {
            (1..width - 1).map(move |x| {
                let position = Position { x, y };
                (position, self.cell(position))
            })
        })
    }

    fn index_of(&self, position: Position) -> Option<usize> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        let width = usize::from(self.size.width);

        if x >= width || y >= usize::from(self.size.height) {
            return None;
        }

        Some(y * width + x)
    }
}
