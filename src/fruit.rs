use rand::Rng;

use crate::grid::{Cell, Grid, Position};

/// Places a fruit on a free interior cell and tags it on the grid.
///
/// Returns `None` only when the board has no free interior cell.
pub fn spawn_fruit<R: Rng + ?Sized>(rng: &mut R, grid: &mut Grid) -> Option<Position> {
    let position = spawn_position(rng, grid)?;
    grid.set(position, Cell::Fruit);
    log::debug!("fruit spawned at ({}, {})", position.x, position.y);

    Some(position)
}

/// Picks a free interior cell by rejection sampling.
///
/// A random row is drawn first; full rows are skipped by stepping to the next
/// row, wrapping from the last interior row to the first. Inside the chosen
/// row a random column is drawn and occupied cells are skipped the same way.
/// The column scan never changes the row.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, grid: &Grid) -> Option<Position> {
    let size = grid.size();
    let rows = i32::from(size.interior_height());
    let columns = i32::from(size.interior_width());
    if rows == 0 || columns == 0 {
        return None;
    }

    let mut y = rng.gen_range(1..=rows);
    let mut rows_checked = 1;
    while grid.is_row_full(y) {
        if rows_checked == rows {
            log::warn!("fruit spawn requested on a full board");
            return None;
        }
        y = next_interior(y, rows);
        rows_checked += 1;
    }

    let mut x = rng.gen_range(1..=columns);
    for _ in 0..columns {
        let position = Position { x, y };
        if grid.cell(position) == Cell::Empty {
            return Some(position);
        }
        x = next_interior(x, columns);
    }

    None
}

fn next_interior(value: i32, interior_len: i32) -> i32 {
    if value >= interior_len { 1 } else { value + 1 }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::grid::{Cell, Grid, Position};

    use super::{spawn_fruit, spawn_position};

    #[test]
    fn fruit_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(GridSize {
            width: 8,
            height: 6,
        });
        grid.set(Position { x: 3, y: 2 }, Cell::Head);
        for x in 1..7 {
            grid.set(Position { x, y: 1 }, Cell::Body);
        }
        grid.set(Position { x: 2, y: 2 }, Cell::Body);

        for _ in 0..200 {
            let position = spawn_position(&mut rng, &grid).expect("board has room");
            assert_eq!(grid.cell(position), Cell::Empty);
            assert!(position.is_within_interior(grid.size()));
        }
    }

    #[test]
    fn full_rows_are_skipped() {
        let mut rng = StdRng::seed_from_u64(11);
        let size = GridSize {
            width: 6,
            height: 6,
        };
        let mut grid = Grid::new(size);
        for y in [1, 2, 4] {
            for x in 1..5 {
                grid.set(Position { x, y }, Cell::Body);
            }
        }

        for _ in 0..50 {
            let position = spawn_position(&mut rng, &grid).expect("board has room");
            assert_eq!(position.y, 3);
        }
    }

    #[test]
    fn column_scan_never_moves_to_another_row() {
        let size = GridSize {
            width: 7,
            height: 7,
        };
        let mut grid = Grid::new(size);
        // Only row 3 has room, and only in its first column, so every draw
        // that lands right of it must wrap within the row.
        for y in 1..6 {
            for x in 1..6 {
                if !(y == 3 && x == 1) {
                    grid.set(Position { x, y }, Cell::Body);
                }
            }
        }

        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let position = spawn_position(&mut rng, &grid).expect("one cell is free");
            assert_eq!(position, Position { x: 1, y: 3 });
        }
    }

    #[test]
    fn full_board_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        let size = GridSize {
            width: 5,
            height: 5,
        };
        let mut grid = Grid::new(size);
        for y in 1..4 {
            for x in 1..4 {
                grid.set(Position { x, y }, Cell::Body);
            }
        }

        assert_eq!(spawn_position(&mut rng, &grid), None);
    }

    #[test]
    fn spawned_fruit_is_tagged() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut grid = Grid::new(GridSize {
            width: 10,
            height: 10,
        });

        let position = spawn_fruit(&mut rng, &mut grid).expect("board is empty");

        assert_eq!(grid.cell(position), Cell::Fruit);
        assert_eq!(grid.count(Cell::Fruit), 1);
        assert_eq!(grid.row_occupancy(position.y), 1);
    }
}
