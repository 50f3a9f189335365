//! Turns a perfect maze into an imperfect one by knocking out extra walls.
//!
//! A removal is refused when it would leave a 3x3 block of cells with no
//! internal walls, so loops appear without opening up large empty rooms.

use rand::{Rng, rngs::StdRng};

use crate::{
    error::{MazeError, Result},
    maze::{Coord, Direction, Grid},
};

/// Side length of the smallest open block that is not allowed.
const ROOM_SIZE: usize = 3;

/// Default per-cell chance of attempting an extra removal.
pub const DEFAULT_PROBABILITY: f64 = 0.1;

/// Visits every non-pattern cell in row-major order and, with `probability`,
/// tries to remove the wall on one uniformly chosen side.
///
/// Returns the number of walls actually removed.
pub fn break_walls(grid: &mut Grid, rng: &mut StdRng, probability: f64) -> Result<usize> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(MazeError::InvalidProbability(probability));
    }

    let mut removed = 0;
    for coord in grid.coords() {
        if grid.is_pattern(coord) || !rng.random_bool(probability) {
            continue;
        }
        let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
        let Some(neighbor) = grid.neighbor(coord, direction) else {
            continue;
        };
        if grid.is_pattern(neighbor) || creates_open_room(grid, coord, neighbor) {
            continue;
        }
        if grid.remove_wall(coord, direction)? {
            removed += 1;
        }
    }
    tracing::info!(probability, removed, "walls removed for imperfection");
    Ok(removed)
}

/// Whether opening the wall between `a` and `b` would make any 3x3 window that
/// contains either cell fully open.
fn creates_open_room(grid: &Grid, a: Coord, b: Coord) -> bool {
    if grid.width() < ROOM_SIZE || grid.height() < ROOM_SIZE {
        return false;
    }
    let window_starts = |c: usize, len: usize| {
        c.saturating_sub(ROOM_SIZE - 1)..=c.min(len - ROOM_SIZE)
    };
    [a, b].into_iter().any(|(x, y)| {
        window_starts(x, grid.width()).any(|start_x| {
            window_starts(y, grid.height())
                .any(|start_y| is_room_open(grid, (start_x, start_y), Some((a, b))))
        })
    })
}

/// Checks the window with top-left corner `origin` for internal walls, treating
/// the wall between the cells of `removed` as already gone.
fn is_room_open(grid: &Grid, origin: Coord, removed: Option<(Coord, Coord)>) -> bool {
    let is_removed = |c: Coord, n: Coord| removed.is_some_and(|r| r == (c, n) || r == (n, c));
    let (x0, y0) = origin;

    (y0..y0 + ROOM_SIZE).all(|y| {
        (x0..x0 + ROOM_SIZE).all(|x| {
            let c = (x, y);
            if grid.is_pattern(c) {
                return false;
            }
            // Only the east and south walls inside the window count
            let east_open = x + 1 == x0 + ROOM_SIZE
                || !grid.has_wall(c, Direction::East)
                || is_removed(c, (x + 1, y));
            let south_open = y + 1 == y0 + ROOM_SIZE
                || !grid.has_wall(c, Direction::South)
                || is_removed(c, (x, y + 1));
            east_open && south_open
        })
    })
}
