mod bfs;

pub use bfs::solve_bfs;

use crate::maze::{Coord, Direction};

/// Cells visited when following `path` from `entry`, entry included.
///
/// Returns `None` if the path contains a letter other than N, E, S, W or steps
/// below coordinate zero.
pub fn trace_path(entry: Coord, path: &str) -> Option<Vec<Coord>> {
    let mut cells = Vec::with_capacity(path.len() + 1);
    cells.push(entry);
    let mut current = entry;
    for letter in path.chars() {
        current = Direction::from_letter(letter)?.step(current)?;
        cells.push(current);
    }
    Some(cells)
}
