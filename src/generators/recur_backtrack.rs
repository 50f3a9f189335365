use rand::{Rng, rngs::StdRng};

use super::{connect, unvisited_neighbors};
use crate::maze::{Coord, Grid, Step, StepHook, notify};

pub fn recursive_backtrack(
    grid: &mut Grid,
    rng: &mut StdRng,
    start: Coord,
    mut on_step: StepHook<'_>,
) {
    grid.mark_visited(start);
    notify(&mut on_step, Step::Carve { grid, coord: start });

    // The stack will keep only visited cells
    let mut stack = vec![start];

    while let Some(&cell) = stack.last() {
        let neighbors = unvisited_neighbors(grid, cell);

        if neighbors.is_empty() {
            // Dead end, backtrack
            stack.pop();
            continue;
        }

        let neighbor = neighbors[rng.random_range(0..neighbors.len())];
        connect(grid, cell, neighbor);
        grid.mark_visited(neighbor);
        notify(
            &mut on_step,
            Step::Carve {
                grid,
                coord: neighbor,
            },
        );
        // Carve the maze in that neighbor's direction next
        stack.push(neighbor);
    }
}
