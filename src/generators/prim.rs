use rand::{Rng, rngs::StdRng};

use super::{connect, unvisited_neighbors};
use crate::maze::{Coord, Grid, Step, StepHook, notify};

/// Randomized Prim's algorithm. The frontier holds the unvisited, non-pattern
/// cells bordering the carved region, without duplicates.
pub fn randomized_prim(
    grid: &mut Grid,
    rng: &mut StdRng,
    start: Coord,
    mut on_step: StepHook<'_>,
) {
    grid.mark_visited(start);
    notify(&mut on_step, Step::Carve { grid, coord: start });

    let mut in_frontier = vec![false; grid.width() * grid.height()];
    let mut frontiers: Vec<Coord> = Vec::new();
    let mut extend_frontier = |grid: &Grid, frontiers: &mut Vec<Coord>, from: Coord| {
        for coord in unvisited_neighbors(grid, from) {
            let idx = grid.ravel_index(coord);
            // Only add the cell if it hasn't been added to the frontier before
            if !in_frontier[idx] {
                in_frontier[idx] = true;
                frontiers.push(coord);
            }
        }
    };
    extend_frontier(grid, &mut frontiers, start);

    while !frontiers.is_empty() {
        // Pick a random frontier cell and remove it from the frontier
        let frontier = frontiers.swap_remove(rng.random_range(0..frontiers.len()));

        // Neighbors of the frontier cell that already belong to the maze
        let visited_neighbors = grid
            .neighbors(frontier)
            .map(|(_, c)| c)
            .filter(|&c| grid.is_visited(c) && !grid.is_pattern(c))
            .collect::<Vec<_>>();

        if visited_neighbors.is_empty() {
            continue;
        }

        let neighbor = visited_neighbors[rng.random_range(0..visited_neighbors.len())];
        // Carve a passage between the frontier and the neighbor
        connect(grid, frontier, neighbor);
        grid.mark_visited(frontier);
        notify(
            &mut on_step,
            Step::Carve {
                grid,
                coord: frontier,
            },
        );

        extend_frontier(grid, &mut frontiers, frontier);
    }
}
