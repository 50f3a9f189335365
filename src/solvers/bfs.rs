use std::collections::VecDeque;

use crate::{
    error::Result,
    maze::{Coord, Direction, Grid, Step, StepHook, notify},
};

/// Breadth-first search from `start` to `goal`, moving only through open walls.
///
/// Neighbors are expanded in N, E, S, W order, so among several shortest paths
/// the first one found in that order wins. Returns the moves as a string of
/// `N`/`E`/`S`/`W` letters, or an empty string when `goal` cannot be reached.
/// Pattern cells are sealed, so a pattern `goal` is simply unreachable.
pub fn solve_bfs(
    grid: &Grid,
    start: Coord,
    goal: Coord,
    mut on_step: StepHook<'_>,
) -> Result<String> {
    grid.check_bounds(start)?;
    grid.check_bounds(goal)?;

    let mut explored = vec![false; grid.width() * grid.height()];
    // Direction taken to enter each cell, used to walk back from the goal
    let mut came_from: Vec<Option<Direction>> = vec![None; explored.len()];
    let mut queue = VecDeque::from([start]);
    explored[grid.ravel_index(start)] = true;

    let mut goal_reached = false;
    while let Some(current) = queue.pop_front() {
        notify(
            &mut on_step,
            Step::Explore {
                grid,
                coord: current,
                explored: &explored,
            },
        );

        if current == goal {
            goal_reached = true;
            break;
        }

        for (direction, neighbor) in grid.open_neighbors(current) {
            let idx = grid.ravel_index(neighbor);
            if !explored[idx] {
                explored[idx] = true;
                came_from[idx] = Some(direction);
                queue.push_back(neighbor);
            }
        }
    }

    if !goal_reached {
        tracing::info!(?start, ?goal, "no path found");
        return Ok(String::new());
    }

    let mut moves = Vec::new();
    let mut current = goal;
    while current != start {
        let Some(direction) = came_from[grid.ravel_index(current)] else {
            unreachable!("every explored cell except the start has a parent");
        };
        moves.push(direction.letter());
        current = direction
            .opposite()
            .step(current)
            .unwrap_or_else(|| unreachable!("parent cell lies inside the grid"));
    }
    let path = moves.into_iter().rev().collect::<String>();
    tracing::info!(?start, ?goal, length = path.len(), "path found");
    Ok(path)
}
