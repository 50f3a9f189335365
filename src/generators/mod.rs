use rand::{SeedableRng, rngs::StdRng};

pub mod imperfect;
mod prim;
mod recur_backtrack;

use prim::randomized_prim;
use recur_backtrack::recursive_backtrack;

use crate::{
    error::{MazeError, Result},
    maze::{Coord, Grid, StepHook},
};

/// Get a random number generator, optionally seeded for reproducibility.
pub(crate) fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Generator {
    /// Long winding corridors
    #[default]
    #[value(name = "backtracking")]
    RecurBacktrack,
    /// Branching, tree-like structure
    Prim,
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::RecurBacktrack => write!(f, "Recursive Backtracking (DFS)"),
            Generator::Prim => write!(f, "Prim's Algorithm"),
        }
    }
}

/// Carves a perfect maze over every non-pattern cell reachable from `entry`.
pub fn generate_maze(
    grid: &mut Grid,
    rng: &mut StdRng,
    generator: Generator,
    entry: Coord,
    on_step: StepHook<'_>,
) -> Result<()> {
    grid.check_bounds(entry)?;
    if grid.is_pattern(entry) {
        return Err(MazeError::BlockedCell { coord: entry });
    }

    tracing::debug!(%generator, ?entry, "generating maze");
    match generator {
        Generator::RecurBacktrack => recursive_backtrack(grid, rng, entry, on_step),
        Generator::Prim => randomized_prim(grid, rng, entry, on_step),
    }
    tracing::info!(
        %generator,
        passages = grid.open_passages(),
        "maze generated"
    );
    Ok(())
}

/// Neighbors a generator may carve into: in bounds, not visited, not part of the pattern.
fn unvisited_neighbors(grid: &Grid, coord: Coord) -> Vec<Coord> {
    grid.neighbors(coord)
        .map(|(_, c)| c)
        .filter(|&c| !grid.is_visited(c) && !grid.is_pattern(c))
        .collect()
}

/// Removes the wall between two adjacent, non-pattern cells.
fn connect(grid: &mut Grid, from: Coord, to: Coord) {
    let removed = crate::maze::Direction::between(from, to)
        .map(|direction| grid.remove_wall(from, direction));
    debug_assert!(
        matches!(removed, Some(Ok(_))),
        "generators only connect adjacent non-pattern cells"
    );
}
