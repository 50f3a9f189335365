pub mod cell;
pub mod grid;
pub mod pattern;

use std::path::Path;

use rand::rngs::StdRng;

pub use cell::{Cell, Direction};
pub use grid::Grid;

use crate::{
    error::Result,
    generators::{self, Generator},
    output, solvers,
};

/// Cell coordinate `(x, y)`, with `(0, 0)` the top-left cell.
pub type Coord = (usize, usize);

/// Progress notification handed to an optional observer while the maze is being
/// generated or solved. Observers only read; the final maze is the same with or
/// without one.
#[derive(Debug, Clone, Copy)]
pub enum Step<'a> {
    /// A cell was just visited and, unless it is the start cell, connected to the maze.
    Carve { grid: &'a Grid, coord: Coord },
    /// The solver dequeued `coord`. `explored` is indexed in row-major order.
    Explore {
        grid: &'a Grid,
        coord: Coord,
        explored: &'a [bool],
    },
}

/// Optional observer callback, see [`Step`].
pub type StepHook<'h> = Option<&'h mut dyn FnMut(Step<'_>)>;

pub(crate) fn notify(on_step: &mut StepHook<'_>, step: Step<'_>) {
    if let Some(hook) = on_step.as_deref_mut() {
        hook(step);
    }
}

/// A maze instance: the grid plus the random source that shapes it.
pub struct Maze {
    grid: Grid,
    rng: StdRng,
}

impl Maze {
    /// Creates a fully walled maze. With a seed, generation and imperfection
    /// injection are reproducible.
    pub fn new(width: usize, height: usize, seed: Option<u64>) -> Result<Self> {
        let grid = Grid::new(width, height)?;
        tracing::debug!(width, height, ?seed, "created maze");
        Ok(Maze {
            grid,
            rng: generators::get_rng(seed),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the width of the maze in cells.
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Returns the height of the maze in cells.
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Stamps the pattern glyph into the middle of the maze.
    ///
    /// Returns `false`, leaving the maze untouched, if the maze is too small to
    /// hold the glyph with a one-cell margin.
    pub fn carve_pattern(&mut self) -> bool {
        self.try_carve_pattern().is_ok()
    }

    /// Like [`Maze::carve_pattern`] but reports why the pattern was not applied.
    pub fn try_carve_pattern(&mut self) -> Result<()> {
        let cells = pattern::placement(self.width(), self.height()).inspect_err(|e| {
            tracing::warn!("pattern not applied: {e}");
        })?;
        cells.iter().for_each(|&coord| self.grid.seal(coord));
        tracing::debug!(cells = cells.len(), "pattern carved");
        Ok(())
    }

    /// Carves a perfect maze starting from `entry`.
    ///
    /// Visited flags must be clean, so call [`Maze::reset_visited`] before
    /// generating again on the same instance.
    pub fn generate(
        &mut self,
        generator: Generator,
        entry: Coord,
        on_step: StepHook<'_>,
    ) -> Result<()> {
        generators::generate_maze(&mut self.grid, &mut self.rng, generator, entry, on_step)
    }

    /// Clears visited flags, keeping walls as they are.
    pub fn reset_visited(&mut self) {
        self.grid.reset_visited();
    }

    /// Knocks out extra walls with the given per-cell probability.
    /// Returns the number of walls removed.
    pub fn inject_imperfection(&mut self, probability: f64) -> Result<usize> {
        generators::imperfect::break_walls(&mut self.grid, &mut self.rng, probability)
    }

    /// Shortest path from `entry` to `exit`. An empty string means the exit is
    /// unreachable.
    pub fn solve(&self, entry: Coord, exit: Coord, on_step: StepHook<'_>) -> Result<String> {
        solvers::solve_bfs(&self.grid, entry, exit, on_step)
    }

    /// Writes the maze in hex format, followed by entry, exit and path.
    pub fn write_output(
        &self,
        path: impl AsRef<Path>,
        entry: Coord,
        exit: Coord,
        solution: &str,
    ) -> output::Result<()> {
        output::write(path, &self.grid, entry, exit, solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MazeError;

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(
            Maze::new(0, 0, None),
            Err(MazeError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_carve_pattern_on_small_maze() {
        let mut maze = Maze::new(5, 5, Some(1)).unwrap();
        assert!(!maze.carve_pattern());
        assert_eq!(maze.grid().pattern_cells().count(), 0);
    }

    #[test]
    fn test_carve_pattern() {
        let mut maze = Maze::new(15, 12, Some(1)).unwrap();
        assert!(maze.carve_pattern());
        let pattern = maze.grid().pattern_cells().collect::<Vec<_>>();
        assert_eq!(pattern.len(), 20);
        assert!(pattern.iter().all(|&c| {
            let cell = maze.grid()[c];
            cell.is_sealed() && cell.visited
        }));
    }

    #[test]
    fn test_hook_does_not_change_result() {
        let build = |with_hook: bool| {
            let mut maze = Maze::new(12, 9, Some(99)).unwrap();
            maze.carve_pattern();
            let mut steps = 0usize;
            let mut count = |_: Step<'_>| steps += 1;
            let hook: StepHook<'_> = if with_hook { Some(&mut count) } else { None };
            maze.generate(Generator::RecurBacktrack, (0, 0), hook).unwrap();
            maze.reset_visited();
            maze.inject_imperfection(0.3).unwrap();
            let path = maze.solve((0, 0), (11, 8), None).unwrap();
            (maze.grid().clone(), path)
        };
        assert_eq!(build(true), build(false));
    }
}
