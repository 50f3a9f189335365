use super::cell::{Cell, Direction};
use super::Coord;
use crate::error::{MazeError, Result};

/// Fixed-size array of cells together with the pattern mask.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Box<[Cell]>,
    pattern: Box<[bool]>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Creates a fully walled, unvisited grid.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimension { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or(MazeError::InvalidDimension { width, height })?;
        Ok(Grid {
            cells: vec![Cell::WALLED; len].into_boxed_slice(),
            pattern: vec![false; len].into_boxed_slice(),
            width,
            height,
        })
    }

    /// Builds a grid from per-cell wall masks in row-major order.
    /// Wall symmetry is not checked here.
    pub fn from_masks(width: usize, height: usize, masks: &[u8]) -> Result<Self> {
        let mut grid = Grid::new(width, height)?;
        if masks.len() != grid.cells.len() {
            return Err(MazeError::MaskCount {
                expected: grid.cells.len(),
                found: masks.len(),
            });
        }
        grid.cells
            .iter_mut()
            .zip(masks)
            .for_each(|(cell, &mask)| *cell = Cell::from_mask(mask));
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn ravel_index(&self, coord: Coord) -> usize {
        coord.1 * self.width + coord.0
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    pub fn check_bounds(&self, coord: Coord) -> Result<()> {
        if self.is_in_bounds(coord) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                coord,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        self.is_in_bounds(coord)
            .then(|| &self.cells[self.ravel_index(coord)])
    }

    /// Neighbor of `coord` in `direction`, if it lies inside the grid.
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        direction
            .step(coord)
            .filter(|&next| self.is_in_bounds(next))
    }

    /// In-bounds neighbors in the fixed N, E, S, W order.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.neighbor(coord, d).map(|n| (d, n)))
    }

    /// Neighbors that can be walked to from `coord` because the shared wall is open.
    pub fn open_neighbors(&self, coord: Coord) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        self.neighbors(coord)
            .filter(move |&(d, _)| !self[coord].has_wall(d))
    }

    pub fn is_pattern(&self, coord: Coord) -> bool {
        self.is_in_bounds(coord) && self.pattern[self.ravel_index(coord)]
    }

    pub fn pattern_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords().filter(|&c| self.is_pattern(c))
    }

    pub fn is_visited(&self, coord: Coord) -> bool {
        self[coord].visited
    }

    pub(crate) fn mark_visited(&mut self, coord: Coord) {
        let idx = self.ravel_index(coord);
        self.cells[idx].visited = true;
    }

    /// Clears every visited flag except on pattern cells, which stay visited.
    /// Walls are left untouched.
    pub fn reset_visited(&mut self) {
        self.cells
            .iter_mut()
            .zip(self.pattern.iter())
            .for_each(|(cell, &is_pattern)| cell.visited = is_pattern);
    }

    pub fn has_wall(&self, coord: Coord, direction: Direction) -> bool {
        self[coord].has_wall(direction)
    }

    /// Removes the wall on `direction` side of `from`, on both cells sharing it.
    ///
    /// Returns `Ok(true)` if a wall was removed and `Ok(false)` if it was already open.
    ///
    /// # Errors
    /// * `OutOfBounds` if `from` or its neighbor lies outside the grid
    /// * `BlockedCell` if either cell belongs to the pattern
    pub fn remove_wall(&mut self, from: Coord, direction: Direction) -> Result<bool> {
        self.check_bounds(from)?;
        let to = self
            .neighbor(from, direction)
            .ok_or(MazeError::OutOfBounds {
                coord: direction.step(from).unwrap_or(from),
                width: self.width,
                height: self.height,
            })?;
        if let Some(coord) = [from, to].into_iter().find(|&c| self.is_pattern(c)) {
            return Err(MazeError::BlockedCell { coord });
        }
        if !self.has_wall(from, direction) {
            return Ok(false);
        }
        let (from_idx, to_idx) = (self.ravel_index(from), self.ravel_index(to));
        self.cells[from_idx].set_wall(direction, false);
        self.cells[to_idx].set_wall(direction.opposite(), false);
        Ok(true)
    }

    /// Turns `coord` into a pattern cell: every wall closed, on both sides, and
    /// marked visited. The cell is excluded from all later wall removals.
    pub(crate) fn seal(&mut self, coord: Coord) {
        let idx = self.ravel_index(coord);
        for direction in Direction::ALL {
            self.cells[idx].set_wall(direction, true);
            if let Some(next) = self.neighbor(coord, direction) {
                let next_idx = self.ravel_index(next);
                self.cells[next_idx].set_wall(direction.opposite(), true);
            }
        }
        self.cells[idx].visited = true;
        self.pattern[idx] = true;
    }

    /// Number of open passages between adjacent cells.
    pub fn open_passages(&self) -> usize {
        self.coords()
            .map(|c| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(|&d| self.neighbor(c, d).is_some() && !self.has_wall(c, d))
                    .count()
            })
            .sum()
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.cells[self.ravel_index(index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            Grid::new(0, 4),
            Err(MazeError::InvalidDimension {
                width: 0,
                height: 4
            })
        );
        assert!(Grid::new(3, 0).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn test_remove_wall_is_symmetric() {
        let mut grid = Grid::new(5, 5).unwrap();
        assert_eq!(grid.remove_wall((1, 1), Direction::East), Ok(true));
        assert!(!grid.has_wall((1, 1), Direction::East));
        assert!(!grid.has_wall((2, 1), Direction::West));
        // Trying to remove the same wall again should return false
        assert_eq!(grid.remove_wall((2, 1), Direction::West), Ok(false));
        assert_eq!(grid.open_passages(), 1);
    }

    #[test]
    fn test_remove_border_wall_fails() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert!(matches!(
            grid.remove_wall((0, 0), Direction::North),
            Err(MazeError::OutOfBounds { .. })
        ));
        assert!(matches!(
            grid.remove_wall((3, 0), Direction::West),
            Err(MazeError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_sealed_cell_rejects_removal() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.remove_wall((0, 1), Direction::East).unwrap();
        grid.seal((1, 1));
        // Sealing restored the neighbor's side of the wall
        assert!(grid.has_wall((0, 1), Direction::East));
        assert!(grid.is_visited((1, 1)));
        assert_eq!(
            grid.remove_wall((1, 0), Direction::South),
            Err(MazeError::BlockedCell { coord: (1, 1) })
        );
    }

    #[test]
    fn test_reset_keeps_pattern_visited() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.seal((2, 2));
        grid.mark_visited((0, 0));
        grid.reset_visited();
        assert!(!grid.is_visited((0, 0)));
        assert!(grid.is_visited((2, 2)));
    }

    #[test]
    fn test_neighbor_order() {
        let grid = Grid::new(3, 3).unwrap();
        let around_center = grid.neighbors((1, 1)).map(|(_, c)| c).collect::<Vec<_>>();
        assert_eq!(around_center, vec![(1, 0), (2, 1), (1, 2), (0, 1)]);
        let around_corner = grid.neighbors((0, 0)).map(|(d, _)| d).collect::<Vec<_>>();
        assert_eq!(around_corner, vec![Direction::East, Direction::South]);
    }

    #[test]
    fn test_from_masks_checks_count() {
        assert_eq!(
            Grid::from_masks(3, 2, &[0xF; 5]),
            Err(MazeError::MaskCount {
                expected: 6,
                found: 5
            })
        );
        let grid = Grid::from_masks(2, 1, &[0xD, 0x7]).unwrap();
        assert!(!grid.has_wall((0, 0), Direction::East));
        assert!(!grid.has_wall((1, 0), Direction::West));
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = Grid::new(5, 5).unwrap();
        assert!(!grid.is_in_bounds((5, 5)));
        assert!(!grid.is_in_bounds((0, 5)));
        assert!(!grid.is_in_bounds((5, 0)));
        assert!(grid.is_in_bounds((4, 4)));
        assert!(grid.get((9, 0)).is_none());
    }
}
