use std::fmt;

/// One of the four cardinal directions.
///
/// The declaration order is the fixed neighbor enumeration order used by every
/// traversal, which keeps generated mazes and solved paths reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Bit set in the hex output when the wall on this side is present.
    pub const fn bit(self) -> u8 {
        match self {
            Direction::North => 1,
            Direction::East => 2,
            Direction::South => 4,
            Direction::West => 8,
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Single letter used in path strings.
    pub const fn letter(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    pub fn from_letter(letter: char) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.letter() == letter)
    }

    /// Applies this direction to `coord`, returning `None` on underflow.
    /// The caller still has to check the upper bounds.
    pub fn step(self, coord: (usize, usize)) -> Option<(usize, usize)> {
        let (x, y) = coord;
        match self {
            Direction::North => y.checked_sub(1).map(|y| (x, y)),
            Direction::East => x.checked_add(1).map(|x| (x, y)),
            Direction::South => y.checked_add(1).map(|y| (x, y)),
            Direction::West => x.checked_sub(1).map(|x| (x, y)),
        }
    }

    /// Direction leading from `from` to the adjacent cell `to`.
    pub fn between(from: (usize, usize), to: (usize, usize)) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| d.step(from) == Some(to))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A maze cell: four wall flags plus the generation-time visited flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    walls: u8,
    pub visited: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Cell::WALLED
    }
}

impl Cell {
    /// All four walls present, not yet visited.
    pub const WALLED: Cell = Cell {
        walls: 0b1111,
        visited: false,
    };

    /// Builds a cell from its hex wall mask. Bits above the lowest four are ignored.
    pub const fn from_mask(mask: u8) -> Self {
        Cell {
            walls: mask & 0b1111,
            visited: false,
        }
    }

    /// Wall mask as written to the output file.
    pub const fn mask(&self) -> u8 {
        self.walls
    }

    pub const fn has_wall(&self, direction: Direction) -> bool {
        self.walls & direction.bit() != 0
    }

    pub fn is_sealed(&self) -> bool {
        self.walls == 0b1111
    }

    /// Setting a single side is crate-private: walls shared with a neighbor must be
    /// changed on both cells, which only [`Grid`](super::Grid) can do.
    pub(crate) fn set_wall(&mut self, direction: Direction, present: bool) {
        if present {
            self.walls |= direction.bit();
        } else {
            self.walls &= !direction.bit();
        }
    }
}
