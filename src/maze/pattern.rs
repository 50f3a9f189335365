//! The "42" glyph stamped into the middle of the maze as a permanent obstacle.

use super::Coord;
use crate::error::{MazeError, Result};

/// Glyph template, `#` marks a sealed cell.
const GLYPH: [&str; 5] = [
    "# # ###", //
    "# #   #", //
    "### ###", //
    "  # #  ", //
    "  # ###", //
];

/// Free cells required around the glyph on every side.
const MARGIN: usize = 1;

/// Width and height of the glyph template.
pub fn footprint() -> (usize, usize) {
    (GLYPH[0].len(), GLYPH.len())
}

/// Smallest maze that can hold the glyph.
pub fn min_maze_size() -> (usize, usize) {
    let (w, h) = footprint();
    (w + 2 * MARGIN, h + 2 * MARGIN)
}

/// Coordinates covered by the glyph when centered in a `width` x `height` maze.
pub fn placement(width: usize, height: usize) -> Result<Vec<Coord>> {
    let (min_width, min_height) = min_maze_size();
    if width < min_width || height < min_height {
        return Err(MazeError::PatternTooLarge {
            width,
            height,
            min_width,
            min_height,
        });
    }
    let (glyph_width, glyph_height) = footprint();
    let start_x = (width - glyph_width) / 2;
    let start_y = (height - glyph_height) / 2;

    Ok(GLYPH
        .iter()
        .enumerate()
        .flat_map(|(row, line)| {
            line.chars()
                .enumerate()
                .filter(|&(_, c)| c == '#')
                .map(move |(col, _)| (start_x + col, start_y + row))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_small() {
        assert!(matches!(
            placement(8, 20),
            Err(MazeError::PatternTooLarge { min_width: 9, .. })
        ));
        assert!(placement(20, 6).is_err());
        assert!(placement(9, 7).is_ok());
    }

    #[test]
    fn test_centered_with_floor_division() {
        let cells = placement(10, 8).unwrap();
        // (10 - 7) / 2 = 1 and (8 - 5) / 2 = 1
        assert!(cells.contains(&(1, 1)));
        assert!(cells.contains(&(7, 5)));
        assert!(!cells.contains(&(2, 1)));
        assert_eq!(cells.len(), 20);
        assert!(cells.iter().all(|&(x, y)| x >= 1 && y >= 1 && x < 9 && y < 7));
    }
}
