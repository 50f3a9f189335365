use crate::maze::Coord;

/// Errors raised by the maze core.
///
/// An unreachable exit is not represented here: the solver reports it as an
/// empty path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MazeError {
    /// Width or height is not strictly positive.
    #[error("invalid maze dimensions {width}x{height}: both must be greater than 0")]
    InvalidDimension { width: usize, height: usize },

    /// The grid cannot fit the pattern glyph plus a one-cell margin.
    #[error(
        "maze {width}x{height} is too small for the pattern (needs at least {min_width}x{min_height})"
    )]
    PatternTooLarge {
        width: usize,
        height: usize,
        min_width: usize,
        min_height: usize,
    },

    /// A coordinate outside the grid was used.
    #[error("coordinate ({}, {}) is outside the {width}x{height} maze", .coord.0, .coord.1)]
    OutOfBounds {
        coord: Coord,
        width: usize,
        height: usize,
    },

    /// Generation was asked to start inside the pattern, or a wall removal
    /// touched a pattern cell.
    #[error("coordinate ({}, {}) lies inside the pattern and cannot be traversed", .coord.0, .coord.1)]
    BlockedCell { coord: Coord },

    /// A wall-mask list does not hold exactly one mask per cell.
    #[error("expected {expected} wall masks for the grid, found {found}")]
    MaskCount { expected: usize, found: usize },

    /// Injection probability outside of `[0, 1]`.
    #[error("imperfection probability {0} must be between 0 and 1")]
    InvalidProbability(f64),
}

pub type Result<T> = std::result::Result<T, MazeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message() {
        let err = MazeError::OutOfBounds {
            coord: (7, 2),
            width: 5,
            height: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("(7, 2)"));
        assert!(msg.contains("5x5"));
    }

    #[test]
    fn test_pattern_too_large_message() {
        let err = MazeError::PatternTooLarge {
            width: 4,
            height: 4,
            min_width: 9,
            min_height: 7,
        };
        assert!(err.to_string().contains("9x7"));
    }

    #[test]
    fn test_mask_count_message() {
        let err = MazeError::MaskCount {
            expected: 6,
            found: 5,
        };
        assert_eq!(err.to_string(), "expected 6 wall masks for the grid, found 5");
    }
}
