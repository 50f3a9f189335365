//! Hex bitmask output file.
//!
//! One uppercase hex digit per cell (bit 0 north, 1 east, 2 south, 3 west, set
//! when the wall is present), one line per row, then a blank line, the entry
//! `x,y`, the exit `x,y` and the path string.

use std::{fmt::Write as _, path::Path};

use crate::{
    error::MazeError,
    maze::{Coord, Direction, Grid},
};

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to write maze to '{}': {source}", .path.display())]
    Write {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read maze from '{}': {source}", .path.display())]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error(transparent)]
    Maze(#[from] MazeError),
}

pub type Result<T> = std::result::Result<T, OutputError>;

/// Contents of a parsed output file.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeFile {
    pub grid: Grid,
    pub entry: Coord,
    pub exit: Coord,
    pub path: String,
}

/// Renders the output file contents.
pub fn encode(grid: &Grid, entry: Coord, exit: Coord, path: &str) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.height() + path.len() + 32);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            // Writing to a String cannot fail
            let _ = write!(out, "{:X}", grid[(x, y)].mask());
        }
        out.push('\n');
    }
    let _ = write!(
        out,
        "\n{},{}\n{},{}\n{}\n",
        entry.0, entry.1, exit.0, exit.1, path
    );
    out
}

/// Writes the output file to `file`.
pub fn write(
    file: impl AsRef<Path>,
    grid: &Grid,
    entry: Coord,
    exit: Coord,
    path: &str,
) -> Result<()> {
    let file = file.as_ref();
    std::fs::write(file, encode(grid, entry, exit, path)).map_err(|source| OutputError::Write {
        path: file.to_path_buf(),
        source,
    })?;
    tracing::info!(file = %file.display(), "maze written");
    Ok(())
}

/// Reads and parses an output file.
pub fn read(file: impl AsRef<Path>) -> Result<MazeFile> {
    let file = file.as_ref();
    let text = std::fs::read_to_string(file).map_err(|source| OutputError::Read {
        path: file.to_path_buf(),
        source,
    })?;
    decode(&text)
}

fn parse_error(line: usize, reason: impl Into<String>) -> OutputError {
    OutputError::Parse {
        line,
        reason: reason.into(),
    }
}

/// Parses only the hex grid block. Visited flags come back cleared and no cell
/// is marked as pattern.
pub fn decode_grid(rows: &[&str]) -> Result<Grid> {
    let width = rows.first().map_or(0, |row| row.len());
    let mut masks = Vec::with_capacity(width * rows.len());
    for (y, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(parse_error(
                y + 1,
                format!("expected {width} cells, found {}", row.len()),
            ));
        }
        for c in row.chars() {
            let mask = c
                .to_digit(16)
                .ok_or_else(|| parse_error(y + 1, format!("'{c}' is not a hex digit")))?;
            masks.push(mask as u8);
        }
    }
    Ok(Grid::from_masks(width, rows.len(), &masks)?)
}

fn parse_coord(line_no: usize, line: Option<&str>) -> Result<Coord> {
    let line = line.ok_or_else(|| parse_error(line_no, "missing coordinate line"))?;
    let (x, y) = line
        .split_once(',')
        .ok_or_else(|| parse_error(line_no, format!("expected 'x,y', found '{line}'")))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|_| parse_error(line_no, format!("invalid coordinate '{s}'")))
    };
    Ok((parse(x)?, parse(y)?))
}

/// Parses a whole output file.
pub fn decode(text: &str) -> Result<MazeFile> {
    let lines = text.lines().collect::<Vec<_>>();
    let blank = lines
        .iter()
        .position(|l| l.is_empty())
        .ok_or_else(|| parse_error(lines.len(), "missing blank line after the grid"))?;
    if blank == 0 {
        return Err(parse_error(1, "empty grid"));
    }
    let grid = decode_grid(&lines[..blank])?;

    let mut rest = lines[blank + 1..].iter().copied();
    let entry = parse_coord(blank + 2, rest.next())?;
    let exit = parse_coord(blank + 3, rest.next())?;
    let path = rest.next().unwrap_or_default().to_string();
    if let Some(bad) = path.chars().find(|&c| Direction::from_letter(c).is_none()) {
        return Err(parse_error(blank + 4, format!("invalid move '{bad}'")));
    }
    for coord in [entry, exit] {
        grid.check_bounds(coord)?;
    }

    Ok(MazeFile {
        grid,
        entry,
        exit,
        path,
    })
}
