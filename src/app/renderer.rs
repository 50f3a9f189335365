use std::{collections::HashMap, io::Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::maze::{Coord, Direction, Grid};

/// Parts of the drawing that can be colored independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Wall,
    Entry,
    Exit,
    Highlight,
    Pattern,
    Path,
    Unvisited,
    Explored,
}

impl Element {
    /// Whether the color fills the cell background instead of the glyph.
    fn is_background(self) -> bool {
        matches!(
            self,
            Element::Entry
                | Element::Exit
                | Element::Highlight
                | Element::Pattern
                | Element::Unvisited
        )
    }
}

/// Colors offered in the menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl ColorChoice {
    pub const ALL: [ColorChoice; 7] = [
        ColorChoice::Red,
        ColorChoice::Green,
        ColorChoice::Yellow,
        ColorChoice::Blue,
        ColorChoice::Magenta,
        ColorChoice::Cyan,
        ColorChoice::White,
    ];

    pub fn color(self) -> Color {
        match self {
            ColorChoice::Red => Color::Red,
            ColorChoice::Green => Color::Green,
            ColorChoice::Yellow => Color::Yellow,
            ColorChoice::Blue => Color::Blue,
            ColorChoice::Magenta => Color::Magenta,
            ColorChoice::Cyan => Color::Cyan,
            ColorChoice::White => Color::White,
        }
    }
}

impl std::fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{self:?}").with(self.color()))
    }
}

/// Color for every [`Element`].
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: HashMap<Element, Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            colors: HashMap::from([
                (Element::Wall, Color::White),
                (Element::Entry, Color::Green),
                (Element::Exit, Color::Red),
                (Element::Highlight, Color::Magenta),
                (Element::Pattern, Color::Yellow),
                (Element::Path, Color::Yellow),
                (Element::Unvisited, Color::DarkGrey),
                (Element::Explored, Color::Cyan),
            ]),
        }
    }
}

impl Palette {
    pub fn color(&self, element: Element) -> Color {
        self.colors.get(&element).copied().unwrap_or(Color::Reset)
    }

    pub fn set(&mut self, element: Element, color: Color) {
        self.colors.insert(element, color);
    }
}

/// What is being shown on top of the walls.
#[derive(Debug, Clone, Copy)]
pub enum Mode<'a> {
    /// Unvisited cells are shaded.
    Generating,
    /// Cells the solver has explored are marked.
    Solving { explored: &'a [bool] },
    /// The finished maze, with the solution cells when given.
    Finished { path: Option<&'a [Coord]> },
}

/// Everything needed to draw one frame besides the grid.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub entry: Coord,
    pub exit: Coord,
    pub highlight: Option<Coord>,
    pub mode: Mode<'a>,
}

/// A piece of text with an optional color role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub text: &'static str,
    pub element: Option<Element>,
}

impl Span {
    const fn wall(text: &'static str) -> Self {
        Span {
            text,
            element: Some(Element::Wall),
        }
    }

    const fn plain(text: &'static str) -> Self {
        Span {
            text,
            element: None,
        }
    }
}

/// Columns taken by the inside of a cell.
pub const CELL_WIDTH: usize = 3;

fn cell_span(grid: &Grid, view: &View<'_>, coord: Coord) -> Span {
    let (text, element) = if coord == view.entry {
        (" S ", Some(Element::Entry))
    } else if coord == view.exit {
        (" E ", Some(Element::Exit))
    } else if view.highlight == Some(coord) {
        ("   ", Some(Element::Highlight))
    } else if grid.is_pattern(coord) {
        ("   ", Some(Element::Pattern))
    } else {
        match view.mode {
            Mode::Generating if !grid.is_visited(coord) => ("   ", Some(Element::Unvisited)),
            Mode::Solving { explored } if explored[grid.ravel_index(coord)] => {
                (" * ", Some(Element::Explored))
            }
            Mode::Finished { path: Some(path) } if path.contains(&coord) => {
                (" # ", Some(Element::Path))
            }
            _ => ("   ", None),
        }
    };

    #[cfg(debug_assertions)]
    {
        use unicode_width::UnicodeWidthStr;
        assert_eq!(
            text.width(),
            CELL_WIDTH,
            "Each cell must occupy exactly {CELL_WIDTH} character widths."
        );
    }

    Span { text, element }
}

/// Lays out the maze as rows of spans: a border row, then for every maze row
/// one row of cells and one row of south walls.
pub fn layout(grid: &Grid, view: &View<'_>) -> Vec<Vec<Span>> {
    let mut rows = Vec::with_capacity(grid.height() * 2 + 1);

    let mut top = Vec::with_capacity(grid.width() * 2 + 1);
    for x in 0..grid.width() {
        top.push(Span::wall("+"));
        top.push(if grid.has_wall((x, 0), Direction::North) {
            Span::wall("---")
        } else {
            Span::plain("   ")
        });
    }
    top.push(Span::wall("+"));
    rows.push(top);

    for y in 0..grid.height() {
        let mut cells = Vec::with_capacity(grid.width() * 2 + 1);
        let mut walls = Vec::with_capacity(grid.width() * 2 + 1);
        for x in 0..grid.width() {
            let coord = (x, y);
            cells.push(if grid.has_wall(coord, Direction::West) {
                Span::wall("|")
            } else {
                Span::plain(" ")
            });
            cells.push(cell_span(grid, view, coord));

            walls.push(Span::wall("+"));
            walls.push(if grid.has_wall(coord, Direction::South) {
                Span::wall("---")
            } else {
                Span::plain("   ")
            });
        }
        let east_open = !grid.has_wall((grid.width() - 1, y), Direction::East);
        cells.push(if east_open {
            Span::plain(" ")
        } else {
            Span::wall("|")
        });
        walls.push(Span::wall("+"));
        rows.push(cells);
        rows.push(walls);
    }
    rows
}

/// Plain text rendering without colors.
pub fn to_text(grid: &Grid, view: &View<'_>) -> String {
    layout(grid, view)
        .iter()
        .map(|row| row.iter().map(|span| span.text).collect::<String>() + "\n")
        .collect()
}

/// Draws mazes to a terminal-like writer.
pub struct Renderer<W: Write> {
    out: W,
    pub palette: Palette,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, palette: Palette) -> Self {
        Self { out, palette }
    }

    /// Number of terminal rows a maze of `grid` takes.
    pub fn rows_for(grid: &Grid) -> u16 {
        u16::try_from(grid.height() * 2 + 1).unwrap_or(u16::MAX)
    }

    /// Whether the current terminal can show the whole maze.
    pub fn fits(grid: &Grid) -> bool {
        match terminal::size() {
            Ok((cols, rows)) => {
                (cols as usize) > grid.width() * (CELL_WIDTH + 1)
                    && rows > Self::rows_for(grid)
            }
            Err(_) => true,
        }
    }

    fn queue_rows(&mut self, rows: &[Vec<Span>]) -> std::io::Result<()> {
        for row in rows {
            for span in row {
                match span.element {
                    Some(element) => {
                        let color = self.palette.color(element);
                        let styled = if element.is_background() {
                            span.text.on(color)
                        } else {
                            span.text.with(color)
                        };
                        self.out.queue(style::PrintStyledContent(styled))?;
                    }
                    None => {
                        self.out.queue(style::Print(span.text))?;
                    }
                }
            }
            self.out.queue(style::Print("\r\n"))?;
        }
        Ok(())
    }

    /// Redraws the maze from the top-left corner of the screen.
    pub fn draw(&mut self, grid: &Grid, view: &View<'_>) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(0, 0))?;
        self.queue_rows(&layout(grid, view))?;
        self.out.flush()
    }

    /// Prints the maze at the current cursor position.
    pub fn print(&mut self, grid: &Grid, view: &View<'_>) -> std::io::Result<()> {
        self.queue_rows(&layout(grid, view))?;
        self.out.flush()
    }

    /// Clears the screen below the maze and prints a one-line message, cut to the
    /// terminal width.
    pub fn status(&mut self, grid: &Grid, message: &str, color: Color) -> std::io::Result<()> {
        let max_width = terminal::size().map_or(usize::MAX, |(cols, _)| cols as usize);
        let (message, _) = message.unicode_truncate(max_width);
        self.out.queue(cursor::MoveTo(0, Self::rows_for(grid)))?;
        self.out.queue(terminal::Clear(ClearType::FromCursorDown))?;
        self.out.queue(style::PrintStyledContent(message.with(color)))?;
        self.out.queue(style::Print("\r\n"))?;
        self.out.flush()
    }

    pub fn clear(&mut self) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(ClearType::All))?;
        self.out.queue(cursor::MoveTo(0, 0))?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
