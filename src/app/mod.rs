pub mod renderer;

use std::{
    io::{Stdout, Write},
    time::Duration,
};

use anyhow::Context;
use clap::ValueEnum;
use crossterm::{
    QueueableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    app::renderer::{ColorChoice, Element, Mode, Palette, Renderer, View},
    config::MazeConfig,
    generators::Generator,
    maze::{Coord, Maze, Step},
    solvers::trace_path,
};

/// Everything the app needs to build mazes.
#[derive(Debug, Clone)]
pub struct Options {
    pub config: MazeConfig,
    pub generator: Generator,
    /// Draw every generation and solving step
    pub animate: bool,
    /// Pause after each animated step
    pub delay: Duration,
    /// Show the menu after building, instead of printing the maze and exiting
    pub interactive: bool,
    /// Fail instead of warning when the pattern does not fit
    pub require_pattern: bool,
    /// Chance per cell of removing an extra wall when the maze is not perfect
    pub imperfection: f64,
}

/// A built maze with its shortest path.
pub struct Session {
    pub maze: Maze,
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Regenerate,
    TogglePath,
    WallColor,
    PatternColor,
    ChangeAlgorithm,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 6] = [
        MenuAction::Regenerate,
        MenuAction::TogglePath,
        MenuAction::WallColor,
        MenuAction::PatternColor,
        MenuAction::ChangeAlgorithm,
        MenuAction::Quit,
    ];
}

impl std::fmt::Display for MenuAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MenuAction::Regenerate => "Regenerate maze",
            MenuAction::TogglePath => "Show/Hide path",
            MenuAction::WallColor => "Change wall color",
            MenuAction::PatternColor => "Change pattern color",
            MenuAction::ChangeAlgorithm => "Change generation algorithm",
            MenuAction::Quit => "Quit",
        };
        write!(f, "{label}")
    }
}

pub struct App {
    options: Options,
    palette: Palette,
    show_path: bool,
}

/// Draws one animation frame and waits for `delay`.
fn draw_step<W: Write>(
    renderer: &mut Renderer<W>,
    step: Step<'_>,
    (entry, exit): (Coord, Coord),
    delay: Duration,
) {
    let (grid, view) = match step {
        Step::Carve { grid, coord } => (
            grid,
            View {
                entry,
                exit,
                highlight: Some(coord),
                mode: Mode::Generating,
            },
        ),
        Step::Explore {
            grid,
            coord,
            explored,
        } => (
            grid,
            View {
                entry,
                exit,
                highlight: Some(coord),
                mode: Mode::Solving { explored },
            },
        ),
    };
    // A failed frame only costs the animation, the maze itself is unaffected
    if let Err(e) = renderer.draw(grid, &view) {
        tracing::warn!("failed to draw animation frame: {e}");
    }
    std::thread::sleep(delay);
}

impl App {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            palette: Palette::default(),
            show_path: false,
        }
    }

    /// Set a panic hook to restore terminal state on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Builds a maze from the options: pattern, generation, imperfection, solving,
    /// and finally the output file. With a renderer and animation enabled, every
    /// step is drawn.
    pub fn build<W: Write>(&self, renderer: Option<&mut Renderer<W>>) -> anyhow::Result<Session> {
        self.build_with_seed(self.options.config.seed, renderer)
    }

    /// Like [`App::build`] with an explicit seed in place of the configured one.
    pub fn build_with_seed<W: Write>(
        &self,
        seed: Option<u64>,
        renderer: Option<&mut Renderer<W>>,
    ) -> anyhow::Result<Session> {
        let options = &self.options;
        let config = &options.config;
        let ends = (config.entry, config.exit);

        let mut maze = Maze::new(config.width, config.height, seed)?;
        if options.require_pattern {
            maze.try_carve_pattern()
                .context("the maze is too small for the required pattern")?;
        } else {
            maze.carve_pattern();
        }

        let delay = options.delay;
        let mut animator = renderer
            .filter(|_| options.animate)
            .map(|r| move |step: Step<'_>| draw_step(&mut *r, step, ends, delay));

        maze.generate(
            options.generator,
            config.entry,
            animator.as_mut().map(|f| f as &mut dyn FnMut(Step<'_>)),
        )
        .with_context(|| format!("failed to generate maze from entry {:?}", config.entry))?;
        maze.reset_visited();

        if !config.perfect {
            maze.inject_imperfection(options.imperfection)?;
        }

        let path = maze
            .solve(
                config.entry,
                config.exit,
                animator.as_mut().map(|f| f as &mut dyn FnMut(Step<'_>)),
            )
            .context("failed to solve maze")?;
        if path.is_empty() {
            tracing::warn!(entry = ?config.entry, exit = ?config.exit, "exit is unreachable");
        }

        maze.write_output(&config.output_file, config.entry, config.exit, &path)
            .context("failed to write output file")?;
        Ok(Session { maze, path })
    }

    fn summary(&self, session: &Session) -> String {
        let config = &self.options.config;
        let path = if session.path.is_empty() {
            "exit unreachable".to_string()
        } else {
            format!("path length {}", session.path.len())
        };
        format!(
            "{} | {}x{} | {} | saved to {}",
            self.options.generator,
            config.width,
            config.height,
            path,
            config.output_file.display()
        )
    }

    /// Seed used when a menu action rebuilds the maze. Regenerate replays the
    /// configured seed; switching algorithm starts from fresh entropy.
    fn rebuild_seed(&self, action: MenuAction) -> Option<u64> {
        match action {
            MenuAction::ChangeAlgorithm => None,
            _ => self.options.config.seed,
        }
    }

    fn final_view<'a>(&self, cells: Option<&'a [Coord]>) -> View<'a> {
        View {
            entry: self.options.config.entry,
            exit: self.options.config.exit,
            highlight: None,
            mode: Mode::Finished {
                path: cells.filter(|_| self.show_path),
            },
        }
    }

    /// Main application entry point
    pub fn run(&mut self) -> anyhow::Result<()> {
        if !self.options.interactive {
            let session = self.build::<Stdout>(None)?;
            let cells = trace_path(self.options.config.entry, &session.path);
            self.show_path = true;
            let mut renderer = Renderer::new(std::io::stdout(), self.palette.clone());
            renderer.print(session.maze.grid(), &self.final_view(cells.as_deref()))?;
            println!("{}", self.summary(&session));
            return Ok(());
        }

        let mut stdout = std::io::stdout();
        App::setup_terminal(&mut stdout)?;
        let result = self.menu_loop(&mut stdout);
        App::restore_terminal(&mut stdout)?;
        result
    }

    fn menu_loop(&mut self, stdout: &mut Stdout) -> anyhow::Result<()> {
        let mut renderer = Renderer::new(std::io::stdout(), self.palette.clone());
        let mut session = self.build(Some(&mut renderer))?;

        loop {
            let grid = session.maze.grid();
            let cells = trace_path(self.options.config.entry, &session.path);
            renderer.clear()?;
            renderer.draw(grid, &self.final_view(cells.as_deref()))?;
            if Renderer::<Stdout>::fits(grid) {
                renderer.status(grid, &self.summary(&session), Color::Green)?;
            } else {
                renderer.status(
                    grid,
                    "The maze is larger than the terminal, enlarge it or zoom out.",
                    Color::Yellow,
                )?;
            }

            // Esc behaves like Quit
            let action = App::select_from_menu(
                stdout,
                "Select an action (use arrow keys and Enter, or Esc to quit):",
                &MenuAction::ALL,
            )?
            .unwrap_or(MenuAction::Quit);
            tracing::info!(?action, "menu action");

            match action {
                MenuAction::Regenerate => {
                    let seed = self.rebuild_seed(action);
                    session = self.build_with_seed(seed, Some(&mut renderer))?;
                }
                MenuAction::TogglePath => {
                    self.show_path = !self.show_path;
                }
                MenuAction::WallColor | MenuAction::PatternColor => {
                    let element = if action == MenuAction::WallColor {
                        Element::Wall
                    } else {
                        Element::Pattern
                    };
                    if let Some(choice) =
                        App::select_from_menu(stdout, "Select a color:", &ColorChoice::ALL)?
                    {
                        renderer.palette.set(element, choice.color());
                        self.palette = renderer.palette.clone();
                    }
                }
                MenuAction::ChangeAlgorithm => {
                    if let Some(&generator) = App::select_from_menu(
                        stdout,
                        "Select maze generation algorithm:",
                        &Generator::value_variants().iter().collect::<Vec<_>>(),
                    )? {
                        self.options.generator = generator;
                        let seed = self.rebuild_seed(action);
                        session = self.build_with_seed(seed, Some(&mut renderer))?;
                    }
                }
                MenuAction::Quit => {
                    let config = &self.options.config;
                    session
                        .maze
                        .write_output(&config.output_file, config.entry, config.exit, &session.path)
                        .context("failed to write output file")?;
                    break;
                }
            }
        }
        Ok(())
    }

    /// Present a menu of options to the user and let them select one using arrow keys
    /// Returns None if user cancels input with Esc
    fn select_from_menu<T: std::fmt::Display + Copy>(
        stdout: &mut Stdout,
        prompt: &str,
        options: &[T],
    ) -> std::io::Result<Option<T>> {
        if options.is_empty() {
            return Ok(None);
        }

        queue!(stdout, cursor::Hide, cursor::SavePosition)?;

        let mut selected = 0;

        let selected_option = loop {
            queue!(
                stdout,
                cursor::RestorePosition,
                terminal::Clear(ClearType::FromCursorDown)
            )?;

            stdout.queue(style::PrintStyledContent(
                prompt.with(Color::Yellow).attribute(Attribute::Bold),
            ))?;

            for (i, option) in options.iter().enumerate() {
                if i == selected {
                    stdout.queue(style::SetAttribute(Attribute::Reverse))?;
                }
                stdout.queue(style::Print(format!("\r\n{option}")))?;
                if i == selected {
                    stdout.queue(style::SetAttribute(Attribute::NoReverse))?;
                }
            }
            stdout.queue(style::Print("\r\n"))?;

            stdout.flush()?;

            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if kind != event::KeyEventKind::Press {
                    continue;
                }
                match code {
                    KeyCode::Up => {
                        selected = match selected {
                            0 => options.len() - 1,
                            _ => selected - 1,
                        };
                    }
                    KeyCode::Down => {
                        selected = (selected + 1) % options.len();
                    }
                    KeyCode::Enter => break Some(options[selected]),
                    KeyCode::Esc => break None,
                    _ => {}
                }
            }
        };

        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown),
            cursor::Show
        )?;
        stdout.flush()?;

        Ok(selected_option)
    }
}
