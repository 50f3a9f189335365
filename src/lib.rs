pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod generators;
pub mod maze;
pub mod output;
pub mod solvers;

pub use error::{MazeError, Result};
pub use generators::Generator;
pub use maze::{Coord, Direction, Grid, Maze};
