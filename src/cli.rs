use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{
    app::Options, config::MazeConfig, generators::Generator,
    generators::imperfect::DEFAULT_PROBABILITY,
};

/// Generate, solve and export mazes with a "42" stamped in the middle.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Path to the KEY=VALUE configuration file
    pub config: PathBuf,

    /// Generation algorithm
    #[arg(short, long, value_enum, default_value_t = Generator::RecurBacktrack)]
    pub algorithm: Generator,

    /// Draw each generation and solving step
    #[arg(long)]
    pub animate: bool,

    /// Milliseconds to wait between animation frames
    #[arg(long, default_value_t = 5)]
    pub delay_ms: u64,

    /// Print the maze and exit instead of opening the menu
    #[arg(long)]
    pub no_menu: bool,

    /// Fail when the maze is too small for the pattern
    #[arg(long)]
    pub require_pattern: bool,

    /// Chance per cell of removing an extra wall when PERFECT=False
    #[arg(long, default_value_t = DEFAULT_PROBABILITY)]
    pub imperfection: f64,

    /// File that receives the logs
    #[arg(long, default_value = "amazing.log")]
    pub log_file: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// Combines the flags with a loaded config file.
    pub fn options(&self, config: MazeConfig) -> Options {
        Options {
            config,
            generator: self.algorithm,
            animate: self.animate,
            delay: Duration::from_millis(self.delay_ms),
            interactive: !self.no_menu,
            require_pattern: self.require_pattern,
            imperfection: self.imperfection,
        }
    }
}
