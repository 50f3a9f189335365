use std::path::Path;

use amazing::{app::App, cli::Cli, config::MazeConfig};
use anyhow::Context;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

/// Send logs to a file, the terminal belongs to the renderer.
fn init_logging(file: &Path, level: tracing::Level) -> WorkerGuard {
    let dir = match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let name = file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("amazing.log"));
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(level)
        .init();
    guard
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(&cli.log_file, cli.log_level());

    let config = MazeConfig::load(&cli.config)
        .with_context(|| format!("invalid configuration in '{}'", cli.config.display()))?;
    tracing::info!(?config, generator = %cli.algorithm, "starting");

    let mut app = App::new(cli.options(config));
    app.run().inspect_err(|e| tracing::error!("{e:#}"))
}
