#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the maze solver editor.

mod config;
mod logging;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use maze_solver_core::{AlgorithmId, ALGORITHMS};
use maze_solver_editor::EditorSession;
use maze_solver_rendering::{Color, Presentation, RenderingBackend};
use maze_solver_rendering_macroquad::MacroquadBackend;
use maze_solver_solve_client::HttpSolver;
use tracing::Level;

use crate::config::{Config, Overrides};

/// Interactive grid maze editor backed by a remote path-finding service.
#[derive(Parser, Debug)]
#[command(name = "maze-solver", version)]
struct CliArgs {
    /// Configuration file (defaults to `maze-solver.toml` when present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Endpoint accepting solve requests.
    #[arg(long, value_name = "URL")]
    server_url: Option<String>,

    /// Edge length of a grid cell in pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    cell_size: Option<u32>,

    /// Width of the drawing surface in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Height of the drawing surface in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Algorithm selected at startup (bfs, dfs, dijkstra, iddfs, astar, bidirectional_bfs).
    #[arg(long)]
    algorithm: Option<String>,

    /// Log level for the application's own crates; overrides `MAZE_SOLVER_LOG`.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<Level>,
}

impl CliArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            server_url: self.server_url.clone(),
            cell_size: self.cell_size,
            width: self.width,
            height: self.height,
            algorithm: self.algorithm.clone(),
        }
    }
}

/// Entry point for the maze solver command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    logging::init(args.log_level)?;

    let config = Config::load(args.config.as_deref())?.with_overrides(args.overrides());
    let geometry = config.geometry()?;
    let palette = config.palette.resolve()?;

    let algorithm = AlgorithmId::new(config.solver.algorithm.as_str());
    if !ALGORITHMS.iter().any(|info| info.id == algorithm.as_str()) {
        tracing::warn!(
            algorithm = algorithm.as_str(),
            "algorithm is not in the built-in catalogue; forwarding it to the service as-is"
        );
    }

    let solver = HttpSolver::new(
        config.solver.url.as_str(),
        Duration::from_secs(config.solver.timeout_secs),
    )
    .context("failed to construct solve client")?;
    tracing::info!(
        url = solver.url(),
        rows = geometry.grid().rows(),
        columns = geometry.grid().columns(),
        cell_size = geometry.cell_size(),
        "starting maze solver"
    );

    let mut session = EditorSession::new(geometry, palette, Arc::new(solver));
    let presentation = Presentation::new(
        config.window.title.as_str(),
        Color::from_rgb_u8(236, 240, 241),
        session.initial_surface(),
        algorithm,
    );

    MacroquadBackend::new()
        .with_vsync(config.window.vsync)
        .run(presentation, move |input, surface| session.update(input, surface))
        .context("rendering backend terminated with an error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn argument_definitions_are_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn flags_map_onto_overrides() {
        let args = CliArgs::try_parse_from([
            "maze-solver",
            "--server-url",
            "http://solver.test/solve",
            "--cell-size",
            "10",
            "--algorithm",
            "astar",
            "--log-level",
            "debug",
        ])
        .expect("valid arguments");

        assert_eq!(args.log_level, Some(Level::DEBUG));
        assert_eq!(
            args.overrides(),
            Overrides {
                server_url: Some("http://solver.test/solve".to_owned()),
                cell_size: Some(10),
                algorithm: Some("astar".to_owned()),
                ..Overrides::default()
            }
        );
    }

    #[test]
    fn zero_cell_size_is_rejected_by_the_parser() {
        assert!(CliArgs::try_parse_from(["maze-solver", "--cell-size", "0"]).is_err());
    }
}
