use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding `tracing` filter directives.
pub(crate) const LOG_ENV: &str = "MAZE_SOLVER_LOG";

const DEFAULT_DIRECTIVES: &str = "maze_solver=info,warn";

/// Installs the global subscriber writing to stderr.
///
/// `--log-level` wins over [`LOG_ENV`], which wins over the built-in default.
pub(crate) fn init(level: Option<Level>) -> Result<()> {
    let env_filter = match level {
        Some(level) => EnvFilter::try_new(directives_for(level))
            .context("failed to build log filter from --log-level")?,
        None => EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES)),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(())
}

/// Directives that raise or lower this application's crates while keeping
/// dependencies at warnings.
fn directives_for(level: Level) -> String {
    format!("maze_solver={},warn", level.as_str().to_ascii_lowercase())
}
