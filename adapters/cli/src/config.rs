use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use maze_solver_rendering::{Color, GridGeometry, Palette};
use serde::Deserialize;

/// File consulted when `--config` is not provided.
pub(crate) const DEFAULT_CONFIG_PATH: &str = "maze-solver.toml";

/// Startup configuration read from TOML and refined by command-line flags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) surface: SurfaceConfig,
    pub(crate) solver: SolverConfig,
    pub(crate) palette: PaletteConfig,
    pub(crate) window: WindowConfig,
}

/// Dimensions of the drawing surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SurfaceConfig {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) cell_size: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            cell_size: 20,
        }
    }
}

/// Location and defaults of the external solve service.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SolverConfig {
    pub(crate) url: String,
    pub(crate) timeout_secs: u64,
    pub(crate) algorithm: String,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8000/solve".to_owned(),
            timeout_secs: 30,
            algorithm: "bfs".to_owned(),
        }
    }
}

/// Optional `#rrggbb` overrides for the default palette.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PaletteConfig {
    pub(crate) empty: Option<String>,
    pub(crate) wall: Option<String>,
    pub(crate) start: Option<String>,
    pub(crate) end: Option<String>,
    pub(crate) visited: Option<String>,
    pub(crate) path: Option<String>,
    pub(crate) grid_line: Option<String>,
}

impl PaletteConfig {
    /// Applies the overrides on top of the default palette.
    pub(crate) fn resolve(&self) -> Result<Palette> {
        let mut palette = Palette::default();
        let overrides = [
            (&self.empty, &mut palette.empty, "empty"),
            (&self.wall, &mut palette.wall, "wall"),
            (&self.start, &mut palette.start, "start"),
            (&self.end, &mut palette.end, "end"),
            (&self.visited, &mut palette.visited, "visited"),
            (&self.path, &mut palette.path, "path"),
            (&self.grid_line, &mut palette.grid_line, "grid_line"),
        ];
        for (value, slot, name) in overrides {
            if let Some(value) = value {
                *slot = Color::from_hex(value)
                    .with_context(|| format!("invalid palette colour for `{name}`"))?;
            }
        }
        Ok(palette)
    }
}

/// Window presentation settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WindowConfig {
    pub(crate) title: String,
    pub(crate) vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Maze Solver".to_owned(),
            vsync: true,
        }
    }
}

/// Command-line values that take precedence over the configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Overrides {
    pub(crate) server_url: Option<String>,
    pub(crate) cell_size: Option<u32>,
    pub(crate) width: Option<u32>,
    pub(crate) height: Option<u32>,
    pub(crate) algorithm: Option<String>,
}

impl Config {
    /// Loads the configuration file.
    ///
    /// An explicitly requested file must exist; the default file is optional
    /// and its absence yields the built-in defaults.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), Path::to_path_buf);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound && explicit.is_none() => {
                tracing::debug!(path = %path.display(), "no configuration file, using defaults");
                return Ok(Self::default());
            }
            Err(error) => {
                return Err(error).with_context(|| {
                    format!("failed to read configuration at {}", path.display())
                });
            }
        };

        Self::parse(&contents)
            .with_context(|| format!("failed to load configuration at {}", path.display()))
    }

    /// Parses configuration from TOML text.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse configuration toml contents")
    }

    /// Replaces file values with any provided command-line values.
    #[must_use]
    pub(crate) fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(url) = overrides.server_url {
            self.solver.url = url;
        }
        if let Some(cell_size) = overrides.cell_size {
            self.surface.cell_size = cell_size;
        }
        if let Some(width) = overrides.width {
            self.surface.width = width;
        }
        if let Some(height) = overrides.height {
            self.surface.height = height;
        }
        if let Some(algorithm) = overrides.algorithm {
            self.solver.algorithm = algorithm;
        }
        self
    }

    /// Grid geometry derived from the surface settings.
    pub(crate) fn geometry(&self) -> Result<GridGeometry> {
        let SurfaceConfig {
            width,
            height,
            cell_size,
        } = self.surface;
        GridGeometry::new(width, height, cell_size).context("invalid surface configuration")
    }
}
