#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the maze solver editor.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems translate user input into
//! [`Command`] values, the world executes those commands via its `apply` entry
//! point and reports the outcome as [`Event`] values. Adapters observe the
//! world exclusively through read-only [`GridView`] snapshots.
//!
//! The wire contract with the external solve service also lives here:
//! [`SolveRequest`] and [`SolveResponse`] serialise cell coordinates as
//! `[row, col]` pairs and cell states as `0`/`1` integers.

use serde::{Deserialize, Serialize};

/// Location of a single grid cell expressed as row and column indices.
///
/// Serialises as a `[row, col]` pair to match the solve service contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

impl From<[u32; 2]> for CellCoord {
    fn from([row, column]: [u32; 2]) -> Self {
        Self::new(row, column)
    }
}

impl From<CellCoord> for [u32; 2] {
    fn from(cell: CellCoord) -> Self {
        [cell.row, cell.column]
    }
}

/// State stored for every cell of the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Walkable cell.
    #[default]
    Empty,
    /// Blocked cell painted by the user.
    Wall,
}

impl CellState {
    /// Integer encoding used on the wire: `0` for empty, `1` for wall.
    #[must_use]
    pub const fn wire_value(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Wall => 1,
        }
    }
}

/// Dimensions of the rectangular grid measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    rows: u32,
    columns: u32,
}

impl GridSize {
    /// Creates a new size descriptor.
    #[must_use]
    pub const fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Reports whether the cell lies within `[0, rows) × [0, columns)`.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.row() < self.rows && cell.column() < self.columns
    }

    /// Row-major index of the cell, or `None` when it lies outside the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }

        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }
}

/// Placement phase driving how primary pointer presses are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlacementPhase {
    /// The next primary press designates the start cell.
    #[default]
    AwaitingStart,
    /// The next primary press designates the end cell.
    AwaitingEnd,
    /// Primary presses and drags paint walls.
    PaintingWalls,
}

/// Commands that express all permissible grid mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Allocates an all-empty grid with the provided dimensions and resets designations.
    ConfigureGrid {
        /// Dimensions of the new grid.
        size: GridSize,
    },
    /// Resets every cell, both designations and the phase without reallocating the grid.
    ClearGrid,
    /// Designates the start cell.
    PlaceStart {
        /// Cell that becomes the start.
        cell: CellCoord,
    },
    /// Designates the end cell.
    PlaceEnd {
        /// Cell that becomes the end.
        cell: CellCoord,
    },
    /// Marks a cell as a wall.
    PaintWall {
        /// Cell receiving the wall.
        cell: CellCoord,
    },
    /// Resets a cell to empty, clearing any designation it carries.
    EraseCell {
        /// Cell being erased.
        cell: CellCoord,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a grid with the provided dimensions was allocated.
    GridConfigured {
        /// Dimensions of the allocated grid.
        size: GridSize,
    },
    /// Confirms that the grid was reset to its initial state.
    GridCleared,
    /// Confirms that the start cell was designated.
    StartPlaced {
        /// Designated start cell.
        cell: CellCoord,
    },
    /// Confirms that the end cell was designated.
    EndPlaced {
        /// Designated end cell.
        cell: CellCoord,
    },
    /// Confirms that a wall was painted.
    WallPainted {
        /// Cell that became a wall.
        cell: CellCoord,
    },
    /// Confirms that a plain cell was reset to empty.
    CellErased {
        /// Cell that was erased.
        cell: CellCoord,
    },
    /// Reports that erasing removed the start designation.
    StartCleared {
        /// Cell that previously held the start.
        cell: CellCoord,
    },
    /// Reports that erasing removed the end designation.
    EndCleared {
        /// Cell that previously held the end.
        cell: CellCoord,
    },
    /// Announces that the placement phase changed.
    PhaseChanged {
        /// Phase active before the command.
        from: PlacementPhase,
        /// Phase active after the command.
        to: PlacementPhase,
    },
    /// Reports that a mutation was rejected by a grid invariant.
    PlacementRejected {
        /// Cell targeted by the rejected command.
        cell: CellCoord,
        /// Invariant that rejected the command.
        reason: PlacementError,
    },
}

impl Event {
    /// Reports whether the event reflects a change of grid state that warrants a redraw.
    #[must_use]
    pub const fn changes_grid(&self) -> bool {
        !matches!(self, Self::PlacementRejected { .. })
    }
}

/// Reasons a grid mutation may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementError {
    /// The targeted cell lies outside the grid.
    OutOfBounds,
    /// A start cell is already designated.
    StartAlreadyPlaced,
    /// An end cell is already designated.
    EndAlreadyPlaced,
    /// The targeted cell is the current start.
    OccupiedByStart,
    /// The targeted cell is the current end.
    OccupiedByEnd,
}

/// Read-only view into the grid, its designations and the placement phase.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    cells: &'a [CellState],
    size: GridSize,
    start: Option<CellCoord>,
    end: Option<CellCoord>,
    phase: PlacementPhase,
}

impl<'a> GridView<'a> {
    /// Captures a new view backed by the provided row-major cell slice.
    #[must_use]
    pub const fn new(
        cells: &'a [CellState],
        size: GridSize,
        start: Option<CellCoord>,
        end: Option<CellCoord>,
        phase: PlacementPhase,
    ) -> Self {
        Self {
            cells,
            size,
            start,
            end,
            phase,
        }
    }

    /// Dimensions of the grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Currently designated start cell.
    #[must_use]
    pub const fn start(&self) -> Option<CellCoord> {
        self.start
    }

    /// Currently designated end cell.
    #[must_use]
    pub const fn end(&self) -> Option<CellCoord> {
        self.end
    }

    /// Active placement phase.
    #[must_use]
    pub const fn phase(&self) -> PlacementPhase {
        self.phase
    }

    /// State of the provided cell, or `None` when it lies outside the grid.
    #[must_use]
    pub fn state(&self, cell: CellCoord) -> Option<CellState> {
        self.size
            .index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the cell is the current start or end.
    #[must_use]
    pub fn is_endpoint(&self, cell: CellCoord) -> bool {
        self.start == Some(cell) || self.end == Some(cell)
    }

    /// Iterates over every cell in row-major order alongside its state.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellState)> + 'a {
        let columns = self.size.columns().max(1);
        self.cells.iter().enumerate().map(move |(index, state)| {
            let index = index as u32;
            (CellCoord::new(index / columns, index % columns), *state)
        })
    }

    /// Encodes the grid as rows of `0`/`1` integers.
    #[must_use]
    pub fn wire_rows(&self) -> Vec<Vec<u8>> {
        let columns = usize::try_from(self.size.columns()).unwrap_or(0);
        if columns == 0 {
            return Vec::new();
        }

        self.cells
            .chunks(columns)
            .map(|row| row.iter().map(|state| state.wire_value()).collect())
            .collect()
    }
}

/// Opaque identifier of the algorithm the solve service should run.
///
/// The editor never interprets the value; it is forwarded verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlgorithmId(String);

impl AlgorithmId {
    /// Creates an identifier from any string-like value.
    #[must_use]
    pub fn new<T>(value: T) -> Self
    where
        T: Into<String>,
    {
        Self(value.into())
    }

    /// Borrowed textual representation of the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human readable label from the catalogue, falling back to the raw identifier.
    #[must_use]
    pub fn label(&self) -> &str {
        ALGORITHMS
            .iter()
            .find(|algorithm| algorithm.id == self.0)
            .map_or(self.as_str(), |algorithm| algorithm.label)
    }
}

impl From<&str> for AlgorithmId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Catalogue entry describing an algorithm offered by the selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlgorithmInfo {
    /// Identifier sent to the solve service.
    pub id: &'static str,
    /// Label presented to the user.
    pub label: &'static str,
}

/// Algorithms accepted by the reference solve service, in selector order.
pub const ALGORITHMS: [AlgorithmInfo; 6] = [
    AlgorithmInfo {
        id: "bfs",
        label: "Breadth-first search",
    },
    AlgorithmInfo {
        id: "dfs",
        label: "Depth-first search",
    },
    AlgorithmInfo {
        id: "dijkstra",
        label: "Dijkstra",
    },
    AlgorithmInfo {
        id: "iddfs",
        label: "Iterative deepening DFS",
    },
    AlgorithmInfo {
        id: "astar",
        label: "A*",
    },
    AlgorithmInfo {
        id: "bidirectional_bfs",
        label: "Bidirectional BFS",
    },
];

/// Request body submitted to the solve service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveRequest {
    /// Grid rows encoded as `0` (empty) and `1` (wall).
    pub grid: Vec<Vec<u8>>,
    /// Start cell as a `[row, col]` pair.
    pub start: CellCoord,
    /// End cell as a `[row, col]` pair.
    pub end: CellCoord,
    /// Algorithm the service should run.
    pub algorithm: AlgorithmId,
}

impl SolveRequest {
    /// Snapshots the grid into a request.
    ///
    /// Returns `None` unless both the start and the end are designated.
    #[must_use]
    pub fn from_view(view: &GridView<'_>, algorithm: AlgorithmId) -> Option<Self> {
        let start = view.start()?;
        let end = view.end()?;
        Some(Self {
            grid: view.wire_rows(),
            start,
            end,
            algorithm,
        })
    }
}

/// Successful response body returned by the solve service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResponse {
    /// Cells in the order the algorithm explored them; duplicates are tolerated.
    pub visited: Vec<CellCoord>,
    /// Cells composing the discovered path; empty when no path exists.
    pub path: Vec<CellCoord>,
}

impl SolveResponse {
    /// Reports whether the service found a path.
    #[must_use]
    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }
}
