#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative grid state for the maze solver editor.
//!
//! The world owns the cell matrix, the start and end designations and the
//! placement phase. All mutation flows through [`apply`], which enforces the
//! grid invariants and reports every accepted change as an [`Event`]. Rejected
//! commands never fail loudly: they surface as [`Event::PlacementRejected`] and
//! leave the state untouched.

use maze_solver_core::{
    CellCoord, CellState, Command, Event, GridSize, PlacementError, PlacementPhase,
};

const DEFAULT_GRID_ROWS: u32 = 20;
const DEFAULT_GRID_COLUMNS: u32 = 40;

/// Represents the authoritative editor grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct World {
    size: GridSize,
    cells: Vec<CellState>,
    start: Option<CellCoord>,
    end: Option<CellCoord>,
    phase: PlacementPhase,
}

impl World {
    /// Creates a world with the default 20 × 40 grid.
    #[must_use]
    pub fn new() -> Self {
        Self::with_size(GridSize::new(DEFAULT_GRID_ROWS, DEFAULT_GRID_COLUMNS))
    }

    /// Creates a world whose grid uses the provided dimensions.
    #[must_use]
    pub fn with_size(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![CellState::Empty; size.cell_count()],
            start: None,
            end: None,
            phase: PlacementPhase::AwaitingStart,
        }
    }

    fn reset(&mut self) {
        self.cells.fill(CellState::Empty);
        self.start = None;
        self.end = None;
        self.phase = PlacementPhase::AwaitingStart;
    }

    fn set_cell(&mut self, cell: CellCoord, state: CellState) -> bool {
        let Some(slot) = self
            .size
            .index(cell)
            .and_then(|index| self.cells.get_mut(index))
        else {
            return false;
        };

        let changed = *slot != state;
        *slot = state;
        changed
    }

    fn transition(&mut self, to: PlacementPhase, out_events: &mut Vec<Event>) {
        let from = self.phase;
        if from != to {
            self.phase = to;
            out_events.push(Event::PhaseChanged { from, to });
        }
    }

    fn place_start(&mut self, cell: CellCoord) -> Result<(), PlacementError> {
        if self.start.is_some() {
            return Err(PlacementError::StartAlreadyPlaced);
        }
        if self.end == Some(cell) {
            return Err(PlacementError::OccupiedByEnd);
        }

        let _ = self.set_cell(cell, CellState::Empty);
        self.start = Some(cell);
        Ok(())
    }

    fn place_end(&mut self, cell: CellCoord) -> Result<(), PlacementError> {
        if self.end.is_some() {
            return Err(PlacementError::EndAlreadyPlaced);
        }
        if self.start == Some(cell) {
            return Err(PlacementError::OccupiedByStart);
        }

        let _ = self.set_cell(cell, CellState::Empty);
        self.end = Some(cell);
        Ok(())
    }

    fn paint_wall(&mut self, cell: CellCoord) -> Result<bool, PlacementError> {
        if self.start == Some(cell) {
            return Err(PlacementError::OccupiedByStart);
        }
        if self.end == Some(cell) {
            return Err(PlacementError::OccupiedByEnd);
        }

        Ok(self.set_cell(cell, CellState::Wall))
    }

    /// Phase that follows once the designations reflect the current state.
    fn settled_phase(&self) -> PlacementPhase {
        match (self.start, self.end) {
            (None, _) => PlacementPhase::AwaitingStart,
            (Some(_), None) => PlacementPhase::AwaitingEnd,
            (Some(_), Some(_)) => PlacementPhase::PaintingWalls,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid { size } => {
            *world = World::with_size(size);
            out_events.push(Event::GridConfigured { size });
        }
        Command::ClearGrid => {
            world.reset();
            out_events.push(Event::GridCleared);
        }
        Command::PlaceStart { cell } => {
            if !world.size.contains(cell) {
                reject(cell, PlacementError::OutOfBounds, out_events);
                return;
            }

            match world.place_start(cell) {
                Ok(()) => {
                    out_events.push(Event::StartPlaced { cell });
                    let next = world.settled_phase();
                    world.transition(next, out_events);
                }
                Err(reason) => reject(cell, reason, out_events),
            }
        }
        Command::PlaceEnd { cell } => {
            if !world.size.contains(cell) {
                reject(cell, PlacementError::OutOfBounds, out_events);
                return;
            }

            match world.place_end(cell) {
                Ok(()) => {
                    out_events.push(Event::EndPlaced { cell });
                    let next = world.settled_phase();
                    world.transition(next, out_events);
                }
                Err(reason) => reject(cell, reason, out_events),
            }
        }
        Command::PaintWall { cell } => {
            if !world.size.contains(cell) {
                reject(cell, PlacementError::OutOfBounds, out_events);
                return;
            }

            match world.paint_wall(cell) {
                Ok(true) => out_events.push(Event::WallPainted { cell }),
                Ok(false) => {}
                Err(reason) => reject(cell, reason, out_events),
            }
        }
        Command::EraseCell { cell } => {
            if !world.size.contains(cell) {
                reject(cell, PlacementError::OutOfBounds, out_events);
                return;
            }

            let had_wall = world.set_cell(cell, CellState::Empty);
            if world.start == Some(cell) {
                world.start = None;
                out_events.push(Event::StartCleared { cell });
                world.transition(PlacementPhase::AwaitingStart, out_events);
            } else if world.end == Some(cell) {
                world.end = None;
                out_events.push(Event::EndCleared { cell });
                let next = world.settled_phase();
                world.transition(next, out_events);
            } else if had_wall {
                out_events.push(Event::CellErased { cell });
            }
        }
    }
}

fn reject(cell: CellCoord, reason: PlacementError, out_events: &mut Vec<Event>) {
    out_events.push(Event::PlacementRejected { cell, reason });
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use maze_solver_core::{CellCoord, GridView, PlacementPhase};

    /// Captures a read-only view of the grid, its designations and phase.
    #[must_use]
    pub fn grid_view(world: &World) -> GridView<'_> {
        GridView::new(
            &world.cells,
            world.size,
            world.start,
            world.end,
            world.phase,
        )
    }

    /// Active placement phase.
    #[must_use]
    pub fn phase(world: &World) -> PlacementPhase {
        world.phase
    }

    /// Currently designated start cell.
    #[must_use]
    pub fn start(world: &World) -> Option<CellCoord> {
        world.start
    }

    /// Currently designated end cell.
    #[must_use]
    pub fn end(world: &World) -> Option<CellCoord> {
        world.end
    }
}
