#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure placement system that turns pointer gestures into grid commands.
//!
//! The system mirrors the editor's placement phases: the first primary press
//! designates the start, the next one the end, and every later press or drag
//! paints walls. Secondary actions erase. The system never mutates the grid
//! itself; it only emits [`Command`] values for the world to validate.

use maze_solver_core::{CellCoord, Command, GridView, PlacementPhase};

/// Pointer gesture already mapped to grid coordinates by the adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerInput {
    /// Primary button pressed over the provided cell.
    PrimaryPress(CellCoord),
    /// Pointer moved over the provided cell while the primary button is held.
    PrimaryDrag(CellCoord),
    /// Primary button released.
    PrimaryRelease,
    /// Erase gesture over the provided cell.
    SecondaryAction(CellCoord),
}

/// Placement system tracking whether a primary gesture is in progress.
#[derive(Clone, Debug, Default)]
pub struct Placement {
    drawing: bool,
}

impl Placement {
    /// Creates a new placement system with no gesture in progress.
    #[must_use]
    pub const fn new() -> Self {
        Self { drawing: false }
    }

    /// Reports whether a primary gesture is currently held.
    #[must_use]
    pub const fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Interprets a pointer gesture against the current grid and emits commands.
    ///
    /// Cells outside the grid are ignored without touching any state besides
    /// the drawing flag.
    pub fn handle(&mut self, input: PointerInput, view: &GridView<'_>, out: &mut Vec<Command>) {
        match input {
            PointerInput::PrimaryPress(cell) => {
                self.drawing = true;
                primary(cell, view, out);
            }
            PointerInput::PrimaryDrag(cell) => {
                if self.drawing && view.phase() == PlacementPhase::PaintingWalls {
                    primary(cell, view, out);
                }
            }
            PointerInput::PrimaryRelease => {
                self.drawing = false;
            }
            PointerInput::SecondaryAction(cell) => {
                if view.size().contains(cell) {
                    out.push(Command::EraseCell { cell });
                }
            }
        }
    }
}

fn primary(cell: CellCoord, view: &GridView<'_>, out: &mut Vec<Command>) {
    if !view.size().contains(cell) {
        return;
    }

    match view.phase() {
        PlacementPhase::AwaitingStart => {
            if view.start().is_none() && view.end() != Some(cell) {
                out.push(Command::PlaceStart { cell });
            }
        }
        PlacementPhase::AwaitingEnd => {
            if view.end().is_none() && view.start() != Some(cell) {
                out.push(Command::PlaceEnd { cell });
            }
        }
        PlacementPhase::PaintingWalls => {
            if !view.is_endpoint(cell) {
                out.push(Command::PaintWall { cell });
            }
        }
    }
}
