//! Conversions between surface pixels and grid cells.

use maze_solver_core::{CellCoord, GridSize};

use crate::RenderingError;

/// Axis-aligned rectangle measured in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge of the rectangle.
    pub x: u32,
    /// Top edge of the rectangle.
    pub y: u32,
    /// Horizontal extent of the rectangle.
    pub width: u32,
    /// Vertical extent of the rectangle.
    pub height: u32,
}

impl PixelRect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Upper-left corner of the rectangle.
    #[must_use]
    pub const fn origin(&self) -> (u32, u32) {
        (self.x, self.y)
    }
}

/// Maps a pixel coordinate to the cell containing it by floor division.
///
/// A point lying exactly on a gridline belongs to the cell whose origin sits on
/// that line. Returns `None` for negative or non-finite coordinates and for a
/// zero cell size.
#[must_use]
pub fn pixel_to_cell(x: f32, y: f32, cell_size: u32) -> Option<CellCoord> {
    if cell_size == 0 || !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
        return None;
    }

    let cell_size = cell_size as f32;
    let column = (x / cell_size).floor();
    let row = (y / cell_size).floor();
    if column > u32::MAX as f32 || row > u32::MAX as f32 {
        return None;
    }

    Some(CellCoord::new(row as u32, column as u32))
}

/// Reports whether the cell lies within a `rows × columns` grid.
#[must_use]
pub const fn is_in_bounds(cell: CellCoord, rows: u32, columns: u32) -> bool {
    GridSize::new(rows, columns).contains(cell)
}

/// Pixel rectangle covered by the cell.
#[must_use]
pub const fn cell_to_pixel_rect(cell: CellCoord, cell_size: u32) -> PixelRect {
    PixelRect::new(
        cell.column().saturating_mul(cell_size),
        cell.row().saturating_mul(cell_size),
        cell_size,
        cell_size,
    )
}

/// Fixed relationship between a pixel surface and the grid drawn on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    width: u32,
    height: u32,
    cell_size: u32,
    grid: GridSize,
}

impl GridGeometry {
    /// Derives the grid dimensions for a surface by integer division.
    ///
    /// Remainder pixels stay as unused margin. Returns an error when the cell
    /// size is zero or the surface cannot hold a single cell.
    pub fn new(width: u32, height: u32, cell_size: u32) -> Result<Self, RenderingError> {
        if cell_size == 0 {
            return Err(RenderingError::InvalidCellSize { cell_size });
        }

        let grid = GridSize::new(height / cell_size, width / cell_size);
        if grid.rows() == 0 || grid.columns() == 0 {
            return Err(RenderingError::SurfaceTooSmall {
                width,
                height,
                cell_size,
            });
        }

        Ok(Self {
            width,
            height,
            cell_size,
            grid,
        })
    }

    /// Width of the surface in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the surface in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Side length of a cell in pixels.
    #[must_use]
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Grid dimensions that fit on the surface.
    #[must_use]
    pub const fn grid(&self) -> GridSize {
        self.grid
    }

    /// Cell under the provided surface pixel, which may lie outside the grid.
    #[must_use]
    pub fn pixel_to_cell(&self, x: f32, y: f32) -> Option<CellCoord> {
        pixel_to_cell(x, y, self.cell_size)
    }

    /// Reports whether the cell lies within the grid.
    #[must_use]
    pub const fn is_in_bounds(&self, cell: CellCoord) -> bool {
        is_in_bounds(cell, self.grid.rows(), self.grid.columns())
    }

    /// Pixel rectangle covered by the cell.
    #[must_use]
    pub const fn cell_rect(&self, cell: CellCoord) -> PixelRect {
        cell_to_pixel_rect(cell, self.cell_size)
    }
}
