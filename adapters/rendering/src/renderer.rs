//! Full-surface redraw of grid state.

use maze_solver_core::{CellCoord, CellState, GridView};

use crate::{Color, GridGeometry, PixelRect, Surface};

/// Colors used to draw the grid and its overlays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Color the surface is cleared to before drawing.
    pub background: Color,
    /// Fill of walkable cells.
    pub empty: Color,
    /// Fill of wall cells.
    pub wall: Color,
    /// Fill of the start cell.
    pub start: Color,
    /// Fill of the end cell.
    pub end: Color,
    /// Fill of cells explored during playback.
    pub visited: Color,
    /// Fill of cells on the discovered path during playback.
    pub path: Color,
    /// Color of the one pixel gridlines.
    pub grid_line: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::TRANSPARENT,
            empty: Color::from_rgb_u8(0xff, 0xff, 0xff),
            wall: Color::from_rgb_u8(0x2c, 0x3e, 0x50),
            start: Color::from_rgb_u8(0x27, 0xae, 0x60),
            end: Color::from_rgb_u8(0xe7, 0x4c, 0x3c),
            visited: Color::from_rgb_u8(0x34, 0x98, 0xdb),
            path: Color::from_rgb_u8(0xf1, 0xc4, 0x0f),
            grid_line: Color::from_rgb_u8(0xbd, 0xc3, 0xc7),
        }
    }
}

/// Redraws the whole grid onto the surface.
///
/// Clears the surface, fills every cell by state, draws gridlines across the
/// whole surface and finally overlays the start and end cells on top of the
/// gridlines. Identical inputs always produce identical pixels.
pub fn render<S>(surface: &mut S, geometry: &GridGeometry, view: &GridView<'_>, palette: &Palette)
where
    S: Surface + ?Sized,
{
    surface.clear(palette.background);

    for (cell, state) in view.iter() {
        let fill = match state {
            CellState::Empty => palette.empty,
            CellState::Wall => palette.wall,
        };
        surface.fill_rect(geometry.cell_rect(cell), fill);
    }

    draw_grid_lines(surface, geometry, palette.grid_line);

    if let Some(start) = view.start() {
        paint_cell(surface, geometry, start, palette.start);
    }
    if let Some(end) = view.end() {
        paint_cell(surface, geometry, end, palette.end);
    }
}

/// Fills a single cell, used for endpoint overlays and playback frames.
pub fn paint_cell<S>(surface: &mut S, geometry: &GridGeometry, cell: CellCoord, color: Color)
where
    S: Surface + ?Sized,
{
    if geometry.is_in_bounds(cell) {
        surface.fill_rect(geometry.cell_rect(cell), color);
    }
}

fn draw_grid_lines<S>(surface: &mut S, geometry: &GridGeometry, color: Color)
where
    S: Surface + ?Sized,
{
    let cell_size = geometry.cell_size();
    let grid = geometry.grid();
    let (width, height) = (surface.width(), surface.height());

    for row in 0..=grid.rows() {
        surface.fill_rect(PixelRect::new(0, row * cell_size, width, 1), color);
    }
    for column in 0..=grid.columns() {
        surface.fill_rect(PixelRect::new(column * cell_size, 0, 1, height), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixelBuffer;
    use maze_solver_core::{GridSize, PlacementPhase};

    fn geometry() -> GridGeometry {
        GridGeometry::new(40, 30, 10).expect("valid geometry")
    }

    fn cells(size: GridSize, walls: &[CellCoord]) -> Vec<CellState> {
        let mut cells = vec![CellState::Empty; size.cell_count()];
        for wall in walls {
            if let Some(index) = size.index(*wall) {
                cells[index] = CellState::Wall;
            }
        }
        cells
    }

    #[test]
    fn cells_gridlines_and_endpoints_use_palette_colors() {
        let geometry = geometry();
        let palette = Palette::default();
        let size = geometry.grid();
        let cells = cells(size, &[CellCoord::new(1, 1)]);
        let view = GridView::new(
            &cells,
            size,
            Some(CellCoord::new(0, 0)),
            Some(CellCoord::new(2, 3)),
            PlacementPhase::PaintingWalls,
        );
        let mut buffer = PixelBuffer::new(geometry.width(), geometry.height());

        render(&mut buffer, &geometry, &view, &palette);

        assert_eq!(buffer.pixel(15, 15), Some(palette.wall));
        assert_eq!(buffer.pixel(25, 15), Some(palette.empty));
        assert_eq!(buffer.pixel(20, 15), Some(palette.grid_line));
        assert_eq!(buffer.pixel(25, 20), Some(palette.grid_line));
        assert_eq!(buffer.pixel(5, 5), Some(palette.start));
        assert_eq!(buffer.pixel(35, 25), Some(palette.end));
    }

    #[test]
    fn endpoint_overlay_covers_gridlines() {
        let geometry = geometry();
        let palette = Palette::default();
        let size = geometry.grid();
        let cells = cells(size, &[]);
        let view = GridView::new(
            &cells,
            size,
            Some(CellCoord::new(1, 1)),
            None,
            PlacementPhase::AwaitingEnd,
        );
        let mut buffer = PixelBuffer::new(geometry.width(), geometry.height());

        render(&mut buffer, &geometry, &view, &palette);

        assert_eq!(buffer.pixel(10, 10), Some(palette.start));
        assert_eq!(buffer.pixel(10, 9), Some(palette.grid_line));
    }

    #[test]
    fn gridlines_past_the_grid_extent_are_clipped() {
        let geometry = GridGeometry::new(45, 30, 10).expect("valid geometry");
        let palette = Palette::default();
        let size = geometry.grid();
        let cells = cells(size, &[]);
        let view = GridView::new(&cells, size, None, None, PlacementPhase::AwaitingStart);
        let mut buffer = PixelBuffer::new(geometry.width(), geometry.height());

        render(&mut buffer, &geometry, &view, &palette);

        assert_eq!(buffer.pixel(40, 5), Some(palette.grid_line));
        assert_eq!(buffer.pixel(43, 5), Some(palette.background));
        assert_eq!(buffer.pixel(43, 10), Some(palette.grid_line));
    }

    #[test]
    fn paint_cell_ignores_cells_outside_the_grid() {
        let geometry = geometry();
        let mut buffer = PixelBuffer::new(geometry.width(), geometry.height());
        let before = buffer.clone();

        paint_cell(
            &mut buffer,
            &geometry,
            CellCoord::new(3, 0),
            Color::from_rgb_u8(1, 1, 1),
        );

        assert_eq!(buffer, before);
    }
}
