use maze_solver_core::{CellCoord, CellState, GridSize, GridView, PlacementPhase};
use maze_solver_rendering::{render, GridGeometry, Palette, PixelBuffer, Surface};

fn maze(size: GridSize) -> Vec<CellState> {
    (0..size.cell_count())
        .map(|index| {
            if index % 7 == 3 {
                CellState::Wall
            } else {
                CellState::Empty
            }
        })
        .collect()
}

#[test]
fn rendering_identical_state_twice_produces_identical_pixels() {
    let geometry = GridGeometry::new(800, 400, 20).expect("default geometry");
    let size = geometry.grid();
    let cells = maze(size);
    let view = GridView::new(
        &cells,
        size,
        Some(CellCoord::new(0, 0)),
        Some(CellCoord::new(19, 39)),
        PlacementPhase::PaintingWalls,
    );
    let palette = Palette::default();

    let mut first = PixelBuffer::new(geometry.width(), geometry.height());
    render(&mut first, &geometry, &view, &palette);
    let mut second = PixelBuffer::new(geometry.width(), geometry.height());
    second.clear(palette.visited);
    render(&mut second, &geometry, &view, &palette);

    assert_eq!(first, second);
}

#[test]
fn rerendering_erases_previous_overlays() {
    let geometry = GridGeometry::new(100, 60, 20).expect("valid geometry");
    let size = geometry.grid();
    let cells = vec![CellState::Empty; size.cell_count()];
    let view = GridView::new(&cells, size, None, None, PlacementPhase::AwaitingStart);
    let palette = Palette::default();
    let mut buffer = PixelBuffer::new(geometry.width(), geometry.height());

    render(&mut buffer, &geometry, &view, &palette);
    let pristine = buffer.clone();
    maze_solver_rendering::paint_cell(&mut buffer, &geometry, CellCoord::new(1, 1), palette.path);
    assert_ne!(buffer, pristine);

    render(&mut buffer, &geometry, &view, &palette);
    assert_eq!(buffer, pristine);
}

#[test]
fn every_pixel_inside_a_cell_maps_back_to_that_cell() {
    let geometry = GridGeometry::new(60, 40, 20).expect("valid geometry");

    for y in 0..geometry.height() {
        for x in 0..geometry.width() {
            let cell = geometry
                .pixel_to_cell(x as f32 + 0.5, y as f32 + 0.5)
                .expect("pixel inside the surface");
            let rect = geometry.cell_rect(cell);

            assert!(rect.x <= x && x < rect.x + rect.width);
            assert!(rect.y <= y && y < rect.y + rect.height);
        }
    }
}
