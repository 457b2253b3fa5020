use maze_solver_core::{CellCoord, CellState, Command, Event, GridSize, PlacementPhase};
use maze_solver_system_placement::{Placement, PointerInput};
use maze_solver_world::{self as world, query, World};

fn feed(world: &mut World, placement: &mut Placement, input: PointerInput) -> Vec<Event> {
    let mut commands = Vec::new();
    placement.handle(input, &query::grid_view(world), &mut commands);

    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn click(world: &mut World, placement: &mut Placement, cell: CellCoord) -> Vec<Event> {
    let mut events = feed(world, placement, PointerInput::PrimaryPress(cell));
    events.extend(feed(world, placement, PointerInput::PrimaryRelease));
    events
}

fn configured_world(rows: u32, columns: u32) -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureGrid {
            size: GridSize::new(rows, columns),
        },
        &mut events,
    );
    world
}

#[test]
fn click_sequence_walks_through_placement_phases() {
    let mut world = configured_world(20, 40);
    let mut placement = Placement::new();
    let start = CellCoord::new(5, 5);
    let end = CellCoord::new(10, 10);

    let _ = click(&mut world, &mut placement, start);
    assert_eq!(query::start(&world), Some(start));
    assert_eq!(query::phase(&world), PlacementPhase::AwaitingEnd);

    let events = click(&mut world, &mut placement, start);
    assert!(events.is_empty(), "second click on start must be a no-op");
    assert_eq!(query::phase(&world), PlacementPhase::AwaitingEnd);
    assert_eq!(query::end(&world), None);

    let _ = click(&mut world, &mut placement, end);
    assert_eq!(query::end(&world), Some(end));
    assert_eq!(query::phase(&world), PlacementPhase::PaintingWalls);

    let events = click(&mut world, &mut placement, start);
    assert!(events.is_empty(), "wall on start must be rejected");
    assert_eq!(
        query::grid_view(&world).state(start),
        Some(CellState::Empty)
    );
}

#[test]
fn drag_paints_walls_only_while_drawing() {
    let mut world = configured_world(20, 40);
    let mut placement = Placement::new();
    let _ = click(&mut world, &mut placement, CellCoord::new(0, 0));
    let _ = click(&mut world, &mut placement, CellCoord::new(19, 39));

    let _ = feed(
        &mut world,
        &mut placement,
        PointerInput::PrimaryDrag(CellCoord::new(3, 3)),
    );
    assert_eq!(
        query::grid_view(&world).state(CellCoord::new(3, 3)),
        Some(CellState::Empty),
        "hover without a held button must not paint",
    );

    let _ = feed(
        &mut world,
        &mut placement,
        PointerInput::PrimaryPress(CellCoord::new(4, 4)),
    );
    for column in 5..9 {
        let _ = feed(
            &mut world,
            &mut placement,
            PointerInput::PrimaryDrag(CellCoord::new(4, column)),
        );
    }
    let _ = feed(&mut world, &mut placement, PointerInput::PrimaryRelease);

    let view = query::grid_view(&world);
    for column in 4..9 {
        assert_eq!(
            view.state(CellCoord::new(4, column)),
            Some(CellState::Wall),
            "column {column} should be painted",
        );
    }
}

#[test]
fn drag_during_endpoint_placement_has_no_effect() {
    let mut world = configured_world(20, 40);
    let mut placement = Placement::new();

    let _ = feed(
        &mut world,
        &mut placement,
        PointerInput::PrimaryPress(CellCoord::new(2, 2)),
    );
    let events = feed(
        &mut world,
        &mut placement,
        PointerInput::PrimaryDrag(CellCoord::new(2, 3)),
    );

    assert!(events.is_empty());
    assert_eq!(query::start(&world), Some(CellCoord::new(2, 2)));
    assert_eq!(query::end(&world), None);
}

#[test]
fn out_of_bounds_press_changes_nothing() {
    let mut world = configured_world(20, 40);
    let mut placement = Placement::new();
    let before = world.clone();

    let events = click(&mut world, &mut placement, CellCoord::new(20, 3));

    assert!(events.is_empty());
    assert_eq!(world, before);
}

#[test]
fn erase_regresses_phase_depending_on_remaining_endpoints() {
    let mut world = configured_world(20, 40);
    let mut placement = Placement::new();
    let start = CellCoord::new(1, 1);
    let end = CellCoord::new(2, 2);
    let _ = click(&mut world, &mut placement, start);
    let _ = click(&mut world, &mut placement, end);

    let _ = feed(&mut world, &mut placement, PointerInput::SecondaryAction(end));
    assert_eq!(query::phase(&world), PlacementPhase::AwaitingEnd);

    let _ = click(&mut world, &mut placement, end);
    let _ = feed(&mut world, &mut placement, PointerInput::SecondaryAction(start));
    assert_eq!(query::phase(&world), PlacementPhase::AwaitingStart);

    let _ = feed(&mut world, &mut placement, PointerInput::SecondaryAction(end));
    assert_eq!(query::phase(&world), PlacementPhase::AwaitingStart);
    assert_eq!(query::start(&world), None);
    assert_eq!(query::end(&world), None);
}

#[test]
fn erase_clears_painted_walls() {
    let mut world = configured_world(20, 40);
    let mut placement = Placement::new();
    let _ = click(&mut world, &mut placement, CellCoord::new(0, 0));
    let _ = click(&mut world, &mut placement, CellCoord::new(0, 1));
    let wall = CellCoord::new(7, 7);
    let _ = click(&mut world, &mut placement, wall);

    let events = feed(&mut world, &mut placement, PointerInput::SecondaryAction(wall));

    assert_eq!(events, vec![Event::CellErased { cell: wall }]);
    assert_eq!(query::phase(&world), PlacementPhase::PaintingWalls);
}

#[test]
fn random_gesture_streams_preserve_endpoint_invariants() {
    let size = GridSize::new(6, 8);
    let mut world = configured_world(size.rows(), size.columns());
    let mut placement = Placement::new();
    let mut state = 0x5eed_u64;

    for _ in 0..5_000 {
        state = next_random(state);
        let row = ((state >> 16) % u64::from(size.rows() + 1)) as u32;
        let column = ((state >> 32) % u64::from(size.columns() + 1)) as u32;
        let cell = CellCoord::new(row, column);
        let input = match (state >> 48) % 4 {
            0 => PointerInput::PrimaryPress(cell),
            1 => PointerInput::PrimaryDrag(cell),
            2 => PointerInput::PrimaryRelease,
            _ => PointerInput::SecondaryAction(cell),
        };

        let _ = feed(&mut world, &mut placement, input);

        let view = query::grid_view(&world);
        if let (Some(start), Some(end)) = (view.start(), view.end()) {
            assert_ne!(start, end, "start and end must never coincide");
        }
        for endpoint in [view.start(), view.end()].into_iter().flatten() {
            assert_eq!(
                view.state(endpoint),
                Some(CellState::Empty),
                "endpoint {endpoint:?} must never be a wall",
            );
        }
        let expected_phase = match (view.start(), view.end()) {
            (None, _) => PlacementPhase::AwaitingStart,
            (Some(_), None) => PlacementPhase::AwaitingEnd,
            (Some(_), Some(_)) => PlacementPhase::PaintingWalls,
        };
        assert_eq!(view.phase(), expected_phase);
    }
}

fn next_random(state: u64) -> u64 {
    state
        .wrapping_mul(6_364_136_223_846_793_005)
        .wrapping_add(1_442_695_040_888_963_407)
}
