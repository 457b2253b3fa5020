use maze_solver_core::{CellCoord, SolveResponse};
use maze_solver_system_playback::{Frame, FrameAction, Layer, Playback, SequenceId, Step};

fn cells(pairs: &[[u32; 2]]) -> Vec<CellCoord> {
    pairs.iter().copied().map(CellCoord::from).collect()
}

fn drain(playback: &mut Playback, limit: usize) -> Vec<Step> {
    let mut steps = Vec::new();
    for _ in 0..limit {
        let step = playback.step(Some(CellCoord::new(9, 9)), Some(CellCoord::new(8, 8)));
        steps.push(step);
        if !matches!(step, Step::Frame(_)) {
            break;
        }
    }
    steps
}

#[test]
fn visited_frames_precede_path_frames_one_cell_per_step() {
    let mut playback = Playback::new();
    let (id, _) = playback.start(SolveResponse {
        visited: cells(&[[0, 0], [0, 1]]),
        path: cells(&[[0, 0], [0, 1], [0, 2]]),
    });

    let steps = drain(&mut playback, 16);

    let paint = |row, column, layer| {
        Step::Frame(Frame {
            sequence: id,
            action: FrameAction::Paint {
                cell: CellCoord::new(row, column),
                layer,
            },
        })
    };
    assert_eq!(
        steps,
        vec![
            paint(0, 0, Layer::Visited),
            paint(0, 1, Layer::Visited),
            paint(0, 0, Layer::Path),
            paint(0, 1, Layer::Path),
            paint(0, 2, Layer::Path),
            Step::Finished(id),
        ]
    );
    assert!(!playback.is_active());
}

#[test]
fn duplicate_visits_are_replayed_verbatim() {
    let mut playback = Playback::new();
    let _ = playback.start(SolveResponse {
        visited: cells(&[[1, 1], [1, 1], [1, 1]]),
        path: cells(&[[1, 1]]),
    });

    let frames = drain(&mut playback, 16)
        .into_iter()
        .filter(|step| matches!(step, Step::Frame(_)))
        .count();

    assert_eq!(frames, 4);
}

#[test]
fn path_cells_paint_even_over_endpoints() {
    let mut playback = Playback::new();
    let start = CellCoord::new(0, 0);
    let end = CellCoord::new(0, 1);
    let _ = playback.start(SolveResponse {
        visited: vec![start, end],
        path: vec![start, end],
    });

    let mut layers = Vec::new();
    while let Step::Frame(frame) = playback.step(Some(start), Some(end)) {
        layers.push(frame.action);
    }

    assert_eq!(
        layers,
        vec![
            FrameAction::SkipEndpoint { cell: start },
            FrameAction::SkipEndpoint { cell: end },
            FrameAction::Paint {
                cell: start,
                layer: Layer::Path,
            },
            FrameAction::Paint {
                cell: end,
                layer: Layer::Path,
            },
        ]
    );
}

#[test]
fn restarting_mid_sequence_never_interleaves_frames() {
    let mut playback = Playback::new();
    let (first, _) = playback.start(SolveResponse {
        visited: cells(&[[0, 0], [0, 1], [0, 2], [0, 3]]),
        path: cells(&[[0, 0], [0, 3]]),
    });
    let first_token = playback.cancellation_token().expect("first sequence active");

    let early = drain(&mut playback, 2);
    assert!(early
        .iter()
        .all(|step| matches!(step, Step::Frame(Frame { sequence, .. }) if *sequence == first)));

    let (second, superseded) = playback.start(SolveResponse {
        visited: cells(&[[5, 5]]),
        path: cells(&[[5, 5]]),
    });
    assert_eq!(superseded, Some(first));
    assert!(first_token.is_cancelled());

    let rest = drain(&mut playback, 16);
    let sequences: Vec<SequenceId> = rest
        .iter()
        .filter_map(|step| match step {
            Step::Frame(frame) => Some(frame.sequence),
            Step::Finished(id) | Step::Cancelled(id) => Some(*id),
            Step::Idle => None,
        })
        .collect();

    assert_eq!(sequences, vec![second, second, second]);
}

#[test]
fn replaying_same_trace_twice_is_deterministic() {
    let trace = SolveResponse {
        visited: cells(&[[3, 3], [3, 4], [4, 4], [9, 9]]),
        path: cells(&[[3, 3], [4, 4]]),
    };

    let mut first = Playback::new();
    let _ = first.start(trace.clone());
    let mut second = Playback::new();
    let _ = second.start(trace);

    assert_eq!(drain(&mut first, 32), drain(&mut second, 32));
}
