#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame-paced playback of a solve trace.
//!
//! A [`Playback`] owns at most one active sequence. Each call to
//! [`Playback::step`] advances that sequence by exactly one element: first
//! through the visited cells, then through the path cells. Hosts call `step`
//! once per rendering frame; tests call it directly. Every sequence carries a
//! [`CancellationToken`] checked at the top of each step, so a sequence that
//! was superseded or cancelled never yields another frame.

use std::{cell::Cell, rc::Rc};

use maze_solver_core::{CellCoord, SolveResponse};

/// Identifier assigned to each started sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceId(u64);

impl SequenceId {
    /// Creates a new identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Shared flag used to stop a sequence from yielding further frames.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the token as cancelled.
    pub fn cancel(&self) {
        self.0.set(true);
    }

    /// Reports whether the token was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Overlay layer a playback frame paints into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Cell explored by the algorithm.
    Visited,
    /// Cell on the discovered path.
    Path,
}

/// Work produced by a single playback frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameAction {
    /// Paint the cell using the colour of the layer.
    Paint {
        /// Cell to paint.
        cell: CellCoord,
        /// Layer whose colour applies.
        layer: Layer,
    },
    /// A visited cell coincided with the start or end; the frame paints nothing.
    SkipEndpoint {
        /// Cell that was skipped.
        cell: CellCoord,
    },
}

/// Single frame emitted by the active sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Sequence that produced the frame.
    pub sequence: SequenceId,
    /// Work to perform for the frame.
    pub action: FrameAction,
}

/// Outcome of advancing playback by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// No sequence is active.
    Idle,
    /// The active sequence produced a frame.
    Frame(Frame),
    /// The active sequence exhausted both phases and was retired.
    Finished(SequenceId),
    /// The active sequence observed its cancellation token and was retired.
    Cancelled(SequenceId),
}

/// Phase of a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Visited,
    Path,
}

#[derive(Debug)]
struct Sequence {
    id: SequenceId,
    visited: Vec<CellCoord>,
    path: Vec<CellCoord>,
    stage: Stage,
    cursor: usize,
    token: CancellationToken,
}

impl Sequence {
    fn new(id: SequenceId, trace: SolveResponse) -> Self {
        Self {
            id,
            visited: trace.visited,
            path: trace.path,
            stage: Stage::Visited,
            cursor: 0,
            token: CancellationToken::new(),
        }
    }

    fn advance(&mut self, endpoints: [Option<CellCoord>; 2]) -> Option<FrameAction> {
        if self.stage == Stage::Visited {
            if let Some(cell) = self.visited.get(self.cursor).copied() {
                self.cursor += 1;
                if endpoints.contains(&Some(cell)) {
                    return Some(FrameAction::SkipEndpoint { cell });
                }
                return Some(FrameAction::Paint {
                    cell,
                    layer: Layer::Visited,
                });
            }

            self.stage = Stage::Path;
            self.cursor = 0;
        }

        let cell = self.path.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(FrameAction::Paint {
            cell,
            layer: Layer::Path,
        })
    }
}

/// Scheduler owning the single active playback sequence.
#[derive(Debug, Default)]
pub struct Playback {
    active: Option<Sequence>,
    next_id: u64,
}

impl Playback {
    /// Creates an idle scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts replaying the provided trace, cancelling any active sequence first.
    ///
    /// Returns the identifier of the new sequence together with the identifier
    /// of the sequence it superseded, if any.
    pub fn start(&mut self, trace: SolveResponse) -> (SequenceId, Option<SequenceId>) {
        let superseded = self.cancel();
        let id = SequenceId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.active = Some(Sequence::new(id, trace));
        (id, superseded)
    }

    /// Cancels the active sequence, returning its identifier.
    pub fn cancel(&mut self) -> Option<SequenceId> {
        let sequence = self.active.take()?;
        sequence.token.cancel();
        Some(sequence.id)
    }

    /// Reports whether a sequence is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Token controlling the active sequence.
    ///
    /// Cancelling the token stops the sequence before its next frame.
    #[must_use]
    pub fn cancellation_token(&self) -> Option<CancellationToken> {
        self.active.as_ref().map(|sequence| sequence.token.clone())
    }

    /// Advances the active sequence by one frame.
    ///
    /// `start` and `end` are the designations at the time of the step; visited
    /// cells matching either are skipped rather than painted.
    pub fn step(&mut self, start: Option<CellCoord>, end: Option<CellCoord>) -> Step {
        let Some(sequence) = self.active.as_mut() else {
            return Step::Idle;
        };

        let id = sequence.id;
        if sequence.token.is_cancelled() {
            self.active = None;
            return Step::Cancelled(id);
        }

        match sequence.advance([start, end]) {
            Some(action) => Step::Frame(Frame {
                sequence: id,
                action,
            }),
            None => {
                self.active = None;
                Step::Finished(id)
            }
        }
    }
}
