#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Editor session that wires the maze solver components together.
//!
//! [`EditorSession`] owns the world, the placement and playback systems, the
//! solve dispatcher and the surface geometry. Backends call
//! [`EditorSession::update`] once per frame with the captured input; the
//! session mutates the grid, redraws when the grid changed, collects solve
//! outcomes and advances playback by a single cell.

use std::sync::Arc;

use maze_solver_core::{AlgorithmId, Command, Event, SolveRequest, SolveResponse};
use maze_solver_rendering::{
    paint_cell, render, FrameFeedback, FrameInput, GridGeometry, Notice, NoticeKind, Palette,
    PixelBuffer, PointerButton, PointerEvent, Surface,
};
use maze_solver_solve_client::{SolveDispatcher, SolveOutcome, Solver};
use maze_solver_system_placement::{Placement, PointerInput};
use maze_solver_system_playback::{FrameAction, Layer, Playback, Step};
use maze_solver_world::{self as world, query, World};

/// Interactive maze editing and solve playback session.
#[derive(Debug)]
pub struct EditorSession {
    world: World,
    placement: Placement,
    playback: Playback,
    dispatcher: SolveDispatcher,
    geometry: GridGeometry,
    palette: Palette,
    needs_redraw: bool,
}

impl EditorSession {
    /// Creates a session whose grid fills the provided geometry.
    #[must_use]
    pub fn new(geometry: GridGeometry, palette: Palette, solver: Arc<dyn Solver>) -> Self {
        let mut world = World::new();
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::ConfigureGrid {
                size: geometry.grid(),
            },
            &mut events,
        );

        Self {
            world,
            placement: Placement::new(),
            playback: Playback::new(),
            dispatcher: SolveDispatcher::new(solver),
            geometry,
            palette,
            needs_redraw: true,
        }
    }

    /// Read-only access to the authoritative grid.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Reports whether a playback sequence is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.playback.is_active()
    }

    /// Reports whether a solve request is in flight.
    #[must_use]
    pub fn is_solving(&self) -> bool {
        self.dispatcher.is_pending()
    }

    /// Allocates a surface matching the geometry with the grid drawn on it.
    #[must_use]
    pub fn initial_surface(&mut self) -> PixelBuffer {
        let mut surface = PixelBuffer::new(self.geometry.width(), self.geometry.height());
        self.redraw(&mut surface);
        surface
    }

    /// Processes one frame of input and advances playback by a single step.
    pub fn update<S>(&mut self, input: FrameInput, surface: &mut S) -> FrameFeedback
    where
        S: Surface + ?Sized,
    {
        let mut feedback = FrameFeedback::default();

        for event in input.pointer {
            self.handle_pointer(event);
        }

        if input.clear_requested {
            self.clear();
        }

        if let Some(algorithm) = input.solve_requested {
            if let Some(notice) = self.request_solve(algorithm) {
                feedback.raised.push(notice);
            }
        }

        if let Some(outcome) = self.dispatcher.poll() {
            self.receive(outcome, &mut feedback);
        }

        if self.needs_redraw {
            self.redraw(surface);
        }

        self.advance_playback(surface);
        feedback
    }

    fn handle_pointer(&mut self, event: PointerEvent) {
        let input = match event {
            PointerEvent::Pressed {
                button: PointerButton::Primary,
                position,
            } => self
                .geometry
                .pixel_to_cell(position.x, position.y)
                .map(PointerInput::PrimaryPress),
            PointerEvent::Pressed {
                button: PointerButton::Secondary,
                position,
            } => self
                .geometry
                .pixel_to_cell(position.x, position.y)
                .map(PointerInput::SecondaryAction),
            PointerEvent::Moved { position } if self.placement.is_drawing() => self
                .geometry
                .pixel_to_cell(position.x, position.y)
                .map(PointerInput::PrimaryDrag),
            PointerEvent::Moved { .. } => None,
            PointerEvent::Released {
                button: PointerButton::Primary,
            } => Some(PointerInput::PrimaryRelease),
            PointerEvent::Released {
                button: PointerButton::Secondary,
            } => None,
        };

        if let Some(input) = input {
            let mut commands = Vec::new();
            self.placement
                .handle(input, &query::grid_view(&self.world), &mut commands);
            self.execute(commands);
        }
    }

    fn execute(&mut self, commands: Vec<Command>) {
        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }

        if events.iter().any(Event::changes_grid) {
            self.needs_redraw = true;
        }
    }

    fn clear(&mut self) {
        if let Some(sequence) = self.playback.cancel() {
            tracing::debug!(sequence = sequence.get(), "playback cancelled by clear");
        }
        if let Some(ticket) = self.dispatcher.abandon() {
            tracing::debug!(ticket = ticket.get(), "pending solve abandoned by clear");
        }
        self.execute(vec![Command::ClearGrid]);
    }

    fn request_solve(&mut self, algorithm: AlgorithmId) -> Option<Notice> {
        let view = query::grid_view(&self.world);
        let size = view.size();
        let Some(request) = SolveRequest::from_view(&view, algorithm) else {
            tracing::info!("solve requested before both endpoints were placed");
            return Some(Notice::missing_endpoints());
        };

        let algorithm = request.algorithm.clone();
        let ticket = self.dispatcher.submit(request);
        tracing::info!(
            ticket = ticket.get(),
            algorithm = algorithm.as_str(),
            rows = size.rows(),
            columns = size.columns(),
            "solve dispatched"
        );
        if let Some(sequence) = self.playback.cancel() {
            tracing::debug!(
                sequence = sequence.get(),
                ticket = ticket.get(),
                "playback cancelled by new solve"
            );
            self.needs_redraw = true;
        }
        None
    }

    fn receive(&mut self, outcome: SolveOutcome, feedback: &mut FrameFeedback) {
        let ticket = outcome.ticket.get();
        match outcome.result {
            Ok(trace) if !trace.has_path() => {
                tracing::info!(ticket, visited = trace.visited.len(), "no path found");
                feedback.dismiss_notices = true;
                feedback.raised.push(Notice::no_path_found());
            }
            Ok(trace) => {
                tracing::info!(
                    ticket,
                    visited = trace.visited.len(),
                    path = trace.path.len(),
                    "solve completed"
                );
                feedback.dismiss_notices = true;
                self.start_playback(trace);
            }
            Err(error) => {
                tracing::warn!(ticket, %error, "solve failed");
                feedback
                    .raised
                    .push(Notice::new(NoticeKind::Error, error.to_string()));
            }
        }
    }

    fn start_playback(&mut self, trace: SolveResponse) {
        let (sequence, superseded) = self.playback.start(trace);
        if let Some(superseded) = superseded {
            tracing::debug!(
                superseded = superseded.get(),
                sequence = sequence.get(),
                "playback superseded"
            );
        }
        tracing::debug!(sequence = sequence.get(), "playback started");
        self.needs_redraw = true;
    }

    fn redraw<S>(&mut self, surface: &mut S)
    where
        S: Surface + ?Sized,
    {
        render(
            surface,
            &self.geometry,
            &query::grid_view(&self.world),
            &self.palette,
        );
        self.needs_redraw = false;
    }

    fn advance_playback<S>(&mut self, surface: &mut S)
    where
        S: Surface + ?Sized,
    {
        match self
            .playback
            .step(query::start(&self.world), query::end(&self.world))
        {
            Step::Idle => {}
            Step::Frame(frame) => match frame.action {
                FrameAction::Paint { cell, layer } => {
                    let color = match layer {
                        Layer::Visited => self.palette.visited,
                        Layer::Path => self.palette.path,
                    };
                    paint_cell(surface, &self.geometry, cell, color);
                }
                FrameAction::SkipEndpoint { .. } => {}
            },
            Step::Finished(sequence) => {
                tracing::debug!(sequence = sequence.get(), "playback finished");
            }
            Step::Cancelled(sequence) => {
                tracing::debug!(sequence = sequence.get(), "playback cancelled");
            }
        }
    }
}
