//! Background solve dispatch with ticketed, latest-wins delivery.

use std::{
    sync::{
        mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use maze_solver_core::{SolveRequest, SolveResponse};

use crate::{SolveError, Solver};

/// Identifier handed out for every submitted request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SolveTicket(u64);

impl SolveTicket {
    /// Creates a new ticket with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the ticket.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Result of a request delivered back to the frame loop.
#[derive(Debug)]
pub struct SolveOutcome {
    /// Ticket returned when the request was submitted.
    pub ticket: SolveTicket,
    /// Trace or failure reported by the solver.
    pub result: Result<SolveResponse, SolveError>,
}

/// Runs solve requests off the frame loop.
///
/// Only the most recent submission is awaited. Outcomes of superseded or
/// abandoned requests are discarded when they arrive.
pub struct SolveDispatcher {
    solver: Arc<dyn Solver>,
    sender: Sender<SolveOutcome>,
    receiver: Receiver<SolveOutcome>,
    next_ticket: u64,
    awaited: Option<SolveTicket>,
}

impl SolveDispatcher {
    /// Creates a dispatcher forwarding requests to the provided solver.
    #[must_use]
    pub fn new(solver: Arc<dyn Solver>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            solver,
            sender,
            receiver,
            next_ticket: 0,
            awaited: None,
        }
    }

    /// Starts solving the request on a background thread.
    ///
    /// Any request still in flight is superseded.
    pub fn submit(&mut self, request: SolveRequest) -> SolveTicket {
        let ticket = SolveTicket::new(self.next_ticket);
        self.next_ticket = self.next_ticket.wrapping_add(1);
        if let Some(previous) = self.awaited.replace(ticket) {
            tracing::debug!(
                superseded = previous.get(),
                ticket = ticket.get(),
                "superseding pending solve"
            );
        }

        let solver = Arc::clone(&self.solver);
        let sender = self.sender.clone();
        let _ = thread::spawn(move || {
            let result = solver.solve(&request);
            let _ = sender.send(SolveOutcome { ticket, result });
        });

        ticket
    }

    /// Stops waiting for the pending request, if any.
    pub fn abandon(&mut self) -> Option<SolveTicket> {
        self.awaited.take()
    }

    /// Reports whether a submitted request has not produced an outcome yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.awaited.is_some()
    }

    /// Returns the outcome of the awaited request if it has arrived.
    pub fn poll(&mut self) -> Option<SolveOutcome> {
        loop {
            match self.receiver.try_recv() {
                Ok(outcome) => {
                    if let Some(outcome) = self.accept(outcome) {
                        return Some(outcome);
                    }
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return None,
            }
        }
    }

    /// Blocks until the awaited request completes or the timeout elapses.
    pub fn wait(&mut self, timeout: Duration) -> Option<SolveOutcome> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(outcome) => {
                    if let Some(outcome) = self.accept(outcome) {
                        return Some(outcome);
                    }
                }
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    fn accept(&mut self, outcome: SolveOutcome) -> Option<SolveOutcome> {
        if self.awaited != Some(outcome.ticket) {
            tracing::info!(ticket = outcome.ticket.get(), "dropping stale solve outcome");
            return None;
        }

        self.awaited = None;
        Some(outcome)
    }
}

impl std::fmt::Debug for SolveDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolveDispatcher")
            .field("next_ticket", &self.next_ticket)
            .field("awaited", &self.awaited)
            .finish_non_exhaustive()
    }
}
