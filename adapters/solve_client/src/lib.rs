#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Client for the external solve service.
//!
//! [`HttpSolver`] posts a [`SolveRequest`] as JSON and classifies the reply
//! into a [`SolveResponse`] or a typed [`SolveError`]. Editors never call a
//! solver directly from their frame loop; they go through a
//! [`SolveDispatcher`], which runs each request on a background thread and
//! hands back only the outcome of the most recent submission.

mod dispatch;

use std::time::Duration;

use maze_solver_core::{SolveRequest, SolveResponse};
use reqwest::{blocking::Client, header::CONTENT_TYPE};
use serde::Deserialize;
use thiserror::Error;

pub use dispatch::{SolveDispatcher, SolveOutcome, SolveTicket};

/// Message shown when the service rejects a request without explaining why.
pub const GENERIC_FAILURE_MESSAGE: &str = "Solution failed";

/// Failures reported while solving a maze.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The service answered with a non-success status.
    #[error("{message}")]
    RequestFailed {
        /// HTTP status code returned by the service.
        status: u16,
        /// Server supplied `detail`, or the generic failure message.
        message: String,
    },

    /// The service could not be reached or the connection broke.
    #[error("could not reach the solve service: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a body that does not match the contract.
    #[error("solve service returned a malformed response: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The HTTP client could not be constructed.
    #[error("could not configure the HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Anything able to turn a request into a solve trace.
///
/// Implementations are invoked from background threads.
pub trait Solver: Send + Sync {
    /// Solves the maze described by the request.
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError>;
}

/// Solver backed by a JSON-over-HTTP service.
#[derive(Clone, Debug)]
pub struct HttpSolver {
    client: Client,
    url: String,
}

impl HttpSolver {
    /// Creates a solver posting to the provided endpoint.
    ///
    /// `timeout` bounds the whole exchange, connection included.
    pub fn new<T>(url: T, timeout: Duration) -> Result<Self, SolveError>
    where
        T: Into<String>,
    {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(SolveError::ClientBuild)?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Endpoint the solver posts to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Solver for HttpSolver {
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .map_err(SolveError::Transport)?;

        let status = response.status().as_u16();
        let body = response.text().map_err(SolveError::Transport)?;
        classify(status, &body)
    }
}

#[derive(Deserialize)]
struct FailureBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Interprets a status code and body returned by the solve service.
///
/// Success statuses must carry a `{visited, path}` body. Any other status
/// becomes [`SolveError::RequestFailed`] carrying the textual `detail` field
/// verbatim, or [`GENERIC_FAILURE_MESSAGE`] when the body has none.
pub fn classify(status: u16, body: &str) -> Result<SolveResponse, SolveError> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body).map_err(SolveError::Malformed);
    }

    let message = serde_json::from_str::<FailureBody>(body)
        .ok()
        .and_then(|failure| match failure.detail {
            Some(serde_json::Value::String(detail)) if !detail.is_empty() => Some(detail),
            _ => None,
        })
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_owned());

    Err(SolveError::RequestFailed { status, message })
}
