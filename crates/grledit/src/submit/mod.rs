//! Submission pipeline.
//!
//! A snapshot of the editor buffers is serialized, posted once to the
//! evaluation service, and the response is classified into an
//! [`EvaluationOutcome`](grledit_protocol::EvaluationOutcome). Nothing here
//! retries: one trigger is one request.

pub mod dispatcher;
pub mod mock;
pub mod transport;

use thiserror::Error;

pub use dispatcher::{submit_once, SubmissionResult, Submitter};
pub use mock::{CannedReply, MockTransport};
pub use transport::{EvaluationTransport, HttpTransport};

/// Errors raised before any outcome exists.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Endpoint failed validation
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] grledit_protocol::ProtocolError),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Request did not complete within the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Connection refused, reset, DNS failure and friends
    #[error("Request failed: {0}")]
    Request(String),
}

/// Errors from [`Submitter::begin`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Submission already running")]
    InFlight,

    #[error("No async runtime available for submission")]
    NoRuntime,
}
