//! Submission dispatcher.
//!
//! [`Submitter`] runs at most one submission at a time on the ambient tokio
//! runtime. The UI thread starts it with [`Submitter::begin`] and collects
//! the result from its tick loop with [`Submitter::poll`].

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use grledit_protocol::{EvaluationOutcome, EvaluationRequest, RequestShape};
use tracing::{info, warn};

use super::{EvaluationTransport, SubmitError};

/// A finished submission.
#[derive(Debug, Clone)]
pub struct SubmissionResult {
    pub outcome: EvaluationOutcome,
    pub elapsed_ms: u64,
    /// Number of context blocks that were sent.
    pub block_count: usize,
}

/// Serialize, post once, classify. Transport errors become a status-0 failure.
pub async fn submit_once(
    transport: &dyn EvaluationTransport,
    request: &EvaluationRequest,
    shape: RequestShape,
) -> EvaluationOutcome {
    let body = match request.to_body(shape) {
        Ok(body) => body,
        Err(err) => return EvaluationOutcome::transport_failure(err.to_string()),
    };

    match transport.post(body).await {
        Ok(response) => {
            let outcome = EvaluationOutcome::from_response(response);
            if outcome.is_success() {
                info!(status = outcome.status(), transport = transport.name(), "evaluation succeeded");
            } else {
                warn!(status = outcome.status(), transport = transport.name(), "evaluation failed");
            }
            outcome
        }
        Err(err) => {
            warn!(transport = transport.name(), error = %err, "evaluation request did not complete");
            EvaluationOutcome::transport_failure(err.to_string())
        }
    }
}

struct PendingSubmission {
    rx: mpsc::Receiver<SubmissionResult>,
    block_count: usize,
    started: Instant,
}

pub struct Submitter {
    transport: Arc<dyn EvaluationTransport>,
    shape: RequestShape,
    pending: Option<PendingSubmission>,
}

impl Submitter {
    pub fn new(transport: Arc<dyn EvaluationTransport>, shape: RequestShape) -> Self {
        Self {
            transport,
            shape,
            pending: None,
        }
    }

    /// True from `begin` until `poll` hands back the result.
    pub fn is_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a submission of `request`. Rejected while another is in flight.
    pub fn begin(&mut self, request: EvaluationRequest) -> Result<(), SubmitError> {
        if self.pending.is_some() {
            return Err(SubmitError::InFlight);
        }
        let handle = tokio::runtime::Handle::try_current().map_err(|_| SubmitError::NoRuntime)?;

        let block_count = request.json_input.len();
        let shape = self.shape;
        let transport = Arc::clone(&self.transport);
        let (tx, rx) = mpsc::sync_channel(1);
        let started = Instant::now();

        info!(blocks = block_count, shape = shape.as_str(), "submitting rule set");
        handle.spawn(async move {
            let outcome = submit_once(transport.as_ref(), &request, shape).await;
            let _ = tx.send(SubmissionResult {
                outcome,
                elapsed_ms: started.elapsed().as_millis() as u64,
                block_count,
            });
        });

        self.pending = Some(PendingSubmission {
            rx,
            block_count,
            started,
        });
        Ok(())
    }

    /// Non-blocking check for the in-flight result.
    pub fn poll(&mut self) -> Option<SubmissionResult> {
        let pending = self.pending.as_ref()?;
        let result = match pending.rx.try_recv() {
            Ok(result) => result,
            Err(mpsc::TryRecvError::Empty) => return None,
            Err(mpsc::TryRecvError::Disconnected) => {
                warn!("submission task ended without a result");
                SubmissionResult {
                    outcome: EvaluationOutcome::transport_failure(
                        "Submission task ended unexpectedly",
                    ),
                    elapsed_ms: pending.started.elapsed().as_millis() as u64,
                    block_count: pending.block_count,
                }
            }
        };
        self.pending = None;
        Some(result)
    }
}
