//! Interpretation and rendering of evaluation responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::defaults::EVALUATE_PATH;
use crate::error::ProtocolError;

/// Status reported for failures that never produced an HTTP response.
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;

/// What came back over the wire, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The two mutually exclusive results of a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationOutcome {
    Success {
        status: u16,
        body: Value,
    },
    Failure {
        status: u16,
        status_text: String,
        response_text: String,
    },
}

impl EvaluationOutcome {
    /// Classify a response. A 2xx body that is not JSON is a failure.
    pub fn from_response(response: RawResponse) -> Self {
        if response.is_success_status() {
            if let Ok(body) = serde_json::from_str::<Value>(&response.body) {
                return EvaluationOutcome::Success {
                    status: response.status,
                    body,
                };
            }
        }
        EvaluationOutcome::Failure {
            status: response.status,
            status_text: response.status_text,
            response_text: response.body,
        }
    }

    /// Failure for a request that never got a response (connect refused, reset, ...).
    pub fn transport_failure(description: impl Into<String>) -> Self {
        EvaluationOutcome::Failure {
            status: TRANSPORT_FAILURE_STATUS,
            status_text: description.into(),
            response_text: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, EvaluationOutcome::Success { .. })
    }

    pub fn status(&self) -> u16 {
        match self {
            EvaluationOutcome::Success { status, .. } | EvaluationOutcome::Failure { status, .. } => {
                *status
            }
        }
    }

    /// Human-readable line written into the Result surface.
    pub fn render(&self) -> String {
        match self {
            EvaluationOutcome::Success { status, body } => {
                let body = serde_json::to_string(body).unwrap_or_else(|_| body.to_string());
                format!("{} : {}", status, body)
            }
            EvaluationOutcome::Failure {
                status,
                status_text,
                response_text,
            } => format!(
                "Status {} : {}. ResponseText : {}",
                status, status_text, response_text
            ),
        }
    }
}

/// Resolve the evaluation URL for a configured endpoint base.
pub fn evaluate_url(endpoint: &str) -> Result<String, ProtocolError> {
    let mut parsed = Url::parse(endpoint).map_err(|e| ProtocolError::Endpoint {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ProtocolError::Endpoint {
            endpoint: endpoint.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    parsed
        .path_segments_mut()
        .map_err(|_| ProtocolError::Endpoint {
            endpoint: endpoint.to_string(),
            reason: "URL cannot carry a path".to_string(),
        })?
        .pop_if_empty()
        .push(EVALUATE_PATH.trim_start_matches('/'));
    Ok(parsed.into())
}
