//! Evaluation request envelopes.

use serde::{Deserialize, Serialize};

use crate::codec::encode;
use crate::error::ProtocolError;

/// Which request body layout to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestShape {
    /// `{ "grlText", "jsonInput": [..] }`, one entry per context block
    #[default]
    Array,
    /// `{ "grlText", "jsonText" }`, first context block only
    Legacy,
}

impl RequestShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestShape::Array => "array",
            RequestShape::Legacy => "legacy",
        }
    }
}

/// Request body for `POST /evaluate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    #[serde(rename = "grlText")]
    pub grl_text: String,
    #[serde(rename = "jsonInput")]
    pub json_input: Vec<String>,
}

impl EvaluationRequest {
    /// Encode raw buffer texts into an envelope. Context order is preserved.
    pub fn from_texts<I, S>(grl: &str, contexts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            grl_text: encode(grl),
            json_input: contexts.into_iter().map(|c| encode(c.as_ref())).collect(),
        }
    }

    /// Serialize the body in the requested shape.
    pub fn to_body(&self, shape: RequestShape) -> Result<String, ProtocolError> {
        let body = match shape {
            RequestShape::Array => serde_json::to_string(self)?,
            RequestShape::Legacy => serde_json::to_string(&LegacyEvaluationRequest::from(self))?,
        };
        Ok(body)
    }
}

/// Single-context request body from the first protocol revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyEvaluationRequest {
    #[serde(rename = "grlText")]
    pub grl_text: String,
    #[serde(rename = "jsonText")]
    pub json_text: String,
}

impl From<&EvaluationRequest> for LegacyEvaluationRequest {
    fn from(request: &EvaluationRequest) -> Self {
        Self {
            grl_text: request.grl_text.clone(),
            json_text: request
                .json_input
                .first()
                .cloned()
                .unwrap_or_else(|| encode("")),
        }
    }
}
