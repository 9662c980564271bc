//! Transport seam between the dispatcher and the network.

use std::time::Duration;

use async_trait::async_trait;
use grledit_protocol::{evaluate_url, RawResponse};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::debug;

use super::TransportError;

/// Delivers one serialized request body and returns whatever came back.
///
/// Any HTTP status is an `Ok`; `Err` is reserved for requests that never
/// produced a response.
#[async_trait]
pub trait EvaluationTransport: Send + Sync {
    /// Short name for logs and status lines
    fn name(&self) -> &str;

    async fn post(&self, body: String) -> Result<RawResponse, TransportError>;
}

/// `POST <endpoint>/evaluate` over reqwest.
pub struct HttpTransport {
    client: Client,
    url: String,
    timeout_secs: Option<u64>,
}

impl HttpTransport {
    /// Build a transport for `endpoint` (scheme + host + port, optional base path).
    pub fn new(endpoint: &str, timeout_secs: Option<u64>) -> Result<Self, TransportError> {
        let url = evaluate_url(endpoint)?;
        let mut builder = Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url,
            timeout_secs,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl EvaluationTransport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn post(&self, body: String) -> Result<RawResponse, TransportError> {
        debug!(url = %self.url, bytes = body.len(), "posting evaluation request");

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let text = response.text().await.map_err(|e| self.classify(e))?;

        Ok(RawResponse::new(status.as_u16(), status_text, text))
    }
}

impl HttpTransport {
    fn classify(&self, err: reqwest::Error) -> TransportError {
        match self.timeout_secs {
            Some(secs) if err.is_timeout() => TransportError::Timeout(secs),
            _ => TransportError::Request(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_is_derived_from_endpoint() {
        let transport = HttpTransport::new("http://localhost:32123/", None).unwrap();
        assert_eq!(transport.url(), "http://localhost:32123/evaluate");
        assert_eq!(transport.name(), "http");
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let err = HttpTransport::new("ftp://localhost", Some(5)).err().unwrap();
        assert!(matches!(err, TransportError::InvalidEndpoint(_)));
    }
}
