//! Mock transport for deterministic tests.
//!
//! Replies are queued and consumed in order. An empty queue yields a
//! transport error so a missing setup step shows up in the outcome.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use grledit_protocol::RawResponse;

use super::{EvaluationTransport, TransportError};

/// One canned reply.
#[derive(Debug, Clone)]
pub enum CannedReply {
    Response(RawResponse),
    /// Simulates a request that never got a response.
    Unreachable(String),
}

impl CannedReply {
    pub fn ok_json(body: impl Into<String>) -> Self {
        CannedReply::Response(RawResponse::new(200, "OK", body))
    }

    pub fn status(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        CannedReply::Response(RawResponse::new(status, status_text, body))
    }
}

#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<VecDeque<CannedReply>>>,
    received: Arc<Mutex<Vec<String>>>,
    delay_ms: u64,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every reply, to keep a submission in flight for a while.
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn queue(&self, reply: CannedReply) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
    }

    /// Bodies posted so far, in order.
    pub fn received(&self) -> Vec<String> {
        self.received
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn replies_remaining(&self) -> usize {
        self.replies.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl EvaluationTransport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn post(&self, body: String) -> Result<RawResponse, TransportError> {
        if let Ok(mut received) = self.received.lock() {
            received.push(body);
        }
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        let reply = self.replies.lock().ok().and_then(|mut r| r.pop_front());
        match reply {
            Some(CannedReply::Response(response)) => Ok(response),
            Some(CannedReply::Unreachable(reason)) => Err(TransportError::Request(reason)),
            None => Err(TransportError::Request("no canned reply queued".to_string())),
        }
    }
}
