//! Evaluation Protocol
//!
//! Wire format between the editor and the rule evaluation service.
//!
//! # Request
//!
//! A single `POST /evaluate` with a JSON body:
//! ```text
//! { "grlText": <base64>, "jsonInput": [<base64>, ...] }
//! ```
//!
//! Every buffer is base64-encoded (standard alphabet, padded) from its UTF-8
//! bytes, so arbitrary text survives the JSON embedding unchanged. The
//! `jsonInput` array carries one entry per context block, in visual order.
//! The earlier single-context shape `{ "grlText", "jsonText" }` is still
//! available through [`RequestShape::Legacy`].
//!
//! # Response
//!
//! A response is interpreted into exactly one of two branches, see
//! [`EvaluationOutcome`]:
//! - success: 2xx status and a body that parses as JSON
//! - failure: anything else, including transport errors

pub mod codec;
pub mod defaults;
pub mod envelope;
pub mod error;
pub mod outcome;
pub mod paths;

pub use codec::{decode, encode};
pub use defaults::{DEFAULT_ENDPOINT, EVALUATE_PATH, TAB_TOKEN};
pub use envelope::{EvaluationRequest, LegacyEvaluationRequest, RequestShape};
pub use error::ProtocolError;
pub use outcome::{evaluate_url, EvaluationOutcome, RawResponse};
