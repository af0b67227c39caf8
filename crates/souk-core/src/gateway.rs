//! Submission gateway interface.
//!
//! The gateway is an external collaborator: it delivers the encoded payload
//! to the backend and returns a success/failure envelope. The pipeline does
//! not retry; failure messages are surfaced verbatim and the draft is kept
//! for correction and resubmission.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::encode::SubmissionPayload;

/// Backend response envelope for ad submissions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmitEnvelope {
    pub fn ok(data: Option<JsonValue>) -> Self {
        SubmitEnvelope {
            success: true,
            data,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        SubmitEnvelope {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Whether a rejection message matches the backend's validation-failure
/// pattern, in which case the wizard routes back to the variant step.
pub fn is_validation_failure(message: &str) -> bool {
    message.to_lowercase().contains("validation failed")
}

/// Transport abstraction for ad submission. Implemented over HTTP by
/// `souk-client`; tests substitute in-memory stubs.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn submit(&self, payload: SubmissionPayload) -> anyhow::Result<SubmitEnvelope>;
}

/// Gateway that accepts every submission without sending anything. Useful
/// for tests and offline development.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpGateway;

#[async_trait]
impl SubmissionGateway for NoOpGateway {
    async fn submit(&self, _payload: SubmissionPayload) -> anyhow::Result<SubmitEnvelope> {
        Ok(SubmitEnvelope::ok(None))
    }
}
