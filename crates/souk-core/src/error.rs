//! Error types module
//!
//! All errors in the draft pipeline are unified under the `AppError` enum.
//! Nothing here is fatal to the process: the worst outcome of any error in
//! this subsystem is the loss of an unsaved draft.

/// Unified error type for the draft composition pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required field was absent or out of bounds at encode time. This
    /// means step-gating was bypassed (e.g. programmatic submission) and is
    /// treated as an invariant violation, not a user-facing message.
    #[error("Draft incomplete: missing or invalid field `{field}`")]
    DraftIncomplete { field: &'static str },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Durable snapshot could not be read or written.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// The backend rejected the submission. `validation` is set when the
    /// message matches the server's validation-failure pattern, in which
    /// case the wizard routes the user back to the variant step.
    #[error("Submission rejected: {message}")]
    Gateway { message: String, validation: bool },

    /// An operation was attempted from a wizard stage that does not allow it.
    #[error("Invalid wizard stage: {0}")]
    Stage(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Whether the user can recover by correcting input and retrying.
    pub fn is_recoverable(&self) -> bool {
        match self {
            AppError::InvalidInput(_) | AppError::Gateway { .. } | AppError::Snapshot(_) => true,
            AppError::DraftIncomplete { .. }
            | AppError::Stage(_)
            | AppError::Internal(_)
            | AppError::InternalWithSource { .. } => false,
        }
    }
}
