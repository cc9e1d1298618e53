//! Error types for cms-workflow

use crate::workflow::SubmissionPhase;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the library
#[derive(Debug, Error)]
pub enum Error {
    /// The workflow model rejected a requested transition
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Submission does not exist on the remote API
    #[error("submission {0} not found")]
    SubmissionNotFound(u64),

    /// Remote API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication missing or rejected
    #[error("authentication error: {0}")]
    Auth(String),

    /// The server rejected a phase change or did not apply it
    #[error("phase change for submission {0} did not take effect")]
    TransitionFailed(u64),

    /// Command needs a logged-in session
    #[error("not logged in - run `cms login` first")]
    NotLoggedIn,

    /// Invalid configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// Session file could not be read or written
    #[error("session store error: {0}")]
    Session(String),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal invariant violated
    #[error("internal error: {0}")]
    Internal(String),
}

/// Reasons the workflow model refuses a transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Submission carries a phase value the client does not know
    #[error("submission {id} has unrecognised phase '{value}'")]
    UnknownPhase {
        /// Submission ID
        id: u64,
        /// Raw phase value from the API
        value: String,
    },

    /// Submission already reached the terminal phase
    #[error("submission {0} is complete; no further transitions are possible")]
    Terminal(u64),

    /// Role may not advance from this phase
    #[error("not permitted to advance from {0}")]
    AdvanceNotPermitted(SubmissionPhase),

    /// Role may not send back from this phase
    #[error("not permitted to send back from {0}")]
    SendBackNotPermitted(SubmissionPhase),

    /// Target is not an already-completed phase
    #[error("cannot send back from {from} to {to}; target must be an earlier phase")]
    InvalidSendBackTarget {
        /// Current phase
        from: SubmissionPhase,
        /// Requested target
        to: SubmissionPhase,
    },

    /// Send-back needs a reason for the audit trail
    #[error("a reason is required to send a submission back")]
    MissingReason,
}
