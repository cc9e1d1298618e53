//! Progress callback trait for interface-agnostic updates
//!
//! Lets the CLI (or anything else driving a transition) report what the
//! engine is doing without the engine knowing about terminals.

use crate::error::Error;
use async_trait::async_trait;
use std::fmt;

/// Step of a transition run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStep {
    /// Sending the phase change to the API
    Requesting,
    /// Re-fetching the submission to confirm the new phase
    Refreshing,
    /// Finished
    Complete,
}

impl fmt::Display for TransitionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Requesting => "Requesting phase change",
            Self::Refreshing => "Refreshing submission",
            Self::Complete => "Done",
        })
    }
}

/// Progress callback trait
#[async_trait]
pub trait TransitionProgress: Send + Sync {
    /// Called when entering a new step
    async fn on_step(&self, step: TransitionStep);

    /// Called when an error occurs
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl TransitionProgress for NoopProgress {
    async fn on_step(&self, _step: TransitionStep) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}
