//! Remote case-tracking API
//!
//! Submissions live on the server; this module only fetches them and asks
//! the server to change their phase.

mod auth;
mod http;

pub use auth::{AuthSource, AuthToken, resolve_token};
pub use http::HttpSubmissionApi;

use crate::error::Result;
use crate::types::{CurrentUser, Submission};
use crate::workflow::SubmissionPhase;
use async_trait::async_trait;

/// Submission operations offered by the remote API
///
/// Abstracted so the transition engine and CLI can run against a mock.
#[async_trait]
pub trait SubmissionApi: Send + Sync {
    /// Fetch one submission
    async fn get_submission(&self, id: u64) -> Result<Submission>;

    /// List submissions, optionally only those at `phase`
    async fn list_submissions(&self, phase: Option<SubmissionPhase>) -> Result<Vec<Submission>>;

    /// Ask the server to move a submission to its next phase
    async fn advance_phase(&self, id: u64) -> Result<Submission>;

    /// Ask the server to return a submission to `target`, recording `reason`
    async fn send_back(&self, id: u64, target: SubmissionPhase, reason: &str) -> Result<Submission>;

    /// The user the configured credentials belong to
    async fn current_user(&self) -> Result<CurrentUser>;
}
