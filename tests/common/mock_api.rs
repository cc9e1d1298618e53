//! Mock submission API for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use cms_workflow::api::SubmissionApi;
use cms_workflow::error::{Error, Result};
use cms_workflow::types::{CurrentUser, HistoryAction, PhaseHistoryEntry, Submission};
use cms_workflow::workflow::{PhaseValue, SubmissionPhase};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Call record for `send_back`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendBackCall {
    pub id: u64,
    pub target: SubmissionPhase,
    pub reason: String,
}

/// In-memory stand-in for the remote API
///
/// Features:
/// - Server-side phase changes with history entries
/// - Call tracking for verification
/// - Error injection for failure path testing
/// - An "ignore mutations" switch to simulate a server that accepts a
///   change but doesn't apply it
pub struct MockSubmissionApi {
    submissions: Mutex<BTreeMap<u64, Submission>>,
    user: Mutex<Option<CurrentUser>>,
    // Call tracking
    get_calls: Mutex<Vec<u64>>,
    advance_calls: Mutex<Vec<u64>>,
    send_back_calls: Mutex<Vec<SendBackCall>>,
    // Error injection
    error_on_get: Mutex<Option<String>>,
    error_on_mutation: Mutex<Option<String>>,
    ignore_mutations: Mutex<bool>,
}

impl MockSubmissionApi {
    /// Create a mock holding `submissions`
    pub fn with_submissions(submissions: Vec<Submission>) -> Self {
        Self {
            submissions: Mutex::new(submissions.into_iter().map(|s| (s.id, s)).collect()),
            user: Mutex::new(None),
            get_calls: Mutex::new(Vec::new()),
            advance_calls: Mutex::new(Vec::new()),
            send_back_calls: Mutex::new(Vec::new()),
            error_on_get: Mutex::new(None),
            error_on_mutation: Mutex::new(None),
            ignore_mutations: Mutex::new(false),
        }
    }

    /// Set the user returned by `current_user`
    pub fn set_user(&self, user: CurrentUser) {
        *self.user.lock().unwrap() = Some(user);
    }

    // === Error injection methods ===

    /// Make `get_submission` return an error
    pub fn fail_get(&self, msg: &str) {
        *self.error_on_get.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `advance_phase` and `send_back` return an error
    pub fn fail_mutations(&self, msg: &str) {
        *self.error_on_mutation.lock().unwrap() = Some(msg.to_string());
    }

    /// Accept mutations without changing the stored submission
    pub fn ignore_mutations(&self) {
        *self.ignore_mutations.lock().unwrap() = true;
    }

    // === Call verification methods ===

    pub fn get_calls(&self) -> Vec<u64> {
        self.get_calls.lock().unwrap().clone()
    }

    pub fn advance_calls(&self) -> Vec<u64> {
        self.advance_calls.lock().unwrap().clone()
    }

    pub fn send_back_calls(&self) -> Vec<SendBackCall> {
        self.send_back_calls.lock().unwrap().clone()
    }

    /// Current server-side copy of a submission
    pub fn stored(&self, id: u64) -> Submission {
        self.submissions.lock().unwrap()[&id].clone()
    }

    fn mutation_error(&self) -> Option<Error> {
        self.error_on_mutation
            .lock()
            .unwrap()
            .as_ref()
            .map(|msg| Error::Api {
                status: 400,
                message: msg.clone(),
            })
    }

    fn apply(
        &self,
        id: u64,
        to: SubmissionPhase,
        action: HistoryAction,
        reason: Option<&str>,
    ) -> Result<Submission> {
        let mut submissions = self.submissions.lock().unwrap();
        let submission = submissions
            .get_mut(&id)
            .ok_or(Error::SubmissionNotFound(id))?;

        if *self.ignore_mutations.lock().unwrap() {
            return Ok(submission.clone());
        }

        submission.phase_history.push(PhaseHistoryEntry {
            from_phase: submission.phase.clone(),
            to_phase: PhaseValue::Known(to),
            action,
            reason: reason.map(ToString::to_string),
            user: Some("mock".to_string()),
            timestamp: Utc::now(),
        });
        submission.phase = PhaseValue::Known(to);
        if to == SubmissionPhase::Complete {
            submission.completed_at = Some(Utc::now());
        }
        Ok(submission.clone())
    }
}

#[async_trait]
impl SubmissionApi for MockSubmissionApi {
    async fn get_submission(&self, id: u64) -> Result<Submission> {
        self.get_calls.lock().unwrap().push(id);

        if let Some(msg) = self.error_on_get.lock().unwrap().as_ref() {
            return Err(Error::Api {
                status: 500,
                message: msg.clone(),
            });
        }

        self.submissions
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(Error::SubmissionNotFound(id))
    }

    async fn list_submissions(&self, phase: Option<SubmissionPhase>) -> Result<Vec<Submission>> {
        Ok(self
            .submissions
            .lock()
            .unwrap()
            .values()
            .filter(|s| phase.is_none_or(|p| s.phase == PhaseValue::Known(p)))
            .cloned()
            .collect())
    }

    async fn advance_phase(&self, id: u64) -> Result<Submission> {
        self.advance_calls.lock().unwrap().push(id);

        if let Some(err) = self.mutation_error() {
            return Err(err);
        }

        let current = self
            .submissions
            .lock()
            .unwrap()
            .get(&id)
            .map(|s| s.phase.clone())
            .ok_or(Error::SubmissionNotFound(id))?;
        let next = current.next_phase().ok_or_else(|| Error::Api {
            status: 400,
            message: format!("cannot advance from {current}"),
        })?;
        self.apply(id, next, HistoryAction::Advance, None)
    }

    async fn send_back(
        &self,
        id: u64,
        target: SubmissionPhase,
        reason: &str,
    ) -> Result<Submission> {
        self.send_back_calls.lock().unwrap().push(SendBackCall {
            id,
            target,
            reason: reason.to_string(),
        });

        if let Some(err) = self.mutation_error() {
            return Err(err);
        }

        self.apply(id, target, HistoryAction::SendBack, Some(reason))
    }

    async fn current_user(&self) -> Result<CurrentUser> {
        self.user
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::Auth("invalid token".to_string()))
    }
}
