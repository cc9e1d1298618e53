//! Test data factories for cms-workflow types
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use cms_workflow::error::Error;
use cms_workflow::transition::{Actor, TransitionProgress, TransitionStep};
use cms_workflow::types::{CurrentUser, Submission, UserRole};
use cms_workflow::workflow::{SubmissionPhase, WorkflowUserRole};
use std::sync::Mutex;

/// Create a submission at `phase` with a reference derived from its ID
pub fn make_submission(id: u64, phase: SubmissionPhase) -> Submission {
    Submission {
        reference: format!("EXH-{id:04}"),
        police_station: "Central Station".to_string(),
        ..Submission::new(id, phase)
    }
}

pub const BOTANIST: Actor = Actor {
    role: WorkflowUserRole::Botanist,
    is_admin: false,
};

pub const FINANCE: Actor = Actor {
    role: WorkflowUserRole::Finance,
    is_admin: false,
};

pub const NO_ROLE: Actor = Actor {
    role: WorkflowUserRole::None,
    is_admin: false,
};

pub const ADMIN: Actor = Actor {
    role: WorkflowUserRole::None,
    is_admin: true,
};

/// A logged-in user
pub fn make_user(username: &str, role: UserRole, is_admin: bool) -> CurrentUser {
    CurrentUser {
        username: username.to_string(),
        role,
        is_admin,
    }
}

/// Progress callback that records everything it is told
#[derive(Default)]
pub struct RecordingProgress {
    pub steps: Mutex<Vec<TransitionStep>>,
    pub messages: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn steps(&self) -> Vec<TransitionStep> {
        self.steps.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransitionProgress for RecordingProgress {
    async fn on_step(&self, step: TransitionStep) {
        self.steps.lock().unwrap().push(step);
    }

    async fn on_error(&self, error: &Error) {
        self.errors.lock().unwrap().push(error.to_string());
    }

    async fn on_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
