//! Transition planning
//!
//! Checks a requested phase change against the workflow model before any
//! request reaches the API.

use crate::error::{Result, WorkflowError};
use crate::types::Submission;
use crate::workflow::{
    SubmissionPhase, WorkflowUserRole, can_advance_phase, can_send_back, next_phase,
    send_back_targets,
};
use std::fmt;

/// What the caller wants to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionRequest {
    /// Move to the next phase
    Advance,
    /// Return to an earlier phase
    SendBack {
        /// Phase to return to
        target: SubmissionPhase,
        /// Audit reason
        reason: String,
    },
}

/// Who is asking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// Workflow role
    pub role: WorkflowUserRole,
    /// Admin override
    pub is_admin: bool,
}

/// A validated transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionKind {
    /// Forward by one phase
    Advance,
    /// Back to an earlier phase
    SendBack {
        /// Trimmed audit reason
        reason: String,
    },
}

/// A phase change the workflow model allows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    /// Submission to change
    pub submission_id: u64,
    /// Phase the submission was in when planned
    pub from: SubmissionPhase,
    /// Phase it should end up in
    pub to: SubmissionPhase,
    /// Advance or send-back
    pub kind: TransitionKind,
}

impl fmt::Display for TransitionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TransitionKind::Advance => write!(
                f,
                "advance submission #{}: {} → {}",
                self.submission_id,
                self.from.label(),
                self.to.label()
            ),
            TransitionKind::SendBack { reason } => write!(
                f,
                "send submission #{} back: {} → {} ({reason})",
                self.submission_id,
                self.from.label(),
                self.to.label()
            ),
        }
    }
}

/// Validate `request` for `submission` as performed by `actor`
pub fn plan_transition(
    submission: &Submission,
    request: &TransitionRequest,
    actor: Actor,
) -> Result<TransitionPlan> {
    let from = submission
        .phase
        .known()
        .ok_or_else(|| WorkflowError::UnknownPhase {
            id: submission.id,
            value: submission.phase.to_string(),
        })?;

    // The admin override opens the permission tables, not the terminal phase
    if from.is_terminal() {
        return Err(WorkflowError::Terminal(submission.id).into());
    }

    match request {
        TransitionRequest::Advance => {
            if !can_advance_phase(from, actor.role, actor.is_admin) {
                return Err(WorkflowError::AdvanceNotPermitted(from).into());
            }
            let to = next_phase(from).ok_or(WorkflowError::Terminal(submission.id))?;
            Ok(TransitionPlan {
                submission_id: submission.id,
                from,
                to,
                kind: TransitionKind::Advance,
            })
        }
        TransitionRequest::SendBack { target, reason } => {
            if !can_send_back(from, actor.role, actor.is_admin) {
                return Err(WorkflowError::SendBackNotPermitted(from).into());
            }
            if !send_back_targets(from).contains(target) {
                return Err(WorkflowError::InvalidSendBackTarget { from, to: *target }.into());
            }
            let reason = reason.trim();
            if reason.is_empty() {
                return Err(WorkflowError::MissingReason.into());
            }
            Ok(TransitionPlan {
                submission_id: submission.id,
                from,
                to: *target,
                kind: TransitionKind::SendBack {
                    reason: reason.to_string(),
                },
            })
        }
    }
}
