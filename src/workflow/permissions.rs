//! Role-gated phase permissions
//!
//! Three static tables (advance, send back, edit) map each phase to the
//! workflow roles allowed to act on it. The admin flag bypasses every table.
//! Nobody appears in any table for `complete`, and nobody may send back from
//! `data_entry` since no phase precedes it.

use crate::types::Submission;
use crate::workflow::{SubmissionPhase, WorkflowUserRole};
use std::fmt;
use tracing::warn;

use SubmissionPhase::{BotanistReview, Complete, DataEntry, Documents, FinanceApproval, SendEmails};
use WorkflowUserRole::{Botanist, Finance};

/// An action gated by the permission tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseAction {
    /// Move to the next phase
    Advance,
    /// Return to an earlier phase
    SendBack,
    /// Modify the phase's data
    Edit,
}

impl PhaseAction {
    /// All actions
    pub const ALL: [Self; 3] = [Self::Advance, Self::SendBack, Self::Edit];
}

impl fmt::Display for PhaseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Advance => "advance",
            Self::SendBack => "send back",
            Self::Edit => "edit",
        })
    }
}

/// Roles listed in the permission table for `action` at `phase`
pub const fn permitted_roles(
    action: PhaseAction,
    phase: SubmissionPhase,
) -> &'static [WorkflowUserRole] {
    match action {
        PhaseAction::Advance => match phase {
            DataEntry => &[Botanist, Finance],
            FinanceApproval => &[Finance],
            BotanistReview | Documents | SendEmails => &[Botanist],
            Complete => &[],
        },
        PhaseAction::SendBack => match phase {
            DataEntry | Complete => &[],
            FinanceApproval => &[Finance],
            BotanistReview | Documents | SendEmails => &[Botanist],
        },
        PhaseAction::Edit => match phase {
            DataEntry => &[Botanist, Finance],
            FinanceApproval => &[Finance],
            BotanistReview | Documents | SendEmails => &[Botanist],
            Complete => &[],
        },
    }
}

fn role_permitted(action: PhaseAction, phase: SubmissionPhase, role: WorkflowUserRole) -> bool {
    permitted_roles(action, phase).contains(&role)
}

/// Whether `role` may advance a submission out of `phase`
pub fn can_advance_phase(phase: SubmissionPhase, role: WorkflowUserRole, is_admin: bool) -> bool {
    is_admin || role_permitted(PhaseAction::Advance, phase, role)
}

/// Whether `role` may send a submission back from `phase`
pub fn can_send_back(phase: SubmissionPhase, role: WorkflowUserRole, is_admin: bool) -> bool {
    is_admin || role_permitted(PhaseAction::SendBack, phase, role)
}

/// Whether `role` may edit the data of `phase`
///
/// Historical phases are read-only for everyone, admins included.
pub fn can_edit_phase(
    phase: SubmissionPhase,
    is_current_phase: bool,
    role: WorkflowUserRole,
    is_admin: bool,
) -> bool {
    if !is_current_phase {
        return false;
    }
    is_admin || role_permitted(PhaseAction::Edit, phase, role)
}

/// Whether `role` can do anything at the submission's current phase
pub fn has_any_permission(submission: &Submission, role: WorkflowUserRole, is_admin: bool) -> bool {
    let Some(phase) = submission.phase.known() else {
        warn!(
            submission = submission.id,
            phase = %submission.phase,
            "unrecognised phase; treating as no permission"
        );
        return false;
    };

    can_advance_phase(phase, role, is_admin)
        || can_send_back(phase, role, is_admin)
        || can_edit_phase(phase, true, role, is_admin)
}
