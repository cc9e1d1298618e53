//! Display decisions for the phase progress and phase content panels

use crate::workflow::{
    SubmissionPhase, WorkflowUserRole, can_advance_phase, can_edit_phase, can_send_back,
    is_phase_clickable, send_back_targets,
};

/// Where a phase sits relative to the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Already passed
    Completed,
    /// The submission's current phase
    Current,
    /// Not reached yet
    Upcoming,
}

/// How a phase's content panel is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMode {
    /// Shown with editable fields
    Editable,
    /// Shown, but read-only
    ReadOnly,
    /// Not openable (future phase)
    Hidden,
}

/// One entry of the progress display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseStep {
    /// The phase this step describes
    pub phase: SubmissionPhase,
    /// Position relative to the current phase
    pub status: StepStatus,
    /// Whether the step can be opened
    pub clickable: bool,
    /// How its panel renders
    pub panel: PanelMode,
}

/// Actions available at the current phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionAvailability {
    /// Advance target, when permitted and not terminal
    pub advance_to: Option<SubmissionPhase>,
    /// Whether send-back is permitted
    pub send_back: bool,
    /// Phases a send-back may target (empty when not permitted)
    pub send_back_targets: Vec<SubmissionPhase>,
}

impl ActionAvailability {
    /// Whether any action is offered
    pub const fn any(&self) -> bool {
        self.advance_to.is_some() || self.send_back
    }
}

/// Build the progress display for a submission at `current`
pub fn phase_steps(
    current: SubmissionPhase,
    role: WorkflowUserRole,
    is_admin: bool,
) -> Vec<PhaseStep> {
    SubmissionPhase::ALL
        .into_iter()
        .map(|phase| {
            let status = match phase.cmp(&current) {
                std::cmp::Ordering::Less => StepStatus::Completed,
                std::cmp::Ordering::Equal => StepStatus::Current,
                std::cmp::Ordering::Greater => StepStatus::Upcoming,
            };
            let clickable = is_phase_clickable(phase, current);
            // A finished submission is shown read-only, admin or not
            let panel = if !clickable {
                PanelMode::Hidden
            } else if !current.is_terminal()
                && can_edit_phase(phase, phase == current, role, is_admin)
            {
                PanelMode::Editable
            } else {
                PanelMode::ReadOnly
            };
            PhaseStep {
                phase,
                status,
                clickable,
                panel,
            }
        })
        .collect()
}

/// Actions `role` may take at `current`
pub fn available_actions(
    current: SubmissionPhase,
    role: WorkflowUserRole,
    is_admin: bool,
) -> ActionAvailability {
    let advance_to = if can_advance_phase(current, role, is_admin) {
        crate::workflow::next_phase(current)
    } else {
        None
    };

    // complete is terminal even under the admin override
    let targets = send_back_targets(current);
    let send_back =
        !current.is_terminal() && can_send_back(current, role, is_admin) && !targets.is_empty();

    ActionAvailability {
        advance_to,
        send_back,
        send_back_targets: if send_back { targets } else { Vec::new() },
    }
}
