//! Submission phase workflow
//!
//! A six-phase linear state machine with role-gated transitions:
//! - `phase` - the phases, their ordering, and parsing of wire values
//! - `role` - the three-valued workflow role
//! - `permissions` - who may advance, send back, or edit at each phase
//! - `progress` - completed phases, percentage, next phase, send-back targets
//! - `view` - what the progress and content panels should show
//!
//! Everything here is pure. Actually changing a submission's phase is the
//! remote API's job; see [`crate::transition`].

mod permissions;
mod phase;
mod progress;
mod role;
mod view;

pub use permissions::{
    PhaseAction, can_advance_phase, can_edit_phase, can_send_back, has_any_permission,
    permitted_roles,
};
pub use phase::{ParsePhaseError, PhaseValue, SubmissionPhase};
pub use progress::{
    completed_phases, is_phase_clickable, next_phase, phase_progress, send_back_targets,
};
pub use role::{WorkflowUserRole, to_workflow_role};
pub use view::{
    ActionAvailability, PanelMode, PhaseStep, StepStatus, available_actions, phase_steps,
};
