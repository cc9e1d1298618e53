//! Phases command - print the workflow and its permission tables

use crate::cli::style::Stylize;
use anstream::println;
use cms_workflow::workflow::{PhaseAction, SubmissionPhase, phase_progress, permitted_roles};

fn roles_cell(action: PhaseAction, phase: SubmissionPhase) -> String {
    let roles = permitted_roles(action, phase);
    if roles.is_empty() {
        "-".to_string()
    } else {
        roles
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Run the phases command
pub fn run_phases() {
    println!("{}", "Submission Workflow".emphasis());
    println!();
    println!(
        "  {:<3} {:<18} {:>5}  {:<18} {:<18} {:<18}",
        "#", "phase", "%", "advance", "send back", "edit"
    );

    for phase in SubmissionPhase::ALL {
        println!(
            "  {:<3} {:<18} {:>4}%  {:<18} {:<18} {:<18}",
            phase.index() + 1,
            phase.as_str(),
            phase_progress(phase),
            roles_cell(PhaseAction::Advance, phase),
            roles_cell(PhaseAction::SendBack, phase),
            roles_cell(PhaseAction::Edit, phase),
        );
    }

    println!();
    println!("{}", "Admins may act at any phase except complete.".muted());
    println!("{}", "Send-back returns to any earlier phase and needs a reason.".muted());
}
