//! Status and history commands - show where a submission is in the workflow

use crate::cli::progress::with_spinner;
use crate::cli::style::{self, Stylize, arrow, bullet, check, current};
use anstream::{eprintln, println};
use cms_workflow::api::SubmissionApi;
use cms_workflow::error::Result;
use cms_workflow::session::SessionStore;
use cms_workflow::types::{HistoryAction, Submission};
use cms_workflow::workflow::{
    PanelMode, StepStatus, SubmissionPhase, WorkflowUserRole, available_actions, phase_steps,
};

fn print_header(submission: &Submission) {
    let mut header = format!("Submission #{}", submission.id);
    if !submission.reference.is_empty() {
        header.push_str(&format!("  {}", submission.reference));
    }
    println!("{}", header.emphasis());
    if !submission.police_station.is_empty() {
        println!("{}", submission.police_station.muted());
    }
}

fn print_steps(
    current_phase: SubmissionPhase,
    submission: &Submission,
    role: WorkflowUserRole,
    is_admin: bool,
) {
    for step in phase_steps(current_phase, role, is_admin) {
        let marker = match step.status {
            StepStatus::Completed => check().to_string(),
            StepStatus::Current => current().to_string(),
            StepStatus::Upcoming => bullet().to_string(),
        };
        let mode = match step.panel {
            PanelMode::Editable => "editable".success().to_string(),
            PanelMode::ReadOnly => "read-only".muted().to_string(),
            PanelMode::Hidden => String::new(),
        };
        let label = step.phase.label();
        if step.status == StepStatus::Current {
            println!("  {marker} {:<18} {mode}", label.emphasis().to_string());
        } else {
            println!("  {marker} {label:<18} {mode}");
        }
    }

    let docs = submission.certificates.len() + submission.invoices.len();
    if docs > 0 {
        println!(
            "  {}",
            format!(
                "{} certificate(s), {} invoice(s)",
                submission.certificates.len(),
                submission.invoices.len()
            )
            .muted()
        );
    }
}

/// Run the status command
pub async fn run_status(api: &dyn SubmissionApi, store: &dyn SessionStore, id: u64) -> Result<()> {
    let session = store.load()?;
    let (role, is_admin) = session.require_login()?;

    let submission = with_spinner("Fetching submission...", api.get_submission(id)).await?;

    print_header(&submission);

    let Some(phase) = submission.phase.known() else {
        eprintln!(
            "{}",
            format!(
                "Unrecognised phase '{}' - the server may be newer than this client",
                submission.phase
            )
            .warn()
        );
        println!("{}", style::progress_bar(submission.phase.progress()));
        return Ok(());
    };

    println!(
        "{}  {}",
        style::progress_bar(submission.phase.progress()),
        phase.label().accent()
    );

    if session.preferences.compact {
        return Ok(());
    }

    println!();
    print_steps(phase, &submission, role, is_admin);
    println!();

    let actions = available_actions(phase, role, is_admin);
    if !actions.any() {
        println!("{}", "No actions available to you at this phase".muted());
        return Ok(());
    }

    println!("{}", "Actions".emphasis());
    if let Some(next) = actions.advance_to {
        println!(
            "  {} advance to {}  {}",
            arrow(),
            next.label(),
            format!("cms advance {id}").muted()
        );
    }
    if actions.send_back {
        let targets: Vec<&str> = actions
            .send_back_targets
            .iter()
            .map(|p| p.as_str())
            .collect();
        println!(
            "  {} send back to {}  {}",
            arrow(),
            targets.join(" | "),
            format!("cms send-back {id} --to <phase> --reason <text>").muted()
        );
    }

    Ok(())
}

/// Run the history command
pub async fn run_history(api: &dyn SubmissionApi, id: u64) -> Result<()> {
    let submission = with_spinner("Fetching submission...", api.get_submission(id)).await?;

    print_header(&submission);
    println!();

    if submission.phase_history.is_empty() {
        println!(
            "{}",
            format!(
                "No phase changes yet (created {})",
                submission.created_at.format("%Y-%m-%d %H:%M")
            )
            .muted()
        );
        return Ok(());
    }

    for entry in &submission.phase_history {
        let action = match entry.action {
            HistoryAction::Advance => entry.action.to_string().success().to_string(),
            HistoryAction::SendBack => entry.action.to_string().warn().for_stdout().to_string(),
        };
        println!(
            "  {}  {:<10} {} {} {}  {}",
            entry.timestamp.format("%Y-%m-%d %H:%M").muted(),
            action,
            entry.from_phase,
            arrow(),
            entry.to_phase,
            entry.user.as_deref().unwrap_or("-").muted()
        );
        if let Some(reason) = &entry.reason {
            println!("      {}", reason.muted());
        }
    }

    for (label, at) in [
        ("documents generated", submission.documents_generated_at),
        ("emails sent", submission.emails_sent_at),
        ("completed", submission.completed_at),
    ] {
        if let Some(at) = at {
            println!("  {}  {label}", at.format("%Y-%m-%d %H:%M").muted());
        }
    }

    Ok(())
}
