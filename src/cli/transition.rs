//! Advance and send-back commands - change a submission's phase

use crate::cli::progress::{CliProgress, with_spinner};
use crate::cli::style::{Stylize, cross};
use anstream::{eprintln, println};
use cms_workflow::api::SubmissionApi;
use cms_workflow::error::{Error, Result};
use cms_workflow::session::SessionStore;
use cms_workflow::transition::{
    Actor, TransitionRequest, execute_transition, plan_transition,
};
use cms_workflow::workflow::SubmissionPhase;
use dialoguer::Confirm;

/// Options shared by the phase-changing commands
#[derive(Debug, Clone, Copy)]
pub struct TransitionOptions {
    /// Show what would happen without calling the API
    pub dry_run: bool,
    /// Skip the confirmation prompt
    pub assume_yes: bool,
}

async fn run_transition(
    api: &dyn SubmissionApi,
    store: &dyn SessionStore,
    id: u64,
    request: TransitionRequest,
    options: TransitionOptions,
) -> Result<()> {
    let session = store.load()?;
    let (role, is_admin) = session.require_login()?;

    // Always plan against a fresh copy of the submission
    let submission = with_spinner("Fetching submission...", api.get_submission(id)).await?;
    let plan = plan_transition(&submission, &request, Actor { role, is_admin })?;

    let is_send_back = matches!(request, TransitionRequest::SendBack { .. });
    if is_send_back && !options.dry_run && !options.assume_yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("{}?", capitalize(&plan.to_string())))
            .default(false)
            .interact()
            .map_err(|e| Error::Internal(format!("confirmation prompt failed: {e}")))?;
        if !confirmed {
            println!("{}", "Cancelled".muted());
            return Ok(());
        }
    }

    let progress = CliProgress::new(session.preferences.compact);
    let result = execute_transition(&plan, api, &progress, options.dry_run).await?;

    if options.dry_run {
        return Ok(());
    }

    if result.success {
        if let Some(phase) = result.observed_phase {
            println!("Submission #{id} is now in {}", phase.accent());
        }
    } else {
        eprintln!("{} {}", cross(), "Phase change failed".error());
        for err in &result.errors {
            eprintln!("  {err}");
        }
        return Err(Error::TransitionFailed(id));
    }

    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Run the advance command
pub async fn run_advance(
    api: &dyn SubmissionApi,
    store: &dyn SessionStore,
    id: u64,
    options: TransitionOptions,
) -> Result<()> {
    run_transition(api, store, id, TransitionRequest::Advance, options).await
}

/// Run the send-back command
pub async fn run_send_back(
    api: &dyn SubmissionApi,
    store: &dyn SessionStore,
    id: u64,
    target: SubmissionPhase,
    reason: &str,
    options: TransitionOptions,
) -> Result<()> {
    let request = TransitionRequest::SendBack {
        target,
        reason: reason.to_string(),
    };
    run_transition(api, store, id, request, options).await
}
