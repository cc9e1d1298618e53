//! Transition execution
//!
//! Sends a planned phase change to the API, then re-fetches the submission
//! and checks that it landed where the plan said it would.

use crate::api::SubmissionApi;
use crate::error::Result;
use crate::transition::{TransitionKind, TransitionPlan, TransitionProgress, TransitionStep};
use crate::types::Submission;
use crate::workflow::PhaseValue;
use tracing::{info, warn};

/// Result of transition execution
#[derive(Debug, Clone)]
pub struct TransitionResult {
    /// Whether the phase change was accepted and observed
    pub success: bool,
    /// Latest copy of the submission (`None` on dry run or request failure)
    pub submission: Option<Submission>,
    /// Phase reported by the API after the change
    pub observed_phase: Option<PhaseValue>,
    /// Errors encountered
    pub errors: Vec<String>,
}

/// Execute a transition plan
///
/// 1. Ask the API to perform the change
/// 2. Re-fetch the submission
/// 3. Compare the observed phase with the planned target
///
/// A failed request ends the run with `success = false`; a failed re-fetch
/// falls back to the mutation response.
pub async fn execute_transition(
    plan: &TransitionPlan,
    api: &dyn SubmissionApi,
    progress: &dyn TransitionProgress,
    dry_run: bool,
) -> Result<TransitionResult> {
    let mut result = TransitionResult {
        success: true,
        submission: None,
        observed_phase: None,
        errors: Vec::new(),
    };

    if dry_run {
        progress.on_message("Dry run - no changes will be made").await;
        progress.on_message(&format!("Would {plan}")).await;
        return Ok(result);
    }

    progress.on_step(TransitionStep::Requesting).await;

    let response = match &plan.kind {
        TransitionKind::Advance => api.advance_phase(plan.submission_id).await,
        TransitionKind::SendBack { reason } => {
            api.send_back(plan.submission_id, plan.to, reason).await
        }
    };

    let mutated = match response {
        Ok(submission) => submission,
        Err(e) => {
            progress.on_error(&e).await;
            result
                .errors
                .push(format!("Failed to {plan}: {e}"));
            result.success = false;
            return Ok(result);
        }
    };

    progress.on_step(TransitionStep::Refreshing).await;

    let submission = match api.get_submission(plan.submission_id).await {
        Ok(fresh) => fresh,
        Err(e) => {
            progress.on_error(&e).await;
            result
                .errors
                .push(format!("Failed to refresh submission #{}: {e}", plan.submission_id));
            // Don't fail the transition for a refresh error
            mutated
        }
    };

    let expected = PhaseValue::Known(plan.to);
    if submission.phase == expected {
        info!(
            submission = plan.submission_id,
            from = %plan.from,
            to = %plan.to,
            "phase changed"
        );
    } else {
        warn!(
            submission = plan.submission_id,
            expected = %expected,
            observed = %submission.phase,
            "submission is not in the planned phase after transition"
        );
        let msg = format!(
            "Submission #{} is in {} after the change, expected {}",
            plan.submission_id, submission.phase, plan.to
        );
        progress.on_message(&msg).await;
        result.errors.push(msg);
        result.success = false;
    }

    result.observed_phase = Some(submission.phase.clone());
    result.submission = Some(submission);

    progress.on_step(TransitionStep::Complete).await;

    Ok(result)
}
