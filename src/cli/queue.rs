//! Queue command - submissions the logged-in user can act on

use crate::cli::progress::with_spinner;
use crate::cli::style::Stylize;
use anstream::println;
use cms_workflow::api::SubmissionApi;
use cms_workflow::error::Result;
use cms_workflow::session::SessionStore;
use cms_workflow::workflow::{SubmissionPhase, has_any_permission};

/// Run the queue command
pub async fn run_queue(
    api: &dyn SubmissionApi,
    store: &dyn SessionStore,
    phase: Option<SubmissionPhase>,
) -> Result<()> {
    let session = store.load()?;
    let (role, is_admin) = session.require_login()?;

    let submissions = with_spinner("Fetching submissions...", api.list_submissions(phase)).await?;

    let actionable: Vec<_> = submissions
        .iter()
        .filter(|s| has_any_permission(s, role, is_admin))
        .collect();

    if actionable.is_empty() {
        println!("{}", "Nothing waiting on you".muted());
        return Ok(());
    }

    let page_size = usize::try_from(session.preferences.page_size).unwrap_or(usize::MAX);
    for submission in actionable.iter().take(page_size) {
        println!(
            "  {:<8} {:<18} {:>3}%  {}",
            format!("#{}", submission.id),
            submission.phase.as_str(),
            submission.phase.progress(),
            submission.reference.muted()
        );
    }

    if actionable.len() > page_size {
        println!(
            "{}",
            format!("... and {} more", actionable.len() - page_size).muted()
        );
    }

    println!();
    println!(
        "{} submission{} waiting on you",
        actionable.len().accent(),
        if actionable.len() == 1 { "" } else { "s" }
    );

    Ok(())
}
