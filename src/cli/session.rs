//! Login, logout, and preference commands

use crate::cli::style::{Stylize, check};
use anstream::println;
use cms_workflow::api::SubmissionApi;
use cms_workflow::error::{Error, Result};
use cms_workflow::session::{SessionState, SessionStore};
use cms_workflow::workflow::to_workflow_role;

/// Run the login command
///
/// `token` is cached in the session only when given explicitly; a token
/// from the environment stays in the environment.
pub async fn run_login(
    api: &dyn SubmissionApi,
    store: &dyn SessionStore,
    token: Option<String>,
) -> Result<()> {
    let user = api.current_user().await.map_err(|e| match e {
        Error::Auth(msg) => Error::Auth(format!("login rejected: {msg}")),
        other => other,
    })?;

    store.update(&mut |state: &mut SessionState| state.login(&user, token.clone()))?;

    println!("{} Logged in as {}", check(), user.username.accent());
    println!(
        "  role: {} (workflow role: {}){}",
        user.role,
        to_workflow_role(&user.role),
        if user.is_admin { ", admin" } else { "" }
    );
    Ok(())
}

/// Run the logout command
pub fn run_logout(store: &dyn SessionStore) -> Result<()> {
    let was_logged_in = store.load()?.authenticated;
    store.update(&mut SessionState::logout)?;

    if was_logged_in {
        println!("{} Logged out", check());
    } else {
        println!("{}", "Not logged in".muted());
    }
    Ok(())
}

/// Run the prefs command: apply any given changes, then print preferences
pub fn run_prefs(
    store: &dyn SessionStore,
    compact: Option<bool>,
    page_size: Option<u32>,
) -> Result<()> {
    if page_size == Some(0) {
        return Err(Error::Config("page size must be at least 1".to_string()));
    }

    let state = if compact.is_some() || page_size.is_some() {
        store.update(&mut |state: &mut SessionState| {
            if let Some(compact) = compact {
                state.preferences.compact = compact;
            }
            if let Some(page_size) = page_size {
                state.preferences.page_size = page_size;
            }
        })?
    } else {
        store.load()?
    };

    println!("{}", "Preferences".emphasis());
    println!("  compact:   {}", state.preferences.compact.accent());
    println!("  page-size: {}", state.preferences.page_size.accent());
    if let Some(username) = &state.username {
        println!("  {}", format!("logged in as {username}").muted());
    }
    Ok(())
}
