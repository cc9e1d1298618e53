//! CLI commands
//!
//! Command implementations for the `cms` binary.

mod phases;
mod progress;
mod queue;
mod session;
mod status;
pub mod style;
mod transition;

pub use phases::run_phases;
pub use queue::run_queue;
pub use session::{run_login, run_logout, run_prefs};
pub use status::{run_history, run_status};
pub use transition::{TransitionOptions, run_advance, run_send_back};

use cms_workflow::api::{HttpSubmissionApi, resolve_token};
use cms_workflow::config::ApiConfig;
use cms_workflow::error::Result;
use cms_workflow::session::SessionStore;
use tracing::debug;

/// Build an API client, picking up the token from the environment or session
pub fn connect(api_url: &str, store: &dyn SessionStore) -> Result<HttpSubmissionApi> {
    let session = store.load()?;
    let token = resolve_token(&session);
    if let Some(token) = &token {
        debug!(source = ?token.source, "using API token");
    }
    let api = HttpSubmissionApi::new(ApiConfig::new(api_url, token.map(|t| t.token))?)?;
    debug!(base_url = %api.config().base_url, "API client ready");
    Ok(api)
}

/// Build an API client with an explicit token (used by `login`)
pub fn connect_with_token(
    api_url: &str,
    store: &dyn SessionStore,
    token: Option<&str>,
) -> Result<HttpSubmissionApi> {
    match token {
        Some(token) => HttpSubmissionApi::new(ApiConfig::new(api_url, Some(token.to_string()))?),
        None => connect(api_url, store),
    }
}
