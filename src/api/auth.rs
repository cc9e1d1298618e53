//! API token lookup

use crate::config::API_TOKEN_ENV;
use crate::session::SessionState;
use std::env;

/// Where a token was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// `CMS_API_TOKEN` environment variable
    EnvVar,
    /// Cached in the session store by `cms login`
    Session,
}

/// A token and its origin
#[derive(Debug, Clone)]
pub struct AuthToken {
    /// Token value
    pub token: String,
    /// Where the token was obtained from
    pub source: AuthSource,
}

/// Find an API token
///
/// Priority:
/// 1. `CMS_API_TOKEN` environment variable
/// 2. Token cached in the session
///
/// Returns `None` when neither is set; requests then go out unauthenticated.
pub fn resolve_token(session: &SessionState) -> Option<AuthToken> {
    pick_token(env::var(API_TOKEN_ENV).ok(), session)
}

fn pick_token(env_token: Option<String>, session: &SessionState) -> Option<AuthToken> {
    if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
        return Some(AuthToken {
            token,
            source: AuthSource::EnvVar,
        });
    }

    session.token.as_ref().map(|token| AuthToken {
        token: token.clone(),
        source: AuthSource::Session,
    })
}
