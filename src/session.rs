//! Client-side session state
//!
//! Holds the auth flags cached by `cms login` and the user's display
//! preferences. The binary builds one [`SessionStore`] at startup and hands it
//! to each command; tests swap in [`MemorySessionStore`].

use crate::error::{Error, Result};
use crate::types::{CurrentUser, UserRole};
use crate::workflow::{WorkflowUserRole, to_workflow_role};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Default number of rows per listing
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Display preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Terse output: no per-phase breakdown
    pub compact: bool,
    /// Rows per listing
    pub page_size: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            compact: false,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Everything the client remembers between invocations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    /// Whether `login` succeeded and `logout` has not run since
    pub authenticated: bool,
    /// Logged-in username
    pub username: Option<String>,
    /// Application role of the logged-in user
    pub role: Option<UserRole>,
    /// Admin override flag of the logged-in user
    pub is_admin: bool,
    /// Token used at login
    pub token: Option<String>,
    /// Display preferences (survive logout)
    pub preferences: Preferences,
}

impl SessionState {
    /// Record a successful login
    pub fn login(&mut self, user: &CurrentUser, token: Option<String>) {
        self.authenticated = true;
        self.username = Some(user.username.clone());
        self.role = Some(user.role.clone());
        self.is_admin = user.is_admin;
        self.token = token;
    }

    /// Forget the identity, keep preferences
    pub fn logout(&mut self) {
        *self = Self {
            preferences: self.preferences.clone(),
            ..Self::default()
        };
    }

    /// Workflow role of the logged-in user
    pub fn workflow_role(&self) -> WorkflowUserRole {
        self.role
            .as_ref()
            .map_or(WorkflowUserRole::None, to_workflow_role)
    }

    /// Role and admin flag, or `NotLoggedIn`
    pub fn require_login(&self) -> Result<(WorkflowUserRole, bool)> {
        if !self.authenticated {
            return Err(Error::NotLoggedIn);
        }
        Ok((self.workflow_role(), self.is_admin))
    }
}

/// Read/update access to the session state
pub trait SessionStore: Send + Sync {
    /// Current state (default state if nothing was saved yet)
    fn load(&self) -> Result<SessionState>;

    /// Replace the stored state
    fn save(&self, state: &SessionState) -> Result<()>;

    /// Load, modify, save; returns the saved state
    fn update(&self, f: &mut dyn FnMut(&mut SessionState)) -> Result<SessionState> {
        let mut state = self.load()?;
        f(&mut state);
        self.save(&state)?;
        Ok(state)
    }
}

/// Session state kept in memory only
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    state: Mutex<SessionState>,
}

impl MemorySessionStore {
    /// Store pre-populated with `state`
    pub const fn with_state(state: SessionState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<SessionState> {
        self.state
            .lock()
            .map(|s| s.clone())
            .map_err(|_| Error::Session("session lock poisoned".to_string()))
    }

    fn save(&self, state: &SessionState) -> Result<()> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| Error::Session("session lock poisoned".to_string()))?;
        *guard = state.clone();
        Ok(())
    }
}

/// Owner read/write only; the session may hold an API token
#[cfg(unix)]
const SESSION_FILE_MODE: u32 = 0o600;

/// Session state persisted as a JSON file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/cms/session.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("cms").join("session.json"))
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<SessionState> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no session file; using defaults");
            return Ok(SessionState::default());
        }

        let contents = fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents).map_err(|e| {
            Error::Session(format!("invalid session file {}: {e}", self.path.display()))
        })
    }

    fn save(&self, state: &SessionState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(SESSION_FILE_MODE);

        let mut file = options.open(&self.path)?;
        // mode() only applies when the file is created
        #[cfg(unix)]
        file.set_permissions(fs::Permissions::from_mode(SESSION_FILE_MODE))?;
        file.write_all(serde_json::to_string_pretty(state)?.as_bytes())?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }
}
