//! Core types for cms-workflow

use crate::workflow::{PhaseValue, SubmissionPhase};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A police submission as returned by the remote API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Submission ID
    pub id: u64,
    /// Case or exhibit reference
    #[serde(default)]
    pub reference: String,
    /// Submitting police station
    #[serde(default)]
    pub police_station: String,
    /// Current workflow phase
    #[serde(default)]
    pub phase: PhaseValue,
    /// Audit trail of phase changes, oldest first
    #[serde(default)]
    pub phase_history: Vec<PhaseHistoryEntry>,
    /// When the submission was created
    pub created_at: DateTime<Utc>,
    /// When the submission reached `complete`
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// When result emails went out
    #[serde(default)]
    pub emails_sent_at: Option<DateTime<Utc>>,
    /// When certificates and invoices were generated
    #[serde(default)]
    pub documents_generated_at: Option<DateTime<Utc>>,
    /// Generated certificates
    #[serde(default)]
    pub certificates: Vec<DocumentRef>,
    /// Generated invoices
    #[serde(default)]
    pub invoices: Vec<DocumentRef>,
}

impl Submission {
    /// A fresh submission at `phase` with no history or documents
    pub fn new(id: u64, phase: SubmissionPhase) -> Self {
        Self {
            id,
            reference: String::new(),
            police_station: String::new(),
            phase: PhaseValue::Known(phase),
            phase_history: Vec::new(),
            created_at: Utc::now(),
            completed_at: None,
            emails_sent_at: None,
            documents_generated_at: None,
            certificates: Vec::new(),
            invoices: Vec::new(),
        }
    }
}

/// Kind of phase change recorded in the history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    /// Moved forward one phase
    Advance,
    /// Returned to an earlier phase
    SendBack,
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Advance => "advance",
            Self::SendBack => "send back",
        })
    }
}

/// One phase change in a submission's audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseHistoryEntry {
    /// Phase before the change
    #[serde(default)]
    pub from_phase: PhaseValue,
    /// Phase after the change
    #[serde(default)]
    pub to_phase: PhaseValue,
    /// Advance or send-back
    pub action: HistoryAction,
    /// Reason given for a send-back
    #[serde(default)]
    pub reason: Option<String>,
    /// Username of whoever made the change
    #[serde(default)]
    pub user: Option<String>,
    /// When the change happened
    pub timestamp: DateTime<Utc>,
}

/// Reference to a generated certificate or invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Document ID
    pub id: u64,
    /// Display number (e.g. certificate number)
    pub number: String,
    /// When the document was generated
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Application role of a user
///
/// Values the client does not recognise are kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    /// System administrator
    Admin,
    /// Botanist staff
    Botanist,
    /// Finance staff
    Finance,
    /// Data entry clerk
    DataEntry,
    /// Police liaison
    Police,
    /// Any other role string
    Other(String),
}

impl UserRole {
    /// Wire name
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Botanist => "botanist",
            Self::Finance => "finance",
            Self::DataEntry => "data_entry",
            Self::Police => "police",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for UserRole {
    fn from(s: String) -> Self {
        match s.as_str() {
            "admin" => Self::Admin,
            "botanist" => Self::Botanist,
            "finance" => Self::Finance,
            "data_entry" => Self::DataEntry,
            "police" => Self::Police,
            _ => Self::Other(s),
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated user, as reported by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Login name
    pub username: String,
    /// Application role
    pub role: UserRole,
    /// Superuser flag; bypasses phase permission tables
    #[serde(default)]
    pub is_admin: bool,
}
