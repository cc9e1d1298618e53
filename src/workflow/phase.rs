//! Submission phases and their fixed ordering

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six stages a submission passes through
///
/// Declaration order is the workflow order; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    /// Intake of the police submission
    DataEntry,
    /// Finance signs off on costs
    FinanceApproval,
    /// Botanist examines the material
    BotanistReview,
    /// Certificates and invoices are generated
    Documents,
    /// Results are emailed out
    SendEmails,
    /// Terminal
    Complete,
}

impl SubmissionPhase {
    /// All phases in workflow order
    pub const ALL: [Self; 6] = [
        Self::DataEntry,
        Self::FinanceApproval,
        Self::BotanistReview,
        Self::Documents,
        Self::SendEmails,
        Self::Complete,
    ];

    /// Number of phases
    pub const COUNT: usize = Self::ALL.len();

    /// Zero-based position in the workflow
    pub const fn index(self) -> usize {
        match self {
            Self::DataEntry => 0,
            Self::FinanceApproval => 1,
            Self::BotanistReview => 2,
            Self::Documents => 3,
            Self::SendEmails => 4,
            Self::Complete => 5,
        }
    }

    /// Wire name, as used by the remote API
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DataEntry => "data_entry",
            Self::FinanceApproval => "finance_approval",
            Self::BotanistReview => "botanist_review",
            Self::Documents => "documents",
            Self::SendEmails => "send_emails",
            Self::Complete => "complete",
        }
    }

    /// Human-readable label
    pub const fn label(self) -> &'static str {
        match self {
            Self::DataEntry => "Data Entry",
            Self::FinanceApproval => "Finance Approval",
            Self::BotanistReview => "Botanist Review",
            Self::Documents => "Documents",
            Self::SendEmails => "Send Emails",
            Self::Complete => "Complete",
        }
    }

    /// Whether this is the terminal phase
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl fmt::Display for SubmissionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the six phase names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePhaseError(pub String);

impl fmt::Display for ParsePhaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown submission phase '{}'", self.0)
    }
}

impl std::error::Error for ParsePhaseError {}

impl FromStr for SubmissionPhase {
    type Err = ParsePhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParsePhaseError(s.to_string()))
    }
}

/// A phase value as received from the remote API
///
/// Anything outside the six known names is kept verbatim as `Unknown` so it
/// can be reported and written back unchanged. A `null` or absent value
/// becomes `Unknown("")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum PhaseValue {
    /// One of the six workflow phases
    Known(SubmissionPhase),
    /// Unrecognised value
    Unknown(String),
}

impl PhaseValue {
    /// The known phase, if any
    pub const fn known(&self) -> Option<SubmissionPhase> {
        match self {
            Self::Known(p) => Some(*p),
            Self::Unknown(_) => None,
        }
    }

    /// Raw wire value
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(p) => p.as_str(),
            Self::Unknown(s) => s,
        }
    }

    /// Whether the value is one of the six phases
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl From<SubmissionPhase> for PhaseValue {
    fn from(phase: SubmissionPhase) -> Self {
        Self::Known(phase)
    }
}

impl From<String> for PhaseValue {
    fn from(s: String) -> Self {
        s.parse::<SubmissionPhase>()
            .map_or(Self::Unknown(s), Self::Known)
    }
}

impl From<Option<String>> for PhaseValue {
    fn from(value: Option<String>) -> Self {
        value.map_or_else(Self::default, Self::from)
    }
}

impl Default for PhaseValue {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<&str> for PhaseValue {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<PhaseValue> for String {
    fn from(value: PhaseValue) -> Self {
        match value {
            PhaseValue::Known(p) => p.as_str().to_string(),
            PhaseValue::Unknown(s) => s,
        }
    }
}

impl fmt::Display for PhaseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(s) if s.is_empty() => f.write_str("(unset)"),
            other => f.write_str(other.as_str()),
        }
    }
}
