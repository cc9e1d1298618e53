//! Workflow roles

use crate::types::UserRole;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three-valued role used for phase permission checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowUserRole {
    /// Botanist staff
    Botanist,
    /// Finance staff
    Finance,
    /// No workflow role
    None,
}

impl WorkflowUserRole {
    /// Wire name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Botanist => "botanist",
            Self::Finance => "finance",
            Self::None => "none",
        }
    }
}

impl fmt::Display for WorkflowUserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Narrow an application role to its workflow role
///
/// Roles without a workflow counterpart (including admins, whose access comes
/// from the separate admin flag) map to `None`.
pub const fn to_workflow_role(role: &UserRole) -> WorkflowUserRole {
    match role {
        UserRole::Botanist => WorkflowUserRole::Botanist,
        UserRole::Finance => WorkflowUserRole::Finance,
        UserRole::Admin | UserRole::DataEntry | UserRole::Police | UserRole::Other(_) => {
            WorkflowUserRole::None
        }
    }
}
