//! Phase ordering and progress helpers

use crate::workflow::{PhaseValue, SubmissionPhase};
use tracing::warn;

/// Phases strictly before `current`, in workflow order
pub fn completed_phases(current: SubmissionPhase) -> Vec<SubmissionPhase> {
    SubmissionPhase::ALL[..current.index()].to_vec()
}

/// Percentage through the workflow: 0 at `data_entry`, 100 at `complete`
// index <= 5, so the rounded result always fits in a u8
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn phase_progress(current: SubmissionPhase) -> u8 {
    let last = SubmissionPhase::COUNT - 1;
    ((current.index() as f64 / last as f64) * 100.0).round() as u8
}

/// The phase after `current`, or `None` at the terminal phase
pub fn next_phase(current: SubmissionPhase) -> Option<SubmissionPhase> {
    SubmissionPhase::ALL.get(current.index() + 1).copied()
}

/// Phases a submission may be sent back to: exactly the completed ones
pub fn send_back_targets(current: SubmissionPhase) -> Vec<SubmissionPhase> {
    completed_phases(current)
}

/// Whether `phase` can be opened from the progress display
///
/// Completed phases and the current phase are clickable; future ones are not.
pub fn is_phase_clickable(phase: SubmissionPhase, current: SubmissionPhase) -> bool {
    phase <= current
}

// Lenient variants for values straight off the wire

impl PhaseValue {
    /// Completed phases, or an empty list for an unknown value
    pub fn completed_phases(&self) -> Vec<SubmissionPhase> {
        match self {
            Self::Known(p) => completed_phases(*p),
            Self::Unknown(raw) => {
                warn!(phase = %raw, "unrecognised phase; no completed phases");
                Vec::new()
            }
        }
    }

    /// Next phase, or `None` for an unknown value
    pub fn next_phase(&self) -> Option<SubmissionPhase> {
        match self {
            Self::Known(p) => next_phase(*p),
            Self::Unknown(raw) => {
                warn!(phase = %raw, "unrecognised phase; no next phase");
                None
            }
        }
    }

    /// Progress percentage, or 0 for an unknown value
    pub fn progress(&self) -> u8 {
        match self {
            Self::Known(p) => phase_progress(*p),
            Self::Unknown(raw) => {
                warn!(phase = %raw, "unrecognised phase; progress reported as 0");
                0
            }
        }
    }
}
