//! Phase transition engine
//!
//! Handles changing a submission's phase on the remote API:
//! 1. Planning - validate the request against the workflow model
//! 2. Execution - call the API, then re-fetch and confirm

mod execute;
mod plan;
mod progress;

pub use execute::{TransitionResult, execute_transition};
pub use plan::{Actor, TransitionKind, TransitionPlan, TransitionRequest, plan_transition};
pub use progress::{NoopProgress, TransitionProgress, TransitionStep};
